//! Thin terminal shims: output streams, color escapes, cursor movement and
//! terminal size.
//!
//! Everything here writes plain ANSI sequences to an [`std::io::Write`]
//! target. Indicators use these through [`Stream`]; the functions are public
//! for callers that interleave their own output with a composition.

pub mod color;
pub mod cursor;
mod size;
mod stream;

pub use size::{FALLBACK_SIZE, terminal_size, terminal_width};
pub use stream::Stream;
