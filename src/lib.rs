#![doc = include_str!("../README.md")]

pub(crate) mod bar;
pub(crate) mod block_bar;
pub(crate) mod dynamic;
pub(crate) mod indeterminate;
pub(crate) mod multi;
pub(crate) mod render;
pub mod scale;
pub(crate) mod setting;
pub(crate) mod spinner;
pub mod term;
pub(crate) mod width;
pub(crate) mod writer;

#[cfg(test)]
mod test;

/// Re-exports of all public types and traits.
pub mod prelude {
    pub use crate::bar::ProgressBar;
    pub use crate::block_bar::BlockProgressBar;
    pub use crate::dynamic::DynamicProgress;
    pub use crate::indeterminate::IndeterminateProgressBar;
    pub use crate::multi::MultiProgress;
    pub use crate::setting::{Color, FontStyle, OptionKind, ProgressType, Setting};
    pub use crate::spinner::ProgressSpinner;
    pub use crate::term::Stream;
    pub use crate::width::display_width;
    pub use crate::{Determinate, Indicator};
}

pub use crate::prelude::*;
pub use crate::spinner::presets;

mod sealed {
    use crate::writer::FrameWriter;

    /// Entry points reserved for compositions.
    ///
    /// A composition flips its members into multi-progress mode on
    /// registration, after which their public mutators only update state.
    /// Painting then happens exclusively through [`Composable::paint_composed`].
    pub trait Composable {
        fn attach(&self);
        fn detach(&self);
        fn paint_composed(&self, frame: &mut FrameWriter<'_>) -> std::io::Result<()>;
    }
}

/// A progress indicator that can be driven on its own or inside a
/// [`MultiProgress`] / [`DynamicProgress`].
///
/// Every mutating call takes the indicator's lock, updates its state and
/// repaints before releasing it. Once the indicator is registered in a
/// composition, mutators keep updating state but leave painting to the
/// composition.
pub trait Indicator: sealed::Composable + Send + Sync {
    /// Advances the indicator by one step and repaints.
    fn tick(&self);

    /// Returns `true` once the indicator reached its end or was marked completed.
    fn is_completed(&self) -> bool;

    /// Forces completion, repaints and ends the line.
    ///
    /// Calling it again has no further visible effect.
    fn mark_as_completed(&self);
}

/// An [`Indicator`] whose progress can be set to an absolute value.
pub trait Determinate: Indicator {
    /// Numeric type of the progress counter.
    type Value: Copy;

    /// Replaces the progress value and repaints.
    fn set_progress(&self, value: Self::Value);

    /// Returns the progress clamped to `[0, max_progress]`.
    fn current(&self) -> Self::Value;
}

/// Implements [`Indicator`] and the composition hooks for an indicator type
/// whose state lives in a `state: Mutex<S>` field with `S: render::Line`.
macro_rules! impl_indicator {
    ($ty:ty) => {
        impl $crate::sealed::Composable for $ty {
            fn attach(&self) {
                $crate::render::Line::core_mut(&mut *self.state.lock()).multi_mode = true;
            }

            fn detach(&self) {
                $crate::render::Line::core_mut(&mut *self.state.lock()).multi_mode = false;
            }

            fn paint_composed(
                &self, frame: &mut $crate::writer::FrameWriter<'_>,
            ) -> std::io::Result<()> {
                $crate::render::paint_composed(&mut *self.state.lock(), frame)
            }
        }

        impl $crate::Indicator for $ty {
            fn tick(&self) {
                <$ty>::tick(self)
            }

            fn is_completed(&self) -> bool {
                <$ty>::is_completed(self)
            }

            fn mark_as_completed(&self) {
                <$ty>::mark_as_completed(self)
            }
        }
    };
}

pub(crate) use impl_indicator;
