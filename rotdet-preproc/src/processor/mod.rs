//! Data preprocessing building blocks.

mod aspect_ratio_jitter;
mod preprocessor;
mod random_flip;
mod short_side_resize;

pub use aspect_ratio_jitter::*;
pub use preprocessor::*;
pub use random_flip::*;
pub use short_side_resize::*;
