mod length;
mod ratio;

pub use length::*;
pub use ratio::*;
