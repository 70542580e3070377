//! Safe geometric types for oriented bounding boxes.

mod common;

pub use hw::*;
pub mod hw;

pub use quad::*;
pub mod quad;

pub use tlbr::*;
pub mod tlbr;

pub use transform::*;
mod transform;
