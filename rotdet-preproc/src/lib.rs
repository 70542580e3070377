//! Geometric preprocessing for rotated-box object detection on aerial imagery.
//!
//! Images are HWC `f32` arrays and annotations are oriented quadrilaterals
//! with class labels. Every processor maps an image and its boxes together
//! so that pixel and label coordinates stay in correspondence.

mod common;
pub mod boxes;
pub mod config;
pub mod dota;
pub mod error;
pub mod image_ops;
pub mod processor;
pub mod record;
pub mod utils;

pub use boxes::{CoordRounding, OrientedBox};
pub use config::PreprocessorConfig;
pub use error::PreprocessError;
pub use processor::Preprocessor;
pub use record::DataRecord;
