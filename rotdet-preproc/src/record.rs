use crate::{
    boxes::{self, OrientedBox},
    common::*,
    image_ops,
};

/// An image with its oriented box annotations.
#[derive(Debug, Clone, PartialEq)]
pub struct DataRecord {
    /// The HWC image.
    pub image: Array3<f32>,
    /// Boxes in pixel units, in annotation order.
    pub boxes: Vec<OrientedBox>,
}

impl DataRecord {
    /// Validate and build a record from a dense image and an `(N, 9)` box array.
    pub fn from_arrays(image: ArrayD<f32>, boxes: ArrayView2<f64>) -> Result<Self> {
        let image = image_ops::image_from_dyn(image)?;
        image_ops::image_size(&image.view())?;
        let boxes = boxes::boxes_from_array(boxes)?;
        Ok(Self { image, boxes })
    }

    pub fn size(&self) -> HW<usize> {
        let (h, w, _) = self.image.dim();
        HW::from_hw([h, w])
    }

    pub fn boxes_array(&self) -> Array2<f64> {
        boxes::boxes_to_array(&self.boxes)
    }
}
