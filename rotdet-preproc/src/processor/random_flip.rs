//! Random horizontal flipping.

use crate::{
    boxes::{self, OrientedBox},
    common::*,
    image_ops,
    utils::Ratio,
};

/// Mirror an image and its boxes left to right.
pub fn flip_left_right(
    image: ArrayView3<f32>,
    boxes: &[OrientedBox],
) -> Result<(Array3<f32>, Vec<OrientedBox>)> {
    let size = image_ops::image_size(&image)?;
    let new_image = image_ops::flip_left_right(image);
    let new_boxes = boxes::flip_boxes_horizontal(boxes, size.w());
    Ok((new_image, new_boxes))
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct RandomFlipInit {
    /// The probability to flip, 0.5 by default.
    pub prob: Ratio,
}

impl RandomFlipInit {
    pub fn build(self) -> RandomFlip {
        RandomFlip { prob: self.prob }
    }
}

#[derive(Debug, Clone)]
pub struct RandomFlip {
    prob: Ratio,
}

impl RandomFlip {
    /// Flip both the image and the boxes, or neither, on a single draw from `rng`.
    pub fn forward<R>(
        &self,
        rng: &mut R,
        image: ArrayView3<f32>,
        boxes: &[OrientedBox],
    ) -> Result<(Array3<f32>, Vec<OrientedBox>)>
    where
        R: Rng,
    {
        image_ops::image_size(&image)?;

        if self.prob.sample(rng) {
            debug!("flip left right");
            flip_left_right(image, boxes)
        } else {
            Ok((image.to_owned(), boxes.to_vec()))
        }
    }
}
