//! Resize so that the short side meets a target length.

use crate::{
    boxes::{self, CoordRounding, OrientedBox},
    common::*,
    error::PreprocessError,
    image_ops,
    utils::cap_length,
};

/// Short-side resize initializer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShortSideResizeInit {
    /// The short side length after resizing in pixels.
    pub target_short_side: usize,
    /// The upper bound of the long side in pixels.
    pub max_length: usize,
    pub rounding: CoordRounding,
}

impl ShortSideResizeInit {
    pub fn build(self) -> Result<ShortSideResize> {
        let Self {
            target_short_side,
            max_length,
            rounding,
        } = self;

        if target_short_side == 0 || max_length == 0 {
            return Err(PreprocessError::DegenerateInput(format!(
                "target_short_side and max_length must be positive, but get {} and {}",
                target_short_side, max_length
            ))
            .into());
        }

        Ok(ShortSideResize {
            target_short_side,
            max_length,
            rounding,
        })
    }
}

impl Default for ShortSideResizeInit {
    fn default() -> Self {
        Self {
            target_short_side: 800,
            max_length: 800,
            rounding: CoordRounding::Floor,
        }
    }
}

/// Short-side resize processor.
#[derive(Debug, Clone)]
pub struct ShortSideResize {
    target_short_side: usize,
    max_length: usize,
    rounding: CoordRounding,
}

impl ShortSideResize {
    /// Compute the output size for an input of `size`.
    ///
    /// A landscape image gets the target height. Otherwise, including square
    /// images, the width gets the target and the height follows the aspect
    /// ratio. The derived side is floor-divided and capped by `max_length`.
    pub fn target_size(&self, size: &HW<usize>) -> Result<HW<usize>> {
        let Self {
            target_short_side: target,
            max_length,
            ..
        } = *self;
        let [h, w] = size.hw();

        let scale = |long: usize, short: usize| -> Result<usize> {
            let product = target.checked_mul(long).ok_or_else(|| {
                PreprocessError::DegenerateInput(format!(
                    "image size {}x{} is too large to resize to {}",
                    h, w, target
                ))
            })?;
            Ok(cap_length(product / short, max_length))
        };

        let [new_h, new_w] = if h < w {
            [target, scale(w, h)?]
        } else {
            [scale(h, w)?, target]
        };

        Ok(HW::from_hw([new_h, new_w]))
    }

    /// Resize the image and scale the boxes accordingly.
    ///
    /// Returns the resized image, the boxes and the new image size.
    pub fn forward(
        &self,
        image: ArrayView3<f32>,
        boxes: &[OrientedBox],
    ) -> Result<(Array3<f32>, Vec<OrientedBox>, HW<usize>)> {
        let orig_size = image_ops::image_size(&image)?;
        let new_size = self.target_size(&orig_size)?;
        debug!(
            "short side resize {}x{} -> {}x{}",
            orig_size.h(),
            orig_size.w(),
            new_size.h(),
            new_size.w()
        );

        let new_image = image_ops::resize_bilinear(image, new_size.h(), new_size.w())?;
        let new_boxes = boxes::resize_boxes(boxes, &orig_size, &new_size, self.rounding);

        Ok((new_image, new_boxes, new_size))
    }

    /// Resize an image without annotations.
    ///
    /// If `enabled` is false, the image is returned unchanged.
    pub fn forward_image(&self, image: ArrayView3<f32>, enabled: bool) -> Result<Array3<f32>> {
        if !enabled {
            return Ok(image.to_owned());
        }

        let orig_size = image_ops::image_size(&image)?;
        let new_size = self.target_size(&orig_size)?;
        image_ops::resize_bilinear(image, new_size.h(), new_size.w())
    }
}
