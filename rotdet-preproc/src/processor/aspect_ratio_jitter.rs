//! Random aspect ratio perturbation that keeps the image area.

use crate::{
    boxes::{self, CoordRounding, OrientedBox},
    common::*,
    error::PreprocessError,
    image_ops,
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AspectRatioJitterInit {
    /// The range `[min, max)` where the long-to-short side ratio is drawn.
    pub ratio_range: (R64, R64),
    pub rounding: CoordRounding,
}

impl AspectRatioJitterInit {
    pub fn build(self) -> Result<AspectRatioJitter> {
        let Self {
            ratio_range: (min, max),
            rounding,
        } = self;

        if min <= 0.0 || max < min {
            return Err(PreprocessError::DegenerateInput(format!(
                "aspect ratio range must be positive and ordered, but get [{}, {})",
                min, max
            ))
            .into());
        }

        Ok(AspectRatioJitter {
            min_ratio: min.raw(),
            max_ratio: max.raw(),
            rounding,
        })
    }
}

impl Default for AspectRatioJitterInit {
    fn default() -> Self {
        Self {
            ratio_range: (r64(1.0), r64(1.5)),
            rounding: CoordRounding::Floor,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AspectRatioJitter {
    min_ratio: f64,
    max_ratio: f64,
    rounding: CoordRounding,
}

impl AspectRatioJitter {
    /// Compute the output size of an input of `size` under `ratio`.
    ///
    /// The short side is `sqrt(area / ratio)` and the long side is `short * ratio`,
    /// both truncated and at least one pixel. A portrait input stays portrait;
    /// otherwise, including square inputs, the width becomes the long side.
    pub fn target_size(size: &HW<usize>, ratio: f64) -> HW<usize> {
        let area = size.area() as f64;
        let short_side = (area / ratio).sqrt();
        let long_side = short_side * ratio;
        let short_side = (short_side as usize).max(1);
        let long_side = (long_side as usize).max(1);

        if size.w() < size.h() {
            HW::from_hw([long_side, short_side])
        } else {
            HW::from_hw([short_side, long_side])
        }
    }

    /// Draw a ratio from the configured range.
    pub fn sample_ratio<R>(&self, rng: &mut R) -> f64
    where
        R: Rng,
    {
        if self.min_ratio < self.max_ratio {
            rng.gen_range(self.min_ratio..self.max_ratio)
        } else {
            self.min_ratio
        }
    }

    pub fn forward<R>(
        &self,
        rng: &mut R,
        image: ArrayView3<f32>,
        boxes: &[OrientedBox],
    ) -> Result<(Array3<f32>, Vec<OrientedBox>)>
    where
        R: Rng,
    {
        let orig_size = image_ops::image_size(&image)?;
        let ratio = self.sample_ratio(rng);
        let new_size = Self::target_size(&orig_size, ratio);
        debug!(
            "aspect ratio jitter {:.3}: {}x{} -> {}x{}",
            ratio,
            orig_size.h(),
            orig_size.w(),
            new_size.h(),
            new_size.w()
        );

        let new_image = image_ops::resize_bilinear(image, new_size.h(), new_size.w())?;
        let new_boxes = boxes::resize_boxes(boxes, &orig_size, &new_size, self.rounding);
        Ok((new_image, new_boxes))
    }
}
