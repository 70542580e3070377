//! The training and inference preprocessing pipeline.

use super::{AspectRatioJitter, RandomFlip, ShortSideResize};
use crate::{
    boxes::OrientedBox,
    common::*,
    image_ops,
    record::DataRecord,
};

/// Runs aspect ratio jitter, short-side resize and random flipping in order.
///
/// The jitter and flip stages are optional. The processor holds no mutable
/// state, so a shared reference can serve many threads.
#[derive(Debug, Clone)]
pub struct Preprocessor {
    jitter: Option<AspectRatioJitter>,
    resize: ShortSideResize,
    flip: Option<RandomFlip>,
}

impl Preprocessor {
    pub fn new(
        jitter: Option<AspectRatioJitter>,
        resize: ShortSideResize,
        flip: Option<RandomFlip>,
    ) -> Self {
        Self {
            jitter,
            resize,
            flip,
        }
    }

    /// Process a training sample with a generator seeded from entropy.
    pub fn forward(&self, image: ArrayView3<f32>, boxes: &[OrientedBox]) -> Result<DataRecord> {
        let mut rng = StdRng::from_entropy();
        self.forward_with_rng(&mut rng, image, boxes)
    }

    /// Process a training sample drawing every random decision from `rng`.
    ///
    /// The input is validated before any stage runs.
    pub fn forward_with_rng<R>(
        &self,
        rng: &mut R,
        image: ArrayView3<f32>,
        boxes: &[OrientedBox],
    ) -> Result<DataRecord>
    where
        R: Rng,
    {
        image_ops::image_size(&image)?;

        let (image, boxes) = match &self.jitter {
            Some(jitter) => jitter.forward(rng, image, boxes)?,
            None => (image.to_owned(), boxes.to_vec()),
        };

        let (image, boxes, _size) = self.resize.forward(image.view(), &boxes)?;

        let (image, boxes) = match &self.flip {
            Some(flip) => flip.forward(rng, image.view(), &boxes)?,
            None => (image, boxes),
        };

        Ok(DataRecord { image, boxes })
    }

    /// Process a sample given as dense arrays, boxes laid out as `(N, 9)` rows.
    ///
    /// Returns the image, the boxes in the same layout and the final size.
    pub fn forward_arrays<R>(
        &self,
        rng: &mut R,
        image: ArrayD<f32>,
        boxes: ArrayView2<f64>,
    ) -> Result<(Array3<f32>, Array2<f64>, HW<usize>)>
    where
        R: Rng,
    {
        let record = DataRecord::from_arrays(image, boxes)?;
        let output = self.forward_with_rng(rng, record.image.view(), &record.boxes)?;
        let size = output.size();
        let boxes = output.boxes_array();
        Ok((output.image, boxes, size))
    }

    /// Resize an image for inference, where no annotation is available.
    pub fn forward_inference(&self, image: ArrayView3<f32>, enabled: bool) -> Result<Array3<f32>> {
        self.resize.forward_image(image, enabled)
    }
}
