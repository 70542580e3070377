//! Preprocessing configuration format.

use crate::{
    boxes::CoordRounding,
    common::*,
    processor::{
        AspectRatioJitterInit, Preprocessor, RandomFlipInit, ShortSideResizeInit,
    },
    utils::Ratio,
};

/// Data preprocessing options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreprocessorConfig {
    /// The short side length after resizing in pixels.
    #[serde(default = "default_target_short_side")]
    pub target_short_side: usize,
    /// The maximum long side length after resizing in pixels.
    #[serde(default = "default_max_length")]
    pub max_length: usize,
    /// The rounding of box coordinates after resizing.
    #[serde(default)]
    pub coord_rounding: CoordRounding,
    /// If set, flip images left to right at random.
    #[serde(default = "default_true")]
    pub horizontal_flip: bool,
    /// The probability to flip.
    #[serde(default)]
    pub flip_prob: Ratio,
    /// The range of the long-to-short side ratio to draw from. Jittering is disabled if unset.
    #[serde(default)]
    pub aspect_ratio_jitter: Option<(R64, R64)>,
}

impl PreprocessorConfig {
    pub fn open<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let text = fs::read_to_string(path)?;
        let config = json5::from_str(&text)?;
        Ok(config)
    }

    /// Validate the options and build the pipeline.
    pub fn build(&self) -> Result<Preprocessor> {
        let Self {
            target_short_side,
            max_length,
            coord_rounding,
            horizontal_flip,
            flip_prob,
            aspect_ratio_jitter,
        } = *self;

        let jitter = aspect_ratio_jitter
            .map(|ratio_range| {
                AspectRatioJitterInit {
                    ratio_range,
                    rounding: coord_rounding,
                }
                .build()
            })
            .transpose()?;
        let resize = ShortSideResizeInit {
            target_short_side,
            max_length,
            rounding: coord_rounding,
        }
        .build()?;
        let flip = horizontal_flip.then(|| RandomFlipInit { prob: flip_prob }.build());

        Ok(Preprocessor::new(jitter, resize, flip))
    }
}

impl Default for PreprocessorConfig {
    fn default() -> Self {
        Self {
            target_short_side: default_target_short_side(),
            max_length: default_max_length(),
            coord_rounding: CoordRounding::default(),
            horizontal_flip: true,
            flip_prob: Ratio::default(),
            aspect_ratio_jitter: None,
        }
    }
}

fn default_target_short_side() -> usize {
    800
}

fn default_max_length() -> usize {
    800
}

fn default_true() -> bool {
    true
}
