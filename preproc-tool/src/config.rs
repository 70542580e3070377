//! Preprocessing program configuration format.

use crate::common::*;

/// The main program configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub dataset: DatasetConfig,
    pub output: OutputConfig,
    pub preprocessor: PreprocessorConfig,
}

impl Config {
    pub fn open<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let text = std::fs::read_to_string(path)?;
        let config = json5::from_str(&text)?;
        Ok(config)
    }
}

/// DOTA dataset options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// The directory containing `images` and `labelTxt` subdirectories.
    pub dataset_dir: PathBuf,
    /// The file extension of image files.
    #[serde(default = "default_image_ext")]
    pub image_ext: String,
    /// If set, resize images only and ignore label files.
    #[serde(default)]
    pub inference_only: bool,
}

/// Output options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub output_dir: PathBuf,
    /// If set, sample `i` draws from a generator seeded with `seed + i`.
    pub seed: Option<u64>,
    /// The maximum number of concurrent workers. It defaults to the number of CPUs.
    pub num_workers: Option<usize>,
}

fn default_image_ext() -> String {
    "png".into()
}
