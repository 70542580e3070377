//! Common imports from external crates.

pub use anyhow::{ensure, format_err, Context, Error, Result};
pub use futures::stream::{self, TryStreamExt};
pub use log::{debug, info, warn};
pub use par_stream::{ParParamsConfig, ParStreamExt};
pub use rand::{prelude::*, rngs::StdRng};
pub use rotdet_preproc::{
    dota::DotaAnnotation, image_ops, Preprocessor, PreprocessorConfig,
};
pub use serde::{Deserialize, Serialize};
pub use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
    time::Instant,
};
