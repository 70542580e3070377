pub use anyhow::{bail, ensure, format_err, Context as _, Error, Result};
pub use bbox::{Quad, Transform, HW};
pub use indexmap::IndexSet;
pub use itertools::Itertools as _;
pub use label::Label;
pub use log::{debug, warn};
pub use ndarray::{s, Array2, Array3, ArrayD, ArrayView2, ArrayView3, Axis, Ix3};
pub use noisy_float::prelude::*;
pub use once_cell::sync::Lazy;
pub use rand::prelude::*;
pub use serde::{Deserialize, Deserializer, Serialize, Serializer};
pub use std::{
    fmt::{self, Display, Formatter},
    fs,
    path::Path,
};
