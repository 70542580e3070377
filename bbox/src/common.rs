pub use num_traits::{Num, Unsigned};
pub use std::ops::{Mul, Neg};
