use crate::common::*;

/// A probability-like value within `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Ratio(R64);

impl Ratio {
    pub fn to_f64(&self) -> f64 {
        self.0.raw()
    }

    /// Draw a Bernoulli sample: true iff a uniform draw in `[0, 1)` falls below the ratio.
    pub fn sample<R>(&self, rng: &mut R) -> bool
    where
        R: Rng,
    {
        rng.gen::<f64>() < self.to_f64()
    }
}

impl Default for Ratio {
    fn default() -> Self {
        Self(r64(0.5))
    }
}

impl Serialize for Ratio {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Ratio {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error as _;
        let value = f64::deserialize(deserializer)?;
        Self::try_from(value).map_err(|err| D::Error::custom(format!("{:?}", err)))
    }
}

impl TryFrom<R64> for Ratio {
    type Error = Error;

    fn try_from(value: R64) -> Result<Self, Self::Error> {
        ensure!(
            (0.0..=1.0).contains(&value.raw()),
            "ratio value must be within range [0.0, 1.0], but get {}",
            value
        );
        Ok(Self(value))
    }
}

impl TryFrom<f64> for Ratio {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::try_from(R64::try_new(value).ok_or_else(|| format_err!("not a finite value"))?)
    }
}

impl From<Ratio> for f64 {
    fn from(ratio: Ratio) -> Self {
        ratio.0.raw()
    }
}

impl Display for Ratio {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        self.to_f64().fmt(f)
    }
}
