use std::fmt;
use std::num::NonZeroU32;

use crate::ModelError;

/// Dense 1-based identifier assigned by the pipeline to a dimension or fact row.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct SurrogateKey(NonZeroU32);

impl SurrogateKey {
    pub fn new(value: u32) -> Result<Self, ModelError> {
        NonZeroU32::new(value)
            .map(Self)
            .ok_or(ModelError::ZeroSurrogateKey)
    }

    /// Key for the row at `index` in first-appearance order.
    ///
    /// # Panics
    ///
    /// Panics if `index` does not fit in a `u32` key space.
    pub fn from_index(index: usize) -> Self {
        let value = u32::try_from(index + 1)
            .ok()
            .and_then(NonZeroU32::new)
            .expect("surrogate key space exhausted");
        Self(value)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for SurrogateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<SurrogateKey> for i64 {
    fn from(key: SurrogateKey) -> Self {
        i64::from(key.get())
    }
}
