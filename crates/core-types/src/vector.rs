use crate::error::CoreError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An ordered sequence of simulated daily PnL values.
///
/// All the vector arithmetic needed for VaR lives here: scaling by a
/// position quantity and element-wise accumulation across positions.
/// Lengths are checked on every element-wise operation; mixing a 272-day
/// history with a 150-day one is always an error, never a truncation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PnlVector(Vec<Decimal>);

impl PnlVector {
    pub fn new(values: Vec<Decimal>) -> Self {
        Self(values)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn values(&self) -> &[Decimal] {
        &self.0
    }

    /// Multiplies every element by `quantity`, producing the position-scaled
    /// vector (quantity × instrument PnL history).
    pub fn scale(&self, quantity: Decimal) -> PnlVector {
        PnlVector(self.0.iter().map(|v| v * quantity).collect())
    }

    /// Adds `other` into `self` element-wise.
    ///
    /// An empty accumulator adopts `other`'s values and length; after that,
    /// any length mismatch is a `CoreError::VectorLengthMismatch`.
    pub fn add_assign(&mut self, other: &PnlVector) -> Result<(), CoreError> {
        if self.0.is_empty() {
            self.0 = other.0.clone();
            return Ok(());
        }
        if self.0.len() != other.0.len() {
            return Err(CoreError::VectorLengthMismatch {
                expected: self.0.len(),
                actual: other.0.len(),
            });
        }
        for (a, b) in self.0.iter_mut().zip(other.0.iter()) {
            *a += b;
        }
        Ok(())
    }

    /// Returns `self - other` element-wise. Used to strip one child's
    /// contribution out of a parent's aggregated vector.
    pub fn subtract(&self, other: &PnlVector) -> Result<PnlVector, CoreError> {
        if self.0.len() != other.0.len() {
            return Err(CoreError::VectorLengthMismatch {
                expected: self.0.len(),
                actual: other.0.len(),
            });
        }
        Ok(PnlVector(
            self.0
                .iter()
                .zip(other.0.iter())
                .map(|(a, b)| a - b)
                .collect(),
        ))
    }

    /// The worst simulated outcome, or `None` for an empty vector.
    pub fn min(&self) -> Option<Decimal> {
        self.0.iter().copied().min()
    }
}

impl From<Vec<Decimal>> for PnlVector {
    fn from(values: Vec<Decimal>) -> Self {
        Self(values)
    }
}
