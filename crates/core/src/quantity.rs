//! Stock quantity value type.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A non-negative stock count.
///
/// Quantities entered by the user arrive as signed values (steppers can go
/// below zero); this type is the single place where they are validated or
/// clamped back into range.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StockQuantity(u32);

impl StockQuantity {
    pub const ZERO: Self = Self(0);

    /// Validate a signed input; negative values are rejected.
    pub fn new(value: i64) -> Result<Self, DomainError> {
        if value < 0 {
            return Err(DomainError::validation("stock cannot be negative"));
        }
        u32::try_from(value)
            .map(Self)
            .map_err(|_| DomainError::validation("stock value out of range"))
    }

    /// Clamp a signed input into `0..=u32::MAX`.
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(0, i64::from(u32::MAX)) as u32)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn saturating_sub(self, rhs: u32) -> Self {
        Self(self.0.saturating_sub(rhs))
    }

    pub fn saturating_add(self, rhs: u32) -> Self {
        Self(self.0.saturating_add(rhs))
    }
}

impl From<u32> for StockQuantity {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<StockQuantity> for u32 {
    fn from(value: StockQuantity) -> Self {
        value.0
    }
}

impl core::fmt::Display for StockQuantity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}
