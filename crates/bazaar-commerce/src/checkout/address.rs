//! Shipping address types.

use crate::error::MarketError;
use serde::{Deserialize, Serialize};

/// A shipping address, copied onto orders at placement time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ShippingAddress {
    /// Recipient full name.
    pub full_name: String,
    /// Address line 1.
    pub line1: String,
    /// Address line 2 (apt, unit, etc.).
    pub line2: Option<String>,
    /// City or town.
    pub city: String,
    /// Postal code.
    pub postcode: String,
    /// Country name.
    pub country: String,
}

impl ShippingAddress {
    /// Create a new address.
    pub fn new(
        full_name: impl Into<String>,
        line1: impl Into<String>,
        city: impl Into<String>,
        postcode: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            line1: line1.into(),
            line2: None,
            city: city.into(),
            postcode: postcode.into(),
            country: country.into(),
        }
    }

    /// Validate that every required field is present.
    pub fn validate(&self) -> Result<(), MarketError> {
        if self.full_name.trim().is_empty() {
            return Err(MarketError::InvalidAddress("full name"));
        }
        if self.line1.trim().is_empty() {
            return Err(MarketError::InvalidAddress("address line 1"));
        }
        if self.city.trim().is_empty() {
            return Err(MarketError::InvalidAddress("city"));
        }
        if self.postcode.trim().is_empty() {
            return Err(MarketError::InvalidAddress("postcode"));
        }
        if self.country.trim().is_empty() {
            return Err(MarketError::InvalidAddress("country"));
        }
        Ok(())
    }

    /// Format as single line.
    pub fn one_line(&self) -> String {
        let mut parts = vec![self.line1.clone()];
        if let Some(ref line2) = self.line2 {
            parts.push(line2.clone());
        }
        parts.push(self.city.clone());
        parts.push(self.postcode.clone());
        parts.push(self.country.clone());
        parts.join(", ")
    }
}
