//! Per-recognizer settings
//!
//! Settings are plain values: a recognizer keeps its own copy, hands out
//! snapshots and accepts replacements through `update`.
//!
//! ```
//! use croatia_payment::settings::{Pdf417Settings, Rounding};
//!
//! let settings = Pdf417Settings::default()
//!     .with_conversion_rate(7.5345)
//!     .with_rounding(Rounding::HalfUp)
//!     .with_uncertain_decoding(false);
//! assert!(settings.validate().is_ok());
//! ```

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::RecognizerError;
use crate::slip::currency::rate_decimal;

/// Fixed EUR/HRK conversion rate
pub const DEFAULT_CONVERSION_RATE: f64 = 7.5345;

/// Smallest accepted rate
///
/// Together with [`MAX_CONVERSION_RATE`] this keeps every 15-digit amount
/// convertible within `i64` minor units.
pub const MIN_CONVERSION_RATE: f64 = 0.001;

/// Largest accepted rate
pub const MAX_CONVERSION_RATE: f64 = 1000.0;

/// Rounding direction applied to converted amounts, in minor units
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Rounding {
    /// Ties to even
    HalfEven,
    /// Ties away from zero
    HalfUp,
    /// Any fraction rounds away from zero
    #[default]
    Up,
    /// Any fraction is truncated
    Down,
}

impl Rounding {
    pub(crate) fn strategy(self) -> RoundingStrategy {
        match self {
            Rounding::HalfEven => RoundingStrategy::MidpointNearestEven,
            Rounding::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            Rounding::Up => RoundingStrategy::AwayFromZero,
            Rounding::Down => RoundingStrategy::ToZero,
        }
    }
}

/// Settings shared by both symbologies
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommonSettings {
    /// HRK per EUR
    pub conversion_rate: f64,
    /// Rounding of the converted amount
    pub rounding: Rounding,
}

impl Default for CommonSettings {
    fn default() -> Self {
        Self {
            conversion_rate: DEFAULT_CONVERSION_RATE,
            rounding: Rounding::default(),
        }
    }
}

impl CommonSettings {
    /// Reject rates that cannot convert every amount
    pub fn validate(&self) -> Result<(), RecognizerError> {
        let rate = self.conversion_rate;
        if !rate.is_finite() || rate_decimal(rate).is_none_or(|d| d <= Decimal::ZERO) {
            return Err(RecognizerError::InvalidSettings(format!(
                "conversion rate must be finite and positive, got {}",
                rate
            )));
        }
        if !(MIN_CONVERSION_RATE..=MAX_CONVERSION_RATE).contains(&rate) {
            return Err(RecognizerError::InvalidSettings(format!(
                "conversion rate must lie in {MIN_CONVERSION_RATE}..={MAX_CONVERSION_RATE}, got {rate}"
            )));
        }
        Ok(())
    }
}

/// Settings of the PDF417 recognizer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pdf417Settings {
    /// Shared settings
    pub common: CommonSettings,
    /// Reconstruct payloads that error correction could not verify
    pub uncertain_decoding: bool,
}

impl Default for Pdf417Settings {
    fn default() -> Self {
        Self {
            common: CommonSettings::default(),
            uncertain_decoding: true,
        }
    }
}

impl Pdf417Settings {
    /// Set the HRK per EUR rate
    pub fn with_conversion_rate(mut self, rate: f64) -> Self {
        self.common.conversion_rate = rate;
        self
    }

    /// Set the rounding of converted amounts
    pub fn with_rounding(mut self, rounding: Rounding) -> Self {
        self.common.rounding = rounding;
        self
    }

    /// Enable or disable reconstruction of unverified payloads
    pub fn with_uncertain_decoding(mut self, enabled: bool) -> Self {
        self.uncertain_decoding = enabled;
        self
    }

    /// Validate before the settings are accepted
    pub fn validate(&self) -> Result<(), RecognizerError> {
        self.common.validate()
    }
}

/// Settings of the QR recognizer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QrSettings {
    /// Shared settings
    pub common: CommonSettings,
    /// Follow a failed fast pass with the exhaustive scan
    pub slower_thorough_scan: bool,
}

impl Default for QrSettings {
    fn default() -> Self {
        Self {
            common: CommonSettings::default(),
            slower_thorough_scan: true,
        }
    }
}

impl QrSettings {
    /// Set the HRK per EUR rate
    pub fn with_conversion_rate(mut self, rate: f64) -> Self {
        self.common.conversion_rate = rate;
        self
    }

    /// Set the rounding of converted amounts
    pub fn with_rounding(mut self, rounding: Rounding) -> Self {
        self.common.rounding = rounding;
        self
    }

    /// Enable or disable the exhaustive scan
    pub fn with_slower_thorough_scan(mut self, enabled: bool) -> Self {
        self.slower_thorough_scan = enabled;
        self
    }

    /// Validate before the settings are accepted
    pub fn validate(&self) -> Result<(), RecognizerError> {
        self.common.validate()
    }
}

impl AsRef<CommonSettings> for Pdf417Settings {
    fn as_ref(&self) -> &CommonSettings {
        &self.common
    }
}

impl AsRef<CommonSettings> for QrSettings {
    fn as_ref(&self) -> &CommonSettings {
        &self.common
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let pdf = Pdf417Settings::default();
        assert_eq!(pdf.common.conversion_rate, DEFAULT_CONVERSION_RATE);
        assert_eq!(pdf.common.rounding, Rounding::Up);
        assert!(pdf.uncertain_decoding);
        assert!(QrSettings::default().slower_thorough_scan);
    }

    #[test]
    fn test_rate_validation() {
        for rate in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let settings = QrSettings::default().with_conversion_rate(rate);
            assert!(matches!(
                settings.validate(),
                Err(RecognizerError::InvalidSettings(_))
            ));
        }
        assert!(QrSettings::default().with_conversion_rate(1.0).validate().is_ok());
    }

    #[test]
    fn test_rate_bounds() {
        for rate in [1e10, 1000.5, 0.0009, 1e-9] {
            let settings = Pdf417Settings::default().with_conversion_rate(rate);
            assert!(settings.validate().is_err(), "rate {rate} accepted");
        }
        for rate in [MIN_CONVERSION_RATE, MAX_CONVERSION_RATE] {
            let settings = Pdf417Settings::default().with_conversion_rate(rate);
            assert!(settings.validate().is_ok(), "rate {rate} rejected");
        }
    }
}
