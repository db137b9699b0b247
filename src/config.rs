use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    units::{Amplitude, Time},
};

/// Hysteresis band and hold time of a detector.
///
/// Fixed for the lifetime of the detector that is built from it. The
/// defaults are the band `(0.4, 0.8)` with a hold of `10` clock units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DetectorConfig {
    /// A `High` detector considers falling only for samples strictly below this.
    pub low_threshold: f64,
    /// A `Low` detector considers rising only for samples strictly above this.
    pub high_threshold: f64,
    /// How long the candidate condition must hold, in clock units.
    pub hold_duration: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            low_threshold: 0.4,
            high_threshold: 0.8,
            hold_duration: 10.0,
        }
    }
}

impl DetectorConfig {
    pub fn new(low_threshold: f64, high_threshold: f64, hold_duration: f64) -> Self {
        Self {
            low_threshold,
            high_threshold,
            hold_duration,
        }
    }

    /// Parse a TOML document and validate it. Missing keys keep their defaults.
    ///
    /// ```toml
    /// low_threshold = 0.4
    /// high_threshold = 0.8
    /// hold_duration = 10.0
    /// ```
    pub fn from_toml_str(document: &str) -> Result<Self> {
        let config: Self = toml::from_str(document)?;
        config.validate()?;
        Ok(config)
    }

    pub fn low(&self) -> Amplitude {
        Amplitude::new(self.low_threshold)
    }

    pub fn high(&self) -> Amplitude {
        Amplitude::new(self.high_threshold)
    }

    pub fn hold(&self) -> Time {
        Time::new(self.hold_duration)
    }

    /// Reject configurations the detector cannot run correctly with.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("low_threshold", self.low_threshold),
            ("high_threshold", self.high_threshold),
            ("hold_duration", self.hold_duration),
        ] {
            if !value.is_finite() {
                return Err(Error::InvalidConfig {
                    field,
                    value: value.to_string(),
                    reason: "must be finite".to_owned(),
                });
            }
        }
        if self.low_threshold >= self.high_threshold {
            return Err(Error::InvalidConfig {
                field: "low_threshold",
                value: self.low_threshold.to_string(),
                reason: format!(
                    "must be strictly below high_threshold ({})",
                    self.high_threshold
                ),
            });
        }
        if self.hold_duration < 0.0 {
            return Err(Error::InvalidConfig {
                field: "hold_duration",
                value: self.hold_duration.to_string(),
                reason: "must be non-negative".to_owned(),
            });
        }
        Ok(())
    }
}
