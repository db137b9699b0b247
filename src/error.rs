use std::time::Duration;

use crate::signals::Level;

/// Error raised by an injected collaborator (sensor, clock or sink).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Every failure the detector and its worker can surface.
///
/// Configuration problems are reported at construction time. Collaborator
/// failures are never retried: they end the polling loop and reach the
/// caller unchanged in their `source`. Cooperative cancellation is not an
/// error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A configuration value is out of range or inconsistent with another.
    #[error("Invalid detector configuration: {field} = {value} ({reason})")]
    InvalidConfig {
        /// Offending field.
        field: &'static str,
        /// Value as supplied.
        value: String,
        /// What the value must satisfy.
        reason: String,
    },

    /// The configuration document could not be parsed.
    #[error("Failed to parse detector configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The sample source failed.
    #[error("Sensor read failed: {source}")]
    Sensor {
        #[source]
        source: BoxError,
    },

    /// The clock source failed.
    #[error("Clock read failed: {source}")]
    Clock {
        #[source]
        source: BoxError,
    },

    /// The sink rejected a confirmed transition.
    #[error("Sink failed to accept transition to {level}: {source}")]
    Sink {
        /// The level the detector had just switched to.
        level: Level,
        #[source]
        source: BoxError,
    },

    /// The worker thread could not be started.
    #[error("Failed to spawn detector worker: {0}")]
    Spawn(#[source] std::io::Error),

    /// The worker thread panicked before reporting a result.
    #[error("Detector worker panicked")]
    WorkerPanicked,

    /// The worker did not finish within the allotted time.
    #[error("Detector worker did not stop within {0:?}")]
    JoinTimeout(Duration),
}

pub type Result<T> = std::result::Result<T, Error>;
