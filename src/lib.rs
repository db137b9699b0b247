//! Debounced two level detection of a noisy signal.
//!
//! A [`HysteresisDetector`] polls a [`Sensor`], compares each reading with a
//! fixed hysteresis band and tells a [`Sink`] about a new [`Level`] only once
//! the signal has stayed beyond the band for the configured hold duration,
//! as measured by an injected [`Clock`]. The loop runs until its
//! [`Cancellation`] reports a stop; [`DetectorWorker`] runs it on a
//! dedicated thread.
pub mod cancel;
pub mod clock;
pub mod config;
pub mod error;
pub mod sampling;
pub mod signals;
pub mod sink;
pub mod telemetry;
pub mod units;
pub mod waves;
pub mod worker;

pub use cancel::{Cancellation, StopSignal};
pub use clock::Clock;
pub use config::DetectorConfig;
pub use error::{Error, Result};
pub use sampling::Sensor;
pub use signals::{
    hysteresis::{run_hysteresis_loop, HysteresisDetector},
    Level,
};
pub use sink::Sink;
pub use worker::DetectorWorker;
