//! Time sources for the detector.
//!
//! The detector only ever subtracts two readings of the same clock, so any
//! source that is monotonic enough will do. [`AcceleratedClock`] and
//! [`VirtualClock`] exist so that hold durations written in seconds can be
//! exercised quickly and deterministically.
use std::{
    sync::{Arc, Mutex},
    time::{Instant, SystemTime, UNIX_EPOCH},
};

use crate::{error::BoxError, units::Time};

pub trait Clock {
    fn now(&mut self) -> Result<Time, BoxError>;
}

impl<F, E> Clock for F
where
    F: FnMut() -> Result<Time, E>,
    E: Into<BoxError>,
{
    fn now(&mut self) -> Result<Time, BoxError> {
        self().map_err(Into::into)
    }
}

/// Monotonic seconds since construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    pub fn time(&self) -> Time {
        Time::from(self.origin.elapsed())
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&mut self) -> Result<Time, BoxError> {
        Ok(self.time())
    }
}

/// Real elapsed time multiplied by a constant factor.
///
/// With a factor of 100, a hold duration of 10 is satisfied after 100ms of
/// wall-clock time.
#[derive(Debug, Clone, Copy)]
pub struct AcceleratedClock {
    factor: f64,
    origin: Instant,
    zero_point: Time,
}

impl AcceleratedClock {
    /// Starts reading (close to) zero.
    pub fn new(factor: f64) -> Self {
        Self {
            factor,
            origin: Instant::now(),
            zero_point: Time::default(),
        }
    }

    /// Starts reading the UNIX wall-clock time of construction; only the
    /// elapsed part is scaled.
    pub fn anchored_to_wall_clock(factor: f64) -> Self {
        let zero_point = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(Time::from)
            .unwrap_or_default();
        Self {
            factor,
            origin: Instant::now(),
            zero_point,
        }
    }

    pub fn time(&self) -> Time {
        self.zero_point + Time::from(self.origin.elapsed()).scale(self.factor)
    }
}

impl Clock for AcceleratedClock {
    fn now(&mut self) -> Result<Time, BoxError> {
        Ok(self.time())
    }
}

/// Manually driven clock. Clones share the same reading.
#[derive(Debug, Clone, Default)]
pub struct VirtualClock {
    current: Arc<Mutex<Time>>,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn time(&self) -> Time {
        *self.current.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn advance(&self, dt: Time) {
        *self.current.lock().unwrap_or_else(|e| e.into_inner()) += dt;
    }

    pub fn set(&self, t: Time) {
        *self.current.lock().unwrap_or_else(|e| e.into_inner()) = t;
    }
}

impl Clock for VirtualClock {
    fn now(&mut self) -> Result<Time, BoxError> {
        Ok(self.time())
    }
}
