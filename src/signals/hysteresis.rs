//! # Hysteresis detector
//!
//! Debounced two level detection of a noisy signal. The detector starts
//! `Low` and considers switching only while the signal is beyond the far
//! edge of the band:
//!
//! | level  | candidate sample          |
//! |--------|---------------------------|
//! | `Low`  | `sample > high_threshold` |
//! | `High` | `sample < low_threshold`  |
//!
//! Samples on a threshold or inside the band are never candidates. The
//! first candidate sample opens a dwell window at the current clock
//! reading, every following candidate sample checks it, and a sample that
//! is not a candidate closes it again. The level flips once a candidate
//! sample sees at least `hold_duration` elapsed since the window opened.
//! Nothing of an interrupted window is remembered.
//!
//! Clock readings are not validated. A NaN reading makes the elapsed time
//! NaN, which never compares below `hold_duration`, so a candidate sample
//! that sees one flips the level.
use tracing::{debug, error, info};

use crate::{
    cancel::Cancellation,
    clock::Clock,
    config::DetectorConfig,
    error::{Error, Result},
    sampling::Sensor,
    sink::Sink,
    units::{Amplitude, Time},
};

use super::Level;

#[derive(Debug, Clone)]
pub struct HysteresisDetector {
    config: DetectorConfig,
    level: Level,
    dwell_start: Option<Time>,
}

impl HysteresisDetector {
    /// Fails with [`Error::InvalidConfig`] on an empty or inverted band, or a
    /// negative hold duration.
    pub fn new(config: DetectorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            level: Level::Low,
            dwell_start: None,
        })
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// Clock reading at which the current run of candidate samples began.
    pub fn dwell_start(&self) -> Option<Time> {
        self.dwell_start
    }

    pub fn is_candidate(&self, sample: Amplitude) -> bool {
        match self.level {
            Level::Low => sample > self.config.high(),
            Level::High => sample < self.config.low(),
        }
    }

    /// One hysteresis step for `sample`. The clock is read only for
    /// candidate samples. Returns the new level on a confirmed transition.
    pub fn evaluate<C>(&mut self, sample: Amplitude, clock: &mut C) -> Result<Option<Level>>
    where
        C: Clock + ?Sized,
    {
        if !self.is_candidate(sample) {
            if let Some(since) = self.dwell_start.take() {
                debug!(%sample, dwell_start = %since, "candidate run interrupted, dwell timer reset");
            }
            return Ok(None);
        }

        let now = read_clock(clock)?;
        let Some(since) = self.dwell_start else {
            debug!(%sample, at = %now, "candidate run started");
            self.dwell_start = Some(now);
            return Ok(None);
        };

        let held = now - since;
        if held < self.config.hold() {
            return Ok(None);
        }

        self.level = self.level.toggled();
        self.dwell_start = None;
        info!(level = self.level.as_u8(), at = %now, %held, "state transition confirmed");
        Ok(Some(self.level))
    }

    /// Poll `sensor` until `stop` reports cancellation, notifying `sink` of
    /// every confirmed transition.
    ///
    /// Cancellation is checked once per iteration before sampling, so a
    /// sample in flight is always evaluated. The detector is consumed: its
    /// level and any partial dwell window are dropped on exit without a
    /// final notification. Collaborator errors end the loop and are
    /// returned as-is, never retried.
    pub fn run<S, C, K, X>(
        mut self,
        sensor: &mut S,
        clock: &mut C,
        sink: &mut K,
        stop: &X,
    ) -> Result<()>
    where
        S: Sensor + ?Sized,
        C: Clock + ?Sized,
        K: Sink + ?Sized,
        X: Cancellation + ?Sized,
    {
        let _span = tracing::debug_span!(
            "hysteresis",
            low = self.config.low_threshold,
            high = self.config.high_threshold,
            hold = self.config.hold_duration,
        )
        .entered();
        debug!("hysteresis loop started");

        while !stop.is_cancelled() {
            let sample = sensor.sample().map_err(|source| {
                error!(error = %source, "sensor read failed, stopping");
                Error::Sensor { source }
            })?;

            if let Some(level) = self.evaluate(sample, clock)? {
                sink.notify(level).map_err(|source| {
                    error!(error = %source, level = level.as_u8(), "sink rejected transition, stopping");
                    Error::Sink { level, source }
                })?;
            }
        }

        debug!(level = self.level.as_u8(), "cancellation observed, hysteresis loop stopped");
        Ok(())
    }
}

fn read_clock<C: Clock + ?Sized>(clock: &mut C) -> Result<Time> {
    clock.now().map_err(|source| {
        error!(error = %source, "clock read failed, stopping");
        Error::Clock { source }
    })
}

/// Build a detector from `config` and run it; see [`HysteresisDetector::run`].
pub fn run_hysteresis_loop<S, C, K, X>(
    config: DetectorConfig,
    sensor: &mut S,
    clock: &mut C,
    sink: &mut K,
    stop: &X,
) -> Result<()>
where
    S: Sensor + ?Sized,
    C: Clock + ?Sized,
    K: Sink + ?Sized,
    X: Cancellation + ?Sized,
{
    HysteresisDetector::new(config)?.run(sensor, clock, sink, stop)
}
