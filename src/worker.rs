//! Running a detector on its own thread.
//!
//! The sensor and clock may block, so the polling loop gets a dedicated
//! thread and a [`StopSignal`] that the owner of the [`DetectorWorker`]
//! sets. The loop notices the signal between iterations: shutdown latency is
//! bounded by one sample acquisition plus, at most, one sink call.
use std::{
    sync::mpsc::{self, RecvTimeoutError},
    thread::{self, JoinHandle},
    time::Duration,
};

use tracing::{debug, warn};

use crate::{
    cancel::StopSignal,
    clock::Clock,
    config::DetectorConfig,
    error::{Error, Result},
    sampling::Sensor,
    signals::hysteresis::HysteresisDetector,
    sink::Sink,
};

pub const THREAD_NAME: &str = "hysteresis-detector";

/// Handle to a detector loop running on its own thread.
///
/// Dropping the handle requests a stop but does not wait for the thread.
pub struct DetectorWorker {
    stop: StopSignal,
    done: mpsc::Receiver<Result<()>>,
    handle: Option<JoinHandle<()>>,
}

impl DetectorWorker {
    /// Validate `config` on the calling thread, then start the loop.
    pub fn spawn<S, C, K>(config: DetectorConfig, mut sensor: S, mut clock: C, mut sink: K) -> Result<Self>
    where
        S: Sensor + Send + 'static,
        C: Clock + Send + 'static,
        K: Sink + Send + 'static,
    {
        let detector = HysteresisDetector::new(config)?;
        let stop = StopSignal::new();
        let (tx, done) = mpsc::channel();

        let handle = {
            let stop = stop.clone();
            thread::Builder::new()
                .name(THREAD_NAME.to_owned())
                .spawn(move || {
                    let result = detector.run(&mut sensor, &mut clock, &mut sink, &stop);
                    // The handle may already be gone; nobody is left to tell.
                    let _ = tx.send(result);
                })
                .map_err(Error::Spawn)?
        };
        debug!(?config, "detector worker started");

        Ok(Self {
            stop,
            done,
            handle: Some(handle),
        })
    }

    /// A clone of the signal the loop polls.
    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }

    pub fn request_stop(&self) {
        self.stop.set();
    }

    pub fn is_finished(&self) -> bool {
        self.handle
            .as_ref()
            .is_none_or(|handle| handle.is_finished())
    }

    /// Wait up to `timeout` for the loop to end and return its result.
    ///
    /// This does not request a stop by itself: a loop ended by a collaborator
    /// error is reported here too. On [`Error::JoinTimeout`] the thread is
    /// left running with a stop requested.
    pub fn join_timeout(mut self, timeout: Duration) -> Result<()> {
        match self.done.recv_timeout(timeout) {
            Ok(result) => {
                if let Some(handle) = self.handle.take() {
                    handle.join().map_err(|_| Error::WorkerPanicked)?;
                }
                debug!(ok = result.is_ok(), "detector worker joined");
                result
            }
            Err(RecvTimeoutError::Timeout) => {
                warn!(?timeout, "detector worker did not finish in time");
                Err(Error::JoinTimeout(timeout))
            }
            Err(RecvTimeoutError::Disconnected) => {
                if let Some(handle) = self.handle.take() {
                    let _ = handle.join();
                }
                Err(Error::WorkerPanicked)
            }
        }
    }

    /// Request a stop and wait up to `timeout` for the loop to notice it.
    pub fn stop_and_join(self, timeout: Duration) -> Result<()> {
        self.request_stop();
        self.join_timeout(timeout)
    }
}

impl Drop for DetectorWorker {
    fn drop(&mut self) {
        self.stop.set();
    }
}
