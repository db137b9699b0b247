//! Consumers of confirmed transitions.
use std::sync::{Arc, Mutex};

use crate::{clock::Clock, error::BoxError, signals::Level, units::Time};

/// Receives each confirmed transition, synchronously, from the polling loop.
pub trait Sink {
    fn notify(&mut self, level: Level) -> Result<(), BoxError>;
}

impl<F, E> Sink for F
where
    F: FnMut(Level) -> Result<(), E>,
    E: Into<BoxError>,
{
    fn notify(&mut self, level: Level) -> Result<(), BoxError> {
        self(level).map_err(Into::into)
    }
}

/// Logs every transition at `info`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl Sink for TracingSink {
    fn notify(&mut self, level: Level) -> Result<(), BoxError> {
        tracing::info!(level = level.as_u8(), "received state {level}");
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Call {
    pub at: Time,
    pub level: Level,
}

/// Thread-safe record of every notification, timestamped with its own clock.
///
/// Clones share the record, so one clone can be handed to a detector running
/// elsewhere while the other is inspected.
#[derive(Debug, Clone)]
pub struct CallRecorder<C> {
    clock: C,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl<C: Clock> CallRecorder<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn levels(&self) -> Vec<Level> {
        self.calls().into_iter().map(|call| call.level).collect()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }
}

impl<C: Clock> Sink for CallRecorder<C> {
    fn notify(&mut self, level: Level) -> Result<(), BoxError> {
        let at = self.clock.now()?;
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(Call { at, level });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::VirtualClock;

    #[test]
    fn recorder_timestamps_calls() {
        let clock = VirtualClock::new();
        let recorder = CallRecorder::new(clock.clone());
        let mut sink = recorder.clone();

        clock.set(Time::new(3.0));
        sink.notify(Level::High).unwrap();
        clock.set(Time::new(7.5));
        sink.notify(Level::Low).unwrap();

        assert_eq!(
            recorder.calls(),
            vec![
                Call {
                    at: Time::new(3.0),
                    level: Level::High
                },
                Call {
                    at: Time::new(7.5),
                    level: Level::Low
                },
            ]
        );
        assert_eq!(recorder.levels(), vec![Level::High, Level::Low]);

        recorder.clear();
        assert!(sink.calls().is_empty());
    }

    #[test]
    fn closure_sink_error_is_boxed() {
        let mut sink = |_level: Level| Err::<(), _>(std::io::Error::other("pipe closed"));
        let err = Sink::notify(&mut sink, Level::High).unwrap_err();
        assert_eq!(err.to_string(), "pipe closed");
    }

    #[test]
    fn tracing_sink_accepts_everything() {
        let mut sink = TracingSink;
        sink.notify(Level::High).unwrap();
        sink.notify(Level::Low).unwrap();
    }
}
