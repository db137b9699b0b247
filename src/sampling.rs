use std::time::Duration;

use crate::{clock::Clock, error::BoxError, units::Amplitude, waves::Wave};

/// Source of signal readings. One call per detector iteration; the call may
/// block, and that acquisition delay is the loop's polling cadence.
pub trait Sensor {
    fn sample(&mut self) -> Result<Amplitude, BoxError>;
}

impl<F, E> Sensor for F
where
    F: FnMut() -> Result<Amplitude, E>,
    E: Into<BoxError>,
{
    fn sample(&mut self) -> Result<Amplitude, BoxError> {
        self().map_err(Into::into)
    }
}

/// Simulated sensor: reads a [`Wave`] at the time reported by its clock,
/// then blocks for the configured acquisition delay.
pub struct WaveSensor<W, C> {
    wave: W,
    clock: C,
    delay: Option<Duration>,
}

impl<W: Wave, C: Clock> WaveSensor<W, C> {
    pub fn new(wave: W, clock: C) -> Self {
        Self {
            wave,
            clock,
            delay: None,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

impl<W: Wave, C: Clock> Sensor for WaveSensor<W, C> {
    fn sample(&mut self) -> Result<Amplitude, BoxError> {
        let t = self.clock.now()?;
        let value = self.wave.value_at(t);
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{clock::VirtualClock, units::Time, waves::Steps};

    #[test]
    fn wave_sensor_follows_clock() {
        let clock = VirtualClock::new();
        let steps = Steps::new([(0.0, 0.0), (20.0, 1.0)]).unwrap();
        let mut sensor = WaveSensor::new(steps, clock.clone());

        assert_eq!(sensor.sample().unwrap(), Amplitude::new(0.0));
        clock.set(Time::new(25.0));
        assert_eq!(sensor.sample().unwrap(), Amplitude::new(1.0));
    }

    #[test]
    fn wave_sensor_propagates_clock_failure() {
        let steps = Steps::new([(0.0, 0.0)]).unwrap();
        let broken = || Err::<Time, _>(std::io::Error::other("no time source"));
        let mut sensor = WaveSensor::new(steps, broken);
        let err = sensor.sample().unwrap_err();
        assert_eq!(err.to_string(), "no time source");
    }

    #[test]
    fn closure_sensor() {
        let mut readings = vec![0.9, 0.1].into_iter();
        let mut sensor = move || {
            readings
                .next()
                .map(Amplitude::new)
                .ok_or_else(|| std::io::Error::other("exhausted"))
        };
        assert_eq!(Sensor::sample(&mut sensor).unwrap(), Amplitude::new(0.9));
        assert_eq!(Sensor::sample(&mut sensor).unwrap(), Amplitude::new(0.1));
        assert!(Sensor::sample(&mut sensor).is_err());
    }
}
