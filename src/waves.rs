//! Deterministic, time-indexed signals used to drive simulated sensors.
use crate::{
    error::{Error, Result},
    units::{Amplitude, Frequency, Time},
};

pub trait Wave: Send {
    fn value_at(&self, t: Time) -> Amplitude;
}

pub struct Constant(pub Amplitude);

impl Wave for Constant {
    fn value_at(&self, _t: Time) -> Amplitude {
        self.0
    }
}

pub struct Sine {
    freq: Frequency,
    phase_offset: Time,
    amplitude: Amplitude,
}

impl Sine {
    pub fn new(freq: Frequency, phase_offset: Time, amplitude: Amplitude) -> Self {
        Self {
            freq,
            phase_offset,
            amplitude,
        }
    }
}

impl Wave for Sine {
    fn value_at(&self, t: Time) -> Amplitude {
        let offset_t = self.phase_offset + t;
        let apply_pi = offset_t.scale(2.0 * std::f64::consts::PI);
        let apply_frequency = apply_pi * self.freq;
        Amplitude::new(apply_frequency.sin() * self.amplitude.value())
    }
}

/// Piecewise-constant schedule of `(timestamp, value)` entries.
///
/// A value takes effect strictly after its timestamp: at exactly the
/// timestamp the previous entry still holds. Before the first timestamp the
/// first value is returned and after the last one the last value.
pub struct Steps {
    timestamps: Vec<Time>,
    values: Vec<Amplitude>,
}

impl Steps {
    pub fn new<I, T, A>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (T, A)>,
        T: Into<Time>,
        A: Into<Amplitude>,
    {
        let mut entries: Vec<(Time, Amplitude)> = entries
            .into_iter()
            .map(|(t, a)| (t.into(), a.into()))
            .collect();
        if entries.is_empty() {
            return Err(Error::InvalidConfig {
                field: "steps",
                value: "[]".to_owned(),
                reason: "schedule needs at least one entry".to_owned(),
            });
        }
        entries.sort_by(|lhs, rhs| lhs.0.value().total_cmp(&rhs.0.value()));
        let (timestamps, values) = entries.into_iter().unzip();
        Ok(Self { timestamps, values })
    }
}

impl Wave for Steps {
    fn value_at(&self, t: Time) -> Amplitude {
        let idx = self.timestamps.partition_point(|ts| *ts < t).max(1);
        self.values[idx - 1]
    }
}

/// Two waves merged sample by sample, e.g. a step schedule plus ripple.
pub struct Composite<F, W1, W2>
where
    F: Fn(Amplitude, Amplitude) -> Amplitude + Send,
    W1: Wave,
    W2: Wave,
{
    compositor: F,
    w: (W1, W2),
}

impl<F, W1, W2> Composite<F, W1, W2>
where
    F: Fn(Amplitude, Amplitude) -> Amplitude + Send,
    W1: Wave,
    W2: Wave,
{
    pub fn new(w1: W1, w2: W2, compositor: F) -> Self {
        Self {
            compositor,
            w: (w1, w2),
        }
    }
}

impl<F, W1, W2> Wave for Composite<F, W1, W2>
where
    F: Fn(Amplitude, Amplitude) -> Amplitude + Send,
    W1: Wave,
    W2: Wave,
{
    fn value_at(&self, t: Time) -> Amplitude {
        (self.compositor)(self.w.0.value_at(t), self.w.1.value_at(t))
    }
}
