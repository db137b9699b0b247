/// Clock reading or duration, in the units of the clock that produced it
/// (seconds for the wall-clock sources in [`crate::clock`]).
#[derive(Clone, Copy, PartialEq, PartialOrd, Debug, Default)]
pub struct Time(f64);

impl Time {
    pub fn new(value: f64) -> Self {
        Self(value)
    }
    pub fn value(self) -> f64 {
        self.0
    }
    pub fn scale(self, value: f64) -> Time {
        Time(self.0 * value)
    }
}

impl From<std::time::Duration> for Time {
    fn from(value: std::time::Duration) -> Self {
        Self(value.as_secs_f64())
    }
}

impl From<f64> for Time {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl num::Zero for Time {
    fn zero() -> Self {
        Self(0f64)
    }

    fn is_zero(&self) -> bool {
        self.0 == 0.0
    }
}

impl std::ops::Add for Time {
    type Output = Time;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl std::ops::AddAssign for Time {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0
    }
}

impl std::ops::Sub for Time {
    type Output = Time;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl std::ops::Mul<Frequency> for Time {
    type Output = f64;

    fn mul(self, rhs: Frequency) -> Self::Output {
        self.0 * rhs.0
    }
}

impl std::fmt::Display for Time {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Frequency of a periodic signal in terms of 1/s a.k.a Hz
#[derive(Clone, Copy, PartialEq, PartialOrd, Debug)]
pub struct Frequency(f64);

impl Frequency {
    pub fn new(value: f64) -> Self {
        Self(value)
    }
    pub fn cycle_time(self) -> Time {
        Time(self.0.recip())
    }
}

/// A single reading of the monitored signal
#[derive(Clone, Copy, PartialEq, PartialOrd, Debug, Default)]
pub struct Amplitude(f64);

impl Amplitude {
    pub fn new(value: f64) -> Self {
        Self(value)
    }
    pub fn value(self) -> f64 {
        self.0
    }
    pub fn zero() -> Self {
        Self(0.0)
    }
    pub fn scale(self, value: f64) -> Self {
        Self(self.0 * value)
    }
    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }
}

impl num::traits::Zero for Amplitude {
    fn zero() -> Self {
        Amplitude(0.0)
    }

    fn is_zero(&self) -> bool {
        (Self::zero() <= *self) && (*self <= Self::zero())
    }
}

impl std::ops::Add for Amplitude {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl std::ops::Sub for Amplitude {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl From<f64> for Amplitude {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for Amplitude {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
