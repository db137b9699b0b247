use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Cooperative cancellation, polled once per detector iteration.
pub trait Cancellation {
    fn is_cancelled(&self) -> bool;
}

impl<F> Cancellation for F
where
    F: Fn() -> bool,
{
    fn is_cancelled(&self) -> bool {
        self()
    }
}

/// Shared one-way stop flag. Clones observe the same flag, so one can be
/// kept by the controlling thread while the other is polled by the loop.
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    flag: Arc<AtomicBool>,
}

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self) {
        self.flag.store(true, Ordering::Release);
    }

    pub fn is_set(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

impl From<Arc<AtomicBool>> for StopSignal {
    fn from(flag: Arc<AtomicBool>) -> Self {
        Self { flag }
    }
}

impl Cancellation for StopSignal {
    fn is_cancelled(&self) -> bool {
        self.is_set()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_flag() {
        let signal = StopSignal::new();
        let observer = signal.clone();
        assert!(!observer.is_cancelled());
        signal.set();
        assert!(observer.is_cancelled());
    }

    #[test]
    fn set_from_another_thread() {
        let signal = StopSignal::new();
        let remote = signal.clone();
        std::thread::spawn(move || remote.set()).join().unwrap();
        assert!(signal.is_set());
    }

    #[test]
    fn wraps_existing_flag() {
        let flag = Arc::new(AtomicBool::new(true));
        assert!(StopSignal::from(flag).is_cancelled());
    }

    #[test]
    fn closure_cancellation() {
        let limit = 3;
        let count = std::cell::Cell::new(0);
        let stop = || {
            count.set(count.get() + 1);
            count.get() > limit
        };
        assert!(!(0..limit).any(|_| stop.is_cancelled()));
        assert!(stop.is_cancelled());
    }
}
