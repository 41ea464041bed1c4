use std::ops::Add;
use std::time::{Duration, Instant};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Cancellable single-shot timer holding the latest value of a burst.
///
/// Each `call` replaces the pending value and restarts the quiet period;
/// `poll` hands the value out once the period has elapsed without another
/// call. The caller supplies the clock, so any monotonic instant type works
/// (`Instant` in a terminal, a `Duration` since page load in a browser).
#[derive(Debug, Clone)]
pub struct Debouncer<T, I = Instant> {
    delay: Duration,
    pending: Option<(I, T)>,
}

impl<T, I> Debouncer<T, I>
where
    I: Copy + Ord + Add<Duration, Output = I>,
{
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Arms the timer with `value`, cancelling anything still pending.
    pub fn call(&mut self, value: T, now: I) {
        self.pending = Some((now + self.delay, value));
    }

    /// Returns the surviving value once its deadline has passed.
    pub fn poll(&mut self, now: I) -> Option<T> {
        let due = matches!(&self.pending, Some((deadline, _)) if now >= *deadline);
        if due {
            self.pending.take().map(|(_, value)| value)
        } else {
            None
        }
    }

    /// Runs `callback` with the value if it is due. Returns whether it fired.
    pub fn fire<F>(&mut self, now: I, callback: F) -> bool
    where
        F: FnOnce(T),
    {
        self.poll(now).map(callback).is_some()
    }

    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(_, value)| value)
    }

    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}
