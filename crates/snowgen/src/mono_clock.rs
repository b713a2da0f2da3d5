use crate::{TimeSource, time::system_millis};
use std::{sync::Arc, time::Instant};

#[derive(Debug)]
struct Anchor {
    instant: Instant,
    unix_millis: i64,
}

/// A time source that reads the wall clock once and then advances by
/// elapsed monotonic time.
///
/// Timestamps stay aligned to the Unix epoch but never move backward, even if
/// the system clock is adjusted after construction. Clones share the same
/// anchor.
///
/// # Example
///
/// ```
/// use snowgen::{MonotonicClock, TimeSource};
///
/// let clock = MonotonicClock::new();
/// let a = clock.current_millis();
/// std::thread::sleep(std::time::Duration::from_millis(2));
/// let b = clock.current_millis();
/// assert!(b >= a);
/// ```
#[derive(Clone, Debug)]
pub struct MonotonicClock {
    anchor: Arc<Anchor>,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    /// Anchors a new clock at the current wall-clock time.
    pub fn new() -> Self {
        Self::anchored_at(system_millis())
    }

    /// Anchors a new clock so that it reads `unix_millis` right now.
    pub fn anchored_at(unix_millis: i64) -> Self {
        Self {
            anchor: Arc::new(Anchor {
                instant: Instant::now(),
                unix_millis,
            }),
        }
    }
}

impl TimeSource for MonotonicClock {
    fn current_millis(&self) -> i64 {
        let elapsed = i64::try_from(self.anchor.instant.elapsed().as_millis()).unwrap_or(i64::MAX);
        self.anchor.unix_millis.saturating_add(elapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn anchored_clock_starts_at_anchor() {
        let clock = MonotonicClock::anchored_at(1_000);
        let now = clock.current_millis();
        assert!((1_000..1_000 + 50).contains(&now));
    }

    #[test]
    fn never_moves_backward() {
        let clock = MonotonicClock::new();
        let mut last = clock.current_millis();
        for _ in 0..10_000 {
            let now = clock.current_millis();
            assert!(now >= last);
            last = now;
        }
    }

    #[test]
    fn clones_share_anchor() {
        let clock = MonotonicClock::anchored_at(0);
        let clone = clock.clone();
        std::thread::sleep(Duration::from_millis(3));
        let a = clock.current_millis();
        let b = clone.current_millis();
        assert!(a >= 3);
        assert!(b >= a);
    }
}
