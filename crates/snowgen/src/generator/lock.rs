use core::cmp::Ordering;
use core::fmt;
use std::{thread, time::Duration};

use crossbeam_utils::Backoff;
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    Error, GeneratorConfig, IdGenStatus, Result, SnowflakeId, SystemClock, TimeSource,
    mutex::{Mutex, MutexGuard},
};

/// Sentinel for "no ID issued yet".
const NEVER_ISSUED: i64 = -1;

/// Pause between clock reads once the spin/yield phase of a wait is over.
const PARK_INTERVAL: Duration = Duration::from_micros(100);

/// Mutable generation state. Only ever touched under the instance lock.
#[derive(Debug)]
struct State {
    last_timestamp: i64,
    sequence: i64,
}

/// A lock-based Snowflake ID generator.
///
/// Each instance owns its identity (datacenter ID, worker ID, epoch) and its
/// own `(last_timestamp, sequence)` state behind its own mutex. Independently
/// configured generators in one process never share state or contend on a
/// lock.
///
/// Share a single instance across threads with [`Arc`] or scoped borrows.
///
/// ## Clock handling
/// - Several IDs in the same millisecond are told apart by a 12-bit sequence.
/// - Once 4096 IDs have been issued in one millisecond, the caller waits for
///   the next millisecond.
/// - If the clock moves backward, the caller waits until it passes the last
///   issued millisecond again. No ID is ever issued with an older timestamp.
///
/// Waiting happens while holding the lock, so no other thread can observe or
/// advance the state mid-wait. There is no timeout.
///
/// ## See Also
/// - [`GeneratorConfig`] to build from a configuration value
/// - [`MonotonicClock`] for a time source that never steps backward
///
/// [`Arc`]: std::sync::Arc
/// [`MonotonicClock`]: crate::MonotonicClock
pub struct SnowflakeGenerator<T = SystemClock>
where
    T: TimeSource,
{
    datacenter_id: i64,
    worker_id: i64,
    epoch: i64,
    #[cfg(feature = "cache-padded")]
    state: crossbeam_utils::CachePadded<Mutex<State>>,
    #[cfg(not(feature = "cache-padded"))]
    state: Mutex<State>,
    pub(crate) time: T,
}

impl SnowflakeGenerator<SystemClock> {
    /// Creates a generator backed by the system wall clock.
    ///
    /// # Parameters
    ///
    /// - `datacenter_id`: datacenter or cluster identifier, `0..=31`
    /// - `worker_id`: machine or process identifier, `0..=31`
    /// - `epoch`: reference point in Unix milliseconds; must not be in the
    ///   future, nor so far in the past that the 41-bit timestamp is already
    ///   exhausted
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] naming the violated bound.
    ///
    /// # Example
    /// ```
    /// use snowgen::{SnowflakeGenerator, TWITTER_EPOCH};
    ///
    /// let generator = SnowflakeGenerator::new(1, 2, TWITTER_EPOCH).unwrap();
    /// let a = generator.next_id();
    /// let b = generator.next_id();
    /// assert!(a < b);
    /// ```
    pub fn new(datacenter_id: i64, worker_id: i64, epoch: i64) -> Result<Self> {
        Self::with_clock(datacenter_id, worker_id, epoch, SystemClock)
    }
}

impl<T> SnowflakeGenerator<T>
where
    T: TimeSource,
{
    /// Creates a generator that reads time from `time`.
    ///
    /// Validation uses a reading of `time` taken now, so a mocked clock
    /// decides whether the epoch is in the future.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] naming the violated bound.
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip(time)))]
    pub fn with_clock(datacenter_id: i64, worker_id: i64, epoch: i64, time: T) -> Result<Self> {
        let config = GeneratorConfig {
            datacenter_id,
            worker_id,
            epoch,
        };
        config.validate_at(time.current_millis())?;

        #[cfg(feature = "tracing")]
        tracing::debug!("snowflake generator ready");

        let state = Mutex::new(State {
            last_timestamp: NEVER_ISSUED,
            sequence: 0,
        });
        Ok(Self {
            datacenter_id,
            worker_id,
            epoch,
            #[cfg(feature = "cache-padded")]
            state: crossbeam_utils::CachePadded::new(state),
            #[cfg(not(feature = "cache-padded"))]
            state,
            time,
        })
    }

    pub fn datacenter_id(&self) -> i64 {
        self.datacenter_id
    }

    pub fn worker_id(&self) -> i64 {
        self.worker_id
    }

    /// The configured epoch in Unix milliseconds.
    pub fn epoch(&self) -> i64 {
        self.epoch
    }

    /// Generates the next ID, waiting as long as the clock requires.
    ///
    /// Every ID returned by one instance is strictly greater than every ID it
    /// returned before, provided the clock eventually moves forward.
    ///
    /// A poisoned lock is recovered: the state is only written after a
    /// complete step, so a panic elsewhere cannot leave it half-updated.
    ///
    /// # Panics
    ///
    /// Panics if the time since the epoch no longer fits in the 41-bit
    /// timestamp field (about 69 years after the epoch). Use
    /// [`Self::try_next_id`] to handle that as an error instead.
    ///
    /// # Example
    /// ```
    /// use snowgen::{SnowflakeGenerator, CUSTOM_EPOCH};
    ///
    /// let generator = SnowflakeGenerator::new(0, 7, CUSTOM_EPOCH).unwrap();
    /// let id = generator.next_id();
    /// assert_eq!(id.worker_id(), 7);
    /// ```
    pub fn next_id(&self) -> SnowflakeId {
        let mut state = self.lock_recovering();
        match self.generate(&mut state) {
            Ok(id) => id,
            Err(e) => panic!("snowflake generation failed: {e}"),
        }
    }

    /// Generates the next ID with fallible error handling.
    ///
    /// Waits exactly like [`Self::next_id`].
    ///
    /// # Errors
    ///
    /// - [`Error::TimestampOverflow`] if the timestamp range is exhausted
    /// - `Error::LockPoisoned` if another thread panicked while holding the
    ///   lock (not with the `parking-lot` feature)
    pub fn try_next_id(&self) -> Result<SnowflakeId> {
        let mut state = self.lock()?;
        self.generate(&mut state)
    }

    /// Makes a single non-blocking attempt to generate an ID.
    ///
    /// Returns [`IdGenStatus::Pending`] with the number of milliseconds to
    /// back off when the sequence is exhausted or the clock is behind. State is
    /// left untouched in that case, so the caller may retry later.
    ///
    /// # Errors
    ///
    /// Same as [`Self::try_next_id`].
    ///
    /// # Example
    /// ```
    /// use snowgen::{IdGenStatus, SnowflakeGenerator, CUSTOM_EPOCH};
    ///
    /// let generator = SnowflakeGenerator::new(0, 0, CUSTOM_EPOCH).unwrap();
    /// let id = loop {
    ///     match generator.poll_id().unwrap() {
    ///         IdGenStatus::Ready { id } => break id,
    ///         IdGenStatus::Pending { .. } => std::thread::yield_now(),
    ///     }
    /// };
    /// assert_eq!(id.sequence(), 0);
    /// ```
    pub fn poll_id(&self) -> Result<IdGenStatus> {
        let mut state = self.lock()?;
        self.step(&mut state, self.time.current_millis())
    }

    fn generate(&self, state: &mut State) -> Result<SnowflakeId> {
        let mut now = self.time.current_millis();
        loop {
            match self.step(state, now)? {
                IdGenStatus::Ready { id } => return Ok(id),
                IdGenStatus::Pending { yield_for } => {
                    now = self.wait_until(now.saturating_add(yield_for));
                }
            }
        }
    }

    /// Advances the state for a clock reading of `now`. The state is written
    /// only when an ID is issued.
    fn step(&self, state: &mut State, now: i64) -> Result<IdGenStatus> {
        let last = state.last_timestamp;
        match now.cmp(&last) {
            Ordering::Equal => {
                if state.sequence < SnowflakeId::MAX_SEQUENCE {
                    state.sequence += 1;
                } else {
                    return Ok(IdGenStatus::Pending { yield_for: 1 });
                }
            }
            Ordering::Greater => {
                if now < self.epoch {
                    return Ok(Self::cold_before_epoch(now, self.epoch));
                }
                let elapsed = now - self.epoch;
                if elapsed > SnowflakeId::MAX_TIMESTAMP {
                    return Err(Error::TimestampOverflow {
                        elapsed,
                        max: SnowflakeId::MAX_TIMESTAMP,
                    });
                }
                state.last_timestamp = now;
                state.sequence = 0;
            }
            Ordering::Less => return Ok(Self::cold_clock_behind(now, last)),
        }

        Ok(IdGenStatus::Ready {
            id: SnowflakeId::from_components(
                state.last_timestamp - self.epoch,
                self.datacenter_id,
                self.worker_id,
                state.sequence,
            ),
        })
    }

    /// Polls the clock until it reads at least `target`, returning that
    /// reading.
    fn wait_until(&self, target: i64) -> i64 {
        let backoff = Backoff::new();
        loop {
            let now = self.time.current_millis();
            if now >= target {
                return now;
            }
            if backoff.is_completed() {
                thread::sleep(PARK_INTERVAL);
            } else {
                backoff.snooze();
            }
        }
    }

    #[cold]
    #[inline(never)]
    fn cold_clock_behind(now: i64, last: i64) -> IdGenStatus {
        // Resume strictly after the last issued millisecond.
        let yield_for = last - now + 1;
        debug_assert!(yield_for > 1);
        IdGenStatus::Pending { yield_for }
    }

    #[cold]
    #[inline(never)]
    fn cold_before_epoch(now: i64, epoch: i64) -> IdGenStatus {
        IdGenStatus::Pending {
            yield_for: epoch - now,
        }
    }

    #[cfg(feature = "parking-lot")]
    fn lock(&self) -> Result<MutexGuard<'_, State>> {
        Ok(self.state.lock())
    }

    #[cfg(not(feature = "parking-lot"))]
    fn lock(&self) -> Result<MutexGuard<'_, State>> {
        Ok(self.state.lock()?)
    }

    #[cfg(feature = "parking-lot")]
    fn lock_recovering(&self) -> MutexGuard<'_, State> {
        self.state.lock()
    }

    #[cfg(not(feature = "parking-lot"))]
    fn lock_recovering(&self) -> MutexGuard<'_, State> {
        self.state
            .lock()
            .unwrap_or_else(crate::mutex::PoisonError::into_inner)
    }
}

impl<T> fmt::Debug for SnowflakeGenerator<T>
where
    T: TimeSource,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnowflakeGenerator")
            .field("datacenter_id", &self.datacenter_id)
            .field("worker_id", &self.worker_id)
            .field("epoch", &self.epoch)
            .finish_non_exhaustive()
    }
}
