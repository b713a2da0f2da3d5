use thiserror::Error;

/// A result type defaulting to the crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All errors that `snowgen` can produce.
///
/// Only construction is fallible in normal operation. Generation resolves
/// clock anomalies and sequence exhaustion by waiting, so the remaining
/// variants surface only from [`SnowflakeGenerator::try_next_id`].
///
/// [`SnowflakeGenerator::try_next_id`]: crate::SnowflakeGenerator::try_next_id
#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The generator could not be constructed from the given parameters.
    ///
    /// Not retriable: fix the configuration and construct again.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    /// The milliseconds elapsed since the epoch no longer fit in the
    /// timestamp field.
    #[error("timestamp overflow: {elapsed}ms since epoch exceeds the maximum of {max}ms")]
    TimestampOverflow { elapsed: i64, max: i64 },

    /// The operation failed because the lock was **poisoned**.
    ///
    /// This occurs when a thread panics while holding the lock. When the
    /// `parking-lot` feature is enabled, mutexes do **not** poison, so this
    /// variant is not available.
    #[cfg(not(feature = "parking-lot"))]
    #[error("generator lock poisoned")]
    LockPoisoned,
}

/// The specific bound a generator configuration violated.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("datacenter id {value} must be between 0 and {max}")]
    DatacenterIdOutOfRange { value: i64, max: i64 },

    #[error("worker id {value} must be between 0 and {max}")]
    WorkerIdOutOfRange { value: i64, max: i64 },

    #[error("epoch {epoch} is after the current time {now}")]
    EpochInFuture { epoch: i64, now: i64 },

    #[error("epoch {epoch} is {elapsed}ms in the past, beyond the {max}ms timestamp range")]
    EpochTooOld { epoch: i64, elapsed: i64, max: i64 },
}

#[cfg(not(feature = "parking-lot"))]
use crate::mutex::{MutexGuard, PoisonError};
#[cfg(not(feature = "parking-lot"))]
impl<T> From<PoisonError<MutexGuard<'_, T>>> for Error {
    fn from(_: PoisonError<MutexGuard<'_, T>>) -> Self {
        Self::LockPoisoned
    }
}
