use crate::{
    CUSTOM_EPOCH, ConfigError, Result, SnowflakeGenerator, SnowflakeId, SystemClock, TimeSource,
};

/// Identity parameters for one [`SnowflakeGenerator`].
///
/// Every running instance must be given a distinct `(datacenter_id,
/// worker_id)` pair by whoever deploys it; nothing here checks uniqueness
/// across instances.
///
/// # Example
///
/// ```
/// use snowgen::GeneratorConfig;
///
/// let config = GeneratorConfig {
///     datacenter_id: 3,
///     worker_id: 17,
///     ..GeneratorConfig::default()
/// };
/// let generator = config.build().unwrap();
/// let id = generator.next_id();
/// assert_eq!(id.datacenter_id(), 3);
/// assert_eq!(id.worker_id(), 17);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Datacenter or cluster identifier, `0..=31`.
    pub datacenter_id: i64,
    /// Machine or process identifier within the datacenter, `0..=31`.
    pub worker_id: i64,
    /// Reference point in Unix milliseconds subtracted from every timestamp.
    pub epoch: i64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            datacenter_id: 0,
            worker_id: 0,
            epoch: CUSTOM_EPOCH,
        }
    }
}

impl GeneratorConfig {
    /// Checks every bound against the current wall-clock time.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_at(SystemClock.current_millis())
    }

    /// Checks every bound, treating `now` (Unix milliseconds) as the current
    /// time.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate_at(&self, now: i64) -> Result<(), ConfigError> {
        if !(0..=SnowflakeId::MAX_DATACENTER_ID).contains(&self.datacenter_id) {
            return Err(ConfigError::DatacenterIdOutOfRange {
                value: self.datacenter_id,
                max: SnowflakeId::MAX_DATACENTER_ID,
            });
        }
        if !(0..=SnowflakeId::MAX_WORKER_ID).contains(&self.worker_id) {
            return Err(ConfigError::WorkerIdOutOfRange {
                value: self.worker_id,
                max: SnowflakeId::MAX_WORKER_ID,
            });
        }
        if self.epoch > now {
            return Err(ConfigError::EpochInFuture {
                epoch: self.epoch,
                now,
            });
        }
        let elapsed = now.saturating_sub(self.epoch);
        if elapsed > SnowflakeId::MAX_TIMESTAMP {
            return Err(ConfigError::EpochTooOld {
                epoch: self.epoch,
                elapsed,
                max: SnowflakeId::MAX_TIMESTAMP,
            });
        }
        Ok(())
    }

    /// Builds a generator backed by the system wall clock.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if any bound is violated.
    ///
    /// [`Error::InvalidConfiguration`]: crate::Error::InvalidConfiguration
    pub fn build(&self) -> Result<SnowflakeGenerator> {
        self.build_with_clock(SystemClock)
    }

    /// Builds a generator backed by `time`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if any bound is violated.
    ///
    /// [`Error::InvalidConfiguration`]: crate::Error::InvalidConfiguration
    pub fn build_with_clock<T: TimeSource>(&self, time: T) -> Result<SnowflakeGenerator<T>> {
        SnowflakeGenerator::with_clock(self.datacenter_id, self.worker_id, self.epoch, time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = CUSTOM_EPOCH + 1_000;

    fn config(datacenter_id: i64, worker_id: i64, epoch: i64) -> GeneratorConfig {
        GeneratorConfig {
            datacenter_id,
            worker_id,
            epoch,
        }
    }

    #[test]
    fn default_is_valid() {
        assert_eq!(GeneratorConfig::default().validate(), Ok(()));
    }

    #[test]
    fn accepts_boundary_values() {
        assert_eq!(config(0, 0, 0).validate_at(NOW), Ok(()));
        assert_eq!(config(31, 31, NOW).validate_at(NOW), Ok(()));
    }

    #[test]
    fn rejects_datacenter_out_of_range() {
        assert_eq!(
            config(32, 0, 0).validate_at(NOW),
            Err(ConfigError::DatacenterIdOutOfRange { value: 32, max: 31 })
        );
        assert_eq!(
            config(-1, 0, 0).validate_at(NOW),
            Err(ConfigError::DatacenterIdOutOfRange { value: -1, max: 31 })
        );
    }

    #[test]
    fn rejects_worker_out_of_range() {
        assert_eq!(
            config(0, 32, 0).validate_at(NOW),
            Err(ConfigError::WorkerIdOutOfRange { value: 32, max: 31 })
        );
        assert_eq!(
            config(0, -1, 0).validate_at(NOW),
            Err(ConfigError::WorkerIdOutOfRange { value: -1, max: 31 })
        );
    }

    #[test]
    fn rejects_future_epoch() {
        assert_eq!(
            config(0, 0, NOW + 1).validate_at(NOW),
            Err(ConfigError::EpochInFuture {
                epoch: NOW + 1,
                now: NOW
            })
        );
    }

    #[test]
    fn rejects_epoch_beyond_timestamp_range() {
        let now = SnowflakeId::MAX_TIMESTAMP + 1;
        assert_eq!(
            config(0, 0, 0).validate_at(now),
            Err(ConfigError::EpochTooOld {
                epoch: 0,
                elapsed: now,
                max: SnowflakeId::MAX_TIMESTAMP
            })
        );
        assert_eq!(config(0, 0, 1).validate_at(now), Ok(()));
    }

    #[test]
    fn error_names_violated_bound() {
        let err = config(40, 0, 0).validate_at(NOW).unwrap_err();
        assert_eq!(err.to_string(), "datacenter id 40 must be between 0 and 31");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_with_defaults() {
        let config: GeneratorConfig = serde_json::from_str(r#"{"worker_id": 5}"#).unwrap();
        assert_eq!(config.worker_id, 5);
        assert_eq!(config.datacenter_id, 0);
        assert_eq!(config.epoch, CUSTOM_EPOCH);
    }
}
