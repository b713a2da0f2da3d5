use crate::SnowflakeId;

/// Represents the result of a single non-blocking generation attempt.
///
/// This type models the outcome of [`SnowflakeGenerator::poll_id`]:
///
/// - [`IdGenStatus::Ready`] indicates a new ID was successfully generated.
/// - [`IdGenStatus::Pending`] means the generator cannot produce an ID until
///   the clock advances by at least `yield_for` milliseconds, either because
///   the sequence is exhausted for the current millisecond or because the
///   clock is behind the last issued timestamp.
///
/// This allows non-blocking generation loops and caller-chosen backoff.
///
/// # Example
///
/// ```
/// use snowgen::{IdGenStatus, SnowflakeGenerator, CUSTOM_EPOCH};
///
/// let generator = SnowflakeGenerator::new(1, 2, CUSTOM_EPOCH).unwrap();
/// match generator.poll_id().unwrap() {
///     IdGenStatus::Ready { id } => println!("ID: {id}"),
///     IdGenStatus::Pending { yield_for } => println!("Back off for {yield_for}ms"),
/// }
/// ```
///
/// [`SnowflakeGenerator::poll_id`]: crate::SnowflakeGenerator::poll_id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdGenStatus {
    /// A unique ID was generated and is ready to use.
    Ready {
        /// The generated Snowflake ID.
        id: SnowflakeId,
    },
    /// No ID could be generated at the current time.
    Pending {
        /// Milliseconds to wait before trying again.
        yield_for: i64,
    },
}
