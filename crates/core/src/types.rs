/// Surrogate keys are PostgreSQL BIGSERIAL; assigned once by the store and never reused.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Placeholder id carried by a record that has not been inserted yet.
///
/// Stores ignore it on insert and return the row with its real id.
pub const UNASSIGNED_ID: DbId = 0;
