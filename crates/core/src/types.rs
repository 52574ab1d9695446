/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC. `creation_date` and import history timestamps
/// are server-assigned, never accepted from clients.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
