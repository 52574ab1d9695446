//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` row struct matching the database row
//! - A `Serialize` API-shape struct (camelCase, nested objects)
//! - A `Deserialize` input DTO for inserts and full-replace updates

pub mod car;
pub mod human_being;
pub mod import_history;
