//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod car_repo;
pub mod human_being_repo;
pub mod import_history_repo;

pub use car_repo::CarRepo;
pub use human_being_repo::HumanBeingRepo;
pub use import_history_repo::ImportHistoryRepo;
