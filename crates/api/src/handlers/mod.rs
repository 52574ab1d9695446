//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers run raw JSON through the validation engine before touching
//! typed DTOs, delegate to the repositories in `hbm_db`, and map errors
//! via [`crate::error::AppError`].

pub mod human_being;
pub mod import;
pub mod special_ops;
