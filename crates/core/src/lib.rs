//! Pure domain logic for the Human Being manager.
//!
//! This crate has no I/O: entity enums, the validation engine, the
//! pre-validation normalization step, batch import helpers, and pagination
//! constants live here so the API and repository layers (and any future CLI
//! tooling) can share them.

pub mod entity;
pub mod error;
pub mod import;
pub mod pagination;
pub mod types;
pub mod validation;
