//! Shared response envelope types for API handlers.
//!
//! Single resources use a `{ "data": ... }` envelope; list endpoints that
//! page return [`Paginated`] with the total row count alongside the page.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// One page of a listing plus the unpaged total.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T: Serialize> {
    pub data: Vec<T>,
    pub total_count: i64,
    /// 0-based page index that was served.
    pub page: i64,
    pub size: i64,
}
