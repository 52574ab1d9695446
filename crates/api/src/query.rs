//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Listing parameters for the Human Being collection:
/// `?page=&size=&filterColumn=&filterValue=&sortColumn=&sortDirection=`.
///
/// `page` is 0-based. Column names are API names resolved through the
/// whitelist in `hbm_core::pagination`; unknown names are rejected with 400.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub filter_column: Option<String>,
    pub filter_value: Option<String>,
    pub sort_column: Option<String>,
    pub sort_direction: Option<String>,
}

/// `?substring=` parameter for the soundtrack prefix search.
#[derive(Debug, Deserialize)]
pub struct SubstringParams {
    pub substring: Option<String>,
}
