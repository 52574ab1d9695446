//! Pagination constants and listing helpers.
//!
//! This module lives in `core` (zero internal deps) so it can be used by both
//! the API and repository layers. The column table doubles as the whitelist
//! that keeps client-supplied filter/sort parameters out of raw SQL.

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum number of rows per page.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Clamp a client-supplied page index (0-based) to a sane value.
pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(0).max(0)
}

/// Clamp a client-supplied page size to `[1, MAX_PAGE_SIZE]`.
pub fn clamp_page_size(size: Option<i64>) -> i64 {
    size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
}

// ---------------------------------------------------------------------------
// Filter / sort column whitelist
// ---------------------------------------------------------------------------

/// API column names and the SQL expressions they resolve to.
///
/// `h` aliases `human_beings`, `c` the joined `cars` row. Only names in this
/// table may appear in `filterColumn` / `sortColumn`; anything else is
/// rejected before any SQL is built.
const COLUMNS: &[(&str, &str)] = &[
    ("id", "h.id"),
    ("name", "h.name"),
    ("coordinatesX", "h.x"),
    ("coordinatesY", "h.y"),
    ("creationDate", "h.creation_date"),
    ("realHero", "h.real_hero"),
    ("hasToothpick", "h.has_toothpick"),
    ("mood", "h.mood"),
    ("impactSpeed", "h.impact_speed"),
    ("soundtrackName", "h.soundtrack_name"),
    ("minutesOfWaiting", "h.minutes_of_waiting"),
    ("weaponType", "h.weapon_type"),
    ("carName", "c.name"),
];

/// Resolve an API column name to its SQL expression, or `None` if the name
/// is not whitelisted.
pub fn column_expression(name: &str) -> Option<&'static str> {
    COLUMNS
        .iter()
        .find(|(api_name, _)| *api_name == name)
        .map(|(_, expr)| *expr)
}

/// Sort direction parsed from a query parameter. Anything other than
/// `desc` (case-insensitive) sorts ascending, matching the console's
/// default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some(s) if s.eq_ignore_ascii_case("desc") => Self::Desc,
            _ => Self::Asc,
        }
    }

    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}
