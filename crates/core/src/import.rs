//! Batch import helpers.
//!
//! Coordinate pairs are unique across the store, so an import file that
//! repeats a pair is rejected before anything is written. The scan itself is
//! pure; the database-side uniqueness check happens in the repository.

/// Find the first pair of records (1-based row numbers) in a batch that
/// share coordinates.
pub fn first_duplicate_coordinates(coords: &[(i32, f64)]) -> Option<(usize, usize)> {
    for (i, a) in coords.iter().enumerate() {
        for (j, b) in coords.iter().enumerate().skip(i + 1) {
            if a.0 == b.0 && a.1 == b.1 {
                return Some((i + 1, j + 1));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_duplicates_in_distinct_batch() {
        assert_eq!(
            first_duplicate_coordinates(&[(1, 1.0), (1, 2.0), (2, 1.0)]),
            None
        );
    }

    #[test]
    fn reports_first_clashing_rows() {
        assert_eq!(
            first_duplicate_coordinates(&[(1, 1.0), (2, 2.0), (1, 1.0), (2, 2.0)]),
            Some((1, 3))
        );
    }

    #[test]
    fn empty_batch_is_fine() {
        assert_eq!(first_duplicate_coordinates(&[]), None);
    }
}
