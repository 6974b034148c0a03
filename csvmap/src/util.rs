//! Csvmap util
//!
//! constants and small helpers

use itertools::Itertools;

/// default `delimiter`
pub const DEFAULT_DELIMITER: char = ',';
/// line terminator appended to every written row, header included
pub const LINE_TERMINATOR: &str = "\n";

pub(crate) const DEFAULT_DATE_FMT: &str = "%Y-%m-%d";
pub(crate) const DEFAULT_TIME_FMT: &str = "%H:%M:%S%.f";
pub(crate) const DEFAULT_DATETIME_FMT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Items occurring more than once, distinct, in first-seen order, joined by `;`.
///
/// Returns `None` when every item is unique.
pub(crate) fn duplicates_joined<I, T>(items: I) -> Option<String>
where
    I: IntoIterator<Item = T>,
    T: std::hash::Hash + Eq + Clone + std::fmt::Display,
{
    let items = items.into_iter().collect::<Vec<_>>();
    let counts = items.iter().counts();

    let dup = items
        .iter()
        .filter(|i| counts.get(i).copied().unwrap_or_default() > 1)
        .unique()
        .join(";");

    if dup.is_empty() {
        None
    } else {
        Some(dup)
    }
}

/// blank cells are treated as absent values
pub(crate) fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

#[cfg(test)]
mod tests_util {
    use super::*;

    #[test]
    fn duplicates_first_seen_order() {
        assert_eq!(duplicates_joined(vec![3, 0, 1, 0, 3, 3]), Some("3;0".to_owned()));
        assert_eq!(duplicates_joined(vec![0, 1, 2]), None);
        assert_eq!(duplicates_joined(Vec::<usize>::new()), None);
    }

    #[test]
    fn blank() {
        assert!(is_blank(""));
        assert!(is_blank(" \t "));
        assert!(!is_blank(" x "));
    }
}
