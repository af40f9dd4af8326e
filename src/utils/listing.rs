//! Helpers for the in-memory search, sort and ranking done by the list pages.
use std::cmp::Reverse;

/// Whether `haystack` contains `needle`, ignoring case. `needle` must already
/// be lowercase.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Treat an absent or empty query parameter as "not given".
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

/// Stable sort descending by `key`.
pub fn sort_desc_by<T>(items: &mut [T], key: impl Fn(&T) -> i64) {
    items.sort_by_key(|item| Reverse(key(item)));
}

/// The top `count` items by `key`, descending. Ties keep their original order.
pub fn top_by<T: Clone>(items: &[T], count: usize, key: impl Fn(&T) -> i64) -> Vec<T> {
    let mut ranked = items.to_vec();
    sort_desc_by(&mut ranked, key);
    ranked.truncate(count);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_is_ignored() {
        assert!(contains_ignore_case("Rust Academy", "academy"));
        assert!(!contains_ignore_case("Rust Academy", "python"));
    }

    #[test]
    fn empty_parameters_count_as_absent() {
        assert_eq!(non_empty(Some("")), None);
        assert_eq!(non_empty(Some("x")), Some("x"));
        assert_eq!(non_empty(None), None);
    }

    #[test]
    fn ranking_is_stable_and_truncated() {
        let items = [(1, 5), (2, 9), (3, 5), (4, 1)];
        let top = top_by(&items, 3, |&(_, clicks)| clicks);
        assert_eq!(top, vec![(2, 9), (1, 5), (3, 5)]);
    }
}
