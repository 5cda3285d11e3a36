//! Record Aggregation
//!
//! Grouping, stable sorting and numeric reductions over record slices.
//! All functions are total: empty input yields an empty map, empty vector
//! or 0.0.

use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Group records by a key, keyed by the key's string form
///
/// Records keep their original relative order within each group.
///
/// # Examples
/// ```
/// use sportsedge::analytics::aggregate::group_by;
///
/// let stakes = [10, 25, 30, 15];
/// let groups = group_by(&stakes, |s| if *s >= 20 { "big" } else { "small" });
/// assert_eq!(groups["small"], vec![&10, &15]);
/// assert_eq!(groups["big"], vec![&25, &30]);
/// ```
pub fn group_by<'a, T, K, F>(records: &'a [T], key: F) -> BTreeMap<String, Vec<&'a T>>
where
    K: ToString,
    F: Fn(&T) -> K,
{
    let mut groups: BTreeMap<String, Vec<&T>> = BTreeMap::new();
    for record in records {
        groups.entry(key(record).to_string()).or_default().push(record);
    }
    groups
}

/// Stable sort by a key
///
/// Equal keys keep their original relative order in both directions.
/// Incomparable keys (NaN) compare as equal.
pub fn sort_by<'a, T, K, F>(records: &'a [T], key: F, order: SortOrder) -> Vec<&'a T>
where
    K: PartialOrd,
    F: Fn(&T) -> K,
{
    let mut sorted: Vec<&T> = records.iter().collect();
    sorted.sort_by(|a, b| {
        let comparison = key(a).partial_cmp(&key(b)).unwrap_or(Ordering::Equal);
        match order {
            SortOrder::Ascending => comparison,
            SortOrder::Descending => comparison.reverse(),
        }
    });
    sorted
}

/// Sum a numeric field
///
/// Missing (`None`) and NaN values count as 0.
pub fn sum_by<T, V, F>(records: &[T], value: F) -> f64
where
    V: Into<Option<f64>>,
    F: Fn(&T) -> V,
{
    records
        .iter()
        .map(|record| match value(record).into() {
            Some(v) if !v.is_nan() => v,
            _ => 0.0,
        })
        .sum()
}

/// Average a numeric field over all records
///
/// Missing values count as 0 in the numerator but still count in the
/// denominator. Returns 0.0 for an empty slice.
pub fn avg_by<T, V, F>(records: &[T], value: F) -> f64
where
    V: Into<Option<f64>>,
    F: Fn(&T) -> V,
{
    if records.is_empty() {
        return 0.0;
    }
    sum_by(records, value) / records.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    struct Row {
        id: u32,
        sport: &'static str,
        stake: f64,
        clv: Option<f64>,
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { id: 1, sport: "NBA", stake: 100.0, clv: Some(1.5) },
            Row { id: 2, sport: "NFL", stake: 50.0, clv: None },
            Row { id: 3, sport: "NBA", stake: 100.0, clv: Some(-0.5) },
            Row { id: 4, sport: "NHL", stake: 25.0, clv: Some(f64::NAN) },
            Row { id: 5, sport: "NBA", stake: 50.0, clv: Some(2.0) },
        ]
    }

    fn ids(rows: &[&Row]) -> Vec<u32> {
        rows.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_group_by_preserves_order() {
        let data = rows();
        let groups = group_by(&data, |r| r.sport);

        assert_eq!(groups.len(), 3);
        assert_eq!(ids(&groups["NBA"]), vec![1, 3, 5]);
        assert_eq!(ids(&groups["NFL"]), vec![2]);
        assert_eq!(ids(&groups["NHL"]), vec![4]);
    }

    #[test]
    fn test_group_by_stringifies_keys() {
        let data = rows();
        let groups = group_by(&data, |r| r.stake as i64);
        assert_eq!(ids(&groups["100"]), vec![1, 3]);
        assert_eq!(ids(&groups["50"]), vec![2, 5]);
    }

    #[test]
    fn test_group_by_empty() {
        let data: Vec<Row> = Vec::new();
        assert!(group_by(&data, |r| r.sport).is_empty());
    }

    #[test]
    fn test_sort_by_ascending_stable() {
        let data = rows();
        let sorted = sort_by(&data, |r| r.stake, SortOrder::Ascending);
        // 25 | 50 (2, 5) | 100 (1, 3)
        assert_eq!(ids(&sorted), vec![4, 2, 5, 1, 3]);
    }

    #[test]
    fn test_sort_by_descending_stable() {
        let data = rows();
        let sorted = sort_by(&data, |r| r.stake, SortOrder::Descending);
        // Ties keep original order, they are not reversed
        assert_eq!(ids(&sorted), vec![1, 3, 2, 5, 4]);
    }

    #[test]
    fn test_sort_by_all_equal_keys() {
        let data = rows();
        let sorted = sort_by(&data, |_| 0, SortOrder::Descending);
        assert_eq!(ids(&sorted), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_sort_by_leaves_input_untouched() {
        let data = rows();
        let sorted = sort_by(&data, |r| r.id, SortOrder::Descending);
        assert_eq!(ids(&sorted), vec![5, 4, 3, 2, 1]);
        assert_eq!(data.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_sum_by() {
        let data = rows();
        assert_eq!(sum_by(&data, |r| r.stake), 325.0);
        // None and NaN count as 0
        assert!((sum_by(&data, |r| r.clv) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_avg_by() {
        let data = rows();
        assert_eq!(avg_by(&data, |r| r.stake), 65.0);
        assert!((avg_by(&data, |r| r.clv) - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_empty_reductions() {
        let data: Vec<Row> = Vec::new();
        assert_eq!(sum_by(&data, |r| r.stake), 0.0);
        assert_eq!(avg_by(&data, |r| r.stake), 0.0);
        assert_eq!(avg_by(&data, |r| r.clv), 0.0);
    }
}
