//! Sorted and grouped views over a parsed record collection.

use serde::Serialize;
use std::collections::HashMap;

use crate::models::{Record, RecordCollection};

/// Bucket label for records without a year
pub const OTHER_LABEL: &str = "Other";

/// Records sharing one year label
#[derive(Debug, Clone, Serialize)]
pub struct YearBucket<'a> {
    pub label: String,
    pub records: Vec<&'a Record>,
}

/// Read-only views over a [`RecordCollection`]
#[derive(Debug, Clone, Copy)]
pub struct RecordIndex<'a> {
    records: &'a RecordCollection,
}

impl<'a> RecordIndex<'a> {
    pub fn new(records: &'a RecordCollection) -> Self {
        Self { records }
    }

    /// The `n` most recent records that carry a year.
    ///
    /// Numeric years sort descending; ties and years that are not plain
    /// integers keep document order, the latter after all numeric years.
    pub fn latest(&self, n: usize) -> Vec<&'a Record> {
        let mut dated: Vec<&Record> = self.records.iter().filter(|r| r.year().is_some()).collect();

        dated.sort_by(|a, b| year_order(a.numeric_year(), b.numeric_year()));
        dated.truncate(n);
        dated
    }

    /// Every record, bucketed by year.
    ///
    /// Bucket order: numeric years descending, then non-numeric year labels
    /// in the order first seen, then [`OTHER_LABEL`] last. Records keep
    /// document order inside a bucket.
    pub fn grouped_by_year(&self) -> Vec<YearBucket<'a>> {
        let mut buckets: Vec<YearBucket<'a>> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();

        for record in self.records {
            let label = record.year().unwrap_or(OTHER_LABEL);
            let slot = *positions.entry(label).or_insert_with(|| {
                buckets.push(YearBucket {
                    label: label.to_string(),
                    records: Vec::new(),
                });
                buckets.len() - 1
            });
            buckets[slot].records.push(record);
        }

        buckets.sort_by_key(|bucket| BucketKey::of(&bucket.label));
        buckets
    }
}

/// Descending by year, with undated/non-numeric entries after every number
fn year_order(a: Option<i64>, b: Option<i64>) -> std::cmp::Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    }
}

/// Sort key for buckets; derived `Ord` follows variant order
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum BucketKey {
    Year(std::cmp::Reverse<i64>),
    Label,
    Other,
}

impl BucketKey {
    fn of(label: &str) -> Self {
        if label == OTHER_LABEL {
            return BucketKey::Other;
        }
        match label.trim().parse::<i64>() {
            Ok(year) => BucketKey::Year(std::cmp::Reverse(year)),
            Err(_) => BucketKey::Label,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecordBuilder;

    fn record(title: &str, year: Option<&str>) -> Record {
        let mut builder = RecordBuilder::new().title(title);
        if let Some(y) = year {
            builder = builder.year(y);
        }
        builder.build().unwrap()
    }

    fn titles(records: &[&Record]) -> Vec<String> {
        records
            .iter()
            .map(|r| r.title().unwrap_or_default().to_string())
            .collect()
    }

    fn sample() -> RecordCollection {
        vec![
            record("a", Some("2020")),
            record("b", Some("2023")),
            record("c", Some("2021")),
            record("d", Some("2023")),
        ]
        .into()
    }

    #[test]
    fn test_latest_picks_most_recent() {
        let records = sample();
        let index = RecordIndex::new(&records);

        let latest = index.latest(2);
        assert_eq!(titles(&latest), vec!["b", "d"]);
    }

    #[test]
    fn test_latest_full_order() {
        let records = sample();
        let latest = RecordIndex::new(&records).latest(10);
        assert_eq!(titles(&latest), vec!["b", "d", "c", "a"]);
    }

    #[test]
    fn test_latest_skips_undated() {
        let records: RecordCollection = vec![
            record("undated", None),
            record("empty", Some("")),
            record("dated", Some("1999")),
        ]
        .into();

        let latest = RecordIndex::new(&records).latest(5);
        assert_eq!(titles(&latest), vec!["dated"]);
    }

    #[test]
    fn test_latest_empty_cases() {
        let records = sample();
        assert!(RecordIndex::new(&records).latest(0).is_empty());

        let none = RecordCollection::new();
        assert!(RecordIndex::new(&none).latest(5).is_empty());
    }

    #[test]
    fn test_latest_non_numeric_year_after_numeric() {
        let records: RecordCollection = vec![
            record("press", Some("in press")),
            record("old", Some("2001")),
        ]
        .into();

        let latest = RecordIndex::new(&records).latest(5);
        assert_eq!(titles(&latest), vec!["old", "press"]);
    }

    #[test]
    fn test_grouped_bucket_order() {
        let records = sample();
        let groups = RecordIndex::new(&records).grouped_by_year();

        let labels: Vec<_> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["2023", "2021", "2020"]);
        assert_eq!(titles(&groups[0].records), vec!["b", "d"]);
    }

    #[test]
    fn test_grouped_other_last() {
        let records: RecordCollection = vec![
            record("undated", None),
            record("press", Some("in press")),
            record("new", Some("2024")),
            record("also undated", None),
            record("old", Some("2010")),
        ]
        .into();

        let groups = RecordIndex::new(&records).grouped_by_year();
        let labels: Vec<_> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["2024", "2010", "in press", "Other"]);
        assert_eq!(titles(&groups[3].records), vec!["undated", "also undated"]);
    }

    #[test]
    fn test_grouped_includes_every_record() {
        let records = sample();
        let groups = RecordIndex::new(&records).grouped_by_year();
        let total: usize = groups.iter().map(|g| g.records.len()).sum();
        assert_eq!(total, records.len());
    }
}
