//! Data Cleaner Module
//! Normalizes publish dates, fills missing journals and derives word counts.

use super::record::{CleanRecord, PaperRecord, UNKNOWN_JOURNAL};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use rayon::prelude::*;

/// Date-only layouts seen in CORD-19 style metadata.
const DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%Y %b %d", "%d %b %Y", "%B %d, %Y",
];

const DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Pure record transform; never fails and never drops a row.
pub struct DataCleaner;

impl DataCleaner {
    /// Clean all records, preserving order.
    pub fn clean(records: &[PaperRecord]) -> Vec<CleanRecord> {
        records.par_iter().map(Self::clean_record).collect()
    }

    pub fn clean_record(record: &PaperRecord) -> CleanRecord {
        let published = record.publish_time.as_deref().and_then(Self::parse_date);

        CleanRecord {
            title: record.title.clone(),
            abstract_text: record.abstract_text.clone(),
            published,
            year: published.map(|d| d.year()),
            journal: record
                .journal
                .clone()
                .unwrap_or_else(|| UNKNOWN_JOURNAL.to_string()),
            authors: record.authors.clone(),
            source: record.source.clone(),
            abstract_word_count: Self::word_count(record.abstract_text.as_deref()),
        }
    }

    /// Number of whitespace-separated tokens; a missing abstract counts as empty.
    pub fn word_count(text: Option<&str>) -> usize {
        text.unwrap_or("").split_whitespace().count()
    }

    /// Parse a publish time, returning `None` for anything unrecognised.
    pub fn parse_date(raw: &str) -> Option<NaiveDate> {
        let s = raw.trim();
        if s.is_empty() {
            return None;
        }

        if let Some(d) = DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        {
            return Some(d);
        }

        if let Some(dt) = DATETIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        {
            return Some(dt.date());
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.date_naive());
        }

        // Partial dates resolve to the first day of the period
        if let Ok(d) = NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d") {
            return Some(d);
        }
        if s.len() == 4 && s.chars().all(|c| c.is_ascii_digit()) {
            let year: i32 = s.parse().ok()?;
            return NaiveDate::from_ymd_opt(year, 1, 1);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        publish_time: Option<&str>,
        journal: Option<&str>,
        abstract_text: Option<&str>,
    ) -> PaperRecord {
        PaperRecord {
            title: Some("A title".to_string()),
            abstract_text: abstract_text.map(str::to_string),
            publish_time: publish_time.map(str::to_string),
            journal: journal.map(str::to_string),
            authors: None,
            source: Some("PMC".to_string()),
        }
    }

    #[test]
    fn missing_journal_becomes_unknown() {
        let cleaned = DataCleaner::clean(&[
            record(Some("2020-01-01"), None, None),
            record(Some("2020-01-01"), Some("Nature"), None),
        ]);
        assert_eq!(cleaned[0].journal, UNKNOWN_JOURNAL);
        assert_eq!(cleaned[1].journal, "Nature");
    }

    #[test]
    fn missing_abstract_counts_zero_words() {
        let cleaned = DataCleaner::clean_record(&record(None, None, None));
        assert_eq!(cleaned.abstract_word_count, 0);
        assert!(!cleaned.has_abstract());
    }

    #[test]
    fn word_count_splits_on_any_whitespace() {
        assert_eq!(DataCleaner::word_count(Some("  one\ttwo\nthree  four ")), 4);
        assert_eq!(DataCleaner::word_count(Some("")), 0);
        assert_eq!(DataCleaner::word_count(None), 0);
    }

    #[test]
    fn unparseable_date_yields_no_year() {
        let cleaned = DataCleaner::clean_record(&record(Some("not-a-date"), None, None));
        assert_eq!(cleaned.published, None);
        assert_eq!(cleaned.year, None);
    }

    #[test]
    fn parses_common_date_layouts() {
        let expected = NaiveDate::from_ymd_opt(2020, 3, 15);
        for raw in [
            "2020-03-15",
            "2020/03/15",
            "03/15/2020",
            "2020 Mar 15",
            "15 Mar 2020",
            "March 15, 2020",
            "2020-03-15 08:30:00",
            "2020-03-15T08:30:00Z",
        ] {
            assert_eq!(DataCleaner::parse_date(raw), expected, "layout {raw}");
        }
        assert_eq!(
            DataCleaner::parse_date("2020-03"),
            NaiveDate::from_ymd_opt(2020, 3, 1)
        );
        assert_eq!(DataCleaner::parse_date("2021"), NaiveDate::from_ymd_opt(2021, 1, 1));
        assert_eq!(DataCleaner::parse_date("  "), None);
    }

    #[test]
    fn cleaning_preserves_order_and_length() {
        let raw: Vec<PaperRecord> = (0..100)
            .map(|i| {
                let mut r = record(Some("2021-06-01"), None, Some("a b"));
                r.title = Some(format!("Paper {i}"));
                r
            })
            .collect();
        let cleaned = DataCleaner::clean(&raw);
        assert_eq!(cleaned.len(), 100);
        assert_eq!(cleaned[42].title.as_deref(), Some("Paper 42"));
        assert!(cleaned.iter().all(|r| r.year == Some(2021)));
    }
}
