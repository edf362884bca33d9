//! Summary Calculator Module
//! Year filtering and the aggregates shown on the dashboard.

use crate::charts::{word_frequencies, WordCloudLayout};
use crate::config::DashboardConfig;
use crate::data::CleanRecord;
use statrs::statistics::Statistics;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Inclusive range of publication years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct YearRange {
    pub lo: i32,
    pub hi: i32,
}

impl YearRange {
    pub fn new(lo: i32, hi: i32) -> Self {
        Self { lo, hi }
    }

    /// Records without a year never match.
    pub fn contains(&self, year: Option<i32>) -> bool {
        year.is_some_and(|y| self.lo <= y && y <= self.hi)
    }

    pub fn label(&self) -> String {
        format!("{}-{}", self.lo, self.hi)
    }

    /// Clamp into `bounds`, keeping `lo <= hi`.
    pub fn clamped(&self, bounds: (i32, i32)) -> Self {
        let (min, max) = bounds;
        let lo = self.lo.clamp(min, max);
        let hi = self.hi.clamp(lo, max);
        Self { lo, hi }
    }
}

/// Derived text insights over the filtered records.
#[derive(Debug, Clone, PartialEq)]
pub struct Insights {
    pub mean_abstract_words: Option<f64>,
    pub with_abstract: usize,
    pub with_abstract_pct: f64,
}

impl Insights {
    pub fn average_length_text(&self) -> String {
        match self.mean_abstract_words {
            Some(mean) => format!("{:.1} words", mean),
            None => "n/a".to_string(),
        }
    }

    pub fn abstracts_text(&self) -> String {
        format!("{} ({:.1}%)", self.with_abstract, self.with_abstract_pct)
    }
}

/// Everything the dashboard shows for one year range.
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub range: YearRange,
    pub total_papers: usize,
    pub journal_count: usize,
    pub yearly: Vec<(i32, usize)>,
    pub top_journals: Vec<(String, usize)>,
    pub word_cloud: WordCloudLayout,
    /// Range the word cloud was laid out for.
    pub cloud_range: Option<YearRange>,
    pub sample: Vec<CleanRecord>,
    pub insights: Insights,
}

impl DashboardView {
    pub fn compute(records: &[CleanRecord], range: YearRange, config: &DashboardConfig) -> Self {
        let mut view = Self::aggregates(records, range, config);
        view.refresh_word_cloud(records, config);
        view
    }

    /// Every part except the word cloud, which is left empty.
    pub fn aggregates(
        records: &[CleanRecord],
        range: YearRange,
        config: &DashboardConfig,
    ) -> Self {
        let filtered = SummaryCalculator::filter_by_year(records, range);

        Self {
            range,
            total_papers: filtered.len(),
            journal_count: SummaryCalculator::distinct_journals(&filtered),
            yearly: SummaryCalculator::yearly_counts(&filtered),
            top_journals: SummaryCalculator::top_journals(&filtered, config.top_journals),
            word_cloud: WordCloudLayout::default(),
            cloud_range: None,
            sample: filtered.iter().take(config.preview_rows).cloned().collect(),
            insights: SummaryCalculator::insights(&filtered),
        }
    }

    /// Lay the word cloud out for the current range.
    pub fn refresh_word_cloud(&mut self, records: &[CleanRecord], config: &DashboardConfig) {
        let filtered = SummaryCalculator::filter_by_year(records, self.range);
        let text = SummaryCalculator::title_text(&filtered);
        let freqs = word_frequencies(&text, config.word_cloud.max_words);
        self.word_cloud =
            WordCloudLayout::generate(&freqs, config.word_cloud.width, config.word_cloud.height);
        self.cloud_range = Some(self.range);
    }

    /// Keep an earlier word cloud until the new one is laid out.
    pub fn take_cloud_from(&mut self, previous: DashboardView) {
        self.word_cloud = previous.word_cloud;
        self.cloud_range = previous.cloud_range;
    }

    pub fn cloud_is_current(&self) -> bool {
        self.cloud_range == Some(self.range)
    }
}

/// Stateless aggregate computations.
pub struct SummaryCalculator;

impl SummaryCalculator {
    pub fn filter_by_year(records: &[CleanRecord], range: YearRange) -> Vec<CleanRecord> {
        records
            .iter()
            .filter(|r| range.contains(r.year))
            .cloned()
            .collect()
    }

    /// Smallest and largest valid year, `None` when no record has one.
    pub fn year_bounds(records: &[CleanRecord]) -> Option<(i32, i32)> {
        let years = records.iter().filter_map(|r| r.year);
        let min = years.clone().min()?;
        let max = years.max()?;
        Some((min, max))
    }

    pub fn distinct_journals(records: &[CleanRecord]) -> usize {
        records
            .iter()
            .map(|r| r.journal.as_str())
            .collect::<HashSet<_>>()
            .len()
    }

    /// Record count per year, ascending by year.
    pub fn yearly_counts(records: &[CleanRecord]) -> Vec<(i32, usize)> {
        let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
        for year in records.iter().filter_map(|r| r.year) {
            *counts.entry(year).or_default() += 1;
        }
        counts.into_iter().collect()
    }

    /// Most frequent journals, descending by count then ascending by name.
    pub fn top_journals(records: &[CleanRecord], n: usize) -> Vec<(String, usize)> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for record in records {
            *counts.entry(record.journal.as_str()).or_default() += 1;
        }

        let mut ranked: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(journal, count)| (journal.to_string(), count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(n);
        ranked
    }

    /// All present titles joined by single spaces.
    pub fn title_text(records: &[CleanRecord]) -> String {
        records
            .iter()
            .filter_map(|r| r.title.as_deref())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn insights(records: &[CleanRecord]) -> Insights {
        let lengths: Vec<f64> = records
            .iter()
            .map(|r| r.abstract_word_count as f64)
            .collect();
        let mean_abstract_words = if lengths.is_empty() {
            None
        } else {
            Some(lengths.mean())
        };

        let with_abstract = records.iter().filter(|r| r.has_abstract()).count();
        let with_abstract_pct = if records.is_empty() {
            0.0
        } else {
            with_abstract as f64 / records.len() as f64 * 100.0
        };

        Insights {
            mean_abstract_words,
            with_abstract,
            with_abstract_pct,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DataCleaner, PaperRecord, SampleGenerator, UNKNOWN_JOURNAL};

    fn paper(
        publish_time: &str,
        journal: Option<&str>,
        abstract_text: Option<&str>,
    ) -> PaperRecord {
        PaperRecord {
            title: Some(format!("Paper from {publish_time}")),
            abstract_text: abstract_text.map(str::to_string),
            publish_time: Some(publish_time.to_string()),
            journal: journal.map(str::to_string),
            authors: Some("Someone".to_string()),
            source: Some("PubMed".to_string()),
        }
    }

    fn scenario() -> Vec<CleanRecord> {
        DataCleaner::clean(&[
            paper("2019-05-01", None, Some("short abstract")),
            paper("2020-02-10", Some("Nature"), Some("a slightly longer abstract here")),
            paper("2020-11-30", Some("Nature"), None),
        ])
    }

    #[test]
    fn three_record_scenario() {
        let records = scenario();
        assert_eq!(records[0].journal, UNKNOWN_JOURNAL);

        let filtered = SummaryCalculator::filter_by_year(&records, YearRange::new(2020, 2020));
        assert_eq!(filtered.len(), 2);
        assert_eq!(SummaryCalculator::distinct_journals(&filtered), 1);
        assert_eq!(
            SummaryCalculator::top_journals(&filtered, 10),
            vec![("Nature".to_string(), 2)]
        );
    }

    #[test]
    fn filtering_is_idempotent() {
        let records = DataCleaner::clean(&SampleGenerator::new(1000, 42).generate());
        let range = YearRange::new(2020, 2021);
        let once = SummaryCalculator::filter_by_year(&records, range);
        let twice = SummaryCalculator::filter_by_year(&once, range);
        assert_eq!(once, twice);
        assert!(once.iter().all(|r| matches!(r.year, Some(2020..=2021))));
    }

    #[test]
    fn undated_records_never_match() {
        let records = DataCleaner::clean(&[paper("not-a-date", Some("BMJ"), None)]);
        for range in [
            YearRange::new(i32::MIN, i32::MAX),
            YearRange::new(2019, 2022),
            YearRange::new(0, 0),
        ] {
            assert!(SummaryCalculator::filter_by_year(&records, range).is_empty());
        }
        assert_eq!(SummaryCalculator::year_bounds(&records), None);
    }

    #[test]
    fn year_bounds_ignore_missing_years() {
        let mut records = scenario();
        records.extend(DataCleaner::clean(&[paper("garbage", None, None)]));
        assert_eq!(SummaryCalculator::year_bounds(&records), Some((2019, 2020)));
        assert_eq!(SummaryCalculator::year_bounds(&[]), None);
    }

    #[test]
    fn yearly_counts_are_ascending() {
        let records = DataCleaner::clean(&[
            paper("2021-01-01", None, None),
            paper("2019-01-01", None, None),
            paper("2021-06-01", None, None),
            paper("bad", None, None),
        ]);
        assert_eq!(
            SummaryCalculator::yearly_counts(&records),
            vec![(2019, 1), (2021, 2)]
        );
    }

    #[test]
    fn top_journals_capped_and_sorted() {
        let raw: Vec<PaperRecord> = (0..15)
            .flat_map(|j| {
                let journal = format!("Journal {j:02}");
                (0..=j).map(move |_| paper("2020-01-01", Some(journal.as_str()), None))
            })
            .collect();
        let records = DataCleaner::clean(&raw);

        let top = SummaryCalculator::top_journals(&records, 10);
        assert_eq!(top.len(), 10);
        assert_eq!(top[0], ("Journal 14".to_string(), 15));
        assert!(top.windows(2).all(|w| w[0].1 >= w[1].1));
    }

    #[test]
    fn top_journal_ties_break_by_name() {
        let records = DataCleaner::clean(&[
            paper("2020-01-01", Some("Science"), None),
            paper("2020-01-01", Some("BMJ"), None),
            paper("2020-01-01", Some("JAMA"), None),
        ]);
        let names: Vec<String> = SummaryCalculator::top_journals(&records, 10)
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, vec!["BMJ", "JAMA", "Science"]);
    }

    #[test]
    fn insights_count_present_abstracts() {
        let insights = SummaryCalculator::insights(&scenario());
        assert_eq!(insights.with_abstract, 2);
        assert_eq!(insights.abstracts_text(), "2 (66.7%)");
        // (2 + 5 + 0) / 3
        assert_eq!(insights.average_length_text(), "2.3 words");
    }

    #[test]
    fn insights_on_empty_subset() {
        let insights = SummaryCalculator::insights(&[]);
        assert_eq!(insights.mean_abstract_words, None);
        assert_eq!(insights.average_length_text(), "n/a");
        assert_eq!(insights.abstracts_text(), "0 (0.0%)");
    }

    #[test]
    fn range_label_and_clamping() {
        assert_eq!(YearRange::new(2020, 2021).label(), "2020-2021");
        assert_eq!(
            YearRange::new(2020, 2021).clamped((2021, 2023)),
            YearRange::new(2021, 2021)
        );
        assert_eq!(
            YearRange::new(2015, 2030).clamped((2019, 2022)),
            YearRange::new(2019, 2022)
        );
    }

    #[test]
    fn dashboard_view_bundles_aggregates() {
        let records = DataCleaner::clean(&SampleGenerator::new(5000, 42).generate());
        let config = DashboardConfig::default();
        let view = DashboardView::compute(&records, YearRange::new(2020, 2021), &config);

        let years: Vec<i32> = view.yearly.iter().map(|(y, _)| *y).collect();
        assert_eq!(years, vec![2020, 2021]);
        assert_eq!(view.yearly.iter().map(|(_, c)| c).sum::<usize>(), view.total_papers);
        assert_eq!(view.journal_count, 7);
        assert!(view.top_journals.len() <= 10);
        assert_eq!(view.sample.len(), 10);
        assert_eq!(view.insights.with_abstract, view.total_papers);
        assert!(!view.word_cloud.words.is_empty());
        assert!(view.cloud_is_current());
    }

    #[test]
    fn aggregates_keep_an_earlier_cloud_until_refreshed() {
        let records = DataCleaner::clean(&SampleGenerator::new(2000, 42).generate());
        let config = DashboardConfig::default();
        let full = DashboardView::compute(&records, YearRange::new(2020, 2021), &config);
        let earlier_cloud = full.word_cloud.clone();

        let narrowed = YearRange::new(2021, 2021);
        let mut view = DashboardView::aggregates(&records, narrowed, &config);
        view.take_cloud_from(full);
        assert_eq!(view.range, narrowed);
        assert_eq!(view.word_cloud, earlier_cloud);
        assert!(!view.cloud_is_current());

        view.refresh_word_cloud(&records, &config);
        assert!(view.cloud_is_current());
        assert_eq!(
            view.word_cloud,
            DashboardView::compute(&records, narrowed, &config).word_cloud
        );
    }
}
