//! Synthetic Sample Data
//! Deterministic stand-in dataset used when the metadata file is unavailable.

use super::record::PaperRecord;
use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

pub const SAMPLE_JOURNALS: [&str; 6] = ["The Lancet", "Nature", "Science", "JAMA", "NEJM", "BMJ"];
pub const SAMPLE_SOURCES: [&str; 3] = ["PubMed", "arXiv", "bioRxiv"];

/// Generates the fallback dataset from a fixed seed.
pub struct SampleGenerator {
    rows: usize,
    seed: u64,
}

impl SampleGenerator {
    pub fn new(rows: usize, seed: u64) -> Self {
        Self { rows, seed }
    }

    /// First and last publish dates drawn from (inclusive).
    pub fn date_span() -> (NaiveDate, NaiveDate) {
        // Both literals are valid calendar dates
        let start = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap_or_default();
        let end = NaiveDate::from_ymd_opt(2022, 12, 31).unwrap_or_default();
        (start, end)
    }

    pub fn generate(&self) -> Vec<PaperRecord> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let (start, end) = Self::date_span();
        let span_days = (end - start).num_days();

        // Six journals plus the missing-journal outcome, all equally likely
        let journals: Vec<Option<&str>> = SAMPLE_JOURNALS
            .iter()
            .copied()
            .map(Some)
            .chain(std::iter::once(None))
            .collect();

        (0..self.rows)
            .map(|i| {
                let published = start + Duration::days(rng.gen_range(0..=span_days));
                let journal = journals.choose(&mut rng).copied().flatten();
                let source = SAMPLE_SOURCES.choose(&mut rng).copied();

                PaperRecord {
                    title: Some(format!("COVID-19 Research Paper {i}")),
                    abstract_text: Some(format!(
                        "Abstract for paper {i} about coronavirus research"
                    )),
                    publish_time: Some(published.format("%Y-%m-%d").to_string()),
                    journal: journal.map(str::to_string),
                    authors: Some(format!("Author {i}")),
                    source: source.map(str::to_string),
                }
            })
            .collect()
    }
}
