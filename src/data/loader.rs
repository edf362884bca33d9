//! Metadata Loader Module
//! Reads the paper metadata CSV with Polars and falls back to synthetic data.

use super::record::PaperRecord;
use super::synthetic::SampleGenerator;
use crate::config::DashboardConfig;
use polars::prelude::*;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{info, warn};

/// Source column names, in record field order.
pub const METADATA_COLUMNS: [&str; 6] = [
    "title",
    "abstract",
    "publish_time",
    "journal",
    "authors",
    "source_x",
];

/// Cell values read as missing, besides empty cells.
pub const NA_TOKENS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Metadata file not found: {}", path.display())]
    Missing { path: PathBuf },
    #[error("Malformed metadata file: {0}")]
    Malformed(#[from] PolarsError),
}

/// Where the records of the current session came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataOrigin {
    File(PathBuf),
    /// `diagnostic` is set when the file existed but could not be read.
    Synthetic { diagnostic: Option<String> },
}

impl DataOrigin {
    pub fn describe(&self) -> String {
        match self {
            DataOrigin::File(path) => format!("Loaded from {}", path.display()),
            DataOrigin::Synthetic { .. } => "Using synthetic sample data".to_string(),
        }
    }

    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            DataOrigin::Synthetic { diagnostic } => diagnostic.as_deref(),
            DataOrigin::File(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadedData {
    pub records: Vec<PaperRecord>,
    pub origin: DataOrigin,
}

/// Loads paper metadata from a fixed path, capped at `max_rows` rows.
pub struct DataLoader {
    path: PathBuf,
    max_rows: usize,
    sample_rows: usize,
    sample_seed: u64,
}

impl DataLoader {
    pub fn new(path: impl Into<PathBuf>, max_rows: usize) -> Self {
        Self {
            path: path.into(),
            max_rows,
            sample_rows: 5000,
            sample_seed: 42,
        }
    }

    pub fn from_config(config: &DashboardConfig) -> Self {
        Self::new(&config.data_path, config.max_rows)
            .with_sample(config.sample_rows, config.sample_seed)
    }

    pub fn with_sample(mut self, rows: usize, seed: u64) -> Self {
        self.sample_rows = rows;
        self.sample_seed = seed;
        self
    }

    /// Load the CSV using Polars; every column is read as text.
    pub fn load_csv(&self) -> Result<Vec<PaperRecord>, LoaderError> {
        if !self.path.is_file() {
            return Err(LoaderError::Missing {
                path: self.path.clone(),
            });
        }

        let na_tokens = NA_TOKENS.iter().map(|t| PlSmallStr::from(*t)).collect();

        // Schema inference length 0 keeps every column as a string
        let df = LazyCsvReader::new(&self.path)
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .with_null_values(Some(NullValues::AllColumns(na_tokens)))
            .with_n_rows(Some(self.max_rows))
            .finish()?
            .select(
                METADATA_COLUMNS
                    .iter()
                    .map(|name| col(*name))
                    .collect::<Vec<_>>(),
            )
            .collect()?;

        Self::records_from_frame(&df)
    }

    /// Load the file, or generate the sample set when it cannot be used.
    pub fn load_or_sample(&self) -> LoadedData {
        match self.load_csv() {
            Ok(records) => {
                info!(
                    rows = records.len(),
                    path = %self.path.display(),
                    "loaded metadata file"
                );
                LoadedData {
                    records,
                    origin: DataOrigin::File(self.path.clone()),
                }
            }
            Err(err) => {
                let diagnostic = match &err {
                    LoaderError::Missing { .. } => {
                        info!("{err}; generating sample data");
                        None
                    }
                    LoaderError::Malformed(_) => {
                        warn!("{err}; generating sample data");
                        Some(err.to_string())
                    }
                };
                LoadedData {
                    records: SampleGenerator::new(self.sample_rows, self.sample_seed).generate(),
                    origin: DataOrigin::Synthetic { diagnostic },
                }
            }
        }
    }

    /// Convert a six-column string frame into records.
    fn records_from_frame(df: &DataFrame) -> Result<Vec<PaperRecord>, LoaderError> {
        let text_column = |name: &str| -> Result<Vec<Option<String>>, LoaderError> {
            let series = df.column(name)?.as_materialized_series();
            let ca = series.str()?;
            Ok(ca
                .into_iter()
                .map(|v| v.filter(|s| !s.is_empty()).map(str::to_string))
                .collect())
        };

        let titles = text_column("title")?;
        let abstracts = text_column("abstract")?;
        let publish_times = text_column("publish_time")?;
        let journals = text_column("journal")?;
        let authors = text_column("authors")?;
        let sources = text_column("source_x")?;

        let records = titles
            .into_iter()
            .zip(abstracts)
            .zip(publish_times)
            .zip(journals)
            .zip(authors)
            .zip(sources)
            .map(
                |(((((title, abstract_text), publish_time), journal), authors), source)| {
                    PaperRecord {
                        title,
                        abstract_text,
                        publish_time,
                        journal,
                        authors,
                        source,
                    }
                },
            )
            .collect();

        Ok(records)
    }
}
