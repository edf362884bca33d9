//! Paper Record Types
//! Raw rows as read from the metadata file and their cleaned counterparts.

use chrono::NaiveDate;

/// Sentinel used for records without a journal.
pub const UNKNOWN_JOURNAL: &str = "Unknown";

/// One row of research metadata, exactly as loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaperRecord {
    pub title: Option<String>,
    pub abstract_text: Option<String>,
    pub publish_time: Option<String>,
    pub journal: Option<String>,
    pub authors: Option<String>,
    pub source: Option<String>,
}

/// A paper record after cleaning, with derived fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanRecord {
    pub title: Option<String>,
    pub abstract_text: Option<String>,
    pub published: Option<NaiveDate>,
    pub year: Option<i32>,
    pub journal: String,
    pub authors: Option<String>,
    pub source: Option<String>,
    pub abstract_word_count: usize,
}

impl CleanRecord {
    pub fn has_abstract(&self) -> bool {
        self.abstract_text.is_some()
    }
}
