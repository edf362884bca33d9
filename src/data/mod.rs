//! Data module - metadata loading, sample generation and cleaning

mod cleaner;
mod loader;
mod record;
mod synthetic;

pub use cleaner::DataCleaner;
pub use loader::{DataLoader, DataOrigin};
pub use record::CleanRecord;

#[cfg(test)]
pub use record::{PaperRecord, UNKNOWN_JOURNAL};
#[cfg(test)]
pub use synthetic::SampleGenerator;
