//! Charts module - Chart rendering

mod plotter;
mod wordcloud;

pub use plotter::{ChartPlotter, ChartStyle};
pub use wordcloud::{word_frequencies, WordCloudLayout};
