//! Stats module - year filtering and dashboard aggregates

mod calculator;

pub use calculator::{DashboardView, SummaryCalculator, YearRange};
