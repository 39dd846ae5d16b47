//! Output generation module
//! Metric tables, charts and JSON result files

pub mod metrics;
pub mod plot;
pub mod writer;
