//! Weighted KPI scorecard: rate a hierarchy of weighted indicators on a 0-5
//! scale and turn the ratings into a percentage score and a letter grade.

pub mod config;
pub mod export;
pub mod model;
pub mod output;
pub mod scoring;
pub mod session;
pub mod stderr_buffer;
pub mod telemetry;
pub mod tui;
