//! Theoretical parameter and MAC counts for sequence-to-sequence RNN models,
//! reconciled against the counts measured on the loaded model.
//!
//! ```text
//! raw record -> config::normalize -> ModelConfig -> estimator::estimate -> ComplexityReport
//! ```

pub mod config;
pub mod error;
pub mod estimator;
pub mod format;
pub mod provider;
pub mod report;

use serde_json::Value;

pub use config::{MeasuredStats, ModelConfig, RnnCell};
pub use error::ReportError;
pub use estimator::{Breakdown, ComplexityEstimate};
pub use format::NumberFormat;
pub use report::{ComplexityReport, Reconciliation};

/// Normalizes a provider record and builds its report in one go.
pub fn report(record: &Value, format: NumberFormat) -> ComplexityReport {
    let (config, measured) = config::normalize(record);
    ComplexityReport::new(config, measured, format)
}
