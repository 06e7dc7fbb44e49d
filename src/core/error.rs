use thiserror::Error;

use super::types::ScenarioLabel;

/// Rejected engine inputs. Every variant means "no result", never a
/// defaulted one.
#[derive(Debug, Clone, Copy, Error, PartialEq)]
pub enum ScenarioError {
    #[error("pay periods must be a positive whole number (got {value})")]
    InvalidPeriodCount { value: f64 },
    #[error("preference must be a whole number between 0 and 100 (got {value})")]
    InvalidPreference { value: f64 },
    #[error(
        "estimated refund is missing, not a finite number, or too large to express in cents"
    )]
    NonFiniteRefund,
    #[error("sweep step must be between 1 and 100 (got {value})")]
    InvalidSweepStep { value: u32 },
    #[error("retained percent for {label} must be between 0 and 100 (got {value})")]
    InvalidRetainedPercent { label: ScenarioLabel, value: u8 },
}
