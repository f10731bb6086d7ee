//! Error types for the city calculations.

use citycalc_data::LookupError;
use thiserror::Error;

/// Every failure is caller-fatal; nothing here is retried or defaulted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalcError {
    /// A static record or player ID had no definition.
    #[error(transparent)]
    NotFound(#[from] LookupError),

    /// A doubled value that must halve exactly was odd (a data authoring bug).
    #[error("{caller}: {what} has doubled value {value}, which is not an exact multiple of 2")]
    ArithmeticConsistency {
        caller: &'static str,
        what: String,
        value: i32,
    },

    /// The selected units cannot form a stack.
    #[error("Invalid unit stack: {0}")]
    InvalidUnitStack(String),
}

pub type CalcResult<T> = Result<T, CalcError>;
