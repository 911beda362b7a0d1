//! Expression layer error types.

use crate::types::SqlType;
use thiserror::Error;

/// Errors reported when bit type agreement is violated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExpressionError {
    #[error("operands of {operator} disagree on bit typing: left is {left}, right is {right}")]
    OperandBitnessMismatch {
        operator: String,
        left: SqlType,
        right: SqlType,
    },

    #[error("CASE branch has type {found}, expected {expected}")]
    CaseBranchMismatch { expected: SqlType, found: SqlType },
}

/// Result type for expression validation.
pub type ExpressionResult<T> = Result<T, ExpressionError>;
