//! Canonical expression trees and bit type normalization.
//!
//! This module provides:
//! - Expression AST representation for the canonical query tree
//! - Bit type classification and cast placement repair
//! - A rewrite pass that applies the repairs across a whole tree
//! - Validation of bit type agreement before SQL emission

pub mod bits;
pub mod check;
pub mod error;
pub mod expr;
pub mod operator;
pub mod rewrite;

pub use bits::{balance_bitwise_operands, normalize_case_branches, normalize_comparison_operands};
pub use check::validate_expression;
pub use error::{ExpressionError, ExpressionResult};
pub use expr::{ColumnRef, Expression, Literal};
pub use operator::{BinaryOperator, ComparisonOperator};
pub use rewrite::{normalize_expression, BitNormalizer};
