//! Operator definitions for expressions.

use crate::types::SqlType;
use serde::{Deserialize, Serialize};

/// Binary operators supported in canonical expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOperator {
    // Bitwise
    BitAnd,
    BitOr,
    BitXor,
    ShiftLeft,
    ShiftRight,

    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,

    // Logical
    And,
    Or,
}

impl BinaryOperator {
    /// Whether this operator combines both operands bitwise.
    ///
    /// Shifts are excluded: their right operand is a plain integer count
    /// and must never be rewritten to the bit side's type.
    pub fn is_bitwise(&self) -> bool {
        matches!(
            self,
            BinaryOperator::BitAnd | BinaryOperator::BitOr | BinaryOperator::BitXor
        )
    }

    /// Get the output type of this operator given operand types.
    ///
    /// Operand typing itself is the binder's concern; this only resolves
    /// which side's type the result carries.
    pub fn output_type(&self, left: SqlType, right: SqlType) -> SqlType {
        match self {
            // The bit side's width is authoritative when operands mix
            BinaryOperator::BitAnd | BinaryOperator::BitOr | BinaryOperator::BitXor => {
                if left.is_bit() {
                    left
                } else if right.is_bit() {
                    right
                } else {
                    left
                }
            }

            // Shifting preserves the shifted operand's type
            BinaryOperator::ShiftLeft | BinaryOperator::ShiftRight => left,

            BinaryOperator::Add
            | BinaryOperator::Sub
            | BinaryOperator::Mul
            | BinaryOperator::Div => left,

            BinaryOperator::And | BinaryOperator::Or => SqlType::Boolean,
        }
    }

    /// Get the display string for this operator
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOperator::BitAnd => "&",
            BinaryOperator::BitOr => "|",
            BinaryOperator::BitXor => "#",
            BinaryOperator::ShiftLeft => "<<",
            BinaryOperator::ShiftRight => ">>",
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
            BinaryOperator::And => "AND",
            BinaryOperator::Or => "OR",
        }
    }
}

/// Comparison operators supported in canonical expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonOperator {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl ComparisonOperator {
    /// Get the display string for this operator
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonOperator::Eq => "=",
            ComparisonOperator::Ne => "<>",
            ComparisonOperator::Lt => "<",
            ComparisonOperator::Le => "<=",
            ComparisonOperator::Gt => ">",
            ComparisonOperator::Ge => ">=",
        }
    }
}
