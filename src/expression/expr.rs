//! Expression AST definitions.

use crate::expression::operator::{BinaryOperator, ComparisonOperator};
use crate::types::{SqlType, Value};
use serde::{Deserialize, Serialize};

/// Column reference in an expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnRef {
    pub name: String,
    /// Column type, resolved by the host's binder
    pub ty: SqlType,
}

impl ColumnRef {
    pub fn new(name: impl Into<String>, ty: SqlType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// Literal value in an expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Literal {
    pub value: Value,
}

impl Literal {
    pub fn new(value: Value) -> Self {
        Self { value }
    }

    pub fn bool(val: bool) -> Self {
        Self {
            value: Value::Boolean(val),
        }
    }

    pub fn int32(val: i32) -> Self {
        Self {
            value: Value::Int32(val),
        }
    }

    pub fn string(val: impl Into<String>) -> Self {
        Self {
            value: Value::String(val.into()),
        }
    }

    pub fn bits(val: impl Into<String>) -> Self {
        Self {
            value: Value::Bits(val.into()),
        }
    }
}

/// Canonical expression tree node
///
/// Nodes are immutable values: rewrites replace whole sub-nodes instead of
/// mutating in place. Every node's result type is fixed when it is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    /// Literal constant value
    Literal(Literal),

    /// Typed NULL literal
    Null(SqlType),

    /// Column reference
    ColumnRef(ColumnRef),

    /// Explicit type coercion
    Cast {
        expr: Box<Expression>,
        target: SqlType,
    },

    /// Binary operation
    BinaryOp {
        op: BinaryOperator,
        left: Box<Expression>,
        right: Box<Expression>,
        /// Result type, computed once at construction
        ty: SqlType,
    },

    /// Binary predicate
    Comparison {
        op: ComparisonOperator,
        left: Box<Expression>,
        right: Box<Expression>,
    },

    /// CASE expression: ordered (when, then) branches plus the default.
    /// A CASE without ELSE is canonicalized with a typed NULL default.
    Case {
        conditions: Vec<(Expression, Expression)>,
        else_result: Box<Expression>,
    },

    /// Function call, typed by the host
    FunctionCall {
        name: String,
        args: Vec<Expression>,
        ty: SqlType,
    },
}

impl Expression {
    /// Create a literal expression
    pub fn literal(value: Value) -> Self {
        Expression::Literal(Literal::new(value))
    }

    /// Create a typed NULL literal
    pub fn null(ty: SqlType) -> Self {
        Expression::Null(ty)
    }

    /// Create a column reference expression
    pub fn column(name: impl Into<String>, ty: SqlType) -> Self {
        Expression::ColumnRef(ColumnRef::new(name, ty))
    }

    /// Create a cast expression
    pub fn cast(expr: Expression, target: SqlType) -> Self {
        Expression::Cast {
            expr: Box::new(expr),
            target,
        }
    }

    /// Create a binary operation expression
    pub fn binary_op(op: BinaryOperator, left: Expression, right: Expression) -> Self {
        let ty = op.output_type(left.result_type(), right.result_type());
        Expression::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
            ty,
        }
    }

    /// Create a comparison expression
    pub fn comparison(op: ComparisonOperator, left: Expression, right: Expression) -> Self {
        Expression::Comparison {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Create a CASE expression
    pub fn case(conditions: Vec<(Expression, Expression)>, else_result: Expression) -> Self {
        Expression::Case {
            conditions,
            else_result: Box::new(else_result),
        }
    }

    /// Create a function call expression
    pub fn function_call(name: impl Into<String>, args: Vec<Expression>, ty: SqlType) -> Self {
        Expression::FunctionCall {
            name: name.into(),
            args,
            ty,
        }
    }

    /// Create a bitwise AND expression
    pub fn bit_and(left: Expression, right: Expression) -> Self {
        Self::binary_op(BinaryOperator::BitAnd, left, right)
    }

    /// Create a bitwise OR expression
    pub fn bit_or(left: Expression, right: Expression) -> Self {
        Self::binary_op(BinaryOperator::BitOr, left, right)
    }

    /// Create a bitwise XOR expression
    pub fn bit_xor(left: Expression, right: Expression) -> Self {
        Self::binary_op(BinaryOperator::BitXor, left, right)
    }

    /// Create an equality expression
    pub fn eq(left: Expression, right: Expression) -> Self {
        Self::comparison(ComparisonOperator::Eq, left, right)
    }

    /// Create a not-equal expression
    pub fn ne(left: Expression, right: Expression) -> Self {
        Self::comparison(ComparisonOperator::Ne, left, right)
    }

    /// Create a less-than expression
    pub fn lt(left: Expression, right: Expression) -> Self {
        Self::comparison(ComparisonOperator::Lt, left, right)
    }

    /// Create a greater-than expression
    pub fn gt(left: Expression, right: Expression) -> Self {
        Self::comparison(ComparisonOperator::Gt, left, right)
    }

    /// Result type of this node, fixed when the node was built
    pub fn result_type(&self) -> SqlType {
        match self {
            Expression::Literal(lit) => lit.value.data_type(),
            Expression::Null(ty) => *ty,
            Expression::ColumnRef(col) => col.ty,
            Expression::Cast { target, .. } => *target,
            Expression::BinaryOp { ty, .. } => *ty,
            Expression::Comparison { .. } => SqlType::Boolean,
            Expression::Case {
                conditions,
                else_result,
            } => conditions
                .iter()
                .map(|(_, then)| then)
                .find(|then| !then.is_null_literal())
                .map(|then| then.result_type())
                .unwrap_or_else(|| else_result.result_type()),
            Expression::FunctionCall { ty, .. } => *ty,
        }
    }

    /// Check whether this node is a typed NULL literal
    pub fn is_null_literal(&self) -> bool {
        matches!(self, Expression::Null(_))
    }
}
