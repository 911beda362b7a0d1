//! Tree-wide bit normalization pass.
//!
//! The rewrites in [`crate::expression::bits`] each repair a single node
//! and never recurse; this pass owns traversal. The tree is rebuilt bottom
//! up so operands are already normalized when their parent is inspected.

use crate::expression::bits::{
    balance_bitwise_operands, normalize_case_branches, normalize_comparison_operands,
};
use crate::expression::expr::Expression;

/// Bottom-up rewrite pass that repairs bit cast placement across a tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct BitNormalizer;

impl BitNormalizer {
    /// Create a new normalizer pass
    pub fn new() -> Self {
        Self
    }

    /// Normalize an expression tree, returning the rewritten tree
    pub fn normalize(&self, expr: Expression) -> Expression {
        match expr {
            Expression::Cast { expr, target } => Expression::Cast {
                expr: Box::new(self.normalize(*expr)),
                target,
            },

            Expression::BinaryOp {
                op, left, right, ..
            } => {
                let left = self.normalize(*left);
                let right = self.normalize(*right);
                let (left, right) = if op.is_bitwise() {
                    if left.result_type().is_bit() != right.result_type().is_bit() {
                        log::debug!(
                            "balancing {} operands: {} vs {}",
                            op.as_str(),
                            left.result_type(),
                            right.result_type()
                        );
                    }
                    balance_bitwise_operands(left, right)
                } else {
                    (left, right)
                };
                // Rebuilding recomputes the stored result type
                Expression::binary_op(op, left, right)
            }

            Expression::Comparison { op, left, right } => {
                let left = self.normalize(*left);
                let right = self.normalize(*right);
                if left.result_type().is_bit() != right.result_type().is_bit() {
                    log::debug!(
                        "normalizing {} comparison: {} vs {}",
                        op.as_str(),
                        left.result_type(),
                        right.result_type()
                    );
                }
                let (left, right) = normalize_comparison_operands(left, right);
                Expression::comparison(op, left, right)
            }

            Expression::Case {
                conditions,
                else_result,
            } => {
                let conditions = conditions
                    .into_iter()
                    .map(|(when, then)| (self.normalize(when), self.normalize(then)))
                    .collect();
                let else_result = Box::new(self.normalize(*else_result));
                normalize_case_branches(Expression::Case {
                    conditions,
                    else_result,
                })
            }

            Expression::FunctionCall { name, args, ty } => Expression::FunctionCall {
                name,
                args: args.into_iter().map(|arg| self.normalize(arg)).collect(),
                ty,
            },

            leaf => leaf,
        }
    }
}

/// Helper function to normalize an expression tree
pub fn normalize_expression(expr: Expression) -> Expression {
    BitNormalizer::new().normalize(expr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::operator::BinaryOperator;
    use crate::types::{SqlType, Value};

    const BIT8: SqlType = SqlType::Bit { width: 8 };

    fn flags() -> Expression {
        Expression::column("flags", BIT8)
    }

    #[test]
    fn test_leaves_pass_through() {
        let normalizer = BitNormalizer::new();
        assert_eq!(normalizer.normalize(flags()), flags());
        assert_eq!(
            normalizer.normalize(Expression::null(BIT8)),
            Expression::null(BIT8)
        );
    }

    #[test]
    fn test_nested_bitwise_inside_comparison() {
        // (flags & 1) <> 0
        let expr = Expression::ne(
            Expression::bit_and(flags(), Expression::literal(Value::Int32(1))),
            Expression::literal(Value::Int32(0)),
        );

        let normalized = normalize_expression(expr);

        // flags & CAST(1 AS bit(8)), then the zero literal is cast to match
        let expected = Expression::ne(
            Expression::bit_and(
                flags(),
                Expression::cast(Expression::literal(Value::Int32(1)), BIT8),
            ),
            Expression::cast(Expression::literal(Value::Int32(0)), BIT8),
        );
        assert_eq!(normalized, expected);
    }

    #[test]
    fn test_shift_count_is_not_balanced() {
        // flags << 2 keeps its integer shift count
        let expr = Expression::binary_op(
            BinaryOperator::ShiftLeft,
            flags(),
            Expression::literal(Value::Int32(2)),
        );
        assert_eq!(normalize_expression(expr.clone()), expr);
    }

    #[test]
    fn test_function_arguments_are_normalized() {
        let expr = Expression::function_call(
            "length",
            vec![Expression::bit_or(
                Expression::literal(Value::Int32(1)),
                flags(),
            )],
            SqlType::Int32,
        );

        let normalized = normalize_expression(expr);
        let expected = Expression::function_call(
            "length",
            vec![Expression::bit_or(
                Expression::cast(Expression::literal(Value::Int32(1)), BIT8),
                flags(),
            )],
            SqlType::Int32,
        );
        assert_eq!(normalized, expected);
    }

    #[test]
    fn test_case_branches_normalized_recursively() {
        // CASE WHEN p THEN CAST(flags AS int4) = 1 ... comparisons inside
        // WHEN conditions are rewritten before the branch pass runs
        let expr = Expression::case(
            vec![(
                Expression::eq(
                    Expression::cast(flags(), SqlType::Int32),
                    Expression::literal(Value::Int32(1)),
                ),
                Expression::literal(Value::Int32(7)),
            )],
            flags(),
        );

        let normalized = normalize_expression(expr);
        let expected = Expression::case(
            vec![(
                Expression::eq(
                    flags(),
                    Expression::cast(Expression::literal(Value::Int32(1)), BIT8),
                ),
                Expression::cast(Expression::literal(Value::Int32(7)), BIT8),
            )],
            flags(),
        );
        assert_eq!(normalized, expected);
    }

    #[test]
    fn test_non_bit_tree_is_unchanged() {
        let expr = Expression::gt(
            Expression::binary_op(
                BinaryOperator::Add,
                Expression::column("a", SqlType::Int32),
                Expression::literal(Value::Int32(5)),
            ),
            Expression::literal(Value::Int32(10)),
        );
        assert_eq!(normalize_expression(expr.clone()), expr);
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let expr = Expression::eq(
            Expression::bit_and(flags(), Expression::literal(Value::Int32(1))),
            Expression::cast(flags(), SqlType::Int32),
        );

        let once = normalize_expression(expr);
        let twice = normalize_expression(once.clone());
        assert_eq!(once, twice);
    }
}
