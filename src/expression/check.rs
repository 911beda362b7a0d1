//! Validation of bit type agreement across an expression tree.

use crate::expression::error::{ExpressionError, ExpressionResult};
use crate::expression::expr::Expression;
use crate::types::SqlType;

/// Verify that bit typed operands and branches agree everywhere in a tree.
///
/// Intended as a pre-emission assertion: a tree produced by
/// [`crate::expression::rewrite::BitNormalizer`] always validates. Only bit
/// agreement is checked here; general operand typing is the binder's
/// concern.
pub fn validate_expression(expr: &Expression) -> ExpressionResult<()> {
    match expr {
        Expression::Literal(_) | Expression::Null(_) | Expression::ColumnRef(_) => Ok(()),

        Expression::Cast { expr, .. } => validate_expression(expr),

        Expression::BinaryOp {
            op, left, right, ..
        } => {
            validate_expression(left)?;
            validate_expression(right)?;
            if op.is_bitwise() {
                check_operand_agreement(op.as_str(), left, right)?;
            }
            Ok(())
        }

        Expression::Comparison { op, left, right } => {
            validate_expression(left)?;
            validate_expression(right)?;
            check_operand_agreement(op.as_str(), left, right)
        }

        Expression::Case {
            conditions,
            else_result,
        } => {
            for (when, then) in conditions {
                validate_expression(when)?;
                validate_expression(then)?;
            }
            validate_expression(else_result)?;
            check_case_agreement(conditions, else_result)
        }

        Expression::FunctionCall { args, .. } => {
            for arg in args {
                validate_expression(arg)?;
            }
            Ok(())
        }
    }
}

/// Both sides must agree on bitness, and bit sides must agree on width.
fn check_operand_agreement(
    operator: &str,
    left: &Expression,
    right: &Expression,
) -> ExpressionResult<()> {
    let left_ty = left.result_type();
    let right_ty = right.result_type();
    let mismatch = match (left_ty, right_ty) {
        (SqlType::Bit { width: lw }, SqlType::Bit { width: rw }) => lw != rw,
        _ => left_ty.is_bit() != right_ty.is_bit(),
    };
    if mismatch {
        return Err(ExpressionError::OperandBitnessMismatch {
            operator: operator.to_string(),
            left: left_ty,
            right: right_ty,
        });
    }
    Ok(())
}

/// When any branch is bit typed, every non-NULL branch must carry exactly
/// the winning bit type.
fn check_case_agreement(
    conditions: &[(Expression, Expression)],
    else_result: &Expression,
) -> ExpressionResult<()> {
    let mut target = conditions
        .iter()
        .map(|(_, then)| then.result_type())
        .find(|ty| ty.is_bit());
    if target.is_none() && else_result.result_type().is_bit() {
        target = Some(else_result.result_type());
    }
    let target = match target {
        Some(ty) => ty,
        None => return Ok(()),
    };

    let branches = conditions
        .iter()
        .map(|(_, then)| then)
        .chain(std::iter::once(else_result));
    for branch in branches {
        if branch.is_null_literal() {
            continue;
        }
        if branch.result_type() != target {
            return Err(ExpressionError::CaseBranchMismatch {
                expected: target,
                found: branch.result_type(),
            });
        }
    }
    Ok(())
}
