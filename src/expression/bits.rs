//! Bit cast placement repair for canonical expressions.
//!
//! PostgreSQL's `bit` type cannot mix with plain integers in bitwise
//! operators, comparisons, or CASE branches without explicit casts; emitted
//! SQL would fail to parse or quietly compare mismatched types. The
//! rewrites here repair cast placement around bit operands. Each function
//! handles a single node shape and never recurses; tree traversal belongs
//! to the caller (see [`crate::expression::rewrite`]).

use crate::expression::expr::Expression;
use crate::types::SqlType;

/// Balance the operands of a bitwise binary operator.
///
/// When exactly one operand is bit typed, the other side is cast up to the
/// bit operand's exact type; the bit side's width is authoritative and is
/// never widened or narrowed to match the plain side. Operands that already
/// agree pass through unchanged.
pub fn balance_bitwise_operands(a: Expression, b: Expression) -> (Expression, Expression) {
    let a_is_bit = a.result_type().is_bit();
    if a_is_bit ^ b.result_type().is_bit() {
        if a_is_bit {
            let target = a.result_type();
            return (a, Expression::cast(b, target));
        }
        let target = b.result_type();
        return (Expression::cast(a, target), b);
    }
    (a, b)
}

/// Normalize the operands of a comparison involving bit values.
///
/// An upstream pass may have wrapped a bit operand in an integer cast,
/// masking its true type, so `CAST("flags" AS int4) = 1` first becomes
/// `"flags" = 1`. The uncovered pair is then rebalanced exactly like
/// bitwise operands, yielding `"flags" = CAST(1 AS bit(8))`. Stripping must
/// run before rebalancing or the cast direction is decided on stale types.
pub fn normalize_comparison_operands(
    left: Expression,
    right: Expression,
) -> (Expression, Expression) {
    let (left, right) = strip_redundant_bit_casts(left, right);
    balance_bitwise_operands(left, right)
}

/// Unwrap comparison operands that are casts over an already bit typed
/// expression. The outer cast target is deliberately not consulted, so two
/// strippable sides are both unwrapped even if their targets differ.
fn strip_redundant_bit_casts(left: Expression, right: Expression) -> (Expression, Expression) {
    let left_strippable = is_cast_of_bit(&left);
    let right_strippable = is_cast_of_bit(&right);

    if left_strippable {
        if right_strippable {
            (unwrap_cast(left), unwrap_cast(right))
        } else {
            (unwrap_cast(left), right)
        }
    } else if right_strippable {
        (left, unwrap_cast(right))
    } else {
        (left, right)
    }
}

fn is_cast_of_bit(expr: &Expression) -> bool {
    matches!(expr, Expression::Cast { expr, .. } if expr.result_type().is_bit())
}

fn unwrap_cast(expr: Expression) -> Expression {
    match expr {
        Expression::Cast { expr, .. } => *expr,
        other => other,
    }
}

/// Normalize the branches of a CASE expression containing bit values.
///
/// All branches of a CASE must share one result type, and distinct bit
/// widths are distinct types. The first bit typed THEN branch decides the
/// winning type, falling back to the ELSE branch; every branch that is not
/// exactly that type is cast to it. Typed NULL branches pass through uncast
/// since NULL is type agnostic in emitted SQL. A CASE with no bit typed
/// branch, or any other node shape, is returned unchanged.
pub fn normalize_case_branches(expr: Expression) -> Expression {
    let (conditions, else_result) = match expr {
        Expression::Case {
            conditions,
            else_result,
        } => (conditions, else_result),
        other => return other,
    };

    let mut target = conditions
        .iter()
        .map(|(_, then)| then.result_type())
        .find(|ty| ty.is_bit());
    if target.is_none() && else_result.result_type().is_bit() {
        target = Some(else_result.result_type());
    }
    let target = match target {
        Some(ty) => ty,
        None => {
            return Expression::Case {
                conditions,
                else_result,
            }
        }
    };

    let conditions = conditions
        .into_iter()
        .map(|(when, then)| (when, cast_to_bit_if_needed(then, target)))
        .collect();
    let else_result = Box::new(cast_to_bit_if_needed(*else_result, target));

    Expression::Case {
        conditions,
        else_result,
    }
}

fn cast_to_bit_if_needed(expr: Expression, target: SqlType) -> Expression {
    if expr.is_null_literal() || expr.result_type() == target {
        return expr;
    }
    Expression::cast(expr, target)
}
