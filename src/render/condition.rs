use super::*;

/// Renders an `if` condition.
///
/// Binary and logical nodes are unwound along their left operands, so
/// `(($a == 1) and $b)` reads `$a == 1 and $b`. A right operand is written
/// in its own text form and keeps its parentheses when it is compound.
pub fn render_condition(condition: &Expr) -> String {
    let mut tail = String::new();
    let mut current = condition;

    while let Expr::Binary { left, operator, right } = current {
        tail = format!(" {} {}{}", operator, right, tail);
        current = &**left;
    }

    format!("{}{}", current, tail)
}
