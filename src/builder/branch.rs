use super::*;
use crate::ast::CaseOption;
use crate::document::CaseArm;
use crate::render::{render, render_condition, render_label};

pub(super) fn build_case(
    builder: &Builder,
    subject: &Expr,
    options: &[CaseOption],
) -> Result<Block, OutlineError> {
    let subject = render(subject);
    let options = options
        .iter()
        .map(|option| {
            Ok(CaseArm {
                label: render_label(&option.values),
                blocks: builder.build_body(&option.body)?,
            })
        })
        .collect::<Result<Vec<_>, OutlineError>>()?;

    Ok(Block::Case { subject, options })
}

pub(super) fn build_if(
    builder: &Builder,
    condition: &Expr,
    then_body: &[Statement],
    else_body: Option<&[Statement]>,
) -> Result<Block, OutlineError> {
    let condition = render_condition(condition);
    let then = builder.build_body(then_body)?;

    // An empty else is no else at all.
    let otherwise = match else_body {
        Some(body) if !body.is_empty() => Some(builder.build_body(body)?),
        _ => None,
    };

    Ok(Block::If { condition, then, otherwise })
}
