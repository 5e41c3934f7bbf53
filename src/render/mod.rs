// Author: Dustin Pilgrim
// License: MIT

//! Turns value nodes into the strings and string lists stored in an outline.
//!
//! Rendering never fails: a node shape without a dedicated rule falls back
//! to its default text form with enclosing quotes removed.

use crate::ast::{Expr, Fragment};
use crate::document::Value;

mod condition;

pub use condition::render_condition;

/// Removes the enclosing quote marks from both ends of `text`.
///
/// Double quotes, single quotes and escaped double quotes (`\"`) all count.
/// The whole run of marks on each end is one layer, so stripping twice is
/// the same as stripping once.
pub fn strip_quotes(text: &str) -> &str {
    let mut s = text;
    while let Some(rest) = s
        .strip_prefix("\\\"")
        .or_else(|| s.strip_prefix('"'))
        .or_else(|| s.strip_prefix('\''))
    {
        s = rest;
    }
    while let Some(rest) = s
        .strip_suffix("\\\"")
        .or_else(|| s.strip_suffix('"'))
        .or_else(|| s.strip_suffix('\''))
    {
        s = rest;
    }
    s
}

/// Renders a value node as a single string.
pub fn render(expr: &Expr) -> String {
    match expr {
        Expr::Interpolated(fragments) => render_interpolated(fragments),
        other => strip_quotes(&other.to_string()).to_string(),
    }
}

fn render_interpolated(fragments: &[Fragment]) -> String {
    let mut out = String::new();
    for fragment in fragments {
        match fragment {
            Fragment::Text(text) => out.push_str(text),
            Fragment::Variable(name) => {
                out.push_str("${");
                out.push_str(name);
                out.push('}');
            }
        }
    }
    out.retain(|c| c != '"');
    out
}

/// Renders a node as an ordered list of strings. Arrays yield one entry per
/// element, anything else a single entry.
pub fn render_list(expr: &Expr) -> Vec<String> {
    match expr {
        Expr::Array(items) => items
            .iter()
            .map(|item| strip_quotes(&render(item)).to_string())
            .collect(),
        other => vec![render(other)],
    }
}

/// Renders an optional value node. A missing node or `undef` is `Null`.
pub fn render_value(expr: Option<&Expr>) -> Value {
    match expr {
        None | Some(Expr::Undef) => Value::Null,
        Some(array @ Expr::Array(_)) => Value::List(render_list(array)),
        Some(other) => Value::String(render(other)),
    }
}

/// Renders a class parameter default. String defaults keep exactly one
/// layer of double quotes so they read differently from bare numbers and
/// booleans; a parameter without a default renders empty.
pub fn render_default(expr: Option<&Expr>) -> String {
    match expr {
        None => String::new(),
        Some(string @ (Expr::String(_) | Expr::Interpolated(_))) => {
            format!("\"{}\"", render(string))
        }
        Some(other) => other.to_string(),
    }
}

/// Joins every matched value of a case option with `", "`.
pub fn render_label(values: &[Expr]) -> String {
    values.iter().map(render).collect::<Vec<_>>().join(", ")
}
