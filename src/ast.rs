// Author: Dustin Pilgrim
// License: MIT

use std::fmt;

/// A value node handed over by the manifest parser.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    String(String), // as written, quotes included
    Bare(String),   // names, numbers, booleans, `default`
    Variable(String),
    Interpolated(Vec<Fragment>),
    Array(Vec<Expr>),
    Binary {
        left: Box<Expr>,
        operator: String,
        right: Box<Expr>,
    },
    Reference {
        type_name: String,
        titles: Vec<Expr>,
    },
    Undef,
    Raw(String), // any other node, known only by its text
}

#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    Text(String),
    Variable(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResourceInstance {
    pub title: Option<Expr>,
    pub parameters: Option<Vec<Param>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaseOption {
    pub values: Vec<Expr>,
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    VarDef {
        name: String,
        value: Option<Expr>,
    },
    Resource {
        type_name: String,
        instances: Vec<ResourceInstance>,
    },
    ResourceOverride {
        target: Expr,
        parameters: Option<Vec<Param>>,
    },
    ResourceDefaults {
        type_name: String,
        parameters: Option<Vec<Param>>,
    },
    Case {
        subject: Expr,
        options: Vec<CaseOption>,
    },
    If {
        condition: Expr,
        then_body: Vec<Statement>,
        else_body: Option<Vec<Statement>>,
    },
    Call {
        name: String,
        arguments: Vec<Expr>,
    },
    Unrecognized(String), // relationships, collectors, ...
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassParam {
    pub name: String,
    pub default: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassDef {
    pub name: String,
    pub parent: Option<String>,
    pub parameters: Vec<ClassParam>,
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeDef {
    pub name: String,
    pub body: Option<Vec<Statement>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Unit {
    Class(ClassDef),
    Node(NodeDef),
}

impl Unit {
    pub fn name(&self) -> &str {
        match self {
            Unit::Class(class) => &class.name,
            Unit::Node(node) => &node.name,
        }
    }
}

impl Expr {
    pub fn string(text: impl Into<String>) -> Self {
        Expr::String(text.into())
    }

    pub fn bare(text: impl Into<String>) -> Self {
        Expr::Bare(text.into())
    }

    pub fn var(name: impl Into<String>) -> Self {
        Expr::Variable(name.into())
    }

    pub fn binary(left: Expr, operator: impl Into<String>, right: Expr) -> Self {
        Expr::Binary {
            left: Box::new(left),
            operator: operator.into(),
            right: Box::new(right),
        }
    }
}

impl Param {
    pub fn new(name: impl Into<String>, value: Expr) -> Self {
        Self { name: name.into(), value }
    }
}

/// The node's default text form, close to how it was written in the manifest.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::String(text) | Expr::Bare(text) | Expr::Raw(text) => f.write_str(text),
            Expr::Variable(name) => write!(f, "${}", name),
            Expr::Interpolated(fragments) => {
                f.write_str("\"")?;
                for fragment in fragments {
                    match fragment {
                        Fragment::Text(text) => f.write_str(text)?,
                        Fragment::Variable(name) => write!(f, "${{{}}}", name)?,
                    }
                }
                f.write_str("\"")
            }
            Expr::Array(items) => {
                f.write_str("[")?;
                write_joined(f, items)?;
                f.write_str("]")
            }
            Expr::Binary { left, operator, right } => {
                write!(f, "({} {} {})", left, operator, right)
            }
            Expr::Reference { type_name, titles } => {
                write!(f, "{}[", type_name)?;
                write_joined(f, titles)?;
                f.write_str("]")
            }
            Expr::Undef => f.write_str("undef"),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, items: &[Expr]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}
