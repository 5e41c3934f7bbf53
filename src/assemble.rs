// Author: Dustin Pilgrim
// License: MIT

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::ast::{ClassDef, NodeDef, Unit};
use crate::builder::Builder;
use crate::config::OutlineConfig;
use crate::document::{Block, BlockList, Document};
use crate::render::render_default;
use crate::OutlineError;

/// Builds outlines for classes and nodes.
///
/// # Examples
/// ```
/// use manifest_outline::ast::{ClassDef, ClassParam, Expr, Unit};
/// use manifest_outline::{Block, Outliner};
///
/// let class = Unit::Class(ClassDef {
///     name: "ntp".into(),
///     parent: None,
///     parameters: vec![ClassParam { name: "servers".into(), default: None }],
///     body: vec![],
/// });
///
/// let document = Outliner::default().outline(&[class]).unwrap();
/// let blocks = document.class("ntp").unwrap();
/// assert!(matches!(&blocks[0], Block::Arguments(args) if args["servers"].is_empty()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Outliner {
    config: OutlineConfig,
}

impl Outliner {
    pub fn new(config: OutlineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OutlineConfig {
        &self.config
    }

    /// A class always starts with its Arguments block, even without parameters.
    pub fn outline_class(&self, class: &ClassDef) -> Result<BlockList, OutlineError> {
        let arguments: IndexMap<String, String> = class
            .parameters
            .iter()
            .map(|param| (param.name.clone(), render_default(param.default.as_ref())))
            .collect();

        let mut blocks = BlockList::new();
        blocks.push(Block::Arguments(arguments));

        let builder = Builder::new(&self.config);
        for statement in &class.body {
            builder
                .classify(statement, &mut blocks)
                .map_err(|e| e.in_unit(&class.name))?;
        }
        Ok(blocks)
    }

    pub fn outline_node(&self, node: &NodeDef) -> Result<BlockList, OutlineError> {
        match &node.body {
            Some(body) => Builder::new(&self.config)
                .build_body(body)
                .map_err(|e| e.in_unit(&node.name)),
            None => Ok(BlockList::new()),
        }
    }

    /// Outline `unit` into `document`. Classes and nodes are kept apart;
    /// a class or node seen before keeps its place and takes the new content.
    pub fn outline_unit(&self, unit: &Unit, document: &mut Document) -> Result<(), OutlineError> {
        match unit {
            Unit::Class(class) => {
                debug!(class = %class.name, statements = class.body.len(), "outlining class");
                let blocks = self.outline_class(class)?;
                match &class.parent {
                    Some(parent) => {
                        document.parents.insert(class.name.clone(), parent.clone());
                    }
                    None => {
                        document.parents.shift_remove(&class.name);
                    }
                }
                if document.classes.insert(class.name.clone(), blocks).is_some() {
                    warn!(class = %class.name, "class defined more than once; keeping the last definition");
                }
            }
            Unit::Node(node) => {
                debug!(node = %node.name, "outlining node");
                let blocks = self.outline_node(node)?;
                if document.nodes.insert(node.name.clone(), blocks).is_some() {
                    warn!(node = %node.name, "node defined more than once; keeping the last definition");
                }
            }
        }
        Ok(())
    }

    pub fn outline(&self, units: &[Unit]) -> Result<Document, OutlineError> {
        let mut document = Document::new();
        for unit in units {
            self.outline_unit(unit, &mut document)?;
        }
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{ClassParam, Expr, Param, ResourceInstance, Statement};
    use crate::config::IncludePolicy;
    use crate::document::{BlockKind, Value};
    use pretty_assertions::assert_eq;

    fn class(name: &str, parameters: Vec<ClassParam>, body: Vec<Statement>) -> ClassDef {
        ClassDef { name: name.into(), parent: None, parameters, body }
    }

    #[test]
    fn test_empty_class_yields_only_arguments() {
        let blocks = Outliner::default()
            .outline_class(&class("empty", vec![], vec![]))
            .unwrap();
        assert_eq!(blocks.into_inner(), vec![Block::Arguments(IndexMap::new())]);
    }

    #[test]
    fn test_class_arguments_render_defaults() {
        let params = vec![
            ClassParam { name: "port".into(), default: Some(Expr::bare("80")) },
            ClassParam { name: "ensure".into(), default: Some(Expr::string("'present'")) },
            ClassParam { name: "servers".into(), default: None },
            ClassParam { name: "enable".into(), default: Some(Expr::bare("true")) },
        ];
        let blocks = Outliner::default()
            .outline_class(&class("svc", params, vec![]))
            .unwrap();

        let Block::Arguments(args) = &blocks[0] else {
            panic!("Expected Arguments first");
        };
        let pairs: Vec<(&str, &str)> = args.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        assert_eq!(
            pairs,
            vec![("port", "80"), ("ensure", "\"present\""), ("servers", ""), ("enable", "true")]
        );
    }

    #[test]
    fn test_arguments_block_is_never_merged_into() {
        let body = vec![Statement::VarDef { name: "a".into(), value: Some(Expr::bare("1")) }];
        let blocks = Outliner::default()
            .outline_class(&class("c", vec![], body))
            .unwrap();
        let kinds: Vec<BlockKind> = blocks.iter().map(Block::kind).collect();
        assert_eq!(kinds, vec![BlockKind::Arguments, BlockKind::Variables]);
    }

    #[test]
    fn test_node_without_body_is_empty() {
        let node = NodeDef { name: "web01".into(), body: None };
        assert!(Outliner::default().outline_node(&node).unwrap().is_empty());

        let node = NodeDef { name: "web02".into(), body: Some(vec![]) };
        assert!(Outliner::default().outline_node(&node).unwrap().is_empty());
    }

    #[test]
    fn test_node_has_no_arguments_block() {
        let node = NodeDef {
            name: "db01".into(),
            body: Some(vec![Statement::Call {
                name: "include".into(),
                arguments: vec![Expr::string("'mysql'")],
            }]),
        };
        let blocks = Outliner::default().outline_node(&node).unwrap();
        assert_eq!(blocks.into_inner(), vec![Block::Includes(vec!["mysql".into()])]);
    }

    #[test]
    fn test_document_keeps_discovery_order_and_parents() {
        let units = vec![
            Unit::Node(NodeDef { name: "default".into(), body: None }),
            Unit::Class(ClassDef {
                name: "apache::ssl".into(),
                parent: Some("apache".into()),
                parameters: vec![],
                body: vec![],
            }),
            Unit::Class(class("apache", vec![], vec![])),
        ];

        let document = Outliner::default().outline(&units).unwrap();
        let classes: Vec<&str> = document.classes.keys().map(String::as_str).collect();
        assert_eq!(classes, vec!["apache::ssl", "apache"]);
        let nodes: Vec<&str> = document.nodes.keys().map(String::as_str).collect();
        assert_eq!(nodes, vec!["default"]);
        assert_eq!(document.parent_of("apache::ssl"), Some("apache"));
        assert_eq!(document.parent_of("apache"), None);
    }

    #[test]
    fn test_redefined_unit_keeps_position() {
        let units = vec![
            Unit::Class(ClassDef {
                name: "a".into(),
                parent: Some("base".into()),
                parameters: vec![],
                body: vec![],
            }),
            Unit::Class(class("b", vec![], vec![])),
            Unit::Class(class(
                "a",
                vec![],
                vec![Statement::VarDef { name: "x".into(), value: None }],
            )),
        ];

        let document = Outliner::default().outline(&units).unwrap();
        assert_eq!(document.len(), 2);
        assert_eq!(document.classes.get_index(0).map(|(k, _)| k.as_str()), Some("a"));
        assert_eq!(document.class("a").unwrap().len(), 2);
        assert_eq!(document.parent_of("a"), None);
    }

    #[test]
    fn test_class_and_node_with_same_name_both_survive() {
        let units = vec![
            Unit::Class(class(
                "db",
                vec![],
                vec![Statement::VarDef { name: "port".into(), value: Some(Expr::bare("5432")) }],
            )),
            Unit::Node(NodeDef {
                name: "db".into(),
                body: Some(vec![Statement::Call {
                    name: "include".into(),
                    arguments: vec![Expr::string("'base'")],
                }]),
            }),
        ];

        let document = Outliner::default().outline(&units).unwrap();
        assert_eq!(document.len(), 2);

        let class_blocks = document.class("db").expect("class db kept");
        let kinds: Vec<BlockKind> = class_blocks.iter().map(Block::kind).collect();
        assert_eq!(kinds, vec![BlockKind::Arguments, BlockKind::Variables]);

        let node_blocks = document.node("db").expect("node db kept");
        assert_eq!(node_blocks.clone().into_inner(), vec![Block::Includes(vec!["base".into()])]);
    }

    #[test]
    fn test_structural_violation_names_unit() {
        let body = vec![Statement::Resource {
            type_name: "file".into(),
            instances: vec![ResourceInstance { title: None, parameters: Some(vec![]) }],
        }];
        let err = Outliner::default()
            .outline(&[Unit::Class(class("broken", vec![], body))])
            .unwrap_err();

        match err {
            OutlineError::StructuralViolation { unit, .. } => {
                assert_eq!(unit.as_deref(), Some("broken"));
            }
            other => panic!("Expected StructuralViolation, got {:?}", other),
        }
    }

    #[test]
    fn test_config_reaches_nested_bodies() {
        let include = |class: &str| Statement::Call {
            name: "include".into(),
            arguments: vec![Expr::string(format!("'{}'", class))],
        };
        let node = NodeDef {
            name: "n".into(),
            body: Some(vec![Statement::If {
                condition: Expr::var("x"),
                then_body: vec![include("a"), include("b")],
                else_body: None,
            }]),
        };
        let outliner = Outliner::new(OutlineConfig {
            include_policy: IncludePolicy::AlwaysNew,
            ..OutlineConfig::default()
        });

        let blocks = outliner.outline_node(&node).unwrap();
        let Block::If { then, .. } = &blocks[0] else {
            panic!("Expected If");
        };
        assert_eq!(then.len(), 2);
    }

    #[test]
    fn test_full_class_outline() {
        let body = vec![
            Statement::VarDef { name: "conf".into(), value: Some(Expr::string("'/etc/ntp.conf'")) },
            Statement::Resource {
                type_name: "package".into(),
                instances: vec![ResourceInstance {
                    title: Some(Expr::string("'ntp'")),
                    parameters: Some(vec![Param::new("ensure", Expr::var("ensure"))]),
                }],
            },
            Statement::Resource {
                type_name: "service".into(),
                instances: vec![ResourceInstance {
                    title: Some(Expr::string("'ntpd'")),
                    parameters: Some(vec![Param::new("require", Expr::Reference {
                        type_name: "Package".into(),
                        titles: vec![Expr::string("'ntp'")],
                    })]),
                }],
            },
        ];
        let blocks = Outliner::default()
            .outline_class(&class("ntp", vec![], body))
            .unwrap();

        assert_eq!(blocks.len(), 3);
        let Block::Resources(groups) = &blocks[2] else {
            panic!("Expected Resources");
        };
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].instances["ntp"]["ensure"], Value::String("$ensure".into()));
        assert_eq!(
            groups[1].instances["ntpd"]["require"],
            Value::String("Package['ntp']".into())
        );
    }
}
