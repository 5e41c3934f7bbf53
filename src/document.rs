// Author: Dustin Pilgrim
// License: MIT

use std::ops::Deref;

use indexmap::IndexMap;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// A rendered value. `Null` stands for an absent value and is distinct
/// from an empty string.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    String(String),
    List(Vec<String>),
}

pub type Parameters = IndexMap<String, Value>;

/// All instances of one resource type declared back to back.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceGroup {
    pub type_name: String,
    pub instances: IndexMap<String, Parameters>,
}

// A single-entry map keeps repeated, non-adjacent types apart.
impl Serialize for ResourceGroup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.type_name, &self.instances)?;
        map.end()
    }
}

/// One option of a case statement: its rendered label and its body.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseArm {
    pub label: String,
    pub blocks: BlockList,
}

// Same single-entry shape as ResourceGroup; a repeated label stays a
// separate entry.
impl Serialize for CaseArm {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.label, &self.blocks)?;
        map.end()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Arguments,
    Variables,
    Resources,
    ResourceOverrides,
    ResourceDefaults,
    Case,
    If,
    Includes,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Block {
    Arguments(IndexMap<String, String>),
    Variables(IndexMap<String, Value>),
    Resources(Vec<ResourceGroup>),
    ResourceOverrides(IndexMap<String, Parameters>),
    ResourceDefaults(IndexMap<String, Parameters>),
    Case {
        subject: String,
        options: Vec<CaseArm>,
    },
    If {
        condition: String,
        then: BlockList,
        #[serde(rename = "else", skip_serializing_if = "Option::is_none")]
        otherwise: Option<BlockList>,
    },
    Includes(Vec<String>),
}

impl Block {
    pub fn kind(&self) -> BlockKind {
        match self {
            Block::Arguments(_) => BlockKind::Arguments,
            Block::Variables(_) => BlockKind::Variables,
            Block::Resources(_) => BlockKind::Resources,
            Block::ResourceOverrides(_) => BlockKind::ResourceOverrides,
            Block::ResourceDefaults(_) => BlockKind::ResourceDefaults,
            Block::Case { .. } => BlockKind::Case,
            Block::If { .. } => BlockKind::If,
            Block::Includes(_) => BlockKind::Includes,
        }
    }

    /// Folds `other` into this block when both are of the same mergeable
    /// kind. Otherwise `other` comes back untouched.
    ///
    /// Later keys overwrite earlier ones; resource groups of the same type
    /// merge only when they meet at the seam.
    fn absorb(&mut self, other: Block) -> Option<Block> {
        match (self, other) {
            (Block::Arguments(into), Block::Arguments(from)) => {
                into.extend(from);
                None
            }
            (Block::ResourceOverrides(into), Block::ResourceOverrides(from))
            | (Block::ResourceDefaults(into), Block::ResourceDefaults(from)) => {
                into.extend(from);
                None
            }
            (Block::Variables(into), Block::Variables(from)) => {
                into.extend(from);
                None
            }
            (Block::Resources(into), Block::Resources(from)) => {
                for group in from {
                    let seam = into
                        .len()
                        .checked_sub(1)
                        .filter(|&i| into[i].type_name == group.type_name);
                    match seam {
                        Some(i) => into[i].instances.extend(group.instances),
                        None => into.push(group),
                    }
                }
                None
            }
            (Block::Includes(into), Block::Includes(from)) => {
                into.extend(from);
                None
            }
            (_, other) => Some(other),
        }
    }
}

/// The outline of one class or node body, in source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BlockList(Vec<Block>);

impl BlockList {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn into_inner(self) -> Vec<Block> {
        self.0
    }

    /// Appends `block` without looking at the tail.
    pub(crate) fn push(&mut self, block: Block) {
        self.0.push(block);
    }

    /// Merges `block` into the last block when their kinds match, appends
    /// it otherwise. Case and If never merge.
    pub(crate) fn merge_or_push(&mut self, block: Block) {
        let rest = match self.0.last_mut() {
            Some(last) => last.absorb(block),
            None => Some(block),
        };
        if let Some(block) = rest {
            self.0.push(block);
        }
    }
}

impl Deref for BlockList {
    type Target = [Block];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Outlines for every class and every node seen, each in discovery order.
///
/// Classes and nodes live apart, so a node may share its name with a class.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Document {
    pub classes: IndexMap<String, BlockList>,
    pub nodes: IndexMap<String, BlockList>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub parents: IndexMap<String, String>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn class(&self, name: &str) -> Option<&BlockList> {
        self.classes.get(name)
    }

    pub fn node(&self, name: &str) -> Option<&BlockList> {
        self.nodes.get(name)
    }

    pub fn parent_of(&self, class: &str) -> Option<&str> {
        self.parents.get(class).map(String::as_str)
    }

    /// Number of classes plus nodes.
    pub fn len(&self) -> usize {
        self.classes.len() + self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.nodes.is_empty()
    }
}
