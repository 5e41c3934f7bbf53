// Author: Dustin Pilgrim
// License: MIT

use std::path::Path;

use crate::config::OutlineConfig;
use crate::document::{BlockList, Document};
use crate::walk::{self, ManifestParser};
use crate::OutlineError;

/// Export an outline document to pretty-printed JSON.
///
/// Layout:
/// - `classes` and `nodes` map each class or node name to its list of
///   blocks; a class and a node may share a name
/// - every block is a single-key object named after its kind
///   (`arguments`, `variables`, `resources`, `resource_overrides`,
///   `resource_defaults`, `case`, `if`, `includes`)
/// - `case` options are a list of single-key `{label: blocks}` objects, so
///   a repeated label keeps every option
/// - `resources` is a list of single-key `{type: {title: {param: value}}}`
///   objects so a type can appear again after another type
/// - absent values are JSON `null`, arrays stay arrays
/// - `parents` maps inheriting classes to their parent and is left out
///   when no class inherits
///
/// # Examples
/// ```
/// use manifest_outline::export::export_document_to_json;
/// use manifest_outline::Document;
///
/// let json = export_document_to_json(&Document::new()).unwrap();
/// assert!(json.contains("\"classes\""));
/// assert!(json.contains("\"nodes\""));
/// ```
pub fn export_document_to_json(doc: &Document) -> Result<String, OutlineError> {
    serde_json::to_string_pretty(doc).map_err(|e| OutlineError::RuntimeError {
        message: format!("Failed to serialize document: {}", e),
        hint: None,
        code: Some(500),
    })
}

/// Export the blocks of a single class.
pub fn export_class_to_json(doc: &Document, class: &str) -> Result<String, OutlineError> {
    export_blocks(doc.class(class), "class", class)
}

/// Export the blocks of a single node.
pub fn export_node_to_json(doc: &Document, node: &str) -> Result<String, OutlineError> {
    export_blocks(doc.node(node), "node", node)
}

fn export_blocks(blocks: Option<&BlockList>, kind: &str, name: &str) -> Result<String, OutlineError> {
    let blocks = blocks.ok_or_else(|| OutlineError::RuntimeError {
        message: format!("No {} named '{}'", kind, name),
        hint: Some("Names are matched exactly, including any '::' prefix".into()),
        code: Some(501),
    })?;

    serde_json::to_string_pretty(blocks).map_err(|e| OutlineError::RuntimeError {
        message: format!("Failed to serialize {} '{}': {}", kind, name, e),
        hint: None,
        code: Some(500),
    })
}

/// Discover, outline and export manifests in one call.
pub fn export_manifests<P, M>(paths: &[P], parser: &M, config: &OutlineConfig) -> Result<String, OutlineError>
where
    P: AsRef<Path>,
    M: ManifestParser + ?Sized,
{
    let doc = walk::outline_files(paths, parser, config)?;
    export_document_to_json(&doc)
}
