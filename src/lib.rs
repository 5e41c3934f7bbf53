pub mod assemble;
pub mod ast;
pub mod builder;
pub mod config;
pub mod document;
pub mod error;
pub mod export;
pub mod render;
pub mod walk;

pub use assemble::Outliner;
pub use ast::Unit;
pub use config::OutlineConfig;
pub use document::{Block, BlockList, Document, Value};
pub use error::OutlineError;

/// Outline `units` with the default configuration.
pub fn outline(units: &[Unit]) -> Result<Document, OutlineError> {
    Outliner::default().outline(units)
}
