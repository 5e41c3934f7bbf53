// Author: Dustin Pilgrim
// License: MIT

use indexmap::IndexMap;
use tracing::{trace, warn};

use crate::ast::{Expr, Param, ResourceInstance, Statement};
use crate::config::{IncludePolicy, OutlineConfig};
use crate::document::{Block, BlockList, Parameters, ResourceGroup};
use crate::render::{render_list, render_value, strip_quotes};
use crate::OutlineError;

mod branch;

/// Classifies statements into blocks, merging each one into the tail of
/// the block list when the kinds match.
pub struct Builder<'a> {
    config: &'a OutlineConfig,
}

impl<'a> Builder<'a> {
    pub fn new(config: &'a OutlineConfig) -> Self {
        Self { config }
    }

    /// Builds a body into a fresh block list.
    pub fn build_body(&self, statements: &[Statement]) -> Result<BlockList, OutlineError> {
        let mut blocks = BlockList::new();
        for statement in statements {
            self.classify(statement, &mut blocks)?;
        }
        Ok(blocks)
    }

    /// Appends `statement` to `blocks`, or merges it into the last block
    /// when that block is of the same kind. Case and If always append.
    pub fn classify(&self, statement: &Statement, blocks: &mut BlockList) -> Result<(), OutlineError> {
        match statement {
            Statement::VarDef { name, value } => {
                let value = render_value(value.as_ref());
                blocks.merge_or_push(Block::Variables(IndexMap::from([(name.clone(), value)])));
            }
            Statement::Resource { type_name, instances } => {
                self.add_resource(type_name, instances, blocks)?;
            }
            Statement::ResourceOverride { target, parameters } => {
                let parameters = parameters.as_deref().ok_or_else(|| {
                    OutlineError::structural(
                        format!("override of {} has no parameter list", target),
                        403,
                    )
                })?;
                let rendered = render_parameters(parameters);
                blocks.merge_or_push(Block::ResourceOverrides(IndexMap::from([(
                    target.to_string(),
                    rendered,
                )])));
            }
            Statement::ResourceDefaults { type_name, parameters } => {
                let parameters = parameters.as_deref().ok_or_else(|| {
                    OutlineError::structural(
                        format!("defaults for {} have no parameter list", type_name),
                        404,
                    )
                })?;
                let rendered = render_parameters(parameters);
                blocks.merge_or_push(Block::ResourceDefaults(IndexMap::from([(
                    type_name.clone(),
                    rendered,
                )])));
            }
            Statement::Case { subject, options } => {
                blocks.push(branch::build_case(self, subject, options)?);
            }
            Statement::If { condition, then_body, else_body } => {
                blocks.push(branch::build_if(self, condition, then_body, else_body.as_deref())?);
            }
            Statement::Call { name, arguments } => {
                self.add_call(name, arguments, blocks);
            }
            Statement::Unrecognized(kind) => {
                trace!(kind = %kind, "skipping unrecognized statement");
            }
        }
        Ok(())
    }

    fn add_resource(
        &self,
        type_name: &str,
        instances: &[ResourceInstance],
        blocks: &mut BlockList,
    ) -> Result<(), OutlineError> {
        // Validate every instance before touching the block list.
        let mut declared: Vec<(String, Parameters)> = Vec::new();
        for instance in instances {
            let title = instance.title.as_ref().ok_or_else(|| {
                OutlineError::structural(
                    format!("'{}' resource instance has no title", type_name),
                    401,
                )
            })?;
            let parameters = instance.parameters.as_deref().ok_or_else(|| {
                OutlineError::structural(
                    format!("'{}' resource {} has no parameter list", type_name, title),
                    402,
                )
            })?;

            let rendered = render_parameters(parameters);
            for title in render_list(title) {
                declared.push((strip_quotes(&title).to_string(), rendered.clone()));
            }
        }

        if declared.is_empty() {
            trace!(resource = %type_name, "resource declares no instances");
            return Ok(());
        }

        if self.config.class_declarations_as_includes && type_name.eq_ignore_ascii_case("class") {
            let classes = declared.into_iter().map(|(title, _)| title).collect();
            self.add_includes(classes, blocks);
            return Ok(());
        }

        blocks.merge_or_push(Block::Resources(vec![ResourceGroup {
            type_name: type_name.to_string(),
            instances: declared.into_iter().collect(),
        }]));
        Ok(())
    }

    fn add_call(&self, name: &str, arguments: &[Expr], blocks: &mut BlockList) {
        if name != "include" {
            trace!(directive = %name, "dropping directive call");
            return;
        }

        let classes: Vec<String> = arguments
            .iter()
            .flat_map(render_list)
            .map(|class| strip_quotes(&class).to_string())
            .collect();

        if classes.is_empty() {
            warn!("include called without arguments");
            return;
        }
        self.add_includes(classes, blocks);
    }

    fn add_includes(&self, classes: Vec<String>, blocks: &mut BlockList) {
        match self.config.include_policy {
            IncludePolicy::MergeAdjacent => blocks.merge_or_push(Block::Includes(classes)),
            IncludePolicy::AlwaysNew => blocks.push(Block::Includes(classes)),
        }
    }
}

fn render_parameters(parameters: &[Param]) -> Parameters {
    parameters
        .iter()
        .map(|param| (param.name.clone(), render_value(Some(&param.value))))
        .collect()
}
