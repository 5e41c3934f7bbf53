use regex::Regex;

use super::IgnorePaths;
use crate::OutlineError;

/// Compiled form of [`IgnorePaths`].
#[derive(Debug, Clone)]
pub struct PathFilter {
    begin_with: Vec<Regex>,
    contains: Vec<String>,
}

impl PathFilter {
    pub fn new(rules: &IgnorePaths) -> Result<Self, OutlineError> {
        let begin_with = rules
            .begin_with
            .iter()
            .map(|prefix| {
                Regex::new(&format!("^(?:{})", prefix)).map_err(|e| OutlineError::ConfigError {
                    message: format!("Invalid ignore pattern '{}': {}", prefix, e),
                    hint: Some("begin_with entries are regular expressions".into()),
                    code: Some(311),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            begin_with,
            contains: rules.contains.clone(),
        })
    }

    pub fn is_ignored(&self, path: &str) -> bool {
        self.begin_with.iter().any(|prefix| prefix.is_match(path))
            || self.contains.iter().any(|needle| path.contains(needle.as_str()))
    }
}
