// Author: Dustin Pilgrim
// License: MIT

use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::assemble::Outliner;
use crate::ast::Unit;
use crate::config::OutlineConfig;
use crate::document::Document;
use crate::OutlineError;

static TRAILING_SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[/\\]+$").expect("trailing separator pattern is valid"));

/// Turns manifest source into class and node definitions.
///
/// This crate ships no parser of its own; plug one in here. Closures with
/// the same shape work too.
pub trait ManifestParser {
    fn parse(&self, source: &str, path: &Path) -> Result<Vec<Unit>, OutlineError>;
}

impl<F> ManifestParser for F
where
    F: Fn(&str, &Path) -> Result<Vec<Unit>, OutlineError>,
{
    fn parse(&self, source: &str, path: &Path) -> Result<Vec<Unit>, OutlineError> {
        self(source, path)
    }
}

/// Find every manifest below `paths`.
///
/// Directories are searched recursively for files with the configured
/// extension, explicit files are taken as they are, and paths that do not
/// exist are skipped. Ignore rules apply last.
pub fn collect_manifests<P: AsRef<Path>>(
    paths: &[P],
    config: &OutlineConfig,
) -> Result<Vec<PathBuf>, OutlineError> {
    let filter = config.path_filter()?;
    let mut found = Vec::new();

    for path in paths {
        let raw = path.as_ref().to_string_lossy();
        let trimmed = TRAILING_SEPARATORS.replace(&raw, "");
        let path = if trimmed.is_empty() {
            PathBuf::from(&*raw)
        } else {
            PathBuf::from(&*trimmed)
        };

        if path.is_dir() {
            collect_dir(&path, &config.extension, &mut found)?;
        } else if path.exists() {
            found.push(path);
        } else {
            debug!(path = %path.display(), "skipping missing path");
        }
    }

    found.retain(|path| {
        let ignored = filter.is_ignored(&path.to_string_lossy());
        if ignored {
            debug!(path = %path.display(), "ignoring manifest");
        }
        !ignored
    });
    Ok(found)
}

fn collect_dir(dir: &Path, extension: &str, found: &mut Vec<PathBuf>) -> Result<(), OutlineError> {
    let read_error = |e: std::io::Error| OutlineError::FileError {
        message: format!("Failed to read directory: {}", e),
        path: dir.to_string_lossy().to_string(),
        hint: Some("Check that the directory is readable".into()),
        code: Some(304),
    };

    // `file_type` does not follow symlinks, so a link back to an ancestor
    // cannot send the walk around in circles.
    let mut entries = fs::read_dir(dir)
        .map_err(read_error)?
        .map(|entry| entry.and_then(|e| Ok((e.path(), e.file_type()?))))
        .collect::<Result<Vec<_>, _>>()
        .map_err(read_error)?;
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    for (entry, file_type) in entries {
        if file_type.is_dir() {
            collect_dir(&entry, extension, found)?;
        } else if file_type.is_symlink() && entry.is_dir() {
            debug!(path = %entry.display(), "not following directory symlink");
        } else if entry.extension().is_some_and(|ext| ext == extension) {
            found.push(entry);
        }
    }
    Ok(())
}

/// Discover, parse and outline manifests into one document, in discovery order.
pub fn outline_files<P, M>(paths: &[P], parser: &M, config: &OutlineConfig) -> Result<Document, OutlineError>
where
    P: AsRef<Path>,
    M: ManifestParser + ?Sized,
{
    let outliner = Outliner::new(config.clone());
    let mut document = Document::new();

    for file in collect_manifests(paths, config)? {
        debug!(path = %file.display(), "parsing manifest");
        let source = fs::read_to_string(&file).map_err(|e| OutlineError::FileError {
            message: format!("Failed to read file: {}", e),
            path: file.to_string_lossy().to_string(),
            hint: None,
            code: Some(303),
        })?;

        let units = parser
            .parse(&source, &file)
            .map_err(|e| parse_failure(e, &file))?;
        for unit in &units {
            outliner.outline_unit(unit, &mut document)?;
        }
    }

    Ok(document)
}

fn parse_failure(error: OutlineError, file: &Path) -> OutlineError {
    match error {
        OutlineError::RuntimeError { message, hint, .. } => OutlineError::ParseError {
            message,
            path: file.to_string_lossy().to_string(),
            hint,
            code: Some(320),
        },
        other => other,
    }
}
