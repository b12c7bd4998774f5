use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use tree_sitter::{Language, Parser, Tree};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::{should_include_file, OutlineConfig};
use crate::errors::{OutlineError, Result};
use crate::extraction::{self, registry, Declarations};
use crate::types::{Dialect, FileResult};

/// Outlines source text that is already in memory.
///
/// `file_path` is only used for dialect detection and reporting.
pub fn parse_source(file_path: &str, source: &str, config: &OutlineConfig) -> FileResult {
    let (dialect, language) = match prepare(Path::new(file_path)) {
        Ok(prepared) => prepared,
        Err((dialect, error)) => return report(file_path.to_string(), dialect, error),
    };
    finish(file_path.to_string(), dialect, language, source, config)
}

/// Reads and outlines a single file.
///
/// Invalid UTF-8 is replaced rather than rejected. Every failure is
/// reported on the returned `FileResult`.
pub fn parse_file(path: &Path, config: &OutlineConfig) -> FileResult {
    let file_path = path.to_string_lossy().to_string();
    let (dialect, language) = match prepare(path) {
        Ok(prepared) => prepared,
        Err((dialect, error)) => return report(file_path, dialect, error),
    };
    let source = match read_source(path) {
        Ok(source) => source,
        Err(error) => return report(file_path, Some(dialect), error),
    };
    finish(file_path, dialect, language, &source, config)
}

/// Outlines every path in order. The output has one entry per input.
pub fn parse_batch<P: AsRef<Path>>(paths: &[P], config: &OutlineConfig) -> Vec<FileResult> {
    paths
        .iter()
        .map(|path| parse_file(path.as_ref(), config))
        .collect()
}

/// Scans a directory for supported source files.
///
/// Hidden directories are skipped, as are paths matching the configured
/// exclude patterns, which are tested against the path relative to `root`.
/// The returned paths are joined onto `root` and sorted by file name so
/// batches are deterministic.
pub fn scan_directory(root: &Path, config: &OutlineConfig) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(OutlineError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("'{}' is not a directory", root.display()),
        )));
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.'))
    {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if let Ok(relative) = path.strip_prefix(root) {
            let rel_str = relative.to_string_lossy().replace('\\', "/");
            if should_include_file(&rel_str, config) {
                files.push(path.to_path_buf());
            }
        }
    }
    Ok(files)
}

/// Resolves the dialect and its grammar for `path`.
fn prepare(
    path: &Path,
) -> std::result::Result<(Dialect, &'static Language), (Option<Dialect>, OutlineError)> {
    let Some(dialect) = registry::resolve_path(path) else {
        return Err((
            None,
            OutlineError::UnsupportedExtension {
                path: path.to_string_lossy().to_string(),
            },
        ));
    };
    let language = registry::load(dialect).map_err(|e| (Some(dialect), e))?;
    Ok((dialect, language))
}

fn read_source(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| OutlineError::FileReadFailure {
        path: path.to_string_lossy().to_string(),
        message: e.to_string(),
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn finish(
    file_path: String,
    dialect: Dialect,
    language: &Language,
    source: &str,
    config: &OutlineConfig,
) -> FileResult {
    match outline(dialect, language, source, config) {
        Ok(declarations) => {
            debug!(
                file = %file_path,
                language = dialect.as_str(),
                functions = declarations.functions.len(),
                classes = declarations.classes.len(),
                imports = declarations.imports.len(),
                exports = declarations.exports.len(),
                "outlined file"
            );
            FileResult::succeeded(file_path, dialect, declarations)
        }
        Err(error) => report(file_path, Some(dialect), error),
    }
}

fn outline(
    dialect: Dialect,
    language: &Language,
    source: &str,
    config: &OutlineConfig,
) -> Result<Declarations> {
    let chars = source.chars().count();
    if chars > config.max_file_chars {
        return Err(OutlineError::FileTooLarge {
            chars,
            limit: config.max_file_chars,
        });
    }
    let tree = parse_tree(language, source)?;
    extract_guarded(dialect, source, &tree)
}

fn parse_tree(language: &Language, source: &str) -> Result<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(language)
        .map_err(|e| OutlineError::ParseFailure {
            message: e.to_string(),
        })?;
    parser
        .parse(source, None)
        .ok_or_else(|| OutlineError::ParseFailure {
            message: "tree-sitter returned no tree".to_string(),
        })
}

/// Runs the extractors, turning a panic into `ExtractionFailure`.
fn extract_guarded(dialect: Dialect, source: &str, tree: &Tree) -> Result<Declarations> {
    panic::catch_unwind(AssertUnwindSafe(|| extraction::extract(dialect, source, tree))).map_err(
        |payload| {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "extractor panicked".to_string());
            OutlineError::ExtractionFailure { message }
        },
    )
}

fn report(file_path: String, dialect: Option<Dialect>, error: OutlineError) -> FileResult {
    warn!(file = %file_path, error = %error, "could not outline file");
    FileResult::failed(file_path, dialect, error)
}
