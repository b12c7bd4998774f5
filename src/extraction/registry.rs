//! Dialect resolution and process-wide grammar cache.

use std::path::Path;
use std::sync::OnceLock;

use tree_sitter::{Language, Parser};
use tracing::debug;

use crate::errors::{OutlineError, Result};
use crate::types::Dialect;

/// One slot per dialect, written at most once.
static GRAMMARS: [OnceLock<Language>; 4] = [
    OnceLock::new(),
    OnceLock::new(),
    OnceLock::new(),
    OnceLock::new(),
];

/// Resolves a file extension (without the dot) to a dialect.
pub fn resolve(extension: &str) -> Option<Dialect> {
    Dialect::from_extension(extension)
}

/// Resolves a path's dialect from its extension.
pub fn resolve_path(path: &Path) -> Option<Dialect> {
    Dialect::from_path(path)
}

/// Returns the grammar for `dialect`, constructing and caching it on first use.
///
/// Every later call returns the same cached handle.
pub fn load(dialect: Dialect) -> Result<&'static Language> {
    let slot = &GRAMMARS[dialect.slot()];
    if let Some(language) = slot.get() {
        return Ok(language);
    }
    let language = construct(dialect)?;
    debug!(language = dialect.as_str(), "loaded grammar");
    Ok(slot.get_or_init(|| language))
}

/// True once `load` has cached a grammar for `dialect`.
pub fn is_loaded(dialect: Dialect) -> bool {
    GRAMMARS[dialect.slot()].get().is_some()
}

/// Builds the grammar and checks that the runtime accepts it.
fn construct(dialect: Dialect) -> Result<Language> {
    let language: Language = match dialect {
        Dialect::Python => tree_sitter_python::LANGUAGE.into(),
        Dialect::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
        Dialect::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
        Dialect::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
    };
    let mut parser = Parser::new();
    parser
        .set_language(&language)
        .map_err(|e| OutlineError::LanguageLoadFailure {
            language: dialect.as_str().to_string(),
            message: e.to_string(),
        })?;
    Ok(language)
}
