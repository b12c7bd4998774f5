use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::OutlineError;

/// Source dialects understood by the extractors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    Python,
    JavaScript,
    TypeScript,
    Tsx,
}

#[allow(clippy::should_implement_trait)]
impl Dialect {
    /// Every dialect, in registry slot order.
    pub const ALL: [Dialect; 4] = [
        Dialect::Python,
        Dialect::JavaScript,
        Dialect::TypeScript,
        Dialect::Tsx,
    ];

    /// Returns the language tag reported on a `FileResult`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::Python => "python",
            Dialect::JavaScript => "javascript",
            Dialect::TypeScript => "typescript",
            Dialect::Tsx => "tsx",
        }
    }

    /// Parses a language tag, returning `None` for unrecognized values.
    pub fn from_str(s: &str) -> Option<Dialect> {
        match s {
            "python" => Some(Dialect::Python),
            "javascript" => Some(Dialect::JavaScript),
            "typescript" => Some(Dialect::TypeScript),
            "tsx" => Some(Dialect::Tsx),
            _ => None,
        }
    }

    /// Maps a file extension (without the leading dot) to its dialect.
    pub fn from_extension(ext: &str) -> Option<Dialect> {
        match ext.to_ascii_lowercase().as_str() {
            "py" | "pyw" => Some(Dialect::Python),
            "js" | "mjs" | "cjs" | "jsx" => Some(Dialect::JavaScript),
            "ts" | "mts" | "cts" => Some(Dialect::TypeScript),
            "tsx" => Some(Dialect::Tsx),
            _ => None,
        }
    }

    /// Resolves the dialect of a path from its extension.
    pub fn from_path(path: &Path) -> Option<Dialect> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Dialect::from_extension)
    }

    /// True for the JavaScript family (JS, TS, TSX).
    pub fn is_curly(&self) -> bool {
        !matches!(self, Dialect::Python)
    }

    pub(crate) fn slot(&self) -> usize {
        match self {
            Dialect::Python => 0,
            Dialect::JavaScript => 1,
            Dialect::TypeScript => 2,
            Dialect::Tsx => 3,
        }
    }
}

/// 1-indexed, inclusive line range of a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceSpan {
    pub start_line: u32,
    pub end_line: u32,
}

impl SourceSpan {
    /// Builds a span from 0-indexed tree rows.
    pub fn from_rows(start_row: usize, end_row: usize) -> Self {
        let start_line = start_row as u32 + 1;
        let end_line = (end_row as u32 + 1).max(start_line);
        Self {
            start_line,
            end_line,
        }
    }
}

/// A top-level function, or the shared shape of a method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionRecord {
    pub name: String,
    pub signature: String,
    /// Raw parameter-list text, parentheses included.
    pub parameters: String,
    pub return_type: Option<String>,
    pub docstring: Option<String>,
    /// Raw decorator texts in source order.
    pub decorators: Vec<String>,
    pub is_async: bool,
    /// Only set for the JavaScript family.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_generator: Option<bool>,
    #[serde(flatten)]
    pub span: SourceSpan,
}

/// A method harvested from one level inside a class body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodRecord {
    #[serde(flatten)]
    pub function: FunctionRecord,
    pub is_static: bool,
    pub is_private: bool,
}

impl MethodRecord {
    pub fn name(&self) -> &str {
        &self.function.name
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassRecord {
    pub name: String,
    /// First declared base class only.
    pub superclass: Option<String>,
    pub decorators: Vec<String>,
    pub methods: Vec<MethodRecord>,
    #[serde(flatten)]
    pub span: SourceSpan,
}

/// `import a.b` / `from x import y` in Python.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PythonImport {
    pub module: String,
    pub names: Option<Vec<String>>,
    pub alias: Option<String>,
    pub is_from: bool,
    pub line: u32,
}

/// An ES module `import` statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleImport {
    pub source: String,
    pub specifiers: Vec<String>,
    /// Default import name, or `* as X` for a namespace import.
    pub default: Option<String>,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImportRecord {
    Python(PythonImport),
    Module(ModuleImport),
}

impl ImportRecord {
    pub fn line(&self) -> u32 {
        match self {
            ImportRecord::Python(i) => i.line,
            ImportRecord::Module(i) => i.line,
        }
    }

    pub fn as_python(&self) -> Option<&PythonImport> {
        match self {
            ImportRecord::Python(i) => Some(i),
            ImportRecord::Module(_) => None,
        }
    }

    pub fn as_module(&self) -> Option<&ModuleImport> {
        match self {
            ImportRecord::Module(i) => Some(i),
            ImportRecord::Python(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportKind {
    Function,
    Class,
    Variable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRecord {
    pub name: String,
    pub kind: ExportKind,
    pub is_default: bool,
    pub line: u32,
}

/// Outline of a single file.
///
/// Either the record lists are populated and `error` is `None`, or `error`
/// is set and every list is empty.
#[derive(Debug, Serialize)]
pub struct FileResult {
    pub file_path: String,
    pub language: Option<Dialect>,
    pub functions: Vec<FunctionRecord>,
    pub imports: Vec<ImportRecord>,
    pub classes: Vec<ClassRecord>,
    pub exports: Vec<ExportRecord>,
    pub error: Option<OutlineError>,
}

impl FileResult {
    pub(crate) fn succeeded(
        file_path: String,
        language: Dialect,
        declarations: crate::extraction::Declarations,
    ) -> Self {
        Self {
            file_path,
            language: Some(language),
            functions: declarations.functions,
            imports: declarations.imports,
            classes: declarations.classes,
            exports: declarations.exports,
            error: None,
        }
    }

    pub(crate) fn failed(file_path: String, language: Option<Dialect>, error: OutlineError) -> Self {
        Self {
            file_path,
            language,
            functions: Vec::new(),
            imports: Vec::new(),
            classes: Vec::new(),
            exports: Vec::new(),
            error: Some(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}
