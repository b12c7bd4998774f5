/// Tree-sitter based declaration extraction.
///
/// Each dialect family has one extractor that produces function, class,
/// import and export records from an already-parsed tree.
mod comments;
mod js_extractor;
pub mod kinds;
mod python_extractor;
pub mod registry;
pub mod signature;

pub use comments::{CommentIndex, JSDOC_MARKER};
pub use js_extractor::JsExtractor;
pub use python_extractor::{strip_docstring_quotes, PythonExtractor};

use tree_sitter::{Node as TsNode, Tree};

use crate::types::{
    ClassRecord, Dialect, ExportRecord, FunctionRecord, ImportRecord, SourceSpan,
};

/// Everything extracted from one file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Declarations {
    pub functions: Vec<FunctionRecord>,
    pub classes: Vec<ClassRecord>,
    pub imports: Vec<ImportRecord>,
    pub exports: Vec<ExportRecord>,
}

/// Read-only view of one parsed file shared by all extractors.
pub struct SourceContext<'a> {
    source: &'a [u8],
    comments: CommentIndex,
}

impl<'a> SourceContext<'a> {
    /// Builds the context, running the comment pre-pass for dialects that use it.
    pub fn new(dialect: Dialect, source: &'a str, tree: &Tree) -> Self {
        let source = source.as_bytes();
        let comments = if dialect.is_curly() {
            CommentIndex::build(source, tree.root_node(), JSDOC_MARKER)
        } else {
            CommentIndex::empty()
        };
        Self { source, comments }
    }

    pub fn comments(&self) -> &CommentIndex {
        &self.comments
    }

    /// Gets the text of a tree-sitter node from the source.
    pub fn text(&self, node: TsNode<'_>) -> &'a str {
        node.utf8_text(self.source).unwrap_or("")
    }

    pub fn span(&self, node: TsNode<'_>) -> SourceSpan {
        SourceSpan::from_rows(node.start_position().row, node.end_position().row)
    }

    /// 1-indexed line a node starts on.
    pub fn line(&self, node: TsNode<'_>) -> u32 {
        node.start_position().row as u32 + 1
    }
}

/// Trait for dialect-family declaration extractors.
///
/// The four scans are independent; `extract` runs them all over the same tree.
pub trait LanguageExtractor: Send + Sync {
    /// Top-level functions, excluding private names and class bodies.
    fn extract_functions(&self, ctx: &SourceContext<'_>, root: TsNode<'_>) -> Vec<FunctionRecord>;

    /// Top-level classes with one level of methods.
    fn extract_classes(&self, ctx: &SourceContext<'_>, root: TsNode<'_>) -> Vec<ClassRecord>;

    /// Imports anywhere in the tree.
    fn extract_imports(&self, ctx: &SourceContext<'_>, root: TsNode<'_>) -> Vec<ImportRecord>;

    /// Exports anywhere in the tree. Dialects without exports keep the default.
    fn extract_exports(&self, _ctx: &SourceContext<'_>, _root: TsNode<'_>) -> Vec<ExportRecord> {
        Vec::new()
    }

    fn extract(&self, ctx: &SourceContext<'_>, root: TsNode<'_>) -> Declarations {
        Declarations {
            functions: self.extract_functions(ctx, root),
            classes: self.extract_classes(ctx, root),
            imports: self.extract_imports(ctx, root),
            exports: self.extract_exports(ctx, root),
        }
    }
}

static PYTHON: PythonExtractor = PythonExtractor;
static JAVASCRIPT: JsExtractor = JsExtractor;

/// Returns the extractor responsible for `dialect`.
pub fn extractor_for(dialect: Dialect) -> &'static dyn LanguageExtractor {
    match dialect {
        Dialect::Python => &PYTHON,
        Dialect::JavaScript | Dialect::TypeScript | Dialect::Tsx => &JAVASCRIPT,
    }
}

/// Runs the comment pre-pass and every extractor for `dialect` over `tree`.
pub fn extract(dialect: Dialect, source: &str, tree: &Tree) -> Declarations {
    let ctx = SourceContext::new(dialect, source, tree);
    extractor_for(dialect).extract(&ctx, tree.root_node())
}
