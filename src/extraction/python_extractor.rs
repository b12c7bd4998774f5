/// Python declaration extractor.
///
/// Functions come from a top-level scan that never enters class bodies or
/// function bodies. Classes are read from the module's direct children only,
/// with their methods harvested one level deep.
use tree_sitter::Node as TsNode;
use tracing::trace;

use super::kinds::PyKind;
use super::signature::{render, SignatureParts, SignatureStyle};
use super::{LanguageExtractor, SourceContext};
use crate::types::{ClassRecord, FunctionRecord, ImportRecord, MethodRecord, PythonImport};

/// Private-name prefix in Python.
const PRIVATE_PREFIX: char = '_';

/// Decorators that make a method static.
const STATIC_DECORATORS: [&str; 2] = ["@staticmethod", "@classmethod"];

/// Quote delimiters tried when stripping a docstring, longest first.
const DOCSTRING_QUOTES: [&str; 4] = ["\"\"\"", "'''", "\"", "'"];

/// Extracts declarations from Python source files.
pub struct PythonExtractor;

/// Accumulator threaded through the function scan.
struct FunctionScan<'c, 'a> {
    ctx: &'c SourceContext<'a>,
    functions: Vec<FunctionRecord>,
}

impl FunctionScan<'_, '_> {
    fn visit(&mut self, node: TsNode<'_>) {
        match PyKind::of(node) {
            PyKind::FunctionDefinition => {
                if let Some(record) = PythonExtractor::function_record(self.ctx, node) {
                    if record.name.starts_with(PRIVATE_PREFIX) {
                        trace!(name = %record.name, "skipping private function");
                    } else {
                        self.functions.push(record);
                    }
                }
                // Nested functions are never collected.
            }
            PyKind::ClassDefinition => {}
            _ => {
                let mut cursor = node.walk();
                for child in node.children(&mut cursor) {
                    self.visit(child);
                }
            }
        }
    }
}

impl PythonExtractor {
    /// Builds a function record from a `function_definition` node.
    ///
    /// Returns `None` when the definition has no name.
    fn function_record(ctx: &SourceContext<'_>, node: TsNode<'_>) -> Option<FunctionRecord> {
        let mut name = None;
        let mut parameters = None;
        let mut return_type = None;
        let mut docstring = None;
        let mut is_async = false;

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match PyKind::of(child) {
                PyKind::Identifier if name.is_none() => name = Some(ctx.text(child)),
                PyKind::Parameters if parameters.is_none() => parameters = Some(ctx.text(child)),
                PyKind::Type if return_type.is_none() => return_type = Some(ctx.text(child)),
                PyKind::Block => docstring = Self::extract_docstring(ctx, child),
                PyKind::Async => is_async = true,
                _ => {}
            }
        }

        let Some(name) = name.filter(|n| !n.is_empty()) else {
            trace!(line = ctx.line(node), "skipping unnamed function");
            return None;
        };
        let signature = render(
            SignatureStyle::Def,
            &SignatureParts {
                name,
                parameters,
                return_type,
                ..Default::default()
            },
        );

        Some(FunctionRecord {
            name: name.to_string(),
            signature,
            parameters: parameters.unwrap_or("()").to_string(),
            return_type: return_type.map(str::to_string),
            docstring,
            decorators: Self::preceding_decorators(ctx, node),
            is_async,
            is_generator: None,
            span: ctx.span(node),
        })
    }

    /// Collects the contiguous decorators directly above `node`, in source order.
    fn preceding_decorators(ctx: &SourceContext<'_>, node: TsNode<'_>) -> Vec<String> {
        let Some(parent) = node.parent() else {
            return Vec::new();
        };
        let mut cursor = parent.walk();
        let siblings: Vec<TsNode<'_>> = parent.children(&mut cursor).collect();
        let Some(position) = siblings.iter().position(|s| s.id() == node.id()) else {
            return Vec::new();
        };

        let mut decorators: Vec<String> = siblings[..position]
            .iter()
            .rev()
            .take_while(|s| PyKind::of(**s) == PyKind::Decorator)
            .map(|s| ctx.text(*s).trim().to_string())
            .collect();
        // Collected bottom-up.
        decorators.reverse();
        decorators
    }

    /// Reads the docstring from the first statement of a function body.
    fn extract_docstring(ctx: &SourceContext<'_>, block: TsNode<'_>) -> Option<String> {
        let mut cursor = block.walk();
        let first = block.children(&mut cursor).next()?;
        if PyKind::of(first) != PyKind::ExpressionStatement {
            return None;
        }
        let mut inner = first.walk();
        let string = first.children(&mut inner).next()?;
        if PyKind::of(string) != PyKind::String {
            return None;
        }
        Some(strip_docstring_quotes(ctx.text(string)))
    }

    fn class_record(
        ctx: &SourceContext<'_>,
        node: TsNode<'_>,
        decorators: Vec<String>,
    ) -> Option<ClassRecord> {
        let mut name = None;
        let mut superclass = None;
        let mut body = None;

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match PyKind::of(child) {
                PyKind::Identifier if name.is_none() => name = Some(ctx.text(child)),
                PyKind::ArgumentList if superclass.is_none() => {
                    superclass = Self::first_base(ctx, child);
                }
                PyKind::Block => body = Some(child),
                _ => {}
            }
        }

        let Some(name) = name.filter(|n| !n.is_empty()) else {
            trace!(line = ctx.line(node), "skipping unnamed class");
            return None;
        };
        let methods = body
            .map(|body| Self::extract_methods(ctx, body))
            .unwrap_or_default();

        Some(ClassRecord {
            name: name.to_string(),
            superclass,
            decorators,
            methods,
            span: ctx.span(node),
        })
    }

    fn first_base(ctx: &SourceContext<'_>, arguments: TsNode<'_>) -> Option<String> {
        let mut cursor = arguments.walk();
        let base = arguments
            .children(&mut cursor)
            .find(|c| matches!(PyKind::of(*c), PyKind::Identifier | PyKind::Attribute))?;
        Some(ctx.text(base).to_string())
    }

    /// Harvests methods from the direct children of a class body.
    fn extract_methods(ctx: &SourceContext<'_>, body: TsNode<'_>) -> Vec<MethodRecord> {
        let mut methods = Vec::new();
        let mut cursor = body.walk();
        for child in body.children(&mut cursor) {
            let definition = match PyKind::of(child) {
                PyKind::FunctionDefinition => Some(child),
                PyKind::DecoratedDefinition => Self::wrapped_definition(child, PyKind::FunctionDefinition),
                _ => None,
            };
            let Some(record) = definition.and_then(|d| Self::function_record(ctx, d)) else {
                continue;
            };
            let is_static = record
                .decorators
                .iter()
                .any(|d| STATIC_DECORATORS.iter().any(|s| d.contains(s)));
            let is_private = record.name.starts_with(PRIVATE_PREFIX);
            methods.push(MethodRecord {
                function: record,
                is_static,
                is_private,
            });
        }
        methods
    }

    /// Returns the definition of `kind` inside a `decorated_definition`.
    fn wrapped_definition<'t>(decorated: TsNode<'t>, kind: PyKind) -> Option<TsNode<'t>> {
        let mut cursor = decorated.walk();
        let found = decorated
            .children(&mut cursor)
            .find(|c| PyKind::of(*c) == kind);
        found
    }

    fn decorator_texts(ctx: &SourceContext<'_>, decorated: TsNode<'_>) -> Vec<String> {
        let mut cursor = decorated.walk();
        decorated
            .children(&mut cursor)
            .filter(|c| PyKind::of(*c) == PyKind::Decorator)
            .map(|c| ctx.text(c).trim().to_string())
            .collect()
    }

    fn collect_imports(ctx: &SourceContext<'_>, node: TsNode<'_>, imports: &mut Vec<ImportRecord>) {
        match PyKind::of(node) {
            PyKind::ImportStatement => Self::plain_import(ctx, node, imports),
            PyKind::ImportFromStatement | PyKind::FutureImportStatement => {
                if let Some(import) = Self::from_import(ctx, node) {
                    imports.push(ImportRecord::Python(import));
                }
            }
            _ => {
                let mut cursor = node.walk();
                for child in node.children(&mut cursor) {
                    Self::collect_imports(ctx, child, imports);
                }
            }
        }
    }

    /// `import a.b, c as d` yields one record per imported module.
    fn plain_import(ctx: &SourceContext<'_>, node: TsNode<'_>, imports: &mut Vec<ImportRecord>) {
        let line = ctx.line(node);
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            let (module, alias) = match PyKind::of(child) {
                PyKind::DottedName => (ctx.text(child), None),
                PyKind::AliasedImport => {
                    let Some(module) = child.child_by_field_name("name") else {
                        continue;
                    };
                    let alias = child.child_by_field_name("alias").map(|a| ctx.text(a));
                    (ctx.text(module), alias)
                }
                _ => continue,
            };
            imports.push(ImportRecord::Python(PythonImport {
                module: module.to_string(),
                names: None,
                alias: alias.map(str::to_string),
                is_from: false,
                line,
            }));
        }
    }

    /// `from x import a, b as c, *` yields a single record.
    ///
    /// `from __future__ import ...` has its own node kind with a keyword
    /// token in place of the module name.
    fn from_import(ctx: &SourceContext<'_>, node: TsNode<'_>) -> Option<PythonImport> {
        let mut module = None;
        let mut names = Vec::new();
        let mut after_import = false;

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match PyKind::of(child) {
                PyKind::ImportKeyword => after_import = true,
                PyKind::DottedName | PyKind::RelativeImport | PyKind::FutureKeyword
                    if !after_import =>
                {
                    if module.is_none() {
                        module = Some(ctx.text(child));
                    }
                }
                PyKind::DottedName if after_import => names.push(ctx.text(child).to_string()),
                // Only the imported name is kept, not its alias.
                PyKind::AliasedImport if after_import => {
                    if let Some(name) = child.child_by_field_name("name") {
                        names.push(ctx.text(name).to_string());
                    }
                }
                PyKind::WildcardImport if after_import => names.push("*".to_string()),
                _ => {}
            }
        }

        let module = module?;
        Some(PythonImport {
            module: module.to_string(),
            names: (!names.is_empty()).then_some(names),
            alias: None,
            is_from: true,
            line: ctx.line(node),
        })
    }
}

impl LanguageExtractor for PythonExtractor {
    fn extract_functions(&self, ctx: &SourceContext<'_>, root: TsNode<'_>) -> Vec<FunctionRecord> {
        let mut scan = FunctionScan {
            ctx,
            functions: Vec::new(),
        };
        scan.visit(root);
        scan.functions
    }

    fn extract_classes(&self, ctx: &SourceContext<'_>, root: TsNode<'_>) -> Vec<ClassRecord> {
        let mut classes = Vec::new();
        let mut cursor = root.walk();
        for child in root.children(&mut cursor) {
            let record = match PyKind::of(child) {
                PyKind::ClassDefinition => Self::class_record(ctx, child, Vec::new()),
                PyKind::DecoratedDefinition => {
                    Self::wrapped_definition(child, PyKind::ClassDefinition).and_then(|class| {
                        Self::class_record(ctx, class, Self::decorator_texts(ctx, child))
                    })
                }
                _ => None,
            };
            classes.extend(record);
        }
        classes
    }

    fn extract_imports(&self, ctx: &SourceContext<'_>, root: TsNode<'_>) -> Vec<ImportRecord> {
        let mut imports = Vec::new();
        Self::collect_imports(ctx, root, &mut imports);
        imports
    }
}

/// Strips one matching pair of quote delimiters and surrounding whitespace.
///
/// Triple quotes are tried before single ones.
pub fn strip_docstring_quotes(raw: &str) -> String {
    for quote in DOCSTRING_QUOTES {
        if raw.len() >= quote.len() * 2 && raw.starts_with(quote) && raw.ends_with(quote) {
            return raw[quote.len()..raw.len() - quote.len()].trim().to_string();
        }
    }
    raw.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_every_quote_style() {
        for raw in [
            "\"\"\"doc\"\"\"",
            "'''doc'''",
            "\"doc\"",
            "'doc'",
        ] {
            assert_eq!(strip_docstring_quotes(raw), "doc", "raw: {raw}");
        }
    }

    #[test]
    fn trims_multiline_docstrings() {
        let raw = "\"\"\"\n    Greet the user.\n\n    Returns a string.\n    \"\"\"";
        assert_eq!(
            strip_docstring_quotes(raw),
            "Greet the user.\n\n    Returns a string."
        );
    }

    #[test]
    fn prefixed_strings_keep_their_quotes() {
        assert_eq!(strip_docstring_quotes("r\"raw\""), "r\"raw\"");
    }

    #[test]
    fn lone_quote_does_not_panic() {
        assert_eq!(strip_docstring_quotes("\""), "\"");
    }
}
