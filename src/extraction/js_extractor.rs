/// JavaScript, TypeScript and TSX declaration extractor.
///
/// All three grammars share the node vocabulary used here. JSDoc comments
/// are attached through the file's `CommentIndex`.
use tree_sitter::Node as TsNode;
use tracing::trace;

use super::kinds::JsKind;
use super::signature::{render, SignatureParts, SignatureStyle};
use super::{LanguageExtractor, SourceContext};
use crate::types::{
    ClassRecord, ExportKind, ExportRecord, FunctionRecord, ImportRecord, MethodRecord,
    ModuleImport,
};

/// Private-name prefixes: `_` by convention, `#` for private class members.
const PRIVATE_PREFIX: char = '_';
const PRIVATE_FIELD_PREFIX: char = '#';

/// Extracts declarations from JavaScript-family source files.
pub struct JsExtractor;

/// Accumulator threaded through the top-level function scan.
struct FunctionScan<'c, 'a> {
    ctx: &'c SourceContext<'a>,
    functions: Vec<FunctionRecord>,
}

impl FunctionScan<'_, '_> {
    fn visit(&mut self, node: TsNode<'_>) {
        match JsKind::of(node) {
            JsKind::FunctionDeclaration | JsKind::GeneratorFunctionDeclaration => {
                let record = JsExtractor::function_record(self.ctx, node, None);
                self.push(record);
            }
            JsKind::LexicalDeclaration | JsKind::VariableDeclaration => {
                self.visit_declarators(node);
            }
            // Exported declarations are unwrapped; the export scan records them separately.
            JsKind::ExportStatement => {
                let mut cursor = node.walk();
                for child in node.children(&mut cursor) {
                    self.visit(child);
                }
            }
            kind if kind.is_class_like() || kind.is_function_like() => {}
            _ => {
                let mut cursor = node.walk();
                for child in node.children(&mut cursor) {
                    self.visit(child);
                }
            }
        }
    }

    /// `const name = () => ...` and `var name = function () {...}`.
    fn visit_declarators(&mut self, declaration: TsNode<'_>) {
        let mut cursor = declaration.walk();
        for declarator in declaration.children(&mut cursor) {
            if JsKind::of(declarator) != JsKind::VariableDeclarator {
                continue;
            }
            let (Some(name_node), Some(value)) = (
                declarator.child_by_field_name("name"),
                declarator.child_by_field_name("value"),
            ) else {
                continue;
            };
            let value_kind = JsKind::of(value);
            if !value_kind.is_function_value() {
                continue;
            }
            let name = self.ctx.text(name_node);
            let mut record = JsExtractor::function_record(self.ctx, value, Some(name));
            if value_kind == JsKind::ArrowFunction {
                if let Some(record) = record.as_mut() {
                    record.signature = render(
                        SignatureStyle::ConstArrow,
                        &SignatureParts {
                            name,
                            parameters: Some(record.parameters.as_str()),
                            return_type: record.return_type.as_deref(),
                            is_async: record.is_async,
                            is_generator: false,
                        },
                    );
                }
            }
            self.push(record);
        }
    }

    fn push(&mut self, record: Option<FunctionRecord>) {
        let Some(record) = record else {
            return;
        };
        if record.name.starts_with(PRIVATE_PREFIX) {
            trace!(name = %record.name, "skipping private function");
            return;
        }
        self.functions.push(record);
    }
}

/// Fields shared by functions and methods.
struct CallableParts<'a> {
    name: Option<&'a str>,
    parameters: Option<&'a str>,
    return_type: Option<&'a str>,
    is_async: bool,
    is_generator: bool,
    is_static: bool,
}

impl JsExtractor {
    fn callable_parts<'a>(ctx: &SourceContext<'a>, node: TsNode<'_>) -> CallableParts<'a> {
        let mut parts = CallableParts {
            name: node
                .child_by_field_name("name")
                .map(|n| ctx.text(n))
                .filter(|n| !n.is_empty()),
            parameters: None,
            return_type: None,
            is_async: false,
            is_generator: false,
            is_static: false,
        };
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match JsKind::of(child) {
                JsKind::FormalParameters if parts.parameters.is_none() => {
                    parts.parameters = Some(ctx.text(child));
                }
                JsKind::TypeAnnotation if parts.return_type.is_none() => {
                    let annotation = ctx.text(child).trim_start_matches([':', ' ']);
                    parts.return_type = Some(annotation);
                }
                JsKind::Async => parts.is_async = true,
                JsKind::Star => parts.is_generator = true,
                JsKind::Static => parts.is_static = true,
                _ => {}
            }
        }
        parts
    }

    /// Builds a function record; `name_hint` names anonymous function values.
    fn function_record(
        ctx: &SourceContext<'_>,
        node: TsNode<'_>,
        name_hint: Option<&str>,
    ) -> Option<FunctionRecord> {
        let parts = Self::callable_parts(ctx, node);
        let Some(name) = parts.name.or(name_hint) else {
            trace!(line = ctx.line(node), "skipping unnamed function");
            return None;
        };
        Some(Self::build_record(ctx, node, name, &parts))
    }

    fn build_record(
        ctx: &SourceContext<'_>,
        node: TsNode<'_>,
        name: &str,
        parts: &CallableParts<'_>,
    ) -> FunctionRecord {
        let signature = render(
            SignatureStyle::Function,
            &SignatureParts {
                name,
                parameters: parts.parameters,
                return_type: parts.return_type,
                is_async: parts.is_async,
                is_generator: parts.is_generator,
            },
        );
        FunctionRecord {
            name: name.to_string(),
            signature,
            parameters: parts.parameters.unwrap_or("()").to_string(),
            return_type: parts.return_type.map(str::to_string),
            docstring: ctx
                .comments()
                .find_doc(node.start_position().row)
                .map(str::to_string),
            decorators: Vec::new(),
            is_async: parts.is_async,
            is_generator: Some(parts.is_generator),
            span: ctx.span(node),
        }
    }

    fn class_record(ctx: &SourceContext<'_>, node: TsNode<'_>) -> Option<ClassRecord> {
        let name = node
            .child_by_field_name("name")
            .or_else(|| {
                let mut cursor = node.walk();
                let found = node.children(&mut cursor).find(|c| {
                    matches!(JsKind::of(*c), JsKind::Identifier | JsKind::TypeIdentifier)
                });
                found
            })
            .map(|n| ctx.text(n))
            .filter(|n| !n.is_empty());
        let Some(name) = name else {
            trace!(line = ctx.line(node), "skipping anonymous class");
            return None;
        };

        let mut superclass = None;
        let mut body = None;
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match JsKind::of(child) {
                JsKind::ClassHeritage if superclass.is_none() => {
                    superclass = Self::extends_target(ctx, child);
                }
                JsKind::ClassBody => body = Some(child),
                _ => {}
            }
        }

        Some(ClassRecord {
            name: name.to_string(),
            superclass,
            decorators: Vec::new(),
            methods: body
                .map(|b| Self::extract_methods(ctx, b))
                .unwrap_or_default(),
            span: ctx.span(node),
        })
    }

    /// First identifier-like name after `extends`.
    ///
    /// TypeScript nests it in an `extends_clause`; JavaScript puts the
    /// expression directly under `class_heritage`.
    fn extends_target(ctx: &SourceContext<'_>, heritage: TsNode<'_>) -> Option<String> {
        let mut cursor = heritage.walk();
        let clause = heritage
            .children(&mut cursor)
            .find(|c| JsKind::of(*c) == JsKind::ExtendsClause)
            .unwrap_or(heritage);
        let mut inner = clause.walk();
        let target = clause.children(&mut inner).find(|c| {
            matches!(
                JsKind::of(*c),
                JsKind::Identifier
                    | JsKind::TypeIdentifier
                    | JsKind::MemberExpression
                    | JsKind::NestedTypeIdentifier
            )
        })?;
        Some(ctx.text(target).to_string())
    }

    fn extract_methods(ctx: &SourceContext<'_>, body: TsNode<'_>) -> Vec<MethodRecord> {
        let mut methods = Vec::new();
        let mut cursor = body.walk();
        for child in body.children(&mut cursor) {
            if JsKind::of(child) != JsKind::MethodDefinition {
                continue;
            }
            let parts = Self::callable_parts(ctx, child);
            let Some(name) = parts.name else {
                trace!(line = ctx.line(child), "skipping unnamed method");
                continue;
            };
            methods.push(MethodRecord {
                function: Self::build_record(ctx, child, name, &parts),
                is_static: parts.is_static,
                is_private: name.starts_with([PRIVATE_PREFIX, PRIVATE_FIELD_PREFIX]),
            });
        }
        methods
    }

    fn collect_imports(ctx: &SourceContext<'_>, node: TsNode<'_>, imports: &mut Vec<ImportRecord>) {
        if JsKind::of(node) == JsKind::ImportStatement {
            match Self::module_import(ctx, node) {
                Some(import) => imports.push(ImportRecord::Module(import)),
                None => {
                    trace!(line = ctx.line(node), "dropping import without a source");
                }
            }
            return;
        }
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            Self::collect_imports(ctx, child, imports);
        }
    }

    fn module_import(ctx: &SourceContext<'_>, node: TsNode<'_>) -> Option<ModuleImport> {
        let source = node
            .child_by_field_name("source")
            .map(|s| unquote(ctx.text(s)))
            .filter(|s| !s.is_empty())?;

        let mut specifiers = Vec::new();
        let mut default = None;
        let mut cursor = node.walk();
        for clause in node.children(&mut cursor) {
            if JsKind::of(clause) != JsKind::ImportClause {
                continue;
            }
            let mut clause_cursor = clause.walk();
            for part in clause.children(&mut clause_cursor) {
                match JsKind::of(part) {
                    JsKind::Identifier if default.is_none() => {
                        default = Some(ctx.text(part).to_string());
                    }
                    JsKind::NamespaceImport if default.is_none() => {
                        default = first_identifier(part).map(|id| format!("* as {}", ctx.text(id)));
                    }
                    JsKind::NamedImports => {
                        let mut named = part.walk();
                        for specifier in part.children(&mut named) {
                            if JsKind::of(specifier) != JsKind::ImportSpecifier {
                                continue;
                            }
                            if let Some(name) = specifier
                                .child_by_field_name("name")
                                .or_else(|| first_identifier(specifier))
                            {
                                specifiers.push(ctx.text(name).to_string());
                            }
                        }
                    }
                    _ => {}
                }
            }
        }

        Some(ModuleImport {
            source: source.to_string(),
            specifiers,
            default,
            line: ctx.line(node),
        })
    }

    fn collect_exports(ctx: &SourceContext<'_>, node: TsNode<'_>, exports: &mut Vec<ExportRecord>) {
        if JsKind::of(node) == JsKind::ExportStatement {
            Self::export_statement(ctx, node, exports);
            return;
        }
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            Self::collect_exports(ctx, child, exports);
        }
    }

    fn export_statement(ctx: &SourceContext<'_>, node: TsNode<'_>, exports: &mut Vec<ExportRecord>) {
        let line = ctx.line(node);
        let mut cursor = node.walk();
        let children: Vec<TsNode<'_>> = node.children(&mut cursor).collect();
        let is_default = children.iter().any(|c| JsKind::of(*c) == JsKind::Default);
        let mut record = |name: &str, kind: ExportKind| {
            exports.push(ExportRecord {
                name: name.to_string(),
                kind,
                is_default,
                line,
            });
        };

        for child in children.iter().copied() {
            match JsKind::of(child) {
                JsKind::FunctionDeclaration | JsKind::GeneratorFunctionDeclaration => {
                    if let Some(name) = child.child_by_field_name("name") {
                        record(ctx.text(name), ExportKind::Function);
                    }
                }
                JsKind::ClassDeclaration | JsKind::AbstractClassDeclaration | JsKind::Class => {
                    if let Some(name) = child.child_by_field_name("name") {
                        record(ctx.text(name), ExportKind::Class);
                    }
                }
                JsKind::LexicalDeclaration | JsKind::VariableDeclaration => {
                    let mut inner = child.walk();
                    for declarator in child.children(&mut inner) {
                        if JsKind::of(declarator) != JsKind::VariableDeclarator {
                            continue;
                        }
                        let Some(name) = declarator
                            .child_by_field_name("name")
                            .filter(|n| JsKind::of(*n) == JsKind::Identifier)
                        else {
                            continue;
                        };
                        let is_function = declarator
                            .child_by_field_name("value")
                            .is_some_and(|v| JsKind::of(v).is_function_value());
                        let kind = if is_function {
                            ExportKind::Function
                        } else {
                            ExportKind::Variable
                        };
                        record(ctx.text(name), kind);
                    }
                }
                JsKind::ExportClause => {
                    let mut inner = child.walk();
                    for specifier in child.children(&mut inner) {
                        if JsKind::of(specifier) != JsKind::ExportSpecifier {
                            continue;
                        }
                        if let Some(name) = specifier
                            .child_by_field_name("name")
                            .or_else(|| first_identifier(specifier))
                        {
                            record(ctx.text(name), ExportKind::Variable);
                        }
                    }
                }
                JsKind::Identifier if is_default => record(ctx.text(child), ExportKind::Variable),
                _ => {}
            }
        }
    }
}

impl LanguageExtractor for JsExtractor {
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
            let class = match JsKind::of(child) {
                kind if kind.is_class_like() => Some(child),
                JsKind::ExportStatement => child
                    .child_by_field_name("declaration")
                    .filter(|d| JsKind::of(*d).is_class_like()),
                _ => None,
            };
            classes.extend(class.and_then(|c| Self::class_record(ctx, c)));
        }
        classes
    }

    fn extract_imports(&self, ctx: &SourceContext<'_>, root: TsNode<'_>) -> Vec<ImportRecord> {
        let mut imports = Vec::new();
        Self::collect_imports(ctx, root, &mut imports);
        imports
    }

    fn extract_exports(&self, ctx: &SourceContext<'_>, root: TsNode<'_>) -> Vec<ExportRecord> {
        let mut exports = Vec::new();
        Self::collect_exports(ctx, root, &mut exports);
        exports
    }
}

fn first_identifier(node: TsNode<'_>) -> Option<TsNode<'_>> {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .find(|c| JsKind::of(*c) == JsKind::Identifier);
    found
}

/// Strips the quote characters around a module specifier string.
fn unquote(raw: &str) -> &str {
    raw.trim_matches(|c| c == '\'' || c == '"' || c == '`')
}
