//! Closed node-kind vocabularies for the grammars the extractors walk.
//!
//! Each extractor matches on these enums instead of raw kind strings. Kinds
//! that no extractor cares about collapse into `Other`.

use tree_sitter::Node as TsNode;

/// Node kinds of the Python grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PyKind {
    FunctionDefinition,
    ClassDefinition,
    DecoratedDefinition,
    Decorator,
    Identifier,
    Attribute,
    Parameters,
    Type,
    Block,
    ExpressionStatement,
    String,
    Async,
    ImportStatement,
    ImportFromStatement,
    FutureImportStatement,
    FutureKeyword,
    ImportKeyword,
    DottedName,
    AliasedImport,
    RelativeImport,
    WildcardImport,
    ArgumentList,
    Other,
}

impl PyKind {
    pub fn from_kind(kind: &str) -> PyKind {
        match kind {
            "function_definition" => PyKind::FunctionDefinition,
            "class_definition" => PyKind::ClassDefinition,
            "decorated_definition" => PyKind::DecoratedDefinition,
            "decorator" => PyKind::Decorator,
            "identifier" => PyKind::Identifier,
            "attribute" => PyKind::Attribute,
            "parameters" => PyKind::Parameters,
            "type" => PyKind::Type,
            "block" => PyKind::Block,
            "expression_statement" => PyKind::ExpressionStatement,
            "string" => PyKind::String,
            "async" => PyKind::Async,
            "import_statement" => PyKind::ImportStatement,
            "import_from_statement" => PyKind::ImportFromStatement,
            "future_import_statement" => PyKind::FutureImportStatement,
            "__future__" => PyKind::FutureKeyword,
            "import" => PyKind::ImportKeyword,
            "dotted_name" => PyKind::DottedName,
            "aliased_import" => PyKind::AliasedImport,
            "relative_import" => PyKind::RelativeImport,
            "wildcard_import" => PyKind::WildcardImport,
            "argument_list" => PyKind::ArgumentList,
            _ => PyKind::Other,
        }
    }

    pub fn of(node: TsNode<'_>) -> PyKind {
        PyKind::from_kind(node.kind())
    }
}

/// Node kinds shared by the JavaScript, TypeScript and TSX grammars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsKind {
    FunctionDeclaration,
    GeneratorFunctionDeclaration,
    FunctionExpression,
    GeneratorFunction,
    ArrowFunction,
    LexicalDeclaration,
    VariableDeclaration,
    VariableDeclarator,
    ClassDeclaration,
    AbstractClassDeclaration,
    Class,
    ClassHeritage,
    ExtendsClause,
    ClassBody,
    MethodDefinition,
    FormalParameters,
    TypeAnnotation,
    Identifier,
    TypeIdentifier,
    NestedTypeIdentifier,
    MemberExpression,
    ImportStatement,
    ImportClause,
    NamedImports,
    ImportSpecifier,
    NamespaceImport,
    ExportStatement,
    ExportClause,
    ExportSpecifier,
    Comment,
    Async,
    Static,
    Star,
    Default,
    Other,
}

impl JsKind {
    pub fn from_kind(kind: &str) -> JsKind {
        match kind {
            "function_declaration" => JsKind::FunctionDeclaration,
            "generator_function_declaration" => JsKind::GeneratorFunctionDeclaration,
            "function_expression" => JsKind::FunctionExpression,
            "generator_function" => JsKind::GeneratorFunction,
            "arrow_function" => JsKind::ArrowFunction,
            "lexical_declaration" => JsKind::LexicalDeclaration,
            "variable_declaration" => JsKind::VariableDeclaration,
            "variable_declarator" => JsKind::VariableDeclarator,
            "class_declaration" => JsKind::ClassDeclaration,
            "abstract_class_declaration" => JsKind::AbstractClassDeclaration,
            "class" => JsKind::Class,
            "class_heritage" => JsKind::ClassHeritage,
            "extends_clause" => JsKind::ExtendsClause,
            "class_body" => JsKind::ClassBody,
            "method_definition" => JsKind::MethodDefinition,
            "formal_parameters" => JsKind::FormalParameters,
            "type_annotation" => JsKind::TypeAnnotation,
            "identifier" => JsKind::Identifier,
            "type_identifier" => JsKind::TypeIdentifier,
            "nested_type_identifier" => JsKind::NestedTypeIdentifier,
            "member_expression" => JsKind::MemberExpression,
            "import_statement" => JsKind::ImportStatement,
            "import_clause" => JsKind::ImportClause,
            "named_imports" => JsKind::NamedImports,
            "import_specifier" => JsKind::ImportSpecifier,
            "namespace_import" => JsKind::NamespaceImport,
            "export_statement" => JsKind::ExportStatement,
            "export_clause" => JsKind::ExportClause,
            "export_specifier" => JsKind::ExportSpecifier,
            "comment" => JsKind::Comment,
            "async" => JsKind::Async,
            "static" => JsKind::Static,
            "*" => JsKind::Star,
            "default" => JsKind::Default,
            _ => JsKind::Other,
        }
    }

    pub fn of(node: TsNode<'_>) -> JsKind {
        JsKind::from_kind(node.kind())
    }

    /// Function-valued nodes whose bodies the top-level scans never enter.
    pub fn is_function_like(self) -> bool {
        matches!(
            self,
            JsKind::FunctionDeclaration
                | JsKind::GeneratorFunctionDeclaration
                | JsKind::FunctionExpression
                | JsKind::GeneratorFunction
                | JsKind::ArrowFunction
                | JsKind::MethodDefinition
        )
    }

    /// Class nodes, declared or anonymous.
    pub fn is_class_like(self) -> bool {
        matches!(
            self,
            JsKind::ClassDeclaration | JsKind::AbstractClassDeclaration | JsKind::Class
        )
    }

    /// Values that turn a variable declarator into a function.
    pub fn is_function_value(self) -> bool {
        matches!(
            self,
            JsKind::ArrowFunction | JsKind::FunctionExpression | JsKind::GeneratorFunction
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_kinds_fall_back_to_other() {
        assert_eq!(PyKind::from_kind("lambda"), PyKind::Other);
        assert_eq!(JsKind::from_kind("jsx_element"), JsKind::Other);
    }

    #[test]
    fn future_imports_have_their_own_kind() {
        assert_eq!(
            PyKind::from_kind("future_import_statement"),
            PyKind::FutureImportStatement
        );
        assert_eq!(PyKind::from_kind("__future__"), PyKind::FutureKeyword);
    }

    #[test]
    fn js_kind_groups() {
        assert!(JsKind::ArrowFunction.is_function_like());
        assert!(JsKind::ArrowFunction.is_function_value());
        assert!(!JsKind::FunctionDeclaration.is_function_value());
        assert!(JsKind::Class.is_class_like());
        assert!(!JsKind::ClassBody.is_class_like());
    }
}
