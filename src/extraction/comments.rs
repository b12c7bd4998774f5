//! Documentation-comment index built once per file.

use std::collections::HashMap;

use tree_sitter::Node as TsNode;

use super::kinds::JsKind;

/// Opening token of a JSDoc block comment.
pub const JSDOC_MARKER: &str = "/**";

/// How many lines above a declaration a doc comment may end.
const MAX_DOC_DISTANCE: usize = 2;

/// Maps the 0-indexed row a doc comment ends on to its trimmed text.
#[derive(Debug, Clone, Default)]
pub struct CommentIndex {
    by_end_row: HashMap<usize, String>,
}

impl CommentIndex {
    /// An index with no comments, used by dialects without comment docs.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Walks the whole tree once, keeping comments that start with `marker`.
    pub fn build(source: &[u8], root: TsNode<'_>, marker: &str) -> Self {
        let mut index = Self::default();
        let mut cursor = root.walk();
        loop {
            let node = cursor.node();
            if JsKind::of(node) == JsKind::Comment {
                let text = node.utf8_text(source).unwrap_or("").trim();
                if text.starts_with(marker) {
                    index.insert(node.end_position().row, text);
                }
            }
            if cursor.goto_first_child() {
                continue;
            }
            loop {
                if cursor.goto_next_sibling() {
                    break;
                }
                if !cursor.goto_parent() {
                    return index;
                }
            }
        }
    }

    pub fn insert(&mut self, end_row: usize, text: &str) {
        self.by_end_row.insert(end_row, text.to_string());
    }

    /// Finds the doc comment for a declaration starting on `decl_row`.
    ///
    /// Only comments ending one or two rows above are considered, nearest first.
    pub fn find_doc(&self, decl_row: usize) -> Option<&str> {
        (1..=MAX_DOC_DISTANCE)
            .filter_map(|distance| decl_row.checked_sub(distance))
            .find_map(|row| self.by_end_row.get(&row))
            .map(String::as_str)
    }
}
