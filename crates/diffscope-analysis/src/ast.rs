//! Shared tree-sitter helpers for the complexity and structure passes.

use diffscope_lang::Language;
use tree_sitter::{Node, Parser, Tree};

/// Parse a fragment, returning a tree only when the parse is clean.
///
/// Tree-sitter is error-tolerant and will happily produce a tree full of
/// ERROR nodes for half a function; callers treat any tree whose root
/// reports an error as a parse failure and fall back to heuristics.
pub(crate) fn parse_clean(code: &str, language: Language) -> Option<Tree> {
    let grammar = language.grammar()?;
    let mut parser = Parser::new();
    parser.set_language(&grammar).ok()?;
    let tree = parser.parse(code, None)?;
    if tree.root_node().has_error() {
        return None;
    }
    Some(tree)
}

pub(crate) fn node_text(node: &Node, source: &[u8]) -> String {
    let start = node.start_byte();
    let end = node.end_byte();
    if start >= source.len() || end > source.len() {
        return String::new();
    }
    String::from_utf8_lossy(&source[start..end]).to_string()
}

pub(crate) fn find_child_text(node: &Node, kind: &str, source: &[u8]) -> Option<String> {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == kind {
            let text = node_text(&child, source);
            if !text.is_empty() {
                return Some(text);
            }
        }
    }
    None
}

pub(crate) fn child_has_kind(node: &Node, kind: &str) -> bool {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == kind {
            return true;
        }
    }
    false
}

/// In C/C++, function definitions have: type function_declarator(params) body.
/// The declarator contains the identifier.
pub(crate) fn find_nested_function_name(node: &Node, source: &[u8]) -> Option<String> {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "function_declarator" {
            return find_child_text(&child, "identifier", source)
                .or_else(|| find_child_text(&child, "field_identifier", source));
        }
    }
    None
}
