//! Structural change extraction: which functions, classes, and imports a
//! diff touched.
//!
//! Two passes. The AST pass parses each fragment and tags clean-parse
//! symbols as added (from the added fragment) or deleted (from the removed
//! fragment). The regex pass in [`crate::patterns`] always runs afterwards
//! over the combined changed lines and records its matches as modified.

use diffscope_core::{FileChange, StructuralChanges};
use diffscope_lang::{is_test_path, Language};
use tree_sitter::Node;

use crate::ast::{child_has_kind, find_nested_function_name, find_child_text, node_text, parse_clean};
use crate::fragments::split_fragments;
use crate::patterns::apply_patterns;

const FUNCTION_KINDS: &[&str] = &[
    "function_definition",
    "function_item",
    "function_declaration",
    "method_definition",
    "method_declaration",
    "constructor_declaration",
    "method",
    "singleton_method",
];

const CLASS_KINDS: &[&str] = &[
    "class_definition",
    "class_declaration",
    "interface_declaration",
    "enum_declaration",
    "trait_declaration",
    "object_declaration",
    "protocol_declaration",
    "struct_item",
    "enum_item",
    "trait_item",
];

/// Child kinds that carry a definition's name, tried in order. Each
/// grammar uses exactly one of these for a given construct.
const NAME_KINDS: &[&str] = &[
    "identifier",
    "type_identifier",
    "simple_identifier",
    "property_identifier",
    "field_identifier",
    "name",
    "constant",
];

#[derive(Debug, Clone, Copy)]
enum FragmentSide {
    Added,
    Removed,
}

/// Run both passes over a file's patch.
pub(crate) fn extract(change: &FileChange, language: Language) -> StructuralChanges {
    let patch = change.patch.as_deref().unwrap_or("");
    let fragments = split_fragments(patch);

    let mut changes = StructuralChanges {
        is_test_file: is_test_path(&change.filename),
        ..StructuralChanges::default()
    };

    collect_fragment_symbols(
        &fragments.added_fragment(),
        language,
        FragmentSide::Added,
        &mut changes,
    );
    collect_fragment_symbols(
        &fragments.removed_fragment(),
        language,
        FragmentSide::Removed,
        &mut changes,
    );

    // The regex pass runs regardless of how the AST pass fared; a line
    // diff cannot tell a new function from an edit inside one, so both
    // views are kept.
    let mut combined = fragments.added_lines.clone();
    combined.extend(fragments.removed_lines.iter().cloned());
    apply_patterns(language, &combined.join("\n"), &mut changes);

    changes
}

fn collect_fragment_symbols(
    code: &str,
    language: Language,
    side: FragmentSide,
    changes: &mut StructuralChanges,
) {
    if code.trim().is_empty() {
        return;
    }
    let Some(tree) = parse_clean(code, language) else {
        return;
    };
    collect_symbols(tree.root_node(), code.as_bytes(), language, side, changes);
}

fn collect_symbols(
    node: Node,
    source: &[u8],
    language: Language,
    side: FragmentSide,
    changes: &mut StructuralChanges,
) {
    let kind = node.kind();

    if FUNCTION_KINDS.contains(&kind) {
        if let Some(name) = symbol_name(&node, source) {
            match side {
                FragmentSide::Added => changes.functions_added.push(name),
                FragmentSide::Removed => changes.functions_deleted.push(name),
            }
        }
    } else if is_class_node(&node, kind) {
        if let Some(name) = symbol_name(&node, source) {
            match side {
                FragmentSide::Added => changes.classes_added.push(name),
                FragmentSide::Removed => changes.classes_deleted.push(name),
            }
        }
    } else {
        let imports = match side {
            FragmentSide::Added => &mut changes.imports_added,
            FragmentSide::Removed => &mut changes.imports_removed,
        };
        collect_import(&node, source, language, imports);
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_symbols(child, source, language, side, changes);
    }
}

fn is_class_node(node: &Node, kind: &str) -> bool {
    match kind {
        // Go hangs structs and interfaces off type_spec; aliases and
        // plain named types are not class-like.
        "type_spec" => child_has_kind(node, "struct_type") || child_has_kind(node, "interface_type"),
        // In C/C++ these kinds also appear as bare type references; only
        // definitions carry a body.
        "struct_specifier" | "class_specifier" => child_has_kind(node, "field_declaration_list"),
        "enum_specifier" => child_has_kind(node, "enumerator_list"),
        // Ruby
        "class" | "module" => true,
        other => CLASS_KINDS.contains(&other),
    }
}

fn symbol_name(node: &Node, source: &[u8]) -> Option<String> {
    for kind in NAME_KINDS {
        if let Some(text) = find_child_text(node, kind, source) {
            return Some(text);
        }
    }
    find_nested_function_name(node, source)
}

fn collect_import(node: &Node, source: &[u8], language: Language, out: &mut Vec<String>) {
    match (language, node.kind()) {
        (Language::Python, "import_statement") => {
            let mut cursor = node.walk();
            for child in node.children(&mut cursor) {
                match child.kind() {
                    "dotted_name" => out.push(node_text(&child, source)),
                    "aliased_import" => {
                        if let Some(name) = find_child_text(&child, "dotted_name", source) {
                            out.push(name);
                        }
                    }
                    _ => {}
                }
            }
        }
        (Language::Python, "import_from_statement") => {
            let Some(module) = node.child_by_field_name("module_name") else {
                return;
            };
            let module = node_text(&module, source);
            let mut cursor = node.walk();
            let mut any = false;
            for name in node.children_by_field_name("name", &mut cursor) {
                let text = match name.kind() {
                    "aliased_import" => {
                        find_child_text(&name, "dotted_name", source).unwrap_or_default()
                    }
                    _ => node_text(&name, source),
                };
                if !text.is_empty() {
                    out.push(format!("{module}.{text}"));
                    any = true;
                }
            }
            if !any {
                // `from x import *`
                out.push(module);
            }
        }
        (Language::JavaScript | Language::TypeScript, "import_statement") => {
            if let Some(src) = node.child_by_field_name("source") {
                let text = node_text(&src, source);
                out.push(text.trim_matches(|c| c == '"' || c == '\'').to_string());
            }
        }
        (Language::Rust, "use_declaration") => {
            let text = node_text(node, source);
            let trimmed = text.trim_end_matches(';');
            // Drop any visibility qualifier along with the keyword.
            let path = match trimmed.split_once("use ") {
                Some((_, rest)) => rest,
                None => trimmed,
            };
            let cleaned = path.split_whitespace().collect::<Vec<_>>().join(" ");
            if !cleaned.is_empty() {
                out.push(cleaned);
            }
        }
        (Language::Go, "import_spec") => {
            if let Some(path) = find_child_text(node, "interpreted_string_literal", source) {
                out.push(path.trim_matches('"').to_string());
            }
        }
        (Language::Java, "import_declaration") => {
            let text = node_text(node, source);
            let cleaned = text
                .trim_start_matches("import")
                .trim_end_matches(';')
                .replace("static", "")
                .split_whitespace()
                .collect::<Vec<_>>()
                .join("");
            if !cleaned.is_empty() {
                out.push(cleaned);
            }
        }
        (Language::C | Language::Cpp, "preproc_include") => {
            if let Some(path) = node.child_by_field_name("path") {
                let text = node_text(&path, source);
                out.push(
                    text.trim_matches(|c| c == '"' || c == '<' || c == '>')
                        .to_string(),
                );
            }
        }
        _ => {}
    }
}
