//! Cyclomatic-style complexity estimation over diff fragments.
//!
//! For languages with a grammar, each fragment is parsed and scored as
//! `1 + decision points`; when a fragment defines more than one callable
//! the total is averaged per callable so a refactor that splits a function
//! is not penalized for having more definitions. Fragments that do not
//! parse cleanly fall back to a line-count heuristic.

use diffscope_core::{AnalyzerConfig, ComplexityMetrics, FileChange, HeuristicsConfig};
use diffscope_lang::Language;
use tracing::debug;
use tree_sitter::Node;

use crate::ast::{node_text, parse_clean};
use crate::fragments::split_fragments;

/// Callable definitions. Used for averaging, one entry per grammar family.
const CALLABLE_KINDS: &[&str] = &[
    "function_definition",
    "function_item",
    "function_declaration",
    "method_definition",
    "method_declaration",
    "constructor_declaration",
    "method",
    "singleton_method",
];

/// Estimate complexity for a language with a tree-sitter grammar.
pub(crate) fn estimate_with_tree_sitter(
    change: &FileChange,
    language: Language,
    config: &AnalyzerConfig,
) -> ComplexityMetrics {
    let patch = change.patch.as_deref().unwrap_or("");
    let fragments = split_fragments(patch);
    let before = score_fragment(&fragments.removed_fragment(), language, &config.heuristics);
    let after = score_fragment(&fragments.added_fragment(), language, &config.heuristics);
    ComplexityMetrics::new(before, after, fragments.line_count(), &config.impact)
}

/// Estimate complexity from line counts alone, for languages without a
/// parsing strategy.
pub(crate) fn estimate_with_line_counts(
    change: &FileChange,
    config: &AnalyzerConfig,
) -> ComplexityMetrics {
    let weight = config.heuristics.line_weight;
    let before = f64::from(change.deletions) * weight;
    let after = f64::from(change.additions) * weight;
    let lines = (change.additions + change.deletions) as usize;
    ComplexityMetrics::new(before, after, lines, &config.impact)
}

/// Score one reassembled fragment. Blank fragments score zero; fragments
/// that fail to parse get the line-count fallback with a floor of 1.
fn score_fragment(code: &str, language: Language, heuristics: &HeuristicsConfig) -> f64 {
    if code.trim().is_empty() {
        return 0.0;
    }
    match parse_clean(code, language) {
        Some(tree) => {
            let mut decisions = 0usize;
            let mut callables = 0usize;
            count_decision_points(tree.root_node(), code.as_bytes(), &mut decisions, &mut callables);
            let units = 1.0 + decisions as f64;
            if callables > 1 {
                units / callables as f64
            } else {
                units
            }
        }
        None => {
            debug!(
                language = language.name(),
                "fragment did not parse cleanly, using line heuristic"
            );
            let lines = code.lines().filter(|l| !l.trim().is_empty()).count();
            (lines as f64 * heuristics.line_weight).max(1.0)
        }
    }
}

fn count_decision_points(node: Node, source: &[u8], decisions: &mut usize, callables: &mut usize) {
    let kind = node.kind();
    match kind {
        // conditional branches
        "if_statement" | "if_expression" | "elif_clause" | "conditional_expression"
        | "ternary_expression" | "match_expression" | "match_statement" | "switch_statement"
        | "switch_expression" | "when_expression"
        // loops
        | "for_statement" | "for_expression" | "for_in_statement" | "enhanced_for_statement"
        | "foreach_statement" | "while_statement" | "while_expression" | "do_statement"
        | "loop_expression" | "repeat_while_statement"
        // exception handlers
        | "except_clause" | "catch_clause" | "catch_block" | "rescue"
        // comprehensions and generators
        | "list_comprehension" | "dictionary_comprehension" | "set_comprehension"
        | "generator_expression" => *decisions += 1,
        // Short-circuit operators chain left-associatively, so each node
        // here is one operand beyond the first.
        "boolean_operator" | "conjunction_expression" | "disjunction_expression" => {
            *decisions += 1;
        }
        "binary_expression" | "binary" => {
            if let Some(op) = node.child_by_field_name("operator") {
                if matches!(node_text(&op, source).as_str(), "&&" | "||" | "and" | "or") {
                    *decisions += 1;
                }
            }
        }
        _ => {
            if CALLABLE_KINDS.contains(&kind) {
                *callables += 1;
            }
        }
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        count_decision_points(child, source, decisions, callables);
    }
}
