//! Per-file diff analysis: complexity estimation and structural change
//! extraction.
//!
//! This crate scores individual [`FileChange`]s. It knows nothing about
//! commits or concurrency; the engine crate drives it once per analyzable
//! file. Analysis is strategy-based: languages with a tree-sitter grammar
//! are parsed fragment by fragment, the rest fall back to line-count and
//! regex heuristics.
//!
//! [`FileChange`]: diffscope_core::FileChange

mod ast;
mod complexity;
mod fragments;
mod patterns;
mod strategy;
mod structure;

pub use fragments::{split_fragments, PatchFragments};
pub use strategy::{strategy_for, AnalysisStrategy, HeuristicStrategy, TreeSitterStrategy};

use diffscope_core::{AnalyzerConfig, ComplexityMetrics, FileChange, Result, StructuralChanges};
use diffscope_lang::Language;

/// Estimate the complexity change a single file's patch introduces.
///
/// Convenience wrapper over [`strategy_for`].
///
/// # Errors
///
/// Returns [`DiffScopeError::FileTooLarge`] when the patch exceeds the
/// configured ceiling; the orchestrator treats that as a soft skip.
///
/// [`DiffScopeError::FileTooLarge`]: diffscope_core::DiffScopeError::FileTooLarge
///
/// # Examples
///
/// ```
/// use diffscope_analysis::estimate_complexity;
/// use diffscope_core::{AnalyzerConfig, ChangeStatus, FileChange};
/// use diffscope_lang::Language;
///
/// let change = FileChange {
///     filename: "src/app.py".into(),
///     status: ChangeStatus::Modified,
///     additions: 2,
///     deletions: 0,
///     patch: Some("@@ -0,0 +1,2 @@\n+def f():\n+    return 1\n".into()),
/// };
/// let metrics =
///     estimate_complexity(&change, Language::Python, &AnalyzerConfig::default()).unwrap();
/// assert_eq!(metrics.complexity_after, 1.0);
/// ```
pub fn estimate_complexity(
    change: &FileChange,
    language: Language,
    config: &AnalyzerConfig,
) -> Result<ComplexityMetrics> {
    strategy_for(language).estimate_complexity(change, config)
}

/// Extract the functions, classes, and imports a single file's patch
/// touched.
///
/// # Errors
///
/// Returns [`DiffScopeError::FileTooLarge`] when the patch exceeds the
/// configured ceiling.
///
/// [`DiffScopeError::FileTooLarge`]: diffscope_core::DiffScopeError::FileTooLarge
pub fn extract_structure(
    change: &FileChange,
    language: Language,
    config: &AnalyzerConfig,
) -> Result<StructuralChanges> {
    strategy_for(language).extract_structure(change, config)
}
