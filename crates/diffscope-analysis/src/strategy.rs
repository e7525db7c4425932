//! Per-language analysis strategies.
//!
//! Languages with a tree-sitter grammar get the AST-backed strategy;
//! everything else gets the line-count heuristic. Adding a language means
//! wiring its grammar into `Language::grammar` and, optionally, a regex
//! table; nothing here changes.

use diffscope_core::{
    AnalyzerConfig, ComplexityMetrics, DiffScopeError, FileChange, LimitsConfig, Result,
    StructuralChanges,
};
use diffscope_lang::{is_binary_path, Language};
use tracing::trace;

use crate::complexity::{estimate_with_line_counts, estimate_with_tree_sitter};
use crate::structure;

/// How one language's files are analyzed.
pub trait AnalysisStrategy: Send + Sync {
    /// The language this strategy was built for.
    fn language(&self) -> Language;

    /// Estimate the complexity change a patch introduces.
    ///
    /// # Errors
    ///
    /// Returns [`DiffScopeError::FileTooLarge`] when the patch exceeds the
    /// configured size ceiling. The caller treats this as a soft skip.
    fn estimate_complexity(
        &self,
        change: &FileChange,
        config: &AnalyzerConfig,
    ) -> Result<ComplexityMetrics>;

    /// Extract the functions, classes, and imports a patch touched.
    ///
    /// # Errors
    ///
    /// Returns [`DiffScopeError::FileTooLarge`] when the patch exceeds the
    /// configured size ceiling.
    fn extract_structure(
        &self,
        change: &FileChange,
        config: &AnalyzerConfig,
    ) -> Result<StructuralChanges>;
}

/// AST-backed strategy for languages with a grammar.
pub struct TreeSitterStrategy {
    language: Language,
}

impl AnalysisStrategy for TreeSitterStrategy {
    fn language(&self) -> Language {
        self.language
    }

    fn estimate_complexity(
        &self,
        change: &FileChange,
        config: &AnalyzerConfig,
    ) -> Result<ComplexityMetrics> {
        check_analyzable(change, &config.limits)?;
        trace!(file = %change.filename, language = self.language.name(), "estimating complexity");
        Ok(estimate_with_tree_sitter(change, self.language, config))
    }

    fn extract_structure(
        &self,
        change: &FileChange,
        config: &AnalyzerConfig,
    ) -> Result<StructuralChanges> {
        check_analyzable(change, &config.limits)?;
        Ok(structure::extract(change, self.language))
    }
}

/// Line-count strategy for analyzable languages without a grammar
/// (C# and Scala). Structure still gets the regex pass.
pub struct HeuristicStrategy {
    language: Language,
}

impl AnalysisStrategy for HeuristicStrategy {
    fn language(&self) -> Language {
        self.language
    }

    fn estimate_complexity(
        &self,
        change: &FileChange,
        config: &AnalyzerConfig,
    ) -> Result<ComplexityMetrics> {
        check_analyzable(change, &config.limits)?;
        Ok(estimate_with_line_counts(change, config))
    }

    fn extract_structure(
        &self,
        change: &FileChange,
        config: &AnalyzerConfig,
    ) -> Result<StructuralChanges> {
        check_analyzable(change, &config.limits)?;
        Ok(structure::extract(change, self.language))
    }
}

/// Pick the strategy for a language.
///
/// # Examples
///
/// ```
/// use diffscope_analysis::strategy_for;
/// use diffscope_lang::Language;
///
/// assert_eq!(strategy_for(Language::Python).language(), Language::Python);
/// assert_eq!(strategy_for(Language::CSharp).language(), Language::CSharp);
/// ```
pub fn strategy_for(language: Language) -> Box<dyn AnalysisStrategy> {
    if language.grammar().is_some() {
        Box::new(TreeSitterStrategy { language })
    } else {
        Box::new(HeuristicStrategy { language })
    }
}

fn check_analyzable(change: &FileChange, limits: &LimitsConfig) -> Result<()> {
    // The classifier routes blacklisted files out before analysis, but the
    // strategies are public API and enforce the exclusion themselves too.
    if is_binary_path(&change.filename) {
        return Err(DiffScopeError::BinaryFile(change.filename.clone()));
    }
    let size = change.patch_bytes();
    if size > limits.max_patch_bytes {
        return Err(DiffScopeError::FileTooLarge {
            path: change.filename.clone(),
            size,
            limit: limits.max_patch_bytes,
        });
    }
    Ok(())
}
