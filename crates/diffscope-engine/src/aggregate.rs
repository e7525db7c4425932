//! Deterministic assembly of per-file outcomes into a commit-level result.
//!
//! Per-file analyses arrive in input file order; everything here is a pure
//! fold over that order plus the classifier's BTreeMap-backed stats, so two
//! runs over the same input produce identical results (modulo duration).

use std::collections::BTreeSet;

use diffscope_core::{
    AnalyzedFile, CommitMetadata, ComplexityMetrics, DiffAnalysisResult, FileCategory, FileChange,
    ParsedDiff, StructuralChanges,
};
use diffscope_lang::{Classification, Language};

/// Everything the per-file pass produced for one analyzable file.
#[derive(Debug)]
pub(crate) struct FileAnalysis {
    pub change: FileChange,
    pub language: Language,
    pub category: FileCategory,
    pub metrics: ComplexityMetrics,
    pub structure: StructuralChanges,
}

/// Fold per-file analyses into the commit-level result.
///
/// Totals are summed over every input file, excluded ones included;
/// `complexity_delta` only over the files that were actually analyzed.
pub(crate) fn assemble(
    diff: &ParsedDiff,
    commit: &CommitMetadata,
    classification: &Classification,
    analyses: &[FileAnalysis],
    oversized: &[String],
    duration_seconds: f64,
) -> DiffAnalysisResult {
    let mut result = degraded(diff, commit, duration_seconds);

    result.total_files_changed = diff.file_changes.len();
    result.total_additions = diff.file_changes.iter().map(|c| c.additions).sum();
    result.total_deletions = diff.file_changes.iter().map(|c| c.deletions).sum();
    result.language_breakdown = classification.stats.clone();
    result.unsupported_files_count = classification.unsupported.len();

    result.binary_files_changed = classification.binary_files.clone();
    result
        .binary_files_changed
        .extend(oversized.iter().cloned());

    let mut languages = BTreeSet::new();
    for analysis in analyses {
        languages.insert(analysis.language.name());
        result.complexity_delta += analysis.metrics.complexity_delta;

        let s = &analysis.structure;
        result.functions_added.extend(s.functions_added.iter().cloned());
        result
            .functions_modified
            .extend(s.functions_modified.iter().cloned());
        result
            .functions_deleted
            .extend(s.functions_deleted.iter().cloned());
        result.classes_added.extend(s.classes_added.iter().cloned());
        result
            .classes_modified
            .extend(s.classes_modified.iter().cloned());
        result
            .classes_deleted
            .extend(s.classes_deleted.iter().cloned());

        result.analyzed_files.push(AnalyzedFile {
            file_path: analysis.change.filename.clone(),
            language: analysis.language.name().to_string(),
            category: analysis.category,
            change_status: analysis.change.status,
            lines_added: analysis.change.additions,
            lines_deleted: analysis.change.deletions,
            complexity_delta: analysis.metrics.complexity_delta,
            functions_changed: s.functions_changed(),
            classes_changed: s.classes_changed(),
        });
    }
    result.supported_languages = languages.into_iter().map(String::from).collect();

    result
}

/// A zeroed but well-formed result carrying only commit identity. Used as
/// the assembly seed and as the fallback when orchestration state is lost.
pub(crate) fn degraded(
    diff: &ParsedDiff,
    commit: &CommitMetadata,
    duration_seconds: f64,
) -> DiffAnalysisResult {
    DiffAnalysisResult {
        commit_sha: diff.commit_sha.clone(),
        repository_name: diff.repository_name.clone(),
        author_email: commit.author_email.clone(),
        timestamp: commit.timestamp,
        total_files_changed: 0,
        total_additions: 0,
        total_deletions: 0,
        language_breakdown: Default::default(),
        functions_added: Vec::new(),
        functions_modified: Vec::new(),
        functions_deleted: Vec::new(),
        classes_added: Vec::new(),
        classes_modified: Vec::new(),
        classes_deleted: Vec::new(),
        complexity_delta: 0.0,
        analyzed_files: Vec::new(),
        binary_files_changed: Vec::new(),
        analysis_duration_seconds: duration_seconds,
        supported_languages: Vec::new(),
        unsupported_files_count: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use diffscope_core::{ChangeStatus, DiffStats, ImpactThresholds};
    use diffscope_lang::classify;

    fn file(name: &str, additions: u32, deletions: u32) -> FileChange {
        FileChange {
            filename: name.into(),
            status: ChangeStatus::Modified,
            additions,
            deletions,
            patch: None,
        }
    }

    fn diff(files: Vec<FileChange>) -> ParsedDiff {
        ParsedDiff {
            repository_name: "acme/widget".into(),
            commit_sha: "abc123".into(),
            diff_stats: DiffStats {
                files_changed: files.len(),
                total_additions: files.iter().map(|f| f.additions).sum(),
                total_deletions: files.iter().map(|f| f.deletions).sum(),
            },
            file_changes: files,
        }
    }

    fn commit() -> CommitMetadata {
        CommitMetadata {
            sha: "abc123".into(),
            message: "change things".into(),
            author_name: "Dev".into(),
            author_email: "dev@acme.io".into(),
            repository_name: "acme/widget".into(),
            timestamp: Utc::now(),
            branch_name: None,
        }
    }

    fn analysis(name: &str, delta: f64) -> FileAnalysis {
        FileAnalysis {
            change: file(name, 5, 2),
            language: Language::Python,
            category: FileCategory::Source,
            metrics: ComplexityMetrics::new(1.0, 1.0 + delta, 7, &ImpactThresholds::default()),
            structure: StructuralChanges {
                functions_added: vec![format!("{name}_fn")],
                ..StructuralChanges::default()
            },
        }
    }

    #[test]
    fn totals_cover_all_input_files_but_delta_only_analyzed() {
        let files = vec![file("a.py", 5, 2), file("logo.png", 0, 0), file("b.xyz", 3, 1)];
        let d = diff(files);
        let classification = classify(&d.file_changes);
        let analyses = vec![analysis("a.py", 2.0)];
        let result = assemble(&d, &commit(), &classification, &analyses, &[], 0.01);

        assert_eq!(result.total_files_changed, 3);
        assert_eq!(result.total_additions, 8);
        assert_eq!(result.total_deletions, 3);
        assert_eq!(result.complexity_delta, 2.0);
        assert_eq!(result.analyzed_files.len(), 1);
        assert_eq!(result.binary_files_changed, vec!["logo.png"]);
        assert_eq!(result.unsupported_files_count, 1);
    }

    #[test]
    fn oversized_paths_join_the_exclusion_list() {
        let d = diff(vec![file("a.py", 1, 0), file("big.py", 9000, 0)]);
        let classification = classify(&d.file_changes);
        let result = assemble(
            &d,
            &commit(),
            &classification,
            &[],
            &["big.py".to_string()],
            0.0,
        );
        assert_eq!(result.binary_files_changed, vec!["big.py"]);
    }

    #[test]
    fn commit_lists_concatenate_in_input_order() {
        let d = diff(vec![file("a.py", 1, 0), file("b.py", 1, 0)]);
        let classification = classify(&d.file_changes);
        let analyses = vec![analysis("a.py", 0.5), analysis("b.py", 0.5)];
        let result = assemble(&d, &commit(), &classification, &analyses, &[], 0.0);
        assert_eq!(result.functions_added, vec!["a.py_fn", "b.py_fn"]);
        assert_eq!(result.complexity_delta, 1.0);
        assert_eq!(result.supported_languages, vec!["python"]);
    }

    #[test]
    fn degraded_result_is_well_formed() {
        let d = diff(vec![file("a.py", 1, 0)]);
        let result = degraded(&d, &commit(), 0.25);
        assert_eq!(result.commit_sha, "abc123");
        assert_eq!(result.total_files_changed, 0);
        assert_eq!(result.complexity_delta, 0.0);
        assert!(result.analyzed_files.is_empty());
        assert_eq!(result.analysis_duration_seconds, 0.25);
        // Still summarizable.
        assert_eq!(result.summary().dominant_language, "unknown");
    }
}
