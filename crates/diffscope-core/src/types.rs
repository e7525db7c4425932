use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ImpactThresholds;

/// A single changed file within a commit, as supplied by the upstream
/// payload-parsing collaborator.
///
/// Immutable input; the engine never mutates it.
///
/// # Examples
///
/// ```
/// use diffscope_core::{ChangeStatus, FileChange};
///
/// let change = FileChange {
///     filename: "src/app.py".into(),
///     status: ChangeStatus::Modified,
///     additions: 12,
///     deletions: 3,
///     patch: Some("@@ -1,3 +1,4 @@\n+import os\n".into()),
/// };
/// assert_eq!(change.status, ChangeStatus::Modified);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileChange {
    /// Path of the file relative to the repository root.
    pub filename: String,
    /// How the file changed in this commit.
    pub status: ChangeStatus,
    /// Number of added lines.
    pub additions: u32,
    /// Number of deleted lines.
    pub deletions: u32,
    /// Unified-diff fragment for this file, when available.
    pub patch: Option<String>,
}

impl FileChange {
    /// Size of the patch text in bytes (0 when no patch is present).
    pub fn patch_bytes(&self) -> usize {
        self.patch.as_deref().map_or(0, |p| p.len())
    }
}

/// How a file changed within a commit.
///
/// # Examples
///
/// ```
/// use diffscope_core::ChangeStatus;
///
/// let status: ChangeStatus = "removed".parse().unwrap();
/// assert_eq!(status, ChangeStatus::Deleted);
/// assert_eq!(ChangeStatus::Added.to_string(), "added");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeStatus {
    /// New file.
    Added,
    /// Existing file edited in place.
    Modified,
    /// File removed.
    Deleted,
    /// File moved or renamed.
    Renamed,
}

impl fmt::Display for ChangeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeStatus::Added => write!(f, "added"),
            ChangeStatus::Modified => write!(f, "modified"),
            ChangeStatus::Deleted => write!(f, "deleted"),
            ChangeStatus::Renamed => write!(f, "renamed"),
        }
    }
}

impl FromStr for ChangeStatus {
    type Err = String;

    /// Accepts the status strings git hosting providers emit, including
    /// `"removed"` as an alias for `deleted`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "added" => Ok(ChangeStatus::Added),
            "modified" | "changed" => Ok(ChangeStatus::Modified),
            "deleted" | "removed" => Ok(ChangeStatus::Deleted),
            "renamed" => Ok(ChangeStatus::Renamed),
            other => Err(format!("unknown change status: {other}")),
        }
    }
}

/// Coarse classification of a changed file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    /// Analyzable application or library code.
    Source,
    /// Test code, detected by path/filename patterns.
    Test,
    /// Build manifests, config formats (json/yaml/toml/...), Dockerfiles.
    Config,
    /// Markdown, reStructuredText, plain text.
    Documentation,
    /// Images, archives, executables, media. Never analyzed.
    Binary,
    /// Anything the classifier cannot place.
    Unknown,
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileCategory::Source => write!(f, "source"),
            FileCategory::Test => write!(f, "test"),
            FileCategory::Config => write!(f, "config"),
            FileCategory::Documentation => write!(f, "documentation"),
            FileCategory::Binary => write!(f, "binary"),
            FileCategory::Unknown => write!(f, "unknown"),
        }
    }
}

/// Qualitative classification of a complexity delta.
///
/// A pure, monotonic step function of `|delta|` against the configured
/// thresholds (defaults 2 / 5 / 10).
///
/// # Examples
///
/// ```
/// use diffscope_core::ImpactLevel;
///
/// assert_eq!(ImpactLevel::from_delta(1.9), ImpactLevel::Low);
/// assert_eq!(ImpactLevel::from_delta(2.0), ImpactLevel::Medium);
/// assert_eq!(ImpactLevel::from_delta(-5.0), ImpactLevel::High);
/// assert_eq!(ImpactLevel::from_delta(10.0), ImpactLevel::Critical);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactLevel {
    /// |delta| below the medium threshold.
    #[default]
    Low,
    /// |delta| in `[medium, high)`.
    Medium,
    /// |delta| in `[high, critical)`.
    High,
    /// |delta| at or above the critical threshold.
    Critical,
}

impl ImpactLevel {
    /// Map a complexity delta to an impact level using the default thresholds.
    pub fn from_delta(delta: f64) -> Self {
        Self::from_delta_with(delta, &ImpactThresholds::default())
    }

    /// Map a complexity delta to an impact level using explicit thresholds.
    ///
    /// Boundary values belong to the higher level: a delta exactly at the
    /// medium threshold is Medium.
    pub fn from_delta_with(delta: f64, thresholds: &ImpactThresholds) -> Self {
        let magnitude = delta.abs();
        if magnitude >= thresholds.critical {
            ImpactLevel::Critical
        } else if magnitude >= thresholds.high {
            ImpactLevel::High
        } else if magnitude >= thresholds.medium {
            ImpactLevel::Medium
        } else {
            ImpactLevel::Low
        }
    }
}

impl fmt::Display for ImpactLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImpactLevel::Low => write!(f, "low"),
            ImpactLevel::Medium => write!(f, "medium"),
            ImpactLevel::High => write!(f, "high"),
            ImpactLevel::Critical => write!(f, "critical"),
        }
    }
}

/// Complexity estimate for one file's change.
///
/// Invariant: `complexity_delta` always equals
/// `complexity_after - complexity_before`, and `impact_level` is a pure
/// function of `|complexity_delta|`. Use [`ComplexityMetrics::new`] to keep
/// both holding.
///
/// # Examples
///
/// ```
/// use diffscope_core::{ComplexityMetrics, ImpactLevel};
/// use diffscope_core::ImpactThresholds;
///
/// let metrics = ComplexityMetrics::new(1.0, 7.0, 14, &ImpactThresholds::default());
/// assert_eq!(metrics.complexity_delta, 6.0);
/// assert_eq!(metrics.impact_level, ImpactLevel::High);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplexityMetrics {
    /// Complexity score of the removed fragment (0 if nothing was removed).
    pub complexity_before: f64,
    /// Complexity score of the added fragment (0 if nothing was added).
    pub complexity_after: f64,
    /// Always `complexity_after - complexity_before`.
    pub complexity_delta: f64,
    /// Qualitative classification of `|complexity_delta|`.
    pub impact_level: ImpactLevel,
    /// Number of changed lines that went into the estimate.
    pub lines_of_code: usize,
}

impl ComplexityMetrics {
    /// Build metrics from before/after scores, deriving the delta and
    /// impact level.
    pub fn new(
        before: f64,
        after: f64,
        lines_of_code: usize,
        thresholds: &ImpactThresholds,
    ) -> Self {
        let delta = after - before;
        Self {
            complexity_before: before,
            complexity_after: after,
            complexity_delta: delta,
            impact_level: ImpactLevel::from_delta_with(delta, thresholds),
            lines_of_code,
        }
    }
}

/// Function, class, and import names the diff touched.
///
/// Names are language-specific identifiers; duplicates are permitted (one
/// per AST occurrence). A construct seen by both the AST pass and the regex
/// pass appears in both the added/deleted and the modified lists — line-based
/// diffs cannot disambiguate "added a new function" from "edited an existing
/// one", and the overlap is kept rather than de-duplicated away.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuralChanges {
    /// Functions found in the added fragment's AST.
    pub functions_added: Vec<String>,
    /// Functions matched by the regex pass over changed lines.
    pub functions_modified: Vec<String>,
    /// Functions found in the removed fragment's AST.
    pub functions_deleted: Vec<String>,
    /// Classes found in the added fragment's AST.
    pub classes_added: Vec<String>,
    /// Classes matched by the regex pass over changed lines.
    pub classes_modified: Vec<String>,
    /// Classes found in the removed fragment's AST.
    pub classes_deleted: Vec<String>,
    /// Imports found in the added fragment's AST.
    pub imports_added: Vec<String>,
    /// Imports found in the removed fragment's AST.
    pub imports_removed: Vec<String>,
    /// Import statements matched by the regex pass.
    pub imports_changed: Vec<String>,
    /// Whether the file path matches the test-file patterns.
    pub is_test_file: bool,
}

impl StructuralChanges {
    /// Total function names across added, modified, and deleted lists.
    pub fn functions_changed(&self) -> usize {
        self.functions_added.len() + self.functions_modified.len() + self.functions_deleted.len()
    }

    /// Total class names across added, modified, and deleted lists.
    pub fn classes_changed(&self) -> usize {
        self.classes_added.len() + self.classes_modified.len() + self.classes_deleted.len()
    }
}

/// Per-file analysis outcome. Created once per successfully analyzed file;
/// never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzedFile {
    /// Path of the file relative to the repository root.
    pub file_path: String,
    /// Detected language identifier (e.g. `"python"`).
    pub language: String,
    /// Coarse file category.
    pub category: FileCategory,
    /// How the file changed.
    pub change_status: ChangeStatus,
    /// Added line count from the input.
    pub lines_added: u32,
    /// Deleted line count from the input.
    pub lines_deleted: u32,
    /// Estimated complexity delta for this file.
    pub complexity_delta: f64,
    /// Total function names the structural pass reported.
    pub functions_changed: usize,
    /// Total class names the structural pass reported.
    pub classes_changed: usize,
}

/// Aggregated line statistics for one language within a commit.
///
/// # Examples
///
/// ```
/// use diffscope_core::LanguageStats;
///
/// let a = LanguageStats { language: "python".into(), file_count: 1, lines_added: 4, lines_deleted: 1 };
/// let b = LanguageStats { language: "python".into(), file_count: 2, lines_added: 6, lines_deleted: 0 };
/// let merged = a.merged(&b);
/// assert_eq!(merged.file_count, 3);
/// assert_eq!(merged.lines_added, 10);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageStats {
    /// Language identifier.
    pub language: String,
    /// Number of changed files in this language.
    pub file_count: usize,
    /// Lines added across those files.
    pub lines_added: u32,
    /// Lines deleted across those files.
    pub lines_deleted: u32,
}

impl LanguageStats {
    /// Empty stats for a language.
    pub fn for_language(language: &str) -> Self {
        Self {
            language: language.to_string(),
            ..Self::default()
        }
    }

    /// Stats for a single file change.
    pub fn for_file(language: &str, change: &FileChange) -> Self {
        Self {
            language: language.to_string(),
            file_count: 1,
            lines_added: change.additions,
            lines_deleted: change.deletions,
        }
    }

    /// Pure merge of two stats; aggregation folds this over files in a
    /// fixed order instead of mutating accumulators in place.
    pub fn merged(&self, other: &Self) -> Self {
        Self {
            language: self.language.clone(),
            file_count: self.file_count + other.file_count,
            lines_added: self.lines_added + other.lines_added,
            lines_deleted: self.lines_deleted + other.lines_deleted,
        }
    }
}

/// Basic diff statistics supplied alongside the file changes, used as a
/// fallback/cross-check during degraded aggregation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffStats {
    /// Number of files changed.
    pub files_changed: usize,
    /// Total added lines.
    pub total_additions: u32,
    /// Total deleted lines.
    pub total_deletions: u32,
}

/// The per-commit input to the engine: structured file changes plus basic
/// statistics, as produced by the upstream payload parser.
///
/// # Examples
///
/// ```
/// use diffscope_core::{DiffStats, ParsedDiff};
///
/// let diff = ParsedDiff {
///     repository_name: "acme/widget".into(),
///     commit_sha: "abc123".into(),
///     file_changes: vec![],
///     diff_stats: DiffStats::default(),
/// };
/// assert!(diff.file_changes.is_empty());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedDiff {
    /// Repository the commit belongs to.
    pub repository_name: String,
    /// Commit identifier.
    pub commit_sha: String,
    /// Ordered list of changed files.
    pub file_changes: Vec<FileChange>,
    /// Pre-computed totals for cross-checking.
    pub diff_stats: DiffStats,
}

/// Commit metadata accompanying a [`ParsedDiff`]. Required, non-optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitMetadata {
    /// Commit SHA.
    pub sha: String,
    /// Commit message.
    pub message: String,
    /// Author name.
    pub author_name: String,
    /// Author email.
    pub author_email: String,
    /// Repository name.
    pub repository_name: String,
    /// Commit timestamp.
    pub timestamp: DateTime<Utc>,
    /// Branch the commit landed on, when known.
    pub branch_name: Option<String>,
}

/// Commit-level analysis result. Created once per analysis call and
/// returned; it has no further lifecycle.
///
/// Every input file is accounted for in exactly one of `analyzed_files`,
/// `binary_files_changed`, or the unsupported count.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffAnalysisResult {
    /// Commit identifier.
    pub commit_sha: String,
    /// Repository name.
    pub repository_name: String,
    /// Commit author email.
    pub author_email: String,
    /// Commit timestamp.
    pub timestamp: DateTime<Utc>,
    /// Count of all input file changes, including excluded ones.
    pub total_files_changed: usize,
    /// Added lines summed over all input files.
    pub total_additions: u32,
    /// Deleted lines summed over all input files.
    pub total_deletions: u32,
    /// Per-language aggregated counts, in stable (sorted) language order.
    pub language_breakdown: BTreeMap<String, LanguageStats>,
    /// Function names the AST pass saw in added fragments, across files.
    pub functions_added: Vec<String>,
    /// Function names the regex pass matched, across files.
    pub functions_modified: Vec<String>,
    /// Function names the AST pass saw in removed fragments, across files.
    pub functions_deleted: Vec<String>,
    /// Class names the AST pass saw in added fragments, across files.
    pub classes_added: Vec<String>,
    /// Class names the regex pass matched, across files.
    pub classes_modified: Vec<String>,
    /// Class names the AST pass saw in removed fragments, across files.
    pub classes_deleted: Vec<String>,
    /// Complexity delta summed over analyzed files only.
    pub complexity_delta: f64,
    /// Per-file results for every successfully analyzed file.
    pub analyzed_files: Vec<AnalyzedFile>,
    /// Paths excluded from analysis as binary or oversized.
    pub binary_files_changed: Vec<String>,
    /// Wall-clock analysis duration in seconds.
    pub analysis_duration_seconds: f64,
    /// Languages that appeared in the commit, sorted.
    pub supported_languages: Vec<String>,
    /// Number of files routed to `unsupported` by the classifier.
    pub unsupported_files_count: usize,
}

impl DiffAnalysisResult {
    /// Derived summary view for downstream consumers.
    ///
    /// # Examples
    ///
    /// ```
    /// use diffscope_core::{DiffAnalysisResult, DiffStats};
    /// # use std::collections::BTreeMap;
    /// # use chrono::Utc;
    /// # let result = DiffAnalysisResult {
    /// #     commit_sha: "abc".into(),
    /// #     repository_name: "acme/widget".into(),
    /// #     author_email: "dev@acme.io".into(),
    /// #     timestamp: Utc::now(),
    /// #     total_files_changed: 1,
    /// #     total_additions: 10,
    /// #     total_deletions: 4,
    /// #     language_breakdown: BTreeMap::new(),
    /// #     functions_added: vec!["handle".into()],
    /// #     functions_modified: vec![],
    /// #     functions_deleted: vec![],
    /// #     classes_added: vec![],
    /// #     classes_modified: vec![],
    /// #     classes_deleted: vec![],
    /// #     complexity_delta: 1.5,
    /// #     analyzed_files: vec![],
    /// #     binary_files_changed: vec![],
    /// #     analysis_duration_seconds: 0.01,
    /// #     supported_languages: vec![],
    /// #     unsupported_files_count: 0,
    /// # };
    /// let summary = result.summary();
    /// assert_eq!(summary.net_line_change, 6);
    /// assert_eq!(summary.functions_changed, 1);
    /// ```
    pub fn summary(&self) -> AnalysisSummary {
        let dominant_language = self
            .language_breakdown
            .values()
            .fold(None::<&LanguageStats>, |best, stats| match best {
                Some(b) if b.lines_added + b.lines_deleted >= stats.lines_added + stats.lines_deleted => {
                    Some(b)
                }
                _ => Some(stats),
            })
            .map(|s| s.language.clone())
            .unwrap_or_else(|| "unknown".to_string());

        AnalysisSummary {
            commit_sha: self.commit_sha.clone(),
            repository_name: self.repository_name.clone(),
            files_changed: self.total_files_changed,
            lines_added: self.total_additions,
            lines_deleted: self.total_deletions,
            net_line_change: i64::from(self.total_additions) - i64::from(self.total_deletions),
            functions_changed: self.functions_added.len()
                + self.functions_modified.len()
                + self.functions_deleted.len(),
            classes_changed: self.classes_added.len()
                + self.classes_modified.len()
                + self.classes_deleted.len(),
            complexity_impact: self.complexity_delta,
            dominant_language,
            languages_affected: self.language_breakdown.keys().cloned().collect(),
        }
    }
}

/// Compact summary derived from a [`DiffAnalysisResult`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    /// Commit identifier.
    pub commit_sha: String,
    /// Repository name.
    pub repository_name: String,
    /// Count of all input file changes.
    pub files_changed: usize,
    /// Total added lines.
    pub lines_added: u32,
    /// Total deleted lines.
    pub lines_deleted: u32,
    /// Additions minus deletions.
    pub net_line_change: i64,
    /// Total function names reported across all lists.
    pub functions_changed: usize,
    /// Total class names reported across all lists.
    pub classes_changed: usize,
    /// Summed complexity delta.
    pub complexity_impact: f64,
    /// Language with the most combined added+deleted lines
    /// (`"unknown"` when nothing was classified).
    pub dominant_language: String,
    /// All languages seen in the commit, sorted.
    pub languages_affected: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_result() -> DiffAnalysisResult {
        DiffAnalysisResult {
            commit_sha: "abc123".into(),
            repository_name: "acme/widget".into(),
            author_email: "dev@acme.io".into(),
            timestamp: Utc::now(),
            total_files_changed: 0,
            total_additions: 0,
            total_deletions: 0,
            language_breakdown: BTreeMap::new(),
            functions_added: Vec::new(),
            functions_modified: Vec::new(),
            functions_deleted: Vec::new(),
            classes_added: Vec::new(),
            classes_modified: Vec::new(),
            classes_deleted: Vec::new(),
            complexity_delta: 0.0,
            analyzed_files: Vec::new(),
            binary_files_changed: Vec::new(),
            analysis_duration_seconds: 0.0,
            supported_languages: Vec::new(),
            unsupported_files_count: 0,
        }
    }

    #[test]
    fn change_status_from_str_accepts_provider_aliases() {
        assert_eq!("added".parse::<ChangeStatus>().unwrap(), ChangeStatus::Added);
        assert_eq!(
            "removed".parse::<ChangeStatus>().unwrap(),
            ChangeStatus::Deleted
        );
        assert_eq!(
            "changed".parse::<ChangeStatus>().unwrap(),
            ChangeStatus::Modified
        );
        assert_eq!(
            "Renamed".parse::<ChangeStatus>().unwrap(),
            ChangeStatus::Renamed
        );
        assert!("copied".parse::<ChangeStatus>().is_err());
    }

    #[test]
    fn impact_level_boundaries_exact() {
        assert_eq!(ImpactLevel::from_delta(0.0), ImpactLevel::Low);
        assert_eq!(ImpactLevel::from_delta(1.99), ImpactLevel::Low);
        assert_eq!(ImpactLevel::from_delta(2.0), ImpactLevel::Medium);
        assert_eq!(ImpactLevel::from_delta(4.99), ImpactLevel::Medium);
        assert_eq!(ImpactLevel::from_delta(5.0), ImpactLevel::High);
        assert_eq!(ImpactLevel::from_delta(9.99), ImpactLevel::High);
        assert_eq!(ImpactLevel::from_delta(10.0), ImpactLevel::Critical);
        assert_eq!(ImpactLevel::from_delta(100.0), ImpactLevel::Critical);
    }

    #[test]
    fn impact_level_uses_absolute_delta() {
        assert_eq!(ImpactLevel::from_delta(-2.0), ImpactLevel::Medium);
        assert_eq!(ImpactLevel::from_delta(-10.0), ImpactLevel::Critical);
    }

    #[test]
    fn impact_level_with_custom_thresholds() {
        let t = ImpactThresholds {
            medium: 1.0,
            high: 2.0,
            critical: 3.0,
        };
        assert_eq!(ImpactLevel::from_delta_with(0.5, &t), ImpactLevel::Low);
        assert_eq!(ImpactLevel::from_delta_with(1.0, &t), ImpactLevel::Medium);
        assert_eq!(ImpactLevel::from_delta_with(2.5, &t), ImpactLevel::High);
        assert_eq!(ImpactLevel::from_delta_with(3.0, &t), ImpactLevel::Critical);
    }

    #[test]
    fn complexity_metrics_delta_invariant() {
        let t = ImpactThresholds::default();
        let m = ComplexityMetrics::new(3.5, 1.0, 9, &t);
        assert_eq!(m.complexity_delta, m.complexity_after - m.complexity_before);
        assert_eq!(m.complexity_delta, -2.5);
        assert_eq!(m.impact_level, ImpactLevel::Medium);
        assert_eq!(m.lines_of_code, 9);
    }

    #[test]
    fn language_stats_merge_is_pure() {
        let a = LanguageStats {
            language: "rust".into(),
            file_count: 2,
            lines_added: 30,
            lines_deleted: 10,
        };
        let b = LanguageStats {
            language: "rust".into(),
            file_count: 1,
            lines_added: 5,
            lines_deleted: 5,
        };
        let merged = a.merged(&b);
        assert_eq!(merged.file_count, 3);
        assert_eq!(merged.lines_added, 35);
        assert_eq!(merged.lines_deleted, 15);
        // Inputs untouched.
        assert_eq!(a.file_count, 2);
        assert_eq!(b.file_count, 1);
    }

    #[test]
    fn structural_changes_counts() {
        let changes = StructuralChanges {
            functions_added: vec!["a".into(), "b".into()],
            functions_modified: vec!["a".into()],
            functions_deleted: vec!["c".into()],
            classes_added: vec!["K".into()],
            ..StructuralChanges::default()
        };
        assert_eq!(changes.functions_changed(), 4);
        assert_eq!(changes.classes_changed(), 1);
    }

    #[test]
    fn summary_dominant_language_by_combined_lines() {
        let mut result = empty_result();
        result.language_breakdown.insert(
            "python".into(),
            LanguageStats {
                language: "python".into(),
                file_count: 1,
                lines_added: 10,
                lines_deleted: 5,
            },
        );
        result.language_breakdown.insert(
            "rust".into(),
            LanguageStats {
                language: "rust".into(),
                file_count: 3,
                lines_added: 4,
                lines_deleted: 2,
            },
        );
        let summary = result.summary();
        assert_eq!(summary.dominant_language, "python");
        assert_eq!(summary.languages_affected, vec!["python", "rust"]);
    }

    #[test]
    fn summary_without_languages_is_unknown() {
        let result = empty_result();
        assert_eq!(result.summary().dominant_language, "unknown");
    }

    #[test]
    fn summary_net_change_can_be_negative() {
        let mut result = empty_result();
        result.total_additions = 3;
        result.total_deletions = 8;
        assert_eq!(result.summary().net_line_change, -5);
    }

    #[test]
    fn result_serializes_camel_case() {
        let result = empty_result();
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("commitSha").is_some());
        assert!(json.get("languageBreakdown").is_some());
        assert!(json.get("binaryFilesChanged").is_some());
        assert!(json.get("commit_sha").is_none());
    }

    #[test]
    fn file_change_patch_bytes() {
        let change = FileChange {
            filename: "a.py".into(),
            status: ChangeStatus::Modified,
            additions: 1,
            deletions: 0,
            patch: Some("+x = 1\n".into()),
        };
        assert_eq!(change.patch_bytes(), 7);

        let no_patch = FileChange {
            patch: None,
            ..change
        };
        assert_eq!(no_patch.patch_bytes(), 0);
    }
}
