use std::collections::BTreeMap;

use diffscope_core::{FileChange, LanguageStats};

use crate::category::is_binary_path;
use crate::language::Language;

/// Output of [`classify`]: files partitioned by what the engine can do
/// with them, plus per-language statistics.
///
/// Every input file appears in exactly one of `analyzable`,
/// `binary_files`, or `unsupported`.
#[derive(Debug, Clone, Default)]
pub struct Classification {
    /// Files grouped by detected language, in stable language order.
    pub groups: BTreeMap<Language, Vec<FileChange>>,
    /// Files eligible for complexity and structural analysis.
    pub analyzable: Vec<FileChange>,
    /// Binary-blacklisted file paths, excluded from analysis outright.
    pub binary_files: Vec<String>,
    /// Files whose language is outside the analyzable allow-list.
    pub unsupported: Vec<FileChange>,
    /// Per-language line statistics over all input files.
    pub stats: BTreeMap<String, LanguageStats>,
}

/// Partition file changes by language and analyzability.
///
/// Classification is total over any filename: there are no error
/// conditions. Binary-blacklisted files are never analyzable regardless
/// of language guess. Statistics are built as a pure fold of
/// [`LanguageStats::merged`] over the files in input order, so the same
/// input always produces the same stats.
///
/// # Examples
///
/// ```
/// use diffscope_core::{ChangeStatus, FileChange};
/// use diffscope_lang::classify;
///
/// let files = vec![
///     FileChange {
///         filename: "src/app.py".into(),
///         status: ChangeStatus::Modified,
///         additions: 5,
///         deletions: 1,
///         patch: None,
///     },
///     FileChange {
///         filename: "logo.png".into(),
///         status: ChangeStatus::Added,
///         additions: 0,
///         deletions: 0,
///         patch: None,
///     },
/// ];
/// let classification = classify(&files);
/// assert_eq!(classification.analyzable.len(), 1);
/// assert_eq!(classification.binary_files, vec!["logo.png"]);
/// assert!(classification.unsupported.is_empty());
/// ```
pub fn classify(files: &[FileChange]) -> Classification {
    let mut result = Classification::default();

    for change in files {
        let language = Language::from_path(&change.filename);

        result
            .groups
            .entry(language)
            .or_default()
            .push(change.clone());

        let name = language.name();
        let merged = result
            .stats
            .remove(name)
            .unwrap_or_else(|| LanguageStats::for_language(name))
            .merged(&LanguageStats::for_file(name, change));
        result.stats.insert(name.to_string(), merged);

        if is_binary_path(&change.filename) {
            result.binary_files.push(change.filename.clone());
        } else if language.is_analyzable() {
            result.analyzable.push(change.clone());
        } else {
            result.unsupported.push(change.clone());
        }
    }

    result
}
