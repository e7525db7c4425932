//! Splitting a unified-diff patch into its added and removed halves.
//!
//! Each half is reassembled into a pseudo source fragment by stripping the
//! leading `+`/`-` markers. Fragments are frequently not syntactically
//! complete programs; callers must tolerate parse failures.

/// Added and removed lines of a single file's patch, markers stripped.
#[derive(Debug, Clone, Default)]
pub struct PatchFragments {
    /// Lines prefixed with `+` (file header lines excluded).
    pub added_lines: Vec<String>,
    /// Lines prefixed with `-` (file header lines excluded).
    pub removed_lines: Vec<String>,
}

impl PatchFragments {
    /// Reassembled added fragment.
    pub fn added_fragment(&self) -> String {
        self.added_lines.join("\n")
    }

    /// Reassembled removed fragment.
    pub fn removed_fragment(&self) -> String {
        self.removed_lines.join("\n")
    }

    /// Total number of changed lines across both halves.
    pub fn line_count(&self) -> usize {
        self.added_lines.len() + self.removed_lines.len()
    }
}

/// Split a unified-diff patch into added and removed fragments.
///
/// `+++`/`---` file header lines and hunk headers are skipped; context
/// lines are dropped.
///
/// # Examples
///
/// ```
/// use diffscope_analysis::split_fragments;
///
/// let patch = "@@ -1,2 +1,2 @@\n context\n-old_line()\n+new_line()\n";
/// let fragments = split_fragments(patch);
/// assert_eq!(fragments.added_lines, vec!["new_line()"]);
/// assert_eq!(fragments.removed_lines, vec!["old_line()"]);
/// assert_eq!(fragments.line_count(), 2);
/// ```
pub fn split_fragments(patch: &str) -> PatchFragments {
    let mut fragments = PatchFragments::default();

    for line in patch.lines() {
        if line.starts_with("+++") || line.starts_with("---") {
            continue;
        }
        if let Some(rest) = line.strip_prefix('+') {
            fragments.added_lines.push(rest.to_string());
        } else if let Some(rest) = line.strip_prefix('-') {
            fragments.removed_lines.push(rest.to_string());
        }
    }

    fragments
}
