/// Errors that can occur across the diffscope engine.
///
/// Only [`DiffScopeError::InvalidInput`] is fatal for an analysis call.
/// [`DiffScopeError::BinaryFile`] and [`DiffScopeError::FileTooLarge`] are
/// soft-skip signals: the orchestrator catches them per file and routes the
/// filename into the result's exclusion lists instead of aborting.
///
/// # Examples
///
/// ```
/// use diffscope_core::DiffScopeError;
///
/// let err = DiffScopeError::InvalidInput("no file changes to analyze".into());
/// assert!(err.to_string().contains("no file changes"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum DiffScopeError {
    /// Structurally invalid input (empty file list, missing commit SHA).
    /// The only variant that fails a whole analysis call.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A binary file was routed into per-file analysis. Soft-skip.
    #[error("cannot analyze binary file: {0}")]
    BinaryFile(String),

    /// Patch text exceeds the configured size ceiling. Soft-skip.
    #[error("patch too large for analysis: {path} ({size} bytes, max {limit})")]
    FileTooLarge {
        /// Path of the oversized file.
        path: String,
        /// Patch size in bytes.
        size: usize,
        /// Configured ceiling in bytes.
        limit: usize,
    },

    /// Source fragment parsing failure. Callers degrade to heuristics
    /// rather than surfacing this.
    #[error("parse error: {0}")]
    Parse(String),

    /// Filesystem I/O failure (configuration loading).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML deserialization failure.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON serialization / deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DiffScopeError {
    /// Returns `true` if this error excludes a single file rather than
    /// failing the whole analysis.
    ///
    /// # Examples
    ///
    /// ```
    /// use diffscope_core::DiffScopeError;
    ///
    /// assert!(DiffScopeError::BinaryFile("logo.png".into()).is_soft_skip());
    /// assert!(!DiffScopeError::InvalidInput("missing SHA".into()).is_soft_skip());
    /// ```
    pub fn is_soft_skip(&self) -> bool {
        matches!(
            self,
            DiffScopeError::BinaryFile(_) | DiffScopeError::FileTooLarge { .. }
        )
    }
}
