use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::DiffScopeError;

/// Top-level configuration loaded from `.diffscope.toml`.
///
/// Every field has a default, so an empty file (or no file at all) yields a
/// working configuration.
///
/// # Examples
///
/// ```
/// use diffscope_core::AnalyzerConfig;
///
/// let config = AnalyzerConfig::default();
/// assert_eq!(config.limits.max_patch_bytes, 1_048_576);
/// assert_eq!(config.heuristics.line_weight, 0.1);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Size ceilings for per-file analysis.
    #[serde(default)]
    pub limits: LimitsConfig,
    /// Impact-level thresholds on |complexity delta|.
    #[serde(default)]
    pub impact: ImpactThresholds,
    /// Fallback heuristic constants.
    #[serde(default)]
    pub heuristics: HeuristicsConfig,
    /// Worker pool and timeout settings.
    #[serde(default)]
    pub concurrency: ConcurrencyConfig,
}

impl AnalyzerConfig {
    /// Load configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`DiffScopeError::Io`] if the file cannot be read, or
    /// [`DiffScopeError::Toml`] if the content is not valid TOML.
    pub fn from_file(path: &Path) -> Result<Self, DiffScopeError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`DiffScopeError::Toml`] if parsing fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use diffscope_core::AnalyzerConfig;
    ///
    /// let toml = r#"
    /// [limits]
    /// max_patch_bytes = 524288
    /// "#;
    /// let config = AnalyzerConfig::from_toml(toml).unwrap();
    /// assert_eq!(config.limits.max_patch_bytes, 524_288);
    /// ```
    pub fn from_toml(content: &str) -> Result<Self, DiffScopeError> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }
}

/// Size ceilings for per-file analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Maximum patch size in bytes before a file is excluded (default: 1 MiB).
    /// A patch exactly at the ceiling is accepted; one byte over is excluded.
    #[serde(default = "default_max_patch_bytes")]
    pub max_patch_bytes: usize,
}

fn default_max_patch_bytes() -> usize {
    1_048_576
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_patch_bytes: default_max_patch_bytes(),
        }
    }
}

/// Thresholds mapping |complexity delta| to an impact level.
///
/// The defaults (2 / 5 / 10) are carried over from the original tuning;
/// they are exposed here rather than re-derived.
///
/// # Examples
///
/// ```
/// use diffscope_core::ImpactThresholds;
///
/// let t = ImpactThresholds::default();
/// assert_eq!(t.medium, 2.0);
/// assert_eq!(t.high, 5.0);
/// assert_eq!(t.critical, 10.0);
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ImpactThresholds {
    /// |delta| at or above this is at least Medium (default: 2.0).
    #[serde(default = "default_medium")]
    pub medium: f64,
    /// |delta| at or above this is at least High (default: 5.0).
    #[serde(default = "default_high")]
    pub high: f64,
    /// |delta| at or above this is Critical (default: 10.0).
    #[serde(default = "default_critical")]
    pub critical: f64,
}

fn default_medium() -> f64 {
    2.0
}

fn default_high() -> f64 {
    5.0
}

fn default_critical() -> f64 {
    10.0
}

impl Default for ImpactThresholds {
    fn default() -> Self {
        Self {
            medium: default_medium(),
            high: default_high(),
            critical: default_critical(),
        }
    }
}

/// Constants for the length-based fallback heuristic.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HeuristicsConfig {
    /// Complexity units per changed line when no parse is available
    /// (default: 0.1).
    #[serde(default = "default_line_weight")]
    pub line_weight: f64,
}

fn default_line_weight() -> f64 {
    0.1
}

impl Default for HeuristicsConfig {
    fn default() -> Self {
        Self {
            line_weight: default_line_weight(),
        }
    }
}

/// Worker pool sizing and timeout settings.
///
/// # Examples
///
/// ```
/// use diffscope_core::ConcurrencyConfig;
///
/// let config = ConcurrencyConfig::default();
/// assert_eq!(config.workers, 0); // 0 = one per available core
/// assert!(config.worker_count() >= 1);
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ConcurrencyConfig {
    /// Maximum files analyzed in parallel; 0 sizes the pool to the number
    /// of available cores (default: 0).
    #[serde(default)]
    pub workers: usize,
    /// Per-file analysis deadline in milliseconds; exceeding it soft-skips
    /// the file (default: 5000).
    #[serde(default = "default_file_timeout_ms")]
    pub file_timeout_ms: u64,
    /// Per-commit analysis deadline in milliseconds; exceeding it yields a
    /// partial result from completed files (default: 30000).
    #[serde(default = "default_commit_timeout_ms")]
    pub commit_timeout_ms: u64,
}

fn default_file_timeout_ms() -> u64 {
    5_000
}

fn default_commit_timeout_ms() -> u64 {
    30_000
}

impl Default for ConcurrencyConfig {
    fn default() -> Self {
        Self {
            workers: 0,
            file_timeout_ms: default_file_timeout_ms(),
            commit_timeout_ms: default_commit_timeout_ms(),
        }
    }
}

impl ConcurrencyConfig {
    /// Resolve the configured worker count, treating 0 as "one per core".
    pub fn worker_count(&self) -> usize {
        if self.workers > 0 {
            self.workers
        } else {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        }
    }
}
