//! Core types, configuration, and error handling for the diffscope engine.
//!
//! This crate provides the shared foundation used by the other diffscope
//! crates:
//! - [`DiffScopeError`] — unified error type using `thiserror`, with
//!   soft-skip variants the orchestrator routes per file
//! - [`AnalyzerConfig`] — configuration loaded from `.diffscope.toml`
//! - Input types: [`ParsedDiff`], [`FileChange`], [`CommitMetadata`]
//! - Result types: [`DiffAnalysisResult`], [`AnalyzedFile`],
//!   [`ComplexityMetrics`], [`StructuralChanges`], [`LanguageStats`]

mod config;
mod error;
mod types;

pub use config::{
    AnalyzerConfig, ConcurrencyConfig, HeuristicsConfig, ImpactThresholds, LimitsConfig,
};
pub use error::DiffScopeError;
pub use types::{
    AnalysisSummary, AnalyzedFile, ChangeStatus, CommitMetadata, ComplexityMetrics,
    DiffAnalysisResult, DiffStats, FileCategory, FileChange, ImpactLevel, LanguageStats,
    ParsedDiff, StructuralChanges,
};

/// A convenience `Result` type for diffscope operations.
pub type Result<T> = std::result::Result<T, DiffScopeError>;
