//! Commit-level diff analysis orchestration.
//!
//! [`DiffAnalyzer`] drives the whole pipeline for one commit: validate the
//! input, partition files by language and analyzability, analyze each
//! eligible file concurrently with bounded parallelism and timeouts, then
//! fold the per-file outcomes into a [`DiffAnalysisResult`] in input file
//! order.
//!
//! Failure policy: only structurally invalid input (no files, missing SHA)
//! fails the call. Binary and oversized files land in the result's
//! exclusion list; per-file failures and timeouts are logged and skipped;
//! a per-commit timeout yields a partial result from whatever completed.

mod aggregate;

pub use diffscope_core::{
    AnalyzerConfig, CommitMetadata, DiffAnalysisResult, DiffScopeError, ParsedDiff, Result,
};

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Semaphore;
use tokio::time::{timeout, timeout_at};
use tracing::{debug, error, warn};

use diffscope_analysis::strategy_for;
use diffscope_core::FileChange;
use diffscope_lang::{categorize, classify, Language};

use crate::aggregate::FileAnalysis;

enum FileOutcome {
    Analyzed(Box<FileAnalysis>),
    /// Excluded from analysis; the path goes to the result's exclusion list.
    Excluded(String),
    /// Failed or timed out; logged and dropped.
    Skipped,
}

/// The commit-level analysis orchestrator.
///
/// Cheap to construct; holds only configuration. One instance can serve
/// many commits concurrently.
///
/// # Examples
///
/// ```no_run
/// use diffscope_engine::{CommitMetadata, DiffAnalyzer, ParsedDiff};
///
/// # async fn run(diff: ParsedDiff, commit: CommitMetadata) -> diffscope_engine::Result<()> {
/// let analyzer = DiffAnalyzer::new();
/// let result = analyzer.analyze(&diff, &commit).await?;
/// println!("complexity delta: {}", result.complexity_delta);
/// # Ok(())
/// # }
/// ```
pub struct DiffAnalyzer {
    config: Arc<AnalyzerConfig>,
}

impl Default for DiffAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl DiffAnalyzer {
    /// Build an analyzer with default configuration.
    pub fn new() -> Self {
        Self::with_config(AnalyzerConfig::default())
    }

    /// Build an analyzer with explicit configuration.
    pub fn with_config(config: AnalyzerConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Analyze one commit's diff.
    ///
    /// # Errors
    ///
    /// Returns [`DiffScopeError::InvalidInput`] when the diff has no file
    /// changes or the commit SHA is missing. Everything else degrades into
    /// exclusions, skips, or a partial result rather than an error.
    pub async fn analyze(
        &self,
        diff: &ParsedDiff,
        commit: &CommitMetadata,
    ) -> Result<DiffAnalysisResult> {
        validate(diff, commit)?;
        let start = Instant::now();

        let classification = classify(&diff.file_changes);
        debug!(
            commit = %diff.commit_sha,
            files = diff.file_changes.len(),
            analyzable = classification.analyzable.len(),
            binary = classification.binary_files.len(),
            unsupported = classification.unsupported.len(),
            "classified commit"
        );

        let semaphore = Arc::new(Semaphore::new(self.config.concurrency.worker_count()));
        let file_timeout = Duration::from_millis(self.config.concurrency.file_timeout_ms);

        let mut handles = Vec::with_capacity(classification.analyzable.len());
        for change in &classification.analyzable {
            let change = change.clone();
            let config = Arc::clone(&self.config);
            let sem = Arc::clone(&semaphore);
            handles.push(tokio::spawn(async move {
                let _permit = match sem.acquire().await {
                    Ok(permit) => permit,
                    Err(_) => return FileOutcome::Skipped,
                };
                let filename = change.filename.clone();
                let work = tokio::task::spawn_blocking(move || analyze_file(&change, &config));
                match timeout(file_timeout, work).await {
                    Ok(Ok(outcome)) => outcome,
                    Ok(Err(join_err)) => {
                        error!(file = %filename, error = %join_err, "analysis task failed");
                        FileOutcome::Skipped
                    }
                    Err(_) => {
                        warn!(file = %filename, "per-file deadline exceeded, skipping");
                        FileOutcome::Skipped
                    }
                }
            }));
        }

        let spawned = handles.len();
        let deadline = tokio::time::Instant::now()
            + Duration::from_millis(self.config.concurrency.commit_timeout_ms);
        let mut analyses = Vec::new();
        let mut oversized = Vec::new();
        let mut panicked = 0usize;

        // Results are awaited in spawn order, which is input file order, so
        // aggregation stays deterministic regardless of completion order.
        let mut pending = handles.into_iter();
        loop {
            let Some(handle) = pending.next() else { break };
            match timeout_at(deadline, handle).await {
                Ok(Ok(FileOutcome::Analyzed(analysis))) => analyses.push(*analysis),
                Ok(Ok(FileOutcome::Excluded(path))) => oversized.push(path),
                Ok(Ok(FileOutcome::Skipped)) => {}
                Ok(Err(join_err)) => {
                    error!(commit = %diff.commit_sha, error = %join_err, "analysis task panicked");
                    panicked += 1;
                }
                Err(_) => {
                    warn!(
                        commit = %diff.commit_sha,
                        "commit deadline exceeded, returning partial result"
                    );
                    for rest in pending {
                        rest.abort();
                    }
                    break;
                }
            }
        }

        if spawned > 0 && panicked == spawned {
            error!(
                commit = %diff.commit_sha,
                "no per-file analysis completed, returning degraded result"
            );
            return Ok(aggregate::degraded(
                diff,
                commit,
                start.elapsed().as_secs_f64(),
            ));
        }

        let result = aggregate::assemble(
            diff,
            commit,
            &classification,
            &analyses,
            &oversized,
            start.elapsed().as_secs_f64(),
        );
        debug!(
            commit = %diff.commit_sha,
            analyzed = result.analyzed_files.len(),
            delta = result.complexity_delta,
            "commit analysis complete"
        );
        Ok(result)
    }
}

fn validate(diff: &ParsedDiff, commit: &CommitMetadata) -> Result<()> {
    if diff.file_changes.is_empty() {
        return Err(DiffScopeError::InvalidInput(
            "commit has no file changes".into(),
        ));
    }
    if diff.commit_sha.trim().is_empty() || commit.sha.trim().is_empty() {
        return Err(DiffScopeError::InvalidInput("commit SHA is missing".into()));
    }
    Ok(())
}

/// Analyze one file. Pure with respect to its inputs; runs on the blocking
/// pool because tree-sitter parsing is CPU-bound.
fn analyze_file(change: &FileChange, config: &AnalyzerConfig) -> FileOutcome {
    let language = Language::from_path(&change.filename);
    let strategy = strategy_for(language);

    let metrics = match strategy.estimate_complexity(change, config) {
        Ok(metrics) => metrics,
        Err(
            DiffScopeError::FileTooLarge { path, .. } | DiffScopeError::BinaryFile(path),
        ) => {
            warn!(file = %path, "excluding file from analysis");
            return FileOutcome::Excluded(path);
        }
        Err(err) => {
            warn!(file = %change.filename, error = %err, "complexity estimation failed, skipping");
            return FileOutcome::Skipped;
        }
    };

    let structure = match strategy.extract_structure(change, config) {
        Ok(structure) => structure,
        Err(err) => {
            warn!(file = %change.filename, error = %err, "structural pass failed, skipping");
            return FileOutcome::Skipped;
        }
    };

    FileOutcome::Analyzed(Box::new(FileAnalysis {
        category: categorize(&change.filename, language),
        change: change.clone(),
        language,
        metrics,
        structure,
    }))
}
