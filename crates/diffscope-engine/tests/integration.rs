//! End-to-end tests driving the full analyze pipeline.

use chrono::Utc;
use diffscope_core::{ChangeStatus, DiffStats, FileChange, ImpactLevel};
use diffscope_engine::{AnalyzerConfig, CommitMetadata, DiffAnalyzer, DiffScopeError, ParsedDiff};

fn commit_meta() -> CommitMetadata {
    CommitMetadata {
        sha: "abc123".into(),
        message: "refactor request handling".into(),
        author_name: "Dev".into(),
        author_email: "dev@acme.io".into(),
        repository_name: "acme/widget".into(),
        timestamp: Utc::now(),
        branch_name: Some("main".into()),
    }
}

fn parsed_diff(files: Vec<FileChange>) -> ParsedDiff {
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

fn change(filename: &str, additions: u32, deletions: u32, patch: Option<&str>) -> FileChange {
    FileChange {
        filename: filename.into(),
        status: ChangeStatus::Modified,
        additions,
        deletions,
        patch: patch.map(String::from),
    }
}

#[tokio::test]
async fn python_modification_is_fully_analyzed() {
    let patch = "@@ -1,2 +1,4 @@\n-def handle(req):\n-    return req\n+def handle(req):\n+    if req.valid:\n+        return req\n+    return None\n";
    let diff = parsed_diff(vec![change("src/app.py", 4, 2, Some(patch))]);

    let result = DiffAnalyzer::new()
        .analyze(&diff, &commit_meta())
        .await
        .unwrap();

    assert_eq!(result.commit_sha, "abc123");
    assert_eq!(result.total_files_changed, 1);
    assert_eq!(result.total_additions, 4);
    assert_eq!(result.total_deletions, 2);
    assert_eq!(result.analyzed_files.len(), 1);

    let file = &result.analyzed_files[0];
    assert_eq!(file.language, "python");
    assert_eq!(file.change_status, ChangeStatus::Modified);
    // Removed fragment scores 1, added scores 2 (the new if).
    assert!((file.complexity_delta - 1.0).abs() < 1e-9);
    assert!((result.complexity_delta - 1.0).abs() < 1e-9);

    // Both fragments define `handle`, so the AST pass tags it added and
    // deleted, and the regex pass reports it modified as well.
    assert!(result.functions_added.contains(&"handle".to_string()));
    assert!(result.functions_deleted.contains(&"handle".to_string()));
    assert!(result.functions_modified.contains(&"handle".to_string()));

    assert!(result.language_breakdown.contains_key("python"));
    assert_eq!(result.supported_languages, vec!["python"]);
    assert!(result.binary_files_changed.is_empty());
    assert_eq!(result.unsupported_files_count, 0);
    assert!(result.analysis_duration_seconds >= 0.0);
}

#[tokio::test]
async fn binary_only_commit_yields_exclusions_not_errors() {
    let diff = parsed_diff(vec![change("assets/asset.png", 0, 0, None)]);

    let result = DiffAnalyzer::new()
        .analyze(&diff, &commit_meta())
        .await
        .unwrap();

    assert_eq!(result.binary_files_changed, vec!["assets/asset.png"]);
    assert!(result.analyzed_files.is_empty());
    assert_eq!(result.total_files_changed, 1);
    assert_eq!(result.complexity_delta, 0.0);
    assert!(result.supported_languages.is_empty());
}

#[tokio::test]
async fn every_file_lands_in_exactly_one_partition() {
    let diff = parsed_diff(vec![
        change(
            "src/app.py",
            1,
            0,
            Some("@@ -0,0 +1 @@\n+import os\n"),
        ),
        change("logo.png", 0, 0, None),
        change("notes.xyz", 3, 1, None),
    ]);

    let result = DiffAnalyzer::new()
        .analyze(&diff, &commit_meta())
        .await
        .unwrap();

    assert_eq!(result.total_files_changed, 3);
    assert_eq!(result.analyzed_files.len(), 1);
    assert_eq!(result.binary_files_changed, vec!["logo.png"]);
    assert_eq!(result.unsupported_files_count, 1);
    assert_eq!(
        result.analyzed_files.len() + result.binary_files_changed.len()
            + result.unsupported_files_count,
        result.total_files_changed
    );
    // Totals include the excluded files.
    assert_eq!(result.total_additions, 4);
    assert_eq!(result.total_deletions, 1);
}

#[tokio::test]
async fn supported_languages_reflect_only_analyzed_files() {
    let diff = parsed_diff(vec![
        change(
            "src/app.py",
            1,
            0,
            Some("@@ -0,0 +1 @@\n+x = 1\n"),
        ),
        change("config.yaml", 2, 0, Some("@@ -0,0 +1,2 @@\n+a: 1\n+b: 2\n")),
    ]);

    let result = DiffAnalyzer::new()
        .analyze(&diff, &commit_meta())
        .await
        .unwrap();

    // yaml shows up in the breakdown but is never analyzed.
    assert!(result.language_breakdown.contains_key("yaml"));
    assert_eq!(result.supported_languages, vec!["python"]);
    assert_eq!(result.unsupported_files_count, 1);
}

#[tokio::test]
async fn empty_file_list_is_fatal() {
    let diff = parsed_diff(vec![]);
    let err = DiffAnalyzer::new()
        .analyze(&diff, &commit_meta())
        .await
        .unwrap_err();
    assert!(matches!(err, DiffScopeError::InvalidInput(_)));
}

#[tokio::test]
async fn missing_commit_sha_is_fatal() {
    let mut diff = parsed_diff(vec![change("a.py", 1, 0, None)]);
    diff.commit_sha = String::new();
    let err = DiffAnalyzer::new()
        .analyze(&diff, &commit_meta())
        .await
        .unwrap_err();
    assert!(matches!(err, DiffScopeError::InvalidInput(_)));
}

#[tokio::test]
async fn oversized_patch_is_excluded_not_fatal() {
    let mut config = AnalyzerConfig::default();
    config.limits.max_patch_bytes = 64;
    let big_patch = format!("@@ -0,0 +1,20 @@\n{}", "+x = 1\n".repeat(20));
    let diff = parsed_diff(vec![
        change("src/huge.py", 20, 0, Some(&big_patch)),
        change("src/ok.py", 1, 0, Some("@@ -0,0 +1 @@\n+y = 2\n")),
    ]);

    let result = DiffAnalyzer::with_config(config)
        .analyze(&diff, &commit_meta())
        .await
        .unwrap();

    assert_eq!(result.binary_files_changed, vec!["src/huge.py"]);
    assert_eq!(result.analyzed_files.len(), 1);
    assert_eq!(result.analyzed_files[0].file_path, "src/ok.py");
    // The oversized file still counts toward totals.
    assert_eq!(result.total_additions, 21);
}

#[tokio::test]
async fn expired_commit_deadline_yields_partial_result() {
    let mut config = AnalyzerConfig::default();
    config.concurrency.commit_timeout_ms = 0;
    let diff = parsed_diff(vec![
        change("src/a.py", 1, 0, Some("@@ -0,0 +1 @@\n+x = 1\n")),
        change("src/b.py", 2, 1, Some("@@ -1 +1,2 @@\n-y = 1\n+y = 2\n+z = 3\n")),
        change("logo.png", 0, 0, None),
    ]);

    let result = DiffAnalyzer::with_config(config)
        .analyze(&diff, &commit_meta())
        .await
        .unwrap();

    // Whatever did not finish before the deadline is simply absent; the
    // result stays well-formed and totals still cover every input file.
    assert!(result.analyzed_files.len() <= 2);
    assert_eq!(result.total_files_changed, 3);
    assert_eq!(result.total_additions, 3);
    assert_eq!(result.total_deletions, 1);
    assert_eq!(result.binary_files_changed, vec!["logo.png"]);
    assert!(result.analysis_duration_seconds >= 0.0);
    assert_eq!(result.summary().files_changed, 3);
}

#[tokio::test]
async fn per_file_deadline_skips_the_file_without_failing() {
    let mut config = AnalyzerConfig::default();
    config.concurrency.file_timeout_ms = 0;
    // Enough code that parsing cannot beat the already-expired deadline.
    let body: String = (0..2000)
        .map(|i| format!("+def f{i}(x):\n+    return x\n"))
        .collect();
    let patch = format!("@@ -0,0 +1,4000 @@\n{body}");
    let diff = parsed_diff(vec![change("src/app.py", 4000, 0, Some(&patch))]);

    let result = DiffAnalyzer::with_config(config)
        .analyze(&diff, &commit_meta())
        .await
        .unwrap();

    // The timed-out file is skipped, not fatal, and never shows up as
    // analyzed. Totals still count it.
    assert!(result.analyzed_files.is_empty());
    assert_eq!(result.total_files_changed, 1);
    assert_eq!(result.total_additions, 4000);
    assert_eq!(result.complexity_delta, 0.0);
    assert!(result.supported_languages.is_empty());
}

#[tokio::test]
async fn unparseable_fragments_degrade_to_heuristics() {
    // Half a diff hunk that no parser will accept cleanly.
    let patch = "@@ -10,3 +10,4 @@\n+        } else {\n+            retry();\n+        }\n-        }\n";
    let diff = parsed_diff(vec![change("src/client.js", 3, 1, Some(patch))]);

    let result = DiffAnalyzer::new()
        .analyze(&diff, &commit_meta())
        .await
        .unwrap();

    // Analysis still succeeds; both fragments score via the line heuristic.
    assert_eq!(result.analyzed_files.len(), 1);
    assert_eq!(result.analyzed_files[0].language, "javascript");
    assert_eq!(result.complexity_delta, 0.0);
}

#[tokio::test]
async fn heuristic_language_uses_line_count_delta() {
    let diff = parsed_diff(vec![change("src/Program.cs", 30, 10, None)]);

    let result = DiffAnalyzer::new()
        .analyze(&diff, &commit_meta())
        .await
        .unwrap();

    assert_eq!(result.analyzed_files.len(), 1);
    let file = &result.analyzed_files[0];
    assert_eq!(file.language, "csharp");
    // (30 - 10) * 0.1
    assert!((file.complexity_delta - 2.0).abs() < 1e-9);
}

#[tokio::test]
async fn impact_classification_flows_through_config() {
    let mut config = AnalyzerConfig::default();
    config.impact.medium = 1.0;
    let diff = parsed_diff(vec![change("src/Program.cs", 30, 10, None)]);

    let result = DiffAnalyzer::with_config(config.clone())
        .analyze(&diff, &commit_meta())
        .await
        .unwrap();
    let delta = result.analyzed_files[0].complexity_delta;
    assert_eq!(
        ImpactLevel::from_delta_with(delta, &config.impact),
        ImpactLevel::Medium
    );
}

#[tokio::test]
async fn analysis_is_deterministic_modulo_duration() {
    let patch = "@@ -1,2 +1,3 @@\n-def f(x):\n-    return x\n+def f(x):\n+    if x:\n+        return x\n";
    let diff = parsed_diff(vec![
        change("src/a.py", 3, 2, Some(patch)),
        change("src/b.rs", 2, 0, Some("@@ -0,0 +1,2 @@\n+pub fn run() {\n+}\n")),
        change("logo.png", 0, 0, None),
    ]);

    let analyzer = DiffAnalyzer::new();
    let mut first = analyzer.analyze(&diff, &commit_meta()).await.unwrap();
    let mut second = analyzer.analyze(&diff, &commit_meta()).await.unwrap();
    first.analysis_duration_seconds = 0.0;
    second.analysis_duration_seconds = 0.0;
    first.timestamp = second.timestamp;

    assert_eq!(
        serde_json::to_value(&first).unwrap(),
        serde_json::to_value(&second).unwrap()
    );
}

#[tokio::test]
async fn summary_reflects_the_result() {
    let diff = parsed_diff(vec![change(
        "src/app.py",
        2,
        0,
        Some("@@ -0,0 +1,2 @@\n+def added():\n+    return 1\n"),
    )]);

    let result = DiffAnalyzer::new()
        .analyze(&diff, &commit_meta())
        .await
        .unwrap();
    let summary = result.summary();

    assert_eq!(summary.commit_sha, "abc123");
    assert_eq!(summary.dominant_language, "python");
    assert_eq!(summary.net_line_change, 2);
    assert!(summary.functions_changed >= 1);
}
