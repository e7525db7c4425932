use std::path::Path;

use diffscope_core::FileCategory;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::language::Language;

/// Path patterns marking a file as test code.
static TEST_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)(^|/)test_[^/]*\.py$",
        r"(?i)_test\.(py|go|rs)$",
        r"(?i)\.(test|spec)\.(js|jsx|ts|tsx)$",
        r"Tests?\.java$",
        r"(?i)(^|/)(test|tests|__tests__|spec)/",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("test pattern is valid"))
    .collect()
});

/// Extensions that are always treated as binary, regardless of any
/// language guess.
const BINARY_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "bmp", "ico", "svg", "pdf", "doc", "docx", "xls", "xlsx", "ppt",
    "pptx", "zip", "tar", "gz", "bz2", "rar", "7z", "exe", "dll", "so", "dylib", "a", "lib",
    "mp3", "mp4", "avi", "mov", "wav", "flac",
];

/// Whether a path matches the fixed test-file patterns.
///
/// # Examples
///
/// ```
/// use diffscope_lang::is_test_path;
///
/// assert!(is_test_path("tests/integration.rs"));
/// assert!(is_test_path("src/test_models.py"));
/// assert!(is_test_path("web/app.spec.ts"));
/// assert!(!is_test_path("src/models.py"));
/// ```
pub fn is_test_path(path: &str) -> bool {
    TEST_PATTERNS.iter().any(|p| p.is_match(path))
}

/// Whether a path's extension is on the fixed binary blacklist.
///
/// # Examples
///
/// ```
/// use diffscope_lang::is_binary_path;
///
/// assert!(is_binary_path("assets/logo.png"));
/// assert!(is_binary_path("dist/app.exe"));
/// assert!(!is_binary_path("src/main.rs"));
/// ```
pub fn is_binary_path(path: &str) -> bool {
    Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .is_some_and(|e| BINARY_EXTENSIONS.contains(&e.as_str()))
}

/// Derive the coarse file category from path and detected language.
///
/// The binary blacklist takes precedence over everything else so that a
/// binary asset under a `tests/` directory is still excluded from
/// analysis. Categorization is total; there are no error conditions.
///
/// # Examples
///
/// ```
/// use diffscope_core::FileCategory;
/// use diffscope_lang::{categorize, Language};
///
/// assert_eq!(categorize("src/app.py", Language::Python), FileCategory::Source);
/// assert_eq!(categorize("tests/test_app.py", Language::Python), FileCategory::Test);
/// assert_eq!(categorize("config.yaml", Language::Yaml), FileCategory::Config);
/// assert_eq!(categorize("README.md", Language::Markdown), FileCategory::Documentation);
/// assert_eq!(categorize("logo.png", Language::Unknown), FileCategory::Binary);
/// ```
pub fn categorize(path: &str, language: Language) -> FileCategory {
    if path.is_empty() {
        return FileCategory::Unknown;
    }
    if is_binary_path(path) {
        return FileCategory::Binary;
    }
    if is_test_path(path) {
        return FileCategory::Test;
    }
    match language {
        Language::Json
        | Language::Yaml
        | Language::Toml
        | Language::Xml
        | Language::Dockerfile
        | Language::Makefile => FileCategory::Config,
        Language::Markdown | Language::RestructuredText | Language::Text => {
            FileCategory::Documentation
        }
        lang if lang.is_analyzable() => FileCategory::Source,
        _ => FileCategory::Unknown,
    }
}
