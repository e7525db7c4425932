use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Programming language detected from a file path.
///
/// Detection is total: every filename maps to some variant, with
/// [`Language::Unknown`] as the catch-all.
///
/// # Examples
///
/// ```
/// use diffscope_lang::Language;
///
/// assert_eq!(Language::from_path("src/app.py"), Language::Python);
/// assert_eq!(Language::from_path("web/index.tsx"), Language::TypeScript);
/// assert_eq!(Language::from_path("Dockerfile"), Language::Dockerfile);
/// assert_eq!(Language::from_path("Gemfile"), Language::Ruby);
/// assert_eq!(Language::from_path("notes.xyz"), Language::Unknown);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    JavaScript,
    TypeScript,
    Java,
    Cpp,
    C,
    CSharp,
    Go,
    Rust,
    Php,
    Ruby,
    Swift,
    Kotlin,
    Scala,
    Shell,
    Html,
    Css,
    Scss,
    Sass,
    Less,
    Sql,
    Json,
    Xml,
    Yaml,
    Toml,
    Markdown,
    RestructuredText,
    Text,
    Dockerfile,
    Makefile,
    Unknown,
}

impl Language {
    /// Detect language from a file path: extension lookup first, then a
    /// small table of well-known filenames.
    pub fn from_path(path: &str) -> Self {
        if path.is_empty() {
            return Language::Unknown;
        }

        let p = Path::new(path);
        if let Some(ext) = p.extension().and_then(|e| e.to_str()) {
            let lang = Self::from_extension(&ext.to_lowercase());
            if lang != Language::Unknown {
                return lang;
            }
        }

        let filename = p
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("")
            .to_lowercase();
        match filename.as_str() {
            "dockerfile" => Language::Dockerfile,
            "makefile" => Language::Makefile,
            "rakefile" | "gemfile" => Language::Ruby,
            "package.json" => Language::Json,
            "pyproject.toml" | "cargo.toml" => Language::Toml,
            _ => Language::Unknown,
        }
    }

    /// Detect language from a file extension string (without the dot).
    pub fn from_extension(ext: &str) -> Self {
        match ext {
            "py" => Language::Python,
            "js" | "jsx" => Language::JavaScript,
            "ts" | "tsx" => Language::TypeScript,
            "java" => Language::Java,
            "cpp" | "cc" | "cxx" | "hpp" | "hxx" | "hh" => Language::Cpp,
            "c" | "h" => Language::C,
            "cs" => Language::CSharp,
            "go" => Language::Go,
            "rs" => Language::Rust,
            "php" => Language::Php,
            "rb" => Language::Ruby,
            "swift" => Language::Swift,
            "kt" | "kts" => Language::Kotlin,
            "scala" => Language::Scala,
            "sh" | "bash" | "zsh" => Language::Shell,
            "html" | "htm" => Language::Html,
            "css" => Language::Css,
            "scss" => Language::Scss,
            "sass" => Language::Sass,
            "less" => Language::Less,
            "sql" => Language::Sql,
            "json" => Language::Json,
            "xml" => Language::Xml,
            "yaml" | "yml" => Language::Yaml,
            "toml" => Language::Toml,
            "md" => Language::Markdown,
            "rst" => Language::RestructuredText,
            "txt" => Language::Text,
            _ => Language::Unknown,
        }
    }

    /// The lowercase identifier used in results and breakdown maps.
    pub fn name(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Java => "java",
            Language::Cpp => "cpp",
            Language::C => "c",
            Language::CSharp => "csharp",
            Language::Go => "go",
            Language::Rust => "rust",
            Language::Php => "php",
            Language::Ruby => "ruby",
            Language::Swift => "swift",
            Language::Kotlin => "kotlin",
            Language::Scala => "scala",
            Language::Shell => "shell",
            Language::Html => "html",
            Language::Css => "css",
            Language::Scss => "scss",
            Language::Sass => "sass",
            Language::Less => "less",
            Language::Sql => "sql",
            Language::Json => "json",
            Language::Xml => "xml",
            Language::Yaml => "yaml",
            Language::Toml => "toml",
            Language::Markdown => "markdown",
            Language::RestructuredText => "restructuredtext",
            Language::Text => "text",
            Language::Dockerfile => "dockerfile",
            Language::Makefile => "makefile",
            Language::Unknown => "unknown",
        }
    }

    /// Whether complexity and structural analysis is attempted for this
    /// language. Everything outside this fixed allow-list is routed to
    /// `unsupported` without error.
    ///
    /// # Examples
    ///
    /// ```
    /// use diffscope_lang::Language;
    ///
    /// assert!(Language::Python.is_analyzable());
    /// assert!(Language::CSharp.is_analyzable());
    /// assert!(!Language::Yaml.is_analyzable());
    /// assert!(!Language::Unknown.is_analyzable());
    /// ```
    pub fn is_analyzable(&self) -> bool {
        matches!(
            self,
            Language::Python
                | Language::JavaScript
                | Language::TypeScript
                | Language::Java
                | Language::Cpp
                | Language::C
                | Language::CSharp
                | Language::Go
                | Language::Rust
                | Language::Php
                | Language::Ruby
                | Language::Swift
                | Language::Kotlin
                | Language::Scala
        )
    }

    /// Get the tree-sitter grammar for this language.
    ///
    /// Returns `None` for languages without a partial-source parsing
    /// strategy (notably C# and Scala, which are analyzable but
    /// heuristic-only).
    pub fn grammar(&self) -> Option<tree_sitter::Language> {
        match self {
            Language::Rust => Some(tree_sitter_rust::LANGUAGE.into()),
            Language::Python => Some(tree_sitter_python::LANGUAGE.into()),
            Language::TypeScript => Some(tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()),
            Language::JavaScript => Some(tree_sitter_javascript::LANGUAGE.into()),
            Language::Go => Some(tree_sitter_go::LANGUAGE.into()),
            Language::Java => Some(tree_sitter_java::LANGUAGE.into()),
            Language::C => Some(tree_sitter_c::LANGUAGE.into()),
            Language::Cpp => Some(tree_sitter_cpp::LANGUAGE.into()),
            Language::Ruby => Some(tree_sitter_ruby::LANGUAGE.into()),
            Language::Php => Some(tree_sitter_php::LANGUAGE_PHP.into()),
            Language::Kotlin => Some(tree_sitter_kotlin_ng::LANGUAGE.into()),
            Language::Swift => Some(tree_sitter_swift::LANGUAGE.into()),
            _ => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
