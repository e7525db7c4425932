//! Regex tables for the line-based structural pass.
//!
//! These run over the changed lines of every analyzable file, including the
//! ones the AST pass already handled. A line-based diff cannot distinguish a
//! brand-new function from an edit inside an existing one, so everything the
//! regexes match is recorded as *modified*/*changed* and the overlap with
//! the AST lists is kept.

use diffscope_core::StructuralChanges;
use diffscope_lang::Language;
use once_cell::sync::Lazy;
use regex::Regex;

pub(crate) struct LanguagePatterns {
    functions: Vec<Regex>,
    classes: Vec<Regex>,
    imports: Vec<Regex>,
}

fn compile(sources: &[&str]) -> Vec<Regex> {
    sources
        .iter()
        .map(|s| Regex::new(s).expect("hardcoded pattern"))
        .collect()
}

static PYTHON: Lazy<LanguagePatterns> = Lazy::new(|| LanguagePatterns {
    functions: compile(&[r"(?m)^\s*(?:async\s+)?def\s+(\w+)\s*\("]),
    classes: compile(&[r"(?m)^\s*class\s+(\w+)\s*[:\(]"]),
    imports: compile(&[
        r"(?m)^\s*import\s+([\w.]+)",
        r"(?m)^\s*from\s+([\w.]+)\s+import\b",
    ]),
});

static ECMA: Lazy<LanguagePatterns> = Lazy::new(|| LanguagePatterns {
    functions: compile(&[
        r"(?m)\bfunction\s+(\w+)\s*\(",
        r"(?m)^\s*(?:export\s+)?(?:const|let|var)\s+(\w+)\s*=\s*(?:async\s+)?(?:function\b|\()",
    ]),
    classes: compile(&[r"\bclass\s+(\w+)"]),
    imports: compile(&[
        r#"(?m)\bimport\s+[^;]*?from\s+['"]([^'"]+)['"]"#,
        r#"(?m)\brequire\(\s*['"]([^'"]+)['"]"#,
    ]),
});

static RUST: Lazy<LanguagePatterns> = Lazy::new(|| LanguagePatterns {
    functions: compile(&[r"(?m)\bfn\s+(\w+)"]),
    classes: compile(&[r"(?m)\b(?:struct|enum|trait)\s+(\w+)"]),
    imports: compile(&[r"(?m)^\s*use\s+([\w:]+)"]),
});

static GO: Lazy<LanguagePatterns> = Lazy::new(|| LanguagePatterns {
    functions: compile(&[r"(?m)^\s*func\s+(?:\([^)]*\)\s*)?(\w+)\s*\("]),
    classes: compile(&[r"(?m)^\s*type\s+(\w+)\s+(?:struct|interface)\b"]),
    imports: compile(&[r#"(?m)\bimport\s+(?:\w+\s+)?"([^"]+)""#]),
});

static JAVA: Lazy<LanguagePatterns> = Lazy::new(|| LanguagePatterns {
    functions: compile(&[
        r"(?m)\b(?:public|protected|private|static|final|synchronized|abstract)\s+[\w<>\[\],\s]*?(\w+)\s*\(",
    ]),
    classes: compile(&[r"\b(?:class|interface|enum)\s+(\w+)"]),
    imports: compile(&[r"(?m)^\s*import\s+(?:static\s+)?([\w.]+(?:\.\*)?)\s*;"]),
});

static CSHARP: Lazy<LanguagePatterns> = Lazy::new(|| LanguagePatterns {
    functions: compile(&[
        r"(?m)\b(?:public|protected|private|internal|static|virtual|override|async)\s+[\w<>\[\],\s]*?(\w+)\s*\(",
    ]),
    classes: compile(&[r"\b(?:class|interface|struct|record)\s+(\w+)"]),
    imports: compile(&[r"(?m)^\s*using\s+([\w.]+)\s*;"]),
});

static C_CPP: Lazy<LanguagePatterns> = Lazy::new(|| LanguagePatterns {
    functions: compile(&[r"(?m)^\s*(?:[\w*]+\s+)+\*?(\w+)\s*\([^)]*\)\s*\{"]),
    classes: compile(&[r"\b(?:class|struct)\s+(\w+)"]),
    imports: compile(&[r#"(?m)^\s*#include\s*[<"]([^>"]+)[>"]"#]),
});

static RUBY: Lazy<LanguagePatterns> = Lazy::new(|| LanguagePatterns {
    functions: compile(&[r"(?m)^\s*def\s+(\w+[?!]?)"]),
    classes: compile(&[r"(?m)^\s*(?:class|module)\s+(\w+)"]),
    imports: compile(&[r#"(?m)^\s*require(?:_relative)?\s+['"]([^'"]+)['"]"#]),
});

static PHP: Lazy<LanguagePatterns> = Lazy::new(|| LanguagePatterns {
    functions: compile(&[r"(?m)\bfunction\s+(\w+)\s*\("]),
    classes: compile(&[r"\b(?:class|interface|trait)\s+(\w+)"]),
    imports: compile(&[r"(?m)^\s*use\s+([\w\\]+)"]),
});

static SWIFT: Lazy<LanguagePatterns> = Lazy::new(|| LanguagePatterns {
    functions: compile(&[r"\bfunc\s+(\w+)"]),
    classes: compile(&[r"\b(?:class|struct|protocol|enum)\s+(\w+)"]),
    imports: compile(&[r"(?m)^\s*import\s+(\w+)"]),
});

static KOTLIN: Lazy<LanguagePatterns> = Lazy::new(|| LanguagePatterns {
    functions: compile(&[r"\bfun\s+(\w+)"]),
    classes: compile(&[r"\b(?:class|object|interface)\s+(\w+)"]),
    imports: compile(&[r"(?m)^\s*import\s+([\w.]+)"]),
});

static SCALA: Lazy<LanguagePatterns> = Lazy::new(|| LanguagePatterns {
    functions: compile(&[r"\bdef\s+(\w+)"]),
    classes: compile(&[r"\b(?:class|object|trait)\s+(\w+)"]),
    imports: compile(&[r"(?m)^\s*import\s+([\w.]+)"]),
});

fn patterns_for(language: Language) -> Option<&'static LanguagePatterns> {
    match language {
        Language::Python => Some(&PYTHON),
        Language::JavaScript | Language::TypeScript => Some(&ECMA),
        Language::Rust => Some(&RUST),
        Language::Go => Some(&GO),
        Language::Java => Some(&JAVA),
        Language::CSharp => Some(&CSHARP),
        Language::C | Language::Cpp => Some(&C_CPP),
        Language::Ruby => Some(&RUBY),
        Language::Php => Some(&PHP),
        Language::Swift => Some(&SWIFT),
        Language::Kotlin => Some(&KOTLIN),
        Language::Scala => Some(&SCALA),
        _ => None,
    }
}

/// Run the language's regex tables over the combined changed lines,
/// recording matches in the modified/changed lists.
pub(crate) fn apply_patterns(language: Language, text: &str, changes: &mut StructuralChanges) {
    let Some(patterns) = patterns_for(language) else {
        return;
    };
    collect_captures(&patterns.functions, text, &mut changes.functions_modified);
    collect_captures(&patterns.classes, text, &mut changes.classes_modified);
    collect_captures(&patterns.imports, text, &mut changes.imports_changed);
}

fn collect_captures(patterns: &[Regex], text: &str, out: &mut Vec<String>) {
    for pattern in patterns {
        for caps in pattern.captures_iter(text) {
            if let Some(m) = caps.get(1) {
                out.push(m.as_str().to_string());
            }
        }
    }
}
