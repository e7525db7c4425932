//! Language classification for changed files.
//!
//! Maps filenames to languages via extension and well-known-filename
//! tables, derives a coarse file category (source/test/config/doc/binary),
//! and partitions a commit's file changes into analyzable, unsupported,
//! and binary sets with per-language statistics. Classification is total:
//! any filename maps to *some* language and category without error.

mod category;
mod classifier;
mod language;

pub use category::{categorize, is_binary_path, is_test_path};
pub use classifier::{classify, Classification};
pub use language::Language;
