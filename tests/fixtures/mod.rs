//! Shared fixture paths for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

/// Root of the fixture tree
pub fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Well-formed SummaryJavadoc examples (three `.java`, one `.txt`)
pub fn summary_javadoc_dir() -> PathBuf {
    fixtures_root().join("xdocs/summaryjavadoc")
}

/// One good fixture followed by two that fail to parse
pub fn broken_dir() -> PathBuf {
    fixtures_root().join("xdocs/broken")
}

/// Path to a single SummaryJavadoc example
pub fn summary_example(n: usize, ext: &str) -> PathBuf {
    summary_javadoc_dir().join(format!("Example{}.{}", n, ext))
}

/// `<root>\n{{PLACEHOLDER}}\n</root>`
pub fn minimal_template() -> PathBuf {
    fixtures_root().join("templates/minimal.xml")
}
