//! Batch extraction over fixture directories.

mod fixtures;

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use fixtures::{broken_dir, minimal_template, summary_javadoc_dir};
use tempfile::{NamedTempFile, TempDir};
use xdocs_config_extractor::extract::Outcome;
use xdocs_config_extractor::{EffectiveConfig, ExtractorConfig, Extractor};

fn config_for(output: &TempDir) -> ExtractorConfig {
    ExtractorConfig {
        input_dir: Some(summary_javadoc_dir()),
        output_dir: Some(output.path().to_path_buf()),
        template: Some(minimal_template()),
        ..Default::default()
    }
}

#[test]
fn test_one_document_per_fixture() {
    let output = TempDir::new().unwrap();
    let report = Extractor::new(config_for(&output)).unwrap().run().unwrap();

    assert_eq!(report.fixtures.len(), 4);
    assert_eq!(report.written_count(), 4);
    assert!(!report.has_failures());
    assert!(report.all_in_one.is_none());

    for stem in ["Example1", "Example2", "Example3", "Example4"] {
        let path = output.path().join(stem).join(format!("{}-config.xml", stem));
        assert!(path.is_file(), "missing {}", path.display());
    }
    assert!(!output.path().join("notes").exists());

    let first = fs::read_to_string(output.path().join("Example1/Example1-config.xml")).unwrap();
    assert_eq!(first, "<root>\n<module name=\"SummaryJavadoc\"/>\n</root>");
}

#[test]
fn test_failures_do_not_abort_batch() {
    let output = TempDir::new().unwrap();
    let config = ExtractorConfig {
        input_dir: Some(broken_dir()),
        ..config_for(&output)
    };
    let report = Extractor::new(config).unwrap().run().unwrap();

    assert_eq!(report.fixtures.len(), 3);
    assert_eq!(report.written_count(), 1);
    assert_eq!(report.failed_count(), 2);
    assert!(report.has_failures());

    assert!(matches!(report.fixtures[0].outcome, Outcome::Written { .. }));
    match &report.fixtures[1].outcome {
        Outcome::Failed { error } => {
            assert!(error.contains("Example2.java"), "{}", error);
            assert!(error.contains("never closed"), "{}", error);
        }
        other => panic!("expected failure, got {:?}", other),
    }
    match &report.fixtures[2].outcome {
        Outcome::Failed { error } => assert!(error.contains("/*xml"), "{}", error),
        other => panic!("expected failure, got {:?}", other),
    }

    assert!(output.path().join("Example1/Example1-config.xml").is_file());
    assert!(!output.path().join("Example2/Example2-config.xml").exists());
}

#[test]
fn test_all_in_one_document() {
    let output = TempDir::new().unwrap();
    let mut config = config_for(&output);
    config.all_in_one.enabled = true;
    let report = Extractor::new(config).unwrap().run().unwrap();

    let target = output.path().join("all-examples-config.xml");
    assert_eq!(
        report.all_in_one,
        Some(Outcome::Written {
            output: target.clone()
        })
    );

    let merged = fs::read_to_string(&target).unwrap();
    assert_eq!(merged.matches("<module name=").count(), 4);
    assert_eq!(merged.matches("value=\"example1\"").count(), 1);
    assert_eq!(merged.matches("value=\"example2\"").count(), 1);
    assert_eq!(merged.matches("value=\"example3\"").count(), 2);
    assert_eq!(merged.matches("value=\"example4\"").count(), 0);
}

#[test]
fn test_all_in_one_failure_is_recorded() {
    let output = TempDir::new().unwrap();
    let mut config = ExtractorConfig {
        input_dir: Some(broken_dir()),
        ..config_for(&output)
    };
    config.all_in_one.enabled = true;
    let report = Extractor::new(config).unwrap().run().unwrap();

    assert!(matches!(report.all_in_one, Some(Outcome::Failed { .. })));
    assert_eq!(report.written_count(), 1);
}

#[test]
fn test_relative_paths_resolve_against_project_root() {
    let output = TempDir::new().unwrap();
    let config = ExtractorConfig {
        project_root: PathBuf::from(env!("CARGO_MANIFEST_DIR")),
        input_dir: Some(PathBuf::from("tests/fixtures/xdocs/summaryjavadoc")),
        output_dir: Some(output.path().to_path_buf()),
        template: Some(PathBuf::from("tests/fixtures/templates/minimal.xml")),
        ..Default::default()
    };
    let report = Extractor::new(config).unwrap().run().unwrap();
    assert_eq!(report.written_count(), 4);
}

#[test]
fn test_missing_template_stops_batch() {
    let output = TempDir::new().unwrap();
    let config = ExtractorConfig {
        template: Some(PathBuf::from("/nonexistent/template.xml")),
        ..config_for(&output)
    };
    assert!(Extractor::new(config).unwrap().run().is_err());
}

#[test]
fn test_config_file_drives_extraction() {
    let output = TempDir::new().unwrap();
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
input_dir = "{input}"
output_dir = "{output}"
output_suffix = ".checkstyle.xml"
sort_output = true

[all_in_one]
enabled = true
file_name = "merged.xml"
"#,
        input = summary_javadoc_dir().display(),
        output = output.path().display(),
    )
    .unwrap();

    let effective = EffectiveConfig::build(Some(file.path()), None).unwrap();
    let config = effective.extractor_config().unwrap();
    let report = Extractor::new(config).unwrap().run().unwrap();

    assert_eq!(report.written_count(), 4);
    assert!(output.path().join("Example3/Example3.checkstyle.xml").is_file());
    assert!(output.path().join("merged.xml").is_file());
}
