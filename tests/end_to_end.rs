//! Single and merged rendering of real fixture files.

mod fixtures;

use config_tree::{sort_properties, ConfigNode, Configuration, FixtureParser, InlineConfigParser};
use fixtures::{minimal_template, summary_example};
use xdocs_config_extractor::{load_template, ConfigSerializer, SerializeError};

fn minimal() -> String {
    load_template(Some(minimal_template().as_path())).expect("minimal template")
}

#[test]
fn test_self_closing_module_document() {
    let document = ConfigSerializer::new()
        .render_single(&summary_example(1, "java"), &minimal())
        .unwrap();
    assert_eq!(document, "<root>\n<module name=\"SummaryJavadoc\"/>\n</root>");
}

#[test]
fn test_multiline_property_value() {
    let document = ConfigSerializer::new()
        .render_single(&summary_example(2, "java"), &minimal())
        .unwrap();
    assert_eq!(
        document,
        "<root>\n\
         <module name=\"SummaryJavadoc\">\n\
         \x20           <property name=\"forbiddenSummaryFragments\" \
         value=\"^@return the *|^This method returns |^A [{]@code [a-zA-Z0-9]+[}]( is a )\"/>\n\
         \x20       </module>\n\
         </root>"
    );
}

#[test]
fn test_properties_sorted_and_modules_in_order() {
    let document = ConfigSerializer::new()
        .render_single(&summary_example(3, "java"), &minimal())
        .unwrap();
    assert_eq!(
        document,
        "<root>\n\
         <module name=\"SummaryJavadoc\">\n\
         \x20           <property name=\"id\" value=\"summary\"/>\n\
         \x20           <property name=\"period\" value=\"!\"/>\n\
         \x20       </module>\n\
         \n\
         \x20       <module name=\"JavadocStyle\">\n\
         \x20           <property name=\"checkFirstSentence\" value=\"false\"/>\n\
         \x20           <property name=\"scope\" value=\"public\"/>\n\
         \x20       </module>\n\
         </root>"
    );
}

#[test]
fn test_fixture_without_tree_walker() {
    let document = ConfigSerializer::new()
        .render_single(&summary_example(4, "txt"), &minimal())
        .unwrap();
    assert_eq!(document, "<root>\n\n</root>");
}

#[test]
fn test_bundled_template_document() {
    let template = load_template(None).unwrap();
    let document = ConfigSerializer::new()
        .render_single(&summary_example(1, "java"), &template)
        .unwrap();
    assert!(document.starts_with("<?xml version=\"1.0\"?>"));
    assert!(document.contains(
        "    <module name=\"TreeWalker\">\n        <module name=\"SummaryJavadoc\"/>\n    </module>\n</module>"
    ));
    assert!(!document.contains("{{PLACEHOLDER}}"));
}

#[test]
fn test_rendered_document_parses_back() {
    let template = load_template(None).unwrap();
    let document = ConfigSerializer::new()
        .render_single(&summary_example(3, "java"), &template)
        .unwrap();
    let reparsed = InlineConfigParser::new()
        .parse_str(&format!("/*xml\n{}\n*/\n", document))
        .unwrap();
    let original = InlineConfigParser::new()
        .parse(&summary_example(3, "java"))
        .unwrap();

    let checks: Vec<&ConfigNode> = reparsed.tree_walker().unwrap().children().iter().collect();
    let expected: Vec<&ConfigNode> = original.tree_walker().unwrap().children().iter().collect();
    assert_eq!(checks, expected);
}

#[test]
fn test_merged_document_ids() {
    let fixtures = vec![
        summary_example(1, "java"),
        summary_example(4, "txt"),
        summary_example(3, "java"),
    ];
    let document = ConfigSerializer::new()
        .render_merged(&fixtures, &minimal())
        .unwrap();

    // Example3 already declares id="summary"; the injected label replaces it.
    assert_eq!(
        document,
        "<root>\n\
         <module name=\"SummaryJavadoc\">\n\
         \x20           <property name=\"id\" value=\"example1\"/>\n\
         \x20       </module>\n\
         \n\
         \x20       <module name=\"SummaryJavadoc\">\n\
         \x20           <property name=\"id\" value=\"example3\"/>\n\
         \x20           <property name=\"period\" value=\"!\"/>\n\
         \x20       </module>\n\
         \n\
         \x20       <module name=\"JavadocStyle\">\n\
         \x20           <property name=\"checkFirstSentence\" value=\"false\"/>\n\
         \x20           <property name=\"id\" value=\"example3\"/>\n\
         \x20           <property name=\"scope\" value=\"public\"/>\n\
         \x20       </module>\n\
         </root>"
    );
}

#[test]
fn test_merged_module_count_is_sum_of_children() {
    let fixtures: Vec<_> = (1..=3).map(|n| summary_example(n, "java")).collect();
    let document = ConfigSerializer::new()
        .render_merged(&fixtures, &minimal())
        .unwrap();

    let parser = InlineConfigParser::new();
    let expected: usize = fixtures
        .iter()
        .map(|f| parser.parse(f).unwrap().tree_walker().unwrap().children().len())
        .sum();
    assert_eq!(document.matches("<module name=").count(), expected);
    for (index, fixture) in fixtures.iter().enumerate() {
        let count = parser.parse(fixture).unwrap().tree_walker().unwrap().children().len();
        let label = format!("value=\"example{}\"", index + 1);
        assert_eq!(document.matches(&label).count(), count, "{}", label);
    }
}

#[test]
fn test_merged_fails_on_unparseable_fixture() {
    let fixtures = vec![
        summary_example(1, "java"),
        fixtures::broken_dir().join("Example3.java"),
    ];
    let err = ConfigSerializer::new()
        .render_merged(&fixtures, &minimal())
        .unwrap_err();
    assert!(matches!(err, SerializeError::Parse { .. }));
    assert!(err.to_string().contains("Example3.java"));
}

#[test]
fn test_rendering_is_deterministic() {
    let template = load_template(None).unwrap();
    let serializer = ConfigSerializer::new();
    let first = serializer.render_single(&summary_example(3, "java"), &template).unwrap();
    let second = serializer.render_single(&summary_example(3, "java"), &template).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_sorter_leaves_rendered_output_unchanged() {
    let template = load_template(None).unwrap();
    let document = ConfigSerializer::new()
        .render_single(&summary_example(3, "java"), &template)
        .unwrap();
    assert_eq!(sort_properties(&document), document);
}

#[test]
fn test_parsed_tree_shape() {
    let root = InlineConfigParser::new().parse(&summary_example(3, "java")).unwrap();
    assert_eq!(root.name(), "Checker");
    let names: Vec<&str> = root
        .tree_walker()
        .unwrap()
        .children()
        .iter()
        .map(|c| c.name())
        .collect();
    assert_eq!(names, vec!["SummaryJavadoc", "JavadocStyle"]);
}

#[test]
fn test_serialize_to_files() {
    let dir = tempfile::TempDir::new().unwrap();
    let serializer = ConfigSerializer::new();

    let single = dir.path().join("Example1-config.xml");
    serializer
        .serialize_config(&summary_example(1, "java"), &minimal(), &single)
        .unwrap();
    assert_eq!(
        std::fs::read_to_string(&single).unwrap(),
        "<root>\n<module name=\"SummaryJavadoc\"/>\n</root>"
    );

    let merged = dir.path().join("all-examples-config.xml");
    let fixtures = vec![summary_example(1, "java"), summary_example(2, "java")];
    serializer
        .serialize_all_in_one(&fixtures, &minimal(), &merged)
        .unwrap();
    let document = std::fs::read_to_string(&merged).unwrap();
    assert!(document.contains("value=\"example1\""));
    assert!(document.contains("value=\"example2\""));
}
