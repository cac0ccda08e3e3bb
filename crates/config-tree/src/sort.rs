//! Post-hoc property sorting for already rendered XML.

/// Prefix identifying a property element line.
const PROPERTY_PREFIX: &str = "<property";

/// Sort each consecutive run of `<property` lines lexicographically.
///
/// A line belongs to a run when, after trimming, it starts with `<property`.
/// Any other line ends the current run and stays where it is. Lines are
/// compared as written, indentation included.
pub fn sort_properties(content: &str) -> String {
    let mut output: Vec<&str> = Vec::new();
    let mut run: Vec<&str> = Vec::new();

    for line in content.split('\n') {
        if line.trim().starts_with(PROPERTY_PREFIX) {
            run.push(line);
            continue;
        }
        flush_run(&mut run, &mut output);
        output.push(line);
    }
    flush_run(&mut run, &mut output);

    output.join("\n")
}

fn flush_run<'a>(run: &mut Vec<&'a str>, output: &mut Vec<&'a str>) {
    run.sort_unstable();
    output.append(run);
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNSORTED: &str = "<module name=\"A\">\n\
        \x20   <property name=\"z\" value=\"1\"/>\n\
        \x20   <property name=\"b\" value=\"2\"/>\n\
        </module>\n\
        <module name=\"B\">\n\
        \x20   <property name=\"y\" value=\"3\"/>\n\
        \x20   <property name=\"a\" value=\"4\"/>\n\
        </module>";

    #[test]
    fn test_sorts_runs_independently() {
        let sorted = sort_properties(UNSORTED);
        let lines: Vec<&str> = sorted.lines().collect();
        assert_eq!(lines[0], "<module name=\"A\">");
        assert_eq!(lines[1], "    <property name=\"b\" value=\"2\"/>");
        assert_eq!(lines[2], "    <property name=\"z\" value=\"1\"/>");
        assert_eq!(lines[3], "</module>");
        assert_eq!(lines[5], "    <property name=\"a\" value=\"4\"/>");
        assert_eq!(lines[6], "    <property name=\"y\" value=\"3\"/>");
    }

    #[test]
    fn test_idempotent() {
        let once = sort_properties(UNSORTED);
        assert_eq!(sort_properties(&once), once);
    }

    #[test]
    fn test_trailing_run() {
        let sorted = sort_properties("<property name=\"b\"/>\n<property name=\"a\"/>");
        assert_eq!(sorted, "<property name=\"a\"/>\n<property name=\"b\"/>");
    }

    #[test]
    fn test_other_lines_untouched() {
        let text = "  <?xml version=\"1.0\"?>\n\n<module name=\"Checker\"/>\n";
        assert_eq!(sort_properties(text), text);
    }
}
