//! Helpers for assembling Starlark text.

const INDENT: &str = "    ";

/// Converts a dependency coordinate into the label `rules_jvm_external` generates for it.
///
/// Every `:` is replaced by `_`; nothing else is touched.
#[must_use]
pub fn dependency_label(coordinate: &str) -> String {
    format!("@maven//:{}", coordinate.replace(':', "_"))
}

/// Appends a multi-line list of quoted strings.
///
/// `depth` is the indentation level of the line holding `prefix`. An empty list is written on a
/// single line.
pub(super) fn push_string_list<'a>(
    out: &mut String,
    depth: usize,
    prefix: &str,
    items: impl IntoIterator<Item = &'a str>,
    suffix: &str,
) {
    let outer = INDENT.repeat(depth);
    let inner = INDENT.repeat(depth + 1);

    let mut items = items.into_iter().peekable();
    if items.peek().is_none() {
        out.push_str(&format!("{outer}{prefix}[]{suffix}\n"));
        return;
    }

    out.push_str(&format!("{outer}{prefix}[\n"));
    for item in items {
        out.push_str(&format!("{inner}\"{item}\",\n"));
    }
    out.push_str(&format!("{outer}]{suffix}\n"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dependency_label() {
        assert_eq!(
            dependency_label("org.springframework:spring-core:5.2.8.RELEASE"),
            "@maven//:org.springframework_spring-core_5.2.8.RELEASE"
        );
        assert_eq!(dependency_label("no-colon"), "@maven//:no-colon");
        assert_eq!(dependency_label("a::b:"), "@maven//:a__b_");
        assert_eq!(dependency_label(""), "@maven//:");
    }

    #[test]
    fn test_push_string_list() {
        let mut out = String::new();
        push_string_list(&mut out, 1, "artifacts = ", ["a:b:1", "c:d:2"], ",");
        assert_eq!(
            out,
            "    artifacts = [\n        \"a:b:1\",\n        \"c:d:2\",\n    ],\n"
        );

        let mut empty = String::new();
        push_string_list(&mut empty, 0, "deps = ", Vec::<&str>::new(), "");
        assert_eq!(empty, "deps = []\n");
    }
}
