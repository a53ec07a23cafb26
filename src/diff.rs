use similar::{ChangeTag, TextDiff};

/// Line diff between two generated configuration documents.
///
/// Disabled blocks are comment-marked rather than removed, so documents
/// generated from neighbouring parameter sets keep the same line structure
/// and the diff shows exactly which directives toggled.
pub fn diff_configs(from: &str, to: &str) -> String {
    let diff = TextDiff::from_lines(from, to);
    let mut output = String::new();

    for change in diff.iter_all_changes() {
        let sign = match change.tag() {
            ChangeTag::Delete => "-",
            ChangeTag::Insert => "+",
            ChangeTag::Equal => " ",
        };
        output.push_str(&format!("{} {}", sign, change));
    }

    output
}
