use regex::Regex;
use std::collections::HashMap;
use thiserror::Error;

/// Placeholder tokens look like `%{name}`. Names start with a letter or
/// underscore and continue with letters, digits or underscores, so run-time
/// tokens such as `%UID%` or `%06r` in the template text pass through
/// untouched.
const PLACEHOLDER_PATTERN: &str = r"%\{([A-Za-z_][A-Za-z0-9_]*)\}";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("placeholder '%{{{name}}}' survived substitution")]
    UnresolvedPlaceholder { name: String },
}

/// Substitute every `%{name}` token in `template` with its entry in `values`,
/// producing a new string. The template itself is never modified.
///
/// Substituted values are inserted verbatim and not rescanned. After the
/// single pass the output is checked for leftover tokens: a template name
/// missing from `values`, or a token smuggled in by a substituted value
/// (e.g. inside an injected monitoring fragment), is an
/// [`RenderError::UnresolvedPlaceholder`].
pub fn render(template: &str, values: &HashMap<&str, String>) -> Result<String, RenderError> {
    let re = Regex::new(PLACEHOLDER_PATTERN).unwrap();

    let rendered = re
        .replace_all(template, |caps: &regex::Captures| {
            let name = caps.get(1).unwrap().as_str();
            match values.get(name) {
                Some(value) => value.clone(),
                // Left in place for the residual check below
                None => caps.get(0).unwrap().as_str().to_string(),
            }
        })
        .to_string();

    if let Some(caps) = re.captures(&rendered) {
        return Err(RenderError::UnresolvedPlaceholder {
            name: caps.get(1).unwrap().as_str().to_string(),
        });
    }

    Ok(rendered)
}

/// List the distinct placeholder names in a template, in order of first
/// appearance.
pub fn placeholders(template: &str) -> Vec<String> {
    let re = Regex::new(PLACEHOLDER_PATTERN).unwrap();
    let mut names: Vec<String> = Vec::new();

    for caps in re.captures_iter(template) {
        let name = caps.get(1).unwrap().as_str();
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }

    names
}
