//! `{{name}}` placeholders inside prompt content.
//!
//! A placeholder is `{{`, the shortest run of characters on one line, then
//! `}}`. The identifier is that inner text with surrounding whitespace
//! trimmed, so `{{ topic }}` and `{{topic}}` name the same variable. There is
//! no escaping and no nesting; anything that does not fit the pattern stays as
//! literal text.

use once_cell::sync::Lazy;
use regex::{Captures, Regex, RegexBuilder};
use std::collections::HashMap;

use crate::api::StoreError;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{(.*?)\}\}").expect("placeholder pattern is valid"));

/// Distinct placeholder identifiers in order of first appearance.
pub fn extract_variables(content: &str) -> Vec<String> {
    let mut seen = Vec::new();
    for caps in PLACEHOLDER.captures_iter(content) {
        let name = caps[1].trim();
        if !seen.iter().any(|s: &String| s == name) {
            seen.push(name.to_string());
        }
    }
    seen
}

/// Replaces every placeholder with its value from `values`.
///
/// Unknown identifiers become the empty string. Values are inserted as-is and
/// never rescanned, so a value containing `$1` or `{{x}}` comes out verbatim.
pub fn substitute(content: &str, values: &HashMap<String, String>) -> String {
    let names = extract_variables(content);
    if names.is_empty() {
        return content.to_string();
    }

    let value_of = |name: &str| values.get(name).map(String::as_str).unwrap_or("");

    match identifier_pattern(&names) {
        Some(re) => re
            .replace_all(content, |caps: &Captures| value_of(&caps[1]).to_string())
            .into_owned(),
        // Identifier set too large to compile as one pattern; the generic
        // placeholder pattern finds the same spans.
        None => PLACEHOLDER
            .replace_all(content, |caps: &Captures| value_of(caps[1].trim()).to_string())
            .into_owned(),
    }
}

/// Content ready for the clipboard: verbatim when it has no placeholders.
pub fn render_if_needed(content: &str, values: &HashMap<String, String>) -> String {
    if PLACEHOLDER.is_match(content) {
        substitute(content, values)
    } else {
        content.to_string()
    }
}

/// Parses `key=value` assignments, splitting on the first `=` and trimming both sides.
pub fn parse_assignments(vars: &[String]) -> Result<HashMap<String, String>, StoreError> {
    let mut map = HashMap::new();
    for v in vars {
        let (key, value) = v.split_once('=').ok_or_else(|| {
            StoreError::Validation(format!("Variable '{}' must be written as key=value", v))
        })?;
        map.insert(key.trim().to_string(), value.trim().to_string());
    }
    Ok(map)
}

/// `{{\s*(id1|id2|...)\s*}}` with every identifier escaped.
fn identifier_pattern(names: &[String]) -> Option<Regex> {
    let alternatives = names
        .iter()
        .map(|n| regex::escape(n))
        .collect::<Vec<_>>()
        .join("|");
    RegexBuilder::new(&format!(r"\{{\{{\s*({})\s*\}}\}}", alternatives))
        .build()
        .ok()
}
