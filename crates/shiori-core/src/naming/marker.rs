//! Embedded-identifier markers and other folder-name conventions.
//!
//! Markers look like `[tvdbid=12345]`. Detection is a case-insensitive
//! substring search for the opening part (`[tvdbid=`); the value runs from
//! just after it to the next `]`. Everything here is total: a missing or
//! malformed marker is a normal `false`/`None`.

use crate::types::ResolveContext;

/// Returns `true` if `name` contains `tag_prefix`, ignoring ASCII case.
#[must_use]
pub fn contains_tag(name: &str, tag_prefix: &str) -> bool {
    find_ignore_case(name, tag_prefix).is_some()
}

/// Returns the value following `tag_prefix` up to the closing `]`.
///
/// `None` if the marker is absent, unterminated, or has an empty value.
#[must_use]
pub fn extract_tag(name: &str, tag_prefix: &str) -> Option<String> {
    let start = find_ignore_case(name, tag_prefix)? + tag_prefix.len();
    let rest = &name[start..];
    let end = rest.find(']')?;
    let value = rest[..end].trim();

    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Builds the marker prefix for an attribute, e.g. `tvdbid` → `[tvdbid=`.
#[must_use]
pub fn tag_prefix(attribute: &str) -> String {
    format!("[{attribute}=")
}

/// Shorthand for `extract_tag(name, "[<attribute>=")`.
#[must_use]
pub fn attribute_value(name: &str, attribute: &str) -> Option<String> {
    extract_tag(name, &tag_prefix(attribute))
}

/// Exact, case-insensitive lookup in the sidecar files detected for `context`.
#[must_use]
pub fn has_metadata_file(context: &ResolveContext, exact_filename: &str) -> bool {
    context
        .metadata_files()
        .iter()
        .any(|f| f.eq_ignore_ascii_case(exact_filename))
}

/// Removes every `[key=value]` marker and collapses whitespace.
///
/// An unterminated marker swallows the rest of the name.
#[must_use]
pub fn strip_tags(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut rest = name;

    while let Some(open) = rest.find('[') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        match marker_len(after) {
            Some(len) => rest = &after[len..],
            None => {
                out.push('[');
                rest = after;
            }
        }
    }
    out.push_str(rest);

    out.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim_matches(|c: char| c == '-' || c == ' ')
        .to_string()
}

/// Returns the year from a trailing `(YYYY)`, if present.
#[must_use]
pub fn trailing_year(name: &str) -> Option<u16> {
    let trimmed = name.trim_end();
    let tail = trimmed.get(trimmed.len().checked_sub(6)?..)?;
    let digits = tail.strip_prefix('(')?.strip_suffix(')')?;

    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let year: u16 = digits.parse().ok()?;
    (1900..=2099).contains(&year).then_some(year)
}

/// Removes a trailing `(YYYY)` recognized by [`trailing_year`].
#[must_use]
pub fn strip_trailing_year(name: &str) -> &str {
    if trailing_year(name).is_none() {
        return name;
    }
    let trimmed = name.trim_end();
    trimmed[..trimmed.len() - 6].trim_end()
}

fn find_ignore_case(haystack: &str, needle: &str) -> Option<usize> {
    if needle.is_empty() {
        return None;
    }
    // ASCII lowercasing keeps byte offsets stable.
    haystack
        .to_ascii_lowercase()
        .find(&needle.to_ascii_lowercase())
}

/// Length of `key=value]` (or `key=value` to end of input) following a `[`.
fn marker_len(after_bracket: &str) -> Option<usize> {
    let eq = after_bracket.find('=')?;
    let key = &after_bracket[..eq];
    if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return None;
    }

    Some(match after_bracket[eq..].find(']') {
        Some(close) => eq + close + 1,
        None => after_bracket.len(),
    })
}
