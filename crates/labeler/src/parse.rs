//! Parsing of completion output into structured label suggestions.

use serde::Serialize;

use crate::api::LabelerApiError;

/// One advisory category/annotation pair extracted from a completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelSuggestion {
    /// Suggested label category, e.g. `Task`.
    pub category: String,
    /// The annotated excerpt the category applies to.
    pub annotation: String,
}

/// Parse a raw completion into suggestions.
///
/// The prompt asks for `Category: <label>, Annotation: <text>` pairs
/// separated by semicolons. Each segment must contain both keys; a
/// malformed segment or an empty result fails the whole parse.
pub fn parse_suggestions(raw: &str) -> Result<Vec<LabelSuggestion>, LabelerApiError> {
    let mut suggestions = Vec::new();

    for segment in raw.replace('\n', "").split(';') {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        suggestions.push(parse_segment(segment)?);
    }

    if suggestions.is_empty() {
        return Err(LabelerApiError::Parse(format!(
            "completion contained no suggestions: '{raw}'"
        )));
    }
    Ok(suggestions)
}

fn parse_segment(segment: &str) -> Result<LabelSuggestion, LabelerApiError> {
    // Tolerate dict-ish decoration around the expected key/value text.
    let cleaned = segment.trim_matches(|c: char| matches!(c, '{' | '}' | '[' | ']'));

    let rest = strip_key(cleaned, "Category").ok_or_else(|| malformed(segment))?;
    let (category, rest) = rest.split_once(',').ok_or_else(|| malformed(segment))?;
    let annotation = strip_key(rest.trim(), "Annotation").ok_or_else(|| malformed(segment))?;

    let category = unquote(category);
    let annotation = unquote(annotation);
    if category.is_empty() || annotation.is_empty() {
        return Err(malformed(segment));
    }

    Ok(LabelSuggestion {
        category,
        annotation,
    })
}

/// Strip a leading `<key>:` (optionally quoted) and return the remainder.
fn strip_key<'a>(s: &'a str, key: &str) -> Option<&'a str> {
    let s = s.trim().trim_start_matches(['\'', '"']);
    let s = s.strip_prefix(key)?;
    let s = s.trim_start_matches(['\'', '"']).trim_start();
    s.strip_prefix(':').map(str::trim)
}

fn unquote(s: &str) -> String {
    s.trim().trim_matches(['\'', '"']).trim().to_string()
}

fn malformed(segment: &str) -> LabelerApiError {
    LabelerApiError::Parse(format!("malformed suggestion segment: '{segment}'"))
}
