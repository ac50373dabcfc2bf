// Field normalization — decoding loosely-encoded catalog metadata.
//
// Catalog exports encode list fields inconsistently: sometimes a structured
// list survives, sometimes the cell holds a textual list literal (either
// plain names or objects carrying a `name` field), sometimes a bare
// delimited string. This module decodes all of them into a clean token
// list. Malformed input degrades to a best-effort split, never an error.

use serde_json::Value;

use crate::catalog::movie::FieldValue;

/// Decode a raw metadata field into a list of string tokens.
///
/// Structured lists pass through unchanged; missing or blank fields yield
/// an empty list. Text goes through literal parsing, then a bracket-aware
/// comma split, and as a last resort comes back as a single token. This
/// function is total — no input makes it panic or error.
pub fn normalize_field(value: Option<&FieldValue>) -> Vec<String> {
    let text = match value {
        Some(FieldValue::List(items)) => return items.clone(),
        Some(FieldValue::Text(text)) => text.trim(),
        None => return Vec::new(),
    };

    if text.is_empty() {
        return Vec::new();
    }

    if let Some(tokens) = parse_literal(text) {
        return tokens;
    }

    if let Some(tokens) = split_bracketed(text) {
        return tokens;
    }

    vec![text.to_string()]
}

/// Parse a textual list literal. The primary parse is JSON; single-quoted
/// literals get one retry with the quotes swapped. Parsed, never executed.
fn parse_literal(text: &str) -> Option<Vec<String>> {
    let parsed: Value = serde_json::from_str(text).ok().or_else(|| {
        if text.contains('\'') {
            serde_json::from_str(&text.replace('\'', "\"")).ok()
        } else {
            None
        }
    })?;

    let Value::Array(items) = parsed else {
        return None;
    };

    // Object lists carry the display name in a `name` field. Extract it,
    // skipping elements that don't conform.
    if items.iter().any(Value::is_object) {
        let names = items
            .iter()
            .filter_map(|item| item.get("name"))
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect();
        return Some(names);
    }

    Some(items.iter().map(stringify).collect())
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Best-effort split for unparseable bracket-delimited text: strip the
/// brackets (a missing closer is tolerated), split on commas, trim
/// whitespace and quotes, drop empties.
fn split_bracketed(text: &str) -> Option<Vec<String>> {
    let inner = text.strip_prefix('[')?;
    let inner = inner.strip_suffix(']').unwrap_or(inner);

    let tokens: Vec<String> = inner
        .split(',')
        .map(|token| {
            token
                .trim()
                .trim_matches(|c| c == '\'' || c == '"')
                .trim()
                .to_string()
        })
        .filter(|token| !token.is_empty())
        .collect();

    if tokens.is_empty() {
        None
    } else {
        Some(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> Option<FieldValue> {
        Some(FieldValue::Text(value.to_string()))
    }

    #[test]
    fn structured_list_passes_through() {
        let field = Some(FieldValue::list(["Action", "Drama"]));
        assert_eq!(normalize_field(field.as_ref()), vec!["Action", "Drama"]);
    }

    #[test]
    fn missing_field_is_empty() {
        assert!(normalize_field(None).is_empty());
    }

    #[test]
    fn blank_text_is_empty() {
        assert!(normalize_field(text("   ").as_ref()).is_empty());
    }

    #[test]
    fn single_quoted_literal_round_trips() {
        let field = text("['Action', 'Drama']");
        assert_eq!(normalize_field(field.as_ref()), vec!["Action", "Drama"]);
    }

    #[test]
    fn json_literal_round_trips() {
        let field = text(r#"["Action", "Drama"]"#);
        assert_eq!(normalize_field(field.as_ref()), vec!["Action", "Drama"]);
    }

    #[test]
    fn object_list_extracts_names() {
        let field = text(r#"[{"id": 28, "name": "Action"}, {"id": 18, "name": "Drama"}]"#);
        assert_eq!(normalize_field(field.as_ref()), vec!["Action", "Drama"]);
    }

    #[test]
    fn single_quoted_object_list_extracts_names() {
        let field = text("[{'id': 28, 'name': 'Action'}, {'id': 18, 'name': 'Drama'}]");
        assert_eq!(normalize_field(field.as_ref()), vec!["Action", "Drama"]);
    }

    #[test]
    fn nonconforming_object_elements_are_skipped() {
        let field = text(r#"[{"name": "Action"}, {"id": 18}, {"name": "Drama"}]"#);
        assert_eq!(normalize_field(field.as_ref()), vec!["Action", "Drama"]);
    }

    #[test]
    fn scalar_elements_are_stringified() {
        let field = text("[1, 2, 3]");
        assert_eq!(normalize_field(field.as_ref()), vec!["1", "2", "3"]);
    }

    #[test]
    fn unparseable_bracketed_text_splits_on_commas() {
        // Unterminated literal — the fallback splitter recovers the tokens.
        let field = text("[Action, Drama");
        assert_eq!(normalize_field(field.as_ref()), vec!["Action", "Drama"]);
    }

    #[test]
    fn mixed_quotes_still_recover_tokens() {
        let field = text(r#"['Action", "Drama']"#);
        let tokens = normalize_field(field.as_ref());
        assert_eq!(tokens, vec!["Action", "Drama"]);
    }

    #[test]
    fn plain_text_falls_back_to_single_token() {
        let field = text("Science Fiction");
        assert_eq!(normalize_field(field.as_ref()), vec!["Science Fiction"]);
    }

    #[test]
    fn non_list_literal_falls_back_to_single_token() {
        let field = text("42");
        assert_eq!(normalize_field(field.as_ref()), vec!["42"]);
    }

    #[test]
    fn empty_list_literal_is_empty() {
        assert!(normalize_field(text("[]").as_ref()).is_empty());
    }

    #[test]
    fn bracketed_whitespace_only_falls_back_to_single_token() {
        // "[ , ]" splits to nothing usable; the original text survives.
        let field = text("[ , ]");
        assert_eq!(normalize_field(field.as_ref()), vec!["[ , ]"]);
    }
}
