// ── Filter criteria ──
//
// A partial mapping from field name to search value. Absent fields mean
// "no constraint"; an empty criteria set lists the whole collection.

use std::collections::BTreeMap;

use serde::Serialize;

/// User-supplied partial search constraints applied before listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FilterCriteria {
    fields: BTreeMap<String, String>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a constraint. A blank value (after trimming) removes the
    /// constraint instead, so clearing a search box behaves like "no
    /// constraint" rather than "match empty string".
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let value = value.into();
        let trimmed = value.trim();
        let field = field.into();
        if trimmed.is_empty() {
            self.fields.remove(&field);
        } else {
            self.fields.insert(field, trimmed.to_owned());
        }
        self
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.fields.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render as the JSON object body for `POST {base}/filter`.
    pub fn as_body(&self) -> serde_json::Map<String, serde_json::Value> {
        self.fields
            .iter()
            .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
            .collect()
    }
}

/// Case-insensitive substring match of `needle` against a JSON field
/// value, used by the client-side filter strategy. Numbers match on
/// their decimal rendering.
pub(crate) fn value_contains(value: &serde_json::Value, needle: &str) -> bool {
    let haystack = match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        _ => return false,
    };
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn blank_value_removes_constraint() {
        let mut criteria = FilterCriteria::new();
        criteria.set("name", "acme");
        criteria.set("name", "   ");
        assert!(criteria.is_empty());
    }

    #[test]
    fn as_body_renders_string_fields() {
        let mut criteria = FilterCriteria::new();
        criteria.set("name", "acme");
        let body = criteria.as_body();
        assert_eq!(body.get("name"), Some(&json!("acme")));
    }

    #[test]
    fn value_contains_is_case_insensitive() {
        assert!(value_contains(&json!("Value Added Tax"), "added"));
        assert!(!value_contains(&json!("Sales Tax"), "added"));
    }

    #[test]
    fn value_contains_matches_numbers_textually() {
        assert!(value_contains(&json!(19.5), "19"));
        assert!(!value_contains(&json!(null), "19"));
    }
}
