//! Translation tables: flattened `key -> string` lookups.
//!
//! Translation files are nested JSON objects. Keys are flattened with dots, so
//! `{"routes": {"aboutMe": "ueber-mich"}}` is looked up as `routes.aboutMe`.
//! Only string leaves are kept.

use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationTable {
    entries: HashMap<String, String>,
}

impl TranslationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from a nested JSON document.
    pub fn from_json(value: &Value) -> Self {
        let mut entries = HashMap::new();
        flatten_into(&mut entries, String::new(), value);
        Self { entries }
    }

    /// Parse a table from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(text)?;
        Ok(Self::from_json(&value))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for TranslationTable
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

fn flatten_into(entries: &mut HashMap<String, String>, prefix: String, value: &Value) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten_into(entries, path, child);
            }
        }
        Value::String(text) if !prefix.is_empty() => {
            entries.insert(prefix, text.clone());
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_flattens_nested_objects() {
        let table = TranslationTable::from_json(&json!({
            "routes": {
                "home": "",
                "aboutMe": "ueber-mich",
                "nested": { "deep": "value" }
            },
            "title": "Portfolio"
        }));

        assert_eq!(table.get("routes.home"), Some(""));
        assert_eq!(table.get("routes.aboutMe"), Some("ueber-mich"));
        assert_eq!(table.get("routes.nested.deep"), Some("value"));
        assert_eq!(table.get("title"), Some("Portfolio"));
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_from_json_skips_non_string_leaves() {
        let table = TranslationTable::from_json(&json!({
            "count": 3,
            "flag": true,
            "list": ["a", "b"],
            "missing": null
        }));
        assert!(table.is_empty());
    }

    #[test]
    fn test_from_json_str_rejects_invalid_json() {
        assert!(TranslationTable::from_json_str("{ not json").is_err());
    }

    #[test]
    fn test_insert_and_remove() {
        let mut table = TranslationTable::new();
        table.insert("routes.skills", "faehigkeiten");
        assert!(table.contains("routes.skills"));
        assert_eq!(table.remove("routes.skills").as_deref(), Some("faehigkeiten"));
        assert!(!table.contains("routes.skills"));
    }

    #[test]
    fn test_collect_from_pairs() {
        let table: TranslationTable = [("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(table.get("b"), Some("2"));
    }
}
