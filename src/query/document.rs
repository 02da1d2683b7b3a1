use bson::{Bson, Document};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::errors::TranslateError;

/// Ordered key/value document handed to the driver as a filter or sort.
///
/// Unlike [`bson::Document`], keys may repeat: two conditions on the same
/// field stay two entries, in the order they were pushed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryDocument(Vec<(String, Bson)>);

impl QueryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<Bson>) {
        self.0.push((key.into(), value.into()));
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Bson)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    /// First value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Bson> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a Bson> + 'a {
        self.0.iter().filter(move |(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn has_duplicate_keys(&self) -> bool {
        self.0
            .iter()
            .enumerate()
            .any(|(i, (k, _))| self.0[..i].iter().any(|(prev, _)| prev == k))
    }

    /// Collapse into a [`bson::Document`]. A repeated key keeps the position
    /// of its first occurrence and the value of its last.
    pub fn into_document(self) -> Document {
        if self.has_duplicate_keys() {
            log::warn!("collapsing query document with repeated keys; earlier values are dropped");
        }
        let mut out = Document::new();
        for (k, v) in self.0 {
            out.insert(k, v);
        }
        out
    }

    /// # Errors
    /// Returns an error if a value cannot be represented as JSON.
    pub fn to_json(&self) -> Result<String, TranslateError> {
        Ok(serde_json::to_string(self)?)
    }

    /// # Errors
    /// Returns an error if a value cannot be represented as JSON.
    pub fn to_json_pretty(&self) -> Result<String, TranslateError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl From<Document> for QueryDocument {
    fn from(doc: Document) -> Self {
        Self(doc.into_iter().collect())
    }
}

impl FromIterator<(String, Bson)> for QueryDocument {
    fn from_iter<I: IntoIterator<Item = (String, Bson)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for QueryDocument {
    type Item = (String, Bson);
    type IntoIter = std::vec::IntoIter<(String, Bson)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

// Serialized as a map so repeated keys survive into the JSON text.
impl Serialize for QueryDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::capture_logs;
    use bson::doc;

    #[test]
    fn keeps_repeated_keys_in_order() {
        let mut q = QueryDocument::new();
        q.push("age", doc! { "$gt": 18 });
        q.push("name", doc! { "$eq": "bob" });
        q.push("age", doc! { "$lt": 65 });
        assert_eq!(q.len(), 3);
        assert_eq!(q.keys().collect::<Vec<_>>(), vec!["age", "name", "age"]);
        assert_eq!(q.get("age"), Some(&Bson::Document(doc! { "$gt": 18 })));
        assert_eq!(q.get_all("age").count(), 2);
        assert!(q.has_duplicate_keys());
    }

    #[test]
    fn into_document_last_value_wins() {
        let mut q = QueryDocument::new();
        q.push("age", 1);
        q.push("name", "x");
        q.push("age", 2);
        let d = q.into_document();
        assert_eq!(d.keys().collect::<Vec<_>>(), vec!["age", "name"]);
        assert_eq!(d.get_i32("age").unwrap(), 2);
    }

    #[test]
    fn into_document_warns_only_on_collapse() {
        let mut dup = QueryDocument::new();
        dup.push("age", 1);
        dup.push("age", 2);
        let logs = capture_logs(|| {
            dup.into_document();
        });
        assert_eq!(logs.len(), 1, "{logs:?}");
        assert_eq!(logs[0].0, log::Level::Warn);
        assert!(logs[0].1.contains("repeated keys"), "{logs:?}");

        let unique = QueryDocument::from(doc! { "a": 1, "b": 2 });
        let logs = capture_logs(|| {
            unique.into_document();
        });
        assert!(logs.is_empty(), "{logs:?}");
    }

    #[test]
    fn json_keeps_duplicates() {
        let mut q = QueryDocument::new();
        q.push("a", 1);
        q.push("a", 2);
        assert_eq!(q.to_json().unwrap(), r#"{"a":1,"a":2}"#);
    }

    #[test]
    fn empty_document() {
        let q = QueryDocument::new();
        assert!(q.is_empty());
        assert!(!q.has_duplicate_keys());
        assert_eq!(q.to_json().unwrap(), "{}");
        assert!(q.into_document().is_empty());
    }

    #[test]
    fn from_bson_document_preserves_order() {
        let q = QueryDocument::from(doc! { "b": 1, "a": 2 });
        assert_eq!(q.keys().collect::<Vec<_>>(), vec!["b", "a"]);
    }
}
