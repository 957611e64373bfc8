use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reserved top-level bucket holding archived values, keyed by the dotted
/// path each value lived at before a template upgrade removed it.
pub const DEPRECATED_BUCKET: &str = "_deprecated";

/// A string-keyed object node inside a document.
pub type DocObject = BTreeMap<String, DocValue>;

/// One value inside a contract data document.
///
/// Documents are plain JSON on the wire and in storage; this enum is the
/// typed view. Lists are always lists of objects (table rows); a JSON array
/// of scalars does not deserialize, on purpose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Rows(Vec<DocObject>),
    Object(DocObject),
}

impl DocValue {
    /// Empty means "no usable value": null or blank text.
    pub fn is_empty(&self) -> bool {
        match self {
            DocValue::Null => true,
            DocValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            DocValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            DocValue::Int(i) => Some(*i as f64),
            DocValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DocValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_rows(&self) -> Option<&[DocObject]> {
        match self {
            DocValue::Rows(rows) => Some(rows),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            DocValue::Null => "null",
            DocValue::Bool(_) => "bool",
            DocValue::Int(_) => "int",
            DocValue::Float(_) => "float",
            DocValue::Text(_) => "text",
            DocValue::Rows(_) => "rows",
            DocValue::Object(_) => "object",
        }
    }
}

impl From<&DocValue> for serde_json::Value {
    fn from(value: &DocValue) -> Self {
        match value {
            DocValue::Null => serde_json::Value::Null,
            DocValue::Bool(b) => serde_json::Value::Bool(*b),
            DocValue::Int(i) => serde_json::Value::from(*i),
            // Non-finite floats have no JSON form; they degrade to null.
            DocValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            DocValue::Text(s) => serde_json::Value::String(s.clone()),
            DocValue::Rows(rows) => serde_json::Value::Array(
                rows.iter()
                    .map(|row| {
                        serde_json::Value::Object(
                            row.iter()
                                .map(|(k, v)| (k.clone(), serde_json::Value::from(v)))
                                .collect(),
                        )
                    })
                    .collect(),
            ),
            DocValue::Object(map) => serde_json::Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), serde_json::Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl TryFrom<&serde_json::Value> for DocValue {
    type Error = serde_json::Error;

    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        serde_json::from_value(value.clone())
    }
}

/// Structurally invalid dotted-path traversal.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("empty segment in path '{0}'")]
    EmptySegment(String),

    #[error("'{at}' is not an object; cannot traverse '{path}'")]
    NotAnObject { path: String, at: String },
}

/// The nested data document attached to a contract.
///
/// Wraps the root object and exposes dotted-path accessors that fail loudly
/// (`PathError`) when a traversal step lands on a non-object, instead of
/// silently conjuring nested maps where a scalar already lives.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    root: DocObject,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> &DocObject {
        &self.root
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Read the value at a dotted path.
    ///
    /// Missing intermediate keys yield `Ok(None)`; an intermediate that
    /// exists but is not an object is a `PathError`.
    pub fn get(&self, path: &str) -> Result<Option<&DocValue>, PathError> {
        let (prefix, last) = split_path(path)?;

        let mut current = &self.root;
        let mut walked = String::new();
        for segment in &prefix {
            if !walked.is_empty() {
                walked.push('.');
            }
            walked.push_str(segment);
            match current.get(*segment) {
                None => return Ok(None),
                Some(DocValue::Object(map)) => current = map,
                Some(_) => {
                    return Err(PathError::NotAnObject {
                        path: path.to_string(),
                        at: walked,
                    })
                }
            }
        }
        Ok(current.get(last))
    }

    pub fn contains(&self, path: &str) -> bool {
        matches!(self.get(path), Ok(Some(_)))
    }

    /// Write a value at a dotted path, creating intermediate objects as
    /// needed. Fails if an intermediate exists and is not an object.
    pub fn set(&mut self, path: &str, value: DocValue) -> Result<(), PathError> {
        let (prefix, last) = split_path(path)?;

        let mut current = &mut self.root;
        let mut walked = String::new();
        for segment in &prefix {
            if !walked.is_empty() {
                walked.push('.');
            }
            walked.push_str(segment);
            let entry = current
                .entry((*segment).to_string())
                .or_insert_with(|| DocValue::Object(DocObject::new()));
            match entry {
                DocValue::Object(map) => current = map,
                _ => {
                    return Err(PathError::NotAnObject {
                        path: path.to_string(),
                        at: walked,
                    })
                }
            }
        }
        current.insert(last.to_string(), value);
        Ok(())
    }

    /// Remove and return the value at a dotted path, if present.
    pub fn remove(&mut self, path: &str) -> Result<Option<DocValue>, PathError> {
        let (prefix, last) = split_path(path)?;

        let mut current = &mut self.root;
        let mut walked = String::new();
        for segment in &prefix {
            if !walked.is_empty() {
                walked.push('.');
            }
            walked.push_str(segment);
            match current.get_mut(*segment) {
                None => return Ok(None),
                Some(DocValue::Object(map)) => current = map,
                Some(_) => {
                    return Err(PathError::NotAnObject {
                        path: path.to_string(),
                        at: walked,
                    })
                }
            }
        }
        Ok(current.remove(last))
    }

    /// Move the value at `path` into the `_deprecated` bucket, keyed by the
    /// full dotted path. Returns whether a value was actually archived.
    /// Absent paths are a no-op; the bucket is only created when needed.
    pub fn archive(&mut self, path: &str) -> Result<bool, PathError> {
        let Some(value) = self.remove(path)? else {
            return Ok(false);
        };
        let bucket = self
            .root
            .entry(DEPRECATED_BUCKET.to_string())
            .or_insert_with(|| DocValue::Object(DocObject::new()));
        match bucket {
            DocValue::Object(map) => {
                map.insert(path.to_string(), value);
                Ok(true)
            }
            _ => Err(PathError::NotAnObject {
                path: path.to_string(),
                at: DEPRECATED_BUCKET.to_string(),
            }),
        }
    }

    /// The archived-values bucket, if any upgrade has populated it.
    pub fn deprecated(&self) -> Option<&DocObject> {
        match self.root.get(DEPRECATED_BUCKET) {
            Some(DocValue::Object(map)) => Some(map),
            _ => None,
        }
    }
}

impl From<&Document> for serde_json::Value {
    fn from(doc: &Document) -> Self {
        serde_json::Value::Object(
            doc.root
                .iter()
                .map(|(k, v)| (k.clone(), serde_json::Value::from(v)))
                .collect(),
        )
    }
}

impl TryFrom<&serde_json::Value> for Document {
    type Error = serde_json::Error;

    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        serde_json::from_value(value.clone())
    }
}

fn split_path(path: &str) -> Result<(Vec<&str>, &str), PathError> {
    let mut segments: Vec<&str> = path.split('.').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(PathError::EmptySegment(path.to_string()));
    }
    match segments.pop() {
        Some(last) => Ok((segments, last)),
        None => Err(PathError::EmptySegment(path.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_creates_intermediate_objects() {
        let mut doc = Document::new();
        doc.set("fees.base_ex_vat", DocValue::Float(1000.0)).unwrap();
        assert_eq!(
            doc.get("fees.base_ex_vat").unwrap(),
            Some(&DocValue::Float(1000.0))
        );
        assert!(matches!(doc.get("fees").unwrap(), Some(DocValue::Object(_))));
    }

    #[test]
    fn get_missing_path_is_none_not_error() {
        let doc = Document::new();
        assert_eq!(doc.get("term.start").unwrap(), None);
    }

    #[test]
    fn traversal_through_scalar_fails_loudly() {
        let mut doc = Document::new();
        doc.set("fees", DocValue::Int(3)).unwrap();
        let err = doc.get("fees.base_ex_vat").unwrap_err();
        assert_eq!(
            err,
            PathError::NotAnObject {
                path: "fees.base_ex_vat".to_string(),
                at: "fees".to_string(),
            }
        );
        let mut doc2 = doc.clone();
        assert!(doc2.set("fees.base_ex_vat", DocValue::Int(1)).is_err());
    }

    #[test]
    fn empty_path_segment_rejected() {
        let mut doc = Document::new();
        assert!(doc.set("", DocValue::Null).is_err());
        assert!(doc.set("fees..x", DocValue::Null).is_err());
    }

    #[test]
    fn remove_returns_previous_value() {
        let mut doc = Document::new();
        doc.set("term.start", DocValue::Text("2025-01-01".into()))
            .unwrap();
        let removed = doc.remove("term.start").unwrap();
        assert_eq!(removed, Some(DocValue::Text("2025-01-01".into())));
        assert_eq!(doc.get("term.start").unwrap(), None);
        assert_eq!(doc.remove("term.start").unwrap(), None);
    }

    #[test]
    fn archive_moves_value_under_flat_dotted_key() {
        let mut doc = Document::new();
        doc.set("fees.old_admin_fee", DocValue::Float(25.0)).unwrap();

        assert!(doc.archive("fees.old_admin_fee").unwrap());
        assert_eq!(doc.get("fees.old_admin_fee").unwrap(), None);

        let bucket = doc.deprecated().expect("bucket created");
        assert_eq!(bucket.get("fees.old_admin_fee"), Some(&DocValue::Float(25.0)));
    }

    #[test]
    fn archive_of_absent_path_is_silent_noop() {
        let mut doc = Document::new();
        assert!(!doc.archive("fees.never_there").unwrap());
        assert!(doc.deprecated().is_none());
    }

    #[test]
    fn serde_is_transparent_json() {
        let mut doc = Document::new();
        doc.set("fees.base_ex_vat", DocValue::Float(1000.0)).unwrap();
        doc.set("ok", DocValue::Bool(true)).unwrap();
        doc.set(
            "fees.additional",
            DocValue::Rows(vec![DocObject::from([
                ("label".to_string(), DocValue::Text("Gardening".into())),
                ("amount".to_string(), DocValue::Float(50.0)),
            ])]),
        )
        .unwrap();

        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["fees"]["base_ex_vat"], serde_json::json!(1000.0));
        assert_eq!(json["fees"]["additional"][0]["label"], serde_json::json!("Gardening"));
        assert_eq!(json["ok"], serde_json::json!(true));

        let back: Document = serde_json::from_value(json).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn row_lists_deserialize_as_rows() {
        let json = serde_json::json!({
            "fees": { "additional": [ { "label": "Gardening", "amount": 50.0 } ] }
        });
        let doc: Document = serde_json::from_value(json).unwrap();
        let rows = doc
            .get("fees.additional")
            .unwrap()
            .and_then(|v| v.as_rows())
            .expect("rows");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("amount"), Some(&DocValue::Float(50.0)));
    }

    #[test]
    fn scalar_arrays_are_rejected() {
        let json = serde_json::json!({ "tags": [1, 2, 3] });
        assert!(serde_json::from_value::<Document>(json).is_err());
    }
}
