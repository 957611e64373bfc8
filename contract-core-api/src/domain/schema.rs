use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::document::DocValue;
use crate::error::{CoreError, CoreResult};

/// Declared type of a form field or table column.
///
/// The type drives both casting of submitted raw strings and validation of
/// stored values. `email` and `select` are widget hints; they cast like text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Textarea,
    Email,
    Date,
    Number,
    Money,
    Checkbox,
    Select,
}

/// One scalar form field, or one column when nested under a table.
///
/// `path` is dotted relative to the document root for fields, and relative
/// to one row for table columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    pub path: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Full-match pattern applied to non-empty text values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regex: Option<String>,
    /// Value merged in by the upgrade engine when the path is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<DocValue>,
    /// Choices for `select` fields.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

/// An editable row list. Columns follow the same rules as fields, scoped to
/// one row each.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDef {
    pub path: String,
    pub title: String,
    #[serde(default)]
    pub add_label: String,
    pub columns: Vec<FieldDef>,
    /// Prefilled rows merged in by the upgrade engine when the path is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<DocValue>,
}

/// A titled group of fields and tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub key: String,
    pub title: String,
    #[serde(default)]
    pub fields: Vec<FieldDef>,
    #[serde(default)]
    pub tables: Vec<TableDef>,
}

impl Section {
    /// `(path, value)` pairs declared via `default` on this section's fields
    /// and tables.
    pub fn defaults(&self) -> Vec<(String, DocValue)> {
        let mut out = Vec::new();
        for field in &self.fields {
            if let Some(value) = &field.default {
                out.push((field.path.clone(), value.clone()));
            }
        }
        for table in &self.tables {
            if let Some(value) = &table.default {
                out.push((table.path.clone(), value.clone()));
            }
        }
        out
    }
}

/// The declarative description of what data one template version requires.
///
/// Schemas are stored as JSON alongside each template version and are
/// permissive towards document paths they do not declare.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormSchema {
    pub sections: Vec<Section>,
}

impl FormSchema {
    /// Deserialize a schema and enforce the per-section path uniqueness
    /// invariant. Template versions ship schemas, so a violation here is an
    /// internal error, not user input.
    pub fn parse(value: &serde_json::Value) -> CoreResult<Self> {
        let schema: FormSchema = serde_json::from_value(value.clone())
            .map_err(|e| CoreError::Schema(format!("schema does not deserialize: {e}")))?;
        schema.check_integrity()?;
        Ok(schema)
    }

    pub fn check_integrity(&self) -> CoreResult<()> {
        for section in &self.sections {
            let mut seen: BTreeSet<&str> = BTreeSet::new();
            for path in section
                .fields
                .iter()
                .map(|f| f.path.as_str())
                .chain(section.tables.iter().map(|t| t.path.as_str()))
            {
                if !seen.insert(path) {
                    return Err(CoreError::Schema(format!(
                        "duplicate path '{path}' in section '{}'",
                        section.key
                    )));
                }
            }
            for table in &section.tables {
                let mut cols: BTreeSet<&str> = BTreeSet::new();
                for column in &table.columns {
                    if !cols.insert(column.path.as_str()) {
                        return Err(CoreError::Schema(format!(
                            "duplicate column '{}' in table '{}'",
                            column.path, table.path
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    pub fn section(&self, key: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.key == key)
    }

    pub fn find_field(&self, path: &str) -> Option<&FieldDef> {
        self.sections
            .iter()
            .flat_map(|s| s.fields.iter())
            .find(|f| f.path == path)
    }

    pub fn find_table(&self, path: &str) -> Option<&TableDef> {
        self.sections
            .iter()
            .flat_map(|s| s.tables.iter())
            .find(|t| t.path == path)
    }

    /// All scalar fields, across sections.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.sections.iter().flat_map(|s| s.fields.iter())
    }

    /// All tables, across sections.
    pub fn tables(&self) -> impl Iterator<Item = &TableDef> {
        self.sections.iter().flat_map(|s| s.tables.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn psra_like_schema() -> serde_json::Value {
        serde_json::json!({
            "sections": [
                {
                    "key": "fees",
                    "title": "Fees",
                    "fields": [
                        { "path": "fees.base_ex_vat", "label": "Base fee (ex VAT)",
                          "type": "money", "required": true, "min": 0.0 },
                        { "path": "fees.vat_registered", "label": "VAT registered",
                          "type": "checkbox", "default": false }
                    ],
                    "tables": [
                        { "path": "fees.additional", "title": "Additional services",
                          "add_label": "Add service",
                          "columns": [
                            { "path": "label", "label": "Service", "type": "text", "required": true },
                            { "path": "amount", "label": "Amount", "type": "money" }
                          ] }
                    ]
                },
                {
                    "key": "term",
                    "title": "Term",
                    "fields": [
                        { "path": "term.start", "label": "Start date", "type": "date", "required": true },
                        { "path": "term.end", "label": "End date", "type": "date", "required": true }
                    ]
                }
            ]
        })
    }

    #[test]
    fn parses_and_indexes_sections() {
        let schema = FormSchema::parse(&psra_like_schema()).unwrap();
        assert_eq!(schema.sections.len(), 2);
        assert!(schema.section("fees").is_some());
        let field = schema.find_field("fees.base_ex_vat").unwrap();
        assert_eq!(field.field_type, FieldType::Money);
        assert!(field.required);
        assert_eq!(field.min, Some(0.0));
        let table = schema.find_table("fees.additional").unwrap();
        assert_eq!(table.columns.len(), 2);
    }

    #[test]
    fn duplicate_paths_in_section_rejected() {
        let mut value = psra_like_schema();
        value["sections"][0]["fields"][1]["path"] = "fees.base_ex_vat".into();
        let err = FormSchema::parse(&value).unwrap_err();
        assert!(matches!(err, CoreError::Schema(_)));
    }

    #[test]
    fn duplicate_table_columns_rejected() {
        let mut value = psra_like_schema();
        value["sections"][0]["tables"][0]["columns"][1]["path"] = "label".into();
        assert!(FormSchema::parse(&value).is_err());
    }

    #[test]
    fn unknown_field_type_does_not_deserialize() {
        let value = serde_json::json!({
            "sections": [ { "key": "x", "title": "X", "fields": [
                { "path": "a", "label": "A", "type": "slider" }
            ] } ]
        });
        assert!(FormSchema::parse(&value).is_err());
    }

    #[test]
    fn section_defaults_cover_fields_and_tables() {
        let value = serde_json::json!({
            "sections": [ { "key": "fees", "title": "Fees",
                "fields": [
                    { "path": "fees.currency_note", "label": "Note", "type": "text",
                      "default": "inclusive of outlays" }
                ],
                "tables": [
                    { "path": "fees.additional", "title": "Extras", "add_label": "Add",
                      "columns": [ { "path": "label", "label": "L", "type": "text" } ],
                      "default": [ { "label": "Inspection" } ] }
                ] } ]
        });
        let schema = FormSchema::parse(&value).unwrap();
        let defaults = schema.section("fees").unwrap().defaults();
        assert_eq!(defaults.len(), 2);
        assert_eq!(defaults[0].0, "fees.currency_note");
        assert!(matches!(defaults[1].1, DocValue::Rows(_)));
    }
}
