use std::collections::BTreeMap;

use crate::domain::document::{DocObject, DocValue, Document};
use crate::domain::schema::{FieldDef, FieldType, FormSchema};
use crate::domain::validate::validate;
use crate::error::{CoreError, CoreResult};

/// Form key prefix for scalar fields: `fs__<dotted.path>`.
pub const SCALAR_PREFIX: &str = "fs__";

/// Form key prefix for table cells: `fslist__<table.path>__<row>__<column>`.
pub const LIST_PREFIX: &str = "fslist__";

/// Build a document from a flat form submission.
///
/// The document is seeded with schema defaults, form values are cast per
/// their declared field type and layered on top, and the result is checked
/// with [`validate`]. Keys without a recognised prefix, or naming paths the
/// schema does not declare, are dropped. Any cast or validation failure
/// rejects the whole submission; there is no partial document.
pub fn ingest_form(
    form: &BTreeMap<String, String>,
    schema: &FormSchema,
) -> CoreResult<Document> {
    let mut document = Document::new();
    let mut errors: BTreeMap<String, String> = BTreeMap::new();

    for section in &schema.sections {
        for (path, value) in section.defaults() {
            document.set(&path, value)?;
        }
    }

    // table.path -> raw row index -> cells
    let mut pending_rows: BTreeMap<String, BTreeMap<usize, DocObject>> = BTreeMap::new();

    for (key, raw) in form {
        if let Some(path) = key.strip_prefix(SCALAR_PREFIX) {
            let Some(field) = schema.find_field(path) else {
                continue;
            };
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                continue;
            }
            match cast_value(field, trimmed) {
                Ok(value) => {
                    if document.set(path, value).is_err() {
                        errors.insert(
                            path.to_string(),
                            "path blocked by a non-object value".to_string(),
                        );
                    }
                }
                Err(message) => {
                    errors.insert(path.to_string(), message);
                }
            }
        } else if let Some(rest) = key.strip_prefix(LIST_PREFIX) {
            let mut parts = rest.splitn(3, "__");
            let (Some(table_path), Some(row), Some(column_path)) =
                (parts.next(), parts.next(), parts.next())
            else {
                continue;
            };
            let Ok(index) = row.parse::<usize>() else {
                continue;
            };
            let Some(column) = schema
                .find_table(table_path)
                .and_then(|t| t.columns.iter().find(|c| c.path == column_path))
            else {
                continue;
            };
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                continue;
            }
            match cast_value(column, trimmed) {
                Ok(value) => {
                    pending_rows
                        .entry(table_path.to_string())
                        .or_default()
                        .entry(index)
                        .or_default()
                        .insert(column_path.to_string(), value);
                }
                Err(message) => {
                    errors.insert(format!("{table_path}[{index}].{column_path}"), message);
                }
            }
        }
    }

    // Unchecked boxes are absent from the submission entirely.
    for field in schema.fields() {
        if field.field_type == FieldType::Checkbox
            && matches!(document.get(&field.path), Ok(None))
        {
            document.set(&field.path, DocValue::Bool(false))?;
        }
    }

    for table in schema.tables() {
        let Some(by_index) = pending_rows.remove(&table.path) else {
            continue;
        };
        let mut rows = Vec::new();
        // BTreeMap keeps raw indices ordered; gaps are compacted away.
        for (_, mut row) in by_index {
            if row.values().all(DocValue::is_empty) {
                continue;
            }
            for column in &table.columns {
                if column.field_type == FieldType::Checkbox && !row.contains_key(&column.path) {
                    row.insert(column.path.clone(), DocValue::Bool(false));
                }
            }
            rows.push(row);
        }
        if rows.is_empty() {
            continue;
        }
        if document.set(&table.path, DocValue::Rows(rows)).is_err() {
            errors.insert(
                table.path.clone(),
                "path blocked by a non-object value".to_string(),
            );
        }
    }

    for (path, message) in validate(&document, schema) {
        errors.entry(path).or_insert(message);
    }

    if errors.is_empty() {
        Ok(document)
    } else {
        Err(CoreError::Validation(errors))
    }
}

/// Cast one raw form value per the field's declared type.
fn cast_value(field: &FieldDef, raw: &str) -> Result<DocValue, String> {
    match field.field_type {
        FieldType::Number => {
            if let Ok(whole) = raw.parse::<i64>() {
                Ok(DocValue::Int(whole))
            } else {
                parse_finite(raw).map(DocValue::Float)
            }
        }
        FieldType::Money => parse_finite(raw).map(DocValue::Float),
        FieldType::Checkbox => Ok(DocValue::Bool(is_truthy(raw))),
        _ => Ok(DocValue::Text(raw.to_string())),
    }
}

fn parse_finite(raw: &str) -> Result<f64, String> {
    raw.parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .ok_or_else(|| "not a number".to_string())
}

fn is_truthy(raw: &str) -> bool {
    matches!(
        raw.to_ascii_lowercase().as_str(),
        "on" | "true" | "1" | "yes" | "y"
    )
}
