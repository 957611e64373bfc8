use std::collections::BTreeMap;

use chrono::NaiveDate;
use regex::Regex;

use crate::domain::document::{DocValue, Document};
use crate::domain::schema::{FieldDef, FieldType, FormSchema};

/// Date format accepted for `date` fields, mirrored by the form layer.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Check a document against a schema, producing a path-keyed error map.
///
/// Table rows are keyed `<table>[<idx>].<column>`. The map is empty iff the
/// document is valid. Paths the schema does not declare are ignored: the
/// schema is permissive, not closed. Input is never mutated, and validating
/// the same document twice yields the same map.
pub fn validate(document: &Document, schema: &FormSchema) -> BTreeMap<String, String> {
    let mut errors = BTreeMap::new();

    for field in schema.fields() {
        match document.get(&field.path) {
            Ok(value) => {
                if let Some(message) = check_value(field, value) {
                    errors.insert(field.path.clone(), message);
                }
            }
            Err(_) => {
                errors.insert(
                    field.path.clone(),
                    "path blocked by a non-object value".to_string(),
                );
            }
        }
    }

    for table in schema.tables() {
        let rows = match document.get(&table.path) {
            Ok(None) => continue,
            Ok(Some(DocValue::Rows(rows))) => rows,
            Ok(Some(_)) => {
                errors.insert(table.path.clone(), "expected a list of rows".to_string());
                continue;
            }
            Err(_) => {
                errors.insert(
                    table.path.clone(),
                    "path blocked by a non-object value".to_string(),
                );
                continue;
            }
        };

        for (idx, row) in rows.iter().enumerate() {
            for column in &table.columns {
                let value = row.get(&column.path);
                if let Some(message) = check_value(column, value) {
                    errors.insert(format!("{}[{}].{}", table.path, idx, column.path), message);
                }
            }
        }
    }

    errors
}

/// Apply one field's rules to an optional value. `None` means "not in the
/// error map".
fn check_value(field: &FieldDef, value: Option<&DocValue>) -> Option<String> {
    let present = value.map(|v| !v.is_empty()).unwrap_or(false);

    if field.required && !present {
        return Some("required".to_string());
    }
    if !present {
        return None;
    }
    let value = value?;

    match field.field_type {
        FieldType::Number | FieldType::Money => {
            let parsed = match value {
                DocValue::Int(_) | DocValue::Float(_) => value.as_f64(),
                DocValue::Text(s) => s.trim().parse::<f64>().ok(),
                _ => None,
            };
            let Some(number) = parsed else {
                return Some("not a number".to_string());
            };
            if let Some(min) = field.min {
                if number < min {
                    return Some(format!("must be at least {min}"));
                }
            }
            if let Some(max) = field.max {
                if number > max {
                    return Some(format!("must be at most {max}"));
                }
            }
        }
        FieldType::Date => {
            let ok = value
                .as_str()
                .map(|s| NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).is_ok())
                .unwrap_or(false);
            if !ok {
                return Some("invalid date, expected YYYY-MM-DD".to_string());
            }
        }
        _ => {}
    }

    if let (Some(pattern), Some(text)) = (&field.regex, value.as_str()) {
        if !text.is_empty() {
            // Full match: the pattern is anchored around the whole value.
            let anchored = format!("^(?:{pattern})$");
            match Regex::new(&anchored) {
                Ok(re) => {
                    if !re.is_match(text) {
                        return Some("invalid format".to_string());
                    }
                }
                Err(_) => return Some("invalid validation pattern".to_string()),
            }
        }
    }

    None
}
