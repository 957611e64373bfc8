use serde::{Deserialize, Serialize};
use similar::TextDiff;

use crate::domain::document::Document;
use crate::domain::schema::{FieldDef, FieldType, FormSchema, TableDef};
use crate::error::CoreResult;

/// Where a section lives across the two schema versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Presence {
    Both,
    OnlyOld,
    OnlyNew,
}

/// A field whose declared type changed between versions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetypedField {
    pub path: String,
    pub old_type: FieldType,
    pub new_type: FieldType,
}

/// Per-section structural difference between two schema versions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionDelta {
    pub key: String,
    pub title: String,
    pub presence: Presence,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub added_fields: Vec<FieldDef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub removed_fields: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub retyped_fields: Vec<RetypedField>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub added_tables: Vec<TableDef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub removed_tables: Vec<String>,
}

impl SectionDelta {
    fn unchanged(&self) -> bool {
        self.presence == Presence::Both
            && self.added_fields.is_empty()
            && self.removed_fields.is_empty()
            && self.retyped_fields.is_empty()
            && self.added_tables.is_empty()
            && self.removed_tables.is_empty()
    }
}

/// Structural difference between two form schema versions. Sections with no
/// changes are left out entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaDelta {
    pub sections: Vec<SectionDelta>,
}

impl SchemaDelta {
    /// Compare two schema versions section by section, keyed by section key.
    /// Field comparison is scoped to the section, so a field moved between
    /// sections shows up as removed in one and added in the other.
    pub fn diff(old: &FormSchema, new: &FormSchema) -> Self {
        let mut sections = Vec::new();

        for new_section in &new.sections {
            let delta = match old.section(&new_section.key) {
                Some(old_section) => {
                    let mut delta = SectionDelta {
                        key: new_section.key.clone(),
                        title: new_section.title.clone(),
                        presence: Presence::Both,
                        added_fields: Vec::new(),
                        removed_fields: Vec::new(),
                        retyped_fields: Vec::new(),
                        added_tables: Vec::new(),
                        removed_tables: Vec::new(),
                    };
                    for field in &new_section.fields {
                        match old_section.fields.iter().find(|f| f.path == field.path) {
                            None => delta.added_fields.push(field.clone()),
                            Some(old_field) if old_field.field_type != field.field_type => {
                                delta.retyped_fields.push(RetypedField {
                                    path: field.path.clone(),
                                    old_type: old_field.field_type,
                                    new_type: field.field_type,
                                });
                            }
                            Some(_) => {}
                        }
                    }
                    for old_field in &old_section.fields {
                        if !new_section.fields.iter().any(|f| f.path == old_field.path) {
                            delta.removed_fields.push(old_field.path.clone());
                        }
                    }
                    for table in &new_section.tables {
                        if !old_section.tables.iter().any(|t| t.path == table.path) {
                            delta.added_tables.push(table.clone());
                        }
                    }
                    for old_table in &old_section.tables {
                        if !new_section.tables.iter().any(|t| t.path == old_table.path) {
                            delta.removed_tables.push(old_table.path.clone());
                        }
                    }
                    delta
                }
                None => SectionDelta {
                    key: new_section.key.clone(),
                    title: new_section.title.clone(),
                    presence: Presence::OnlyNew,
                    added_fields: new_section.fields.clone(),
                    removed_fields: Vec::new(),
                    retyped_fields: Vec::new(),
                    added_tables: new_section.tables.clone(),
                    removed_tables: Vec::new(),
                },
            };
            if !delta.unchanged() {
                sections.push(delta);
            }
        }

        for old_section in &old.sections {
            if new.section(&old_section.key).is_none() {
                sections.push(SectionDelta {
                    key: old_section.key.clone(),
                    title: old_section.title.clone(),
                    presence: Presence::OnlyOld,
                    added_fields: Vec::new(),
                    removed_fields: old_section.fields.iter().map(|f| f.path.clone()).collect(),
                    retyped_fields: Vec::new(),
                    added_tables: Vec::new(),
                    removed_tables: old_section.tables.iter().map(|t| t.path.clone()).collect(),
                });
            }
        }

        SchemaDelta { sections }
    }

    /// True when the two versions declare the same structure.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Every path the new version dropped, fields and tables alike.
    pub fn removed_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        for section in &self.sections {
            paths.extend(section.removed_fields.iter().cloned());
            paths.extend(section.removed_tables.iter().cloned());
        }
        paths
    }

    /// Keys of sections that carry additions, in delta order.
    pub fn sections_with_additions(&self) -> Vec<String> {
        self.sections
            .iter()
            .filter(|s| !s.added_fields.is_empty() || !s.added_tables.is_empty())
            .map(|s| s.key.clone())
            .collect()
    }
}

/// Unified diff of the two HTML templates, three lines of context.
pub fn diff_templates(old: &str, new: &str) -> String {
    TextDiff::from_lines(old, new)
        .unified_diff()
        .context_radius(3)
        .header("current", "proposed")
        .to_string()
}

/// Merge a document onto a newer schema version.
///
/// Always non-destructive: the input is cloned, defaults are written only at
/// paths the document does not already hold, and removed values are either
/// left in place or moved under the deprecated bucket. Accepted section keys
/// the new schema does not know are skipped.
pub fn apply_upgrade(
    document: &Document,
    new_schema: &FormSchema,
    accepted_sections: &[String],
    archive_removed: bool,
    removed_paths: &[String],
) -> CoreResult<Document> {
    let mut merged = document.clone();

    for key in accepted_sections {
        let Some(section) = new_schema.section(key) else {
            continue;
        };
        for (path, value) in section.defaults() {
            if matches!(merged.get(&path), Ok(None)) {
                merged.set(&path, value)?;
            }
        }
        for field in &section.fields {
            if field.field_type == FieldType::Checkbox && matches!(merged.get(&field.path), Ok(None))
            {
                merged.set(&field.path, crate::domain::document::DocValue::Bool(false))?;
            }
        }
    }

    if archive_removed {
        for path in removed_paths {
            merged.archive(path)?;
        }
    }

    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::document::{DocValue, DEPRECATED_BUCKET};

    fn schema_v1() -> FormSchema {
        FormSchema::parse(&serde_json::json!({
            "sections": [
                {
                    "key": "fees",
                    "title": "Fees",
                    "fields": [
                        { "path": "fees.base_ex_vat", "label": "Base fee", "type": "money" },
                        { "path": "fees.late_penalty", "label": "Late penalty", "type": "money" },
                        { "path": "fees.unit_count", "label": "Units", "type": "text" }
                    ],
                    "tables": [
                        { "path": "fees.additional", "title": "Extras",
                          "columns": [
                            { "path": "label", "label": "Service", "type": "text" }
                          ] }
                    ]
                },
                {
                    "key": "legacy",
                    "title": "Legacy terms",
                    "fields": [
                        { "path": "legacy.clause", "label": "Clause", "type": "text" }
                    ]
                }
            ]
        }))
        .unwrap()
    }

    fn schema_v2() -> FormSchema {
        FormSchema::parse(&serde_json::json!({
            "sections": [
                {
                    "key": "fees",
                    "title": "Fees",
                    "fields": [
                        { "path": "fees.base_ex_vat", "label": "Base fee", "type": "money" },
                        { "path": "fees.review_date", "label": "Review date", "type": "date",
                          "default": "2026-01-01" },
                        { "path": "fees.unit_count", "label": "Units", "type": "number" }
                    ],
                    "tables": [
                        { "path": "fees.additional", "title": "Extras",
                          "columns": [
                            { "path": "label", "label": "Service", "type": "text" }
                          ] },
                        { "path": "fees.discounts", "title": "Discounts",
                          "columns": [
                            { "path": "reason", "label": "Reason", "type": "text" }
                          ] }
                    ]
                },
                {
                    "key": "compliance",
                    "title": "Compliance",
                    "fields": [
                        { "path": "compliance.gdpr_ack", "label": "GDPR", "type": "checkbox" }
                    ]
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn identical_schemas_produce_an_empty_delta() {
        let delta = SchemaDelta::diff(&schema_v1(), &schema_v1());
        assert!(delta.is_empty());
    }

    #[test]
    fn delta_captures_structural_changes() {
        let delta = SchemaDelta::diff(&schema_v1(), &schema_v2());
        assert!(!delta.is_empty());

        let fees = delta.sections.iter().find(|s| s.key == "fees").unwrap();
        assert_eq!(fees.presence, Presence::Both);
        assert_eq!(fees.added_fields.len(), 1);
        assert_eq!(fees.added_fields[0].path, "fees.review_date");
        assert_eq!(fees.removed_fields, vec!["fees.late_penalty".to_string()]);
        assert_eq!(fees.retyped_fields.len(), 1);
        assert_eq!(fees.retyped_fields[0].path, "fees.unit_count");
        assert_eq!(fees.retyped_fields[0].old_type, FieldType::Text);
        assert_eq!(fees.retyped_fields[0].new_type, FieldType::Number);
        assert_eq!(fees.added_tables.len(), 1);
        assert_eq!(fees.added_tables[0].path, "fees.discounts");

        let compliance = delta.sections.iter().find(|s| s.key == "compliance").unwrap();
        assert_eq!(compliance.presence, Presence::OnlyNew);
        assert_eq!(compliance.added_fields.len(), 1);

        let legacy = delta.sections.iter().find(|s| s.key == "legacy").unwrap();
        assert_eq!(legacy.presence, Presence::OnlyOld);
        assert_eq!(legacy.removed_fields, vec!["legacy.clause".to_string()]);
    }

    #[test]
    fn removed_paths_cover_fields_and_tables() {
        let delta = SchemaDelta::diff(&schema_v1(), &schema_v2());
        let removed = delta.removed_paths();
        assert!(removed.contains(&"fees.late_penalty".to_string()));
        assert!(removed.contains(&"legacy.clause".to_string()));
    }

    #[test]
    fn apply_fills_defaults_only_at_absent_paths() {
        let mut doc = Document::new();
        doc.set("fees.base_ex_vat", DocValue::Float(900.0)).unwrap();

        let merged = apply_upgrade(
            &doc,
            &schema_v2(),
            &["fees".to_string(), "compliance".to_string()],
            false,
            &[],
        )
        .unwrap();

        assert_eq!(
            merged.get("fees.review_date").unwrap().and_then(DocValue::as_str),
            Some("2026-01-01")
        );
        assert_eq!(
            merged.get("compliance.gdpr_ack").unwrap(),
            Some(&DocValue::Bool(false))
        );
        // Existing values are never overwritten.
        assert_eq!(
            merged.get("fees.base_ex_vat").unwrap(),
            Some(&DocValue::Float(900.0))
        );
        // The input document is untouched.
        assert_eq!(doc.get("fees.review_date").unwrap(), None);
    }

    #[test]
    fn apply_skips_sections_not_accepted() {
        let doc = Document::new();
        let merged =
            apply_upgrade(&doc, &schema_v2(), &["compliance".to_string()], false, &[]).unwrap();
        assert_eq!(merged.get("fees.review_date").unwrap(), None);
        assert_eq!(
            merged.get("compliance.gdpr_ack").unwrap(),
            Some(&DocValue::Bool(false))
        );
    }

    #[test]
    fn apply_ignores_unknown_section_keys() {
        let doc = Document::new();
        let merged =
            apply_upgrade(&doc, &schema_v2(), &["no_such_section".to_string()], false, &[])
                .unwrap();
        assert_eq!(merged.get("fees.review_date").unwrap(), None);
    }

    #[test]
    fn archive_moves_removed_values_under_the_deprecated_bucket() {
        let mut doc = Document::new();
        doc.set("fees.late_penalty", DocValue::Float(25.0)).unwrap();
        doc.set("legacy.clause", DocValue::Text("old wording".into()))
            .unwrap();

        let delta = SchemaDelta::diff(&schema_v1(), &schema_v2());
        let merged = apply_upgrade(&doc, &schema_v2(), &[], true, &delta.removed_paths()).unwrap();

        assert_eq!(merged.get("fees.late_penalty").unwrap(), None);
        assert_eq!(
            merged.deprecated().and_then(|d| d.get("fees.late_penalty")),
            Some(&DocValue::Float(25.0))
        );
        assert_eq!(
            merged
                .deprecated()
                .and_then(|d| d.get("legacy.clause"))
                .and_then(DocValue::as_str),
            Some("old wording")
        );
    }

    #[test]
    fn archive_false_leaves_values_in_place() {
        let mut doc = Document::new();
        doc.set("fees.late_penalty", DocValue::Float(25.0)).unwrap();

        let delta = SchemaDelta::diff(&schema_v1(), &schema_v2());
        let merged = apply_upgrade(&doc, &schema_v2(), &[], false, &delta.removed_paths()).unwrap();

        assert_eq!(
            merged.get("fees.late_penalty").unwrap(),
            Some(&DocValue::Float(25.0))
        );
        assert!(merged.deprecated().is_none());
    }

    #[test]
    fn template_diff_is_a_unified_diff() {
        let old = "<h1>Agreement</h1>\n<p>Fee: {{ fees.base_ex_vat }}</p>\n";
        let new = "<h1>Agreement</h1>\n<p>Fee: {{ fees.base_ex_vat }} ex VAT</p>\n";
        let diff = diff_templates(old, new);
        assert!(diff.contains("--- current"));
        assert!(diff.contains("+++ proposed"));
        assert!(diff.contains("-<p>Fee: {{ fees.base_ex_vat }}</p>"));
        assert!(diff.contains("+<p>Fee: {{ fees.base_ex_vat }} ex VAT</p>"));
    }

    #[test]
    fn identical_templates_produce_no_hunks() {
        let html = "<h1>Agreement</h1>\n";
        let diff = diff_templates(html, html);
        assert!(!diff.contains("@@"));
    }
}
