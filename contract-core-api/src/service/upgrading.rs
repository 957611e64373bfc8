use serde::Serialize;

use crate::domain::document::{DocValue, Document};
use crate::domain::schema::FormSchema;
use crate::domain::upgrade::{diff_templates, Presence, SchemaDelta};

/// One default the upgrade would write, shown for review before applying.
#[derive(Debug, Clone, Serialize)]
pub struct PendingDefault {
    pub section: String,
    pub path: String,
    pub value: DocValue,
}

/// Everything a reviewer needs to decide on an upgrade: the structural
/// delta, the template text diff, and the defaults that would land in this
/// particular contract's document.
#[derive(Debug, Clone, Serialize)]
pub struct UpgradePlan {
    pub delta: SchemaDelta,
    pub template_diff: String,
    pub pending_defaults: Vec<PendingDefault>,
    pub up_to_date: bool,
}

/// Plan an upgrade of one contract from its current template version to a
/// proposed one. Pure comparison; nothing is written.
pub fn plan_upgrade(
    document: &Document,
    old_schema: &FormSchema,
    new_schema: &FormSchema,
    old_html: &str,
    new_html: &str,
) -> UpgradePlan {
    let delta = SchemaDelta::diff(old_schema, new_schema);
    let template_diff = diff_templates(old_html, new_html);

    let mut pending_defaults = Vec::new();
    for section_delta in &delta.sections {
        if section_delta.presence == Presence::OnlyOld {
            continue;
        }
        let Some(section) = new_schema.section(&section_delta.key) else {
            continue;
        };
        for (path, value) in section.defaults() {
            if matches!(document.get(&path), Ok(None)) {
                pending_defaults.push(PendingDefault {
                    section: section.key.clone(),
                    path,
                    value,
                });
            }
        }
    }

    let up_to_date = delta.is_empty() && template_diff.is_empty();
    UpgradePlan {
        delta,
        template_diff,
        pending_defaults,
        up_to_date,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema(json: serde_json::Value) -> FormSchema {
        FormSchema::parse(&json).unwrap()
    }

    fn v1() -> FormSchema {
        schema(serde_json::json!({
            "sections": [
                { "key": "fees", "title": "Fees", "fields": [
                    { "path": "fees.base_ex_vat", "label": "Base fee", "type": "money" }
                ] }
            ]
        }))
    }

    fn v2() -> FormSchema {
        schema(serde_json::json!({
            "sections": [
                { "key": "fees", "title": "Fees", "fields": [
                    { "path": "fees.base_ex_vat", "label": "Base fee", "type": "money" },
                    { "path": "fees.review_date", "label": "Review date", "type": "date",
                      "default": "2026-01-01" }
                ] }
            ]
        }))
    }

    #[test]
    fn plan_lists_defaults_the_document_lacks() {
        let mut doc = Document::new();
        doc.set("fees.base_ex_vat", DocValue::Float(900.0)).unwrap();

        let plan = plan_upgrade(&doc, &v1(), &v2(), "<p>v1</p>\n", "<p>v2</p>\n");
        assert!(!plan.up_to_date);
        assert_eq!(plan.pending_defaults.len(), 1);
        assert_eq!(plan.pending_defaults[0].section, "fees");
        assert_eq!(plan.pending_defaults[0].path, "fees.review_date");
        assert!(plan.template_diff.contains("-<p>v1</p>"));
    }

    #[test]
    fn defaults_already_present_are_not_pending() {
        let mut doc = Document::new();
        doc.set("fees.review_date", DocValue::Text("2025-06-01".into()))
            .unwrap();

        let plan = plan_upgrade(&doc, &v1(), &v2(), "", "");
        assert!(plan.pending_defaults.is_empty());
    }

    #[test]
    fn identical_versions_plan_to_up_to_date() {
        let plan = plan_upgrade(&Document::new(), &v1(), &v1(), "<p>same</p>\n", "<p>same</p>\n");
        assert!(plan.up_to_date);
        assert!(plan.delta.is_empty());
        assert!(plan.pending_defaults.is_empty());
    }

    #[test]
    fn template_only_change_is_not_up_to_date() {
        let plan = plan_upgrade(&Document::new(), &v1(), &v1(), "<p>old</p>\n", "<p>new</p>\n");
        assert!(!plan.up_to_date);
        assert!(plan.delta.is_empty());
        assert!(!plan.template_diff.is_empty());
    }
}
