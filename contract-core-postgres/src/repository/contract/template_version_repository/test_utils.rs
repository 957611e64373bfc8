#[cfg(test)]
pub mod test_utils {
    use contract_core_db::models::contract::template_version::TemplateVersionModel;
    use heapless::String as HeaplessString;
    use uuid::Uuid;

    pub fn create_test_version(template_id: Uuid, version_label: &str) -> TemplateVersionModel {
        let form_schema = serde_json::json!({
            "sections": [
                {
                    "key": "fees",
                    "title": "Fees",
                    "fields": [
                        { "path": "fees.base_ex_vat", "label": "Base fee (ex VAT)",
                          "type": "money", "required": true, "min": 0.0 }
                    ]
                },
                {
                    "key": "term",
                    "title": "Term",
                    "fields": [
                        { "path": "term.start", "label": "Start date", "type": "date" },
                        { "path": "term.end", "label": "End date", "type": "date" }
                    ]
                }
            ]
        });
        TemplateVersionModel::new(
            template_id,
            HeaplessString::try_from(version_label).unwrap(),
            "<html><body><p>Base fee: {{ fees.base_ex_vat }}</p></body></html>".to_string(),
            form_schema,
        )
    }
}
