//! Demo data: two template families and a small client book, enough to walk
//! the wizard, the upgrade review, and the signature flow end to end.
//!
//! The Irish letting family ships two versions so a contract drafted on v1
//! has a real upgrade to review; the UK family demonstrates an uncapped
//! term policy.

use contract_core_api::domain::term::Jurisdiction;
use contract_core_api::error::{CoreError, CoreResult};
use contract_core_db::models::client::ClientModel;
use contract_core_db::models::contract::template::ContractTemplateModel;
use contract_core_db::models::contract::template_version::TemplateVersionModel;
use contract_core_db::models::person::PersonModel;
use contract_core_db::store::ContractStore;
use heapless::String as HeaplessString;
use serde_json::json;
use uuid::Uuid;

/// Ids of everything the seed created.
#[derive(Debug, Clone, Copy)]
pub struct SeedSummary {
    pub person_id: Uuid,
    pub ie_client_id: Uuid,
    pub uk_client_id: Uuid,
    pub letting_template_id: Uuid,
    pub letting_v1_id: Uuid,
    pub letting_v2_id: Uuid,
    pub ast_template_id: Uuid,
    pub ast_v1_id: Uuid,
}

pub async fn seed_demo_data(store: &dyn ContractStore) -> CoreResult<SeedSummary> {
    // Reseeding an already-seeded store would duplicate the families.
    let letting_code_hash =
        ContractTemplateModel::hash_code("psra_letting").map_err(CoreError::Storage)?;
    if store
        .template_by_code_hash(letting_code_hash)
        .await?
        .is_some()
    {
        return Err(CoreError::Storage(
            "demo data is already present; seed only runs against a clean store".to_string(),
        ));
    }

    let mut person = PersonModel::new(hs("Aoife Brennan")?);
    person.email = Some(hs("aoife.brennan@example.ie")?);
    let person = store.create_person(person).await?;

    let mut ie_client = ClientModel::new(hs("Maple Court Management")?, Jurisdiction::IE);
    ie_client.contact_email = Some(hs("lettings@maplecourt.ie")?);
    ie_client.address = Some(hs("4 Maple Court, Dublin 2")?);
    let ie_client = store.create_client(ie_client).await?;

    let uk_client = store
        .create_client(ClientModel::new(
            hs("Pennine Property Group")?,
            Jurisdiction::UK,
        ))
        .await?;

    let letting = store
        .create_template(
            ContractTemplateModel::new(
                hs("psra_letting")?,
                hs("PSRA Residential Letting Agreement")?,
                Jurisdiction::IE,
            )
            .map_err(CoreError::Storage)?,
        )
        .await?;

    let letting_v1 = store
        .create_template_version(TemplateVersionModel::new(
            letting.id,
            hs("v1")?,
            LETTING_V1_HTML.to_string(),
            letting_v1_schema(),
        ))
        .await?;

    let letting_v2 = store
        .create_template_version(TemplateVersionModel::new(
            letting.id,
            hs("v2")?,
            LETTING_V2_HTML.to_string(),
            letting_v2_schema(),
        ))
        .await?;

    let ast = store
        .create_template(
            ContractTemplateModel::new(
                hs("uk_ast")?,
                hs("UK Assured Shorthold Tenancy")?,
                Jurisdiction::UK,
            )
            .map_err(CoreError::Storage)?,
        )
        .await?;

    let ast_v1 = store
        .create_template_version(TemplateVersionModel::new(
            ast.id,
            hs("v1")?,
            AST_V1_HTML.to_string(),
            ast_v1_schema(),
        ))
        .await?;

    Ok(SeedSummary {
        person_id: person.id,
        ie_client_id: ie_client.id,
        uk_client_id: uk_client.id,
        letting_template_id: letting.id,
        letting_v1_id: letting_v1.id,
        letting_v2_id: letting_v2.id,
        ast_template_id: ast.id,
        ast_v1_id: ast_v1.id,
    })
}

fn letting_v1_schema() -> serde_json::Value {
    json!({
        "sections": [
            {
                "key": "parties",
                "title": "Parties",
                "fields": [
                    { "path": "parties.landlord_name", "label": "Landlord", "type": "text", "required": true },
                    { "path": "parties.agent_psra_number", "label": "Agent PSRA licence", "type": "text", "regex": "^\\d{6}$" }
                ]
            },
            {
                "key": "fees",
                "title": "Fees",
                "fields": [
                    { "path": "fees.base_ex_vat", "label": "Letting fee (ex VAT)", "type": "money", "required": true, "min": 0.0 },
                    { "path": "fees.vat_registered", "label": "VAT registered", "type": "checkbox" }
                ],
                "tables": [
                    {
                        "path": "fees.additional",
                        "title": "Additional services",
                        "add_label": "Add service",
                        "columns": [
                            { "path": "label", "label": "Service", "type": "text", "required": true },
                            { "path": "amount", "label": "Amount", "type": "money", "required": true, "min": 0.0 }
                        ]
                    }
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

/// v2 drops the VAT flag, adds a management rate with a default, and brings
/// in a compliance section, so an upgrade from v1 exercises added, removed
/// and defaulted paths at once.
fn letting_v2_schema() -> serde_json::Value {
    json!({
        "sections": [
            {
                "key": "parties",
                "title": "Parties",
                "fields": [
                    { "path": "parties.landlord_name", "label": "Landlord", "type": "text", "required": true },
                    { "path": "parties.agent_psra_number", "label": "Agent PSRA licence", "type": "text", "regex": "^\\d{6}$" }
                ]
            },
            {
                "key": "fees",
                "title": "Fees",
                "fields": [
                    { "path": "fees.base_ex_vat", "label": "Letting fee (ex VAT)", "type": "money", "required": true, "min": 0.0 },
                    { "path": "fees.management_rate", "label": "Management rate (%)", "type": "number", "min": 0.0, "max": 100.0, "default": 12.5 }
                ],
                "tables": [
                    {
                        "path": "fees.additional",
                        "title": "Additional services",
                        "add_label": "Add service",
                        "columns": [
                            { "path": "label", "label": "Service", "type": "text", "required": true },
                            { "path": "amount", "label": "Amount", "type": "money", "required": true, "min": 0.0 }
                        ]
                    }
                ]
            },
            {
                "key": "term",
                "title": "Term",
                "fields": [
                    { "path": "term.start", "label": "Start date", "type": "date", "required": true },
                    { "path": "term.end", "label": "End date", "type": "date", "required": true }
                ]
            },
            {
                "key": "compliance",
                "title": "Compliance",
                "fields": [
                    { "path": "compliance.ber_rating", "label": "BER rating", "type": "select", "default": "D",
                      "options": ["A", "B", "C", "D", "E", "F", "G"] },
                    { "path": "compliance.smoke_alarms_fitted", "label": "Smoke alarms fitted", "type": "checkbox", "default": true }
                ]
            }
        ]
    })
}

fn ast_v1_schema() -> serde_json::Value {
    json!({
        "sections": [
            {
                "key": "parties",
                "title": "Parties",
                "fields": [
                    { "path": "parties.landlord_name", "label": "Landlord", "type": "text", "required": true },
                    { "path": "parties.tenant_name", "label": "Tenant", "type": "text", "required": true }
                ]
            },
            {
                "key": "rent",
                "title": "Rent",
                "fields": [
                    { "path": "rent.monthly", "label": "Monthly rent", "type": "money", "required": true, "min": 0.0 }
                ]
            },
            {
                "key": "term",
                "title": "Term",
                "fields": [
                    { "path": "term.start", "label": "Start date", "type": "date", "required": true },
                    { "path": "term.end", "label": "End date", "type": "date" }
                ]
            }
        ]
    })
}

const LETTING_V1_HTML: &str = r#"<!DOCTYPE html>
<html>
  <head><meta charset="utf-8"><title>{{ contract.template_code }} {{ contract.version_label }}</title></head>
  <body>
    <h1>Residential Letting Agreement</h1>
    <p>Agency: {{ contract.client_name }}</p>
    <p>Landlord: {{ parties.landlord_name }}</p>
    {% if parties.agent_psra_number %}<p>PSRA licence no. {{ parties.agent_psra_number }}</p>{% endif %}
    <p>Letting fee (ex VAT): {{ fees.base_ex_vat|money }} {{ contract.currency }}</p>
    {% if fees.additional %}
    <h2>Additional services</h2>
    <table>
      {% for row in fees.additional %}
      <tr><td>{{ row.label }}</td><td>{{ row.amount|money }} {{ contract.currency }}</td></tr>
      {% endfor %}
    </table>
    {% endif %}
    <p>Term: {{ term.start }} to {{ term.end }}</p>
  </body>
</html>
"#;

const LETTING_V2_HTML: &str = r#"<!DOCTYPE html>
<html>
  <head><meta charset="utf-8"><title>{{ contract.template_code }} {{ contract.version_label }}</title></head>
  <body>
    <h1>Residential Letting Agreement</h1>
    <p>Agency: {{ contract.client_name }}</p>
    <p>Landlord: {{ parties.landlord_name }}</p>
    {% if parties.agent_psra_number %}<p>PSRA licence no. {{ parties.agent_psra_number }}</p>{% endif %}
    <p>Letting fee (ex VAT): {{ fees.base_ex_vat|money }} {{ contract.currency }}</p>
    {% if fees.management_rate %}<p>Management rate: {{ fees.management_rate }}%</p>{% endif %}
    {% if fees.additional %}
    <h2>Additional services</h2>
    <table>
      {% for row in fees.additional %}
      <tr><td>{{ row.label }}</td><td>{{ row.amount|money }} {{ contract.currency }}</td></tr>
      {% endfor %}
    </table>
    {% endif %}
    <p>Term: {{ term.start }} to {{ term.end }}</p>
    <h2>Compliance</h2>
    <p>BER rating: {{ compliance.ber_rating }}</p>
    <p>Smoke alarms fitted: {% if compliance.smoke_alarms_fitted %}yes{% else %}no{% endif %}</p>
  </body>
</html>
"#;

const AST_V1_HTML: &str = r#"<!DOCTYPE html>
<html>
  <head><meta charset="utf-8"><title>{{ contract.template_code }} {{ contract.version_label }}</title></head>
  <body>
    <h1>Assured Shorthold Tenancy Agreement</h1>
    <p>Agency: {{ contract.client_name }}</p>
    <p>Landlord: {{ parties.landlord_name }}</p>
    <p>Tenant: {{ parties.tenant_name }}</p>
    <p>Monthly rent: {{ rent.monthly|money }} {{ contract.currency }}</p>
    <p>Term begins {{ term.start }}{% if term.end %} and ends {{ term.end }}{% endif %}</p>
  </body>
</html>
"#;

fn hs<const N: usize>(value: &str) -> CoreResult<HeaplessString<N>> {
    HeaplessString::try_from(value)
        .map_err(|_| CoreError::Storage(format!("seed value '{value}' exceeds {N} bytes")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use contract_core_db::store::MemoryStore;

    #[tokio::test]
    async fn seeds_both_families_with_v2_current_for_letting() {
        let store = MemoryStore::new();
        let summary = seed_demo_data(&store).await.unwrap();

        let latest = store
            .latest_template_version(summary.letting_template_id)
            .await
            .unwrap()
            .expect("letting family has versions");
        assert_eq!(latest.id, summary.letting_v2_id);

        let history = store
            .template_versions(summary.letting_template_id)
            .await
            .unwrap();
        let labels: Vec<&str> = history.iter().map(|v| v.version_label.as_str()).collect();
        assert_eq!(labels, ["v1", "v2"]);

        let ie_templates = store
            .templates_by_jurisdiction(Jurisdiction::IE)
            .await
            .unwrap();
        assert_eq!(ie_templates.len(), 1);
        assert_eq!(ie_templates[0].id, summary.letting_template_id);
    }

    #[tokio::test]
    async fn reseeding_a_seeded_store_is_rejected() {
        let store = MemoryStore::new();
        seed_demo_data(&store).await.unwrap();

        let err = seed_demo_data(&store).await.unwrap_err();
        assert!(err.to_string().contains("already present"));
    }

    #[test]
    fn seeded_schemas_parse_and_pass_integrity_checks() {
        use contract_core_api::domain::schema::FormSchema;

        for schema in [letting_v1_schema(), letting_v2_schema(), ast_v1_schema()] {
            FormSchema::parse(&schema).unwrap();
        }
    }
}
