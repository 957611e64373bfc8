use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::document::{DocValue, Document};
use crate::domain::ingest::ingest_form;
use crate::domain::schema::FormSchema;
use crate::domain::term::Jurisdiction;
use crate::domain::validate::{validate, DATE_FORMAT};
use crate::error::{CoreError, CoreResult};

/// Document path mirrored into the contract's `contract_value` column.
pub const VALUE_PATH: &str = "fees.base_ex_vat";

/// Document paths mirrored into the contract's term date columns.
pub const TERM_START_PATH: &str = "term.start";
pub const TERM_END_PATH: &str = "term.end";

/// Queryable columns derived from well-known document paths. The document
/// stays the source of truth; these exist so the database can filter and sum
/// without unpacking JSON.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MirroredColumns {
    pub contract_value: Option<Decimal>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Ingest a wizard submission into a validated draft document.
///
/// Runs the full pipeline: defaults, form casting, schema validation, then
/// the jurisdiction's term policy, and finally extracts the mirrored
/// columns. Any failure rejects the submission whole.
pub fn ingest_draft(
    form: &BTreeMap<String, String>,
    schema: &FormSchema,
    jurisdiction: Jurisdiction,
) -> CoreResult<(Document, MirroredColumns)> {
    let document = ingest_form(form, schema)?;
    enforce_term_policy(&document, jurisdiction)?;
    let mirror = mirrored_columns(&document)?;
    Ok((document, mirror))
}

/// Set one dotted path on a copy of the document and re-validate the whole
/// thing. The stored document is untouched unless the edit survives
/// validation.
pub fn apply_inline_edit(
    document: &Document,
    schema: &FormSchema,
    path: &str,
    value: &serde_json::Value,
) -> CoreResult<Document> {
    let doc_value = DocValue::try_from(value)
        .map_err(|e| CoreError::MalformedPayload(format!("unsupported value for '{path}': {e}")))?;

    let mut updated = document.clone();
    updated.set(path, doc_value)?;

    let errors = validate(&updated, schema);
    if errors.is_empty() {
        Ok(updated)
    } else {
        Err(CoreError::Validation(errors))
    }
}

/// Apply the jurisdiction term rules when the document carries both dates.
/// Date parse failures are the validator's problem, not a policy breach.
pub fn enforce_term_policy(document: &Document, jurisdiction: Jurisdiction) -> CoreResult<()> {
    let (Some(start), Some(end)) = (
        date_at(document, TERM_START_PATH),
        date_at(document, TERM_END_PATH),
    ) else {
        return Ok(());
    };
    jurisdiction.check_term(start, end)
}

/// Pull the mirrored columns out of a document.
pub fn mirrored_columns(document: &Document) -> CoreResult<MirroredColumns> {
    let contract_value = match numeric_at(document, VALUE_PATH) {
        Some(raw) => Some(Decimal::try_from(raw).map_err(|_| {
            CoreError::validation_one(VALUE_PATH, "not representable as a money amount")
        })?),
        None => None,
    };

    Ok(MirroredColumns {
        contract_value,
        start_date: date_at(document, TERM_START_PATH),
        end_date: date_at(document, TERM_END_PATH),
    })
}

fn numeric_at(document: &Document, path: &str) -> Option<f64> {
    match document.get(path).ok()?? {
        value @ (DocValue::Int(_) | DocValue::Float(_)) => value.as_f64(),
        DocValue::Text(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn date_at(document: &Document, path: &str) -> Option<NaiveDate> {
    document
        .get(path)
        .ok()
        .flatten()
        .and_then(DocValue::as_str)
        .and_then(|s| NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok())
}
