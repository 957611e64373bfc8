//! HTML rendering backed by MiniJinja.
//!
//! Template text lives in the database, so compiled environments are cached
//! by content hash; editing a version's HTML naturally gets a fresh entry.

use std::sync::Arc;

use contract_core_api::domain::document::Document;
use contract_core_api::domain::render::{RenderContext, TemplateRenderer};
use contract_core_api::error::{CoreError, CoreResult};
use contract_core_db::utils::hash_as_i64;
use minijinja::{Environment, UndefinedBehavior};

const TEMPLATE_NAME: &str = "contract";
const CACHE_CAPACITY: u64 = 128;

pub struct MiniJinjaRenderer {
    compiled: moka::sync::Cache<i64, Arc<Environment<'static>>>,
}

impl MiniJinjaRenderer {
    pub fn new() -> Self {
        Self {
            compiled: moka::sync::Cache::new(CACHE_CAPACITY),
        }
    }

    fn environment(&self, template: &str) -> CoreResult<Arc<Environment<'static>>> {
        let key = hash_as_i64(&template).map_err(CoreError::Render)?;
        if let Some(env) = self.compiled.get(&key) {
            return Ok(env);
        }

        let mut env = Environment::new();
        // Documents are sparse; a path the contract never filled in renders
        // empty instead of failing the whole preview.
        env.set_undefined_behavior(UndefinedBehavior::Chainable);
        env.add_filter("money", money);
        env.add_template_owned(TEMPLATE_NAME.to_string(), template.to_string())
            .map_err(|e| CoreError::Render(format!("template does not compile: {e}")))?;

        let env = Arc::new(env);
        self.compiled.insert(key, env.clone());
        Ok(env)
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    /// Top-level document keys become template variables; contract metadata
    /// is reachable under `contract` (e.g. `{{ contract.client_name }}`).
    fn render(
        &self,
        template: &str,
        document: &Document,
        context: &RenderContext,
    ) -> CoreResult<String> {
        let env = self.environment(template)?;
        let tmpl = env
            .get_template(TEMPLATE_NAME)
            .map_err(|e| CoreError::Render(e.to_string()))?;

        let mut vars = serde_json::Map::new();
        if let serde_json::Value::Object(entries) = serde_json::Value::from(document) {
            vars.extend(entries);
        }
        vars.insert(
            "contract".to_string(),
            serde_json::to_value(context).map_err(|e| CoreError::Render(e.to_string()))?,
        );

        tmpl.render(&vars)
            .map_err(|e| CoreError::Render(format!("template render failed: {e}")))
    }
}

/// `{{ fees.base_ex_vat|money }}` -> `1,000.00`.
fn money(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!(
        "{}{grouped}.{:02}",
        if negative { "-" } else { "" },
        cents % 100
    )
}
