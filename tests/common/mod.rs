//! In-memory Odoo stand-in for integration tests.

// Each test binary compiles this module separately and uses a different
// subset of it.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use odoo_browser::{OdooClient, OdooConfig, OdooError, OdooTransport};

pub fn test_config() -> OdooConfig {
    OdooConfig {
        server: "http://odoo.test:8069".into(),
        database: "testdb".into(),
        username: "admin".into(),
        password: "admin".into(),
    }
}

/// Fake transport serving canned `ir.model` / `ir.model.fields` rows and
/// arbitrary record tables. Counts `execute` round trips so tests can
/// assert on cache behavior.
#[derive(Default)]
pub struct FakeOdoo {
    /// `ir.model` rows, in the order the "server" returns them.
    pub models: Vec<Value>,
    /// `ir.model.fields` rows keyed by owning model id.
    pub fields: HashMap<i64, Vec<Value>>,
    /// Raw record rows keyed by model name.
    pub records: HashMap<String, Vec<Value>>,
    /// Fail field fetches for this model id with a remote fault.
    pub fail_fields_for: Option<i64>,
    /// Fail every call outright.
    pub fail_all: bool,
    pub execute_calls: AtomicUsize,
    pub login_calls: AtomicUsize,
}

impl FakeOdoo {
    /// Two models where `m1.partner_id` references `m2`.
    pub fn two_related_models() -> Self {
        let mut fake = Self::default();
        fake.models = vec![
            json!({"id": 1, "model": "m1", "name": "Model One"}),
            json!({"id": 2, "model": "m2", "name": "Model Two"}),
        ];
        fake.fields.insert(
            1,
            vec![
                json!({"id": 10, "name": "partner_id", "model": "m1",
                       "ttype": "many2one", "relation": "m2"}),
                json!({"id": 11, "name": "name", "model": "m1",
                       "ttype": "char", "relation": false}),
            ],
        );
        fake.fields.insert(2, vec![]);
        fake.records.insert(
            "m1".into(),
            vec![
                json!({"id": 100, "name": "first", "create_date": "2024-01-01"}),
                json!({"id": 101, "name": "second", "create_date": "2024-01-02"}),
            ],
        );
        fake
    }

    pub fn calls(&self) -> usize {
        self.execute_calls.load(Ordering::SeqCst)
    }

    pub fn logins(&self) -> usize {
        self.login_calls.load(Ordering::SeqCst)
    }

    fn fault(message: &str) -> OdooError {
        OdooError::Fault {
            code: Some(1),
            message: message.to_string(),
        }
    }

    /// Names requested through `("model", "=", name)` conditions; an
    /// empty list means "no filter".
    fn requested_names(domain: &Value) -> Vec<String> {
        domain
            .as_array()
            .map(|terms| {
                terms
                    .iter()
                    .filter_map(|term| {
                        let triple = term.as_array()?;
                        if triple.len() == 3 && triple[0] == "model" && triple[1] == "=" {
                            triple[2].as_str().map(str::to_string)
                        } else {
                            None
                        }
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    fn id_condition(domain: &Value, field: &str) -> Option<i64> {
        domain.as_array()?.iter().find_map(|term| {
            let triple = term.as_array()?;
            if triple.len() == 3 && triple[0] == field && triple[1] == "=" {
                triple[2].as_i64()
            } else {
                None
            }
        })
    }
}

#[async_trait]
impl OdooTransport for FakeOdoo {
    async fn login(&self, _config: &OdooConfig) -> Result<i64, OdooError> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_all {
            return Err(Self::fault("login refused"));
        }
        Ok(1)
    }

    async fn execute(
        &self,
        _config: &OdooConfig,
        _uid: i64,
        model: &str,
        operation: &str,
        params: Value,
        options: Value,
    ) -> Result<Value, OdooError> {
        self.execute_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_all {
            return Err(Self::fault("remote down"));
        }

        let domain = params.get(0).cloned().unwrap_or(Value::Null);
        match (model, operation) {
            ("ir.model", "search_read") => {
                let names = Self::requested_names(&domain);
                let rows: Vec<Value> = self
                    .models
                    .iter()
                    .filter(|row| {
                        names.is_empty()
                            || names
                                .iter()
                                .any(|n| row.get("model").and_then(Value::as_str) == Some(n))
                    })
                    .cloned()
                    .collect();
                Ok(Value::Array(rows))
            }
            ("ir.model.fields", "search_read") => {
                let model_id = Self::id_condition(&domain, "model_id")
                    .ok_or_else(|| Self::fault("missing model_id condition"))?;
                if self.fail_fields_for == Some(model_id) {
                    return Err(Self::fault("field fetch refused"));
                }
                Ok(Value::Array(
                    self.fields.get(&model_id).cloned().unwrap_or_default(),
                ))
            }
            (name, "search_read") => {
                let mut rows = self.records.get(name).cloned().unwrap_or_default();
                if let Some(row_id) = Self::id_condition(&domain, "id") {
                    rows.retain(|row| row.get("id").and_then(Value::as_i64) == Some(row_id));
                }
                if let Some(limit) = options.get("limit").and_then(Value::as_u64) {
                    rows.truncate(limit as usize);
                }
                Ok(Value::Array(rows))
            }
            (_, "unlink") => Ok(json!(true)),
            (model, operation) => Err(Self::fault(&format!(
                "unsupported call {model}.{operation}"
            ))),
        }
    }
}

pub fn client_with(fake: Arc<FakeOdoo>) -> OdooClient {
    OdooClient::new(fake, test_config())
}
