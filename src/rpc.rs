//! JSON-RPC transport to the Odoo server.
//!
//! `OdooTransport` is the sole wire boundary; everything above it talks
//! to the trait so tests can substitute an in-memory server.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use url::Url;

use crate::config::OdooConfig;
use crate::error::{OdooError, Result};

#[async_trait]
pub trait OdooTransport: Send + Sync {
    /// Authenticate against the `common` service, returning the numeric
    /// user id.
    async fn login(&self, config: &OdooConfig) -> Result<i64>;

    /// Invoke `execute_kw` on the `object` service for
    /// `model.operation` with positional `params` and keyword `options`.
    async fn execute(
        &self,
        config: &OdooConfig,
        uid: i64,
        model: &str,
        operation: &str,
        params: Value,
        options: Value,
    ) -> Result<Value>;
}

/// Production transport speaking Odoo's `/jsonrpc` endpoint.
pub struct JsonRpcTransport {
    client: reqwest::Client,
    endpoint: Url,
    next_id: AtomicU64,
}

impl JsonRpcTransport {
    pub fn new(server: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        let endpoint = Url::parse(server)?.join("jsonrpc")?;
        Ok(Self {
            client,
            endpoint,
            next_id: AtomicU64::new(1),
        })
    }

    /// One `service.method(args)` round trip through the JSON-RPC
    /// envelope. A fault comes back in the `error` member and never as
    /// an HTTP error status.
    async fn call(&self, service: &str, method: &str, args: Value) -> Result<Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({
            "jsonrpc": "2.0",
            "method": "call",
            "params": { "service": service, "method": method, "args": args },
            "id": id,
        });

        let response: Value = self
            .client
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(fault) = response.get("error") {
            let message = fault
                .get("data")
                .and_then(|d| d.get("message"))
                .or_else(|| fault.get("message"))
                .and_then(Value::as_str)
                .unwrap_or("unknown remote fault")
                .to_string();
            let code = fault.get("code").and_then(Value::as_i64);
            return Err(OdooError::Fault { code, message });
        }

        response
            .get("result")
            .cloned()
            .ok_or_else(|| OdooError::UnexpectedShape("missing result member".into()))
    }
}

#[async_trait]
impl OdooTransport for JsonRpcTransport {
    async fn login(&self, config: &OdooConfig) -> Result<i64> {
        let args = json!([config.database, config.username, config.password]);
        let result = self.call("common", "login", args).await?;
        // Odoo answers `false` for bad credentials rather than a fault.
        match result.as_i64() {
            Some(uid) if uid > 0 => Ok(uid),
            _ => Err(OdooError::AuthFailed {
                database: config.database.clone(),
                username: config.username.clone(),
            }),
        }
    }

    async fn execute(
        &self,
        config: &OdooConfig,
        uid: i64,
        model: &str,
        operation: &str,
        params: Value,
        options: Value,
    ) -> Result<Value> {
        let args = json!([
            config.database,
            uid,
            config.password,
            model,
            operation,
            params,
            options,
        ]);
        self.call("object", "execute_kw", args).await
    }
}
