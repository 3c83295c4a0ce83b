//! Cached query façade over the Odoo transport.
//!
//! One `OdooClient` is shared by every request handler. It owns the
//! session, the query cache, and the connection config; successful
//! results are cached for five minutes keyed by the exact call
//! signature. Faults are never cached.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tokio::sync::Mutex;
use tracing::debug;

use crate::cache::QueryCache;
use crate::config::OdooConfig;
use crate::domain::DomainTerm;
use crate::error::Result;
use crate::rpc::OdooTransport;

/// How long a successful query result stays servable from the cache.
const RESULT_TTL: Duration = Duration::from_secs(5 * 60);

/// Keyword options for `search_read`. Named fields instead of an
/// open-ended mapping; unset fields are omitted from the wire object.
#[derive(Debug, Clone, Default, Serialize)]
pub struct QueryOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

impl QueryOptions {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_fields<S: Into<String>>(fields: impl IntoIterator<Item = S>) -> Self {
        Self {
            fields: Some(fields.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

pub struct OdooClient {
    transport: Arc<dyn OdooTransport>,
    cache: QueryCache,
    config: OdooConfig,
    /// Numeric uid from the first successful login, reused afterwards.
    session: Mutex<Option<i64>>,
}

impl OdooClient {
    pub fn new(transport: Arc<dyn OdooTransport>, config: OdooConfig) -> Self {
        Self::with_cache(transport, config, QueryCache::default())
    }

    pub fn with_cache(
        transport: Arc<dyn OdooTransport>,
        config: OdooConfig,
        cache: QueryCache,
    ) -> Self {
        Self {
            transport,
            cache,
            config,
            session: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &OdooConfig {
        &self.config
    }

    async fn uid(&self) -> Result<i64> {
        let mut session = self.session.lock().await;
        if let Some(uid) = *session {
            return Ok(uid);
        }
        let uid = self.transport.login(&self.config).await?;
        *session = Some(uid);
        Ok(uid)
    }

    /// Generic remote invocation with read-through caching.
    pub async fn execute(
        &self,
        model: &str,
        operation: &str,
        params: Value,
        options: &QueryOptions,
    ) -> Result<Value> {
        let options_wire = serde_json::to_value(options)?;
        let key = format!("{model}-{operation}-{params}-{options_wire}");

        if let Some(hit) = self.cache.get(&key) {
            debug!(%key, "returning cached results");
            return Ok(hit);
        }
        debug!(%key, "no cached results");

        let uid = self.uid().await?;
        let result = self
            .transport
            .execute(&self.config, uid, model, operation, params, options_wire)
            .await?;
        self.cache.insert_with_ttl(&key, result.clone(), RESULT_TTL);
        Ok(result)
    }

    /// Query rows of `model` matching `domain`, decoded into `T`.
    pub async fn search_read<T: DeserializeOwned>(
        &self,
        model: &str,
        domain: &[DomainTerm],
        options: &QueryOptions,
    ) -> Result<Vec<T>> {
        let params = json!([domain]);
        let result = self.execute(model, "search_read", params, options).await?;
        Ok(serde_json::from_value(result)?)
    }

    /// Pass-through delete by identifier list. Cached reads are NOT
    /// invalidated; stale rows can be observed until expiry.
    pub async fn unlink(&self, model: &str, ids: &[i64]) -> Result<Value> {
        self.execute(model, "unlink", json!([ids]), &QueryOptions::none())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_wire_omits_unset_fields() {
        let wire = serde_json::to_value(QueryOptions::none()).unwrap();
        assert_eq!(wire, json!({}));
    }

    #[test]
    fn options_wire_keeps_declaration_order() {
        let options = QueryOptions::with_fields(["name", "create_date"]).limit(10);
        let wire = serde_json::to_string(&options).unwrap();
        assert_eq!(wire, r#"{"fields":["name","create_date"],"limit":10}"#);
    }
}
