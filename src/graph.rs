//! Model relationship resolution.
//!
//! Given a set of model names, fetch each model and its fields, then
//! keep every field whose `relation` points back into the requested
//! set. The result feeds both the detail view and the PlantUML diagram.

use serde::Serialize;
use tracing::warn;

use crate::domain::{self, condition};
use crate::error::Result;
use crate::facade::{OdooClient, QueryOptions};
use crate::model::{FieldInfo, ModelInfo};

#[derive(Debug, Clone, Serialize)]
pub struct ModelWithFields {
    pub model: ModelInfo,
    pub fields: Vec<FieldInfo>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ModelGraph {
    /// `(model, fields)` pairs in the order the server returned the
    /// models. No local re-sorting.
    pub models: Vec<ModelWithFields>,
    /// Fields whose `relation` names a model in the requested set.
    /// Self-relations are included.
    pub relations: Vec<FieldInfo>,
}

/// Columns the views and the diagram need from `ir.model.fields`.
const FIELD_COLUMNS: [&str; 4] = ["name", "model", "ttype", "relation"];

/// Fields of one model, by its `ir.model` id.
pub async fn fields_of(client: &OdooClient, model_id: i64) -> Result<Vec<FieldInfo>> {
    let domain = [condition("model_id", "=", model_id)];
    client
        .search_read(
            "ir.model.fields",
            &domain,
            &QueryOptions::with_fields(FIELD_COLUMNS),
        )
        .await
}

/// Resolve the requested models and the relations among them.
///
/// Fetching the model list is one remote call; fetching fields fans out
/// to one call per returned model, sequentially, each independently
/// cacheable. A failed field fetch degrades to zero fields for that
/// model rather than failing the whole resolution.
pub async fn resolve<S: AsRef<str>>(client: &OdooClient, names: &[S]) -> Result<ModelGraph> {
    let domain = domain::models_by_name(names);
    let models: Vec<ModelInfo> = client
        .search_read("ir.model", &domain, &QueryOptions::none())
        .await?;

    let mut graph = ModelGraph::default();
    for info in models {
        let fields = match fields_of(client, info.id).await {
            Ok(fields) => fields,
            Err(err) => {
                warn!(model = %info.model, error = %err, "field fetch failed, treating as empty");
                Vec::new()
            }
        };
        for field in &fields {
            if field.relates_within(names) {
                graph.relations.push(field.clone());
            }
        }
        graph.models.push(ModelWithFields {
            model: info,
            fields,
        });
    }
    Ok(graph)
}
