//! Page handlers.
//!
//! Each handler is a thin mapping from request parameters to a
//! (data, template) pair. Remote faults degrade to empty lists and
//! tables with a warning; the one exception is the detail view, which
//! cannot render without its model and record, so it answers 404 when
//! a successful call finds neither and 502 when the remote is
//! unreachable. The two cases are never conflated.

use axum::{
    extract::{Form, Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{debug, warn};

use crate::domain::condition;
use crate::error::OdooError;
use crate::facade::QueryOptions;
use crate::graph::{self, ModelGraph};
use crate::model::ModelInfo;

use super::state::AppState;

/// Columns shown in the paginated record meta list.
const RECORD_META_COLUMNS: [&str; 5] =
    ["name", "create_uid", "create_date", "write_uid", "write_date"];
const RECORD_META_LIMIT: u32 = 10;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/model/:name", get(view_model))
        .route("/list/", get(list_models))
        .route("/fields/:id", get(list_fields))
        .route("/data/:name", get(view_data))
        .route("/detail/:name/:id", get(view_details))
        .route("/delete/:name/:id", get(delete_row))
        .route("/plantuml", post(view_plantuml))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Handler-level failure. `NotFound` is reserved for successful remote
/// calls that came back empty; a failed call is `Upstream`.
pub enum AppError {
    NotFound(String),
    Upstream(OdooError),
    Render(handlebars::RenderError),
}

impl From<OdooError> for AppError {
    fn from(err: OdooError) -> Self {
        Self::Upstream(err)
    }
}

impl From<handlebars::RenderError> for AppError {
    fn from(err: handlebars::RenderError) -> Self {
        Self::Render(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound(what) => (StatusCode::NOT_FOUND, what).into_response(),
            Self::Upstream(err) => {
                warn!(error = %err, "remote call failed");
                (StatusCode::BAD_GATEWAY, "remote server unavailable").into_response()
            }
            Self::Render(err) => {
                warn!(error = %err, "template rendering failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "rendering failed").into_response()
            }
        }
    }
}

/// Degrade a failed remote call to an empty row set.
fn rows_or_empty<T>(result: Result<Vec<T>, OdooError>, what: &str) -> Vec<T> {
    match result {
        Ok(rows) => rows,
        Err(err) => {
            warn!(error = %err, "{} failed, rendering empty view", what);
            Vec::new()
        }
    }
}

/// Landing page with the connection config.
async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let html = state
        .pages
        .render("main", &json!({ "config": state.display }))?;
    Ok(Html(html))
}

/// All models, with the checkbox form feeding the diagram endpoint.
async fn list_models(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let models: Vec<ModelInfo> = rows_or_empty(
        state
            .client
            .search_read("ir.model", &[], &QueryOptions::none())
            .await,
        "model list",
    );
    let length = models.len();
    let html = state
        .pages
        .render("model_list", &json!({ "models": models, "length": length }))?;
    Ok(Html(html))
}

/// Meta info about the first records of one model.
async fn view_model(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Html<String>, AppError> {
    let options = QueryOptions::with_fields(RECORD_META_COLUMNS).limit(RECORD_META_LIMIT);
    let records: Vec<Value> = rows_or_empty(
        state.client.search_read(&name, &[], &options).await,
        "record meta list",
    );
    let length = records.len();
    let html = state.pages.render(
        "data_list",
        &json!({ "records": records, "model_name": name, "length": length }),
    )?;
    Ok(Html(html))
}

/// All fields of the model with the given id.
async fn list_fields(
    State(state): State<AppState>,
    Path(model_id): Path<i64>,
) -> Result<Html<String>, AppError> {
    let fields = rows_or_empty(
        graph::fields_of(&state.client, model_id).await,
        "field list",
    );
    let length = fields.len();
    let html = state
        .pages
        .render("field_list", &json!({ "fields": fields, "length": length }))?;
    Ok(Html(html))
}

/// The full, unpaginated record list of one model.
async fn view_data(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Html<String>, AppError> {
    let records: Vec<Value> = rows_or_empty(
        state
            .client
            .search_read(&name, &[], &QueryOptions::none())
            .await,
        "record list",
    );
    let length = records.len();
    let html = state.pages.render(
        "all_data_list",
        &json!({ "records": records, "model_name": name, "length": length }),
    )?;
    Ok(Html(html))
}

/// One record, plus its model's fields and resolved relations.
///
/// 404 means the remote answered and the model or record is not there;
/// a remote fault is 502 so an unreachable server never masquerades as
/// a missing row.
async fn view_details(
    State(state): State<AppState>,
    Path((name, row_id)): Path<(String, i64)>,
) -> Result<Html<String>, AppError> {
    let names = [name.clone()];
    let graph = graph::resolve(&state.client, &names).await?;
    let entry = graph
        .models
        .first()
        .ok_or_else(|| AppError::NotFound(format!("no such model: {name}")))?;

    let domain = [condition("id", "=", row_id)];
    let records: Vec<Value> = state
        .client
        .search_read(&name, &domain, &QueryOptions::none())
        .await?;
    let record = records
        .first()
        .ok_or_else(|| AppError::NotFound(format!("no record {row_id} in {name}")))?;

    let html = state.pages.render(
        "detail",
        &json!({
            "record": record,
            "model": &entry.model,
            "fields": &entry.fields,
            "relations": &graph.relations,
        }),
    )?;
    Ok(Html(html))
}

/// Delete one record, then bounce back to the model's record list.
async fn delete_row(
    State(state): State<AppState>,
    Path((name, row_id)): Path<(String, i64)>,
) -> Redirect {
    match state.client.unlink(&name, &[row_id]).await {
        Ok(result) => debug!(model = %name, row_id, ?result, "unlink"),
        Err(err) => warn!(error = %err, model = %name, row_id, "unlink failed"),
    }
    Redirect::to(&format!("/model/{name}"))
}

/// PlantUML description of the checked models and their relations.
///
/// The form body is `model_name=on` pairs; keys whose value is the
/// literal `"on"` become the requested name set, in body order.
async fn view_plantuml(
    State(state): State<AppState>,
    Form(form): Form<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let names: Vec<String> = form
        .into_iter()
        .filter(|(_, value)| value == "on")
        .map(|(key, _)| key)
        .collect();

    let graph = match graph::resolve(&state.client, &names).await {
        Ok(graph) => graph,
        Err(err) => {
            warn!(error = %err, "diagram resolution failed, rendering empty diagram");
            ModelGraph::default()
        }
    };

    let text = state.pages.render("plantuml", &graph)?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        text,
    )
        .into_response())
}
