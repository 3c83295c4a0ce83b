//! odoo-browser — a thin web front-end over a remote Odoo server.
//!
//! The server owns all state; this crate is a read-mostly façade that
//! queries Odoo over JSON-RPC, caches results briefly, and renders HTML
//! views of the data model (models, fields, records, relationships) plus
//! a PlantUML description of selected models and their relations.

pub mod cache;
pub mod config;
pub mod domain;
pub mod error;
pub mod facade;
pub mod graph;
pub mod http;
pub mod model;
pub mod render;
pub mod rpc;

pub use cache::QueryCache;
pub use config::{AppConfig, OdooConfig};
pub use error::{OdooError, Result};
pub use facade::{OdooClient, QueryOptions};
pub use graph::{resolve, ModelGraph, ModelWithFields};
pub use model::{FieldInfo, ModelInfo};
pub use rpc::{JsonRpcTransport, OdooTransport};
