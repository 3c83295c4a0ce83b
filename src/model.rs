//! Typed views over the records Odoo returns.
//!
//! `search_read` rows arrive as JSON objects with every unset value
//! encoded as boolean `false`, so string fields deserialize through
//! [`false_as_none`].

use serde::{Deserialize, Deserializer, Serialize};

/// A remote `ir.model` row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: i64,
    /// Technical model name, unique within the remote system.
    pub model: String,
    #[serde(default, deserialize_with = "false_as_none")]
    pub name: Option<String>,
}

/// A remote `ir.model.fields` row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldInfo {
    pub id: i64,
    pub name: String,
    /// Technical name of the owning model.
    #[serde(default, deserialize_with = "false_as_none")]
    pub model: Option<String>,
    #[serde(default, deserialize_with = "false_as_none")]
    pub ttype: Option<String>,
    /// Target model name; present only for reference-typed fields. A
    /// populated value denotes a directed edge `model -> relation`.
    #[serde(default, deserialize_with = "false_as_none")]
    pub relation: Option<String>,
}

impl FieldInfo {
    /// Whether this field points at one of the given model names.
    /// Self-references count: a model may relate to itself.
    pub fn relates_within<S: AsRef<str>>(&self, names: &[S]) -> bool {
        match &self.relation {
            Some(target) => names.iter().any(|n| n.as_ref() == target),
            None => false,
        }
    }
}

/// Accept a string, Odoo's `false` placeholder, or nothing at all.
/// Empty strings collapse to `None` as well.
pub fn false_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrFalse {
        Text(String),
        Absent(bool),
    }

    Ok(match Option::<StringOrFalse>::deserialize(deserializer)? {
        Some(StringOrFalse::Text(s)) if !s.is_empty() => Some(s),
        _ => None,
    })
}
