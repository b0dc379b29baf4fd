//! Core domain types for the Gazette amendment graph.
//!
//! A `Gazette` is the node stored in Neo4j. Every query returns rows as raw
//! `Record`s; the typed projections below mirror the aliases each query
//! returns and can be recovered with [`decode_records`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// One result row: output alias → value.
pub type Record = serde_json::Map<String, serde_json::Value>;

// ── Graph Node ────────────────────────────────────────────────────

/// A published gazette as stored on a `:Gazette` node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Gazette {
    pub gazette_id: String,
    pub date: String,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Gazette {
    pub fn new(
        gazette_id: impl Into<String>,
        date: impl Into<String>,
        name: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            gazette_id: gazette_id.into(),
            date: date.into(),
            name: name.into(),
            url: url.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

// ── Row Projections ───────────────────────────────────────────────

/// Row of the timeline query: `{id, date, name, url}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimelineRecord {
    pub id: String,
    pub date: String,
    pub name: Option<String>,
    pub url: Option<String>,
}

/// Row of the parents query. Same projection as the timeline.
pub type ParentRecord = TimelineRecord;

impl From<&Gazette> for TimelineRecord {
    fn from(g: &Gazette) -> Self {
        Self {
            id: g.gazette_id.clone(),
            date: g.date.clone(),
            name: Some(g.name.clone()),
            url: Some(g.url.clone()),
        }
    }
}

/// Row of the graph query: one `AMENDS` edge, child → parent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GraphEdgeRecord {
    pub child_id: String,
    pub parent_id: String,
    pub child_date: String,
    pub parent_date: String,
    pub child_url: Option<String>,
    pub parent_url: Option<String>,
}

impl GraphEdgeRecord {
    pub fn between(child: &Gazette, parent: &Gazette) -> Self {
        Self {
            child_id: child.gazette_id.clone(),
            parent_id: parent.gazette_id.clone(),
            child_date: child.date.clone(),
            parent_date: parent.date.clone(),
            child_url: Some(child.url.clone()),
            parent_url: Some(parent.url.clone()),
        }
    }
}

/// Node properties as carried inside an amendment tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GazetteNode {
    pub gazette_id: String,
    pub date: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
}

impl From<&Gazette> for GazetteNode {
    fn from(g: &Gazette) -> Self {
        Self {
            gazette_id: g.gazette_id.clone(),
            date: g.date.clone(),
            name: Some(g.name.clone()),
            description: g.description.clone(),
            url: Some(g.url.clone()),
        }
    }
}

/// Row of the amendment tree query: a parent gazette and every gazette amending it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AmendmentTree {
    #[serde(flatten)]
    pub parent: GazetteNode,
    pub children: Vec<GazetteNode>,
}

/// Row of the dates query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRecord {
    pub date: String,
}

// ── Conversions ───────────────────────────────────────────────────

/// Serialize a projection into a raw record.
///
/// Fails if `value` does not serialize to a JSON object.
pub fn to_record<T: Serialize>(value: &T) -> Result<Record, serde_json::Error> {
    match serde_json::to_value(value)? {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(serde::ser::Error::custom(format!(
            "expected an object row, got {other}"
        ))),
    }
}

/// Decode raw records into a typed projection, preserving order.
pub fn decode_records<T: DeserializeOwned>(records: Vec<Record>) -> Result<Vec<T>, serde_json::Error> {
    records
        .into_iter()
        .map(|r| serde_json::from_value(serde_json::Value::Object(r)))
        .collect()
}
