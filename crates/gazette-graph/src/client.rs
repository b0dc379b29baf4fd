//! Neo4j connection management and the bolt-backed query executor.

use async_trait::async_trait;
use gazette_core::config::Neo4jSettings;
use gazette_core::Record;
use neo4rs::{ConfigBuilder, Graph, Query};

use crate::executor::QueryExecutor;
use crate::queries::GazetteQuery;

/// Errors from graph operations.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("Neo4j connection error: {0}")]
    Connection(String),

    #[error("Neo4j query error: {0}")]
    Query(#[from] neo4rs::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Configuration for connecting to Neo4j.
#[derive(Debug, Clone)]
pub struct GraphConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
    pub max_connections: u32,
    pub fetch_size: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Neo4jSettings::default().into()
    }
}

impl From<Neo4jSettings> for GraphConfig {
    fn from(s: Neo4jSettings) -> Self {
        Self {
            uri: s.uri,
            user: s.user,
            password: s.password,
            max_connections: s.max_connections,
            fetch_size: s.fetch_size,
        }
    }
}

/// Thread-safe Neo4j graph client with connection pooling.
///
/// Clone is cheap (inner Arc).
#[derive(Clone)]
pub struct GraphClient {
    graph: Graph,
}

impl GraphClient {
    /// Connect to Neo4j with the given configuration.
    pub async fn connect(config: &GraphConfig) -> Result<Self, GraphError> {
        let neo_config = ConfigBuilder::default()
            .uri(&config.uri)
            .user(&config.user)
            .password(&config.password)
            .max_connections(config.max_connections as usize)
            .fetch_size(config.fetch_size)
            .build()
            .map_err(|e| GraphError::Connection(e.to_string()))?;

        let graph = Graph::connect(neo_config)
            .await
            .map_err(|e| GraphError::Connection(e.to_string()))?;

        tracing::info!(uri = %config.uri, "Connected to Neo4j");
        Ok(Self { graph })
    }

    /// Get a reference to the underlying neo4rs Graph for direct operations.
    pub fn inner(&self) -> &Graph {
        &self.graph
    }

    /// Execute a read query and collect all rows.
    pub async fn query_rows(&self, query: Query) -> Result<Vec<neo4rs::Row>, GraphError> {
        let mut stream = self.graph.execute(query).await?;
        let mut rows = Vec::new();
        while let Some(row) = stream.next().await? {
            rows.push(row);
        }
        Ok(rows)
    }
}

#[async_trait]
impl QueryExecutor for GraphClient {
    type Error = GraphError;

    async fn execute_query(&self, query: &GazetteQuery) -> Result<Vec<Record>, GraphError> {
        let rows = self.query_rows(query.to_query()).await?;
        tracing::debug!(query = query.name(), rows = rows.len(), "Executed gazette query");

        let columns = query.columns();
        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            records.push(row_to_record(&row, columns)?);
        }
        Ok(records)
    }
}

/// Pull each aliased column out of a row as JSON. Null properties stay null.
fn row_to_record(row: &neo4rs::Row, columns: &[&str]) -> Result<Record, GraphError> {
    let mut record = Record::new();
    for &column in columns {
        let value: serde_json::Value = row.get(column).map_err(|e| {
            GraphError::Serialization(format!("Failed to read column {column}: {e}"))
        })?;
        record.insert(column.to_string(), value);
    }
    Ok(record)
}
