//! In-process executor that evaluates the gazette queries over a small
//! node/edge list.
//!
//! Results follow the Cypher semantics of [`crate::queries`]: the same
//! projections, the same `DISTINCT`/`UNION` deduplication, and the same
//! classification of relationship-free gazettes as parents. Only `AMENDS`
//! edges are modelled, so "no relationship of any kind" means no `AMENDS`
//! edge in either direction.

use std::collections::BTreeSet;

use async_trait::async_trait;
use gazette_core::types::to_record;
use gazette_core::{
    AmendmentTree, DateRecord, Gazette, GazetteError, GazetteNode, GraphEdgeRecord, Record,
    TimelineRecord,
};

use crate::executor::QueryExecutor;
use crate::queries::GazetteQuery;

#[derive(Debug, Clone, Default)]
pub struct MemoryGraph {
    gazettes: Vec<Gazette>,
    /// `(child_id, parent_id)` pairs, insertion order.
    amends: Vec<(String, String)>,
}

impl MemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_gazette(mut self, gazette: Gazette) -> Self {
        self.gazettes.push(gazette);
        self
    }

    /// Record that `child_id` amends `parent_id`.
    pub fn with_amends(mut self, child_id: impl Into<String>, parent_id: impl Into<String>) -> Self {
        self.amends.push((child_id.into(), parent_id.into()));
        self
    }

    pub fn gazette_count(&self) -> usize {
        self.gazettes.len()
    }

    fn find(&self, gazette_id: &str) -> Option<&Gazette> {
        self.gazettes.iter().find(|g| g.gazette_id == gazette_id)
    }

    /// Edges whose endpoints both exist, as (child, parent).
    fn matched_edges(&self) -> impl Iterator<Item = (&Gazette, &Gazette)> + '_ {
        self.amends
            .iter()
            .filter_map(|(c, p)| Some((self.find(c)?, self.find(p)?)))
    }

    fn timeline(&self) -> Result<Vec<Record>, GazetteError> {
        let mut ordered: Vec<&Gazette> = self.gazettes.iter().collect();
        ordered.sort_by(|a, b| a.date.cmp(&b.date));
        ordered
            .into_iter()
            .map(|g| to_record(&TimelineRecord::from(g)))
            .collect::<Result<_, _>>()
            .map_err(GazetteError::from)
    }

    fn graph(&self) -> Result<Vec<Record>, GazetteError> {
        self.matched_edges()
            .map(|(child, parent)| to_record(&GraphEdgeRecord::between(child, parent)))
            .collect::<Result<_, _>>()
            .map_err(GazetteError::from)
    }

    fn parents(&self) -> Result<Vec<Record>, GazetteError> {
        let mut connected = BTreeSet::new();
        for (child, parent) in self.matched_edges() {
            connected.insert(child.gazette_id.as_str());
            connected.insert(parent.gazette_id.as_str());
        }

        let isolated = self
            .gazettes
            .iter()
            .filter(|g| !connected.contains(g.gazette_id.as_str()));
        let amended = self.matched_edges().map(|(_, parent)| parent);

        // UNION removes duplicates across both branches.
        let mut rows: Vec<Record> = Vec::new();
        for g in isolated.chain(amended) {
            let row = to_record(&TimelineRecord::from(g))?;
            if !rows.contains(&row) {
                rows.push(row);
            }
        }
        Ok(rows)
    }

    fn amendment_tree(&self, date: &str) -> Result<Vec<Record>, GazetteError> {
        let mut trees: Vec<AmendmentTree> = Vec::new();
        for (child, parent) in self.matched_edges().filter(|(_, p)| p.date == date) {
            let parent_node = GazetteNode::from(parent);
            let child_node = GazetteNode::from(child);
            match trees.iter_mut().find(|t| t.parent == parent_node) {
                Some(tree) => tree.children.push(child_node),
                None => trees.push(AmendmentTree {
                    parent: parent_node,
                    children: vec![child_node],
                }),
            }
        }
        trees
            .iter()
            .map(to_record)
            .collect::<Result<_, _>>()
            .map_err(GazetteError::from)
    }

    fn dates(&self) -> Result<Vec<Record>, GazetteError> {
        let distinct: BTreeSet<&str> = self.gazettes.iter().map(|g| g.date.as_str()).collect();
        distinct
            .into_iter()
            .map(|d| {
                to_record(&DateRecord {
                    date: d.to_string(),
                })
            })
            .collect::<Result<_, _>>()
            .map_err(GazetteError::from)
    }
}

#[async_trait]
impl QueryExecutor for MemoryGraph {
    type Error = GazetteError;

    async fn execute_query(&self, query: &GazetteQuery) -> Result<Vec<Record>, GazetteError> {
        let records = match query {
            GazetteQuery::Timeline => self.timeline(),
            GazetteQuery::Graph => self.graph(),
            GazetteQuery::Parents => self.parents(),
            GazetteQuery::AmendmentTree { date } => self.amendment_tree(date),
            GazetteQuery::Dates => self.dates(),
        }?;
        tracing::debug!(query = query.name(), rows = records.len(), "Evaluated gazette query in memory");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gazette(id: &str, date: &str) -> Gazette {
        Gazette::new(id, date, format!("Gazette {id}"), format!("http://gazettes.test/{id}.pdf"))
    }

    fn ids(records: &[Record], key: &str) -> Vec<String> {
        records
            .iter()
            .map(|r| r[key].as_str().unwrap_or_default().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_timeline_sorted_by_date() {
        let graph = MemoryGraph::new()
            .with_gazette(gazette("late", "2023-03-01"))
            .with_gazette(gazette("early", "2021-01-01"))
            .with_gazette(gazette("mid", "2022-06-15"));

        let rows = graph.execute_query(&GazetteQuery::Timeline).await.unwrap();
        assert_eq!(ids(&rows, "id"), vec!["early", "mid", "late"]);
        assert_eq!(rows[0]["url"], "http://gazettes.test/early.pdf");
        assert_eq!(rows[0].len(), 4);
    }

    #[tokio::test]
    async fn test_graph_one_row_per_edge() {
        let graph = MemoryGraph::new()
            .with_gazette(gazette("p", "2020-01-01"))
            .with_gazette(gazette("c1", "2020-02-01"))
            .with_gazette(gazette("c2", "2020-03-01"))
            .with_amends("c1", "p")
            .with_amends("c2", "p")
            .with_amends("c1", "p");

        let rows = graph.execute_query(&GazetteQuery::Graph).await.unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(ids(&rows, "child_id"), vec!["c1", "c2", "c1"]);
        assert_eq!(rows[1]["parent_date"], "2020-01-01");
    }

    #[tokio::test]
    async fn test_parents_include_isolated_and_exclude_children() {
        let graph = MemoryGraph::new()
            .with_gazette(gazette("A", "2020-01-01"))
            .with_gazette(gazette("B", "2020-02-01"))
            .with_gazette(gazette("C", "2020-03-01"))
            .with_amends("B", "C");

        let rows = graph.execute_query(&GazetteQuery::Parents).await.unwrap();
        let found = ids(&rows, "id");
        assert_eq!(found.len(), 2);
        assert!(found.contains(&"A".to_string()));
        assert!(found.contains(&"C".to_string()));
        assert!(!found.contains(&"B".to_string()));
    }

    #[tokio::test]
    async fn test_parent_of_two_children_listed_once() {
        let graph = MemoryGraph::new()
            .with_gazette(gazette("P", "2020-01-01"))
            .with_gazette(gazette("X", "2020-02-01"))
            .with_gazette(gazette("Y", "2020-03-01"))
            .with_amends("X", "P")
            .with_amends("Y", "P");

        let rows = graph.execute_query(&GazetteQuery::Parents).await.unwrap();
        assert_eq!(ids(&rows, "id"), vec!["P"]);
    }

    #[tokio::test]
    async fn test_dangling_edge_not_matched() {
        let graph = MemoryGraph::new()
            .with_gazette(gazette("A", "2020-01-01"))
            .with_amends("A", "missing");

        assert!(graph.execute_query(&GazetteQuery::Graph).await.unwrap().is_empty());
        let parents = graph.execute_query(&GazetteQuery::Parents).await.unwrap();
        assert_eq!(ids(&parents, "id"), vec!["A"]);
    }

    #[tokio::test]
    async fn test_amendment_tree_groups_children_per_parent() {
        let graph = MemoryGraph::new()
            .with_gazette(gazette("P1", "2022-07-22").with_description("Ministries"))
            .with_gazette(gazette("P2", "2022-07-22"))
            .with_gazette(gazette("P3", "2022-08-01"))
            .with_gazette(gazette("c1", "2022-09-01"))
            .with_gazette(gazette("c2", "2022-09-02"))
            .with_gazette(gazette("c3", "2022-09-03"))
            .with_amends("c1", "P1")
            .with_amends("c2", "P1")
            .with_amends("c3", "P2")
            .with_amends("c3", "P3");

        let query = GazetteQuery::AmendmentTree {
            date: "2022-07-22".to_string(),
        };
        let rows = graph.execute_query(&query).await.unwrap();
        let trees: Vec<AmendmentTree> = gazette_core::decode_records(rows).unwrap();

        assert_eq!(trees.len(), 2);
        assert_eq!(trees[0].parent.gazette_id, "P1");
        assert_eq!(trees[0].parent.description.as_deref(), Some("Ministries"));
        let children: Vec<&str> = trees[0].children.iter().map(|c| c.gazette_id.as_str()).collect();
        assert_eq!(children, vec!["c1", "c2"]);
        assert_eq!(trees[1].parent.gazette_id, "P2");
        assert_eq!(trees[1].children.len(), 1);
    }

    #[tokio::test]
    async fn test_amendment_tree_unknown_date_is_empty() {
        let graph = MemoryGraph::new()
            .with_gazette(gazette("P", "2022-07-22"))
            .with_gazette(gazette("c", "2022-08-01"))
            .with_amends("c", "P");

        let query = GazetteQuery::AmendmentTree {
            date: "1999-01-01".to_string(),
        };
        assert!(graph.execute_query(&query).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_dates_distinct_ascending() {
        let graph = MemoryGraph::new()
            .with_gazette(gazette("a", "2022-07-22"))
            .with_gazette(gazette("b", "2021-01-01"))
            .with_gazette(gazette("c", "2022-07-22"));

        let rows = graph.execute_query(&GazetteQuery::Dates).await.unwrap();
        assert_eq!(ids(&rows, "date"), vec!["2021-01-01", "2022-07-22"]);
    }
}
