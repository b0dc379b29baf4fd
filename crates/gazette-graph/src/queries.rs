//! The fixed Cypher queries behind every gazette read.
//!
//! Query text is part of the observable contract: the parents query in
//! particular counts a gazette with no relationships at all as a parent.

use neo4rs::query;

pub const TIMELINE_CYPHER: &str = "
MATCH (g:Gazette)
RETURN g.gazette_id AS id,
       g.date AS date,
       g.name AS name,
       g.url AS url
ORDER BY g.date
";

pub const GRAPH_CYPHER: &str = "
MATCH (child:Gazette)-[r:AMENDS]->(parent:Gazette)
RETURN child.gazette_id AS child_id,
       parent.gazette_id AS parent_id,
       child.date AS child_date,
       parent.date AS parent_date,
       child.url AS child_url,
       parent.url AS parent_url
";

pub const PARENTS_CYPHER: &str = "
MATCH (node:Gazette)
WHERE NOT (node)--()
RETURN DISTINCT node.gazette_id AS id,
       node.date AS date,
       node.name AS name,
       node.url AS url
UNION
MATCH (child:Gazette)-[:AMENDS]->(parent:Gazette)
RETURN DISTINCT parent.gazette_id AS id,
       parent.date AS date,
       parent.name AS name,
       parent.url AS url
";

pub const AMENDMENT_TREE_CYPHER: &str = "
MATCH (c:Gazette)-[r:AMENDS]->(p:Gazette)
WHERE p.date = $date
RETURN p.gazette_id AS gazette_id,
       p.date AS date,
       p.name AS name,
       p.description AS description,
       p.url AS url,
       COLLECT({
         gazette_id: c.gazette_id,
         date: c.date,
         name: c.name,
         description: c.description,
         url: c.url
       }) AS children
";

pub const DATES_CYPHER: &str = "
MATCH (g:Gazette)
RETURN DISTINCT g.date AS date
ORDER BY date
";

const SUMMARY_COLUMNS: &[&str] = &["id", "date", "name", "url"];

const EDGE_COLUMNS: &[&str] = &[
    "child_id",
    "parent_id",
    "child_date",
    "parent_date",
    "child_url",
    "parent_url",
];

const TREE_COLUMNS: &[&str] = &["gazette_id", "date", "name", "description", "url", "children"];

const DATE_COLUMNS: &[&str] = &["date"];

/// A read against the gazette graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GazetteQuery {
    /// Every gazette, oldest first.
    Timeline,
    /// Every `AMENDS` edge with both endpoints.
    Graph,
    /// Isolated gazettes plus every gazette something amends.
    Parents,
    /// Parents published on `date`, each with the gazettes amending it.
    AmendmentTree { date: String },
    /// Distinct publication dates, ascending.
    Dates,
}

impl GazetteQuery {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Timeline => "timeline",
            Self::Graph => "graph",
            Self::Parents => "parents",
            Self::AmendmentTree { .. } => "amendment_tree",
            Self::Dates => "dates",
        }
    }

    pub fn cypher(&self) -> &'static str {
        match self {
            Self::Timeline => TIMELINE_CYPHER,
            Self::Graph => GRAPH_CYPHER,
            Self::Parents => PARENTS_CYPHER,
            Self::AmendmentTree { .. } => AMENDMENT_TREE_CYPHER,
            Self::Dates => DATES_CYPHER,
        }
    }

    /// Output aliases, in `RETURN` order.
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Self::Timeline | Self::Parents => SUMMARY_COLUMNS,
            Self::Graph => EDGE_COLUMNS,
            Self::AmendmentTree { .. } => TREE_COLUMNS,
            Self::Dates => DATE_COLUMNS,
        }
    }

    /// Build the bolt query with its parameters bound.
    pub fn to_query(&self) -> neo4rs::Query {
        let q = query(self.cypher());
        match self {
            Self::AmendmentTree { date } => q.param("date", date.clone()),
            _ => q,
        }
    }
}
