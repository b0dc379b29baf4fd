//! The gazette query service.

use gazette_core::Record;
use gazette_extract::TextExtractor;
use gazette_graph::{GazetteQuery, QueryExecutor};

/// Read-only access to gazettes and their amendments.
///
/// Holds no state of its own. Every call is forwarded to a collaborator and
/// its result, success or failure, comes back untouched.
pub struct GazetteService<E, X> {
    executor: E,
    extractor: X,
}

impl<E, X> GazetteService<E, X>
where
    E: QueryExecutor,
    X: TextExtractor,
{
    pub fn new(executor: E, extractor: X) -> Self {
        Self {
            executor,
            extractor,
        }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Every gazette as `{id, date, name, url}`, ordered by date.
    pub async fn get_timeline(&self) -> Result<Vec<Record>, E::Error> {
        self.run(GazetteQuery::Timeline).await
    }

    /// One `{child_id, parent_id, child_date, parent_date, child_url, parent_url}`
    /// row per `AMENDS` edge. No ordering, no deduplication.
    pub async fn get_graph(&self) -> Result<Vec<Record>, E::Error> {
        self.run(GazetteQuery::Graph).await
    }

    /// Gazettes with no relationships at all, plus every gazette that
    /// something amends, each listed once.
    ///
    /// A gazette that neither amends nor is amended counts as a parent.
    pub async fn get_parents(&self) -> Result<Vec<Record>, E::Error> {
        self.run(GazetteQuery::Parents).await
    }

    /// Parents published on `date`, each with the list of gazettes amending it.
    pub async fn get_amendment_tree(&self, date: &str) -> Result<Vec<Record>, E::Error> {
        self.run(GazetteQuery::AmendmentTree {
            date: date.to_string(),
        })
        .await
    }

    /// Distinct publication dates, ascending.
    pub async fn get_dates(&self) -> Result<Vec<Record>, E::Error> {
        self.run(GazetteQuery::Dates).await
    }

    /// Text of the PDF at `pdf_url`, exactly as the extractor returns it.
    pub async fn extract_text(&self, pdf_url: &str) -> Result<String, X::Error> {
        tracing::debug!(url = pdf_url, "Extracting gazette text");
        self.extractor.extract_text_from_pdf(pdf_url).await
    }

    async fn run(&self, query: GazetteQuery) -> Result<Vec<Record>, E::Error> {
        tracing::debug!(query = query.name(), "Running gazette query");
        self.executor.execute_query(&query).await
    }
}
