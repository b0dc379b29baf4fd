//! The query execution seam.

use async_trait::async_trait;
use gazette_core::Record;

use crate::queries::GazetteQuery;

/// Runs a gazette query and returns one record per result row, in the order
/// the backing store produced them. Keys match [`GazetteQuery::columns`].
///
/// Failure semantics belong to the implementation; callers forward
/// `Self::Error` as-is.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn execute_query(&self, query: &GazetteQuery) -> Result<Vec<Record>, Self::Error>;
}

#[async_trait]
impl<T: QueryExecutor + ?Sized> QueryExecutor for std::sync::Arc<T> {
    type Error = T::Error;

    async fn execute_query(&self, query: &GazetteQuery) -> Result<Vec<Record>, Self::Error> {
        (**self).execute_query(query).await
    }
}
