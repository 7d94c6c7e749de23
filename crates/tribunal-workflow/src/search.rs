//! Search dispatcher: one query, routed to exactly one record store.

use tribunal_core::error::{TribunalError, TribunalResult};
use tribunal_core::models::search::{MIN_QUERY_CHARS, SearchKind, SearchResults};
use tribunal_core::repository::{CauseRepository, CitizenRepository, VehicleRepository};

pub struct SearchDispatcher<V, Ci, C>
where
    V: VehicleRepository,
    Ci: CitizenRepository,
    C: CauseRepository,
{
    vehicles: V,
    citizens: Ci,
    causes: C,
}

impl<V, Ci, C> SearchDispatcher<V, Ci, C>
where
    V: VehicleRepository,
    Ci: CitizenRepository,
    C: CauseRepository,
{
    pub fn new(vehicles: V, citizens: Ci, causes: C) -> Self {
        Self {
            vehicles,
            citizens,
            causes,
        }
    }

    /// Run `query` against the store named by `kind`.
    ///
    /// Queries shorter than [`MIN_QUERY_CHARS`] after trimming never reach
    /// a store and yield all three collections, empty, whatever `kind` is.
    pub async fn dispatch(&self, kind: &str, query: &str) -> TribunalResult<SearchResults> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_CHARS {
            return Ok(SearchResults::empty());
        }

        let kind: SearchKind = kind
            .parse()
            .map_err(|_| TribunalError::validation(format!("Invalid search type: {kind}")))?;

        let mut results = SearchResults::default();
        match kind {
            SearchKind::Vehicles => results.vehicles = Some(self.vehicles.search(query).await?),
            SearchKind::Citizens => results.citizens = Some(self.citizens.search(query).await?),
            SearchKind::Causes => results.causes = Some(self.causes.search(query).await?),
        }
        Ok(results)
    }
}
