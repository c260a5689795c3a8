//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data` and depend only on
//! domain ports, so they stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::FundsQuery;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub funds: Arc<dyn FundsQuery>,
}

impl HttpState {
    /// Construct state from the fund read port.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use civic_backend::domain::FundsQueryService;
    /// use civic_backend::inbound::http::state::HttpState;
    /// use civic_backend::outbound::memory::InMemoryDocumentStore;
    ///
    /// let store = Arc::new(InMemoryDocumentStore::new());
    /// let state = HttpState::new(Arc::new(FundsQueryService::new(store.clone(), store)));
    /// let _funds = state.funds.clone();
    /// ```
    pub fn new(funds: Arc<dyn FundsQuery>) -> Self {
        Self { funds }
    }
}
