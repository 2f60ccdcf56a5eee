use std::sync::Arc;

use crate::config::SearchConfig;
use crate::resolver::AudioResolver;
use crate::search::YouTubeSearch;

/// Shared application state passed to all handlers.
///
/// Nothing in here is mutated per request; the resolver owns its own
/// concurrency limit and the search client its key rotation.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<dyn AudioResolver>,
    pub search: Arc<YouTubeSearch>,
}

impl AppState {
    /// State with search disabled until [`AppState::with_search`] is called.
    pub fn new(resolver: Arc<dyn AudioResolver>) -> Self {
        Self {
            resolver,
            search: Arc::new(YouTubeSearch::new(&SearchConfig::default())),
        }
    }

    pub fn with_search(mut self, search: YouTubeSearch) -> Self {
        self.search = Arc::new(search);
        self
    }
}
