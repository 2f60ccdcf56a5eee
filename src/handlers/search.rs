use axum::{
    extract::{Query, State},
    Json,
};
use validator::Validate;

use crate::{
    error::{SearchError, SearchResult},
    models::{SearchHit, SearchParams},
    state::AppState,
};

/// GET /api/search?q= — music videos matching `q`, flagged for download.
pub async fn search_music(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> SearchResult<Json<Vec<SearchHit>>> {
    params.validate().map_err(|_| SearchError::EmptyQuery)?;

    let hits = state.search.search(&params.q).await?;
    tracing::info!(query = %params.q, hits = hits.len(), "Search served");
    Ok(Json(hits))
}
