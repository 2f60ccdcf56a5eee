use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::{debug, info};
use validator::Validate;

use crate::{
    error::{ResolveError, ResolveResult},
    models::{ResolveRequest, ResolvedAudio},
    state::AppState,
};

/// POST /api/yt — resolve a media URL to a direct audio link.
///
/// A body that is not valid JSON is treated like one without a `url`.
/// Every outcome, including failures, is answered with 200.
pub async fn resolve_audio(
    State(state): State<AppState>,
    body: Result<Json<ResolveRequest>, JsonRejection>,
) -> ResolveResult<Json<ResolvedAudio>> {
    let req = match body {
        Ok(Json(req)) => req,
        Err(rejection) => {
            debug!(reason = %rejection.body_text(), "Unreadable request body");
            ResolveRequest::default()
        }
    };

    req.validate().map_err(|_| ResolveError::EmptyUrl)?;
    let url = req.url.ok_or(ResolveError::EmptyUrl)?;

    let resolved = state.resolver.resolve(&url).await?;
    info!(url = %url, "Resolved audio stream");

    Ok(Json(resolved))
}
