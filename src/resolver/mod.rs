pub mod capture;
pub mod ytdlp;

use async_trait::async_trait;

use crate::error::ResolveResult;
use crate::models::ResolvedAudio;

pub use ytdlp::YtDlp;

/// Turns a media URL into a direct audio link.
///
/// The HTTP layer only talks to this trait, so handlers can be exercised
/// against an in-process double instead of a real child process.
#[async_trait]
pub trait AudioResolver: Send + Sync {
    /// Resolve `url` to its best audio-only stream.
    async fn resolve(&self, url: &str) -> ResolveResult<ResolvedAudio>;

    /// Report the resolver's version string. Used by the health check.
    async fn version(&self) -> ResolveResult<String>;
}
