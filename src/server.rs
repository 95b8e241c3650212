use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Router,
    extract::{Request, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use rust_embed::RustEmbed;

use crate::{error::Error, source::AssetSource};

/// Serves a single-page application: a request whose relative path names a
/// real asset gets that asset verbatim, everything else gets the entry
/// document so client-side routing can take over.
///
/// Configuration is builder-style and frozen once the handler goes live;
/// requests are handled statelessly against it.
#[derive(Clone, Debug)]
pub struct SpaServer {
    source: AssetSource,
    base_path: String,
    entry_path: String,
}

impl SpaServer {
    fn new(source: AssetSource) -> Self {
        Self {
            source,
            base_path: "/".to_owned(),
            entry_path: "index.html".to_owned(),
        }
    }

    /// Serves assets embedded at compile time, rooted at `sub_dir` within
    /// the tree. Pass `""` or `"."` to serve the whole tree.
    ///
    /// Fails when no embedded file lives under `sub_dir`, which is almost
    /// always a typo rather than an intentionally empty bundle.
    pub fn from_embedded<E: RustEmbed>(sub_dir: &str) -> Result<Self, Error> {
        Ok(Self::new(AssetSource::embedded::<E>(sub_dir)?))
    }

    /// Serves assets from a directory on disk. The directory does not have
    /// to exist yet; every request probes it fresh.
    pub fn from_dir(path: impl Into<PathBuf>) -> Self {
        Self::new(AssetSource::directory(path.into()))
    }

    /// Mounts the application under `path`. A leading and trailing slash
    /// are added when missing; requests outside the base path get a 404.
    #[must_use]
    pub fn with_base_path(mut self, path: &str) -> Self {
        let mut base = path.to_owned();
        if !base.starts_with('/') {
            base.insert(0, '/');
        }
        if !base.ends_with('/') {
            base.push('/');
        }
        self.base_path = base;
        self
    }

    /// Uses `path` (relative to the asset root, stored verbatim) as the
    /// entry document instead of `index.html`.
    #[must_use]
    pub fn with_entry_file(mut self, path: &str) -> Self {
        self.entry_path = path.to_owned();
        self
    }

    /// Answers one request. Never fails: asset misses fall back to the
    /// entry document and an unreadable entry document becomes a 500.
    pub async fn handle(&self, request: Request) -> Response {
        let Some(rel) = self.relative_path(request.uri().path()) else {
            return (StatusCode::NOT_FOUND, "Not found").into_response();
        };
        if rel.is_empty() {
            return self.serve_entry().await;
        }
        if self.source.contains(&rel).await {
            let force_js = rel.ends_with(".js");
            let mut response = self.source.serve_asset(&rel, request).await;
            // Scripts always go out as `application/javascript`, whatever
            // the platform's MIME registry says for `.js`.
            if force_js && response.status().is_success() {
                response.headers_mut().insert(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static("application/javascript"),
                );
            }
            return response;
        }
        tracing::debug!(path = %rel, "no matching asset, serving entry document");
        self.serve_entry().await
    }

    /// Wraps the handler in a fallback-only [`Router`], the natural way to
    /// combine it with API routes that match first.
    #[must_use]
    pub fn into_router(self) -> Router {
        Router::new().fallback(dispatch).with_state(Arc::new(self))
    }

    /// Strips the base path plus one leading slash. `None` means the
    /// request is outside the mount, an empty string that it hit the mount
    /// exactly.
    fn relative_path(&self, path: &str) -> Option<String> {
        let rest = path.strip_prefix(self.base_path.as_str())?;
        Some(rest.strip_prefix('/').unwrap_or(rest).to_owned())
    }

    async fn serve_entry(&self) -> Response {
        match self.source.read_entry(&self.entry_path).await {
            Ok(bytes) => ([(header::CONTENT_TYPE, "text/html")], bytes).into_response(),
            Err(err) => {
                tracing::error!(entry = %self.entry_path, error = %err, "failed to read entry document");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}

async fn dispatch(State(server): State<Arc<SpaServer>>, request: Request) -> Response {
    server.handle(request).await
}
