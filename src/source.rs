use std::path::{Component, Path, PathBuf};
use std::{fmt, io};

use axum::{
    body::Body,
    extract::Request,
    http::{StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use rust_embed::{EmbeddedFile, RustEmbed};
use tower::ServiceExt;
use tower_http::services::ServeFile;

use crate::error::Error;

/// Where the application bundle lives.
///
/// Both variants answer the same three questions: does a relative path name a
/// regular file, what are the bytes of the entry document, and how does a
/// literal asset get served.
#[derive(Clone, Debug)]
pub(crate) enum AssetSource {
    Embedded(EmbeddedDir),
    Directory(DirTree),
}

impl AssetSource {
    pub(crate) fn embedded<E: RustEmbed>(sub_dir: &str) -> Result<Self, Error> {
        let sub = sub_dir.trim_matches('/');
        let prefix = if sub.is_empty() || sub == "." {
            String::new()
        } else {
            let prefix = format!("{sub}/");
            if !E::iter().any(|path| path.starts_with(prefix.as_str())) {
                return Err(Error::UnknownAssetDir(sub.to_owned()));
            }
            prefix
        };
        Ok(Self::Embedded(EmbeddedDir {
            lookup: E::get,
            prefix,
        }))
    }

    pub(crate) fn directory(root: PathBuf) -> Self {
        Self::Directory(DirTree { root })
    }

    /// Whether `rel` names a regular file in the source. Directories and
    /// probe failures both count as absent.
    pub(crate) async fn contains(&self, rel: &str) -> bool {
        match self {
            Self::Embedded(tree) => tree.get(rel).is_some(),
            Self::Directory(tree) => tree.contains(rel).await,
        }
    }

    pub(crate) async fn read_entry(&self, rel: &str) -> io::Result<Vec<u8>> {
        match self {
            Self::Embedded(tree) => tree.get(rel).map(|file| file.data.into_owned()).ok_or_else(
                || io::Error::new(io::ErrorKind::NotFound, format!("no embedded file `{rel}`")),
            ),
            Self::Directory(tree) => tokio::fs::read(tree.root.join(rel)).await,
        }
    }

    /// Serves `rel` literally. Callers only get here after [`Self::contains`]
    /// reported a hit, but a miss between the two still answers cleanly.
    pub(crate) async fn serve_asset(&self, rel: &str, request: Request) -> Response {
        match self {
            Self::Embedded(tree) => tree.serve(rel),
            Self::Directory(tree) => tree.serve(rel, request).await,
        }
    }
}

/* ---------- embedded backend ---------- */

/// Compile-time assets, type-erased so `SpaServer` stays a plain struct.
/// `lookup` is the `RustEmbed::get` of the deriving type and `prefix` is
/// either empty or `"{sub_dir}/"`.
#[derive(Clone)]
pub(crate) struct EmbeddedDir {
    lookup: fn(&str) -> Option<EmbeddedFile>,
    prefix: String,
}

impl fmt::Debug for EmbeddedDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmbeddedDir")
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

impl EmbeddedDir {
    fn get(&self, rel: &str) -> Option<EmbeddedFile> {
        (self.lookup)(&format!("{}{rel}", self.prefix))
    }

    fn serve(&self, rel: &str) -> Response {
        match self.get(rel) {
            Some(file) => {
                let mime = mime_guess::from_path(rel).first_or_octet_stream();
                (
                    [(header::CONTENT_TYPE, mime.as_ref())],
                    file.data.into_owned(),
                )
                    .into_response()
            }
            None => StatusCode::NOT_FOUND.into_response(),
        }
    }
}

/* ---------- directory backend ---------- */

/// Assets on disk, probed on every request so a rebuilt bundle shows up
/// without a restart.
#[derive(Clone, Debug)]
pub(crate) struct DirTree {
    root: PathBuf,
}

impl DirTree {
    /// Joins `rel` onto the root, refusing any component that would step
    /// outside it. `Path::join` replaces the whole path when handed an
    /// absolute component, so it never gets one.
    fn resolve(&self, rel: &str) -> Option<PathBuf> {
        let mut full = self.root.clone();
        for component in Path::new(rel).components() {
            match component {
                Component::Normal(part) => full.push(part),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
            }
        }
        Some(full)
    }

    async fn contains(&self, rel: &str) -> bool {
        match self.resolve(rel) {
            Some(full) => tokio::fs::metadata(full)
                .await
                .is_ok_and(|meta| meta.is_file()),
            None => false,
        }
    }

    /// Delegates to `ServeFile` with a fresh request carrying the original
    /// method and headers, so range and conditional requests keep working.
    async fn serve(&self, rel: &str, request: Request) -> Response {
        let Some(full) = self.resolve(rel) else {
            return StatusCode::NOT_FOUND.into_response();
        };
        let (mut parts, _) = request.into_parts();
        // `rel` is a slice of an already-parsed request path, so this parse
        // cannot realistically fail.
        parts.uri = Uri::try_from(format!("/{rel}")).unwrap_or_default();
        let delegated = Request::from_parts(parts, Body::empty());
        match ServeFile::new(full).oneshot(delegated).await {
            Ok(response) => response.map(Body::new),
            Err(infallible) => match infallible {},
        }
    }
}
