use thiserror::Error;

/// Errors raised while constructing a [`SpaServer`](crate::SpaServer).
///
/// Request handling itself never returns an error: misses fall back to the
/// entry document and an unreadable entry document becomes a 500 response.
#[derive(Debug, Error)]
pub enum Error {
    /// The embedded asset tree contains no file under the requested
    /// sub-directory.
    #[error("embedded assets contain no `{0}/` directory")]
    UnknownAssetDir(String),
}
