//! Single-page-application serving for [axum].
//!
//! A [`SpaServer`] answers every request under its mount with either a
//! literal asset or the SPA entry document: a path that names a real file is
//! served verbatim, anything else gets `index.html` (or a configured
//! replacement) so client-side routing can take over. Assets come from a
//! [`rust_embed`] tree baked into the binary or from a directory on disk.
//!
//! ```no_run
//! use rust_embed::RustEmbed;
//! use spa_serve::SpaServer;
//!
//! #[derive(RustEmbed)]
//! #[folder = "tests/fixtures/dist"]
//! struct Assets;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let app = SpaServer::from_embedded::<Assets>("")?
//!     .with_base_path("/app")
//!     .into_router();
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
mod server;
mod source;

pub use error::Error;
pub use server::SpaServer;
