use clap::{ArgAction, Parser};
use std::{net::SocketAddr, path::PathBuf};

/// spa-serve configuration
#[derive(Parser, Debug, Clone)]
#[command(name = "spa-serve", version, about = "Serve a single-page application over HTTP")]
pub struct Config {
    /// Directory containing the built SPA bundle
    #[arg(env = "SPA_SERVE_DIR")]
    pub dir: PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', action = ArgAction::Count)]
    pub verbose: u8,

    /// Decrease verbosity (-q, -qq, -qqq)
    #[arg(short = 'q', action = ArgAction::Count)]
    pub quiet: u8,

    /// Address to bind the HTTP server to
    #[arg(long, env = "SPA_SERVE_BIND_ADDR", default_value = "127.0.0.1:8080")]
    pub bind: SocketAddr,

    /// URL prefix the application is mounted under
    #[arg(long, env = "SPA_SERVE_BASE_PATH", default_value = "/")]
    pub base_path: String,

    /// Entry document served for client-side routes, relative to the bundle
    #[arg(long, env = "SPA_SERVE_ENTRY", default_value = "index.html")]
    pub entry: String,

    /// Optional log file path (logs are written to stdout + this file)
    #[arg(long, env = "SPA_SERVE_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

impl Config {
    #[must_use]
    pub fn verbosity_delta(&self) -> i16 {
        i16::from(self.verbose) - i16::from(self.quiet)
    }
    #[must_use]
    pub fn log_filter(&self) -> &'static str {
        match self.verbosity_delta() {
            d if d <= -2 => "error",
            -1 => "warn",
            0 => "info,spa_serve=info,axum=info,tower_http=info",
            1 => "debug,spa_serve=debug,axum=info,tower_http=info",
            2 => "trace,spa_serve=trace,axum=debug,tower_http=trace,hyper=info",
            _ => "trace,spa_serve=trace,axum=trace,tower_http=trace,hyper=debug",
        }
    }
}
