//! Exam Dungeon · Quiz Battle Backend
//!
//! - Axum HTTP + WebSocket API
//! - Remote question bank (static JSON array fetched over HTTP)
//! - Static SPA fallback (./static/index.html)
//!
//! Important env variables:
//!   PORT          : u16 (default 3000)
//!   QUESTION_BANK_URL : bank url override; empty disables remote fetching
//!   GAME_CONFIG_PATH  : path to TOML config (source + optional local bank)
//!   SAVE_PATH    : player save blob (default ./data/progress.json)
//!   LOG_LEVEL    : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT      : "pretty" (default) or "json"

mod telemetry;
mod util;
mod error;
mod domain;
mod sanitize;
mod encounter;
mod progress;
mod history;
mod config;
mod seeds;
mod source;
mod save;
mod state;
mod protocol;
mod logic;
mod routes;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{info, instrument};

use crate::config::load_game_config_from_env;
use crate::routes::build_router;
use crate::state::AppState;

#[instrument(level = "info", skip_all)]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // Build shared application state (question stores, session, source client).
  let cfg = load_game_config_from_env().unwrap_or_default();
  let state = Arc::new(AppState::new(cfg));

  // Build the HTTP router with routes, CORS and tracing layers.
  let app = build_router(state.clone());

  // Read port from env or default to 3000.
  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "dungeon_backend", %addr, "HTTP server listening");
  axum::serve(listener, app).await?;
  Ok(())
}
