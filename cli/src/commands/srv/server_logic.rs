//! # CyberChat HTTP Server Implementation
//!
//! File: cli/src/commands/srv/server_logic.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module implements the HTTP side of `cyberchat srv`:
//! - `POST /api/chat`: answers a message with the keyword responder
//! - `GET /api/health`: liveness plus the size of the trigger table
//! - everything else: static files from the demo site directory (if any)
//!
//! Handlers share one `KeywordResponder` through axum state. The trigger
//! table behind it is immutable, so requests never contend for it.
//!
//! ## Architecture
//!
//! 1. Set up the Axum router with the API routes, the static fallback and middleware
//! 2. Find an available port if the requested one is in use
//! 3. Start the server with graceful shutdown handlers
//!
use super::config::ServerConfig;
use crate::common::api::{ChatReply, ChatRequest, HealthStatus, CHAT_PATH, HEALTH_PATH};
use crate::core::conversation::ConversationTurn;
use crate::core::error::Result;
use crate::core::responder::KeywordResponder;
use anyhow::Context;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{debug, error, info, warn, Level};

/// State shared by the API handlers.
#[derive(Clone)]
struct AppState {
    responder: KeywordResponder,
    reply_delay: Duration,
}

/// # Run HTTP Server (`run_server`)
///
/// Binds to the configured address (or the next free port), prints the
/// server's URLs and serves until Ctrl+C or SIGTERM.
///
/// ## Errors
///
/// - No available port within 10 attempts.
/// - Binding the `TcpListener` fails.
/// - The Axum server encounters a fatal error.
pub async fn run_server(config: ServerConfig, responder: KeywordResponder) -> Result<()> {
    let max_port_attempts = 10;
    let addr = find_available_port(config.host, config.port, max_port_attempts).await?;
    let trigger_count = responder.table().len();

    let app = create_app(&config, responder);

    println!("\n=================================================================");
    match &config.directory {
        Some(directory) => println!("📂 Serving files from: {}", directory.display()),
        None => println!("📂 Static files:      disabled (API only)"),
    }
    println!("🌐 Local URL:         http://localhost:{}", addr.port());
    println!("💬 Chat endpoint:     http://localhost:{}{}", addr.port(), CHAT_PATH);
    println!("⚙️  Binding to address: {}", addr);
    println!("🔑 Triggers loaded:   {}", trigger_count);
    println!("🔒 CORS enabled:      {}", config.enable_cors);
    println!("=================================================================\n");

    info!("Starting server on {}", addr);
    println!("Server starting! Press Ctrl+C to stop.");

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind TCP listener to address {}", addr))?;

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    println!("\nServer shutdown complete.");
    Ok(())
}

/// Resolves when Ctrl+C or (on Unix) SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, initiating graceful shutdown..."),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
                info!("Received SIGTERM, initiating graceful shutdown...");
            }
            Err(e) => {
                error!(
                    "Failed to install SIGTERM handler: {}. Shutdown on SIGTERM might not work.",
                    e
                );
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// # Find Available Port (`find_available_port`)
///
/// Tries `start_port` and then the following ports, up to `max_attempts`
/// in total, returning the first address that can be bound.
async fn find_available_port(
    req_host: std::net::IpAddr,
    start_port: u16,
    max_attempts: u8,
) -> Result<SocketAddr> {
    let mut current_port = start_port;

    for attempt in 0..max_attempts {
        let addr = SocketAddr::new(req_host, current_port);

        match TcpListener::bind(addr).await {
            Ok(listener) => {
                drop(listener);
                if attempt > 0 {
                    info!(
                        "Port {} was unavailable, successfully bound to available port {}.",
                        start_port, current_port
                    );
                }
                return Ok(addr);
            }
            Err(e) => {
                warn!(
                    "Attempt {}: Port {} on host {} is unavailable (Error: {}). Trying next port...",
                    attempt + 1,
                    current_port,
                    req_host,
                    e
                );
                current_port = match current_port.checked_add(1) {
                    Some(next) => next,
                    None => break,
                };
            }
        }
    }

    anyhow::bail!(
        "Could not find an available port on host {} starting from port {} after trying {} ports.",
        req_host,
        start_port,
        max_attempts
    )
}

/// # Create Axum Application (`create_app`)
///
/// Builds the router: API routes first, then `ServeDir` as the fallback when
/// a site directory is configured, wrapped in tracing and CORS layers.
pub fn create_app(config: &ServerConfig, responder: KeywordResponder) -> Router {
    let cors_layer = if config.enable_cors {
        info!("CORS middleware enabled (permissive).");
        CorsLayer::permissive()
    } else {
        info!("CORS middleware disabled.");
        CorsLayer::new()
    };

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::default().include_headers(true))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let state = AppState {
        responder,
        reply_delay: config.reply_delay,
    };

    let router = Router::new()
        .route(CHAT_PATH, post(chat_handler))
        .route(HEALTH_PATH, get(health_handler))
        .with_state(state);

    let router = match &config.directory {
        Some(directory) => router.fallback_service(ServeDir::new(directory)),
        None => router,
    };

    router.layer(
        ServiceBuilder::new()
            .layer(trace_layer)
            .layer(cors_layer),
    )
}

async fn chat_handler(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Json<ChatReply> {
    let (response, trigger) = state.responder.respond_matched(&request.message);
    let response = response.to_string();
    let matched_keyword = trigger.map(|trigger| trigger.keyword.clone());
    debug!("Chat request {:?} matched {:?}", request.message, matched_keyword);

    let turn = ConversationTurn::new(request.message, response);

    if !state.reply_delay.is_zero() {
        tokio::time::sleep(state.reply_delay).await;
    }

    Json(ChatReply {
        reply: turn.response,
        matched_keyword,
        timestamp: turn.timestamp,
    })
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_string(),
        triggers: state.responder.table().len(),
    })
}
