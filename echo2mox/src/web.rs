//! Web trigger for the export
//!
//! A single page with a button that POSTs to `/run`; the response is the
//! converted CSV as a download. Each request builds its own result in memory,
//! so concurrent runs share nothing but the read-only rules.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use echo2mox_core::RuleTables;
use std::sync::Arc;

use crate::echomtg::{Credentials, EchoClient};
use crate::error::Result;
use crate::export::{convert, ExportOutput, OUTPUT_FILE_NAME};

/// Shared application state (API client, credentials, rules)
#[derive(Clone)]
pub struct AppState {
    client: EchoClient,
    credentials: Arc<Credentials>,
    rules: Arc<RuleTables>,
}

impl AppState {
    pub fn new(client: EchoClient, credentials: Credentials, rules: RuleTables) -> Self {
        Self {
            client,
            credentials: Arc::new(credentials),
            rules: Arc::new(rules),
        }
    }
}

/// GET / - Serve the web UI (single HTML page)
async fn index_handler() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

async fn run_export(state: &AppState) -> Result<ExportOutput> {
    let table = state.client.fetch_table(&state.credentials).await?;
    convert(&table, &state.rules)
}

/// POST /run - Fetch, convert and return the CSV as an attachment
async fn run_handler(State(state): State<AppState>) -> Response {
    match run_export(&state).await {
        Ok(output) => {
            log::info!("Run audit record:\n{}", output.summary);
            let disposition = format!("attachment; filename=\"{}\"", OUTPUT_FILE_NAME);
            (
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                output.csv,
            )
                .into_response()
        }
        Err(e) => {
            log::error!("Run failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

/// Build the web server router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/run", post(run_handler))
        .with_state(state)
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => log::info!("Shutdown signal received"),
        Err(e) => {
            log::error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

/// Start the web server (async)
///
/// Binds to 0.0.0.0 (all interfaces) to work with Docker port mapping.
pub async fn serve(
    state: AppState,
    port: u16,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);
    let addr = format!("0.0.0.0:{}", port);

    log::info!("Web UI listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
