//! Axum web server for the soundboard page

use axum::{
    extract::{ConnectInfo, State},
    http::{Method, StatusCode, Uri, Version},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tracing::{error, info, warn};

use crate::board::Soundboard;
use crate::core::config::Config;
use crate::core::error::Result;
use crate::watch::TemplateWatcher;
use crate::web::access_log;

// =============================================================================
// STATE
// =============================================================================

#[derive(Clone)]
pub struct AppState {
    pub board: Arc<Soundboard>,
}

// =============================================================================
// ROUTES
// =============================================================================

/// Build the router: the board page at `/`, raw clip files under the clip route
pub fn router(board: Arc<Soundboard>) -> Router {
    let clips_route = format!("/{}", board.route());
    let clips = ServeDir::new(board.clips_dir()).append_index_html_on_directories(false);

    Router::new()
        .route("/", get(serve_board))
        .nest_service(&clips_route, clips)
        .with_state(AppState { board })
}

/// GET / - Scan the clip directory and render the page
async fn serve_board(
    State(state): State<AppState>,
    remote: Option<ConnectInfo<SocketAddr>>,
    method: Method,
    uri: Uri,
    version: Version,
) -> Response {
    access_log::log_request(remote.map(|ConnectInfo(addr)| addr), &method, &uri, version);

    let board = Arc::clone(&state.board);
    match tokio::task::spawn_blocking(move || board.page()).await {
        Ok(Ok(page)) => Html(page).into_response(),
        Ok(Err(e)) => {
            // Details stay in the log, the client gets an empty 500
            error!(kind = e.kind(), "Failed to build board: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
        Err(e) => {
            error!("Board task failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

// =============================================================================
// SERVER
// =============================================================================

pub async fn run(config: Config, base_dir: PathBuf, open_browser: bool) -> Result<()> {
    let board = Arc::new(Soundboard::from_config(&config, &base_dir));

    if !board.clips_dir().is_dir() {
        warn!(
            "Clip directory {:?} does not exist, the board will fail until it does",
            board.clips_dir()
        );
    }

    let _watcher = if !config.template.live_reload && config.template.watch {
        match TemplateWatcher::new(board.renderer()) {
            Ok(watcher) => Some(watcher),
            Err(e) => {
                warn!("Template watcher disabled: {}", e);
                None
            }
        }
    } else {
        None
    };

    let app = router(board);

    let listener = bind(&config.server.host, config.server.port).await?;
    let addr = listener.local_addr()?;
    info!("Soundboard running at http://{}", addr);

    if open_browser {
        let url = format!("http://localhost:{}", addr.port());
        if let Err(e) = open::that(&url) {
            warn!("Could not open browser: {}", e);
        }
    }

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Soundboard stopped");
    Ok(())
}

/// Bind the listener; the IPv6 wildcard falls back to IPv4 on hosts without IPv6
async fn bind(host: &str, port: u16) -> Result<TcpListener> {
    match TcpListener::bind((host, port)).await {
        Ok(listener) => Ok(listener),
        Err(e) if host == "::" => {
            warn!("Cannot bind [::]:{} ({}), falling back to 0.0.0.0", port, e);
            Ok(TcpListener::bind(("0.0.0.0", port)).await?)
        }
        Err(e) => Err(e.into()),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bind_any_port() {
        let listener = bind("127.0.0.1", 0).await.unwrap();
        assert!(listener.local_addr().unwrap().port() > 0);
    }

    #[tokio::test]
    async fn test_bind_wildcard() {
        // Either dual-stack IPv6 or the IPv4 fallback
        let listener = bind("::", 0).await.unwrap();
        assert!(listener.local_addr().unwrap().ip().is_unspecified());
    }
}
