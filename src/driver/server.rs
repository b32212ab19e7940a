//! Push endpoint: the game client POSTs complete snapshots here.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Router,
};
use tokio::task::JoinHandle;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, info, warn};

use crate::error::DeckResult;
use crate::models::StateSnapshot;
use crate::state::StateStore;

/// Routes for the push endpoint.
///
/// `POST /` with a snapshot body answers 200, a malformed body answers 400
/// and anything else is 404. CORS is open to any origin.
pub fn router(store: Arc<StateStore>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", post(push_handler).fallback(not_found))
        .fallback(not_found)
        .layer(cors)
        .with_state(store)
}

/// Bind `addr` and serve the push endpoint in the background.
///
/// Returns the task handle and the bound address (useful with port 0).
pub async fn start_push_server(
    addr: SocketAddr,
    store: Arc<StateStore>,
) -> DeckResult<(JoinHandle<()>, SocketAddr)> {
    let app = router(store);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let actual_addr = listener.local_addr()?;

    info!("Push endpoint listening on http://{}", actual_addr);

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!("Push endpoint error: {}", e);
        }
    });

    Ok((handle, actual_addr))
}

async fn push_handler(State(store): State<Arc<StateStore>>, body: Bytes) -> impl IntoResponse {
    match serde_json::from_slice::<StateSnapshot>(&body) {
        Ok(snapshot) => {
            debug!(bytes = body.len(), "Snapshot pushed");
            store.replace(snapshot);
            (StatusCode::OK, "ok".to_string())
        }
        Err(e) => {
            warn!("Rejected malformed snapshot: {}", e);
            (StatusCode::BAD_REQUEST, format!("malformed snapshot: {}", e))
        }
    }
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "not found")
}
