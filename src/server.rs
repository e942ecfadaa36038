use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tracing::{error, info};

use crate::metrics::render;
use crate::publisher::SnapshotPublisher;

#[derive(Clone)]
pub struct AppState {
    pub publisher: Arc<SnapshotPublisher>,
    pub metrics_path: String,
}

pub fn router(publisher: Arc<SnapshotPublisher>, metrics_path: &str) -> Router {
    let state = AppState {
        publisher,
        metrics_path: metrics_path.to_string(),
    };
    Router::new()
        .route("/", get(root_handler))
        .route(metrics_path, get(metrics_handler))
        .with_state(state)
}

pub async fn serve<F>(addr: SocketAddr, app: Router, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Serving metrics on http://{}", addr);
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

/// Serve the current snapshot. Poll failures never surface here; a stale
/// snapshot is served until the pipeline recovers.
async fn metrics_handler(State(state): State<AppState>) -> Response {
    let snapshot = state.publisher.current().await;
    match render(&snapshot) {
        Ok(body) => ([(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)], body).into_response(),
        Err(err) => {
            error!("Failed to encode metrics: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn root_handler(State(state): State<AppState>) -> Html<String> {
    Html(format!(
        "<html>\n\
         <head><title>OPA ScoreCard Exporter</title></head>\n\
         <body>\n\
         <h1>OPA ScoreCard Exporter</h1>\n\
         <p><a href='{}'>Metrics</a></p>\n\
         </body>\n\
         </html>",
        state.metrics_path
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_router_builds_with_custom_path() {
        let publisher = Arc::new(SnapshotPublisher::new());
        let _router = router(publisher, "/telemetry");
    }
}
