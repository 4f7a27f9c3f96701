//! Axum router assembly.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use agrihub_app::hub::BroadcastHub;

use crate::sink::WsSink;

/// Build the top-level axum [`Router`].
///
/// Serves `/ws` for observer connections and `/health` for liveness
/// probes. Includes a [`TraceLayer`] that logs each request at the `DEBUG`
/// level using the `tracing` ecosystem.
pub fn build(hub: Arc<BroadcastHub<WsSink>>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/ws", get(crate::socket::upgrade))
        .layer(TraceLayer::new_for_http())
        .with_state(hub)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn router() -> Router {
        build(Arc::new(BroadcastHub::new()))
    }

    #[tokio::test]
    async fn should_respond_ok_on_health_check() {
        let response = router()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn should_reject_plain_request_on_ws_route() {
        // Without the upgrade headers the handshake must fail.
        let response = router()
            .oneshot(Request::get("/ws").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn should_return_not_found_for_unknown_route() {
        let response = router()
            .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
