//! # HTTP Trigger
//!
//! Small axum router for operators: a welcome page, route listing,
//! on-demand oracle registration and a view of the local oracles.

use crate::domain::registry::LocalOracleView;
use crate::ports::outbound::{LedgerClient, StatusPolicy};
use crate::service::OracleCoordinator;
use axum::{
    extract::State,
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared handler state.
struct AppState<L: LedgerClient, P: StatusPolicy> {
    coordinator: OracleCoordinator<L, P>,
}

impl<L: LedgerClient, P: StatusPolicy> Clone for AppState<L, P> {
    fn clone(&self) -> Self {
        Self {
            coordinator: self.coordinator.clone(),
        }
    }
}

/// Build the coordinator router.
pub fn router<L, P>(coordinator: OracleCoordinator<L, P>) -> Router
where
    L: LedgerClient + 'static,
    P: StatusPolicy + 'static,
{
    let state = AppState { coordinator };

    Router::new()
        .route("/", get(welcome))
        .route("/api", get(route_options))
        .route("/api/oracles", get(list_oracles::<L, P>))
        .route("/api/oracles/register", get(register_oracles::<L, P>))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn welcome() -> Html<&'static str> {
    Html("Welcome to the FlightSurety Oracle server app!")
}

async fn route_options() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "Route options: api/oracles/register"
    }))
}

/// Kick off registration in the background and acknowledge immediately.
async fn register_oracles<L, P>(State(state): State<AppState<L, P>>) -> impl IntoResponse
where
    L: LedgerClient + 'static,
    P: StatusPolicy + 'static,
{
    info!("[fs-05] RegisterOracles requested over HTTP");
    let coordinator = state.coordinator.clone();
    tokio::spawn(async move {
        coordinator.register_oracles().await;
    });

    Json(serde_json::json!({
        "message": "OK - RegisterOracles request received"
    }))
}

async fn list_oracles<L, P>(State(state): State<AppState<L, P>>) -> impl IntoResponse
where
    L: LedgerClient + 'static,
    P: StatusPolicy + 'static,
{
    let oracles: Vec<LocalOracleView> = state
        .coordinator
        .oracles()
        .iter()
        .map(LocalOracleView::from)
        .collect();

    Json(serde_json::json!({
        "count": oracles.len(),
        "oracles": oracles,
    }))
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "oracle-coordinator",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::FixedStatusPolicy;
    use crate::ports::outbound::{CoordinatorError, SubmissionAck};
    use crate::service::CoordinatorConfig;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use shared_types::{ether, Address, FlightKey, FlightStatus, Timestamp, U256};
    use std::sync::Arc;
    use std::time::Duration;
    use tower::ServiceExt;

    struct EchoLedger;

    #[async_trait]
    impl LedgerClient for EchoLedger {
        async fn registration_fee(&self) -> Result<U256, CoordinatorError> {
            Ok(ether(1))
        }

        async fn register_oracle(
            &self,
            oracle: Address,
            _fee: U256,
        ) -> Result<[u8; 3], CoordinatorError> {
            Ok([oracle[0], oracle[0] + 1, oracle[0] + 2])
        }

        async fn get_my_indexes(&self, oracle: Address) -> Result<[u8; 3], CoordinatorError> {
            Ok([oracle[0], oracle[0] + 1, oracle[0] + 2])
        }

        async fn submit_oracle_response(
            &self,
            _oracle: Address,
            _airline: Address,
            _key: FlightKey,
            _timestamp: Timestamp,
            _status: FlightStatus,
        ) -> Result<SubmissionAck, CoordinatorError> {
            Ok(SubmissionAck::Inert)
        }
    }

    fn create_test_service() -> OracleCoordinator<EchoLedger, FixedStatusPolicy> {
        OracleCoordinator::new(
            CoordinatorConfig::new(vec![[1; 20], [4; 20]]),
            Arc::new(EchoLedger),
            Arc::new(FixedStatusPolicy(FlightStatus::OnTime)),
        )
    }

    async fn get_json(app: Router, uri: &str) -> serde_json::Value {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_welcome_page() {
        let app = router(create_test_service());
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"Welcome to the FlightSurety Oracle server app!");
    }

    #[tokio::test]
    async fn test_route_options() {
        let body = get_json(router(create_test_service()), "/api").await;
        assert_eq!(body["message"], "Route options: api/oracles/register");
    }

    #[tokio::test]
    async fn test_register_route_triggers_registration() {
        let coordinator = create_test_service();
        let body = get_json(router(coordinator.clone()), "/api/oracles/register").await;
        assert_eq!(body["message"], "OK - RegisterOracles request received");

        for _ in 0..100 {
            if coordinator.oracles().len() == 2 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(coordinator.oracles().len(), 2);

        let listing = get_json(router(coordinator), "/api/oracles").await;
        assert_eq!(listing["count"], 2);
        assert_eq!(listing["oracles"][1]["indexes"], serde_json::json!([4, 5, 6]));
    }

    #[tokio::test]
    async fn test_health_check() {
        let body = get_json(router(create_test_service()), "/health").await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "oracle-coordinator");
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let response = router(create_test_service())
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
