//! # HTTP Trigger Flows

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::{eventually, test_node};
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use fs_05_oracle_coordinator::router;
    use tower::ServiceExt;

    async fn get(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or_default())
    }

    #[tokio::test]
    async fn test_register_endpoint_registers_every_oracle() {
        let node = test_node().await;
        let app = router(node.coordinator.clone());

        let (status, body) = get(app.clone(), "/api/oracles/register").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "OK - RegisterOracles request received");

        let ledger = &node.ledger;
        assert!(eventually(|| async move { ledger.oracle_count().await == 30 }).await);
        let coordinator = &node.coordinator;
        assert!(eventually(|| async move { coordinator.oracles().len() == 30 }).await);

        let (status, listing) = get(app, "/api/oracles").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listing["count"], 30);
    }

    #[tokio::test]
    async fn test_route_options_and_health() {
        let node = test_node().await;
        let app = router(node.coordinator.clone());

        let (_, options) = get(app.clone(), "/api").await;
        assert_eq!(options["message"], "Route options: api/oracles/register");

        let (status, health) = get(app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(health["status"], "healthy");
    }
}
