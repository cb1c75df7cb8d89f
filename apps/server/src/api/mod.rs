//! HTTP routing.

mod history;

use std::sync::Arc;
use std::time::Duration;

use axum::http::{Method, StatusCode};
use axum::middleware::map_response;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::main_lib::AppState;

pub fn app_router(state: Arc<AppState>) -> Router {
    // Permissive CORS on every response, success or failure, so browser
    // callers can always read the JSON body. The layer also answers OPTIONS
    // preflight with an empty success before any handler runs.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any);

    // Layer order, innermost first: the timeout wraps the handlers, its bare
    // 408 is rewritten to the JSON error shape, and CORS sits outermost so
    // every response carries the headers.
    Router::new()
        .route("/health", get(health))
        .route("/history", get(history::get_history))
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(map_response(json_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

/// `TimeoutLayer` replies with an empty-bodied 408; rewrite it so timeouts
/// honor the structured JSON error contract like every other failure.
async fn json_timeout(response: Response) -> Response {
    if response.status() != StatusCode::REQUEST_TIMEOUT {
        return response;
    }
    let body = Json(serde_json::json!({
        "error": "TIMEOUT",
        "message": "request exceeded the inbound time limit",
    }));
    (StatusCode::REQUEST_TIMEOUT, body).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::main_lib::AppState;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use chrono::NaiveDate;
    use quotegate_market_data::{
        Bar, GatewayError, GovernorConfig, HistoryGateway, HistoryProvider, RequestGovernor,
    };
    use rust_decimal_macros::dec;
    use tower::ServiceExt;

    struct StubProvider {
        outcome: fn() -> Result<Vec<Bar>, GatewayError>,
    }

    #[async_trait]
    impl HistoryProvider for StubProvider {
        fn id(&self) -> &'static str {
            "STUB"
        }

        async fn fetch_history(
            &self,
            _query_key: &str,
            _start: NaiveDate,
            _end: NaiveDate,
        ) -> Result<Vec<Bar>, GatewayError> {
            (self.outcome)()
        }
    }

    fn router_with(
        tw: fn() -> Result<Vec<Bar>, GatewayError>,
        us: fn() -> Result<Vec<Bar>, GatewayError>,
    ) -> Router {
        let governor = RequestGovernor::new(GovernorConfig {
            min_interval: Duration::ZERO,
        });
        let gateway = HistoryGateway::new(
            governor,
            Arc::new(StubProvider { outcome: tw }),
            Arc::new(StubProvider { outcome: us }),
        );
        app_router(Arc::new(AppState { gateway }))
    }

    fn sample_bars() -> Result<Vec<Bar>, GatewayError> {
        Ok(vec![Bar {
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            open: dec!(10),
            high: dec!(12),
            low: dec!(9),
            close: dec!(11),
            adj_close: dec!(11),
            volume: 1000,
        }])
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_history_returns_json_bar_array() {
        let router = router_with(sample_bars, || Ok(vec![]));
        let response = router
            .oneshot(
                Request::get("/history?symbol=2330&start=2024-01-01&end=2024-01-05")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let bars = json.as_array().unwrap();
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0]["date"], "2024-01-02");
        assert!(bars[0].get("adjClose").is_some());
    }

    #[tokio::test]
    async fn test_missing_symbol_is_a_structured_400() {
        let router = router_with(sample_bars, sample_bars);
        let response = router
            .oneshot(
                Request::get("/history?start=2024-01-01&end=2024-01-05")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "INVALID_SYMBOL");
    }

    #[tokio::test]
    async fn test_missing_dates_are_a_structured_400() {
        let router = router_with(sample_bars, sample_bars);
        let response = router
            .oneshot(
                Request::get("/history?symbol=AAPL")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "BAD_QUERY");
    }

    #[tokio::test]
    async fn test_upstream_failure_is_a_structured_502() {
        let router = router_with(
            || {
                Err(GatewayError::UpstreamUnavailable {
                    provider: "FINMIND".to_string(),
                    message: "HTTP 500".to_string(),
                })
            },
            sample_bars,
        );
        let response = router
            .oneshot(
                Request::get("/history?symbol=2330&start=2024-01-01&end=2024-01-05")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let json = body_json(response).await;
        assert_eq!(json["error"], "UPSTREAM_UNAVAILABLE");
        assert!(json["message"].as_str().unwrap().contains("FINMIND"));
    }

    #[tokio::test]
    async fn test_preflight_gets_empty_success_with_cors_headers() {
        let router = router_with(sample_bars, sample_bars);
        let response = router
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/history")
                    .header(header::ORIGIN, "https://example.com")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn test_undeserializable_query_is_a_structured_400() {
        // A repeated key fails the query deserializer; the response must
        // still be the JSON error shape, not axum's plain-text rejection.
        let router = router_with(sample_bars, sample_bars);
        let response = router
            .oneshot(
                Request::get("/history?symbol=AAPL&symbol=MSFT&start=2024-01-01&end=2024-01-05")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "BAD_QUERY");
    }

    #[tokio::test]
    async fn test_timeout_response_is_rewritten_to_json() {
        let bare = axum::response::Response::builder()
            .status(StatusCode::REQUEST_TIMEOUT)
            .body(Body::empty())
            .unwrap();

        let response = json_timeout(bare).await;
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
        let json = body_json(response).await;
        assert_eq!(json["error"], "TIMEOUT");
        assert!(json["message"].as_str().is_some());
    }

    #[tokio::test]
    async fn test_non_timeout_responses_pass_through_unchanged() {
        let ok = axum::response::Response::builder()
            .status(StatusCode::OK)
            .body(Body::from("ok"))
            .unwrap();

        let response = json_timeout(ok).await;
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"ok");
    }

    #[tokio::test]
    async fn test_error_responses_carry_cors_headers() {
        let router = router_with(sample_bars, sample_bars);
        let response = router
            .oneshot(
                Request::get("/history?symbol=+++&start=2024-01-01&end=2024-01-05")
                    .header(header::ORIGIN, "https://example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }
}
