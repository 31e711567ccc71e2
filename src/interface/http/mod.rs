//! HTTP 인터페이스 모듈.
//! 카탈로그의 operation마다 `POST /<operation>` 라우트를 만들고,
//! 나머지 GET 요청은 SPA 정적 번들로 넘긴다.

mod handlers;
mod server;
mod static_files;

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::routing::{MethodRouter, post};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::application::ports::CompletionGateway;
use crate::domain::catalog::PromptCatalog;

pub use handlers::{INTERNAL_ERROR_MESSAGE, INVALID_JSON_MESSAGE, NO_CODE_MESSAGE};
pub use server::HttpServer;
pub use static_files::{INDEX_DOCUMENT, SpaService, spa_service};

/// 라우터가 공유하는 불변 상태. 요청 간 가변 상태는 없다.
#[derive(Clone)]
pub struct AppState {
    catalog: Arc<PromptCatalog>,
    gateway: Arc<dyn CompletionGateway>,
    /// provider 비정상 응답 시 돌려줄 일반 메시지(예: "Groq API call failed")
    upstream_error: Arc<str>,
}

impl AppState {
    pub fn new(
        catalog: PromptCatalog,
        gateway: Arc<dyn CompletionGateway>,
        provider_name: &str,
    ) -> Self {
        Self {
            catalog: Arc::new(catalog),
            gateway,
            upstream_error: format!("{provider_name} API call failed").into(),
        }
    }
}

pub fn build_router(state: AppState, static_dir: &Path) -> Router {
    let spa = spa_service(static_dir);
    let operation_ids: Vec<String> = state.catalog.operation_ids().map(str::to_string).collect();

    let mut router = Router::new();
    for operation_id in operation_ids {
        let path = format!("/{operation_id}");
        router = router.route(&path, operation_route(operation_id, spa.clone()));
    }

    router
        .fallback_service(spa)
        .layer(CatchPanicLayer::custom(handlers::panic_response))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// POST는 공통 핸들러로, 그 외 메서드(GET 등)는 SPA fallback으로 보낸다.
fn operation_route(operation_id: String, spa: SpaService) -> MethodRouter<AppState> {
    post(
        move |State(state): State<AppState>, headers: HeaderMap, body: Bytes| {
            let operation_id = operation_id.clone();
            async move { handlers::handle_operation(&state, &operation_id, &headers, &body).await }
        },
    )
    .fallback_service(spa)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use async_trait::async_trait;
    use axum::body::{Body, to_bytes};
    use axum::http::header::CONTENT_TYPE;
    use axum::http::{Request, StatusCode};
    use axum::response::Response;
    use futures::future::join_all;
    use mockito::Matcher;
    use serde_json::{Value, json};
    use tempfile::TempDir;
    use tower::ServiceExt;

    use super::*;
    use crate::application::config::ProviderSettings;
    use crate::domain::completion::{CompletionError, CompletionResult};
    use crate::infrastructure::providers::ChatCompletionsGateway;

    const INDEX_HTML: &str = "<!doctype html><div id=\"root\"></div>";
    const APP_JS: &str = "console.log('codehelper');";

    fn static_fixture() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(INDEX_DOCUMENT), INDEX_HTML).unwrap();
        fs::create_dir(dir.path().join("assets")).unwrap();
        fs::write(dir.path().join("assets").join("app.js"), APP_JS).unwrap();
        dir
    }

    fn upstream_gateway(server: &mockito::ServerGuard) -> Arc<dyn CompletionGateway> {
        let settings = ProviderSettings {
            name: "Groq".to_string(),
            api_base: server.url(),
            model: "llama-3.1-8b-instant".to_string(),
            credential: Some("gsk-test".to_string()),
            timeout: None,
        };
        Arc::new(ChatCompletionsGateway::new(&settings).unwrap())
    }

    fn router(gateway: Arc<dyn CompletionGateway>, static_dir: &Path) -> Router {
        build_router(
            AppState::new(PromptCatalog::builtin(), gateway, "Groq"),
            static_dir,
        )
    }

    fn post_json(path: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(path)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(path: &str) -> Request<Body> {
        Request::builder().uri(path).body(Body::empty()).unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn body_json(response: Response) -> Value {
        serde_json::from_str(&body_text(response).await).unwrap()
    }

    fn completion_body(text: &str) -> String {
        json!({
            "id": "chatcmpl-test",
            "object": "chat.completion",
            "choices": [
                { "index": 0, "message": { "role": "assistant", "content": text }, "finish_reason": "stop" }
            ]
        })
        .to_string()
    }

    fn expected_upstream_request(system_prompt: &str, code: &str) -> Value {
        json!({
            "model": "llama-3.1-8b-instant",
            "messages": [
                { "role": "system", "content": system_prompt },
                { "role": "user", "content": code }
            ]
        })
    }

    #[tokio::test]
    async fn each_operation_returns_only_its_response_field() {
        let mut server = mockito::Server::new_async().await;
        let static_dir = static_fixture();
        let code = "def add(a, b):\n    return a+b  # \"sum\"";
        let catalog = PromptCatalog::builtin();

        let mut mocks = Vec::new();
        for spec in catalog.iter() {
            let mock = server
                .mock("POST", "/chat/completions")
                .match_header("authorization", "Bearer gsk-test")
                .match_body(Matcher::Json(expected_upstream_request(&spec.system_prompt, code)))
                .with_status(200)
                .with_header("content-type", "application/json")
                .with_body(completion_body(&format!("reply for {}", spec.operation_id)))
                .expect(1)
                .create_async()
                .await;
            mocks.push(mock);
        }

        let app = router(upstream_gateway(&server), static_dir.path());
        for spec in catalog.iter() {
            let response = app
                .clone()
                .oneshot(post_json(&format!("/{}", spec.operation_id), json!({ "code": code })))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);

            let body = body_json(response).await;
            let object = body.as_object().unwrap();
            assert_eq!(object.len(), 1);
            assert_eq!(
                object[&spec.response_field],
                json!(format!("reply for {}", spec.operation_id))
            );
        }

        for mock in mocks {
            mock.assert_async().await;
        }
    }

    #[tokio::test]
    async fn missing_or_empty_code_is_rejected_without_outbound_call() {
        let mut server = mockito::Server::new_async().await;
        let static_dir = static_fixture();
        let mock = server
            .mock("POST", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let app = router(upstream_gateway(&server), static_dir.path());
        for operation_id in ["review", "describe", "clean", "debug", "foodreview"] {
            for payload in [json!({}), json!({ "code": "" })] {
                let response = app
                    .clone()
                    .oneshot(post_json(&format!("/{operation_id}"), payload))
                    .await
                    .unwrap();
                assert_eq!(response.status(), StatusCode::BAD_REQUEST);
                assert_eq!(body_json(response).await, json!({ "error": NO_CODE_MESSAGE }));
            }
        }

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_json_content_type_counts_as_missing_code() {
        let server = mockito::Server::new_async().await;
        let static_dir = static_fixture();
        let app = router(upstream_gateway(&server), static_dir.path());

        let request = Request::builder()
            .method("POST")
            .uri("/review")
            .header(CONTENT_TYPE, "text/plain")
            .body(Body::from(r#"{"code":"x"}"#))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({ "error": NO_CODE_MESSAGE }));
    }

    #[tokio::test]
    async fn malformed_json_body_is_a_client_error() {
        let server = mockito::Server::new_async().await;
        let static_dir = static_fixture();
        let app = router(upstream_gateway(&server), static_dir.path());

        let request = Request::builder()
            .method("POST")
            .uri("/debug")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from("{\"code\": "))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({ "error": INVALID_JSON_MESSAGE }));
    }

    #[tokio::test]
    async fn upstream_error_status_yields_generic_500() {
        let mut server = mockito::Server::new_async().await;
        let static_dir = static_fixture();
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(503)
            .with_body("upstream overloaded: internal-shard-7 trace=abc123")
            .create_async()
            .await;

        let app = router(upstream_gateway(&server), static_dir.path());
        let response = app
            .oneshot(post_json("/clean", json!({ "code": "let x = 1;" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let text = body_text(response).await;
        assert!(!text.contains("internal-shard-7"));
        assert_eq!(
            serde_json::from_str::<Value>(&text).unwrap(),
            json!({ "error": "Groq API call failed" })
        );
    }

    #[tokio::test]
    async fn malformed_success_response_yields_internal_error() {
        let mut server = mockito::Server::new_async().await;
        let static_dir = static_fixture();
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"object":"chat.completion","usage":{"total_tokens":3}}"#)
            .create_async()
            .await;

        let app = router(upstream_gateway(&server), static_dir.path());
        let response = app
            .oneshot(post_json("/review", json!({ "code": "x" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await, json!({ "error": INTERNAL_ERROR_MESSAGE }));
    }

    #[tokio::test]
    async fn concurrent_requests_get_independent_replies() {
        let mut server = mockito::Server::new_async().await;
        let static_dir = static_fixture();
        let catalog = PromptCatalog::builtin();

        let mut mocks = Vec::new();
        for spec in catalog.iter() {
            let code = format!("code for {}", spec.operation_id);
            let mock = server
                .mock("POST", "/chat/completions")
                .match_body(Matcher::Json(expected_upstream_request(&spec.system_prompt, &code)))
                .with_status(200)
                .with_body(completion_body(&format!("answer to {code}")))
                .expect(2)
                .create_async()
                .await;
            mocks.push(mock);
        }

        let app = router(upstream_gateway(&server), static_dir.path());
        let requests = catalog
            .iter()
            .chain(catalog.iter())
            .map(|spec| {
                let app = app.clone();
                let operation_id = spec.operation_id.clone();
                let field = spec.response_field.clone();
                async move {
                    let code = format!("code for {operation_id}");
                    let response = app
                        .oneshot(post_json(&format!("/{operation_id}"), json!({ "code": code })))
                        .await
                        .unwrap();
                    (code, field, response.status(), body_json(response).await)
                }
            });

        for (code, field, status, body) in join_all(requests).await {
            assert_eq!(status, StatusCode::OK);
            let object = body.as_object().unwrap();
            assert_eq!(object.len(), 1);
            assert_eq!(object[&field], json!(format!("answer to {code}")));
        }

        for mock in mocks {
            mock.assert_async().await;
        }
    }

    struct PanickingGateway;

    #[async_trait]
    impl CompletionGateway for PanickingGateway {
        async fn complete(&self, _system_prompt: &str, _user_content: &str) -> CompletionResult {
            panic!("gateway exploded");
        }
    }

    #[tokio::test]
    async fn panics_are_contained_as_internal_error() {
        let static_dir = static_fixture();
        let app = router(Arc::new(PanickingGateway), static_dir.path());

        let response = app
            .oneshot(post_json("/debug", json!({ "code": "x" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await, json!({ "error": INTERNAL_ERROR_MESSAGE }));
    }

    struct RejectingGateway;

    #[async_trait]
    impl CompletionGateway for RejectingGateway {
        async fn complete(&self, _system_prompt: &str, _user_content: &str) -> CompletionResult {
            Err(CompletionError::UpstreamFailure { status: 401 })
        }
    }

    #[tokio::test]
    async fn upstream_message_uses_configured_provider_name() {
        let static_dir = static_fixture();
        let state = AppState::new(PromptCatalog::builtin(), Arc::new(RejectingGateway), "Acme");
        let app = build_router(state, static_dir.path());

        let response = app
            .oneshot(post_json("/describe", json!({ "code": "x" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await, json!({ "error": "Acme API call failed" }));
    }

    #[tokio::test]
    async fn unknown_get_path_serves_spa_index() {
        let static_dir = static_fixture();
        let app = router(Arc::new(RejectingGateway), static_dir.path());

        for path in ["/", "/history/42", "/settings"] {
            let response = app.clone().oneshot(get(path)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK, "path {path}");
            assert_eq!(body_text(response).await, INDEX_HTML);
        }
    }

    #[tokio::test]
    async fn get_on_operation_route_falls_back_to_spa() {
        let static_dir = static_fixture();
        let app = router(Arc::new(RejectingGateway), static_dir.path());

        let response = app.oneshot(get("/review")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, INDEX_HTML);
    }

    #[tokio::test]
    async fn existing_static_asset_is_served() {
        let static_dir = static_fixture();
        let app = router(Arc::new(RejectingGateway), static_dir.path());

        let response = app.oneshot(get("/assets/app.js")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, APP_JS);
    }
}
