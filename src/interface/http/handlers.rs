//! operation 공통 POST 핸들러와 오류 envelope 변환.

use std::any::Any;

use axum::Json;
use axum::body::Bytes;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::{Map, Value, json};
use tracing::{debug, error};

use crate::application::usecases::complete_code::{CompleteCodeUseCase, HandleError};
use crate::domain::completion::CompletionReply;

use super::AppState;

pub const NO_CODE_MESSAGE: &str = "No code provided";
pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON body";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// 모든 operation 라우트가 공유하는 진입점.
pub(super) async fn handle_operation(
    state: &AppState,
    operation_id: &str,
    headers: &HeaderMap,
    body: &Bytes,
) -> Response {
    let payload = match parse_payload(headers, body) {
        Ok(payload) => payload,
        Err(err) => {
            debug!(operation = operation_id, error = %err, "rejecting malformed JSON body");
            return error_response(StatusCode::BAD_REQUEST, INVALID_JSON_MESSAGE);
        }
    };

    let usecase = CompleteCodeUseCase {
        catalog: &state.catalog,
        gateway: state.gateway.as_ref(),
    };

    match usecase.execute(operation_id, &payload).await {
        Ok(reply) => reply_response(reply),
        Err(HandleError::NoCode) => error_response(StatusCode::BAD_REQUEST, NO_CODE_MESSAGE),
        Err(HandleError::Upstream { status }) => {
            debug!(operation = operation_id, status, "upstream failure mapped to 500");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, &state.upstream_error)
        }
        Err(err @ (HandleError::UnknownOperation(_) | HandleError::Internal(_))) => {
            error!(operation = operation_id, error = %err, "Server error");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
        }
    }
}

/// JSON content type일 때만 본문을 해석한다. 그 외에는 빈 객체로 취급한다.
fn parse_payload(headers: &HeaderMap, body: &[u8]) -> Result<Value, serde_json::Error> {
    if !is_json_content_type(headers) || body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_slice(body)
}

fn is_json_content_type(headers: &HeaderMap) -> bool {
    let Some(value) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let essence = value.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
    essence == "application/json" || (essence.starts_with("application/") && essence.ends_with("+json"))
}

fn reply_response(reply: CompletionReply) -> Response {
    let mut body = Map::new();
    body.insert(reply.field, Value::String(reply.text));
    (StatusCode::OK, Json(Value::Object(body))).into_response()
}

pub(super) fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

/// 핸들러 내부 panic을 500 envelope으로 바꾼다.
pub(super) fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!(panic = detail, "Server error");
    error_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
}
