//! Provider HTTP API 호출 공용 유틸리티.

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use tracing::error;

use crate::domain::completion::CompletionError;

/// Provider API 호출용 HTTP 클라이언트를 생성한다.
/// 타임아웃이 지정되지 않으면 전송 계층 기본값을 그대로 쓴다.
pub fn build_api_client(timeout: Option<Duration>) -> Client {
    let mut builder = Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    // TLS 설정 실패 등 예외 상황에서는 기본 클라이언트로 폴백한다.
    builder.build().unwrap_or_else(|_| Client::new())
}

/// JSON 응답을 기대하는 요청을 한 번 전송하고 실패를 분류한다.
/// 비정상 상태의 원문 본문은 로그로만 남기고 호출자에게 넘기지 않는다.
pub async fn send_json(provider_name: &str, request: RequestBuilder) -> Result<Value, CompletionError> {
    let response = request.send().await.map_err(|err| {
        error!(provider = provider_name, error = %err, "failed to reach completion API");
        CompletionError::Transport(err.to_string())
    })?;

    let status = response.status();
    let body = response.text().await.map_err(|err| {
        error!(provider = provider_name, %status, error = %err, "failed to read completion response body");
        CompletionError::Transport(err.to_string())
    })?;

    if !status.is_success() {
        error!(provider = provider_name, %status, body = %body, "{provider_name} API error");
        return Err(CompletionError::UpstreamFailure {
            status: status.as_u16(),
        });
    }

    serde_json::from_str(&body).map_err(|err| {
        error!(provider = provider_name, error = %err, "completion response is not valid JSON");
        CompletionError::MalformedUpstreamResponse(format!("invalid JSON: {err}"))
    })
}

/// 첫 번째 choice의 메시지 본문을 꺼낸다.
pub fn first_choice_content(response: &Value) -> Result<String, CompletionError> {
    let choices = response
        .get("choices")
        .and_then(Value::as_array)
        .ok_or_else(|| CompletionError::MalformedUpstreamResponse("missing choices array".to_string()))?;

    let first = choices
        .first()
        .ok_or_else(|| CompletionError::MalformedUpstreamResponse("empty choices array".to_string()))?;

    first
        .pointer("/message/content")
        .and_then(Value::as_str)
        .map(ToString::to_string)
        .ok_or_else(|| {
            CompletionError::MalformedUpstreamResponse("missing choices[0].message.content".to_string())
        })
}
