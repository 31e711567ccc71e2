//! 단건 completion 요청/결과 값 객체.
//! 모두 요청 범위에서만 살아 있고 요청 간에 공유되지 않는다.

use thiserror::Error;

/// 검증을 통과한 inbound 요청.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub operation_id: String,
    pub user_content: String,
}

impl CompletionRequest {
    /// `user_content`가 비어 있으면 요청을 만들지 않는다.
    pub fn new(operation_id: impl Into<String>, user_content: impl Into<String>) -> Option<Self> {
        let user_content = user_content.into();
        if user_content.is_empty() {
            return None;
        }
        Some(Self {
            operation_id: operation_id.into(),
            user_content,
        })
    }
}

/// 성공 응답: `{ <field>: <text> }` 형태로 직렬화된다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionReply {
    pub field: String,
    pub text: String,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CompletionError {
    /// provider가 2xx가 아닌 상태를 반환했다. 본문은 서버 로그에만 남긴다.
    #[error("completion provider returned status {status}")]
    UpstreamFailure { status: u16 },
    /// 2xx였지만 `choices[0].message.content`를 찾을 수 없다.
    #[error("malformed completion response: {0}")]
    MalformedUpstreamResponse(String),
    /// 요청 전송 또는 응답 본문 수신 자체가 실패했다.
    #[error("completion transport error: {0}")]
    Transport(String),
}

pub type CompletionResult = Result<String, CompletionError>;
