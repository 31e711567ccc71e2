//! 코드 + persona 프롬프트를 provider로 전달하는 단건 유스케이스.
//!
//! 모든 operation이 같은 흐름을 공유한다:
//! `code` 검증 → 카탈로그 조회 → 게이트웨이 호출 → 결과 분류.

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error};

use crate::application::ports::CompletionGateway;
use crate::domain::catalog::PromptCatalog;
use crate::domain::completion::{CompletionError, CompletionReply, CompletionRequest};

/// 핸들러 경계에서 HTTP 응답으로 변환되는 실패 분류.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HandleError {
    /// `code`가 없거나 비어 있음(클라이언트 오류)
    #[error("no code provided")]
    NoCode,
    /// 라우팅과 카탈로그가 어긋난 경우
    #[error("unknown operation: {0}")]
    UnknownOperation(String),
    /// provider가 비정상 상태를 반환
    #[error("upstream call failed with status {status}")]
    Upstream { status: u16 },
    #[error("internal error: {0}")]
    Internal(String),
}

pub struct CompleteCodeUseCase<'a> {
    pub catalog: &'a PromptCatalog,
    pub gateway: &'a dyn CompletionGateway,
}

impl<'a> CompleteCodeUseCase<'a> {
    pub async fn execute(
        &self,
        operation_id: &str,
        payload: &Value,
    ) -> Result<CompletionReply, HandleError> {
        let request = extract_request(operation_id, payload).ok_or(HandleError::NoCode)?;

        let Some(spec) = self.catalog.lookup(&request.operation_id) else {
            error!(operation = operation_id, "no prompt registered for operation");
            return Err(HandleError::UnknownOperation(operation_id.to_string()));
        };

        debug!(
            operation = operation_id,
            code_len = request.user_content.len(),
            "dispatching completion"
        );

        match self
            .gateway
            .complete(&spec.system_prompt, &request.user_content)
            .await
        {
            Ok(text) => Ok(CompletionReply {
                field: spec.response_field.clone(),
                text,
            }),
            Err(CompletionError::UpstreamFailure { status }) => {
                Err(HandleError::Upstream { status })
            }
            Err(err) => Err(HandleError::Internal(err.to_string())),
        }
    }
}

/// payload에서 `code`를 꺼낸다. 문자열이 아니거나 비어 있으면 `None`.
fn extract_request(operation_id: &str, payload: &Value) -> Option<CompletionRequest> {
    let code = payload.get("code")?.as_str()?;
    CompletionRequest::new(operation_id, code)
}
