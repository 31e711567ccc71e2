//! 애플리케이션 계층이 의존하는 포트(추상 인터페이스) 모음.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::application::config::Config;
use crate::domain::completion::CompletionResult;

/// 설정 로딩/점검을 담당하는 저장소 포트.
pub trait ConfigRepository: Send + Sync {
    fn load(&self) -> Result<Config>;
    fn inspect_pretty_json(&self) -> Result<String>;
}

/// 원격 completion provider 호출 포트.
/// 호출당 정확히 한 번의 outbound 요청을 보내며 재시도/캐시는 없다.
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    async fn complete(&self, system_prompt: &str, user_content: &str) -> CompletionResult;
}

/// 설정에 맞는 completion 게이트웨이를 생성하는 팩토리 포트.
pub trait GatewayFactory: Send + Sync {
    fn build(&self, config: &Config) -> Result<Arc<dyn CompletionGateway>>;
}
