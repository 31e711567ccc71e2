//! Completion 게이트웨이 포트 구현 어댑터.

use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use crate::application::ports::{CompletionGateway, GatewayFactory};
use crate::infrastructure::config::{Config, provider_settings, resolve_provider_api_key};
use crate::infrastructure::providers::ChatCompletionsGateway;

/// 설정으로부터 chat-completions 게이트웨이를 만드는 팩토리 어댑터.
pub struct ChatGatewayFactory;

impl GatewayFactory for ChatGatewayFactory {
    fn build(&self, config: &Config) -> Result<Arc<dyn CompletionGateway>> {
        let settings = provider_settings(&config.provider);
        if settings.credential.is_none() {
            // 키 없이도 기동은 한다. 이후 호출은 provider 인증 오류(500)로 끝난다.
            let source = resolve_provider_api_key(&config.provider).source;
            warn!(
                provider = %settings.name,
                source = source.as_deref().unwrap_or("none"),
                "completion API key is not configured"
            );
        }

        let gateway = ChatCompletionsGateway::new(&settings)?;
        info!(
            provider = %settings.name,
            model = %settings.model,
            endpoint = gateway.endpoint(),
            "completion gateway ready"
        );
        Ok(Arc::new(gateway))
    }
}
