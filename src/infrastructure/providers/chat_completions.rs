//! OpenAI 호환 chat-completions API(기본: Groq) 게이트웨이 어댑터.

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::debug;
use url::Url;

use crate::application::config::ProviderSettings;
use crate::application::ports::CompletionGateway;
use crate::domain::completion::CompletionResult;

use super::api_runner::{build_api_client, first_choice_content, send_json};

pub struct ChatCompletionsGateway {
    client: Client,
    endpoint: String,
    model: String,
    credential: Option<String>,
    provider_name: String,
}

impl ChatCompletionsGateway {
    /// 해석된 provider 설정으로 게이트웨이를 만든다. 키는 생성 시점에 고정된다.
    pub fn new(settings: &ProviderSettings) -> Result<Self> {
        let base = Url::parse(&settings.api_base)
            .with_context(|| format!("invalid provider api_base: {}", settings.api_base))?;
        if !matches!(base.scheme(), "http" | "https") {
            bail!("provider api_base must be http(s): {}", settings.api_base);
        }

        Ok(Self {
            client: build_api_client(settings.timeout),
            endpoint: format!("{}/chat/completions", settings.api_base.trim_end_matches('/')),
            model: settings.model.clone(),
            credential: settings.credential.clone(),
            provider_name: settings.name.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CompletionGateway for ChatCompletionsGateway {
    async fn complete(&self, system_prompt: &str, user_content: &str) -> CompletionResult {
        let payload = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system_prompt },
                { "role": "user", "content": user_content }
            ]
        });

        let mut request = self.client.post(&self.endpoint).json(&payload);
        if let Some(credential) = &self.credential {
            request = request.bearer_auth(credential);
        }

        debug!(provider = %self.provider_name, model = %self.model, "sending chat completion");
        let response = send_json(&self.provider_name, request).await?;
        first_choice_content(&response)
    }
}
