//! 적용 설정 진단(inspection) 뷰 모델.

use anyhow::Result;
use serde::Serialize;

use super::loader::LoadedConfig;
use super::resolve::resolve_provider_api_key;
use crate::application::config::Config;
use crate::domain::catalog::PromptCatalog;

#[derive(Debug, Clone, Serialize)]
pub struct ConfigInspection {
    pub searched_paths: Vec<String>,
    pub loaded_paths: Vec<String>,
    pub server: ServerInspection,
    pub provider: ProviderInspection,
    pub operations: Vec<OperationInspection>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServerInspection {
    pub bind_address: String,
    pub static_dir: String,
    pub static_dir_exists: bool,
    pub index_exists: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProviderInspection {
    pub name: String,
    pub api_base: String,
    pub model: String,
    pub timeout_secs: Option<u64>,
    pub api_key_source: Option<String>,
    pub api_key_resolved: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct OperationInspection {
    pub route: String,
    pub response_field: String,
    pub prompt_overridden: bool,
}

impl ConfigInspection {
    /// 프롬프트 override가 잘못되었으면 서버 기동과 같은 오류를 돌려준다.
    pub(crate) fn from_loaded(loaded: LoadedConfig) -> Result<Self> {
        let config = &loaded.config;
        let catalog = PromptCatalog::builtin().with_overrides(&config.prompts)?;

        Ok(Self {
            searched_paths: loaded
                .searched_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            loaded_paths: loaded
                .loaded_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            server: server_inspection(config),
            provider: provider_inspection(config),
            operations: catalog
                .iter()
                .map(|spec| OperationInspection {
                    route: format!("POST /{}", spec.operation_id),
                    response_field: spec.response_field.clone(),
                    prompt_overridden: config.prompts.contains_key(&spec.operation_id),
                })
                .collect(),
        })
    }
}

fn server_inspection(config: &Config) -> ServerInspection {
    let static_dir = config.static_dir();
    ServerInspection {
        bind_address: config.bind_address(),
        static_dir_exists: static_dir.is_dir(),
        index_exists: static_dir.join("index.html").is_file(),
        static_dir: static_dir.display().to_string(),
    }
}

fn provider_inspection(config: &Config) -> ProviderInspection {
    // 키 값 자체는 절대 출력하지 않는다.
    let credential = resolve_provider_api_key(&config.provider);
    ProviderInspection {
        name: config.provider.name(),
        api_base: config.provider.api_base(),
        model: config.provider.model(),
        timeout_secs: config.provider.timeout_secs,
        api_key_source: credential.source,
        api_key_resolved: credential.credential.is_some(),
    }
}
