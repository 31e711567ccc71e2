//! 설정 값(api key/env 등)을 실제 런타임 값으로 해석하는 유틸리티.
//!
//! - 환경변수 접근은 인프라 계층에서만 수행한다.

use std::env;

use crate::application::config::{ProviderConfig, ProviderSettings};

/// Provider(API key) 해석 결과.
#[derive(Debug, Clone)]
pub struct ProviderCredentialResolution {
    pub credential: Option<String>,
    pub source: Option<String>,
}

/// Provider API key를 해석한다. 직접값이 환경변수보다 우선한다.
pub fn resolve_provider_api_key(cfg: &ProviderConfig) -> ProviderCredentialResolution {
    resolve_with(cfg, |name| env::var(name).ok())
}

fn resolve_with(
    cfg: &ProviderConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> ProviderCredentialResolution {
    if let Some(key) = cfg.api_key.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
        return ProviderCredentialResolution {
            credential: Some(key.to_string()),
            source: Some("inline".to_string()),
        };
    }

    let env_name = cfg.api_key_env();
    let env_name = env_name.trim();
    if env_name.is_empty() {
        return ProviderCredentialResolution {
            credential: None,
            source: None,
        };
    }

    match lookup(env_name).map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => ProviderCredentialResolution {
            credential: Some(v),
            source: Some(format!("env:{env_name}")),
        },
        _ => ProviderCredentialResolution {
            credential: None,
            source: Some(format!("env:{env_name} (missing)")),
        },
    }
}

/// 게이트웨이 생성용 provider 설정을 확정한다.
pub fn provider_settings(cfg: &ProviderConfig) -> ProviderSettings {
    ProviderSettings {
        name: cfg.name(),
        api_base: cfg.api_base(),
        model: cfg.model(),
        credential: resolve_provider_api_key(cfg).credential,
        timeout: cfg.timeout(),
    }
}
