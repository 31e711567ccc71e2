//! 애플리케이션이 사용하는 설정 스키마(순수 데이터).
//!
//! 주의: 파일/환경변수 접근은 `infrastructure`에서만 수행한다.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_STATIC_DIR: &str = "CodeHelperDist";
pub const DEFAULT_PROVIDER_NAME: &str = "Groq";
pub const DEFAULT_API_BASE: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";
pub const DEFAULT_API_KEY_ENV: &str = "GROQ_API_KEY";

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// HTTP 서버 설정
    #[serde(default)]
    pub server: ServerConfig,
    /// completion provider 설정
    #[serde(default)]
    pub provider: ProviderConfig,
    /// operation별 시스템 프롬프트 override
    #[serde(default)]
    pub prompts: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    /// 빌드된 SPA 번들 디렉터리
    pub static_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ProviderConfig {
    /// 오류 메시지에 쓰이는 표시 이름
    pub name: Option<String>,
    /// OpenAI 호환 API base URL
    pub api_base: Option<String>,
    pub model: Option<String>,
    /// 인증 키(직접값, 권장하지 않음)
    pub api_key: Option<String>,
    /// 인증 키를 읽을 환경변수 이름
    pub api_key_env: Option<String>,
    /// 요청 타임아웃(초). 미지정이면 전송 계층 기본값을 따른다.
    pub timeout_secs: Option<u64>,
}

/// CLI에서 넘어온 서버 옵션(설정 파일보다 우선).
#[derive(Debug, Clone, Default)]
pub struct ServeOptions {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub static_dir: Option<PathBuf>,
}

/// 게이트웨이 생성에 필요한, 해석이 끝난 provider 설정.
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub name: String,
    pub api_base: String,
    pub model: String,
    pub credential: Option<String>,
    pub timeout: Option<Duration>,
}

impl Config {
    pub fn host(&self) -> String {
        self.server
            .host
            .clone()
            .unwrap_or_else(|| DEFAULT_HOST.to_string())
    }

    pub fn port(&self) -> u16 {
        self.server.port.unwrap_or(DEFAULT_PORT)
    }

    pub fn static_dir(&self) -> PathBuf {
        self.server
            .static_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR))
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host(), self.port())
    }

    /// 후순위(나중 파일) 값으로 덮어쓰는 병합 규칙.
    pub fn merge_from(&mut self, other: Config) {
        self.server.merge_from(other.server);
        self.provider.merge_from(other.provider);
        self.prompts.extend(other.prompts);
    }

    /// CLI 옵션을 마지막 우선순위로 반영한다.
    pub fn apply_serve_options(&mut self, options: &ServeOptions) {
        self.server.merge_from(ServerConfig {
            host: options.host.clone(),
            port: options.port,
            static_dir: options.static_dir.clone(),
        });
    }
}

impl ServerConfig {
    pub fn merge_from(&mut self, other: ServerConfig) {
        if other.host.is_some() {
            self.host = other.host;
        }
        if other.port.is_some() {
            self.port = other.port;
        }
        if other.static_dir.is_some() {
            self.static_dir = other.static_dir;
        }
    }
}

impl ProviderConfig {
    pub fn name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| DEFAULT_PROVIDER_NAME.to_string())
    }

    pub fn api_base(&self) -> String {
        self.api_base
            .clone()
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
    }

    pub fn model(&self) -> String {
        self.model.clone().unwrap_or_else(|| DEFAULT_MODEL.to_string())
    }

    /// 키 환경변수 이름(미지정 시 `GROQ_API_KEY`).
    pub fn api_key_env(&self) -> String {
        self.api_key_env
            .clone()
            .unwrap_or_else(|| DEFAULT_API_KEY_ENV.to_string())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn merge_from(&mut self, other: ProviderConfig) {
        if other.name.is_some() {
            self.name = other.name;
        }
        if other.api_base.is_some() {
            self.api_base = other.api_base;
        }
        if other.model.is_some() {
            self.model = other.model;
        }
        if other.api_key.is_some() {
            self.api_key = other.api_key;
        }
        if other.api_key_env.is_some() {
            self.api_key_env = other.api_key_env;
        }
        if other.timeout_secs.is_some() {
            self.timeout_secs = other.timeout_secs;
        }
    }
}
