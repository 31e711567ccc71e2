//! 애플리케이션 조립(composition root) 모듈.

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::application::config::ServeOptions;
use crate::application::ports::{ConfigRepository, GatewayFactory};
use crate::application::usecases::inspect_config::InspectConfigUseCase;
use crate::domain::catalog::PromptCatalog;
use crate::infrastructure::adapters::{ChatGatewayFactory, JsonConfigRepository};
use crate::interface::http::{AppState, HttpServer, INDEX_DOCUMENT, build_router};

/// 실행 시점 의존성을 한 곳에서 조립하는 컨테이너.
pub struct AppComposition {
    config_repo: JsonConfigRepository,
    gateway_factory: ChatGatewayFactory,
}

impl Default for AppComposition {
    fn default() -> Self {
        Self {
            config_repo: JsonConfigRepository,
            gateway_factory: ChatGatewayFactory,
        }
    }
}

impl AppComposition {
    /// 설정 점검 유스케이스를 생성한다.
    pub fn inspect_config_usecase(&self) -> InspectConfigUseCase<'_> {
        InspectConfigUseCase {
            config_repo: &self.config_repo,
        }
    }

    /// 설정을 한 번 읽어 고정하고 HTTP 서버를 조립한다.
    pub fn http_server(&self, options: &ServeOptions) -> Result<HttpServer> {
        let mut config = self.config_repo.load()?;
        config.apply_serve_options(options);

        let catalog = PromptCatalog::builtin()
            .with_overrides(&config.prompts)
            .context("invalid prompt override in config")?;
        let gateway = self.gateway_factory.build(&config)?;

        let static_dir = config.static_dir();
        if !static_dir.join(INDEX_DOCUMENT).is_file() {
            warn!(
                static_dir = %static_dir.display(),
                "SPA index document not found; GET fallback will return 404"
            );
        }
        info!(
            static_dir = %static_dir.display(),
            operations = catalog.len(),
            "routes ready"
        );

        let state = AppState::new(catalog, gateway, &config.provider.name());
        Ok(HttpServer::new(
            config.bind_address(),
            build_router(state, &static_dir),
        ))
    }
}
