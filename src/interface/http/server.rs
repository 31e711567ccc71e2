//! HTTP 리스너 기동과 종료 처리.

use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;
use tracing::{info, warn};

pub struct HttpServer {
    bind_address: String,
    router: Router,
}

impl HttpServer {
    pub fn new(bind_address: String, router: Router) -> Self {
        Self {
            bind_address,
            router,
        }
    }

    /// Ctrl-C를 받을 때까지 요청을 처리한다.
    pub async fn run(self) -> Result<()> {
        let listener = TcpListener::bind(&self.bind_address)
            .await
            .with_context(|| format!("failed to bind {}", self.bind_address))?;
        let local = listener
            .local_addr()
            .context("failed to read listener address")?;
        info!("Server running on http://{local}");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("http server terminated unexpectedly")
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(err) => {
            // 시그널 핸들러를 못 걸면 종료 신호 없이 계속 서빙한다.
            warn!(error = %err, "failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    }
}
