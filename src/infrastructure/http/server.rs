//! HTTP Server
//!
//! Axum HTTP 服务器启动和配置

use std::sync::Arc;

use axum::middleware;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use super::middleware::error_logging_middleware;
use super::routes::create_routes;
use super::state::AppState;
use crate::config::AppConfig;

/// 服务器配置
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from_app_config(&AppConfig::default())
    }
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// 监听所有网卡，端口取自 `KTOR_DEMO_HTTP_PORT`
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self::new("0.0.0.0", config.http_port())
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// HTTP 服务器
pub struct HttpServer {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl HttpServer {
    /// 创建新的 HTTP 服务器
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self {
            config,
            state: Arc::new(state),
        }
    }

    /// 构建 Router
    pub fn build_router(&self) -> Router {
        create_routes()
            .layer(middleware::from_fn(error_logging_middleware))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// 启动服务器（带优雅关闭）
    pub async fn run_with_shutdown<F>(self, shutdown_signal: F) -> Result<(), std::io::Error>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let router = self.build_router();
        let addr = self.config.addr();

        let listener = TcpListener::bind(&addr).await?;
        info!("HTTP server listening on {}", addr);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config_from_env;
    use crate::infrastructure::memory::InMemoryWidgetRepository;
    use axum::{body::Body, http::Request, http::StatusCode};
    use tower::util::ServiceExt;

    #[test]
    fn test_default_addr() {
        assert_eq!(ServerConfig::default().addr(), "0.0.0.0:9080");
    }

    #[test]
    fn test_port_from_app_config() {
        let app_config = load_config_from_env([("KTOR_DEMO_HTTP_PORT", "8081")]).unwrap();
        assert_eq!(
            ServerConfig::from_app_config(&app_config).addr(),
            "0.0.0.0:8081"
        );
    }

    #[tokio::test]
    async fn test_router_serves_ping() {
        let state = AppState::new(InMemoryWidgetRepository::new().arc());
        let server = HttpServer::new(ServerConfig::default(), state);

        let response = server
            .build_router()
            .oneshot(Request::builder().uri("/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_binds_and_shuts_down() {
        let state = AppState::new(InMemoryWidgetRepository::new().arc());
        // 端口 0 由系统分配
        let server = HttpServer::new(ServerConfig::new("127.0.0.1", 0), state);

        server.run_with_shutdown(async {}).await.unwrap();
    }
}
