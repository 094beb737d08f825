//! HTTP Middleware
//!
//! 记录 4xx / 5xx 响应及其耗时

use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};

/// HTTP 状态码错误日志中间件
///
/// 5xx 记为 error，4xx 记为 warn，其余不记录（TraceLayer 已经记录了请求）
pub async fn error_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            uri = %uri,
            status = status.as_u16(),
            elapsed_ms,
            "HTTP server error"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            method = %method,
            uri = %uri,
            status = status.as_u16(),
            elapsed_ms,
            "HTTP client error"
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        routing::get,
        Router,
    };
    use tower::util::ServiceExt;

    fn router_returning(status: StatusCode) -> Router {
        Router::new()
            .route("/", get(move || async move { status }))
            .layer(axum::middleware::from_fn(error_logging_middleware))
    }

    async fn call(status: StatusCode) -> StatusCode {
        let request = HttpRequest::builder().uri("/").body(Body::empty()).unwrap();
        router_returning(status)
            .oneshot(request)
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_status_passes_through() {
        for status in [
            StatusCode::OK,
            StatusCode::NOT_FOUND,
            StatusCode::INTERNAL_SERVER_ERROR,
        ] {
            assert_eq!(call(status).await, status);
        }
    }
}
