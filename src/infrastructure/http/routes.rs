//! HTTP Routes
//!
//! API Endpoints:
//! - /ping                              GET   健康检查
//! - /widgets                           POST  创建 widget
//! - /widgets/all                       GET   列出所有 widget
//! - /widgets/id/:id                    GET   获取 widget
//! - /widgets/id/:id?name=...           PUT   修改 widget 名称
//! - /widgets/first-letter-counts       GET   按名称首字母统计

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::error::ApiError;
use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .merge(widget_routes())
        .fallback(route_not_found)
}

async fn route_not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("No route for {}", uri.path()))
}

/// Widget 路由
fn widget_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/widgets", post(handlers::create_widget))
        .route("/widgets/all", get(handlers::list_widgets))
        .route(
            "/widgets/id/:id",
            get(handlers::get_widget).put(handlers::rename_widget),
        )
        .route(
            "/widgets/first-letter-counts",
            get(handlers::widget_first_letter_counts),
        )
}
