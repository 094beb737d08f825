//! Widget HTTP Handlers

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};

use crate::application::WidgetRecord;
use crate::infrastructure::http::dto::{NewWidgetRequest, RenameWidgetQuery};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 获取 widget 详情
pub async fn get_widget(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<WidgetRecord>, ApiError> {
    let Path(id) = path?;
    tracing::debug!(widget_id = id, "Loading widget");

    state
        .widget_repo
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Widget {} not found", id)))
}

/// 修改 widget 名称
pub async fn rename_widget(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
    query: Result<Query<RenameWidgetQuery>, QueryRejection>,
) -> Result<Json<WidgetRecord>, ApiError> {
    let Path(id) = path?;
    let Query(query) = query?;
    let name = query
        .name
        .ok_or_else(|| ApiError::BadRequest("Query parameter 'name' is required".to_string()))?;

    let widget = state.widget_repo.update_name(id, &name).await?;

    tracing::info!(widget_id = widget.id, name = %widget.name, "Widget renamed");

    Ok(Json(widget))
}

/// 获取所有 widget
pub async fn list_widgets(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<WidgetRecord>>, ApiError> {
    let widgets = state.widget_repo.find_all().await?;
    Ok(Json(widgets))
}

/// 创建 widget
pub async fn create_widget(
    State(state): State<Arc<AppState>>,
    body: Result<Json<NewWidgetRequest>, JsonRejection>,
) -> Result<Json<WidgetRecord>, ApiError> {
    let Json(req) = body?;
    let widget = state.widget_repo.create(&req.name).await?;

    tracing::info!(widget_id = widget.id, name = %widget.name, "Widget created");

    Ok(Json(widget))
}

/// 按名称首字母统计 widget 数量
pub async fn widget_first_letter_counts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<BTreeMap<String, i64>>, ApiError> {
    let counts = state.widget_repo.name_first_letter_counts().await?;
    Ok(Json(counts))
}
