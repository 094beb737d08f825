//! Application State

use std::sync::Arc;

use crate::application::WidgetRepositoryPort;

/// 应用状态
pub struct AppState {
    pub widget_repo: Arc<dyn WidgetRepositoryPort>,
}

impl AppState {
    /// 创建应用状态
    pub fn new(widget_repo: Arc<dyn WidgetRepositoryPort>) -> Self {
        Self { widget_repo }
    }
}
