//! Data Transfer Objects

use serde::{Deserialize, Serialize};

// ============================================================================
// Widget DTOs
// ============================================================================

/// POST /widgets 请求体，多余字段忽略
#[derive(Debug, Deserialize)]
pub struct NewWidgetRequest {
    pub name: String,
}

/// PUT /widgets/id/:id 查询参数
#[derive(Debug, Deserialize)]
pub struct RenameWidgetQuery {
    pub name: Option<String>,
}

// ============================================================================
// Ping
// ============================================================================

/// Ping 响应
#[derive(Debug, Serialize)]
pub struct PingResponse {
    pub status: &'static str,
    pub version: &'static str,
}
