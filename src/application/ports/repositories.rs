//! Repository Ports - 出站端口
//!
//! 定义数据持久化的抽象接口
//! 具体实现在 infrastructure 层（PostgreSQL、内存）

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

/// Repository 错误
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

// ============================================================================
// Widget Repository
// ============================================================================

/// Widget 实体
///
/// 模型足够简单，直接作为 JSON 响应序列化
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetRecord {
    pub id: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Widget Repository Port
#[async_trait]
pub trait WidgetRepositoryPort: Send + Sync {
    /// 根据 ID 查找，不存在时返回 None
    async fn find_by_id(&self, id: i32) -> Result<Option<WidgetRecord>, RepositoryError>;

    /// 获取所有 widget，按创建顺序（最新的在最后）
    async fn find_all(&self) -> Result<Vec<WidgetRecord>, RepositoryError>;

    /// 创建 widget，ID 和创建时间由存储层生成
    async fn create(&self, name: &str) -> Result<WidgetRecord, RepositoryError>;

    /// 修改名称
    ///
    /// ID 不存在时返回 `RepositoryError::NotFound`
    async fn update_name(&self, id: i32, name: &str) -> Result<WidgetRecord, RepositoryError>;

    /// 名称首字母（大写）到 widget 数量的映射，按字母顺序
    async fn name_first_letter_counts(&self) -> Result<BTreeMap<String, i64>, RepositoryError>;
}

/// 名称首字母（大写），空名称返回空字符串
pub fn name_prefix(name: &str) -> String {
    name.chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_prefix() {
        assert_eq!(name_prefix("kangaroo"), "K");
        assert_eq!(name_prefix("KOALA"), "K");
        assert_eq!(name_prefix("échidna"), "É");
        assert_eq!(name_prefix(""), "");
    }

    #[test]
    fn test_widget_serializes_camel_case() {
        let widget = WidgetRecord {
            id: 3,
            name: "foo".to_string(),
            created_at: DateTime::parse_from_rfc3339("2024-01-02T03:04:05Z")
                .unwrap()
                .with_timezone(&Utc),
        };
        let json = serde_json::to_value(&widget).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 3,
                "name": "foo",
                "createdAt": "2024-01-02T03:04:05Z"
            })
        );
    }
}
