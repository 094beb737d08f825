//! In-Memory Widget Repository
//!
//! 不需要真实数据库的测试使用的朴素实现

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use crate::application::ports::{name_prefix, RepositoryError, WidgetRecord, WidgetRepositoryPort};

/// 内存 Widget 仓储
pub struct InMemoryWidgetRepository {
    widgets: DashMap<i32, WidgetRecord>,
    next_id: AtomicI32,
}

impl InMemoryWidgetRepository {
    pub fn new() -> Self {
        Self {
            widgets: DashMap::new(),
            // 与 SERIAL 一致，从 1 开始
            next_id: AtomicI32::new(1),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl Default for InMemoryWidgetRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WidgetRepositoryPort for InMemoryWidgetRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<WidgetRecord>, RepositoryError> {
        Ok(self.widgets.get(&id).map(|w| w.value().clone()))
    }

    async fn find_all(&self) -> Result<Vec<WidgetRecord>, RepositoryError> {
        let mut widgets: Vec<WidgetRecord> = self
            .widgets
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        widgets.sort_by_key(|w| w.id);
        Ok(widgets)
    }

    async fn create(&self, name: &str) -> Result<WidgetRecord, RepositoryError> {
        let widget = WidgetRecord {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            name: name.to_string(),
            created_at: Utc::now(),
        };
        self.widgets.insert(widget.id, widget.clone());
        tracing::debug!(widget_id = widget.id, "Widget created");
        Ok(widget)
    }

    async fn update_name(&self, id: i32, name: &str) -> Result<WidgetRecord, RepositoryError> {
        let mut widget = self
            .widgets
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::NotFound(format!("widget {}", id)))?;
        widget.name = name.to_string();
        tracing::debug!(widget_id = id, "Widget renamed");
        Ok(widget.clone())
    }

    async fn name_first_letter_counts(&self) -> Result<BTreeMap<String, i64>, RepositoryError> {
        let mut counts = BTreeMap::new();
        for entry in self.widgets.iter() {
            *counts.entry(name_prefix(&entry.name)).or_insert(0) += 1;
        }
        Ok(counts)
    }
}
