//! PostgreSQL Widget Repository

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::DbPool;
use crate::application::ports::{RepositoryError, WidgetRecord, WidgetRepositoryPort};

/// PostgreSQL Widget Repository
pub struct PgWidgetRepository {
    pool: DbPool,
}

impl PgWidgetRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct WidgetRow {
    id: i32,
    name: String,
    created_at: DateTime<Utc>,
}

impl From<WidgetRow> for WidgetRecord {
    fn from(row: WidgetRow) -> Self {
        WidgetRecord {
            id: row.id,
            name: row.name,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl WidgetRepositoryPort for PgWidgetRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<WidgetRecord>, RepositoryError> {
        let row: Option<WidgetRow> = sqlx::query_as(
            "SELECT id, name, created_at FROM widgets WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(row.map(WidgetRecord::from))
    }

    async fn find_all(&self) -> Result<Vec<WidgetRecord>, RepositoryError> {
        let rows: Vec<WidgetRow> = sqlx::query_as(
            "SELECT id, name, created_at FROM widgets ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(WidgetRecord::from).collect())
    }

    async fn create(&self, name: &str) -> Result<WidgetRecord, RepositoryError> {
        // id 和 created_at 由数据库生成，用 RETURNING 一次取回
        let row: WidgetRow = sqlx::query_as(
            "INSERT INTO widgets (name) VALUES ($1) RETURNING id, name, created_at",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(row.into())
    }

    async fn update_name(&self, id: i32, name: &str) -> Result<WidgetRecord, RepositoryError> {
        let row: Option<WidgetRow> = sqlx::query_as(
            "UPDATE widgets SET name = $1 WHERE id = $2 RETURNING id, name, created_at",
        )
        .bind(name)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        row.map(WidgetRecord::from)
            .ok_or_else(|| RepositoryError::NotFound(format!("widget {}", id)))
    }

    async fn name_first_letter_counts(&self) -> Result<BTreeMap<String, i64>, RepositoryError> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            r#"
            SELECT prefix, count(*) AS count
            FROM (SELECT upper(left(name, 1)) AS prefix FROM widgets) AS prefixes
            GROUP BY prefix
            ORDER BY prefix
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().collect())
    }
}
