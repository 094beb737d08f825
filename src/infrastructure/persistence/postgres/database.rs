//! PostgreSQL Database - 数据库连接和迁移

use std::collections::HashSet;

use sqlx::migrate::{AppliedMigration, Migrate, MigrateError, Migrator};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{Executor, PgPool};

use crate::config::AppConfig;

/// 数据库名
pub const DATABASE_NAME: &str = "ktor-demo";

/// 数据库配置
#[derive(Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
    /// 最大连接数
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::from_app_config(&AppConfig::default())
    }
}

impl DatabaseConfig {
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            host: config.db_ip().to_string(),
            port: config.db_port(),
            username: config.db_user().to_string(),
            password: config.db_password().to_string(),
            database: DATABASE_NAME.to_string(),
            max_connections: 10,
        }
    }

    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.username)
            .password(&self.password)
            .database(&self.database)
    }
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

/// 数据库连接池
pub type DbPool = PgPool;

/// 访问真实数据库的测试共用一张表，需要串行执行
#[cfg(test)]
pub(super) static TEST_DB_LOCK: tokio::sync::Mutex<()> = tokio::sync::Mutex::const_new(());

/// 创建数据库连接池
pub async fn create_pool(config: &DatabaseConfig) -> Result<DbPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .after_connect(|conn, _meta| {
            Box::pin(async move {
                // 所有时间戳按 UTC 处理
                conn.execute("SET TIME ZONE 'UTC'").await?;
                Ok(())
            })
        })
        .connect_with(config.connect_options())
        .await?;

    tracing::info!(
        host = %config.host,
        port = config.port,
        database = %config.database,
        "PostgreSQL pool created"
    );

    Ok(pool)
}

/// 内嵌的数据库迁移（`migrations/` 目录，按版本号顺序执行）
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// 单个迁移的版本和描述
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationStatus {
    pub version: i64,
    pub description: String,
}

/// 迁移状态：已执行和待执行两部分，均按版本号排序
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationInfo {
    pub applied: Vec<MigrationStatus>,
    pub pending: Vec<MigrationStatus>,
}

impl MigrationInfo {
    /// 当前 schema 版本，即最后一个已执行的迁移
    pub fn current(&self) -> Option<i64> {
        self.applied.last().map(|m| m.version)
    }
}

/// 查询迁移状态
pub async fn migration_info(pool: &DbPool) -> Result<MigrationInfo, MigrateError> {
    let mut conn = pool.acquire().await?;
    conn.ensure_migrations_table().await?;
    let applied = conn.list_applied_migrations().await?;

    Ok(classify_migrations(&MIGRATOR, &applied))
}

fn classify_migrations(migrator: &Migrator, applied: &[AppliedMigration]) -> MigrationInfo {
    let applied: HashSet<i64> = applied.iter().map(|m| m.version).collect();
    let mut info = MigrationInfo::default();

    for migration in migrator.iter().filter(|m| !m.migration_type.is_down_migration()) {
        let status = MigrationStatus {
            version: migration.version,
            description: migration.description.to_string(),
        };
        if applied.contains(&migration.version) {
            info.applied.push(status);
        } else {
            info.pending.push(status);
        }
    }

    info
}

/// 运行数据库迁移
///
/// 只执行尚未执行的迁移，返回本次执行的数量
pub async fn run_migrations(pool: &DbPool) -> Result<usize, MigrateError> {
    let pending = migration_info(pool).await?.pending.len();
    MIGRATOR.run(pool).await?;

    let current = migration_info(pool).await?.current();
    match current {
        Some(version) => tracing::info!("Executed {} migrations, now at {}", pending, version),
        None => tracing::info!("Executed {} migrations", pending),
    }

    Ok(pending)
}
