//! Configuration Types
//!
//! 解析完成后的只读配置

use std::fmt;

use super::schema::{DB_IP, DB_PASSWORD, DB_PORT, DB_USER, HTTP_PORT};

/// 应用配置
///
/// 启动时由 [`load_config`](super::load_config) 构造一次，之后只读。
/// 字段私有，只能通过访问器读取。
#[derive(Clone, PartialEq, Eq)]
pub struct AppConfig {
    db_ip: String,
    db_port: u16,
    db_user: String,
    db_password: String,
    http_port: u16,
}

impl AppConfig {
    pub(super) fn new(
        db_ip: String,
        db_port: u16,
        db_user: String,
        db_password: String,
        http_port: u16,
    ) -> Self {
        Self {
            db_ip,
            db_port,
            db_user,
            db_password,
            http_port,
        }
    }

    /// 数据库主机地址（`KTOR_DEMO_DB_IP`）
    pub fn db_ip(&self) -> &str {
        &self.db_ip
    }

    /// 数据库端口（`KTOR_DEMO_DB_PORT`）
    pub fn db_port(&self) -> u16 {
        self.db_port
    }

    /// 数据库用户名（`KTOR_DEMO_DB_USER`）
    pub fn db_user(&self) -> &str {
        &self.db_user
    }

    /// 数据库密码（`KTOR_DEMO_DB_PASSWORD`）
    pub fn db_password(&self) -> &str {
        &self.db_password
    }

    /// HTTP 监听端口（`KTOR_DEMO_HTTP_PORT`）
    pub fn http_port(&self) -> u16 {
        self.http_port
    }
}

/// 全部使用默认值的配置
impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_ip: DB_IP.default.to_string(),
            db_port: 25432,
            db_user: DB_USER.default.to_string(),
            db_password: DB_PASSWORD.default.to_string(),
            http_port: 9080,
        }
    }
}

// 密码不出现在日志里
impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field(DB_IP.accessor, &self.db_ip)
            .field(DB_PORT.accessor, &self.db_port)
            .field(DB_USER.accessor, &self.db_user)
            .field(DB_PASSWORD.accessor, &"<redacted>")
            .field(HTTP_PORT.accessor, &self.http_port)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.db_ip(), "127.0.0.1");
        assert_eq!(config.db_port(), 25432);
        assert_eq!(config.db_user(), "local-dev");
        assert_eq!(config.db_password(), "local-dev");
        assert_eq!(config.http_port(), 9080);
    }

    #[test]
    fn test_default_matches_schema_literals() {
        let config = AppConfig::default();
        assert_eq!(config.db_port().to_string(), DB_PORT.default);
        assert_eq!(config.http_port().to_string(), HTTP_PORT.default);
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = AppConfig::new(
            "db.internal".to_string(),
            5432,
            "svc".to_string(),
            "hunter2".to_string(),
            8080,
        );
        let rendered = format!("{:?}", config);
        assert!(rendered.contains("db.internal"));
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("hunter2"));
    }
}
