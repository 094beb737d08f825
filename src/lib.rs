//! widget-demo - 环境变量配置驱动的 Widget 服务
//!
//! 配置 (config/):
//! - 声明式配置表，启动时从 `KTOR_DEMO_*` 环境变量解析一次
//!
//! 应用层 (application/):
//! - Ports: Widget Repository 端口定义
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: Widget REST API
//! - Memory: Widget 仓储内存实现
//! - Persistence: PostgreSQL 存储

pub mod application;
pub mod config;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
