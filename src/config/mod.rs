//! Configuration Module
//!
//! 环境变量驱动的配置：
//! - schema: 声明式配置表（环境变量名、类型、默认值、访问器）
//! - loader: 启动时按配置表解析一次
//! - types: 解析完成后的只读配置

mod loader;
mod schema;
mod types;

pub use loader::{load_config, load_config_from_env, print_config, ConfigError};
pub use schema::{
    find_setting, Setting, SettingKind, SettingType, SettingValue, ENV_PREFIX, SETTINGS,
};
pub use types::AppConfig;
