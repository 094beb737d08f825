//! Configuration Schema
//!
//! 声明式配置表：每一项配置对应一个环境变量、一个类型和一个默认值
//!
//! | 访问器      | 环境变量              | 类型    | 默认值    |
//! |-------------|-----------------------|---------|-----------|
//! | db_ip       | KTOR_DEMO_DB_IP       | string  | 127.0.0.1 |
//! | db_port     | KTOR_DEMO_DB_PORT     | integer | 25432     |
//! | db_user     | KTOR_DEMO_DB_USER     | string  | local-dev |
//! | db_password | KTOR_DEMO_DB_PASSWORD | string  | local-dev |
//! | http_port   | KTOR_DEMO_HTTP_PORT   | integer | 9080      |

use std::fmt;

use super::loader::ConfigError;

/// 环境变量前缀
pub const ENV_PREFIX: &str = "KTOR_DEMO";

/// 配置值类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKind {
    /// 任意字符串
    String,
    /// 端口号范围内的整数（0-65535）
    Integer,
}

impl SettingKind {
    /// 错误信息中使用的类型描述
    pub fn expected(&self) -> &'static str {
        match self {
            SettingKind::String => "string",
            SettingKind::Integer => "integer (0-65535)",
        }
    }
}

impl fmt::Display for SettingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.expected())
    }
}

/// 单个配置项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Setting {
    /// 环境变量名
    pub key: &'static str,
    /// 值类型
    pub kind: SettingKind,
    /// 默认值字面量
    pub default: &'static str,
    /// 访问器名称，同时也是 config 中的属性名
    pub accessor: &'static str,
}

/// 解析后的配置值
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingValue {
    String(String),
    Integer(u16),
}

impl Setting {
    /// 按声明类型解析原始字符串
    pub fn parse(&self, raw: &str) -> Result<SettingValue, ConfigError> {
        match self.kind {
            SettingKind::String => Some(SettingValue::String(raw.to_string())),
            SettingKind::Integer => raw.parse().ok().map(SettingValue::Integer),
        }
        .ok_or_else(|| ConfigError::parse(self, raw))
    }
}

/// 可以作为配置值的 Rust 类型
pub trait SettingType: Sized {
    const KIND: SettingKind;

    /// 从已解析的值中取出，类型不符时返回 None
    fn from_value(value: SettingValue) -> Option<Self>;
}

impl SettingType for String {
    const KIND: SettingKind = SettingKind::String;

    fn from_value(value: SettingValue) -> Option<Self> {
        match value {
            SettingValue::String(s) => Some(s),
            SettingValue::Integer(_) => None,
        }
    }
}

impl SettingType for u16 {
    const KIND: SettingKind = SettingKind::Integer;

    fn from_value(value: SettingValue) -> Option<Self> {
        match value {
            SettingValue::Integer(n) => Some(n),
            SettingValue::String(_) => None,
        }
    }
}

pub const DB_IP: Setting = Setting {
    key: "KTOR_DEMO_DB_IP",
    kind: SettingKind::String,
    default: "127.0.0.1",
    accessor: "db_ip",
};

pub const DB_PORT: Setting = Setting {
    key: "KTOR_DEMO_DB_PORT",
    kind: SettingKind::Integer,
    default: "25432",
    accessor: "db_port",
};

pub const DB_USER: Setting = Setting {
    key: "KTOR_DEMO_DB_USER",
    kind: SettingKind::String,
    default: "local-dev",
    accessor: "db_user",
};

pub const DB_PASSWORD: Setting = Setting {
    key: "KTOR_DEMO_DB_PASSWORD",
    kind: SettingKind::String,
    default: "local-dev",
    accessor: "db_password",
};

pub const HTTP_PORT: Setting = Setting {
    key: "KTOR_DEMO_HTTP_PORT",
    kind: SettingKind::Integer,
    default: "9080",
    accessor: "http_port",
};

/// 所有已识别的配置项（按声明顺序）
pub static SETTINGS: [Setting; 5] = [DB_IP, DB_PORT, DB_USER, DB_PASSWORD, HTTP_PORT];

/// 根据环境变量名查找配置项
pub fn find_setting(key: &str) -> Option<&'static Setting> {
    SETTINGS.iter().find(|s| s.key == key)
}
