//! Configuration Loader
//!
//! 按配置表逐项解析环境变量，启动时执行一次
//!
//! 优先级（从高到低）：
//! 1. 环境变量（非空）
//! 2. 配置表中的默认值

use std::env::{self, VarError};

use config::{Config, ConfigError as ConfigCrateError, Environment, Map};
use thiserror::Error;

use super::schema::{
    find_setting, Setting, SettingType, DB_IP, DB_PASSWORD, DB_PORT, DB_USER, ENV_PREFIX,
    HTTP_PORT, SETTINGS,
};
use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    /// 环境变量存在但无法转换为声明的类型
    #[error("Invalid value for {key}: {value:?} is not a valid {expected}")]
    ParseError {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

impl ConfigError {
    pub(super) fn parse(setting: &Setting, raw: &str) -> Self {
        ConfigError::ParseError {
            key: setting.key,
            value: raw.to_string(),
            expected: setting.kind.expected(),
        }
    }
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 从进程环境变量加载配置
///
/// # 环境变量
/// - `KTOR_DEMO_DB_IP`
/// - `KTOR_DEMO_DB_PORT`
/// - `KTOR_DEMO_DB_USER`
/// - `KTOR_DEMO_DB_PASSWORD`
/// - `KTOR_DEMO_HTTP_PORT`
///
/// 只按上述变量名精确读取（大小写敏感），空字符串视为未设置。
///
/// # 返回
/// - `Ok(AppConfig)` - 成功加载的配置
/// - `Err(ConfigError)` - 某个环境变量无法解析为声明的类型
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let mut vars = Map::new();
    for setting in SETTINGS.iter() {
        match env::var(setting.key) {
            Ok(value) => {
                vars.insert(setting.key.to_string(), value);
            }
            Err(VarError::NotPresent) => {}
            Err(VarError::NotUnicode(raw)) => {
                return Err(ConfigError::parse(setting, &raw.to_string_lossy()));
            }
        }
    }
    load_from_source(vars)
}

/// 从给定的键值表加载配置，不读取真实的进程环境
///
/// 与 [`load_config`] 相同，只有变量名与配置表完全一致的条目生效。
pub fn load_config_from_env<I, K, V>(vars: I) -> Result<AppConfig, ConfigError>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let vars: Map<String, String> = vars
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .filter(|(k, _)| find_setting(k).is_some())
        .collect();
    load_from_source(vars)
}

fn load_from_source(vars: Map<String, String>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    for setting in SETTINGS.iter() {
        builder = builder.set_default(setting.accessor, setting.default)?;
    }

    // 2. 环境变量
    // 传入的变量已按配置表精确筛选，KTOR_DEMO_DB_PORT -> db_port
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .ignore_empty(true)
            .source(Some(vars)),
    );

    let config = builder.build()?;

    // 3. 按类型逐项解析，任何一项失败都中止加载
    Ok(AppConfig::new(
        resolve(&config, &DB_IP)?,
        resolve(&config, &DB_PORT)?,
        resolve(&config, &DB_USER)?,
        resolve(&config, &DB_PASSWORD)?,
        resolve(&config, &HTTP_PORT)?,
    ))
}

fn resolve<T: SettingType>(config: &Config, setting: &Setting) -> Result<T, ConfigError> {
    let raw = config.get_string(setting.accessor)?;
    let value = setting.parse(&raw)?;

    T::from_value(value).ok_or_else(|| {
        ConfigError::LoadError(format!(
            "{} is declared as {} but read as {}",
            setting.key,
            setting.kind,
            T::KIND
        ))
    })
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Database: {}:{}", config.db_ip(), config.db_port());
    tracing::info!("Database User: {}", config.db_user());
    tracing::info!("Database Password: <redacted>");
    tracing::info!("HTTP Port: {}", config.http_port());
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        load_config_from_env(vars.iter().map(|(k, v)| (k.to_string(), v.to_string())))
    }

    #[test]
    fn test_no_variables_yields_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.db_ip(), "127.0.0.1");
        assert_eq!(config.db_port(), 25432);
        assert_eq!(config.db_user(), "local-dev");
        assert_eq!(config.db_password(), "local-dev");
        assert_eq!(config.http_port(), 9080);
    }

    #[test]
    fn test_every_variable_overrides_its_default() {
        let config = load(&[
            ("KTOR_DEMO_DB_IP", "10.0.0.7"),
            ("KTOR_DEMO_DB_PORT", "5432"),
            ("KTOR_DEMO_DB_USER", "widgets"),
            ("KTOR_DEMO_DB_PASSWORD", "s3cret"),
            ("KTOR_DEMO_HTTP_PORT", "8081"),
        ])
        .unwrap();

        assert_eq!(config.db_ip(), "10.0.0.7");
        assert_eq!(config.db_port(), 5432);
        assert_eq!(config.db_user(), "widgets");
        assert_eq!(config.db_password(), "s3cret");
        assert_eq!(config.http_port(), 8081);
    }

    #[test]
    fn test_single_override_leaves_other_defaults() {
        let config = load(&[("KTOR_DEMO_HTTP_PORT", "8000")]).unwrap();
        assert_eq!(config.http_port(), 8000);
        assert_eq!(config.db_port(), 25432);
        assert_eq!(config.db_ip(), "127.0.0.1");
    }

    #[test]
    fn test_explicit_value_matching_default() {
        let config = load(&[("KTOR_DEMO_DB_PORT", "25432")]).unwrap();
        assert_eq!(config.db_port(), 25432);
    }

    #[test]
    fn test_non_numeric_port_fails() {
        let err = load(&[("KTOR_DEMO_DB_PORT", "not-a-number")]).unwrap_err();
        match err {
            ConfigError::ParseError {
                key,
                value,
                expected,
            } => {
                assert_eq!(key, "KTOR_DEMO_DB_PORT");
                assert_eq!(value, "not-a-number");
                assert_eq!(expected, "integer (0-65535)");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_error_message_names_key_value_and_type() {
        let err = load(&[("KTOR_DEMO_HTTP_PORT", "99999")]).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("KTOR_DEMO_HTTP_PORT"));
        assert!(message.contains("99999"));
        assert!(message.contains("integer"));
    }

    #[test]
    fn test_empty_value_counts_as_unset() {
        let config = load(&[("KTOR_DEMO_DB_PORT", ""), ("KTOR_DEMO_DB_USER", "")]).unwrap();
        assert_eq!(config.db_port(), 25432);
        assert_eq!(config.db_user(), "local-dev");
    }

    #[test]
    fn test_unrelated_variables_are_ignored() {
        let config = load(&[
            ("KTOR_DEMO_UNKNOWN", "whatever"),
            ("DB_PORT", "1"),
            ("HTTP_PORT", "not-a-number"),
        ])
        .unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        let config = load(&[
            ("ktor_demo_http_port", "8081"),
            ("Ktor_Demo_Db_Ip", "db"),
        ])
        .unwrap();
        assert_eq!(config, AppConfig::default());

        // 未设置的变量不会因为小写同名变量而报错
        let config = load(&[("ktor_demo_db_port", "abc")]).unwrap();
        assert_eq!(config.db_port(), 25432);
    }

    #[test]
    fn test_nested_keys_are_ignored() {
        let config = load(&[
            ("KTOR_DEMO_DB_IP__EXTRA", "x"),
            ("KTOR_DEMO_HTTP_PORT__VALUE", "not-a-number"),
        ])
        .unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_exact_key_wins_alongside_lookalikes() {
        let config = load(&[
            ("KTOR_DEMO_HTTP_PORT", "8000"),
            ("ktor_demo_http_port", "8081"),
            ("KTOR_DEMO_HTTP_PORT__X", "1"),
        ])
        .unwrap();
        assert_eq!(config.http_port(), 8000);
    }

    // Windows 上环境变量名不区分大小写
    #[cfg(unix)]
    #[test]
    fn test_load_config_reads_exact_process_variables() {
        // 只有这个测试修改进程环境
        env::set_var("KTOR_DEMO_HTTP_PORT", "8765");
        env::set_var("ktor_demo_db_port", "abc");

        let result = load_config();

        env::remove_var("KTOR_DEMO_HTTP_PORT");
        env::remove_var("ktor_demo_db_port");

        let config = result.unwrap();
        assert_eq!(config.http_port(), 8765);
        assert_eq!(config.db_port(), 25432);
    }

    #[test]
    fn test_repeated_reads_are_stable() {
        let config = load(&[("KTOR_DEMO_DB_IP", "db")]).unwrap();
        assert_eq!(config.db_ip(), config.db_ip());
        assert_eq!(config.http_port(), config.http_port());
        assert_eq!(config.clone(), config);
    }
}
