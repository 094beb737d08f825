//! 应用层
//!
//! 包含：
//! - ports: 六边形架构端口定义（Widget Repository）

pub mod ports;

pub use ports::{name_prefix, RepositoryError, WidgetRecord, WidgetRepositoryPort};
