//! PostgreSQL Persistence - PostgreSQL 数据库持久化实现

mod database;
mod widget_repo;

pub use database::*;
pub use widget_repo::*;
