//! Memory Layer - In-Memory Persistence
//!
//! Widget 仓储的内存实现，用于不关心 SQL 的测试

mod widget_repo;

pub use widget_repo::InMemoryWidgetRepository;
