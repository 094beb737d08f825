//! widget-demo - Widget 服务入口
//!
//! 子命令:
//! - serve   启动 HTTP 服务（默认）
//! - migrate 应用数据库迁移
//! - info    列出已执行和待执行的迁移
//!
//! 迁移不在服务启动时自动执行：耗时较长的迁移或卡住的锁不应阻塞部署。

use std::sync::Arc;
use std::time::Instant;

use clap::{Parser, Subcommand};

use widget_demo::config::{load_config, print_config, AppConfig};
use widget_demo::infrastructure::http::{AppState, HttpServer, ServerConfig};
use widget_demo::infrastructure::persistence::postgres::{
    create_pool, migration_info, run_migrations, DatabaseConfig, DbPool, MigrationStatus,
    PgWidgetRepository,
};

#[derive(Parser)]
#[command(name = "widget-demo")]
#[command(about = "Widget service configured from KTOR_DEMO_* environment variables")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Apply database migrations
    Migrate,
    /// Show applied and pending database migrations
    Info,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let started = Instant::now();
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("info,widget_demo=info,tower_http=debug")
            }),
        )
        .init();

    // 配置只在这里解析一次，之后按引用传递
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
    print_config(&config);

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(&config, started).await,
        Commands::Migrate => migrate(&config).await,
        Commands::Info => info(&config).await,
    }
}

async fn serve(config: &AppConfig, started: Instant) -> anyhow::Result<()> {
    let pool = create_pool(&DatabaseConfig::from_app_config(config)).await?;
    let widget_repo = Arc::new(PgWidgetRepository::new(pool));

    let server = HttpServer::new(
        ServerConfig::from_app_config(config),
        AppState::new(widget_repo),
    );

    tracing::info!("Server initialized in {:?}", started.elapsed());

    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for ctrl-c: {}", e);
                std::future::pending::<()>().await;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

/// 迁移命令只需要一个连接
async fn migration_pool(config: &AppConfig) -> anyhow::Result<DbPool> {
    let db_config = DatabaseConfig {
        max_connections: 1,
        ..DatabaseConfig::from_app_config(config)
    };
    Ok(create_pool(&db_config).await?)
}

async fn migrate(config: &AppConfig) -> anyhow::Result<()> {
    let pool = migration_pool(config).await?;

    run_migrations(&pool).await?;
    pool.close().await;

    Ok(())
}

async fn info(config: &AppConfig) -> anyhow::Result<()> {
    let pool = migration_pool(config).await?;

    let info = migration_info(&pool).await?;
    pool.close().await;

    let current = info.current();
    let describe = |m: &MigrationStatus| {
        let marker = if Some(m.version) == current {
            " (current)"
        } else {
            ""
        };
        tracing::info!("{} - {}{}", m.version, m.description, marker);
    };

    if !info.applied.is_empty() {
        tracing::info!("Applied:");
        for migration in &info.applied {
            describe(migration);
        }
    }
    if !info.pending.is_empty() {
        tracing::info!("Pending:");
        for migration in &info.pending {
            describe(migration);
        }
    }

    Ok(())
}
