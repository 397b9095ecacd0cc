use clap::Parser;
use stock_filter::core::{ConfigProvider, DatasetStatus};
use stock_filter::utils::{logger, validation::Validate};
use stock_filter::{build_router, AppState, CliArgs};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    let config = match args.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    };

    // 初始化日誌
    logger::init_server_logger(args.verbose, config.log_level.as_deref(), config.log_format());

    tracing::info!("🚀 Starting stock-filter");
    tracing::debug!("Resolved config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    let state = AppState::from_config(&config);

    // 啟動時先檢查一次資料檔，只記錄不阻擋啟動
    match state.source.status().await {
        DatasetStatus::Ready(count) => {
            tracing::info!("📂 {} records available in {}", count, config.data_path());
        }
        DatasetStatus::Empty => {
            tracing::warn!("📭 Data file {} contains no records", config.data_path());
        }
        DatasetStatus::Unavailable(reason) => {
            tracing::warn!("⚠️ Data file {} is unavailable: {}", config.data_path(), reason);
        }
    }

    if config.strict_filters() {
        tracing::info!("🔒 Strict filter mode enabled");
    }

    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!("🌐 Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("👋 Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
