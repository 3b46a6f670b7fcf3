use anyhow::Context;
use todo_api::AppState;
use todo_config::TodoConfig;
use todo_db::TodoDb;
use todo_db::service::TaskService;

use crate::cli::ServeArgs;

/// Handle `todo-api serve`.
pub async fn handle(args: &ServeArgs, mut config: TodoConfig) -> anyhow::Result<()> {
    args.apply(&mut config);
    config.validate().context("invalid server settings")?;

    let db = TodoDb::open(&config.database)
        .await
        .with_context(|| format!("failed to open database at {}", config.database.path))?;

    let addr = config.server.bind_addr();
    let mode = config.general.mode;
    let state = AppState::new(TaskService::new(db), config);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, %mode, "listening");

    axum::serve(listener, todo_api::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(%error, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
