use anyhow::Context;
use todo_config::TodoConfig;
use todo_db::TodoDb;

/// Handle `todo-api migrate`.
pub async fn handle(config: &TodoConfig) -> anyhow::Result<()> {
    let path = &config.database.path;
    // Opening runs every pending migration.
    TodoDb::open(&config.database)
        .await
        .with_context(|| format!("failed to migrate database at {path}"))?;
    tracing::info!(%path, "migrations applied");
    Ok(())
}
