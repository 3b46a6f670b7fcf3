use anyhow::Context;
use todo_config::TodoConfig;

/// Load `.env`, then the layered configuration.
pub fn load_config() -> anyhow::Result<TodoConfig> {
    TodoConfig::load_with_dotenv().context("failed to load configuration")
}

/// Build the log filter: `TODO_LOG` wins, otherwise the CLI verbosity.
///
/// In SQL-echo mode every statement is logged regardless of the base level.
pub fn env_filter(
    quiet: bool,
    verbose: bool,
    echo_sql: bool,
) -> anyhow::Result<tracing_subscriber::EnvFilter> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("TODO_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    if !echo_sql {
        return Ok(filter);
    }
    let directive = format!("{}=debug", todo_db::dao::SQL_TARGET)
        .parse()
        .context("invalid SQL log directive")?;
    Ok(filter.add_directive(directive))
}

pub fn init_tracing(quiet: bool, verbose: bool, echo_sql: bool) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(quiet, verbose, echo_sql)?)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
