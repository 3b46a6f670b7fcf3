use clap::Parser;

mod bootstrap;
mod cli;
mod commands;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("todo-api error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let config = bootstrap::load_config()?;
    bootstrap::init_tracing(cli.quiet, cli.verbose, config.general.mode.echo_sql())?;

    match &cli.command {
        cli::Commands::Serve(args) => commands::serve::handle(args, config).await,
        cli::Commands::Migrate => commands::migrate::handle(&config).await,
        cli::Commands::Schema(args) => commands::schema::handle(args, &config),
    }
}
