use clap::{Args, Parser, Subcommand};

use todo_config::TodoConfig;

/// Top-level CLI parser for the `todo-api` binary.
#[derive(Debug, Parser)]
#[command(name = "todo-api", version, about = "Todo List API - task tracking over HTTP")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP server.
    Serve(ServeArgs),
    /// Apply database migrations and exit.
    Migrate,
    /// Print a JSON Schema, or the OpenAPI document.
    Schema(SchemaArgs),
}

/// Overrides applied on top of the loaded configuration.
#[derive(Clone, Debug, Default, Args)]
pub struct ServeArgs {
    /// Listen address
    #[arg(long)]
    pub host: Option<String>,

    /// Listen port
    #[arg(long)]
    pub port: Option<u16>,

    /// Database file path, or ":memory:"
    #[arg(long)]
    pub database: Option<String>,
}

impl ServeArgs {
    pub fn apply(&self, config: &mut TodoConfig) {
        if let Some(host) = &self.host {
            config.server.host.clone_from(host);
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(database) = &self.database {
            config.database.path.clone_from(database);
        }
    }
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Registered schema name; lists the names when omitted
    pub name: Option<String>,

    /// Print the OpenAPI document instead
    #[arg(long, conflicts_with = "name")]
    pub openapi: bool,
}
