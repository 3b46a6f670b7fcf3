use anyhow::Context;
use todo_config::TodoConfig;
use todo_schema::SchemaRegistry;

use crate::cli::SchemaArgs;

/// Handle `todo-api schema`.
pub fn handle(args: &SchemaArgs, config: &TodoConfig) -> anyhow::Result<()> {
    let rendered = render(args, config)?;
    println!("{rendered}");
    Ok(())
}

fn render(args: &SchemaArgs, config: &TodoConfig) -> anyhow::Result<String> {
    if args.openapi {
        let document =
            todo_schema::openapi::document(&config.general.app_name, &config.general.app_version);
        return Ok(serde_json::to_string_pretty(&document)?);
    }

    let registry = SchemaRegistry::new();
    let Some(name) = &args.name else {
        return Ok(registry.list().join("\n"));
    };
    let schema = registry.get(name).with_context(|| {
        format!(
            "unknown schema '{name}' (available: {})",
            registry.list().join(", ")
        )
    })?;
    Ok(serde_json::to_string_pretty(schema)?)
}
