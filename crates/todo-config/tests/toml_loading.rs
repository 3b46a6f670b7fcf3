//! Integration tests for layered configuration loading.
//!
//! Uses figment::Jail for sandboxed working directory and env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use todo_config::{Mode, TodoConfig};

#[test]
fn loads_sections_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[general]
app_name = "Tasks"
mode = "local"

[server]
host = "0.0.0.0"
port = 9000

[database]
path = "/var/lib/todo/tasks.db"
busy_timeout_ms = 250
"#,
        )?;

        let config: TodoConfig = Figment::from(Serialized::defaults(TodoConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.general.app_name, "Tasks");
        assert_eq!(config.general.mode, Mode::Local);
        assert_eq!(config.server.bind_addr(), "0.0.0.0:9000");
        assert_eq!(config.database.path, "/var/lib/todo/tasks.db");
        assert_eq!(config.database.busy_timeout_ms, 250);
        Ok(())
    });
}

#[test]
fn partial_toml_keeps_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[server]\nport = 8080\n")?;

        let config: TodoConfig = Figment::from(Serialized::defaults(TodoConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.general.app_name, "Todo List API");
        assert_eq!(config.database.path, "todo.db");
        Ok(())
    });
}

#[test]
fn local_file_is_picked_up_by_figment() {
    Jail::expect_with(|jail| {
        jail.create_file("todo.toml", "[database]\npath = \":memory:\"\n")?;

        let config = TodoConfig::load().expect("config loads");
        assert!(config.database.is_in_memory());
        Ok(())
    });
}

#[test]
fn env_beats_local_file() {
    Jail::expect_with(|jail| {
        jail.create_file("todo.toml", "[server]\nport = 8080\n")?;
        jail.set_env("TODO_SERVER__PORT", "9090");
        jail.set_env("TODO_GENERAL__MODE", "test");

        let config = TodoConfig::load().expect("config loads");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.general.mode, Mode::Test);
        Ok(())
    });
}

#[test]
fn unknown_mode_is_an_error() {
    Jail::expect_with(|jail| {
        jail.set_env("TODO_GENERAL__MODE", "prod");
        assert!(TodoConfig::load().is_err());
        Ok(())
    });
}

#[test]
fn invalid_value_from_env_is_rejected() {
    Jail::expect_with(|jail| {
        jail.set_env("TODO_SERVER__PORT", "0");
        let err = TodoConfig::load().unwrap_err();
        assert!(err.to_string().contains("server.port"));
        Ok(())
    });
}
