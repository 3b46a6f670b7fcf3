//! General application configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

fn default_app_name() -> String {
    "Todo List API".to_string()
}

fn default_app_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Deployment mode.
///
/// `Local` additionally echoes every SQL statement at `debug` level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Dev,
    Test,
    Local,
}

impl Mode {
    #[must_use]
    pub const fn echo_sql(self) -> bool {
        matches!(self, Self::Local)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dev => "dev",
            Self::Test => "test",
            Self::Local => "local",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Name shown on the home page and in the OpenAPI document.
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// Version reported in the OpenAPI document.
    #[serde(default = "default_app_version")]
    pub app_version: String,

    #[serde(default)]
    pub mode: Mode,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            app_name: default_app_name(),
            app_version: default_app_version(),
            mode: Mode::default(),
        }
    }
}
