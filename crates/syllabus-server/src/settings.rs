//! Runtime server configuration, read from an optional TOML file layered
//! under `SYLLABUS_*` environment variables.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;
use syllabus_api::ApiOptions;
use syllabus_core::enrollment::UnresolvedPolicy;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:             String,
  #[serde(default = "default_port")]
  pub port:             u16,
  #[serde(default = "default_store_path")]
  pub store_path:       PathBuf,
  #[serde(default)]
  pub strict_status:    bool,
  #[serde(default)]
  pub unresolved_users: UnresolvedPolicy,
}

fn environment() -> config::Environment {
  config::Environment::with_prefix("SYLLABUS").try_parsing(true)
}

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_port() -> u16 { 3000 }

fn default_store_path() -> PathBuf { PathBuf::from("syllabus.db") }

impl ServerConfig {
  /// Load from `path` (if it exists) and the `SYLLABUS_*` environment.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    Self::load_with_env(path, environment())
  }

  /// Load from `path` with `env` layered on top; environment values win.
  fn load_with_env(path: &Path, env: config::Environment) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(env)
      .build()
      .context("failed to read config file")?;

    settings
      .try_deserialize()
      .context("failed to deserialise ServerConfig")
  }

  pub fn api_options(&self) -> ApiOptions {
    ApiOptions {
      strict_status:    self.strict_status,
      unresolved_users: self.unresolved_users,
    }
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  /// `store_path` with a leading `~` expanded to the user's home directory.
  pub fn resolved_store_path(&self) -> PathBuf { expand_tilde(&self.store_path) }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
