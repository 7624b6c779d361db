//! Layered configuration and path helpers.
//!
//! Uses Figment to merge built-in defaults, `config.toml`, `config.<env>.toml`
//! and `APP_*` env vars (`__` separates nested keys, e.g.
//! `APP_GROUPING__STRICT_ORDERING=true`).

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::types::EmptyGroupPolicy;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub grouping: GroupingSettings,
    pub render: RenderSettings,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GroupingSettings {
    /// Refuse continuations whose sequence number does not increase.
    pub strict_ordering: bool,
    pub empty_group_policy: EmptyGroupPolicy,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    #[default]
    Text,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderSettings {
    pub format: OutputFormat,
    pub snippet_width: usize,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self { format: OutputFormat::Text, snippet_width: 80 }
    }
}

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        Self::load_from(Path::new("."), &env_name)
    }

    /// Load with config files resolved against `base` instead of the working directory.
    pub fn load_from(base: &Path, env_name: &str) -> anyhow::Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(base.join("config.toml")));
        match env_name {
            "dev" | "development" => figment = figment.merge(Toml::file(base.join("config.dev.toml"))),
            "prod" | "production" => figment = figment.merge(Toml::file(base.join("config.prod.toml"))),
            "test" | "testing" => figment = figment.merge(Toml::file(base.join("config.test.toml"))),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        let config = Self { figment };
        config.validate()?;
        Ok(config)
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    pub fn settings(&self) -> anyhow::Result<Settings> {
        self.figment
            .extract()
            .map_err(|e| Error::InvalidConfig(e.to_string()).into())
    }

    fn validate(&self) -> anyhow::Result<()> {
        let settings = self.settings()?;
        if settings.render.snippet_width == 0 {
            return Err(Error::InvalidConfig("render.snippet_width must be positive".into()).into());
        }
        Ok(())
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}
