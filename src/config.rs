//! Configuration for registry construction.
//!
//! Uses `figment` to load a TOML file and merge it with `NOTIBUS_`-prefixed
//! environment variables over serialized defaults. Configuration only shapes
//! how a registry is built, that is, which endpoints are enabled and which extra
//! severities they suppress; membership itself stays fixed in code.

use crate::severity::{Severity, SeveritySet};
use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Crate configuration.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    /// Per-notifier overrides, keyed by registered endpoint name.
    #[serde(default)]
    pub notifiers: BTreeMap<String, NotifierConfig>,
}

/// Build-time overrides for one registered endpoint.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct NotifierConfig {
    /// Disabled notifiers are dropped from the registry at build time.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Extra severities to suppress, unioned with the notifier's own set.
    #[serde(default)]
    pub suppress: Vec<Severity>,
}

fn default_enabled() -> bool {
    true
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            suppress: Vec::new(),
        }
    }
}

impl NotifierConfig {
    pub(crate) fn suppress_set(&self) -> SeveritySet {
        self.suppress.iter().copied().collect()
    }
}

impl Config {
    /// Loads the configuration from the specified TOML file.
    ///
    /// A missing file yields the defaults. Values can be overridden with
    /// `NOTIBUS_`-prefixed environment variables.
    pub fn load(config_path: &str) -> Result<Self> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_path))
            .merge(Env::prefixed("NOTIBUS_"))
            .extract()?;
        Ok(config)
    }
}
