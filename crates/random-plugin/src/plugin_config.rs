//! Plugin configuration.
//!
//! Three sources feed the effective configuration. The agent passes the
//! collection interval as the first positional argument, a `random.yaml` in
//! the user or stock netdata config directory supplies the chart layout, and
//! built-in defaults cover everything else.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use pluginsd::NetdataEnv;
use serde::{Deserialize, Deserializer, Serialize};

use crate::config::{ChartsConfig, Config};

#[derive(Debug, Parser, Clone, Serialize, Deserialize)]
#[command(name = "random-plugin")]
#[command(about = "Synthetic random metrics plugin")]
#[command(version = "0.1")]
#[serde(deny_unknown_fields)]
pub(crate) struct PluginConfig {
    #[arg(skip = ChartsConfig::default_visible())]
    #[serde(
        default = "ChartsConfig::default_visible",
        deserialize_with = "merged_visible_group",
        rename = "charts"
    )]
    pub(crate) charts: ChartsConfig,

    #[arg(skip)]
    #[serde(
        default,
        deserialize_with = "merged_hidden_group",
        rename = "hidden_charts"
    )]
    pub(crate) hidden_charts: ChartsConfig,

    #[arg(value_name = "UPDATE_EVERY", help = "Collection interval in seconds")]
    #[serde(skip)]
    pub(crate) update_every: Option<u64>,

    #[arg(skip)]
    #[serde(skip)]
    pub(crate) _netdata_env: NetdataEnv,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            charts: ChartsConfig::default_visible(),
            hidden_charts: ChartsConfig::default(),
            update_every: None,
            _netdata_env: NetdataEnv::default(),
        }
    }
}

/// One group as it appears in YAML, every field optional.
///
/// A present group starts from the same seed an omitted one gets; only the
/// fields it names are overridden. Go's yaml unmarshalling onto a pre-seeded
/// struct behaves the same way, and the module's jobs are written for it.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PartialChartsConfig {
    #[serde(rename = "type")]
    chart_type: Option<String>,
    num: Option<i64>,
    dimensions: Option<i64>,
}

impl PartialChartsConfig {
    fn merge_onto(self, seed: ChartsConfig) -> ChartsConfig {
        ChartsConfig {
            chart_type: self.chart_type.unwrap_or(seed.chart_type),
            num: self.num.unwrap_or(seed.num),
            dimensions: self.dimensions.unwrap_or(seed.dimensions),
        }
    }
}

fn merged_group<'de, D>(deserializer: D, seed: ChartsConfig) -> Result<ChartsConfig, D::Error>
where
    D: Deserializer<'de>,
{
    // a bare `charts:` key parses as null, which keeps the seed untouched
    match Option::<PartialChartsConfig>::deserialize(deserializer)? {
        Some(partial) => Ok(partial.merge_onto(seed)),
        None => Ok(seed),
    }
}

fn merged_visible_group<'de, D>(deserializer: D) -> Result<ChartsConfig, D::Error>
where
    D: Deserializer<'de>,
{
    merged_group(deserializer, ChartsConfig::default_visible())
}

fn merged_hidden_group<'de, D>(deserializer: D) -> Result<ChartsConfig, D::Error>
where
    D: Deserializer<'de>,
{
    merged_group(deserializer, ChartsConfig::default())
}

impl PluginConfig {
    pub(crate) fn new(args: &[String]) -> Result<Self> {
        let mut cfg = Self::parse_from(args);
        let netdata_env = NetdataEnv::from_environment();

        if netdata_env.running_under_netdata() {
            // The chart layout comes from the config directories; only the
            // interval is taken from the command line.
            let update_every = cfg.update_every;
            cfg = Self::load_from_netdata_config(&netdata_env)?;
            cfg.update_every = update_every;
        }

        cfg._netdata_env = netdata_env;
        Ok(cfg)
    }

    fn load_from_netdata_config(netdata_env: &NetdataEnv) -> Result<Self> {
        let candidates = [
            netdata_env
                .user_config_dir
                .as_ref()
                .map(|p| p.join("random.yaml")),
            netdata_env
                .stock_config_dir
                .as_ref()
                .map(|p| p.join("random.yaml")),
        ];

        for path in candidates.into_iter().flatten() {
            if path.is_file() {
                return Self::from_yaml_file(&path).with_context(|| {
                    format!("failed to load random config from {}", path.display())
                });
            }
        }

        Ok(Self::default())
    }

    fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let cfg = serde_yaml::from_str::<Self>(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(cfg)
    }

    /// Collection interval in seconds. The command line wins, then the
    /// agent's environment, then one second. Never below one second.
    pub(crate) fn resolve_update_every(&self) -> u64 {
        self.update_every
            .or(self._netdata_env.update_every)
            .unwrap_or(1)
            .max(1)
    }

    pub(crate) fn module_config(&self) -> Config {
        Config {
            charts: self.charts.clone(),
            hidden_charts: self.hidden_charts.clone(),
        }
    }
}
