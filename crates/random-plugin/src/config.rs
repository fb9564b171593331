//! Chart layout configuration and its validation.

use serde::Serialize;
use thiserror::Error;

/// Error raised when a requested chart layout is not legal.
///
/// Validation runs once, before any chart is built; collection itself has no
/// error conditions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub(crate) enum ConfigError {
    #[error("'{section}->dimensions' must be > 0")]
    InvalidDimensionCount { section: &'static str },
}

fn default_dimensions() -> i64 {
    4
}

/// One chart group: how many charts to create and how many dimensions each
/// chart carries. The YAML surface deserializes through a partial mirror in
/// `plugin_config`; this is the resolved form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct ChartsConfig {
    /// Chart type hint (line, area, stacked), passed to the agent as-is.
    #[serde(rename = "type")]
    pub(crate) chart_type: String,
    /// Number of charts in this group.
    pub(crate) num: i64,
    /// Number of dimensions per chart.
    pub(crate) dimensions: i64,
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            chart_type: String::new(),
            num: 0,
            dimensions: default_dimensions(),
        }
    }
}

impl ChartsConfig {
    /// Defaults for the visible group: one chart of four dimensions.
    pub(crate) fn default_visible() -> Self {
        Self {
            num: 1,
            ..Self::default()
        }
    }

    fn validate(&self, section: &'static str) -> Result<(), ConfigError> {
        if self.num > 0 && self.dimensions <= 0 {
            return Err(ConfigError::InvalidDimensionCount { section });
        }
        Ok(())
    }
}

/// The full chart layout: a visible and a hidden group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Config {
    pub(crate) charts: ChartsConfig,
    pub(crate) hidden_charts: ChartsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            charts: ChartsConfig::default_visible(),
            hidden_charts: ChartsConfig::default(),
        }
    }
}

impl Config {
    /// Check that every group asking for charts gives them at least one
    /// dimension. The two groups are validated independently; a group with
    /// no charts is inert and never fails, whatever its dimension count.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        self.charts.validate("charts")?;
        self.hidden_charts.validate("hidden_charts")?;
        Ok(())
    }
}
