//! Chart construction from a validated layout.
//!
//! Chart identifiers are derived deterministically from the group and the
//! chart's index; every chart gets its full dimension set up front, in index
//! order. Collection relies on that order.

use crate::config::{ChartsConfig, Config, ConfigError};
use pluginsd::{ChartMetadata, DimensionMetadata};

const CHART_TITLE: &str = "A Random Number";
const CHART_UNITS: &str = "random";
const CHART_FAMILY: &str = "random";
const CHART_CONTEXT: &str = "random.random";
const CHART_PRIORITY: i64 = 70000;

fn new_chart(index: i64, group: &ChartsConfig, update_every: u64) -> ChartMetadata {
    build_chart(format!("random_{index}"), group, update_every, false)
}

fn new_hidden_chart(index: i64, group: &ChartsConfig, update_every: u64) -> ChartMetadata {
    build_chart(format!("hidden_random_{index}"), group, update_every, true)
}

fn build_chart(id: String, group: &ChartsConfig, update_every: u64, hidden: bool) -> ChartMetadata {
    let mut chart = ChartMetadata::new(id);
    chart.title = CHART_TITLE.to_string();
    chart.units = CHART_UNITS.to_string();
    chart.family = CHART_FAMILY.to_string();
    chart.context = CHART_CONTEXT.to_string();
    chart.priority = CHART_PRIORITY;
    chart.update_every = update_every;
    chart.hidden = hidden;
    if !group.chart_type.is_empty() {
        chart.chart_type = group.chart_type.clone();
    }

    for j in 0..group.dimensions {
        let mut dim = DimensionMetadata::new(format!("{}_random{}", chart.id, j));
        dim.name = format!("random{j}");
        chart.dimensions.push(dim);
    }

    chart
}

/// Build every chart the layout asks for, visible group first.
///
/// Propagates the validation error when the layout is not legal; otherwise
/// this is a pure function of its input.
pub(crate) fn build_charts(
    config: &Config,
    update_every: u64,
) -> Result<Vec<ChartMetadata>, ConfigError> {
    config.validate()?;

    let mut charts = Vec::new();
    for i in 0..config.charts.num {
        charts.push(new_chart(i, &config.charts, update_every));
    }
    for i in 0..config.hidden_charts.num {
        charts.push(new_hidden_chart(i, &config.hidden_charts, update_every));
    }
    Ok(charts)
}
