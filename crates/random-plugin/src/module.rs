//! The random data collection unit.
//!
//! Ties the layout, the chart factory and value collection together behind
//! the init / check / collect lifecycle the runtime drives.

use std::collections::HashMap;

use pluginsd::ChartMetadata;

use crate::charts::build_charts;
use crate::collect::{RandomSource, collect_values, default_random_source};
use crate::config::{Config, ConfigError};

pub(crate) struct RandomModule {
    config: Config,
    update_every: u64,
    charts: Option<Vec<ChartMetadata>>,
    random_source: RandomSource,
}

impl RandomModule {
    pub(crate) fn new(config: Config, update_every: u64) -> Self {
        Self::with_random_source(config, update_every, default_random_source())
    }

    pub(crate) fn with_random_source(
        config: Config,
        update_every: u64,
        random_source: RandomSource,
    ) -> Self {
        Self {
            config,
            update_every,
            charts: None,
            random_source,
        }
    }

    /// Validate the layout and build the charts. Nothing is collected until
    /// this has succeeded.
    pub(crate) fn init(&mut self) -> Result<(), ConfigError> {
        let charts = build_charts(&self.config, self.update_every)?;
        self.charts = Some(charts);
        Ok(())
    }

    pub(crate) fn charts(&self) -> Option<&[ChartMetadata]> {
        self.charts.as_deref()
    }

    /// Trial collection. The unit is considered live when it produces data.
    pub(crate) fn check(&mut self) -> bool {
        !self.collect().is_empty()
    }

    /// One collection cycle. Yields an empty map until init has run.
    pub(crate) fn collect(&mut self) -> HashMap<String, i64> {
        match &self.charts {
            Some(charts) => collect_values(charts, &mut *self.random_source),
            None => HashMap::new(),
        }
    }

    pub(crate) fn cleanup(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChartsConfig;

    fn group(num: i64, dimensions: i64) -> ChartsConfig {
        ChartsConfig {
            chart_type: String::new(),
            num,
            dimensions,
        }
    }

    fn fixed_module(charts: ChartsConfig, hidden_charts: ChartsConfig) -> RandomModule {
        RandomModule::with_random_source(
            Config {
                charts,
                hidden_charts,
            },
            1,
            Box::new(|| 1),
        )
    }

    fn expected(entries: &[(&str, i64)]) -> HashMap<String, i64> {
        entries
            .iter()
            .map(|(id, value)| (id.to_string(), *value))
            .collect()
    }

    #[test]
    fn init_succeeds_with_the_default_layout() {
        let mut module = RandomModule::new(Config::default(), 1);

        assert!(module.init().is_ok());
        assert_eq!(module.charts().unwrap().len(), 1);
    }

    #[test]
    fn init_succeeds_when_no_charts_are_asked_for() {
        let mut module = fixed_module(group(0, 4), group(0, 4));

        assert!(module.init().is_ok());
        assert!(module.charts().unwrap().is_empty());
    }

    #[test]
    fn init_rejects_visible_charts_without_dimensions() {
        let mut module = fixed_module(group(1, 0), group(0, 4));

        assert_eq!(
            module.init().unwrap_err(),
            ConfigError::InvalidDimensionCount { section: "charts" }
        );
        assert!(module.charts().is_none());
    }

    #[test]
    fn init_rejects_hidden_charts_without_dimensions() {
        let mut module = fixed_module(group(0, 4), group(2, -1));

        assert_eq!(
            module.init().unwrap_err(),
            ConfigError::InvalidDimensionCount {
                section: "hidden_charts"
            }
        );
    }

    #[test]
    fn init_is_idempotent() {
        let mut module = fixed_module(group(2, 3), group(1, 2));

        module.init().unwrap();
        let first = module.charts().unwrap().to_vec();
        module.init().unwrap();

        assert_eq!(module.charts().unwrap(), &first[..]);
    }

    #[test]
    fn check_reports_live_after_a_successful_init() {
        let mut module = RandomModule::new(Config::default(), 1);

        module.init().unwrap();

        assert!(module.check());
    }

    #[test]
    fn check_reports_dead_for_an_empty_layout() {
        let mut module = fixed_module(group(0, 4), group(0, 4));

        module.init().unwrap();

        assert!(!module.check());
    }

    #[test]
    fn collect_before_init_yields_nothing() {
        let mut module = fixed_module(group(1, 4), group(0, 4));

        assert!(module.collect().is_empty());
    }

    #[test]
    fn collect_covers_the_default_layout() {
        let mut module = fixed_module(group(1, 4), group(0, 4));
        module.init().unwrap();

        assert_eq!(
            module.collect(),
            expected(&[
                ("random_0_random0", 1),
                ("random_0_random1", -1),
                ("random_0_random2", 1),
                ("random_0_random3", -1),
            ])
        );
    }

    #[test]
    fn collect_covers_every_visible_chart() {
        let mut module = fixed_module(group(2, 5), group(0, 4));
        module.init().unwrap();

        assert_eq!(
            module.collect(),
            expected(&[
                ("random_0_random0", 1),
                ("random_0_random1", -1),
                ("random_0_random2", 1),
                ("random_0_random3", -1),
                ("random_0_random4", 1),
                ("random_1_random0", 1),
                ("random_1_random1", -1),
                ("random_1_random2", 1),
                ("random_1_random3", -1),
                ("random_1_random4", 1),
            ])
        );
    }

    #[test]
    fn collect_covers_hidden_charts() {
        let mut module = fixed_module(group(0, 4), group(1, 2));
        module.init().unwrap();

        assert!(module.charts().unwrap().iter().all(|c| c.hidden));
        assert_eq!(
            module.collect(),
            expected(&[
                ("hidden_random_0_random0", 1),
                ("hidden_random_0_random1", -1),
            ])
        );
    }

    #[test]
    fn collect_covers_both_groups_together() {
        let mut module = fixed_module(group(2, 5), group(2, 5));
        module.init().unwrap();

        assert_eq!(
            module.collect(),
            expected(&[
                ("random_0_random0", 1),
                ("random_0_random1", -1),
                ("random_0_random2", 1),
                ("random_0_random3", -1),
                ("random_0_random4", 1),
                ("random_1_random0", 1),
                ("random_1_random1", -1),
                ("random_1_random2", 1),
                ("random_1_random3", -1),
                ("random_1_random4", 1),
                ("hidden_random_0_random0", 1),
                ("hidden_random_0_random1", -1),
                ("hidden_random_0_random2", 1),
                ("hidden_random_0_random3", -1),
                ("hidden_random_0_random4", 1),
                ("hidden_random_1_random0", 1),
                ("hidden_random_1_random1", -1),
                ("hidden_random_1_random2", 1),
                ("hidden_random_1_random3", -1),
                ("hidden_random_1_random4", 1),
            ])
        );
    }

    #[test]
    fn empty_layout_collects_nothing() {
        let mut module = fixed_module(group(0, 4), group(0, 4));
        module.init().unwrap();

        assert!(module.collect().is_empty());
    }

    #[test]
    fn charts_are_absent_before_init() {
        let module = RandomModule::new(Config::default(), 1);

        assert!(module.charts().is_none());
    }

    #[test]
    fn cleanup_has_nothing_to_release() {
        let mut module = RandomModule::new(Config::default(), 1);

        module.cleanup();
    }

    #[test]
    fn collection_repeats_on_every_cycle() {
        let mut module = fixed_module(group(1, 2), group(0, 4));
        module.init().unwrap();

        let first = module.collect();
        let second = module.collect();

        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }
}
