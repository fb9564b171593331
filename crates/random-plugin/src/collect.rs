//! Value collection.

use std::collections::HashMap;

use pluginsd::ChartMetadata;
use rand::Rng;

/// Source of raw samples. Injectable so tests can pin the values.
pub(crate) type RandomSource = Box<dyn FnMut() -> i64 + Send>;

pub(crate) fn default_random_source() -> RandomSource {
    Box::new(|| rand::thread_rng().gen_range(0..100))
}

/// Draw one value per declared dimension.
///
/// Within a chart, dimensions at even positions keep the drawn value and odd
/// positions get its negation. The alternation restarts on every chart, so
/// the first dimension of each chart is always non-negated.
pub(crate) fn collect_values(
    charts: &[ChartMetadata],
    random_source: &mut dyn FnMut() -> i64,
) -> HashMap<String, i64> {
    let mut values = HashMap::new();
    for chart in charts {
        for (position, dimension) in chart.dimensions.iter().enumerate() {
            let value = random_source();
            let value = if position % 2 == 0 { value } else { -value };
            values.insert(dimension.id.clone(), value);
        }
    }
    values
}
