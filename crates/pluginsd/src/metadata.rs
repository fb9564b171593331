//! Chart and dimension metadata types.

/// Dimension algorithm for value processing
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DimensionAlgorithm {
    /// Store the value as-is
    #[default]
    Absolute,
    /// Calculate difference from previous value (for counters)
    Incremental,
    /// Calculate percentage of dimension relative to row total
    PercentageOfAbsoluteRow,
    /// Calculate percentage of dimension relative to incremental row
    PercentageOfIncrementalRow,
}

impl DimensionAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            DimensionAlgorithm::Absolute => "absolute",
            DimensionAlgorithm::Incremental => "incremental",
            DimensionAlgorithm::PercentageOfAbsoluteRow => "percentage-of-absolute-row",
            DimensionAlgorithm::PercentageOfIncrementalRow => "percentage-of-incremental-row",
        }
    }
}

/// Metadata for a single dimension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimensionMetadata {
    /// Dimension ID (used in SET commands)
    pub id: String,
    /// Display name (shown in UI)
    pub name: String,
    /// Algorithm for processing values
    pub algorithm: DimensionAlgorithm,
    /// Multiplier for values (default 1)
    pub multiplier: i64,
    /// Divisor for values (default 1)
    pub divisor: i64,
    /// Whether this dimension is hidden
    pub hidden: bool,
}

impl DimensionMetadata {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            algorithm: DimensionAlgorithm::default(),
            multiplier: 1,
            divisor: 1,
            hidden: false,
        }
    }
}

/// Metadata for a chart.
///
/// Dimensions keep their declaration order; the agent renders them in the
/// order their DIMENSION lines arrive, and collectors may attach meaning to
/// a dimension's position within its chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartMetadata {
    /// Chart ID
    pub id: String,
    /// Chart name (optional, usually empty)
    pub name: String,
    /// Chart title (shown in UI)
    pub title: String,
    /// Units for the chart
    pub units: String,
    /// Family grouping
    pub family: String,
    /// Context for alerts and API
    pub context: String,
    /// Chart type hint (line, area, stacked), written to the agent as-is
    pub chart_type: String,
    /// Priority for ordering (lower = higher priority)
    pub priority: i64,
    /// Update interval in seconds
    pub update_every: u64,
    /// Whether the chart is hidden by default in the UI
    pub hidden: bool,
    /// Dimensions in this chart, in declaration order
    pub dimensions: Vec<DimensionMetadata>,
}

impl ChartMetadata {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            title: id.clone(),
            context: id.clone(),
            id,
            name: String::new(),
            units: String::from("value"),
            family: String::new(),
            chart_type: String::from("line"),
            priority: 1000,
            update_every: 1,
            hidden: false,
            dimensions: Vec::new(),
        }
    }
}
