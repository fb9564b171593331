//! Support library for Netdata external plugins.
//!
//! External plugins talk to the agent over a line-oriented text protocol on
//! stdout (`CHART`, `DIMENSION`, `BEGIN`, `SET`, `END`), receive their
//! runtime environment through `NETDATA_*` variables, and log to stderr or
//! the systemd journal. This crate bundles those concerns:
//!
//! - [`ChartMetadata`] / [`DimensionMetadata`]: the chart model a plugin
//!   declares to the agent
//! - [`ChartWriter`]: buffered protocol emission with minimal allocations
//! - [`NetdataEnv`]: the agent-provided environment
//! - [`init_tracing`]: journald/stderr logging setup

mod metadata;
mod netdata_env;
mod tracing_setup;
mod writer;

pub use metadata::{ChartMetadata, DimensionAlgorithm, DimensionMetadata};
pub use netdata_env::NetdataEnv;
pub use tracing_setup::init_tracing;
pub use writer::ChartWriter;
