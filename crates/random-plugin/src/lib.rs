//! random-plugin library - can be called from multi-call binaries or standalone
//!
//! Emits a configurable set of synthetic charts over the netdata external
//! plugin protocol and refreshes them with random values on every collection
//! cycle. Useful as a traffic generator and as a template for new collectors.

use std::time::{Duration, Instant, SystemTime};

use anyhow::{Context, Result};
use pluginsd::ChartWriter;
use tokio::io::AsyncReadExt;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

mod charts;
mod collect;
mod config;
mod module;

mod plugin_config;
use crate::plugin_config::PluginConfig;

use crate::module::RandomModule;

/// Chart identifiers carry this type prefix on the wire.
const PLUGIN_TYPE: &str = "random";

/// Entry point for random-plugin - can be called from multi-call binary
///
/// # Arguments
/// * `args` - Command-line arguments (should include argv[0] as "random-plugin")
///
/// # Returns
/// Exit code (0 for success, non-zero for errors)
pub fn run(args: Vec<String>) -> i32 {
    // collection runs on a timer and shutdown is signal driven, so we need a
    // tokio runtime
    let runtime = tokio::runtime::Runtime::new().unwrap();
    runtime.block_on(async_run(args))
}

async fn async_run(args: Vec<String>) -> i32 {
    pluginsd::init_tracing("info");

    match run_internal(args).await {
        Ok(()) => 0,
        Err(e) => {
            error!("{:#}", e);
            1
        }
    }
}

async fn run_internal(args: Vec<String>) -> Result<()> {
    // 1. Load configuration
    let config = PluginConfig::new(&args).context("failed to initialize plugin configuration")?;
    let update_every = config.resolve_update_every();

    // 2. Build and initialize the collection module
    let mut module = RandomModule::new(config.module_config(), update_every);
    module.init().context("failed to initialize random module")?;

    // 3. Liveness check, a module that yields no data has nothing to report
    if !module.check() {
        warn!("check failed: no data collected, exiting");
        return Ok(());
    }

    // 4. Declare the charts
    let charts = module.charts().map(|c| c.to_vec()).unwrap_or_default();
    let mut writer = ChartWriter::new();
    for chart in &charts {
        writer.write_chart_definition(&wire_chart_id(&chart.id), chart);
    }
    writer
        .flush()
        .context("failed to write chart definitions")?;

    info!(
        "random plugin started: update_every={}s, charts={}",
        update_every,
        charts.len()
    );

    // 5. Shutdown plumbing: signals, and the agent closing our stdin
    let shutdown = CancellationToken::new();
    handle_shutdown_signals(shutdown.clone());
    watch_input_stream(shutdown.clone());

    // 6. Collection loop
    let mut interval = tokio::time::interval(Duration::from_secs(update_every));
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut last_cycle: Option<Instant> = None;

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            _ = interval.tick() => {
                let elapsed = last_cycle.map_or(Duration::ZERO, |t| t.elapsed());
                last_cycle = Some(Instant::now());

                let values = module.collect();
                let collection_time = SystemTime::now();
                for chart in &charts {
                    writer.begin_chart(&wire_chart_id(&chart.id), elapsed);
                    for dimension in &chart.dimensions {
                        if let Some(value) = values.get(&dimension.id) {
                            writer.write_dimension(&dimension.id, *value);
                        }
                    }
                    writer.end_chart(collection_time);
                }
                writer.flush().context("failed to write collected values")?;
            }
        }
    }

    module.cleanup();
    info!("random plugin stopped");
    Ok(())
}

fn wire_chart_id(chart_id: &str) -> String {
    format!("{PLUGIN_TYPE}.{chart_id}")
}

fn handle_shutdown_signals(shutdown: CancellationToken) {
    tokio::spawn(async move {
        match wait_for_shutdown_signal().await {
            Ok(()) => info!("received shutdown signal, initiating graceful shutdown"),
            Err(e) => error!(
                "failed to wait for shutdown signal: {}, initiating shutdown",
                e
            ),
        }
        shutdown.cancel();
    });
}

/// Waits for a shutdown signal (SIGINT or SIGTERM on Unix, SIGINT on other platforms).
async fn wait_for_shutdown_signal() -> std::io::Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut sigterm = signal(SignalKind::terminate())?;

        tokio::select! {
            result = tokio::signal::ctrl_c() => result,
            _ = sigterm.recv() => Ok(()),
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await
    }
}

/// The agent signals an orderly shutdown by closing the plugin's stdin.
fn watch_input_stream(shutdown: CancellationToken) {
    tokio::spawn(async move {
        let mut stdin = tokio::io::stdin();
        let mut scratch = [0u8; 512];
        loop {
            match stdin.read(&mut scratch).await {
                Ok(0) => break,
                // commands are not part of this plugin's protocol, drain and
                // ignore them
                Ok(_) => {}
                Err(e) => {
                    error!("error reading stdin: {}", e);
                    break;
                }
            }
        }
        info!("input stream ended");
        shutdown.cancel();
    });
}
