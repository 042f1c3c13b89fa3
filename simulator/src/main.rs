use anyhow::Context;
use clap::Parser;
use gui_bridge::bridge::GuiBridge;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::net::SocketAddr;
use std::path::PathBuf;
use strikealarm::geo::MeasurementSystem;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use workflow::config::ScenarioConfig;
use workflow::runner::{AlarmEvent, Runner};

mod generator;
mod gui_bridge;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Lightning proximity alarm scenario driver")]
struct Args {
    /// Replay the built-in approaching-storm scenario
    #[arg(long, default_value_t = false)]
    offline: bool,
    /// Load a scenario from YAML (its own parameters apply)
    #[arg(long, conflicts_with_all = ["sectors", "interval", "imperial"])]
    scenario: Option<PathBuf>,
    #[arg(long, default_value_t = 8)]
    sectors: usize,
    /// Alarm time window in minutes
    #[arg(long, default_value_t = 10)]
    interval: i64,
    /// Render distances in miles
    #[arg(long, default_value_t = false)]
    imperial: bool,
    /// Append a one-line replay summary to this file
    #[arg(long)]
    report: Option<PathBuf>,
    /// Keep the HTTP bridge alive after the replay
    #[arg(long, default_value_t = false)]
    serve: bool,
    #[arg(long, default_value = "127.0.0.1:9000")]
    bind: SocketAddr,
}

fn load_scenario(args: &Args) -> anyhow::Result<Option<ScenarioConfig>> {
    let system = if args.imperial {
        MeasurementSystem::Imperial
    } else {
        MeasurementSystem::Metric
    };
    Ok(match args.scenario.as_ref() {
        Some(path) => Some(ScenarioConfig::load(path)?),
        None if args.offline => Some(ScenarioConfig::demo(args.sectors, args.interval, system)),
        None => None,
    })
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let scenario = load_scenario(&args)?;

    let gui_bridge = GuiBridge::new();

    if let Some(scenario) = scenario {
        let runner = Runner::new(scenario);
        let result = runner.execute()?;

        for event in &result.events {
            match event {
                AlarmEvent::Result {
                    result: Some(alarm),
                } => println!("alarm -> {} (sector {})", alarm, alarm.sector),
                AlarmEvent::Result { result: None } => println!("alarm -> nothing in range"),
                AlarmEvent::Clear => println!("alarm -> cleared"),
            }
        }
        println!(
            "Replay -> results {}, clears {}, message '{}'",
            result.result_count(),
            result.clear_count(),
            result.text_message
        );

        gui_bridge.publish(&result.view)?;
        gui_bridge.publish_status("Replay results ready.");

        if let Some(report_path) = args.report.as_ref() {
            let report = format!(
                "results={} clears={} evaluations={} skipped={} expired={} message={:?}\n",
                result.result_count(),
                result.clear_count(),
                result.metrics.evaluations,
                result.metrics.skipped_strikes,
                result.metrics.expired_strikes,
                result.text_message
            );
            if let Some(parent) = report_path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(report_path)
                .with_context(|| format!("opening report {}", report_path.display()))?;
            file.write_all(report.as_bytes())?;
        }
    }

    if args.serve {
        gui_bridge.serve(args.bind)?;
        gui_bridge.publish_status("HTTP bridge running (Ctrl+C to stop)...");
        let runtime = TokioBuilder::new_current_thread()
            .enable_all()
            .build()
            .context("creating runtime for signal handling")?;
        runtime.block_on(async {
            signal::ctrl_c().await.context("awaiting Ctrl+C to exit")?;
            Ok::<(), anyhow::Error>(())
        })?;
    }

    Ok(())
}
