//! Command-line front end for the SRTF simulator.
//!
//! ```text
//! srtf-sim -p 0:8 -p 1:4
//! srtf-sim --input batch.json --json
//! srtf-sim --random 6 --seed 3 --mode tick -v
//! ```

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use srtf_sim::config::SimulatorConfig;
use srtf_sim::models::Process;
use srtf_sim::scheduler::{ScheduleMetrics, Simulation, SrtfScheduler, StepMode};
use srtf_sim::validation::{parse_count, parse_processes};
use srtf_sim::workload::WorkloadGenerator;
use srtf_sim::{Error, Result};

#[derive(Debug, Parser)]
#[command(name = "srtf-sim", version, about = "Preemptive SJF CPU scheduling simulator")]
struct Cli {
    /// Process as ARRIVAL:BURST, in input order (repeatable).
    #[arg(short = 'p', long = "process", value_name = "ARRIVAL:BURST")]
    processes: Vec<String>,

    /// JSON file with an array of {"arrival": .., "burst": ..} objects.
    #[arg(short, long, value_name = "FILE", conflicts_with_all = ["processes", "random"])]
    input: Option<PathBuf>,

    /// Generate N random processes instead of reading input.
    #[arg(long, value_name = "N", conflicts_with = "processes")]
    random: Option<usize>,

    /// Seed for --random.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// TOML configuration file.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Clock stepping, `tick` or `event-driven`; overrides the configuration.
    /// `tick` steps every busy tick and suits small bursts only.
    #[arg(long, value_name = "MODE")]
    mode: Option<StepMode>,

    /// Print the full result as JSON.
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Deserialize)]
struct InputRow {
    arrival: i64,
    burst: i64,
}

#[derive(Serialize)]
struct Report<'a> {
    simulation: &'a Simulation,
    metrics: &'a ScheduleMetrics,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => SimulatorConfig::load(path)?,
        None => SimulatorConfig::default(),
    };
    if let Some(mode) = cli.mode {
        config.step_mode = mode;
    }
    debug!("configuration: {config:?}");

    let processes = read_processes(cli, &config)?;
    info!("running {} processes", processes.len());

    let simulation = SrtfScheduler::new()
        .with_mode(config.step_mode)
        .schedule(&processes);
    let metrics = ScheduleMetrics::calculate(&simulation);

    if cli.json {
        let report = Report {
            simulation: &simulation,
            metrics: &metrics,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render_text(&mut io::stdout().lock(), &simulation, &metrics)?;
    }
    Ok(())
}

fn read_processes(cli: &Cli, config: &SimulatorConfig) -> Result<Vec<Process>> {
    if let Some(count) = cli.random {
        let count = parse_count(&count.to_string(), config).map_err(|e| Error::from(vec![e]))?;
        return Ok(WorkloadGenerator::new(cli.seed)
            .with_count(count, count)
            .generate());
    }

    let rows: Vec<(String, String)> = match &cli.input {
        Some(path) => read_input_file(path)?,
        None => cli.processes.iter().map(|p| split_pair(p)).collect(),
    };
    Ok(parse_processes(&rows, config)?)
}

fn read_input_file(path: &Path) -> Result<Vec<(String, String)>> {
    let text = std::fs::read_to_string(path)?;
    let rows: Vec<InputRow> = serde_json::from_str(&text)?;
    Ok(rows
        .into_iter()
        .map(|r| (r.arrival.to_string(), r.burst.to_string()))
        .collect())
}

/// Splits `ARRIVAL:BURST`; a missing burst is left empty for validation to report.
fn split_pair(text: &str) -> (String, String) {
    match text.split_once(':') {
        Some((arrival, burst)) => (arrival.to_string(), burst.to_string()),
        None => (text.to_string(), String::new()),
    }
}

fn render_text(
    out: &mut impl Write,
    simulation: &Simulation,
    metrics: &ScheduleMetrics,
) -> io::Result<()> {
    writeln!(
        out,
        "{:<8}{:>8}{:>8}{:>8}{:>9}{:>12}{:>10}",
        "Process", "Arrival", "Burst", "Finish", "Waiting", "Turnaround", "Response"
    )?;
    for row in &metrics.per_process {
        writeln!(
            out,
            "{:<8}{:>8}{:>8}{:>8}{:>9}{:>12}{:>10}",
            format!("P{}", row.id),
            row.arrival,
            row.burst,
            row.finish_time,
            row.waiting,
            row.turnaround,
            row.response_time
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Average Waiting Time: {:.2}", metrics.avg_waiting)?;
    writeln!(out, "Average Turnaround Time: {:.2}", metrics.avg_turnaround)?;
    writeln!(out, "Average Response Time: {:.2}", metrics.avg_response)?;
    writeln!(
        out,
        "CPU Utilization: {:.2}%  Context Switches: {}",
        metrics.cpu_utilization * 100.0,
        metrics.context_switches
    )?;

    writeln!(out)?;
    write!(out, "Gantt:")?;
    let mut cursor = 0;
    for segment in simulation.timeline() {
        if segment.start > cursor {
            write!(out, " | idle {cursor}-{}", segment.start)?;
        }
        write!(
            out,
            " | P{} {}-{}",
            segment.process_id, segment.start, segment.end
        )?;
        cursor = segment.end;
    }
    writeln!(out, " |")
}
