use std::path::PathBuf;

use clap::Parser;
use color_eyre::Result;
use env_logger::Env;
use log::{error, info};

use gridtopo::config_loader::{self, CliOverrides};
use gridtopo::input::InputError;
use gridtopo::orchestrator;
use gridtopo::plan::PlanFormat;
use gridtopo::traffic::BroadcastStrategy;

/// Topology and traffic plan generator for grid network simulations
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding the adjacency matrix, coordinate, size and degree files
    #[arg(short, long, default_value = "scratch/output")]
    input_dir: PathBuf,

    /// Output directory for the interface table and plan (defaults to the input directory)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Optional YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for start-time jitter
    #[arg(long)]
    seed: Option<u64>,

    /// Encoding of the simulation plan
    #[arg(long, value_enum, default_value_t = PlanFormat::Yaml)]
    format: PlanFormat,

    /// Broadcast neighbor search strategy
    #[arg(long, value_enum)]
    broadcast_scan: Option<BroadcastStrategy>,
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    let args = Args::parse();

    // Initialize logging with default filter level of "info"
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    if let Err(report) = run(args) {
        // A malformed coordinate line stops the run on the spot
        if let Some(input_error) = report
            .chain()
            .find_map(|cause| cause.downcast_ref::<InputError>())
            .filter(|e| e.is_abrupt())
        {
            error!("{}", input_error);
            std::process::exit(1);
        }
        return Err(report);
    }

    Ok(())
}

fn run(args: Args) -> Result<()> {
    info!("Starting gridtopo v{}", env!("CARGO_PKG_VERSION"));
    info!("Input directory: {:?}", args.input_dir);

    let mut config = config_loader::load_or_default(args.config.as_deref())?;
    config_loader::apply_overrides(
        &mut config,
        &CliOverrides {
            jitter_seed: args.seed,
            broadcast_scan: args.broadcast_scan,
        },
    )?;

    let output_dir = args.output.unwrap_or_else(|| args.input_dir.clone());
    info!("Output directory: {:?}", output_dir);

    let (plan, files) = orchestrator::generate(&config, &args.input_dir, &output_dir, args.format)?;

    info!(
        "Generated plan with {} nodes, {} links, {} sinks and {} flows",
        plan.summary.node_count,
        plan.summary.link_count,
        plan.summary.sink_count,
        plan.flows.len()
    );
    info!("Interface table: {:?}", files.node_interfaces);
    info!("Simulation plan: {:?}", files.plan);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let args = Args::parse_from(["gridtopo"]);

        assert_eq!(args.input_dir, PathBuf::from("scratch/output"));
        assert_eq!(args.output, None);
        assert_eq!(args.config, None);
        assert_eq!(args.seed, None);
        assert_eq!(args.format, PlanFormat::Yaml);
        assert_eq!(args.broadcast_scan, None);
    }

    #[test]
    fn test_override_args() {
        let args = Args::parse_from([
            "gridtopo",
            "--input-dir",
            "run1",
            "--output",
            "run1/out",
            "--seed",
            "42",
            "--format",
            "json",
            "--broadcast-scan",
            "grid-neighbor",
        ]);

        assert_eq!(args.input_dir, PathBuf::from("run1"));
        assert_eq!(args.output, Some(PathBuf::from("run1/out")));
        assert_eq!(args.seed, Some(42));
        assert_eq!(args.format, PlanFormat::Json);
        assert_eq!(args.broadcast_scan, Some(BroadcastStrategy::GridNeighbor));
    }
}
