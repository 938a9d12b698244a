//! Trace relabeling CLI for grid simulations.
//!
//! Rewrites the interface addresses in a packet trace so each one names the
//! node pair of its link.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Context, Result};
use env_logger::Env;
use log::info;

use gridtopo::ip::InterfaceTable;
use gridtopo::relabel::AddressRelabeler;

#[derive(Parser, Debug)]
#[command(name = "relabel-trace")]
#[command(about = "Rewrite trace addresses as node-pair labels")]
#[command(version)]
struct Cli {
    /// Interface table written by gridtopo
    #[arg(short, long, default_value = "scratch/output/20_node_interfaces.txt")]
    interfaces: PathBuf,

    /// Packet trace to rewrite
    #[arg(short, long)]
    trace: PathBuf,

    /// Output path for the relabeled trace
    #[arg(short, long)]
    output: PathBuf,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let table = InterfaceTable::load(&cli.interfaces)
        .with_context(|| format!("Failed to load interface table: {}", cli.interfaces.display()))?;
    let relabeler = AddressRelabeler::from_table(&table);
    info!(
        "Loaded {} interface addresses for {} nodes",
        relabeler.len(),
        table.node_count()
    );

    let trace = fs::read_to_string(&cli.trace)
        .with_context(|| format!("Failed to read trace: {}", cli.trace.display()))?;

    let command: Vec<String> = std::env::args().collect();
    let mut output = format!("# This file was generated with \"{}\"\n", command.join(" "));
    output.push_str(&relabeler.relabel(&trace));

    fs::write(&cli.output, output)
        .with_context(|| format!("Failed to write relabeled trace: {}", cli.output.display()))?;
    info!("Wrote relabeled trace: {:?}", cli.output);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from([
            "relabel-trace",
            "--trace",
            "n-node-ppp.tr",
            "--output",
            "trace_custom_addrs.tr",
        ]);

        assert_eq!(cli.interfaces, PathBuf::from("scratch/output/20_node_interfaces.txt"));
        assert_eq!(cli.trace, PathBuf::from("n-node-ppp.tr"));
        assert_eq!(cli.output, PathBuf::from("trace_custom_addrs.tr"));
    }
}
