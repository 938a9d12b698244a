//! Plan generation orchestrator.
//!
//! This module coordinates the overall generation process, managing the flow
//! from input loading through address assignment, traffic planning and the
//! written output files.

use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use log::info;

use crate::config::SimulationConfig;
use crate::input::{InputPaths, NetworkInputs};
use crate::ip::SubnetAllocator;
use crate::plan::{PlanFormat, PlanParts, SimulationPlan};
use crate::topology::{build_topology, Topology};
use crate::traffic::{plan_sinks, TrafficPlanner, UniformJitter};

/// Files written by a generation run
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedFiles {
    pub node_interfaces: PathBuf,
    pub plan: PathBuf,
}

/// Build the plan for already loaded inputs.
///
/// The topology is returned alongside the plan since the plan only carries
/// its links, not the interface table.
pub fn build_plan(
    config: &SimulationConfig,
    inputs: &NetworkInputs,
    jitter: &mut UniformJitter,
) -> Result<(SimulationPlan, Topology)> {
    let mut allocator = SubnetAllocator::new(config.addressing.base, config.addressing.mask)
        .map_err(|e| eyre!("Invalid addressing configuration: {}", e))?;

    let topology = build_topology(&inputs.matrix, &mut allocator)
        .map_err(|e| eyre!("Failed to assign link addresses: {}", e))?;

    let planner = TrafficPlanner::from_config(config);
    let flows = planner.plan(&inputs.matrix, &inputs.grid, inputs.degree, jitter);

    let sinks = plan_sinks(
        inputs.node_count(),
        &config.traffic.ports,
        config.timing.sink_start,
        config.timing.sink_stop,
    );
    info!("Planned {} packet sinks", sinks.len());

    let plan = SimulationPlan::assemble(PlanParts {
        config,
        inputs,
        topology: &topology,
        sinks,
        flows,
        jitter_seed: jitter.seed(),
        broadcast_scan: planner.scan_name(),
    });

    Ok((plan, topology))
}

/// Load the inputs from `input_dir`, build the plan and write the interface
/// table and plan document into `output_dir`.
pub fn generate(
    config: &SimulationConfig,
    input_dir: &Path,
    output_dir: &Path,
    format: PlanFormat,
) -> Result<(SimulationPlan, GeneratedFiles)> {
    let paths = InputPaths::in_dir(input_dir, &config.inputs);
    info!("Loading network inputs from {:?}", input_dir);
    let inputs = NetworkInputs::load(&paths)
        .wrap_err_with(|| format!("Failed to load network inputs from '{}'", input_dir.display()))?;
    info!(
        "Loaded {} nodes on a {}x{} grid (degree {})",
        inputs.node_count(),
        inputs.grid.ny(),
        inputs.grid.nx(),
        inputs.degree.value()
    );

    let mut jitter = UniformJitter::new(config.traffic.jitter_seed);
    let (plan, topology) = build_plan(config, &inputs, &mut jitter)?;

    fs::create_dir_all(output_dir)
        .wrap_err_with(|| format!("Failed to create output directory '{}'", output_dir.display()))?;

    let files = GeneratedFiles {
        node_interfaces: output_dir.join(&config.outputs.node_interfaces),
        plan: output_dir.join(&config.outputs.plan),
    };

    topology
        .interfaces
        .write_to(&files.node_interfaces)
        .wrap_err_with(|| format!("Failed to write interface table to '{}'", files.node_interfaces.display()))?;
    info!("Wrote interface table: {:?}", files.node_interfaces);

    plan.write_to(&files.plan, format)?;
    info!("Wrote simulation plan: {:?}", files.plan);

    Ok((plan, files))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{parse_coordinates, parse_matrix, DegreeThreshold, GridSize};
    use crate::plan::InternetTraffic;
    use crate::traffic::TrafficClass;

    fn square_inputs(degree: i64) -> NetworkInputs {
        let matrix = parse_matrix("0 1 1 0\n0 0 0 1\n0 0 0 1\n0 0 0 0\n").unwrap();
        let coordinates = parse_coordinates("0 0\n1 0\n0 1\n1 1\n").unwrap();
        NetworkInputs::from_parts(matrix, coordinates, GridSize { ny: 2, nx: 2 }, DegreeThreshold::new(degree))
            .unwrap()
    }

    #[test]
    fn test_build_plan_counts() {
        let config = SimulationConfig::default();
        let inputs = square_inputs(1);
        let mut jitter = UniformJitter::seeded(3);

        let (plan, topology) = build_plan(&config, &inputs, &mut jitter).unwrap();

        assert_eq!(topology.link_count, 4);
        assert_eq!(plan.summary.node_count, 4);
        assert_eq!(plan.summary.link_count, 4);
        assert_eq!(plan.summary.interface_count, 8);
        assert_eq!(plan.summary.sink_count, 12);
        assert_eq!(plan.summary.coordination_flows, 4);
        assert_eq!(plan.summary.global_flows, 9);
        assert_eq!(plan.metadata.jitter_seed, Some(3));
        assert_eq!(plan.metadata.broadcast_scan, "flat_offset");
        assert_eq!(plan.applications.packet_size, 10000);
        assert_eq!(plan.applications.data_rate, "10000Bps");
        assert_eq!(plan.link.delay, "2ms");
        assert_eq!(plan.internet, InternetTraffic { rate: 10.0, port: 11 });
    }

    #[test]
    fn test_internet_rate_reaches_plan() {
        let mut config = SimulationConfig::default();
        config.traffic.internet_rate = 25.0;
        config.traffic.ports.internet = 8080;
        let inputs = square_inputs(1);
        let mut jitter = UniformJitter::seeded(3);

        let (plan, _) = build_plan(&config, &inputs, &mut jitter).unwrap();

        assert_eq!(plan.internet, InternetTraffic { rate: 25.0, port: 8080 });
        assert!(plan.flows.iter().all(|f| f.class != TrafficClass::Internet));
        assert_eq!(plan.sinks.iter().filter(|s| s.port == 8080).count(), 4);
    }

    #[test]
    fn test_build_plan_nodes_follow_grid() {
        let config = SimulationConfig::default();
        let inputs = square_inputs(1);
        let mut jitter = UniformJitter::seeded(3);

        let (plan, _) = build_plan(&config, &inputs, &mut jitter).unwrap();

        assert_eq!(plan.nodes.len(), 4);
        assert_eq!(plan.nodes[3].grid.x, 1);
        assert_eq!(plan.nodes[3].grid.y, 1);
        assert_eq!(plan.nodes[1].coordinate.x, 1.0);
        assert_eq!(plan.links[0].source_address.to_string(), "10.0.0.1");
        assert_eq!(plan.links[0].target_address.to_string(), "10.0.0.2");
        assert_eq!(plan.links[0].prefix_len, 30);
    }

    #[test]
    fn test_build_plan_rejects_bad_mask() {
        let mut config = SimulationConfig::default();
        config.addressing.mask = "255.0.255.0".parse().unwrap();
        let inputs = square_inputs(1);
        let mut jitter = UniformJitter::seeded(3);

        assert!(build_plan(&config, &inputs, &mut jitter).is_err());
    }

    #[test]
    fn test_flows_respect_configured_window() {
        let mut config = SimulationConfig::default();
        config.timing.app_start = 4.0;
        config.timing.app_stop = 9.0;
        let inputs = square_inputs(1);
        let mut jitter = UniformJitter::seeded(11);

        let (plan, _) = build_plan(&config, &inputs, &mut jitter).unwrap();

        for flow in &plan.flows {
            assert!(flow.start_time >= 4.0 && flow.start_time < 5.0);
            assert_eq!(flow.stop_time, 9.0);
            if flow.class == TrafficClass::Global {
                assert_eq!(flow.port, 10);
            }
        }
    }
}
