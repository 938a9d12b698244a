//! # Simulation Plan Module
//!
//! This module assembles the declarative plan consumed by the packet-level
//! simulator and writes it to disk. The simulator owns everything that
//! happens at run time (opening sockets, routing, advancing the clock); the
//! plan only states what exists and when it starts.
//!
//! ## Example Generated Structure
//!
//! ```yaml
//! metadata:
//!   generator: gridtopo 0.1.0
//!   broadcast_scan: flat_offset
//!   ny: 2
//!   nx: 2
//!   degree: 1
//! internet:
//!   rate: 10.0
//!   port: 11
//! link:
//!   data_rate: 10Mbps
//!   delay: 2ms
//! links:
//! - source: 0
//!   target: 1
//!   source_address: 10.0.0.1
//!   target_address: 10.0.0.2
//!   prefix_len: 30
//! flows:
//! - source: 0
//!   destination: 1
//!   class: coordination
//!   rate: 1.0
//!   pattern:
//!     kind: on_off
//!     on_mean: 0.5
//!     off_mean: 0.5
//!   start_time: 2.4172
//!   stop_time: 10.80001
//!   port: 9
//! ```

pub mod types;

use std::fs;
use std::path::Path;

use chrono::Utc;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;

use crate::config::SimulationConfig;
use crate::input::NetworkInputs;
use crate::topology::Topology;
use crate::traffic::{PacketSink, TrafficClass, TrafficFlow};

// Re-export commonly used types for convenience
pub use types::{
    ApplicationDefaults, InternetTraffic, LinkAttributes, PlanLink, PlanMetadata, PlanNode, PlanSummary,
    SimulationPlan,
};

/// Output encoding of the plan document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum PlanFormat {
    #[default]
    Yaml,
    Json,
}

/// Everything the plan is assembled from
pub struct PlanParts<'a> {
    pub config: &'a SimulationConfig,
    pub inputs: &'a NetworkInputs,
    pub topology: &'a Topology,
    pub sinks: Vec<PacketSink>,
    pub flows: Vec<TrafficFlow>,
    pub jitter_seed: Option<u64>,
    pub broadcast_scan: &'a str,
}

impl SimulationPlan {
    pub fn assemble(parts: PlanParts<'_>) -> Self {
        let PlanParts {
            config,
            inputs,
            topology,
            sinks,
            flows,
            jitter_seed,
            broadcast_scan,
        } = parts;

        let nodes = inputs
            .coordinates
            .iter()
            .enumerate()
            .map(|(index, coordinate)| PlanNode {
                index,
                grid: inputs.grid.position(index),
                coordinate: *coordinate,
            })
            .collect();

        let links = topology
            .links
            .iter()
            .map(|link| PlanLink {
                source: link.source,
                target: link.target,
                source_address: link.addresses.first,
                target_address: link.addresses.second,
                prefix_len: link.addresses.prefix_len,
            })
            .collect();

        let count = |class| flows.iter().filter(|f| f.class == class).count();
        let summary = PlanSummary {
            node_count: inputs.node_count(),
            link_count: topology.link_count,
            interface_count: topology.interfaces.len(),
            sink_count: sinks.len(),
            coordination_flows: count(TrafficClass::Coordination),
            global_flows: count(TrafficClass::Global),
        };

        let packet_size = config.packet_size();

        Self {
            metadata: PlanMetadata {
                generator: format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
                generated_at: Utc::now(),
                jitter_seed,
                broadcast_scan: broadcast_scan.to_string(),
                ny: inputs.grid.ny(),
                nx: inputs.grid.nx(),
                degree: inputs.degree.value(),
            },
            timing: config.timing.clone(),
            link: LinkAttributes {
                data_rate: config.link.data_rate.clone(),
                delay: humantime_serde::re::humantime::format_duration(config.link.delay).to_string(),
            },
            applications: ApplicationDefaults {
                packet_size,
                data_rate: format!("{}Bps", packet_size),
            },
            internet: InternetTraffic {
                rate: config.traffic.internet_rate,
                port: config.traffic.ports.internet,
            },
            nodes,
            links,
            sinks,
            flows,
            summary,
        }
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).wrap_err("Failed to serialize simulation plan to YAML")
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).wrap_err("Failed to serialize simulation plan to JSON")
    }

    /// Write the plan in the requested format
    pub fn write_to(&self, path: &Path, format: PlanFormat) -> Result<()> {
        let content = match format {
            PlanFormat::Yaml => self.to_yaml()?,
            PlanFormat::Json => self.to_json()?,
        };
        fs::write(path, content)
            .wrap_err_with(|| format!("Failed to write simulation plan to '{}'", path.display()))
    }
}
