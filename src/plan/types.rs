//! Simulation plan type definitions.
//!
//! This module contains the serializable structures handed to the packet
//! level simulator: nodes with their placement, links with their endpoint
//! addresses, packet sinks and application flows.

use std::net::Ipv4Addr;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::TimingConfig;
use crate::input::{Coordinate, GridPosition};
use crate::traffic::{PacketSink, TrafficFlow};

// ============================================================================
// Plan Document
// ============================================================================

/// Root of the generated plan document.
#[derive(Serialize, Debug)]
pub struct SimulationPlan {
    /// Where and how the plan was produced
    pub metadata: PlanMetadata,
    /// Simulation clock settings
    pub timing: TimingConfig,
    /// Attributes applied to every link
    pub link: LinkAttributes,
    /// Defaults for on/off applications
    pub applications: ApplicationDefaults,
    /// Internet load left out of the simulation
    pub internet: InternetTraffic,
    pub nodes: Vec<PlanNode>,
    pub links: Vec<PlanLink>,
    pub sinks: Vec<PacketSink>,
    pub flows: Vec<TrafficFlow>,
    /// Counts for quick inspection
    pub summary: PlanSummary,
}

/// Provenance of a plan.
#[derive(Serialize, Debug)]
pub struct PlanMetadata {
    /// Generator name and version
    pub generator: String,
    pub generated_at: DateTime<Utc>,
    /// Seed of the jitter source, when the run was seeded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jitter_seed: Option<u64>,
    /// Broadcast neighbor strategy used
    pub broadcast_scan: String,
    /// Grid rows
    pub ny: usize,
    /// Grid columns
    pub nx: usize,
    /// Locality degree threshold
    pub degree: i64,
}

/// Point-to-point link attributes.
#[derive(Serialize, Debug)]
pub struct LinkAttributes {
    /// Data rate (e.g., "10Mbps")
    pub data_rate: String,
    /// Propagation delay (e.g., "2ms")
    pub delay: String,
}

/// Defaults shared by every on/off application.
#[derive(Serialize, Debug)]
pub struct ApplicationDefaults {
    /// Packet size in bytes
    pub packet_size: u32,
    /// Default application data rate (e.g., "10000Bps")
    pub data_rate: String,
}

/// Internet traffic is identical for every node, so no flows are simulated
/// for it. Post-processing adds `rate` per node as a constant; only the sinks
/// on `port` exist in the simulation.
#[derive(Serialize, Debug, PartialEq)]
pub struct InternetTraffic {
    pub rate: f64,
    pub port: u16,
}

/// A simulated node.
#[derive(Serialize, Debug)]
pub struct PlanNode {
    pub index: usize,
    /// Position derived from the flat index
    pub grid: GridPosition,
    /// Physical placement from the coordinate file
    pub coordinate: Coordinate,
}

/// A link between two nodes with its endpoint addresses.
#[derive(Serialize, Debug)]
pub struct PlanLink {
    pub source: usize,
    pub target: usize,
    pub source_address: Ipv4Addr,
    pub target_address: Ipv4Addr,
    pub prefix_len: u8,
}

/// Aggregate counts.
#[derive(Serialize, Debug, Default, PartialEq, Eq)]
pub struct PlanSummary {
    pub node_count: usize,
    pub link_count: usize,
    pub interface_count: usize,
    pub sink_count: usize,
    pub coordination_flows: usize,
    pub global_flows: usize,
}
