//! Traffic planning module.
//!
//! This module derives the application flows and packet sinks of a
//! simulation from grid proximity and the adjacency matrix.

pub mod flow;
pub mod jitter;
pub mod neighbors;
pub mod planner;
pub mod sinks;

// Re-export key types and functions for easier access
pub use flow::{FlowPattern, PortMap, TrafficClass, TrafficFlow};
pub use jitter::{JitterSource, UniformJitter};
pub use neighbors::{BroadcastScan, BroadcastStrategy, FlatOffsetScan, GridNeighborScan};
pub use planner::{FlowWindow, TrafficPlanner, BROADCAST_REPEATS};
pub use sinks::{plan_sinks, PacketSink};
