//! Packet sinks.

use serde::Serialize;

use super::flow::{PortMap, TrafficClass};

/// UDP sink listening on one node and port
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PacketSink {
    pub node: usize,
    pub class: TrafficClass,
    pub port: u16,
    pub start_time: f64,
    pub stop_time: f64,
}

/// One sink per node per traffic port, node-major
pub fn plan_sinks(node_count: usize, ports: &PortMap, start_time: f64, stop_time: f64) -> Vec<PacketSink> {
    (0..node_count)
        .flat_map(|node| {
            ports.all().into_iter().map(move |(class, port)| PacketSink {
                node,
                class,
                port,
                start_time,
                stop_time,
            })
        })
        .collect()
}
