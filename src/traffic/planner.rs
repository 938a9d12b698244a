//! Degree-based traffic planning.
//!
//! Every node sends bursty coordination traffic to the nodes within the
//! degree threshold on the grid, and three constant-rate broadcast flows to
//! the first linked node found by the broadcast scan. Flows are emitted in a
//! fixed order (source ascending; a source's coordination flows by ascending
//! destination, then its broadcast flows) so a seeded jitter source yields
//! the same plan every time.

use log::{debug, info};

use super::flow::{FlowPattern, PortMap, TrafficClass, TrafficFlow};
use super::jitter::JitterSource;
use super::neighbors::{BroadcastScan, FlatOffsetScan};
use crate::config::{SimulationConfig, TrafficConfig};
use crate::input::{AdjacencyMatrix, DegreeThreshold, Grid};

/// Broadcast flows emitted towards the chosen neighbor
pub const BROADCAST_REPEATS: usize = 3;

/// Common application start and stop times
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowWindow {
    pub start: f64,
    pub stop: f64,
}

pub struct TrafficPlanner {
    coordination_rate: f64,
    global_rate: f64,
    internet_rate: f64,
    ports: PortMap,
    window: FlowWindow,
    scan: Box<dyn BroadcastScan>,
}

impl TrafficPlanner {
    pub fn new(coordination_rate: f64, global_rate: f64, ports: PortMap, window: FlowWindow) -> Self {
        Self {
            coordination_rate,
            global_rate,
            internet_rate: TrafficConfig::default().internet_rate,
            ports,
            window,
            scan: Box::new(FlatOffsetScan),
        }
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(
            config.traffic.coordination_rate,
            config.traffic.global_rate,
            config.traffic.ports,
            FlowWindow {
                start: config.timing.app_start,
                stop: config.timing.app_stop,
            },
        )
        .with_scan(config.traffic.broadcast_scan.scanner())
        .with_internet_rate(config.traffic.internet_rate)
    }

    pub fn with_internet_rate(mut self, rate: f64) -> Self {
        self.internet_rate = rate;
        self
    }

    /// Replace the broadcast neighbor strategy
    pub fn with_scan(mut self, scan: Box<dyn BroadcastScan>) -> Self {
        self.scan = scan;
        self
    }

    pub fn scan_name(&self) -> &'static str {
        self.scan.name()
    }

    fn flow<J>(&self, source: usize, destination: usize, class: TrafficClass, jitter: &mut J) -> TrafficFlow
    where
        J: JitterSource + ?Sized,
    {
        let (rate, pattern) = match class {
            TrafficClass::Coordination => (self.coordination_rate, FlowPattern::bursty(self.coordination_rate)),
            TrafficClass::Global => (self.global_rate, FlowPattern::constant(self.global_rate)),
            TrafficClass::Internet => (self.internet_rate, FlowPattern::constant(self.internet_rate)),
        };

        TrafficFlow {
            source,
            destination,
            class,
            rate,
            pattern,
            start_time: self.window.start + jitter.next_offset(),
            stop_time: self.window.stop,
            port: self.ports.port_for(class),
        }
    }

    /// Plan all flows for a validated network.
    ///
    /// `grid` must describe exactly `matrix.size()` nodes.
    pub fn plan<J>(
        &self,
        matrix: &AdjacencyMatrix,
        grid: &Grid,
        degree: DegreeThreshold,
        jitter: &mut J,
    ) -> Vec<TrafficFlow>
    where
        J: JitterSource + ?Sized,
    {
        debug_assert_eq!(matrix.size(), grid.node_count());
        let node_count = matrix.size();
        let mut flows = Vec::new();

        for i in 0..node_count {
            let from = grid.position(i);

            for j in 0..node_count {
                if i == j {
                    continue;
                }
                // Degree 1 only checks direct adjacency rather than path length
                if degree.requires_direct_link() && !matrix.get(i, j) {
                    continue;
                }
                if degree.admits(from, grid.position(j)) {
                    flows.push(self.flow(i, j, TrafficClass::Coordination, jitter));
                }
            }

            match self.scan.find_target(i, matrix, grid) {
                Some(target) => {
                    debug!("Node {} broadcasts to node {}", i, target);
                    for _ in 0..BROADCAST_REPEATS {
                        flows.push(self.flow(i, target, TrafficClass::Global, jitter));
                    }
                }
                None => debug!("Node {} has no broadcast neighbor", i),
            }
        }

        info!(
            "Planned {} flows for {} nodes (degree {}, {} broadcast scan)",
            flows.len(),
            node_count,
            degree.value(),
            self.scan.name()
        );
        flows
    }
}
