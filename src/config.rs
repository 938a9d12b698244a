use std::net::Ipv4Addr;
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::traffic::{BroadcastStrategy, PortMap};

/// Top-level configuration structure that mirrors the YAML configuration.
///
/// Every section is optional; omitted values fall back to the defaults of
/// the reference grid experiment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub inputs: InputFiles,
    pub outputs: OutputFiles,
    pub timing: TimingConfig,
    pub link: LinkConfig,
    pub traffic: TrafficConfig,
    pub addressing: AddressingConfig,
}

/// Input file names, relative to the input directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputFiles {
    pub adjacency_matrix: String,
    pub node_coordinates: String,
    pub network_size: String,
    pub n_degrees: String,
}

/// Output file names, relative to the output directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputFiles {
    pub node_interfaces: String,
    pub plan: String,
}

/// Simulation clock settings, in seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub sim_time: f64,
    pub sink_start: f64,
    pub sink_stop: f64,
    pub app_start: f64,
    pub app_stop: f64,
}

/// Attributes shared by every point-to-point link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    /// Data rate string such as "10Mbps"
    pub data_rate: String,
    /// Propagation delay such as "2ms"
    #[serde(with = "humantime_serde")]
    pub delay: Duration,
}

/// Traffic rates, ports and planning options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrafficConfig {
    /// Packet size is `base_packet_rate * 1000` bytes
    pub base_packet_rate: f64,
    pub coordination_rate: f64,
    pub global_rate: f64,
    pub internet_rate: f64,
    pub ports: PortMap,
    pub broadcast_scan: BroadcastStrategy,
    /// Fixed jitter seed; a fresh seed is drawn each run when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jitter_seed: Option<u64>,
}

/// Base network and mask for link subnets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddressingConfig {
    pub base: Ipv4Addr,
    pub mask: Ipv4Addr,
}

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid timing configuration: {0}")]
    InvalidTiming(String),
    #[error("Invalid link configuration: {0}")]
    InvalidLink(String),
    #[error("Invalid traffic configuration: {0}")]
    InvalidTraffic(String),
    #[error("Invalid file configuration: {0}")]
    InvalidFiles(String),
}

static DATA_RATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d+(\.\d+)?\s*([kKMG]?bps|[kKMG]?Bps|[kKMG]?b/s|[kKMG]?B/s)$").expect("Invalid data rate regex")
});

impl SimulationConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.timing.validate()?;

        if !DATA_RATE.is_match(self.link.data_rate.trim()) {
            return Err(ValidationError::InvalidLink(format!(
                "data_rate '{}' is not a rate such as \"10Mbps\"",
                self.link.data_rate
            )));
        }

        self.traffic.validate()?;

        let files = [
            ("inputs.adjacency_matrix", &self.inputs.adjacency_matrix),
            ("inputs.node_coordinates", &self.inputs.node_coordinates),
            ("inputs.network_size", &self.inputs.network_size),
            ("inputs.n_degrees", &self.inputs.n_degrees),
            ("outputs.node_interfaces", &self.outputs.node_interfaces),
            ("outputs.plan", &self.outputs.plan),
        ];
        for (field, name) in files {
            if name.trim().is_empty() {
                return Err(ValidationError::InvalidFiles(format!("{} cannot be empty", field)));
            }
        }

        Ok(())
    }

    /// Packet size in bytes for on/off applications
    pub fn packet_size(&self) -> u32 {
        (self.traffic.base_packet_rate * 1000.0) as u32
    }
}

impl TimingConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        let values = [
            ("sim_time", self.sim_time),
            ("sink_start", self.sink_start),
            ("sink_stop", self.sink_stop),
            ("app_start", self.app_start),
            ("app_stop", self.app_stop),
        ];
        for (name, value) in values {
            if !value.is_finite() || value < 0.0 {
                return Err(ValidationError::InvalidTiming(format!(
                    "{} must be a non-negative number of seconds, got {}",
                    name, value
                )));
            }
        }

        if self.sink_start >= self.sink_stop {
            return Err(ValidationError::InvalidTiming(
                "sink_start must be before sink_stop".to_string(),
            ));
        }
        if self.app_start >= self.app_stop {
            return Err(ValidationError::InvalidTiming(
                "app_start must be before app_stop".to_string(),
            ));
        }
        if self.sink_stop > self.sim_time || self.app_stop > self.sim_time {
            return Err(ValidationError::InvalidTiming(format!(
                "sinks and applications must stop before sim_time ({}s)",
                self.sim_time
            )));
        }
        if self.app_start + 1.0 > self.app_stop {
            log::warn!(
                "Application window {}s..{}s is shorter than the 1s start jitter; some flows may never send",
                self.app_start,
                self.app_stop
            );
        }

        Ok(())
    }
}

impl TrafficConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        let rates = [
            ("base_packet_rate", self.base_packet_rate),
            ("coordination_rate", self.coordination_rate),
            ("global_rate", self.global_rate),
            ("internet_rate", self.internet_rate),
        ];
        for (name, rate) in rates {
            if !rate.is_finite() || rate <= 0.0 {
                return Err(ValidationError::InvalidTraffic(format!(
                    "{} must be positive, got {}",
                    name, rate
                )));
            }
        }

        // On/off means are rate/2 and 1 - rate/2
        if self.coordination_rate >= 2.0 {
            return Err(ValidationError::InvalidTraffic(format!(
                "coordination_rate {} leaves no off time for bursty flows",
                self.coordination_rate
            )));
        }

        let ports = self.ports.all();
        for (index, (class, port)) in ports.iter().enumerate() {
            if ports[..index].iter().any(|(_, other)| other == port) {
                return Err(ValidationError::InvalidTraffic(format!(
                    "port {} for {:?} traffic is already in use",
                    port, class
                )));
            }
        }

        Ok(())
    }
}

/// Default implementations
impl Default for InputFiles {
    fn default() -> Self {
        Self {
            adjacency_matrix: "10_adjacency_matrix.txt".to_string(),
            node_coordinates: "10_node_coordinates.txt".to_string(),
            network_size: "10_network_size.txt".to_string(),
            n_degrees: "10_n_degrees.txt".to_string(),
        }
    }
}

impl Default for OutputFiles {
    fn default() -> Self {
        Self {
            node_interfaces: "20_node_interfaces.txt".to_string(),
            plan: "20_simulation_plan.yaml".to_string(),
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            sim_time: 3.00 + 8.0,
            sink_start: 1.0001,
            sink_stop: 2.90001 + 8.0,
            app_start: 2.0001,
            app_stop: 2.80001 + 8.0,
        }
    }
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            data_rate: "10Mbps".to_string(),
            delay: Duration::from_millis(2),
        }
    }
}

impl Default for TrafficConfig {
    fn default() -> Self {
        Self {
            base_packet_rate: 10.0,
            coordination_rate: 1.0,
            global_rate: 1.0,
            internet_rate: 10.0,
            ports: PortMap::default(),
            broadcast_scan: BroadcastStrategy::default(),
            jitter_seed: None,
        }
    }
}

impl Default for AddressingConfig {
    fn default() -> Self {
        Self {
            base: Ipv4Addr::new(10, 0, 0, 0),
            mask: Ipv4Addr::new(255, 255, 255, 252),
        }
    }
}
