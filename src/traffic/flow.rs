//! Traffic flow descriptors.

use serde::{Deserialize, Serialize};

/// Purpose of a flow, which also selects its destination port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrafficClass {
    /// Bursty traffic between grid-local nodes
    Coordination,
    /// Repeated constant-rate traffic to one broadcast neighbor
    Global,
    /// Background internet traffic; only sinks are planned for it
    Internet,
}

/// UDP ports per traffic class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortMap {
    pub coordination: u16,
    pub global: u16,
    pub internet: u16,
}

impl Default for PortMap {
    fn default() -> Self {
        Self {
            coordination: 9,
            global: 10,
            internet: 11,
        }
    }
}

impl PortMap {
    pub fn port_for(&self, class: TrafficClass) -> u16 {
        match class {
            TrafficClass::Coordination => self.coordination,
            TrafficClass::Global => self.global,
            TrafficClass::Internet => self.internet,
        }
    }

    /// Ports in sink installation order
    pub fn all(&self) -> [(TrafficClass, u16); 3] {
        [
            (TrafficClass::Coordination, self.coordination),
            (TrafficClass::Global, self.global),
            (TrafficClass::Internet, self.internet),
        ]
    }
}

/// Sending pattern of a flow
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FlowPattern {
    /// Always on at `rate`
    ConstantRate { rate: f64 },
    /// Exponentially distributed on and off periods
    OnOff { on_mean: f64, off_mean: f64 },
}

impl FlowPattern {
    pub fn constant(rate: f64) -> Self {
        Self::ConstantRate { rate }
    }

    /// On-time mean `rate / 2`, off-time mean `1 - rate / 2`
    pub fn bursty(rate: f64) -> Self {
        Self::OnOff {
            on_mean: rate / 2.0,
            off_mean: 1.0 - rate / 2.0,
        }
    }

    pub fn is_bursty(&self) -> bool {
        matches!(self, Self::OnOff { .. })
    }
}

/// One application flow handed to the simulator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrafficFlow {
    pub source: usize,
    pub destination: usize,
    pub class: TrafficClass,
    pub rate: f64,
    pub pattern: FlowPattern,
    pub start_time: f64,
    pub stop_time: f64,
    pub port: u16,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bursty_means() {
        assert_eq!(
            FlowPattern::bursty(1.0),
            FlowPattern::OnOff { on_mean: 0.5, off_mean: 0.5 }
        );
        assert_eq!(
            FlowPattern::bursty(0.5),
            FlowPattern::OnOff { on_mean: 0.25, off_mean: 0.75 }
        );
        assert!(!FlowPattern::constant(1.0).is_bursty());
    }

    #[test]
    fn test_default_ports() {
        let ports = PortMap::default();
        assert_eq!(ports.port_for(TrafficClass::Coordination), 9);
        assert_eq!(ports.port_for(TrafficClass::Global), 10);
        assert_eq!(ports.port_for(TrafficClass::Internet), 11);
    }

    #[test]
    fn test_pattern_serialization() {
        let yaml = serde_yaml::to_string(&FlowPattern::constant(1.0)).unwrap();
        assert!(yaml.contains("kind: constant_rate"));
        assert!(yaml.contains("rate: 1.0"));
    }
}
