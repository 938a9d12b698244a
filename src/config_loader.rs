use crate::config::SimulationConfig;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::info;
use std::fs::File;
use std::path::Path;

/// Load and parse configuration from a YAML file
pub fn load_config(config_path: &Path) -> Result<SimulationConfig> {
    info!("Loading configuration from: {:?}", config_path);

    let file = File::open(config_path)
        .wrap_err_with(|| format!("Failed to open configuration file '{}'", config_path.display()))?;

    let config: SimulationConfig = serde_yaml::from_reader(file)
        .wrap_err_with(|| format!("Failed to parse configuration file '{}'", config_path.display()))?;

    config.validate()?;

    Ok(config)
}

/// Load the configuration file if one was given, otherwise use defaults
pub fn load_or_default(config_path: Option<&Path>) -> Result<SimulationConfig> {
    match config_path {
        Some(path) => load_config(path),
        None => {
            info!("No configuration file given, using defaults");
            let config = SimulationConfig::default();
            config.validate()?;
            Ok(config)
        }
    }
}

/// CLI arguments that override YAML settings
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub jitter_seed: Option<u64>,
    pub broadcast_scan: Option<crate::traffic::BroadcastStrategy>,
}

/// Apply CLI overrides to a configuration
pub fn apply_overrides(config: &mut SimulationConfig, overrides: &CliOverrides) -> Result<()> {
    if let Some(seed) = overrides.jitter_seed {
        info!("Using jitter seed {} from the command line", seed);
        config.traffic.jitter_seed = Some(seed);
    }

    if let Some(strategy) = overrides.broadcast_scan {
        info!("Using {:?} broadcast scan from the command line", strategy);
        config.traffic.broadcast_scan = strategy;
    }

    // Re-validate after applying overrides
    config.validate()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traffic::BroadcastStrategy;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config() {
        let yaml = r#"
timing:
  app_start: 3.0
  app_stop: 9.5
traffic:
  jitter_seed: 7
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", yaml).unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.timing.app_start, 3.0);
        assert_eq!(config.timing.app_stop, 9.5);
        assert_eq!(config.timing.sim_time, 11.0);
        assert_eq!(config.traffic.jitter_seed, Some(7));
    }

    #[test]
    fn test_load_rejects_invalid_config() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "timing:\n  app_start: 12.0\n").unwrap();

        assert!(load_config(temp_file.path()).is_err());
    }

    #[test]
    fn test_missing_config_file() {
        let err = load_config(Path::new("/nonexistent/gridtopo.yaml")).unwrap_err();
        assert!(format!("{:?}", err).contains("gridtopo.yaml"));
    }

    #[test]
    fn test_apply_overrides() {
        let mut config = load_or_default(None).unwrap();
        let overrides = CliOverrides {
            jitter_seed: Some(99),
            broadcast_scan: Some(BroadcastStrategy::GridNeighbor),
        };

        apply_overrides(&mut config, &overrides).unwrap();
        assert_eq!(config.traffic.jitter_seed, Some(99));
        assert_eq!(config.traffic.broadcast_scan, BroadcastStrategy::GridNeighbor);
    }
}
