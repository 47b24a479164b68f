//! Scenario configuration: a named description of one simulation run.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::error::ExperimentError;

/// Network latency class of a scenario.
///
/// Translated by the workload builder into explicit broker-datacenter links;
/// `Normal` leaves the network unshaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LatencyClass {
    Normal,
    Low,
    High,
}

impl Display for LatencyClass {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            LatencyClass::Normal => write!(f, "Normal"),
            LatencyClass::Low => write!(f, "Low"),
            LatencyClass::High => write!(f, "High"),
        }
    }
}

/// Configuration of a single scenario.
///
/// Constructed once before a run, immutable during it, discarded after the
/// results are aggregated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Scenario label, used as the key in the comparative report.
    pub name: String,
    /// Number of cloudlets to submit.
    pub cloudlets: u32,
    /// Cloudlet length in abstract compute-instruction units.
    pub cloudlet_length: f64,
    /// Number of VMs to create.
    pub vms: u32,
    /// Uniform VM compute rate.
    pub vm_mips: f64,
    /// Per-VM compute rates for heterogeneous scenarios, assigned by VM index.
    /// When present, its length must equal `vms`.
    pub vm_mips_overrides: Option<Vec<f64>>,
    /// Number of hosts per datacenter.
    pub hosts_per_dc: u32,
    /// Host compute rate.
    pub host_mips: f64,
    /// Network latency class.
    pub latency: LatencyClass,
}

impl ScenarioConfig {
    /// Checks the scenario invariants.
    ///
    /// Returns [`ExperimentError::InvalidConfiguration`] if the cloudlet or
    /// VM count is below one, or a heterogeneous rate list does not match the
    /// VM count. Called before any engine interaction.
    pub fn validate(&self) -> Result<(), ExperimentError> {
        if self.cloudlets < 1 {
            return Err(ExperimentError::InvalidConfiguration(format!(
                "scenario '{}': cloudlet count must be at least 1",
                self.name
            )));
        }
        if self.vms < 1 {
            return Err(ExperimentError::InvalidConfiguration(format!(
                "scenario '{}': VM count must be at least 1",
                self.name
            )));
        }
        if let Some(overrides) = &self.vm_mips_overrides {
            if overrides.len() != self.vms as usize {
                return Err(ExperimentError::InvalidConfiguration(format!(
                    "scenario '{}': {} VM rate overrides for {} VMs",
                    self.name,
                    overrides.len(),
                    self.vms
                )));
            }
        }
        Ok(())
    }

    /// Nominal VM rate shown in the comparative table:
    /// the literal `Mixed` for heterogeneous scenarios.
    pub fn vm_mips_label(&self) -> String {
        if self.vm_mips_overrides.is_some() {
            "Mixed".to_string()
        } else {
            format!("{}", self.vm_mips)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ScenarioConfig {
        ScenarioConfig {
            name: "test".to_string(),
            cloudlets: 5,
            cloudlet_length: 10000.,
            vms: 2,
            vm_mips: 250.,
            vm_mips_overrides: None,
            hosts_per_dc: 1,
            host_mips: 1000.,
            latency: LatencyClass::Normal,
        }
    }

    #[test]
    fn valid_config_passes() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn zero_cloudlets_is_rejected() {
        let mut cfg = config();
        cfg.cloudlets = 0;
        assert!(matches!(
            cfg.validate(),
            Err(ExperimentError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn zero_vms_is_rejected() {
        let mut cfg = config();
        cfg.vms = 0;
        assert!(matches!(
            cfg.validate(),
            Err(ExperimentError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn mismatched_overrides_are_rejected() {
        let mut cfg = config();
        cfg.vm_mips_overrides = Some(vec![250.]);
        assert!(matches!(
            cfg.validate(),
            Err(ExperimentError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn vm_mips_label_reports_mixed_rates() {
        let mut cfg = config();
        assert_eq!(cfg.vm_mips_label(), "250");
        cfg.vm_mips_overrides = Some(vec![250., 500.]);
        assert_eq!(cfg.vm_mips_label(), "Mixed");
    }
}
