//! Experiment plans parsed from YAML files.

use serde::{Deserialize, Serialize};

use crate::error::ExperimentError;
use crate::scenario::{LatencyClass, ScenarioConfig};

/// Holds one raw scenario parsed from YAML, with optional fields.
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
struct RawScenarioConfig {
    pub name: String,
    pub cloudlets: Option<u32>,
    pub cloudlet_length: Option<f64>,
    pub vms: Option<u32>,
    pub vm_mips: Option<f64>,
    pub vm_mips_overrides: Option<Vec<f64>>,
    pub hosts_per_dc: Option<u32>,
    pub host_mips: Option<f64>,
    pub latency: Option<LatencyClass>,
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
struct RawExperimentPlan {
    pub scenarios: Vec<RawScenarioConfig>,
}

/// An ordered list of scenarios to execute.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentPlan {
    pub scenarios: Vec<ScenarioConfig>,
}

impl ExperimentPlan {
    /// Parses a plan from YAML text
    /// (uses default values if some parameters are absent).
    pub fn from_str(text: &str) -> Result<Self, ExperimentError> {
        let raw: RawExperimentPlan = serde_yaml::from_str(text)
            .map_err(|e| ExperimentError::InvalidConfiguration(format!("can't parse plan: {}", e)))?;
        let scenarios = raw
            .scenarios
            .into_iter()
            .map(|raw| ScenarioConfig {
                name: raw.name,
                cloudlets: raw.cloudlets.unwrap_or(5),
                cloudlet_length: raw.cloudlet_length.unwrap_or(10000.),
                vms: raw.vms.unwrap_or(2),
                vm_mips: raw.vm_mips.unwrap_or(250.),
                vm_mips_overrides: raw.vm_mips_overrides,
                hosts_per_dc: raw.hosts_per_dc.unwrap_or(1),
                host_mips: raw.host_mips.unwrap_or(1000.),
                latency: raw.latency.unwrap_or(LatencyClass::Normal),
            })
            .collect();
        Ok(Self { scenarios })
    }

    /// Reads a plan from a YAML file.
    pub fn from_file(file_name: &str) -> Result<Self, ExperimentError> {
        let text = std::fs::read_to_string(file_name).map_err(|e| {
            ExperimentError::InvalidConfiguration(format!("can't read file {}: {}", file_name, e))
        })?;
        Self::from_str(&text)
    }
}
