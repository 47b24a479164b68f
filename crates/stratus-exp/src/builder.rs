//! Translates a scenario configuration into the entities the engine expects.

use stratus_cloud::specs::{
    CloudletSpec, DatacenterCharacteristics, DatacenterSpec, HostSpec, UtilizationModel, VmSpec,
};

use crate::error::ExperimentError;
use crate::scenario::{LatencyClass, ScenarioConfig};

/// Number of datacenters built for every scenario.
pub const DATACENTER_COUNT: usize = 2;

// Shared default resource profile. Scenario configs vary only the counts and
// compute rates; everything else is fixed here.
const HOST_RAM: u64 = 4096;
const HOST_BW: u64 = 10000;
const HOST_STORAGE: u64 = 1_000_000;
const VM_RAM: u64 = 512;
const VM_BW: u64 = 1000;
const VM_DISK: u64 = 10000;
const VMM: &str = "Xen";
const CLOUDLET_INPUT_SIZE: u64 = 300;
const CLOUDLET_OUTPUT_SIZE: u64 = 300;

const DC_TIMEZONE: f64 = 10.0;
const DC_COST_PER_SEC: f64 = 3.0;
const DC_COST_PER_MEM: f64 = 0.05;
const DC_COST_PER_STORAGE: f64 = 0.001;
const DC_COST_PER_BW: f64 = 0.02;

// Link parameters of the shaped latency classes.
const LOW_LATENCY_LINK: (f64, f64) = (1000., 0.5);
const HIGH_LATENCY_LINK: (f64, f64) = (100., 50.);

/// An explicit link between the broker and one datacenter, by datacenter index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkSpec {
    pub datacenter: usize,
    pub bandwidth: f64,
    pub latency: f64,
}

/// Everything a simulation session needs to register for one scenario run.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltWorkload {
    pub datacenters: Vec<DatacenterSpec>,
    pub vms: Vec<VmSpec>,
    pub cloudlets: Vec<CloudletSpec>,
    pub links: Vec<LinkSpec>,
}

fn characteristics() -> DatacenterCharacteristics {
    DatacenterCharacteristics {
        architecture: "x86".to_string(),
        os: "Linux".to_string(),
        vmm: VMM.to_string(),
        timezone: DC_TIMEZONE,
        cost_per_sec: DC_COST_PER_SEC,
        cost_per_mem: DC_COST_PER_MEM,
        cost_per_storage: DC_COST_PER_STORAGE,
        cost_per_bw: DC_COST_PER_BW,
    }
}

/// Builds the datacenter, VM and cloudlet lists for one scenario.
///
/// A deterministic pure transform: no engine interaction, no side effects.
/// Propagates `InvalidConfiguration` from scenario validation.
pub fn build(config: &ScenarioConfig) -> Result<BuiltWorkload, ExperimentError> {
    config.validate()?;

    let datacenters = (0..DATACENTER_COUNT)
        .map(|i| DatacenterSpec {
            name: format!("DC_{}", i),
            characteristics: characteristics(),
            hosts: (0..config.hosts_per_dc)
                .map(|_| HostSpec {
                    mips_per_core: config.host_mips,
                    cores: 1,
                    ram: HOST_RAM,
                    bandwidth: HOST_BW,
                    storage: HOST_STORAGE,
                })
                .collect(),
        })
        .collect();

    let vms = (0..config.vms)
        .map(|i| VmSpec {
            id: i,
            mips: match &config.vm_mips_overrides {
                Some(overrides) => overrides[i as usize],
                None => config.vm_mips,
            },
            cores: 1,
            ram: VM_RAM,
            bandwidth: VM_BW,
            disk_size: VM_DISK,
            vmm: VMM.to_string(),
        })
        .collect();

    let cloudlets = (0..config.cloudlets)
        .map(|i| CloudletSpec {
            id: i,
            length_mi: config.cloudlet_length,
            cores: 1,
            input_size: CLOUDLET_INPUT_SIZE,
            output_size: CLOUDLET_OUTPUT_SIZE,
            utilization: UtilizationModel::Full,
        })
        .collect();

    let links = match config.latency {
        LatencyClass::Normal => Vec::new(),
        LatencyClass::Low => link_all(LOW_LATENCY_LINK),
        LatencyClass::High => link_all(HIGH_LATENCY_LINK),
    };

    Ok(BuiltWorkload {
        datacenters,
        vms,
        cloudlets,
        links,
    })
}

fn link_all((bandwidth, latency): (f64, f64)) -> Vec<LinkSpec> {
    (0..DATACENTER_COUNT)
        .map(|datacenter| LinkSpec {
            datacenter,
            bandwidth,
            latency,
        })
        .collect()
}
