//! The built-in scenario suite.

use crate::scenario::{LatencyClass, ScenarioConfig};

fn scenario(name: &str) -> ScenarioConfig {
    ScenarioConfig {
        name: name.to_string(),
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

/// The seven-scenario comparison suite, in canonical execution order:
/// a baseline, then one axis varied at a time (workload size, infrastructure,
/// network latency both ways, parallelism, VM heterogeneity).
pub fn suite() -> Vec<ScenarioConfig> {
    let baseline = scenario("1-Baseline");

    let mut workload = scenario("2-Workload");
    workload.cloudlets = 10;

    let mut infrastructure = scenario("3-Infrastructure");
    infrastructure.vms = 4;
    infrastructure.vm_mips = 500.;
    infrastructure.hosts_per_dc = 2;
    infrastructure.host_mips = 2000.;

    let mut network = scenario("4-Network");
    network.latency = LatencyClass::Low;

    let mut multi_vm = scenario("5-Multi-VM");
    multi_vm.cloudlets = 15;
    multi_vm.vms = 5;
    multi_vm.vm_mips = 200.;

    let mut heterogeneous = scenario("6-Heterogeneous");
    heterogeneous.vm_mips_overrides = Some(vec![250., 500.]);

    let mut congestion = scenario("7-Congestion");
    congestion.latency = LatencyClass::High;

    vec![
        baseline,
        workload,
        infrastructure,
        network,
        multi_vm,
        heterogeneous,
        congestion,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_presets_are_valid() {
        let suite = suite();
        assert_eq!(suite.len(), 7);
        for scenario in &suite {
            scenario.validate().unwrap();
        }
    }
}
