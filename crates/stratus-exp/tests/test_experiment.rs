use stratus_exp::builder::build;
use stratus_exp::experiment::Experiment;
use stratus_exp::metrics::aggregate;
use stratus_exp::plan::ExperimentPlan;
use stratus_exp::presets;
use stratus_exp::scenario::{LatencyClass, ScenarioConfig};
use stratus_exp::session::SimulationSession;

const SEED: u64 = 123;

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

fn approx(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-9, "{} != {}", a, b);
}

#[test]
// Five 10000 MI cloudlets on a single 250-mips VM run sequentially:
// 40s each, makespan 200s, throughput 5/200.
fn single_vm_scenario_matches_nominal_times() {
    let mut config = scenario("single-vm");
    config.vms = 1;
    let workload = build(&config).unwrap();

    let mut session = SimulationSession::new(SEED);
    session.open().unwrap();
    session.submit(&workload).unwrap();
    let records = session.run().unwrap();
    session.close();

    let result = aggregate(&config.name, config.cloudlets, &records);
    assert_eq!(result.completed, 5);
    assert_eq!(result.avg_time, 40.);
    assert_eq!(result.min_time, 40.);
    assert_eq!(result.max_time, 40.);
    assert_eq!(result.makespan, 200.);
    assert_eq!(result.throughput, 0.025);
}

#[test]
// VM rates [250, 500]: the faster VM halves its cloudlet times and the
// result row must carry the literal "Mixed" instead of a number.
fn heterogeneous_scenario_reports_mixed_label() {
    let mut config = scenario("mixed");
    config.vm_mips_overrides = Some(vec![250., 500.]);

    let experiment = Experiment::new(vec![config], SEED);
    let reporter = experiment.run();
    let row = &reporter.rows()[0];

    assert_eq!(row.vm_mips, "Mixed");
    assert_eq!(row.result.completed, 5);
    // 3 cloudlets at 40s on the slow VM, 2 at 20s on the fast one
    approx(row.result.avg_time, (3. * 40. + 2. * 20.) / 5.);
    assert_eq!(row.result.min_time, 20.);
    assert_eq!(row.result.max_time, 40.);
    assert_eq!(row.result.makespan, 120.);
}

#[test]
// Running the same scenario through two independent, properly closed
// sessions yields identical results.
fn scenario_runs_are_idempotent() {
    let config = scenario("repeat");
    let run = || {
        let workload = build(&config).unwrap();
        let mut session = SimulationSession::new(SEED);
        session.open().unwrap();
        session.submit(&workload).unwrap();
        let records = session.run().unwrap();
        session.close();
        aggregate(&config.name, config.cloudlets, &records)
    };
    assert_eq!(run(), run());
}

#[test]
// A scenario whose VMs fit no host completes nothing; it must appear as a
// zeroed row in the report, not abort the queue.
fn failing_scenario_yields_zeroed_row_and_queue_continues() {
    let mut oversized = scenario("oversized");
    oversized.vm_mips = 5000.;
    let scenarios = vec![scenario("first"), oversized, scenario("last")];

    let reporter = Experiment::new(scenarios, SEED).run();
    let rows = reporter.rows();
    assert_eq!(rows.len(), 3);

    let labels: Vec<&str> = rows.iter().map(|r| r.result.label.as_str()).collect();
    assert_eq!(labels, vec!["first", "oversized", "last"]);

    let failed = &rows[1].result;
    assert_eq!(failed.completed, 0);
    assert!(failed.completed <= failed.requested);
    assert_eq!(failed.avg_time, 0.);
    assert_eq!(failed.min_time, 0.);
    assert_eq!(failed.max_time, 0.);
    assert_eq!(failed.throughput, 0.);
    assert_eq!(rows[1].cost.total, 0.);

    assert_eq!(rows[2].result.completed, 5);
}

#[test]
// An invalid configuration is caught before any engine interaction and also
// surfaces as a zeroed row.
fn invalid_configuration_is_recorded_not_thrown() {
    let mut invalid = scenario("invalid");
    invalid.vm_mips_overrides = Some(vec![250.]);

    let reporter = Experiment::new(vec![invalid, scenario("valid")], SEED).run();
    assert_eq!(reporter.rows()[0].result.completed, 0);
    assert_eq!(reporter.rows()[1].result.completed, 5);
}

#[test]
// Cost invariants: the scenario total is the sum of per-task totals and each
// task costs cpu_time * cost_per_sec + (input + output) * cost_per_bw / 1000.
fn cost_totals_match_the_model() {
    let reporter = Experiment::new(vec![scenario("costs")], SEED).run();
    let row = &reporter.rows()[0];

    let per_task = 40. * 3.0 + (300. + 300.) * 0.02 / 1000.;
    approx(row.cost.total, 5. * per_task);
    for task in &row.cost.tasks {
        approx(task.breakdown.total(), per_task);
    }
}

#[test]
fn preset_suite_produces_the_expected_comparison() {
    let reporter = Experiment::new(presets::suite(), SEED).run();
    let rows = reporter.rows();
    assert_eq!(rows.len(), 7);

    let labels: Vec<&str> = rows.iter().map(|r| r.result.label.as_str()).collect();
    assert_eq!(
        labels,
        vec![
            "1-Baseline",
            "2-Workload",
            "3-Infrastructure",
            "4-Network",
            "5-Multi-VM",
            "6-Heterogeneous",
            "7-Congestion"
        ]
    );

    // 1-Baseline: 5 cloudlets round-robin over two 250-mips VMs.
    assert_eq!(rows[0].result.avg_time, 40.);
    assert_eq!(rows[0].result.makespan, 120.);

    // 2-Workload: doubling the cloudlets stretches the makespan.
    assert_eq!(rows[1].result.makespan, 200.);

    // 3-Infrastructure: faster VMs cut both average time and makespan.
    assert_eq!(rows[2].result.avg_time, 20.);
    assert_eq!(rows[2].result.makespan, 40.);

    // 4-Network: low-latency links delay execution start only slightly.
    approx(rows[3].result.avg_time, 40.);
    approx(rows[3].result.makespan, 121.8);

    // 5-Multi-VM: five 200-mips VMs with three 50s cloudlets each.
    assert_eq!(rows[4].result.avg_time, 50.);
    assert_eq!(rows[4].result.makespan, 150.);
    assert_eq!(rows[4].result.throughput, 0.1);

    // 6-Heterogeneous: mixed rates show up as the literal label.
    assert_eq!(rows[5].vm_mips, "Mixed");
    assert_eq!(rows[5].result.makespan, 120.);

    // 7-Congestion: the 50s-latency handshake and transfer push the makespan
    // from 120 to 273 (100 handshake + 53 input transfer + 120 execution).
    assert_eq!(rows[6].result.avg_time, 40.);
    assert_eq!(rows[6].result.makespan, 273.);

    // every scenario completed everything it requested
    for row in rows {
        assert_eq!(row.result.completed, row.result.requested);
    }
}

#[test]
fn yaml_plan_drives_the_experiment() {
    let plan = ExperimentPlan::from_str(
        "scenarios:\n\
         - name: from-yaml\n\
         \x20 vms: 1\n",
    )
    .unwrap();
    let reporter = Experiment::new(plan.scenarios, SEED).run();
    let row = &reporter.rows()[0];
    assert_eq!(row.result.label, "from-yaml");
    assert_eq!(row.result.completed, 5);
    assert_eq!(row.result.makespan, 200.);
}
