//! Sequential execution of a scenario list.

use log::{error, info};

use crate::builder::build;
use crate::cost::CostReport;
use crate::error::ExperimentError;
use crate::metrics::{aggregate, ScenarioResult};
use crate::report::{ScenarioRow, SummaryReporter};
use crate::scenario::ScenarioConfig;
use crate::session::SimulationSession;

/// Runs scenarios one at a time against the engine and accumulates the
/// comparison report.
///
/// A failing scenario is logged and recorded as a zeroed row; the remaining
/// scenarios still run. Scenarios execute strictly sequentially because the
/// engine is a single-writer resource.
pub struct Experiment {
    scenarios: Vec<ScenarioConfig>,
    seed: u64,
}

impl Experiment {
    pub fn new(scenarios: Vec<ScenarioConfig>, seed: u64) -> Self {
        Self { scenarios, seed }
    }

    /// Executes all scenarios in order and returns the filled reporter.
    pub fn run(&self) -> SummaryReporter {
        let mut reporter = SummaryReporter::new();
        for config in &self.scenarios {
            match self.run_scenario(config) {
                Ok(row) => {
                    info!(
                        "scenario '{}' finished: {}/{} cloudlets completed",
                        config.name, row.result.completed, row.result.requested
                    );
                    reporter.add(row);
                }
                Err(e) => {
                    error!("scenario '{}' failed: {}", config.name, e);
                    reporter.add(failed_row(config));
                }
            }
        }
        reporter
    }

    fn run_scenario(&self, config: &ScenarioConfig) -> Result<ScenarioRow, ExperimentError> {
        let workload = build(config)?;

        let mut session = SimulationSession::new(self.seed);
        session.open()?;
        // close() must run whether or not submit/run succeeded
        let outcome = session.submit(&workload).and_then(|_| session.run());
        session.close();
        let records = outcome?;

        let result = aggregate(&config.name, config.cloudlets, &records);
        let cost = CostReport::for_run(
            &records,
            &workload.cloudlets,
            &workload.datacenters[0].characteristics,
        );
        Ok(ScenarioRow {
            result,
            vm_mips: config.vm_mips_label(),
            latency: config.latency,
            hosts_per_dc: config.hosts_per_dc,
            cost,
            records,
        })
    }
}

fn failed_row(config: &ScenarioConfig) -> ScenarioRow {
    ScenarioRow {
        result: ScenarioResult::empty(&config.name, config.cloudlets),
        vm_mips: config.vm_mips_label(),
        latency: config.latency,
        hosts_per_dc: config.hosts_per_dc,
        cost: CostReport::default(),
        records: Vec::new(),
    }
}
