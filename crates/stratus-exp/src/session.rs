//! Exclusive session around one engine run.
//!
//! The engine behaves as a single-writer resource: consecutive scenario runs
//! must not overlap, so the session enforces a checked
//! `Created → Open → Submitted → Completed → Closed` life cycle and holds a
//! process-wide (thread-local) slot while open. A session must be closed,
//! even on error paths, before the harness proceeds to the next scenario.

use std::cell::Cell;
use std::collections::HashSet;

use stratus_cloud::record::CloudletRecord;
use stratus_cloud::simulation::CloudSimulation;
use stratus_core::component::Id;
use stratus_core::simulation::Simulation;

use crate::builder::BuiltWorkload;
use crate::error::ExperimentError;

thread_local! {
    static ENGINE_IN_USE: Cell<bool> = Cell::new(false);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionState {
    Created,
    Open,
    Submitted,
    Completed,
    Closed,
}

/// Wraps one isolated run of the simulation engine.
pub struct SimulationSession {
    state: SessionState,
    seed: u64,
    cloud: Option<CloudSimulation>,
    broker: Option<Id>,
}

impl SimulationSession {
    /// Creates a session; the engine is not touched until [`open`](Self::open).
    pub fn new(seed: u64) -> Self {
        Self {
            state: SessionState::Created,
            seed,
            cloud: None,
            broker: None,
        }
    }

    /// Acquires the engine slot and sets up a fresh simulation instance.
    ///
    /// Fails with [`ExperimentError::EngineInitFailure`] if a previous
    /// session was never closed, or if this session was already opened.
    pub fn open(&mut self) -> Result<(), ExperimentError> {
        if self.state != SessionState::Created {
            return Err(ExperimentError::EngineInitFailure(format!(
                "open() is not valid in state {:?}",
                self.state
            )));
        }
        ENGINE_IN_USE.with(|in_use| {
            if in_use.get() {
                return Err(ExperimentError::EngineInitFailure(
                    "previous session was not closed".to_string(),
                ));
            }
            in_use.set(true);
            Ok(())
        })?;
        self.cloud = Some(CloudSimulation::new(Simulation::new(self.seed)));
        self.state = SessionState::Open;
        Ok(())
    }

    /// Registers the built entities with the engine and applies network links.
    ///
    /// Fails with [`ExperimentError::SubmissionFailure`] on duplicate entity
    /// ids, a link referencing a datacenter outside the built set, or when
    /// called out of the `Open` state.
    pub fn submit(&mut self, workload: &BuiltWorkload) -> Result<(), ExperimentError> {
        if self.state != SessionState::Open {
            return Err(ExperimentError::SubmissionFailure(format!(
                "submit() is not valid in state {:?}",
                self.state
            )));
        }
        validate_workload(workload)?;

        let cloud = self.cloud.as_mut().unwrap();
        let dc_ids: Vec<Id> = workload
            .datacenters
            .iter()
            .map(|dc| cloud.add_datacenter(dc.clone()))
            .collect();
        let broker = cloud.add_broker("broker");
        for link in &workload.links {
            cloud.add_link(dc_ids[link.datacenter], broker, link.bandwidth, link.latency);
        }
        cloud.submit_vms(broker, workload.vms.clone());
        cloud.submit_cloudlets(broker, workload.cloudlets.clone());
        self.broker = Some(broker);
        self.state = SessionState::Submitted;
        Ok(())
    }

    /// Runs the engine event loop until no events remain and returns the
    /// records of all cloudlets that reached a terminal state.
    ///
    /// Per-cloudlet failures are data (records with failed status), not
    /// session errors.
    pub fn run(&mut self) -> Result<Vec<CloudletRecord>, ExperimentError> {
        if self.state != SessionState::Submitted {
            return Err(ExperimentError::SubmissionFailure(format!(
                "run() is not valid in state {:?}",
                self.state
            )));
        }
        let cloud = self.cloud.as_mut().unwrap();
        cloud.run();
        let records = cloud.completed_cloudlets(self.broker.unwrap());
        self.state = SessionState::Completed;
        Ok(records)
    }

    /// Releases the engine; valid from any state and idempotent.
    pub fn close(&mut self) {
        if matches!(
            self.state,
            SessionState::Open | SessionState::Submitted | SessionState::Completed
        ) {
            ENGINE_IN_USE.with(|in_use| in_use.set(false));
        }
        self.cloud = None;
        self.broker = None;
        self.state = SessionState::Closed;
    }
}

// Safety net: a dropped session must not leave the engine slot held.
impl Drop for SimulationSession {
    fn drop(&mut self) {
        self.close();
    }
}

fn validate_workload(workload: &BuiltWorkload) -> Result<(), ExperimentError> {
    let mut names = HashSet::new();
    for dc in &workload.datacenters {
        if !names.insert(dc.name.as_str()) {
            return Err(ExperimentError::SubmissionFailure(format!(
                "duplicate datacenter name '{}'",
                dc.name
            )));
        }
    }
    let mut vm_ids = HashSet::new();
    for vm in &workload.vms {
        if !vm_ids.insert(vm.id) {
            return Err(ExperimentError::SubmissionFailure(format!(
                "duplicate VM id {}",
                vm.id
            )));
        }
    }
    let mut cloudlet_ids = HashSet::new();
    for cloudlet in &workload.cloudlets {
        if !cloudlet_ids.insert(cloudlet.id) {
            return Err(ExperimentError::SubmissionFailure(format!(
                "duplicate cloudlet id {}",
                cloudlet.id
            )));
        }
    }
    for link in &workload.links {
        if link.datacenter >= workload.datacenters.len() {
            return Err(ExperimentError::SubmissionFailure(format!(
                "link references unregistered datacenter index {}",
                link.datacenter
            )));
        }
    }
    Ok(())
}
