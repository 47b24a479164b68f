//! Per-cloudlet execution records returned by the engine.

use std::fmt::{Display, Formatter};

use serde::Serialize;

use stratus_core::Id;

/// Terminal status of a cloudlet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CloudletStatus {
    Success,
    Failed,
}

impl Display for CloudletStatus {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            CloudletStatus::Success => write!(f, "SUCCESS"),
            CloudletStatus::Failed => write!(f, "FAILED"),
        }
    }
}

/// Execution record of one cloudlet, produced when it reaches a terminal state.
///
/// Times are simulation times of the execution itself; the transfer of the
/// output back to the broker is not included. For failed cloudlets all times
/// are zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CloudletRecord {
    pub cloudlet_id: u32,
    pub status: CloudletStatus,
    /// Identifier of the datacenter that executed (or rejected) the cloudlet.
    pub datacenter: Id,
    /// Identifier of the VM that executed the cloudlet.
    pub vm_id: u32,
    /// Time spent executing, in seconds.
    pub cpu_time: f64,
    pub start_time: f64,
    pub finish_time: f64,
}

impl CloudletRecord {
    /// Record for a cloudlet that never reached a VM.
    pub fn failed(cloudlet_id: u32, reporter: Id) -> Self {
        Self {
            cloudlet_id,
            status: CloudletStatus::Failed,
            datacenter: reporter,
            vm_id: 0,
            cpu_time: 0.,
            start_time: 0.,
            finish_time: 0.,
        }
    }
}
