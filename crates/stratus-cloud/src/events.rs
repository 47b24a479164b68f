//! Events exchanged between cloud components.

use serde::Serialize;

use stratus_core::Id;

use crate::record::CloudletRecord;
use crate::specs::{CloudletSpec, VmSpec};

/// Kicks off a broker at simulation start.
#[derive(Clone, Serialize)]
pub struct StartRun {}

/// Broker asks a datacenter to create a VM.
#[derive(Clone, Serialize)]
pub struct VmCreateRequest {
    pub vm: VmSpec,
    pub requester: Id,
}

/// Datacenter reply to [`VmCreateRequest`].
#[derive(Clone, Serialize)]
pub struct VmCreateAck {
    pub vm_id: u32,
    pub success: bool,
}

/// Broker submits a cloudlet for execution on a previously created VM.
#[derive(Clone, Serialize)]
pub struct CloudletSubmit {
    pub cloudlet: CloudletSpec,
    pub vm_id: u32,
    pub requester: Id,
}

/// Internal datacenter event marking the end of a cloudlet execution.
#[derive(Clone, Serialize)]
pub struct CloudletFinished {
    pub record: CloudletRecord,
    pub requester: Id,
    /// Size of the output to transfer back to the requester.
    pub output_size: u64,
}

/// Completed (or failed) cloudlet record returned to the broker.
#[derive(Clone, Serialize)]
pub struct CloudletReturn {
    pub record: CloudletRecord,
}
