//! Broker component: submits VMs and cloudlets on behalf of one user.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use stratus_core::cast;
use stratus_core::component::Id;
use stratus_core::context::SimulationContext;
use stratus_core::event::Event;
use stratus_core::handler::EventHandler;
use stratus_core::{log_debug, log_info, log_warn};

use crate::events::{CloudletReturn, CloudletSubmit, StartRun, VmCreateAck, VmCreateRequest};
use crate::network::Network;
use crate::record::CloudletRecord;
use crate::specs::{CloudletSpec, VmSpec};

/// Requests VM creation across the known datacenters and dispatches cloudlets
/// round-robin over the successfully created VMs.
///
/// VM creation starts with the datacenter matching the VM index and falls
/// back to the remaining datacenters in order when one rejects the request.
/// Cloudlets left without any VM are reported as failed records, not errors.
pub struct Broker {
    datacenters: Vec<Id>,
    vms: Vec<VmSpec>,
    cloudlets: Vec<CloudletSpec>,
    vm_placements: HashMap<u32, Id>,
    vm_attempts: HashMap<u32, usize>,
    failed_vms: HashSet<u32>,
    records: Vec<CloudletRecord>,
    network: Rc<RefCell<Network>>,
    ctx: SimulationContext,
}

impl Broker {
    pub fn new(datacenters: Vec<Id>, network: Rc<RefCell<Network>>, ctx: SimulationContext) -> Self {
        Self {
            datacenters,
            vms: Vec::new(),
            cloudlets: Vec::new(),
            vm_placements: HashMap::new(),
            vm_attempts: HashMap::new(),
            failed_vms: HashSet::new(),
            records: Vec::new(),
            network,
            ctx,
        }
    }

    /// Adds VMs to be created when the run starts.
    pub fn submit_vms(&mut self, vms: Vec<VmSpec>) {
        self.vms.extend(vms);
    }

    /// Adds cloudlets to be dispatched once VM creation is resolved.
    pub fn submit_cloudlets(&mut self, cloudlets: Vec<CloudletSpec>) {
        self.cloudlets.extend(cloudlets);
    }

    /// Records of all cloudlets that reached a terminal state so far.
    pub fn records(&self) -> &[CloudletRecord] {
        &self.records
    }

    fn on_start(&mut self) {
        log_info!(
            self.ctx,
            "starting run: {} VMs, {} cloudlets, {} datacenters",
            self.vms.len(),
            self.cloudlets.len(),
            self.datacenters.len()
        );
        if self.vms.is_empty() || self.datacenters.is_empty() {
            self.dispatch_cloudlets();
            return;
        }
        for (i, vm) in self.vms.iter().enumerate() {
            let target = self.datacenters[i % self.datacenters.len()];
            let delay = self.network.borrow().latency(self.ctx.id(), target);
            self.vm_attempts.insert(vm.id, 1);
            self.ctx.emit(
                VmCreateRequest {
                    vm: vm.clone(),
                    requester: self.ctx.id(),
                },
                target,
                delay,
            );
        }
    }

    fn on_vm_create_ack(&mut self, src: Id, vm_id: u32, success: bool) {
        if success {
            self.vm_placements.insert(vm_id, src);
        } else {
            let attempts = self.vm_attempts[&vm_id];
            if attempts < self.datacenters.len() {
                // try the next datacenter in order
                let index = self.vms.iter().position(|vm| vm.id == vm_id).unwrap();
                let target = self.datacenters[(index + attempts) % self.datacenters.len()];
                let delay = self.network.borrow().latency(self.ctx.id(), target);
                self.vm_attempts.insert(vm_id, attempts + 1);
                let vm = self.vms[index].clone();
                self.ctx.emit(
                    VmCreateRequest {
                        vm,
                        requester: self.ctx.id(),
                    },
                    target,
                    delay,
                );
                return;
            }
            log_warn!(self.ctx, "VM {} was rejected by all datacenters", vm_id);
            self.failed_vms.insert(vm_id);
        }
        if self.vm_placements.len() + self.failed_vms.len() == self.vms.len() {
            self.dispatch_cloudlets();
        }
    }

    fn dispatch_cloudlets(&mut self) {
        let created: Vec<u32> = self
            .vms
            .iter()
            .map(|vm| vm.id)
            .filter(|id| self.vm_placements.contains_key(id))
            .collect();
        if created.is_empty() {
            log_warn!(self.ctx, "no VMs available, failing {} cloudlets", self.cloudlets.len());
            let reporter = self.ctx.id();
            for cloudlet in &self.cloudlets {
                self.records.push(CloudletRecord::failed(cloudlet.id, reporter));
            }
            return;
        }
        for (i, cloudlet) in self.cloudlets.iter().enumerate() {
            let vm_id = created[i % created.len()];
            let target = self.vm_placements[&vm_id];
            let delay = self
                .network
                .borrow()
                .transfer_time(self.ctx.id(), target, cloudlet.input_size);
            self.ctx.emit(
                CloudletSubmit {
                    cloudlet: cloudlet.clone(),
                    vm_id,
                    requester: self.ctx.id(),
                },
                target,
                delay,
            );
        }
    }

    fn on_cloudlet_return(&mut self, record: CloudletRecord) {
        log_debug!(
            self.ctx,
            "cloudlet {} returned with status {}",
            record.cloudlet_id,
            record.status
        );
        self.records.push(record);
    }
}

impl EventHandler for Broker {
    fn on(&mut self, event: Event) {
        let src = event.src;
        cast!(match event.data {
            StartRun {} => {
                self.on_start();
            }
            VmCreateAck { vm_id, success } => {
                self.on_vm_create_ack(src, vm_id, success);
            }
            CloudletReturn { record } => {
                self.on_cloudlet_return(record);
            }
        })
    }
}
