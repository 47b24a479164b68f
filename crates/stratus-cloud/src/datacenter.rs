//! Datacenter component: places VMs onto hosts and executes cloudlets.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use stratus_core::cast;
use stratus_core::component::Id;
use stratus_core::context::SimulationContext;
use stratus_core::event::Event;
use stratus_core::handler::EventHandler;
use stratus_core::{log_debug, log_warn};

use crate::events::{CloudletFinished, CloudletReturn, CloudletSubmit, VmCreateAck, VmCreateRequest};
use crate::network::Network;
use crate::record::{CloudletRecord, CloudletStatus};
use crate::specs::{CloudletSpec, DatacenterCharacteristics, DatacenterSpec, HostSpec, VmSpec};

struct HostState {
    spec: HostSpec,
    mips_available: f64,
}

struct VmState {
    spec: VmSpec,
    #[allow(dead_code)]
    host: usize,
    /// Time until which the VM is occupied by already accepted cloudlets.
    busy_until: f64,
}

/// Simulates one datacenter: a set of hosts with fixed compute capacity.
///
/// VMs are placed with a most-free-capacity-first policy; a VM that fits no
/// host is rejected. Each VM executes its cloudlets space-shared: one at a
/// time at the full effective rate, in arrival order.
pub struct Datacenter {
    #[allow(dead_code)]
    characteristics: DatacenterCharacteristics,
    hosts: Vec<HostState>,
    vms: HashMap<u32, VmState>,
    network: Rc<RefCell<Network>>,
    ctx: SimulationContext,
}

impl Datacenter {
    pub fn new(spec: DatacenterSpec, network: Rc<RefCell<Network>>, ctx: SimulationContext) -> Self {
        let hosts = spec
            .hosts
            .into_iter()
            .map(|spec| HostState {
                mips_available: spec.total_mips(),
                spec,
            })
            .collect();
        Self {
            characteristics: spec.characteristics,
            hosts,
            vms: HashMap::new(),
            network,
            ctx,
        }
    }

    /// Host with the most free capacity that still fits the VM.
    fn select_host(&self, vm: &VmSpec) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (i, host) in self.hosts.iter().enumerate() {
            if host.mips_available < vm.demanded_mips() || host.spec.ram < vm.ram {
                continue;
            }
            if best.map_or(true, |b| host.mips_available > self.hosts[b].mips_available) {
                best = Some(i);
            }
        }
        best
    }

    fn on_vm_create_request(&mut self, vm: VmSpec, requester: Id) {
        let vm_id = vm.id;
        let success = match self.select_host(&vm) {
            Some(host) if !self.vms.contains_key(&vm_id) => {
                self.hosts[host].mips_available -= vm.demanded_mips();
                log_debug!(self.ctx, "created VM {} on host {}", vm_id, host);
                self.vms.insert(
                    vm_id,
                    VmState {
                        spec: vm,
                        host,
                        busy_until: 0.,
                    },
                );
                true
            }
            _ => {
                log_warn!(self.ctx, "rejected VM {}: no suitable host", vm_id);
                false
            }
        };
        let delay = self.network.borrow().latency(self.ctx.id(), requester);
        self.ctx.emit(VmCreateAck { vm_id, success }, requester, delay);
    }

    fn on_cloudlet_submit(&mut self, cloudlet: CloudletSpec, vm_id: u32, requester: Id) {
        let now = self.ctx.time();
        let vm = match self.vms.get_mut(&vm_id) {
            Some(vm) => vm,
            None => {
                log_warn!(self.ctx, "cloudlet {} targets unknown VM {}", cloudlet.id, vm_id);
                let delay = self.network.borrow().latency(self.ctx.id(), requester);
                let record = CloudletRecord::failed(cloudlet.id, self.ctx.id());
                self.ctx.emit(CloudletReturn { record }, requester, delay);
                return;
            }
        };
        let rate = vm.spec.mips * cloudlet.utilization.cpu_share();
        let start_time = now.max(vm.busy_until);
        let cpu_time = cloudlet.length_mi / rate;
        let finish_time = start_time + cpu_time;
        vm.busy_until = finish_time;
        let record = CloudletRecord {
            cloudlet_id: cloudlet.id,
            status: CloudletStatus::Success,
            datacenter: self.ctx.id(),
            vm_id,
            cpu_time,
            start_time,
            finish_time,
        };
        log_debug!(
            self.ctx,
            "cloudlet {} scheduled on VM {}: [{:.3}, {:.3}]",
            cloudlet.id,
            vm_id,
            start_time,
            finish_time
        );
        self.ctx.emit_self(
            CloudletFinished {
                record,
                requester,
                output_size: cloudlet.output_size,
            },
            finish_time - now,
        );
    }

    fn on_cloudlet_finished(&mut self, record: CloudletRecord, requester: Id, output_size: u64) {
        log_debug!(self.ctx, "cloudlet {} finished on VM {}", record.cloudlet_id, record.vm_id);
        let delay = self
            .network
            .borrow()
            .transfer_time(self.ctx.id(), requester, output_size);
        self.ctx.emit(CloudletReturn { record }, requester, delay);
    }
}

impl EventHandler for Datacenter {
    fn on(&mut self, event: Event) {
        cast!(match event.data {
            VmCreateRequest { vm, requester } => {
                self.on_vm_create_request(vm, requester);
            }
            CloudletSubmit {
                cloudlet,
                vm_id,
                requester,
            } => {
                self.on_cloudlet_submit(cloudlet, vm_id, requester);
            }
            CloudletFinished {
                record,
                requester,
                output_size,
            } => {
                self.on_cloudlet_finished(record, requester, output_size);
            }
        })
    }
}
