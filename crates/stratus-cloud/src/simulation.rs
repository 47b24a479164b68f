//! Facade assembling cloud components into a runnable simulation.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use sugars::{rc, refcell};

use stratus_core::component::Id;
use stratus_core::context::SimulationContext;
use stratus_core::simulation::Simulation;

use crate::broker::Broker;
use crate::datacenter::Datacenter;
use crate::events::StartRun;
use crate::network::Network;
use crate::record::CloudletRecord;
use crate::specs::{CloudletSpec, DatacenterSpec, VmSpec};

/// One isolated cloud simulation: owns the kernel, the network model and all
/// registered components.
///
/// Entities must be registered before `run()`; running drains the event queue
/// until no events remain.
pub struct CloudSimulation {
    sim: Simulation,
    network: Rc<RefCell<Network>>,
    datacenters: BTreeMap<Id, Rc<RefCell<Datacenter>>>,
    brokers: BTreeMap<Id, Rc<RefCell<Broker>>>,
    ctx: SimulationContext,
}

impl CloudSimulation {
    pub fn new(mut sim: Simulation) -> Self {
        let ctx = sim.create_context("simulation");
        Self {
            sim,
            network: rc!(refcell!(Network::new())),
            datacenters: BTreeMap::new(),
            brokers: BTreeMap::new(),
            ctx,
        }
    }

    /// Creates a datacenter component from its spec, returns the component id.
    pub fn add_datacenter(&mut self, spec: DatacenterSpec) -> Id {
        let name = spec.name.clone();
        let dc = rc!(refcell!(Datacenter::new(
            spec,
            self.network.clone(),
            self.sim.create_context(&name),
        )));
        let id = self.sim.add_handler(&name, dc.clone());
        self.datacenters.insert(id, dc);
        id
    }

    /// Creates a broker aware of all datacenters registered so far,
    /// returns the component id.
    pub fn add_broker(&mut self, name: &str) -> Id {
        let datacenters = self.datacenters.keys().copied().collect();
        let broker = rc!(refcell!(Broker::new(
            datacenters,
            self.network.clone(),
            self.sim.create_context(name),
        )));
        let id = self.sim.add_handler(name, broker.clone());
        self.brokers.insert(id, broker);
        id
    }

    /// Registers an explicit link between two entities.
    pub fn add_link(&mut self, a: Id, b: Id, bandwidth: f64, latency: f64) {
        self.network.borrow_mut().add_link(a, b, bandwidth, latency);
    }

    /// Hands the VM list to the broker for creation at run start.
    pub fn submit_vms(&mut self, broker: Id, vms: Vec<VmSpec>) {
        self.brokers.get(&broker).unwrap().borrow_mut().submit_vms(vms);
    }

    /// Hands the cloudlet list to the broker for dispatch after VM creation.
    pub fn submit_cloudlets(&mut self, broker: Id, cloudlets: Vec<CloudletSpec>) {
        self.brokers
            .get(&broker)
            .unwrap()
            .borrow_mut()
            .submit_cloudlets(cloudlets);
    }

    /// Starts all brokers and processes events until none remain.
    pub fn run(&mut self) {
        for id in self.brokers.keys().copied().collect::<Vec<_>>() {
            self.ctx.emit_now(StartRun {}, id);
        }
        self.sim.step_until_no_events();
    }

    /// Terminal records collected by the broker.
    pub fn completed_cloudlets(&self, broker: Id) -> Vec<CloudletRecord> {
        self.brokers.get(&broker).unwrap().borrow().records().to_vec()
    }

    /// Returns the current simulation time.
    pub fn current_time(&self) -> f64 {
        self.sim.time()
    }

    /// Returns the total number of events created by the kernel.
    pub fn event_count(&self) -> u64 {
        self.sim.event_count()
    }
}
