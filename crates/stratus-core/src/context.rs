//! Accessing simulation from components.

use std::cell::RefCell;
use std::rc::Rc;

use crate::component::Id;
use crate::event::{EventData, EventId};
use crate::state::SimulationState;

/// A facade for accessing the simulation state and producing events from simulation components.
pub struct SimulationContext {
    id: Id,
    name: String,
    sim_state: Rc<RefCell<SimulationState>>,
}

impl SimulationContext {
    pub(crate) fn new(id: Id, name: &str, sim_state: Rc<RefCell<SimulationState>>) -> Self {
        Self {
            id,
            name: name.to_owned(),
            sim_state,
        }
    }

    /// Returns the identifier of component associated with this context.
    pub fn id(&self) -> Id {
        self.id
    }

    /// Returns the name of component associated with this context.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the current simulation time.
    pub fn time(&self) -> f64 {
        self.sim_state.borrow().time()
    }

    /// Returns a random float in the range _[0, 1)_
    /// using the simulation-wide random number generator.
    pub fn rand(&mut self) -> f64 {
        self.sim_state.borrow_mut().rand()
    }

    /// Creates a new event with the specified payload, destination and delay.
    pub fn emit<T>(&mut self, data: T, dst: Id, delay: f64) -> EventId
    where
        T: EventData,
    {
        self.sim_state.borrow_mut().add_event(data, self.id, dst, delay)
    }

    /// Creates a new immediate (zero-delay) event with the specified payload and destination.
    pub fn emit_now<T>(&mut self, data: T, dst: Id) -> EventId
    where
        T: EventData,
    {
        self.sim_state.borrow_mut().add_event(data, self.id, dst, 0.)
    }

    /// Creates a new event for itself with the specified payload and delay.
    pub fn emit_self<T>(&mut self, data: T, delay: f64) -> EventId
    where
        T: EventData,
    {
        self.sim_state.borrow_mut().add_event(data, self.id, self.id, delay)
    }

    /// Creates a new immediate event for itself with the specified payload.
    pub fn emit_self_now<T>(&mut self, data: T) -> EventId
    where
        T: EventData,
    {
        self.sim_state.borrow_mut().add_event(data, self.id, self.id, 0.)
    }

    /// Looks up the name of component by its identifier.
    pub fn lookup_name(&self, id: Id) -> String {
        self.sim_state.borrow().lookup_name(id)
    }
}
