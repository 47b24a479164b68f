//! Simulation configuration and execution.

use std::cell::RefCell;
use std::rc::Rc;

use log::Level::Trace;
use log::log_enabled;
use serde_json::json;
use serde_type_name::type_name;

use crate::component::Id;
use crate::context::SimulationContext;
use crate::event::Event;
use crate::handler::EventHandler;
use crate::log::log_undelivered_event;
use crate::state::SimulationState;

/// Represents a simulation, provides methods for its configuration and execution.
pub struct Simulation {
    sim_state: Rc<RefCell<SimulationState>>,
    handlers: Vec<Option<Rc<RefCell<dyn EventHandler>>>>,
}

impl Simulation {
    /// Creates a new simulation with the specified random seed.
    pub fn new(seed: u64) -> Self {
        Self {
            sim_state: Rc::new(RefCell::new(SimulationState::new(seed))),
            handlers: Vec::new(),
        }
    }

    fn register(&mut self, name: &str) -> Id {
        let id = self.sim_state.borrow_mut().register(name);
        if id as usize == self.handlers.len() {
            self.handlers.push(None);
        }
        id
    }

    /// Returns the identifier of component by its name.
    ///
    /// Panics if a component with such name does not exist.
    pub fn lookup_id(&self, name: &str) -> Id {
        self.sim_state.borrow().lookup_id(name)
    }

    /// Returns the name of component by its identifier.
    ///
    /// Panics if a component with such id does not exist.
    pub fn lookup_name(&self, id: Id) -> String {
        self.sim_state.borrow().lookup_name(id)
    }

    /// Creates a new simulation context with the specified component name.
    pub fn create_context<S>(&mut self, name: S) -> SimulationContext
    where
        S: AsRef<str>,
    {
        let id = self.register(name.as_ref());
        SimulationContext::new(id, name.as_ref(), self.sim_state.clone())
    }

    /// Registers the event handler implementation for the named component,
    /// returns the component id.
    pub fn add_handler<S>(&mut self, name: S, handler: Rc<RefCell<dyn EventHandler>>) -> Id
    where
        S: AsRef<str>,
    {
        let id = self.register(name.as_ref());
        self.handlers[id as usize] = Some(handler);
        id
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

    /// Performs a single step through the simulation.
    ///
    /// Takes the next event from the queue, advances the clock to its time and
    /// invokes the destination's [`EventHandler::on()`]. An event whose
    /// destination has no registered handler is logged and discarded.
    ///
    /// Returns `true` if a pending event was found and `false` otherwise.
    pub fn step(&mut self) -> bool {
        let next = self.sim_state.borrow_mut().next_event();
        if let Some(event) = next {
            if log_enabled!(Trace) {
                let src_name = self.lookup_name(event.src);
                let dst_name = self.lookup_name(event.dst);
                log::trace!(
                    target: &dst_name,
                    "[{:.3} {} {}] {}",
                    event.time,
                    crate::log::get_colored("EVENT", colored::Color::BrightBlack),
                    dst_name,
                    json!({"type": type_name(&event.data).unwrap(), "data": event.data, "src": src_name})
                );
            }
            match self.handlers.get(event.dst as usize) {
                Some(Some(handler)) => handler.borrow_mut().on(event),
                _ => log_undelivered_event(event),
            }
            true
        } else {
            false
        }
    }

    /// Performs the specified number of steps through the simulation.
    ///
    /// Returns `true` if there could be more pending events and `false` otherwise.
    pub fn steps(&mut self, step_count: u64) -> bool {
        for _ in 0..step_count {
            if !self.step() {
                return false;
            }
        }
        true
    }

    /// Steps through the simulation until there are no pending events left.
    pub fn step_until_no_events(&mut self) {
        while self.step() {}
    }

    /// Returns the total number of created events.
    ///
    /// Note that canceled events are also counted here.
    pub fn event_count(&self) -> u64 {
        self.sim_state.borrow().event_count()
    }

    /// Cancels pending events that satisfy the given predicate function.
    ///
    /// Already processed events cannot be canceled.
    pub fn cancel_events<F>(&mut self, pred: F)
    where
        F: Fn(&Event) -> bool,
    {
        self.sim_state.borrow_mut().cancel_events(pred);
    }
}
