//! Simulation component identifiers.

/// Identifier of a simulation component.
///
/// Assigned sequentially starting from 0 as components are registered.
pub type Id = u32;
