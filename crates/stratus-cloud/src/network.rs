//! Network model with explicit per-link bandwidth and latency.

use std::collections::HashMap;

use stratus_core::Id;

/// A bidirectional link between two entities.
#[derive(Debug, Clone, Copy)]
pub struct Link {
    /// Link bandwidth in size units per second.
    pub bandwidth: f64,
    /// Link latency in seconds.
    pub latency: f64,
}

/// Holds the explicitly configured links between entities.
///
/// Entities without a configured link communicate with zero delay, which
/// mirrors an unshaped network. Links are applied symmetrically.
#[derive(Debug, Default)]
pub struct Network {
    links: HashMap<(Id, Id), Link>,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a link between two entities, overriding any previous one.
    pub fn add_link(&mut self, a: Id, b: Id, bandwidth: f64, latency: f64) {
        assert!(bandwidth > 0., "link bandwidth must be positive");
        assert!(latency >= 0., "link latency must be non-negative");
        let link = Link { bandwidth, latency };
        self.links.insert((a, b), link);
        self.links.insert((b, a), link);
    }

    fn link(&self, src: Id, dst: Id) -> Option<&Link> {
        self.links.get(&(src, dst))
    }

    /// Delay of a control message (no payload) between two entities.
    pub fn latency(&self, src: Id, dst: Id) -> f64 {
        self.link(src, dst).map_or(0., |link| link.latency)
    }

    /// Delay of transferring `size` units between two entities.
    pub fn transfer_time(&self, src: Id, dst: Id, size: u64) -> f64 {
        self.link(src, dst)
            .map_or(0., |link| link.latency + size as f64 / link.bandwidth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconfigured_links_have_zero_delay() {
        let network = Network::new();
        assert_eq!(network.latency(0, 1), 0.);
        assert_eq!(network.transfer_time(0, 1, 1000), 0.);
    }

    #[test]
    fn links_are_symmetric() {
        let mut network = Network::new();
        network.add_link(0, 1, 100., 50.);
        assert_eq!(network.latency(0, 1), 50.);
        assert_eq!(network.latency(1, 0), 50.);
        // 50 latency + 300 bytes at 100 units/s
        assert_eq!(network.transfer_time(1, 0, 300), 53.);
    }
}
