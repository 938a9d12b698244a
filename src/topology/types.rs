//! Topology type definitions.

use serde::Serialize;

use crate::ip::{InterfaceTable, LinkAddresses};

/// A point-to-point link created for one true adjacency cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Link {
    pub source: usize,
    pub target: usize,
    pub addresses: LinkAddresses,
}

/// Links plus the interface table derived from them
#[derive(Debug, Clone, PartialEq)]
pub struct Topology {
    pub links: Vec<Link>,
    pub interfaces: InterfaceTable,
    /// Number of true matrix cells processed
    pub link_count: usize,
}

impl Topology {
    /// Links joining `a` and `b` in either direction
    pub fn links_between(&self, a: usize, b: usize) -> impl Iterator<Item = &Link> + '_ {
        self.links.iter().filter(move |link| {
            (link.source == a && link.target == b) || (link.source == b && link.target == a)
        })
    }
}
