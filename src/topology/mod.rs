//! Network topology module.
//!
//! This module turns the adjacency matrix into point-to-point links with
//! assigned endpoint addresses.

pub mod links;
pub mod types;

// Re-export key types and functions for easier access
pub use links::{build_topology, link_pairs};
pub use types::{Link, Topology};
