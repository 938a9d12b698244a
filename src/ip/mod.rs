//! IP address allocation and bookkeeping module.
//!
//! This module hands out point-to-point link subnets and records which
//! address every node uses towards each of its peers.

pub mod allocator;
pub mod registry;

// Re-export commonly used types
pub use allocator::{AddressAssigner, AddressError, LinkAddresses, SubnetAllocator};
pub use registry::{InterfaceTable, SENTINEL};
