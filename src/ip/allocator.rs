//! Point-to-point subnet allocation.
//!
//! Every link gets its own subnet carved sequentially out of a base network.
//! The first two host addresses of a subnet go to the link's two endpoints,
//! after which the allocator moves on to the next subnet.

use std::net::Ipv4Addr;

use serde::Serialize;

/// Errors that can occur while handing out link addresses
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    #[error("Network mask {mask} is not contiguous")]
    NonContiguousMask { mask: Ipv4Addr },

    #[error("Network mask {mask} leaves fewer than two host addresses per subnet")]
    SubnetTooSmall { mask: Ipv4Addr },

    #[error("Base address {base} has host bits set for mask {mask}")]
    MisalignedBase { base: Ipv4Addr, mask: Ipv4Addr },

    #[error("Address space exhausted after {allocated} subnets")]
    Exhausted { allocated: usize },
}

/// The two endpoint addresses of one point-to-point link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LinkAddresses {
    pub first: Ipv4Addr,
    pub second: Ipv4Addr,
    pub prefix_len: u8,
}

/// Source of fresh, non-overlapping endpoint address pairs
pub trait AddressAssigner {
    fn assign_pair(&mut self) -> Result<LinkAddresses, AddressError>;
}

/// Sequential subnet allocator, `10.0.0.0/30` by default
#[derive(Debug, Clone)]
pub struct SubnetAllocator {
    next_network: Option<u32>,
    prefix_len: u8,
    allocated: usize,
}

impl SubnetAllocator {
    pub fn new(base: Ipv4Addr, mask: Ipv4Addr) -> Result<Self, AddressError> {
        let mask_bits = u32::from(mask);
        let prefix_len = mask_bits.leading_ones();

        if mask_bits.checked_shl(prefix_len).unwrap_or(0) != 0 {
            return Err(AddressError::NonContiguousMask { mask });
        }
        // Host bits must cover network, two endpoints and broadcast
        if prefix_len > 30 {
            return Err(AddressError::SubnetTooSmall { mask });
        }
        if u32::from(base) & !mask_bits != 0 {
            return Err(AddressError::MisalignedBase { base, mask });
        }

        Ok(Self {
            next_network: Some(u32::from(base)),
            prefix_len: prefix_len as u8,
            allocated: 0,
        })
    }

    /// `10.0.0.0` with mask `255.255.255.252`
    pub fn point_to_point() -> Self {
        Self {
            next_network: Some(u32::from(Ipv4Addr::new(10, 0, 0, 0))),
            prefix_len: 30,
            allocated: 0,
        }
    }

    /// Number of subnets handed out so far
    pub fn allocated(&self) -> usize {
        self.allocated
    }

    fn block_size(&self) -> u64 {
        1u64 << (32 - u32::from(self.prefix_len))
    }
}

impl AddressAssigner for SubnetAllocator {
    fn assign_pair(&mut self) -> Result<LinkAddresses, AddressError> {
        let network = self.next_network.ok_or(AddressError::Exhausted {
            allocated: self.allocated,
        })?;

        let addresses = LinkAddresses {
            first: Ipv4Addr::from(network + 1),
            second: Ipv4Addr::from(network + 2),
            prefix_len: self.prefix_len,
        };

        self.next_network = u32::try_from(u64::from(network) + self.block_size()).ok();
        self.allocated += 1;
        Ok(addresses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_to_point_sequence() {
        let mut allocator = SubnetAllocator::point_to_point();

        let first = allocator.assign_pair().unwrap();
        assert_eq!(first.first, Ipv4Addr::new(10, 0, 0, 1));
        assert_eq!(first.second, Ipv4Addr::new(10, 0, 0, 2));
        assert_eq!(first.prefix_len, 30);

        let second = allocator.assign_pair().unwrap();
        assert_eq!(second.first, Ipv4Addr::new(10, 0, 0, 5));
        assert_eq!(second.second, Ipv4Addr::new(10, 0, 0, 6));
        assert_eq!(allocator.allocated(), 2);
    }

    #[test]
    fn test_new_matches_point_to_point() {
        let mut custom =
            SubnetAllocator::new(Ipv4Addr::new(10, 0, 0, 0), Ipv4Addr::new(255, 255, 255, 252)).unwrap();
        let mut default = SubnetAllocator::point_to_point();
        for _ in 0..70 {
            assert_eq!(custom.assign_pair().unwrap(), default.assign_pair().unwrap());
        }
    }

    #[test]
    fn test_rolls_into_next_octet() {
        let mut allocator = SubnetAllocator::point_to_point();
        let mut last = None;
        for _ in 0..65 {
            last = Some(allocator.assign_pair().unwrap());
        }
        let last = last.unwrap();
        assert_eq!(last.first, Ipv4Addr::new(10, 0, 1, 1));
        assert_eq!(last.second, Ipv4Addr::new(10, 0, 1, 2));
    }

    #[test]
    fn test_larger_subnets() {
        let mut allocator =
            SubnetAllocator::new(Ipv4Addr::new(192, 168, 0, 0), Ipv4Addr::new(255, 255, 255, 0)).unwrap();
        allocator.assign_pair().unwrap();
        let second = allocator.assign_pair().unwrap();
        assert_eq!(second.first, Ipv4Addr::new(192, 168, 1, 1));
        assert_eq!(second.prefix_len, 24);
    }

    #[test]
    fn test_invalid_masks() {
        let base = Ipv4Addr::new(10, 0, 0, 0);
        assert!(matches!(
            SubnetAllocator::new(base, Ipv4Addr::new(255, 0, 255, 0)),
            Err(AddressError::NonContiguousMask { .. })
        ));
        assert!(matches!(
            SubnetAllocator::new(base, Ipv4Addr::new(255, 255, 255, 254)),
            Err(AddressError::SubnetTooSmall { .. })
        ));
        assert!(matches!(
            SubnetAllocator::new(Ipv4Addr::new(10, 0, 0, 1), Ipv4Addr::new(255, 255, 255, 252)),
            Err(AddressError::MisalignedBase { .. })
        ));
    }

    #[test]
    fn test_exhaustion() {
        let mut allocator =
            SubnetAllocator::new(Ipv4Addr::new(255, 255, 255, 248), Ipv4Addr::new(255, 255, 255, 252)).unwrap();
        allocator.assign_pair().unwrap();
        allocator.assign_pair().unwrap();
        assert_eq!(
            allocator.assign_pair(),
            Err(AddressError::Exhausted { allocated: 2 })
        );
    }
}
