//! CIDR blocks and their normalization to address ranges.

use std::fmt;
use std::str::FromStr;

use ippool_addr::codec;
use ippool_common::{Error, Result};

use crate::range::AddrRange;

/// A CIDR block: an address plus a prefix length in `0..=32`.
///
/// The address may carry host bits; they are masked away when the network
/// base is derived. Masks are computed by explicit shifts, never by byte
/// reinterpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cidr {
    addr: u32,
    prefix_len: u8,
}

impl Cidr {
    /// Creates a block, failing with `InvalidPrefix` if `prefix_len > 32`.
    pub fn new(addr: u32, prefix_len: u8) -> Result<Cidr> {
        if prefix_len > 32 {
            return Err(Error::invalid_prefix(prefix_len));
        }
        Ok(Cidr { addr, prefix_len })
    }

    /// Number of fixed high-order bits defining the block.
    #[inline]
    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    /// Mask with the low `32 - prefix_len` host bits set.
    #[inline]
    pub fn host_mask(&self) -> u32 {
        u32::MAX.checked_shr(self.prefix_len as u32).unwrap_or(0)
    }

    /// Mask with the high `prefix_len` network bits set.
    #[inline]
    pub fn network_mask(&self) -> u32 {
        !self.host_mask()
    }

    /// The all-zero-host base address of the block.
    #[inline]
    pub fn network(&self) -> u32 {
        self.addr & self.network_mask()
    }

    /// The all-one-host address of the block.
    #[inline]
    pub fn broadcast(&self) -> u32 {
        self.network() | self.host_mask()
    }

    /// Expands the block into the closed range it covers.
    ///
    /// With `reserve_net_borders`, the network and broadcast addresses are
    /// dropped from the range. Reservation never applies to `/31` and `/32`
    /// blocks: point-to-point links and host routes use every address, and
    /// trimming would invert the edges. A `/0` with reservation covers
    /// everything but the all-zero and all-one addresses.
    pub fn to_range(&self, reserve_net_borders: bool) -> AddrRange {
        let first = self.network();
        let last = self.broadcast();
        if reserve_net_borders && self.prefix_len < 31 {
            // a block of 4+ addresses, so the trimmed edges cannot cross
            AddrRange::new_unchecked(first + 1, last - 1)
        } else {
            AddrRange::new_unchecked(first, last)
        }
    }
}

impl fmt::Display for Cidr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", codec::u32_to_addr(self.network()), self.prefix_len)
    }
}

impl FromStr for Cidr {
    type Err = Error;

    /// Parses `"A.B.C.D/N"` with `N` in `0..=32`.
    fn from_str(s: &str) -> Result<Cidr> {
        let text = s.trim();
        let (addr, prefix) = text
            .split_once('/')
            .ok_or_else(|| Error::parse("cidr", s, "expected 'A.B.C.D/N'"))?;
        let prefix_len = prefix
            .parse::<u8>()
            .map_err(|e| Error::parse("cidr", s, e.to_string()))?;
        Cidr::new(codec::parse_addr(addr)?, prefix_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cidr(s: &str) -> Cidr {
        s.parse().unwrap()
    }

    #[test]
    fn masks_follow_prefix() {
        let c = cidr("192.168.92.0/24");
        assert_eq!(c.prefix_len(), 24);
        assert_eq!(c.network_mask(), 0xffffff00);
        assert_eq!(c.host_mask(), 0x000000ff);
        assert_eq!(cidr("0.0.0.0/0").host_mask(), u32::MAX);
        assert_eq!(cidr("10.0.0.1/32").host_mask(), 0);
    }

    #[test]
    fn network_base_drops_host_bits() {
        let c = cidr("192.168.92.77/24");
        assert_eq!(codec::format_addr(c.network()), "192.168.92.0");
        assert_eq!(codec::format_addr(c.broadcast()), "192.168.92.255");
        assert_eq!(c.to_string(), "192.168.92.0/24");
    }

    #[test]
    fn to_range_with_reservation() {
        let r = cidr("192.168.92.0/24").to_range(true);
        assert_eq!(r.to_string(), "192.168.92.1-192.168.92.254");
        assert_eq!(r.len(), 254);

        let r = cidr("192.168.92.0/25").to_range(true);
        assert_eq!(r.to_string(), "192.168.92.1-192.168.92.126");
        assert_eq!(r.len(), 126);
    }

    #[test]
    fn to_range_without_reservation() {
        let r = cidr("192.168.92.0/24").to_range(false);
        assert_eq!(r.to_string(), "192.168.92.0-192.168.92.255");
        assert_eq!(r.len(), 256);

        let r = cidr("192.168.92.0/25").to_range(false);
        assert_eq!(r.to_string(), "192.168.92.0-192.168.92.127");
        assert_eq!(r.len(), 128);
    }

    #[test]
    fn host_and_p2p_blocks_skip_reservation() {
        for reserve in [true, false] {
            let r = cidr("192.168.92.33/32").to_range(reserve);
            assert_eq!(r.to_string(), "192.168.92.33-192.168.92.33");
            assert_eq!(r.len(), 1);

            let r = cidr("10.0.0.4/31").to_range(reserve);
            assert_eq!(r.to_string(), "10.0.0.4-10.0.0.5");
            assert_eq!(r.len(), 2);
        }
    }

    #[test]
    fn zero_prefix_spans_the_address_space() {
        let r = cidr("0.0.0.0/0").to_range(true);
        assert_eq!(r.to_string(), "0.0.0.1-255.255.255.254");
        assert_eq!(r.len(), (1u64 << 32) - 2);

        let r = cidr("0.0.0.0/0").to_range(false);
        assert_eq!(r.to_string(), "0.0.0.0-255.255.255.255");
        assert_eq!(r.len(), 1u64 << 32);
    }

    #[test]
    fn parse_rejects_malformed() {
        assert!("192.168.92.0".parse::<Cidr>().is_err());
        assert!("192.168.92.0/".parse::<Cidr>().is_err());
        assert!("192.168.92.0/33".parse::<Cidr>().is_err());
        assert!("192.168.92/24".parse::<Cidr>().is_err());
        assert!("/24".parse::<Cidr>().is_err());
    }

    #[test]
    fn parse_prefix_error_kind() {
        let err = "192.168.92.0/33".parse::<Cidr>().unwrap_err();
        assert!(matches!(
            err.kind(),
            ippool_common::ErrorKind::InvalidPrefix { prefix_len: 33 }
        ));
    }
}
