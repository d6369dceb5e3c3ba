//! Conversions between dotted-quad address text and the packed `u32` form,
//! plus ordering and wrapping successor/predecessor helpers.
//!
//! Addresses are packed high octet first, so numeric order on the `u32`
//! form matches the conventional ordering of addresses. Encoding and
//! decoding are explicit shift/mask operations; no byte reinterpretation
//! is involved.

use std::cmp::Ordering;
use std::net::Ipv4Addr;

use ippool_common::{Error, Result};

/// Packs an address into its numeric form.
#[inline]
pub fn addr_to_u32(addr: Ipv4Addr) -> u32 {
    let [a, b, c, d] = addr.octets();
    (a as u32) << 24 | (b as u32) << 16 | (c as u32) << 8 | d as u32
}

/// Unpacks a numeric address back into its octets.
#[inline]
pub fn u32_to_addr(value: u32) -> Ipv4Addr {
    Ipv4Addr::new(
        (value >> 24) as u8,
        (value >> 16 & 0xff) as u8,
        (value >> 8 & 0xff) as u8,
        (value & 0xff) as u8,
    )
}

/// Parses a strict dotted-quad address (`"A.B.C.D"`) into its numeric form.
///
/// Leading and trailing whitespace is tolerated.
pub fn parse_addr(text: &str) -> Result<u32> {
    let addr = text
        .trim()
        .parse::<Ipv4Addr>()
        .map_err(|e| Error::parse("address", text, e.to_string()))?;
    Ok(addr_to_u32(addr))
}

/// Renders a numeric address as dotted-quad text.
pub fn format_addr(value: u32) -> String {
    u32_to_addr(value).to_string()
}

/// Three-way comparison of two numeric addresses.
#[inline]
pub fn compare(a: u32, b: u32) -> Ordering {
    a.cmp(&b)
}

/// Three-way comparison of two addresses, consistent with numeric order.
#[inline]
pub fn compare_addrs(a: Ipv4Addr, b: Ipv4Addr) -> Ordering {
    compare(addr_to_u32(a), addr_to_u32(b))
}

/// Returns the next address, wrapping past the top of the address space:
/// `next_addr(255.255.255.255) == 0.0.0.0`.
#[inline]
pub fn next_addr(addr: Ipv4Addr) -> Ipv4Addr {
    u32_to_addr(addr_to_u32(addr).wrapping_add(1))
}

/// Returns the previous address, wrapping past the bottom of the address
/// space: `prev_addr(0.0.0.0) == 255.255.255.255`.
#[inline]
pub fn prev_addr(addr: Ipv4Addr) -> Ipv4Addr {
    u32_to_addr(addr_to_u32(addr).wrapping_sub(1))
}
