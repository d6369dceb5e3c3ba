//! A flat sorted set of discrete addresses, used to track explicit
//! per-address allocations alongside the range algebra.

use std::fmt;

use crate::codec;

/// A sorted set of unique addresses in packed `u32` form.
///
/// Lookup is a linear scan: allocation sets are small and the set is kept
/// sorted mainly for stable rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddrSet {
    addrs: Vec<u32>,
}

impl AddrSet {
    /// Creates an empty set.
    pub fn new() -> AddrSet {
        AddrSet::default()
    }

    /// Builds a set from textual addresses.
    ///
    /// Entries that fail to parse are silently skipped. The result is
    /// sorted ascending and deduplicated.
    pub fn from_texts<I>(texts: I) -> AddrSet
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut set = AddrSet {
            addrs: texts
                .into_iter()
                .filter_map(|t| codec::parse_addr(t.as_ref()).ok())
                .collect(),
        };
        set.sort();
        set
    }

    /// Appends an address without re-sorting; call [`sort`](Self::sort)
    /// once a batch of insertions is done.
    pub fn push(&mut self, addr: u32) {
        self.addrs.push(addr);
    }

    /// Sorts the set ascending and drops duplicates.
    pub fn sort(&mut self) {
        self.addrs.sort_unstable();
        self.addrs.dedup();
    }

    /// Returns the position of `addr`, or `None` if it is not present.
    pub fn index_of(&self, addr: u32) -> Option<usize> {
        self.addrs.iter().position(|&a| a == addr)
    }

    /// Returns true if `addr` is present.
    pub fn contains(&self, addr: u32) -> bool {
        self.index_of(addr).is_some()
    }

    /// Returns the number of addresses in the set.
    #[inline]
    pub fn len(&self) -> usize {
        self.addrs.len()
    }

    /// Returns true if the set holds no addresses.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.addrs.is_empty()
    }

    /// Returns the addresses as a slice, in storage order.
    #[inline]
    pub fn addrs(&self) -> &[u32] {
        &self.addrs
    }

    /// Iterates over the addresses in storage order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.addrs.iter().copied()
    }
}

impl fmt::Display for AddrSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, addr) in self.addrs.iter().enumerate() {
            if i != 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", codec::u32_to_addr(*addr))?;
        }
        Ok(())
    }
}
