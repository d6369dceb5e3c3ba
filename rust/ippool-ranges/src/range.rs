//! A closed interval of addresses and the pairwise exclusion algebra.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use ippool_addr::codec;
use ippool_common::{Error, Result};

use crate::cidr::Cidr;
use crate::range_list::ListChange;

/// A closed range of addresses `[first, last]` (both inclusive).
///
/// `first <= last` always holds; a single address is a range whose edges
/// are equal. The type is an immutable value: every operation that
/// reshapes a range returns a new one.
///
/// The derived `Ord` orders ranges by `(first, last)`, which is the
/// ordering the list-level sort relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AddrRange {
    first: u32,
    last: u32,
}

impl AddrRange {
    /// Creates a range from its numeric edges.
    ///
    /// Fails with `InvalidRange` if `first > last`.
    pub fn new(first: u32, last: u32) -> Result<AddrRange> {
        if first > last {
            return Err(Error::invalid_range(
                codec::u32_to_addr(first),
                codec::u32_to_addr(last),
            ));
        }
        Ok(AddrRange { first, last })
    }

    /// A single-address range (both edges equal).
    #[inline]
    pub fn point(addr: u32) -> AddrRange {
        AddrRange {
            first: addr,
            last: addr,
        }
    }

    /// Creates a range from two addresses.
    pub fn from_addrs(first: Ipv4Addr, last: Ipv4Addr) -> Result<AddrRange> {
        AddrRange::new(codec::addr_to_u32(first), codec::addr_to_u32(last))
    }

    /// Constructor for algebra paths where the invariant is already
    /// established by the caller's case analysis.
    #[inline]
    pub(crate) fn new_unchecked(first: u32, last: u32) -> AddrRange {
        debug_assert!(first <= last);
        AddrRange { first, last }
    }

    /// The first (lowest) address in numeric form.
    #[inline]
    pub fn first(&self) -> u32 {
        self.first
    }

    /// The last (highest) address in numeric form.
    #[inline]
    pub fn last(&self) -> u32 {
        self.last
    }

    /// The first address.
    pub fn first_addr(&self) -> Ipv4Addr {
        codec::u32_to_addr(self.first)
    }

    /// The last address.
    pub fn last_addr(&self) -> Ipv4Addr {
        codec::u32_to_addr(self.last)
    }

    /// Number of addresses covered, `last - first + 1`.
    ///
    /// The full address space covers 2^32 addresses, one past `u32::MAX`,
    /// so lengths are `u64`.
    #[inline]
    pub fn len(&self) -> u64 {
        self.last as u64 - self.first as u64 + 1
    }

    /// Returns true if `addr` lies within the range.
    #[inline]
    pub fn contains(&self, addr: u32) -> bool {
        addr >= self.first && addr <= self.last
    }

    /// Returns true if the ranges share at least one address.
    ///
    /// Closed intervals: touching edges count as intersecting.
    #[inline]
    pub fn intersects(&self, other: &AddrRange) -> bool {
        !(other.last < self.first || other.first > self.last)
    }

    /// The overlap `[max(firsts), min(lasts)]`, or `None` when disjoint.
    pub fn intersection(&self, other: &AddrRange) -> Option<AddrRange> {
        let first = self.first.max(other.first);
        let last = self.last.min(other.last);
        (first <= last).then(|| AddrRange::new_unchecked(first, last))
    }

    /// Removes the addresses of `ex` from this range.
    ///
    /// Exactly one of the five relative topologies of two closed intervals
    /// applies, so the operation is total. Boundary touches (`ex` ending on
    /// `self.first` or starting on `self.last`) trim exactly one address
    /// and never produce an inverted range.
    pub fn exclude(&self, ex: &AddrRange) -> Exclusion {
        if !self.intersects(ex) {
            return Exclusion::Untouched;
        }
        if ex.first > self.first && ex.last < self.last {
            // strictly interior: the range splits around ex
            return Exclusion::Split(
                AddrRange::new_unchecked(self.first, ex.first - 1),
                AddrRange::new_unchecked(ex.last + 1, self.last),
            );
        }
        if ex.first <= self.first && ex.last >= self.last {
            return Exclusion::Absorbed;
        }
        if ex.first <= self.first {
            // left overlap: ex.last < self.last here
            Exclusion::Trimmed(AddrRange::new_unchecked(ex.last + 1, self.last))
        } else {
            // right overlap: ex.first > self.first here
            Exclusion::Trimmed(AddrRange::new_unchecked(self.first, ex.first - 1))
        }
    }

    /// Clips this range to the addresses a CIDR block covers.
    ///
    /// Fails with `NotIntersecting` when the block and the range are
    /// disjoint. `reserve_net_borders` is forwarded to
    /// [`Cidr::to_range`].
    pub fn cut_to_cidr(&self, cidr: &Cidr, reserve_net_borders: bool) -> Result<AddrRange> {
        let cidr_range = cidr.to_range(reserve_net_borders);
        self.intersection(&cidr_range)
            .ok_or_else(|| Error::not_intersecting(self.to_string(), cidr_range.to_string()))
    }

    /// Merges with an adjacent or overlapping successor, or gives both
    /// ranges back unchanged.
    ///
    /// Shaped for [`itertools::Itertools::coalesce`]: `self` must not
    /// start after `next` for a merge to apply.
    pub fn coalesce(
        &self,
        next: AddrRange,
    ) -> std::result::Result<AddrRange, (AddrRange, AddrRange)> {
        if self.first <= next.first && self.is_adjacent_or_overlaps(&next) {
            Ok(AddrRange::new_unchecked(
                self.first,
                self.last.max(next.last),
            ))
        } else {
            Err((*self, next))
        }
    }

    #[inline]
    fn is_adjacent_or_overlaps(&self, other: &AddrRange) -> bool {
        self.last >= other.first || other.first - self.last == 1
    }
}

impl fmt::Display for AddrRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.first_addr(), self.last_addr())
    }
}

impl FromStr for AddrRange {
    type Err = Error;

    /// Accepts `"A.B.C.D"` for a single address or `"A.B.C.D-E.F.G.H"`.
    fn from_str(s: &str) -> Result<AddrRange> {
        let text = s.trim();
        match text.split_once('-') {
            Some((first, last)) => {
                AddrRange::new(codec::parse_addr(first)?, codec::parse_addr(last)?)
            }
            None => Ok(AddrRange::point(codec::parse_addr(text)?)),
        }
    }
}

/// Outcome of [`AddrRange::exclude`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exclusion {
    /// The operands do not intersect; the source range stands as-is.
    Untouched,
    /// One side of the source range was cut away.
    Trimmed(AddrRange),
    /// The excluded range lies strictly inside; the source splits in two.
    Split(AddrRange, AddrRange),
    /// The excluded range covers the source entirely.
    Absorbed,
}

impl Exclusion {
    /// Numeric code: 0 untouched, 1 trimmed, 2 split, -1 absorbed.
    pub fn change_code(&self) -> i8 {
        match self {
            Exclusion::Untouched => 0,
            Exclusion::Trimmed(_) => 1,
            Exclusion::Split(..) => 2,
            Exclusion::Absorbed => -1,
        }
    }

    /// The list-level summary this outcome contributes.
    pub fn change(&self) -> ListChange {
        match self {
            Exclusion::Untouched => ListChange::Unchanged,
            Exclusion::Trimmed(_) => ListChange::Trimmed,
            Exclusion::Split(..) | Exclusion::Absorbed => ListChange::Resized,
        }
    }
}
