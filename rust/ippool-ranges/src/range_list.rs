//! An ordered collection of address ranges and the batch exclusion that
//! preserves its non-overlap invariant.

use std::fmt;

use itertools::Itertools;

use crate::range::{AddrRange, Exclusion};

/// An ordered collection of non-overlapping address ranges — a pool from
/// which reserved and allocated sub-ranges are carved out.
///
/// Members never overlap and each satisfies its own edge invariant.
/// Insertion order is preserved as-is; [`arranged`](Self::arranged)
/// produces the canonical ascending, maximally-merged form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeList {
    ranges: Vec<AddrRange>,
}

impl RangeList {
    /// Creates an empty list.
    pub fn new() -> RangeList {
        RangeList::default()
    }

    /// Appends a range, keeping insertion order.
    pub fn push(&mut self, range: AddrRange) {
        self.ranges.push(range);
    }

    /// Returns the members as a slice, in list order.
    #[inline]
    pub fn ranges(&self) -> &[AddrRange] {
        &self.ranges
    }

    /// Iterates over the members in list order.
    pub fn iter(&self) -> impl Iterator<Item = &AddrRange> {
        self.ranges.iter()
    }

    /// Returns the number of member ranges.
    #[inline]
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Returns true if the list holds no ranges.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Total number of addresses covered by all members.
    pub fn address_count(&self) -> u64 {
        self.ranges.iter().map(AddrRange::len).sum()
    }

    /// Removes the addresses of `ex` from every member.
    ///
    /// A single forward fold over the source members: each contributes
    /// zero (absorbed), one (untouched or trimmed) or two (split) ranges
    /// to the rebuilt list, in source order. The summary is the maximum
    /// over the per-member outcomes, so any split or absorption reports
    /// [`ListChange::Resized`] even when the member count nets out.
    pub fn exclude(&self, ex: &AddrRange) -> (RangeList, ListChange) {
        let mut out = Vec::with_capacity(self.ranges.len() + 1);
        let mut change = ListChange::Unchanged;
        for member in &self.ranges {
            let outcome = member.exclude(ex);
            change = change.max(outcome.change());
            match outcome {
                Exclusion::Untouched => out.push(*member),
                Exclusion::Trimmed(r) => out.push(r),
                Exclusion::Split(left, right) => {
                    out.push(left);
                    out.push(right);
                }
                Exclusion::Absorbed => {}
            }
        }
        (RangeList { ranges: out }, change)
    }

    /// A copy ordered ascending by first address.
    pub fn sorted(&self) -> RangeList {
        let mut ranges = self.ranges.clone();
        ranges.sort_unstable_by_key(AddrRange::first);
        RangeList { ranges }
    }

    /// A copy with adjacent, overlapping or touching neighbors folded into
    /// maximal ranges.
    ///
    /// Only neighbors are considered; run on a [`sorted`](Self::sorted)
    /// list (or use [`arranged`](Self::arranged)) for a fully merged
    /// result.
    pub fn glued(&self) -> RangeList {
        let ranges = self
            .ranges
            .iter()
            .copied()
            .coalesce(|prev, next| prev.coalesce(next))
            .collect();
        RangeList { ranges }
    }

    /// The canonical form: sorted ascending, then maximally merged into
    /// disjoint ranges.
    pub fn arranged(&self) -> RangeList {
        self.sorted().glued()
    }

    /// Per-member renderings, in list order.
    pub fn strings(&self) -> Vec<String> {
        self.ranges.iter().map(|r| r.to_string()).collect()
    }
}

impl fmt::Display for RangeList {
    /// One range per line, in list order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, range) in self.ranges.iter().enumerate() {
            if i != 0 {
                f.write_str("\n")?;
            }
            write!(f, "{range}")?;
        }
        Ok(())
    }
}

impl From<Vec<AddrRange>> for RangeList {
    fn from(ranges: Vec<AddrRange>) -> Self {
        RangeList { ranges }
    }
}

impl From<AddrRange> for RangeList {
    fn from(range: AddrRange) -> Self {
        RangeList {
            ranges: vec![range],
        }
    }
}

impl FromIterator<AddrRange> for RangeList {
    fn from_iter<I: IntoIterator<Item = AddrRange>>(iter: I) -> Self {
        RangeList {
            ranges: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RangeList {
    type Item = &'a AddrRange;
    type IntoIter = std::slice::Iter<'a, AddrRange>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranges.iter()
    }
}

/// Summary of how much a batch exclusion reshaped a [`RangeList`].
///
/// Ordered by severity, so per-member contributions combine with `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ListChange {
    /// No member intersected the excluded range.
    Unchanged,
    /// At least one member was trimmed, but the member count is intact.
    Trimmed,
    /// A split or absorption occurred; the member count changed.
    Resized,
}

impl ListChange {
    /// Numeric code: 0 unchanged, 1 trimmed, 2 resized.
    pub fn code(&self) -> u8 {
        match self {
            ListChange::Unchanged => 0,
            ListChange::Trimmed => 1,
            ListChange::Resized => 2,
        }
    }
}
