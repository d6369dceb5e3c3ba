//! Interval algebra over the IPv4 address space.
//!
//! Pools of addresses are modeled as sets of contiguous, non-overlapping
//! closed ranges. This crate provides:
//!
//! - [`AddrRange`] — a closed `[first, last]` interval owning the pairwise
//!   exclusion and intersection algebra
//! - [`RangeList`] — an ordered collection of ranges with batch exclusion
//!   and canonicalization
//! - [`Cidr`] — network-prefix blocks normalized to ranges, with optional
//!   network/broadcast reservation

pub mod cidr;
pub mod range;
pub mod range_list;


pub use cidr::Cidr;
pub use range::{AddrRange, Exclusion};
pub use range_list::{ListChange, RangeList};
