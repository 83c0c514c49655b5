//! An ordered set built on a B-tree with a compile-time minimum degree.
//!
//! This crate provides [`MinDegBTreeSet`], an ordered container of unique keys
//! whose *minimum degree* `t` is a const generic parameter. Every node holds
//! between `t` and `2t` keys (the root is exempt from the lower bound), so the
//! trade-off between node width and tree height is fixed at compile time
//! rather than hard-coded by the library.
//!
//! # Example
//!
//! ```
//! use mindeg_tree::MinDegBTreeSet;
//!
//! // A 2-3 tree: every node holds at most two keys.
//! let mut primes: MinDegBTreeSet<u32, 1> = MinDegBTreeSet::new();
//!
//! assert!(primes.insert(2));
//! assert!(primes.insert(3));
//! assert!(primes.insert(5));
//!
//! // Duplicates are rejected.
//! assert!(!primes.insert(3));
//!
//! assert!(primes.contains(&5));
//! assert!(primes.remove(&5));
//! assert!(!primes.contains(&5));
//! assert_eq!(primes.len(), 2);
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Compile-time minimum degree** - `MinDegBTreeSet<K, 1>` is a 2-3 tree,
//!   `MinDegBTreeSet<K, 64>` a wide, shallow tree; invalid degrees fail to compile
//! - **Move-aware insertion** - [`try_insert`](MinDegBTreeSet::try_insert) hands a
//!   rejected key back to the caller instead of dropping it
//! - **Read-only node inspection** - [`find`](MinDegBTreeSet::find) and
//!   [`root`](MinDegBTreeSet::root) expose the tree structure for tests and tooling
//!
//! # Implementation
//!
//! Nodes live in a slab arena addressed by niche-optimised handles; mutating
//! operations carry an explicit descent path (a stack of `(node, child slot)`
//! frames) instead of parent back-pointers, so splits, merges and borrows
//! never have to re-stamp positions on moved children.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod raw;

pub mod btree_set;

pub use btree_set::{MinDegBTreeSet, NodeRef};
