//! An ordered in-memory index over unique integer keys, built as a skip
//! list: stacked doubly linked levels bounded by sentinel nodes, where each
//! higher level carries a random sample of the keys below it.
//!
//! ```text
//! L2  -inf <------------------------------------> +inf
//! L1  -inf <----------> [12] <------------------> +inf
//! L0  -inf <-> [5] <--> [12] <--> [24] <-> [31] <-> +inf
//! ```
//!
//! Search starts at the top head sentinel, walks right while the next value
//! is at most the probe, and drops a level when it cannot advance; expected
//! cost is logarithmic when roughly half the keys of each level also appear
//! one level up. Insertion places the key at the bottom level and then
//! promotes it upward while a coin drawn from the caller's generator keeps
//! coming up odd, growing a fresh empty level whenever a promotion would
//! pass the current top.
//!
//! Every node of every level lives in a single arena and refers to its
//! neighbors by slot index; removing a key unlinks its whole tower and
//! returns the slots to a free list. Levels are never removed, even when
//! deletions leave them holding only their sentinels.

extern crate rand;

mod arena;
mod error;
pub mod skiplist;

pub use error::OperationError;
pub use skiplist::{Iter, SkipList, Tower, NEG_INF, POS_INF};
