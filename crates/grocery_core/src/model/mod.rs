//! Domain model for the grocery store backend.
//!
//! # Invariants
//! - `Product` is the only entity; its identity is a store-assigned integer.
//! - Deletion is a hard delete; there are no tombstones.

pub mod product;
