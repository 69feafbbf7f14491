//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the product store contract used by the service layer.
//! - Isolate SQLite query details from business orchestration.
//!
//! # Invariants
//! - Repositories never swallow storage failures.
//! - Absence on lookup is an explicit `None`, not an error.

pub mod product_repo;
