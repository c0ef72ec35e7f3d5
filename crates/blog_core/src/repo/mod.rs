//! Repository layer: the canonical owner of posts and categories.
//!
//! # Responsibility
//! - Hold the single authoritative copy of both collections in memory.
//! - Enforce cross-collection invariants before any mutation is applied.
//! - Mirror every successful mutation to the durable slot store.
//!
//! # Invariants
//! - The referential guard (no deleting a referenced category) is checked
//!   against the live post collection, never against snapshots.
//! - Persistence failures never roll back in-memory state.

pub mod blog_repo;
