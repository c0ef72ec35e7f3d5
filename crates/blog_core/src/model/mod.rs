//! Domain model for the blog content repository.
//!
//! # Responsibility
//! - Define the canonical post and category records and their draft inputs.
//! - Keep the embedded category snapshot type distinct from the live record.
//!
//! # Invariants
//! - Every record is identified by a stable, repository-assigned `Uuid`.
//! - Snapshots embedded in posts are frozen copies, never live references.

pub mod category;
pub mod post;
