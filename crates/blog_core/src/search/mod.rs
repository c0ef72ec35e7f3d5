//! Full-text lookup over the in-memory post collection.
//!
//! # Responsibility
//! - Expose substring search used by the public reading surface.
//! - Keep match semantics in one place so repository and tests agree.

pub mod text;
