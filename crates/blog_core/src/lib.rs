//! Core domain logic for the blog platform.
//! This crate is the single source of truth for content invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod slug;

pub use db::{open_store, open_store_in_memory, SlotError, SlotStore, SqliteSlotStore};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::category::{Category, CategoryDraft, CategoryId, CategorySnapshot};
pub use model::post::{Author, Post, PostDraft, PostId, PostStatus};
pub use repo::blog_repo::{BlogRepository, RepoError, RepoResult, CATEGORIES_SLOT, POSTS_SLOT};
pub use slug::{category_slug, post_slug};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
