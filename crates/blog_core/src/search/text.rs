//! Case-insensitive substring search over posts.
//!
//! # Invariants
//! - Only published posts are returned.
//! - Results keep collection order; ranking is a caller-side concern.
//! - An empty query matches every published post (literal empty-substring
//!   semantics; suppressing blank queries is the caller's job).

use crate::model::post::Post;

/// Returns published posts whose title, content, or excerpt contains
/// `query`, ignoring case.
pub fn search_published<'a>(posts: &'a [Post], query: &str) -> Vec<&'a Post> {
    let needle = query.to_lowercase();
    posts
        .iter()
        .filter(|post| post.is_published() && matches_post(post, &needle))
        .collect()
}

/// Matches `needle` (already lowercased) against any searchable field.
fn matches_post(post: &Post, needle: &str) -> bool {
    post.title.to_lowercase().contains(needle)
        || post.content.to_lowercase().contains(needle)
        || post.excerpt.to_lowercase().contains(needle)
}
