//! Post domain model.
//!
//! # Responsibility
//! - Define the canonical post record and its draft input.
//! - Own the excerpt defaulting rule applied at creation.
//!
//! # Invariants
//! - `id` is assigned at creation and never reused.
//! - `published_at` is set once at creation; updates may only touch
//!   `updated_at`.
//! - `categories` holds frozen snapshots captured at save time, not live
//!   references.

use crate::model::category::{CategoryId, CategorySnapshot};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of content characters retained by the default excerpt.
const EXCERPT_PREFIX_CHARS: usize = 150;

/// Stable identifier for a post.
pub type PostId = Uuid;

/// Publication state of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    Published,
}

/// Denormalized author snapshot captured at creation.
///
/// There is no user subsystem; this is plain display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub avatar: Option<String>,
}

/// Canonical post record.
///
/// `content` is opaque markup; the repository never inspects it beyond
/// substring search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: String,
    pub cover_image: Option<String>,
    pub author: Author,
    /// Frozen category snapshots captured at save time, in selection order.
    pub categories: Vec<CategorySnapshot>,
    pub status: PostStatus,
    /// Set once at creation; never changed by later edits.
    pub published_at: DateTime<Utc>,
    /// Overwritten on every successful update.
    pub updated_at: DateTime<Utc>,
}

/// Caller-supplied fields for post creation.
///
/// `id` and both timestamps are always assigned by the repository. The slug
/// is caller-supplied: the form layer derives a default via
/// [`crate::slug::post_slug`] and lets the user override it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub slug: String,
    pub content: String,
    /// Missing or empty excerpt falls back to a content prefix.
    pub excerpt: Option<String>,
    pub cover_image: Option<String>,
    pub author: Author,
    pub categories: Vec<CategorySnapshot>,
    pub status: PostStatus,
}

impl Post {
    /// Builds a new post from a draft with a generated id and both
    /// timestamps set to `now`.
    pub(crate) fn from_draft(draft: PostDraft, now: DateTime<Utc>) -> Self {
        let excerpt = draft
            .excerpt
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| default_excerpt(&draft.content));
        Self {
            id: Uuid::new_v4(),
            title: draft.title,
            slug: draft.slug,
            content: draft.content,
            excerpt,
            cover_image: draft.cover_image,
            author: draft.author,
            categories: draft.categories,
            status: draft.status,
            published_at: now,
            updated_at: now,
        }
    }

    /// Returns whether the post is visible on the public surface.
    pub fn is_published(&self) -> bool {
        self.status == PostStatus::Published
    }

    /// Returns whether this post's snapshot list references `category_id`.
    pub fn references_category(&self, category_id: CategoryId) -> bool {
        self.categories
            .iter()
            .any(|snapshot| snapshot.id == category_id)
    }
}

/// Derives the default excerpt: the first 150 chars of `content` plus an
/// ellipsis marker.
///
/// The marker is appended even when the content is shorter than the prefix,
/// matching the original defaulting rule.
fn default_excerpt(content: &str) -> String {
    let mut excerpt: String = content.chars().take(EXCERPT_PREFIX_CHARS).collect();
    excerpt.push_str("...");
    excerpt
}
