//! Category records and their frozen snapshots.
//!
//! # Responsibility
//! - Define the live `Category` record owned by the repository.
//! - Define `CategorySnapshot`, the copy-by-value form embedded in posts.
//!
//! # Invariants
//! - `id` is assigned at creation and never reused.
//! - `slug` is derived from the creation-time name and never recomputed,
//!   so existing category links stay valid across renames.

use crate::slug::category_slug;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a category.
pub type CategoryId = Uuid;

/// Live category record.
///
/// Edits to `name` or `description` do not propagate into snapshots already
/// embedded in saved posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    /// Derived once from the creation-time `name`; stable across renames.
    pub slug: String,
    pub description: Option<String>,
}

/// Caller-supplied fields for category creation.
///
/// `id` and `slug` are always assigned by the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDraft {
    pub name: String,
    pub description: Option<String>,
}

/// Frozen copy of a category as embedded in a post.
///
/// Intentionally a separate type from [`Category`]: a snapshot reflects the
/// category at the time the post was saved and may drift from the live
/// record afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySnapshot {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
}

impl Category {
    /// Builds a new category from a draft with a generated id and a slug
    /// derived from the draft name.
    pub(crate) fn from_draft(draft: CategoryDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            slug: category_slug(&draft.name),
            name: draft.name,
            description: draft.description,
        }
    }

    /// Captures a frozen snapshot of this category's current state.
    pub fn snapshot(&self) -> CategorySnapshot {
        CategorySnapshot {
            id: self.id,
            name: self.name.clone(),
            slug: self.slug.clone(),
            description: self.description.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Category, CategoryDraft};

    fn draft(name: &str) -> CategoryDraft {
        CategoryDraft {
            name: name.to_string(),
            description: Some("test".to_string()),
        }
    }

    #[test]
    fn from_draft_derives_slug_from_name() {
        let category = Category::from_draft(draft("Systems Programming"));
        assert_eq!(category.slug, "systems-programming");
        assert_eq!(category.name, "Systems Programming");
    }

    #[test]
    fn snapshot_copies_all_fields() {
        let category = Category::from_draft(draft("News"));
        let snapshot = category.snapshot();
        assert_eq!(snapshot.id, category.id);
        assert_eq!(snapshot.name, category.name);
        assert_eq!(snapshot.slug, category.slug);
        assert_eq!(snapshot.description, category.description);
    }

    #[test]
    fn generated_ids_differ() {
        let a = Category::from_draft(draft("A"));
        let b = Category::from_draft(draft("A"));
        assert_ne!(a.id, b.id);
        assert_eq!(a.slug, b.slug);
    }
}
