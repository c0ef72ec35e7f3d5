//! Blog content repository.
//!
//! # Responsibility
//! - Own the canonical post and category collections.
//! - Provide every CRUD and query operation consumed by the rendering and
//!   management surfaces.
//! - Persist each collection to its named slot after every successful
//!   mutation.
//!
//! # Invariants
//! - Ids are assigned here and never by callers.
//! - A category referenced by any post's snapshot list cannot be deleted.
//! - `published_at` and category slugs are fixed at creation; updates
//!   cannot change them.
//! - In-memory state stays authoritative when a slot write fails.
//!
//! # Concurrency
//! - All operations are synchronous and take `&self`/`&mut self`; exclusive
//!   borrows make check-then-act sequences atomic. A multithreaded host
//!   must wrap the repository in a mutex to keep that property.

use crate::db::{SlotError, SlotStore};
use crate::model::category::{Category, CategoryDraft, CategoryId, CategorySnapshot};
use crate::model::post::{Post, PostDraft, PostId};
use crate::search::text;
use crate::slug::category_slug;
use chrono::Utc;
use log::{error, info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Slot holding the serialized post collection.
pub const POSTS_SLOT: &str = "blog-posts";
/// Slot holding the serialized category collection.
pub const CATEGORIES_SLOT: &str = "blog-categories";

const DEFAULT_CATEGORY_NAME: &str = "General";
const DEFAULT_CATEGORY_DESCRIPTION: &str = "General blog posts";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository-level error.
///
/// Both persistence variants mean the in-memory mutation has already been
/// applied and remains authoritative; only durability failed.
#[derive(Debug)]
pub enum RepoError {
    /// The category is referenced by at least one post; nothing was changed.
    CategoryInUse(CategoryId),
    /// The slot payload could not be produced.
    Encode {
        slot: &'static str,
        source: serde_json::Error,
    },
    /// The slot store rejected the write.
    SlotWrite {
        slot: &'static str,
        source: SlotError,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CategoryInUse(id) => {
                write!(f, "category {id} is referenced by at least one post")
            }
            Self::Encode { slot, source } => {
                write!(f, "failed to serialize slot `{slot}`: {source}")
            }
            Self::SlotWrite { slot, source } => {
                write!(f, "failed to write slot `{slot}`: {source}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CategoryInUse(_) => None,
            Self::Encode { source, .. } => Some(source),
            Self::SlotWrite { source, .. } => Some(source),
        }
    }
}

/// The content repository: single owner of posts and categories.
///
/// Constructed once at process start via [`BlogRepository::open`] and passed
/// by reference to every consumer; there is no implicit global instance.
pub struct BlogRepository<S: SlotStore> {
    store: S,
    posts: Vec<Post>,
    categories: Vec<Category>,
}

impl<S: SlotStore> BlogRepository<S> {
    /// Loads both collections from the slot store.
    ///
    /// A missing posts slot yields an empty collection. A missing categories
    /// slot seeds one default category and best-effort persists the seed. A
    /// slot that fails to read or deserialize falls back the same way for
    /// that collection only; the failure is logged and the other collection
    /// loads normally.
    pub fn open(store: S) -> Self {
        let posts: Vec<Post> = load_slot(&store, POSTS_SLOT).unwrap_or_default();
        let (categories, seeded) = match load_slot(&store, CATEGORIES_SLOT) {
            Some(categories) => (categories, false),
            None => (vec![default_category()], true),
        };

        info!(
            "event=repo_open module=repo status=ok posts={} categories={} seeded={seeded}",
            posts.len(),
            categories.len()
        );

        let repo = Self {
            store,
            posts,
            categories,
        };
        if seeded {
            // Seed write is best-effort; memory is authoritative either way.
            let _ = repo.persist_categories();
        }
        repo
    }

    // ---- post operations ----

    /// Creates a post from caller-supplied fields and returns its id.
    ///
    /// Assigns the id, sets `published_at` and `updated_at` to now, and
    /// applies the excerpt default. Field validation is the form layer's
    /// job; this operation only fails when the slot write fails, and the
    /// post is in memory even then.
    pub fn create_post(&mut self, draft: PostDraft) -> RepoResult<PostId> {
        let post = Post::from_draft(draft, Utc::now());
        let id = post.id;
        self.posts.push(post);
        self.persist_posts()?;
        Ok(id)
    }

    /// Replaces the stored post with a matching id, forcing `updated_at` to
    /// now and keeping the stored `published_at`.
    ///
    /// Silent no-op when no post has that id; callers are expected to have
    /// fetched the record from this repository first.
    pub fn update_post(&mut self, mut post: Post) -> RepoResult<()> {
        let Some(stored) = self.posts.iter_mut().find(|stored| stored.id == post.id) else {
            return Ok(());
        };
        post.updated_at = Utc::now();
        post.published_at = stored.published_at;
        *stored = post;
        self.persist_posts()
    }

    /// Removes the post with that id; silent no-op when absent.
    pub fn delete_post(&mut self, id: PostId) -> RepoResult<()> {
        let before = self.posts.len();
        self.posts.retain(|post| post.id != id);
        if self.posts.len() == before {
            return Ok(());
        }
        self.persist_posts()
    }

    /// Returns the first post (in collection order) whose slug matches
    /// exactly.
    ///
    /// Duplicate slugs are not deduplicated: the earliest insertion wins.
    pub fn get_post_by_slug(&self, slug: &str) -> Option<&Post> {
        self.posts.iter().find(|post| post.slug == slug)
    }

    /// Returns published posts whose snapshot list references the category,
    /// in collection order.
    pub fn list_published_by_category(&self, category_id: CategoryId) -> Vec<&Post> {
        self.posts
            .iter()
            .filter(|post| post.is_published() && post.references_category(category_id))
            .collect()
    }

    /// Case-insensitive substring search over title, content, and excerpt
    /// of published posts.
    pub fn search_published(&self, query: &str) -> Vec<&Post> {
        text::search_published(&self.posts, query)
    }

    /// Read-only view of the full post collection.
    pub fn list_posts(&self) -> &[Post] {
        &self.posts
    }

    // ---- category operations ----

    /// Creates a category with a slug derived from the draft name and
    /// returns its id.
    pub fn create_category(&mut self, draft: CategoryDraft) -> RepoResult<CategoryId> {
        let category = Category::from_draft(draft);
        let id = category.id;
        self.categories.push(category);
        self.persist_categories()?;
        Ok(id)
    }

    /// Replaces the stored category with a matching id, keeping the stored
    /// slug even when the name changed.
    ///
    /// Silent no-op when no category has that id.
    pub fn update_category(&mut self, mut category: Category) -> RepoResult<()> {
        let Some(stored) = self
            .categories
            .iter_mut()
            .find(|stored| stored.id == category.id)
        else {
            return Ok(());
        };
        category.slug = stored.slug.clone();
        *stored = category;
        self.persist_categories()
    }

    /// Removes the category with that id unless any live post still
    /// references it.
    ///
    /// The in-use check reads the live post collection at call time; on
    /// rejection neither collection changes. Silent no-op when the id is
    /// unknown.
    pub fn delete_category(&mut self, id: CategoryId) -> RepoResult<()> {
        if self.posts.iter().any(|post| post.references_category(id)) {
            return Err(RepoError::CategoryInUse(id));
        }
        let before = self.categories.len();
        self.categories.retain(|category| category.id != id);
        if self.categories.len() == before {
            return Ok(());
        }
        self.persist_categories()
    }

    /// Captures snapshots of the live categories whose ids are listed, in
    /// collection order; unknown ids are skipped.
    ///
    /// This is how the form layer builds a draft's `categories` list, so the
    /// referenced categories are guaranteed to exist at save time.
    pub fn category_snapshots(&self, ids: &[CategoryId]) -> Vec<CategorySnapshot> {
        self.categories
            .iter()
            .filter(|category| ids.contains(&category.id))
            .map(Category::snapshot)
            .collect()
    }

    /// Read-only view of the full category collection.
    pub fn list_categories(&self) -> &[Category] {
        &self.categories
    }

    /// Rewrites both slots from current in-memory state.
    ///
    /// Intended as a final flush at process exit.
    pub fn flush(&self) -> RepoResult<()> {
        self.persist_posts()?;
        self.persist_categories()
    }

    // ---- persistence ----

    fn persist_posts(&self) -> RepoResult<()> {
        self.persist_slot(POSTS_SLOT, &self.posts)
    }

    fn persist_categories(&self) -> RepoResult<()> {
        self.persist_slot(CATEGORIES_SLOT, &self.categories)
    }

    fn persist_slot<T: Serialize>(&self, slot: &'static str, value: &T) -> RepoResult<()> {
        let payload = serde_json::to_string(value).map_err(|source| {
            warn!("event=slot_save module=repo status=error slot={slot} error={source}");
            RepoError::Encode { slot, source }
        })?;
        self.store.write_slot(slot, &payload).map_err(|source| {
            warn!("event=slot_save module=repo status=error slot={slot} error={source}");
            RepoError::SlotWrite { slot, source }
        })
    }
}

fn load_slot<S: SlotStore, T: DeserializeOwned>(store: &S, slot: &str) -> Option<Vec<T>> {
    let payload = match store.read_slot(slot) {
        Ok(payload) => payload?,
        Err(err) => {
            error!("event=slot_load module=repo status=error slot={slot} error={err}");
            return None;
        }
    };
    match serde_json::from_str(&payload) {
        Ok(records) => Some(records),
        Err(err) => {
            error!(
                "event=slot_load module=repo status=error slot={slot} error_code=deserialize \
                 error={err}"
            );
            None
        }
    }
}

fn default_category() -> Category {
    Category {
        id: Uuid::new_v4(),
        name: DEFAULT_CATEGORY_NAME.to_string(),
        slug: category_slug(DEFAULT_CATEGORY_NAME),
        description: Some(DEFAULT_CATEGORY_DESCRIPTION.to_string()),
    }
}
