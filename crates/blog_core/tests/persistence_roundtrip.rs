use blog_core::db::{open_store, open_store_in_memory, SlotResult};
use blog_core::{
    post_slug, Author, BlogRepository, CategoryDraft, PostDraft, PostStatus, RepoError, SlotError,
    SlotStore, SqliteSlotStore, CATEGORIES_SLOT, POSTS_SLOT,
};
use std::cell::RefCell;
use std::collections::HashMap;

fn draft(title: &str, status: PostStatus) -> PostDraft {
    PostDraft {
        title: title.to_string(),
        slug: post_slug(title),
        content: format!("{title} body"),
        excerpt: None,
        cover_image: Some("https://example.com/cover.jpg".to_string()),
        author: Author {
            name: "Admin".to_string(),
            avatar: Some("https://example.com/avatar.png".to_string()),
        },
        categories: Vec::new(),
        status,
    }
}

#[test]
fn reopening_the_store_reproduces_both_collections() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("content.db");

    let (expected_posts, expected_categories) = {
        let conn = open_store(&path).unwrap();
        let mut repo = BlogRepository::open(SqliteSlotStore::try_new(&conn).unwrap());

        let category_id = repo
            .create_category(CategoryDraft {
                name: "Round Trip".to_string(),
                description: Some("durable".to_string()),
            })
            .unwrap();
        let snapshots = repo.category_snapshots(&[category_id]);

        let mut first = draft("First Post!", PostStatus::Published);
        first.categories = snapshots;
        repo.create_post(first).unwrap();
        let doomed = repo.create_post(draft("Doomed", PostStatus::Draft)).unwrap();

        let mut edited = repo.list_posts()[0].clone();
        edited.content = "revised body".to_string();
        repo.update_post(edited).unwrap();
        repo.delete_post(doomed).unwrap();

        (repo.list_posts().to_vec(), repo.list_categories().to_vec())
    };

    let conn = open_store(&path).unwrap();
    let repo = BlogRepository::open(SqliteSlotStore::try_new(&conn).unwrap());

    // Ids, field values and timestamps survive the ISO-8601 round trip.
    assert_eq!(repo.list_posts(), expected_posts.as_slice());
    assert_eq!(repo.list_categories(), expected_categories.as_slice());
}

#[test]
fn corrupted_posts_slot_falls_back_to_empty_without_touching_categories() {
    let conn = open_store_in_memory().unwrap();
    {
        let store = SqliteSlotStore::try_new(&conn).unwrap();
        let mut repo = BlogRepository::open(store);
        repo.create_category(CategoryDraft {
            name: "Survivor".to_string(),
            description: None,
        })
        .unwrap();
    }
    let store = SqliteSlotStore::try_new(&conn).unwrap();
    store.write_slot(POSTS_SLOT, "{not valid json").unwrap();

    let repo = BlogRepository::open(SqliteSlotStore::try_new(&conn).unwrap());
    assert!(repo.list_posts().is_empty());
    assert!(repo
        .list_categories()
        .iter()
        .any(|c| c.name == "Survivor"));
}

#[test]
fn corrupted_categories_slot_reseeds_without_touching_posts() {
    let conn = open_store_in_memory().unwrap();
    {
        let store = SqliteSlotStore::try_new(&conn).unwrap();
        let mut repo = BlogRepository::open(store);
        repo.create_post(draft("Kept Post", PostStatus::Published))
            .unwrap();
    }
    let store = SqliteSlotStore::try_new(&conn).unwrap();
    store.write_slot(CATEGORIES_SLOT, "42").unwrap();

    let repo = BlogRepository::open(SqliteSlotStore::try_new(&conn).unwrap());
    assert_eq!(repo.list_posts().len(), 1);
    assert_eq!(repo.list_categories().len(), 1);
    assert_eq!(repo.list_categories()[0].name, "General");
}

#[test]
fn flush_rewrites_both_slots() {
    let conn = open_store_in_memory().unwrap();
    let mut repo = BlogRepository::open(SqliteSlotStore::try_new(&conn).unwrap());
    repo.create_post(draft("Flushed", PostStatus::Draft)).unwrap();

    repo.flush().unwrap();

    let store = SqliteSlotStore::try_new(&conn).unwrap();
    assert!(store.read_slot(POSTS_SLOT).unwrap().is_some());
    assert!(store.read_slot(CATEGORIES_SLOT).unwrap().is_some());
}

/// In-memory store whose writes always fail, simulating storage quota
/// exhaustion.
struct QuotaExhaustedStore {
    slots: RefCell<HashMap<String, String>>,
}

impl QuotaExhaustedStore {
    fn new() -> Self {
        Self {
            slots: RefCell::new(HashMap::new()),
        }
    }
}

impl SlotStore for QuotaExhaustedStore {
    fn read_slot(&self, name: &str) -> SlotResult<Option<String>> {
        Ok(self.slots.borrow().get(name).cloned())
    }

    fn write_slot(&self, _name: &str, _payload: &str) -> SlotResult<()> {
        Err(SlotError::Unavailable("quota exceeded".to_string()))
    }
}

#[test]
fn failed_writes_surface_an_error_but_keep_memory_authoritative() {
    let mut repo = BlogRepository::open(QuotaExhaustedStore::new());

    // The seed write already failed; the seeded category is still live.
    assert_eq!(repo.list_categories().len(), 1);

    let err = repo.create_post(draft("Unsaved", PostStatus::Published)).unwrap_err();
    assert!(matches!(err, RepoError::SlotWrite { slot, .. } if slot == POSTS_SLOT));

    // No rollback: the post exists and is queryable for the session.
    assert_eq!(repo.list_posts().len(), 1);
    assert_eq!(repo.search_published("unsaved").len(), 1);

    let err = repo
        .create_category(CategoryDraft {
            name: "Unsaved Too".to_string(),
            description: None,
        })
        .unwrap_err();
    assert!(matches!(err, RepoError::SlotWrite { slot, .. } if slot == CATEGORIES_SLOT));
    assert_eq!(repo.list_categories().len(), 2);
}

#[test]
fn guard_rejection_fires_before_any_persistence_attempt() {
    let mut repo = BlogRepository::open(QuotaExhaustedStore::new());

    let category_id = match repo.create_category(CategoryDraft {
        name: "Guarded".to_string(),
        description: None,
    }) {
        Err(RepoError::SlotWrite { .. }) => repo.list_categories().last().unwrap().id,
        other => panic!("expected slot write failure, got {other:?}"),
    };

    let snapshots = repo.category_snapshots(&[category_id]);
    let mut referencing = draft("Referencing", PostStatus::Published);
    referencing.categories = snapshots;
    let _ = repo.create_post(referencing);

    // In-use beats persistence: the guard reports the business error.
    let err = repo.delete_category(category_id).unwrap_err();
    assert!(matches!(err, RepoError::CategoryInUse(id) if id == category_id));
}
