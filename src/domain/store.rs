//! Catalog store: the single owner of categories and content items.
//!
//! All state sits behind one lock, so each operation (including the category
//! cascade) is one critical section. Every operation checks its preconditions
//! before touching state; a rejected call leaves the catalog as it was.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::broadcast;
use tracing::debug;

use super::entities::{normalize_name, CatalogSnapshot, Category, ContentId, ContentItem};
use super::errors::DomainError;
use super::events::{CatalogChange, CatalogEvent};

/// Capacity of the change-notification channel. Slow subscribers see `Lagged`.
pub const EVENT_CHANNEL_CAPACITY: usize = 256;

#[derive(Debug, Default)]
struct State {
    revision: u64,
    categories: Vec<Category>,
    /// Content insertion order.
    order: Vec<ContentId>,
    items: HashMap<ContentId, ContentItem>,
}

impl State {
    fn has_category(&self, name: &str) -> bool {
        self.categories.iter().any(|c| c.name == name)
    }

    fn push_category(&mut self, name: &str) -> Result<(), DomainError> {
        if self.has_category(name) {
            return Err(DomainError::DuplicateCategory(name.to_string()));
        }
        self.categories.push(Category::new(name));
        Ok(())
    }

    fn push_content(&mut self, item: ContentItem) -> Result<(), DomainError> {
        if !self.has_category(&item.category_name) {
            return Err(DomainError::UnknownCategory(item.category_name));
        }
        if self.items.contains_key(&item.id) {
            return Err(DomainError::DuplicateId(item.id.to_string()));
        }
        self.order.push(item.id.clone());
        self.items.insert(item.id.clone(), item);
        Ok(())
    }

    fn snapshot(&self) -> CatalogSnapshot {
        CatalogSnapshot {
            revision: self.revision,
            categories: self.categories.clone(),
            items: self
                .order
                .iter()
                .filter_map(|id| self.items.get(id).cloned())
                .collect(),
        }
    }
}

/// Process-wide catalog state. Share it as `Arc<CatalogStore>`.
#[derive(Debug)]
pub struct CatalogStore {
    state: RwLock<State>,
    events: broadcast::Sender<CatalogEvent>,
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogStore {
    /// Empty catalog.
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            state: RwLock::new(State::default()),
            events,
        }
    }

    /// Catalog initialised from a seed. Category names are normalized on the
    /// way in; seeds that break any invariant afterwards are rejected.
    pub fn with_seed(seed: CatalogSnapshot) -> Result<Self, DomainError> {
        let mut state = State {
            revision: seed.revision,
            ..State::default()
        };
        for category in &seed.categories {
            let name = normalize_name(&category.name);
            if name.is_empty() {
                return Err(DomainError::missing("name"));
            }
            state.push_category(&name)?;
        }
        for mut item in seed.items {
            item.category_name = normalize_name(&item.category_name);
            state.push_content(item)?;
        }
        let store = Self::new();
        *store.write() = state;
        Ok(store)
    }

    /// Subscribe to change notifications emitted after each successful mutation.
    pub fn subscribe(&self) -> broadcast::Receiver<CatalogEvent> {
        self.events.subscribe()
    }

    pub fn revision(&self) -> u64 {
        self.read().revision
    }

    /// Appends a category at the end of the display order.
    pub fn insert_category(&self, name: &str) -> Result<(), DomainError> {
        let mut state = self.write();
        state.push_category(name)?;
        self.commit(
            &mut state,
            CatalogChange::CategoryAdded {
                name: name.to_string(),
            },
        );
        Ok(())
    }

    /// Removes a category and every item referencing it in one step.
    /// Returns the ids of the removed items.
    pub fn remove_category(&self, name: &str) -> Result<Vec<ContentId>, DomainError> {
        let mut state = self.write();
        let pos = state
            .categories
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| DomainError::UnknownCategory(name.to_string()))?;

        let removed: Vec<ContentId> = state
            .order
            .iter()
            .filter(|id| {
                state
                    .items
                    .get(*id)
                    .is_some_and(|item| item.category_name == name)
            })
            .cloned()
            .collect();

        state.categories.remove(pos);
        for id in &removed {
            state.items.remove(id);
        }
        let State { order, items, .. } = &mut *state;
        order.retain(|id| items.contains_key(id));

        self.commit(
            &mut state,
            CatalogChange::CategoryRemoved {
                name: name.to_string(),
                removed_items: removed.clone(),
            },
        );
        Ok(removed)
    }

    pub fn insert_content(&self, item: ContentItem) -> Result<(), DomainError> {
        let mut state = self.write();
        let id = item.id.clone();
        state.push_content(item)?;
        self.commit(&mut state, CatalogChange::ContentAdded { id });
        Ok(())
    }

    /// Overwrites every mutable field of `id`. The stored id is kept whatever
    /// `updated.id` says, and so is the item's position.
    pub fn replace_content(&self, id: &ContentId, updated: ContentItem) -> Result<(), DomainError> {
        let mut state = self.write();
        if !state.items.contains_key(id) {
            return Err(DomainError::UnknownContent(id.to_string()));
        }
        if !state.has_category(&updated.category_name) {
            return Err(DomainError::UnknownCategory(updated.category_name));
        }
        let item = ContentItem {
            id: id.clone(),
            ..updated
        };
        state.items.insert(id.clone(), item);
        self.commit(&mut state, CatalogChange::ContentReplaced { id: id.clone() });
        Ok(())
    }

    pub fn remove_content(&self, id: &ContentId) -> Result<ContentItem, DomainError> {
        let mut state = self.write();
        let item = state
            .items
            .remove(id)
            .ok_or_else(|| DomainError::UnknownContent(id.to_string()))?;
        state.order.retain(|existing| existing != id);
        self.commit(&mut state, CatalogChange::ContentRemoved { id: id.clone() });
        Ok(item)
    }

    pub fn snapshot(&self) -> CatalogSnapshot {
        self.read().snapshot()
    }

    pub fn contains_category(&self, name: &str) -> bool {
        self.read().has_category(name)
    }

    pub fn get_content(&self, id: &ContentId) -> Option<ContentItem> {
        self.read().items.get(id).cloned()
    }

    /// Bumps the revision and notifies subscribers while the write guard is
    /// still held, so events arrive in revision order.
    fn commit(&self, state: &mut State, change: CatalogChange) {
        state.revision += 1;
        let event = CatalogEvent {
            revision: state.revision,
            change,
        };
        debug!(revision = event.revision, change = ?event.change, "catalog changed");
        // No subscribers is fine.
        let _ = self.events.send(event);
    }

    // Mutations validate before writing, so a poisoned guard still holds a consistent catalog.
    fn read(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MediaType;

    fn item(id: &str, category: &str) -> ContentItem {
        ContentItem {
            id: ContentId::from(id),
            title: format!("title {id}"),
            description: "desc".to_string(),
            thumbnail_ref: "https://example.com/a.jpg".to_string(),
            media_type: MediaType::Image,
            category_name: category.to_string(),
        }
    }

    #[test]
    fn test_insert_category_keeps_order_and_rejects_duplicates() {
        let store = CatalogStore::new();
        store.insert_category("B").unwrap();
        store.insert_category("A").unwrap();
        assert_eq!(
            store.insert_category("B"),
            Err(DomainError::DuplicateCategory("B".into()))
        );
        assert_eq!(store.snapshot().category_names(), vec!["B", "A"]);
        assert_eq!(store.revision(), 2);
    }

    #[test]
    fn test_insert_content_checks_category_then_id() {
        let store = CatalogStore::new();
        store.insert_category("A").unwrap();
        assert_eq!(
            store.insert_content(item("1", "Z")),
            Err(DomainError::UnknownCategory("Z".into()))
        );
        store.insert_content(item("1", "A")).unwrap();
        assert_eq!(
            store.insert_content(item("1", "A")),
            Err(DomainError::DuplicateId("1".into()))
        );
        assert_eq!(store.snapshot().items.len(), 1);
    }

    #[test]
    fn test_remove_category_cascades() {
        let store = CatalogStore::new();
        store.insert_category("A").unwrap();
        store.insert_category("B").unwrap();
        store.insert_content(item("1", "A")).unwrap();
        store.insert_content(item("2", "B")).unwrap();
        store.insert_content(item("3", "A")).unwrap();

        let removed = store.remove_category("A").unwrap();
        assert_eq!(removed, vec![ContentId::from("1"), ContentId::from("3")]);

        let snap = store.snapshot();
        assert_eq!(snap.category_names(), vec!["B"]);
        assert_eq!(snap.items, vec![item("2", "B")]);
        assert!(snap.is_consistent());
    }

    #[test]
    fn test_remove_unknown_is_an_error() {
        let store = CatalogStore::new();
        assert_eq!(
            store.remove_category("nope"),
            Err(DomainError::UnknownCategory("nope".into()))
        );
        assert_eq!(
            store.remove_content(&ContentId::from("x")),
            Err(DomainError::UnknownContent("x".into()))
        );
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn test_replace_content_keeps_id_and_position() {
        let store = CatalogStore::new();
        store.insert_category("A").unwrap();
        store.insert_category("B").unwrap();
        store.insert_content(item("1", "A")).unwrap();
        store.insert_content(item("2", "A")).unwrap();

        let mut updated = item("ignored", "B");
        updated.title = "new".to_string();
        store.replace_content(&ContentId::from("1"), updated).unwrap();

        let snap = store.snapshot();
        assert_eq!(snap.items[0].id, ContentId::from("1"));
        assert_eq!(snap.items[0].title, "new");
        assert_eq!(snap.items[0].category_name, "B");
        assert!(store.get_content(&ContentId::from("ignored")).is_none());
    }

    #[test]
    fn test_replace_content_rejects_unknown_category_without_change() {
        let store = CatalogStore::new();
        store.insert_category("A").unwrap();
        store.insert_content(item("1", "A")).unwrap();
        let before = store.snapshot();

        assert_eq!(
            store.replace_content(&ContentId::from("1"), item("1", "NEW")),
            Err(DomainError::UnknownCategory("NEW".into()))
        );
        assert_eq!(
            store.replace_content(&ContentId::from("2"), item("2", "A")),
            Err(DomainError::UnknownContent("2".into()))
        );
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_with_seed_validates() {
        let seed = CatalogSnapshot {
            revision: 7,
            categories: vec![Category::new("A")],
            items: vec![item("1", "A")],
        };
        let store = CatalogStore::with_seed(seed.clone()).unwrap();
        assert_eq!(store.snapshot(), seed);

        let orphan = CatalogSnapshot {
            revision: 0,
            categories: vec![Category::new("A")],
            items: vec![item("1", "B")],
        };
        assert_eq!(
            CatalogStore::with_seed(orphan).unwrap_err(),
            DomainError::UnknownCategory("B".into())
        );

        let dup = CatalogSnapshot {
            revision: 0,
            categories: vec![Category::new("A"), Category::new("A")],
            items: vec![],
        };
        assert!(matches!(
            CatalogStore::with_seed(dup),
            Err(DomainError::DuplicateCategory(_))
        ));
    }

    #[test]
    fn test_with_seed_normalizes_names() {
        let seed = CatalogSnapshot {
            revision: 0,
            categories: vec![Category::new(" MAIS  VENDIDOS ")],
            items: vec![item("1", "MAIS   VENDIDOS")],
        };
        let store = CatalogStore::with_seed(seed).unwrap();
        assert_eq!(store.snapshot().category_names(), vec!["MAIS VENDIDOS"]);
        assert_eq!(
            store.get_content(&ContentId::from("1")).unwrap().category_name,
            "MAIS VENDIDOS"
        );

        assert_eq!(store.remove_category("MAIS VENDIDOS").unwrap().len(), 1);
        assert!(store.snapshot().categories.is_empty());
    }

    #[test]
    fn test_with_seed_rejects_blank_and_colliding_names() {
        let blank = CatalogSnapshot {
            revision: 0,
            categories: vec![Category::new("A"), Category::new(" ")],
            items: vec![],
        };
        assert!(matches!(
            CatalogStore::with_seed(blank),
            Err(DomainError::InvalidInput { field: "name", .. })
        ));

        let colliding = CatalogSnapshot {
            revision: 0,
            categories: vec![Category::new("A  B"), Category::new("A B")],
            items: vec![],
        };
        assert_eq!(
            CatalogStore::with_seed(colliding).unwrap_err(),
            DomainError::DuplicateCategory("A B".into())
        );
    }

    #[test]
    fn test_events_follow_revisions() {
        let store = CatalogStore::new();
        let mut rx = store.subscribe();
        store.insert_category("A").unwrap();
        store.insert_content(item("1", "A")).unwrap();
        store.remove_category("A").unwrap();
        // Rejected calls emit nothing.
        let _ = store.remove_category("A");

        assert_eq!(
            rx.try_recv().unwrap(),
            CatalogEvent {
                revision: 1,
                change: CatalogChange::CategoryAdded { name: "A".into() }
            }
        );
        assert_eq!(rx.try_recv().unwrap().revision, 2);
        assert_eq!(
            rx.try_recv().unwrap().change,
            CatalogChange::CategoryRemoved {
                name: "A".into(),
                removed_items: vec![ContentId::from("1")]
            }
        );
        assert!(rx.try_recv().is_err());
    }
}
