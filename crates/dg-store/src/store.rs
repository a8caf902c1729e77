//! The identity store: list, active pointer, and the explicit
//! save/load boundary.
//!
//! The in-memory model is the source of truth; persistence happens only
//! when the owning host calls [`IdentityStore::save`] (after create,
//! delete, or select). The two storage keys are written independently and
//! are not transactional.

use crate::identity::{Identity, IdentityDraft};
use crate::storage::{KeyValueStorage, StoreError};

/// Storage key for the full identity list (JSON array).
pub const IDENTITIES_KEY: &str = "identities";

/// Storage key for the active identity (single JSON record, absent when
/// none is selected).
pub const SELECTED_IDENTITY_KEY: &str = "selected-identity";

/// The identity store. At most one identity is active at a time.
#[derive(Debug, Clone, Default)]
pub struct IdentityStore {
    identities: Vec<Identity>,
    /// The active identity, held as a full record. Selection does not
    /// validate membership in the list.
    active: Option<Identity>,
}

impl IdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    pub fn list(&self) -> &[Identity] {
        &self.identities
    }

    pub fn active(&self) -> Option<&Identity> {
        self.active.as_ref()
    }

    // ─── Mutation ────────────────────────────────────────────────────────

    /// Create an identity from a draft, assigning an id and creation
    /// timestamp. Required-field validation is the caller's job.
    pub fn create(&mut self, draft: IdentityDraft) -> &Identity {
        self.identities.push(Identity::from_draft(draft));
        self.identities.last().expect("identity just pushed")
    }

    /// Mark an identity as active. The record is stored as given; the
    /// list is not consulted.
    pub fn select(&mut self, identity: Identity) {
        self.active = Some(identity);
    }

    /// Delete an identity by id. If it was active, the active pointer is
    /// cleared. Deleting an unknown id is a no-op.
    pub fn delete(&mut self, id: &str) {
        self.identities.retain(|identity| identity.id != id);
        if self.active.as_ref().is_some_and(|a| a.id == id) {
            self.active = None;
        }
    }

    // ─── Persistence boundary ────────────────────────────────────────────

    /// Serialize both keys to storage. Failures are returned so the host
    /// can observe them; the in-memory state is unaffected either way.
    pub fn save(&self, storage: &mut dyn KeyValueStorage) -> Result<(), StoreError> {
        let list = serde_json::to_string(&self.identities)?;
        storage.set(IDENTITIES_KEY, &list)?;
        match &self.active {
            Some(identity) => {
                let record = serde_json::to_string(identity)?;
                storage.set(SELECTED_IDENTITY_KEY, &record)?;
            }
            None => storage.remove(SELECTED_IDENTITY_KEY)?,
        }
        Ok(())
    }

    /// Reconstruct a store from storage. Absent keys yield empty state;
    /// unreadable or malformed values are logged and treated as absent
    /// rather than propagated.
    pub fn load(storage: &dyn KeyValueStorage) -> Self {
        let identities = match read_key(storage, IDENTITIES_KEY) {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(list) => list,
                Err(e) => {
                    log::warn!("discarding malformed identity list: {e}");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        let active = read_key(storage, SELECTED_IDENTITY_KEY).and_then(|raw| {
            match serde_json::from_str(&raw) {
                Ok(identity) => Some(identity),
                Err(e) => {
                    log::warn!("discarding malformed active identity: {e}");
                    None
                }
            }
        });

        Self { identities, active }
    }
}

fn read_key(storage: &dyn KeyValueStorage, key: &str) -> Option<String> {
    match storage.get(key) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("failed to read {key:?} from storage: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use pretty_assertions::assert_eq;

    fn draft(name: &str) -> IdentityDraft {
        IdentityDraft {
            name: name.into(),
            institution: "Clinic A".into(),
            role: "Therapist".into(),
            ..IdentityDraft::default()
        }
    }

    #[test]
    fn create_then_list() {
        let mut store = IdentityStore::new();
        let id = store.create(draft("Helena")).id.clone();

        assert_eq!(store.list().len(), 1);
        assert_eq!(store.list()[0].id, id);
        assert_eq!(store.list()[0].name, "Helena");
        assert!(!store.list()[0].id.is_empty());
    }

    #[test]
    fn deleting_active_clears_pointer() {
        let mut store = IdentityStore::new();
        let helena = store.create(draft("Helena")).clone();
        store.create(draft("Marcos"));
        store.select(helena.clone());
        assert_eq!(store.active().map(|a| a.id.as_str()), Some(helena.id.as_str()));

        store.delete(&helena.id);
        assert_eq!(store.active(), None);
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn deleting_non_active_keeps_pointer() {
        let mut store = IdentityStore::new();
        let helena = store.create(draft("Helena")).clone();
        let marcos = store.create(draft("Marcos")).clone();
        store.select(helena.clone());

        store.delete(&marcos.id);
        assert_eq!(store.active().map(|a| a.id.as_str()), Some(helena.id.as_str()));
    }

    #[test]
    fn delete_unknown_id_is_noop() {
        let mut store = IdentityStore::new();
        store.create(draft("Helena"));
        store.delete("does-not-exist");
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn select_does_not_validate_membership() {
        let mut store = IdentityStore::new();
        let mut other = Identity::from_draft(draft("External"));
        other.id = "external-1".into();
        store.select(other);
        assert_eq!(store.active().map(|a| a.id.as_str()), Some("external-1"));
        assert!(store.list().is_empty());
    }

    #[test]
    fn save_load_roundtrip_preserves_records() {
        let mut storage = MemoryStorage::new();
        let mut store = IdentityStore::new();
        let helena = store.create(draft("Helena")).clone();
        store.select(helena.clone());
        store.save(&mut storage).unwrap();

        let loaded = IdentityStore::load(&storage);
        assert_eq!(loaded.list(), store.list());
        assert_eq!(loaded.list()[0].created_at, helena.created_at);
        assert_eq!(loaded.active(), Some(&helena));
    }

    #[test]
    fn save_with_no_active_removes_the_key() {
        let mut storage = MemoryStorage::new();
        let mut store = IdentityStore::new();
        let helena = store.create(draft("Helena")).clone();
        store.select(helena.clone());
        store.save(&mut storage).unwrap();

        store.delete(&helena.id);
        store.save(&mut storage).unwrap();

        assert_eq!(storage.get(SELECTED_IDENTITY_KEY).unwrap(), None);
        let loaded = IdentityStore::load(&storage);
        assert_eq!(loaded.active(), None);
    }

    #[test]
    fn malformed_storage_degrades_to_empty() {
        let mut storage = MemoryStorage::new();
        storage.set(IDENTITIES_KEY, "not json at all").unwrap();
        storage.set(SELECTED_IDENTITY_KEY, "{\"broken\":").unwrap();

        let loaded = IdentityStore::load(&storage);
        assert!(loaded.list().is_empty());
        assert_eq!(loaded.active(), None);
    }

    #[test]
    fn empty_storage_loads_empty_store() {
        let storage = MemoryStorage::new();
        let loaded = IdentityStore::load(&storage);
        assert!(loaded.list().is_empty());
        assert_eq!(loaded.active(), None);
    }
}
