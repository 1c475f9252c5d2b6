use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Organization, OrganizationPatch};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct OrganizationState {
    organizations: Vec<Organization>,
    current_id: Option<Uuid>,
}

/// Holds the organization list and the current selection.
///
/// The selection is client-only state with no server representation; every
/// organization-scoped query carries its id. The list-edit operations mirror
/// an already-confirmed backend mutation and are only invoked from mutation
/// success paths, never speculatively.
#[derive(Debug)]
pub struct OrganizationStore {
    state: RwLock<OrganizationState>,
    path: Option<PathBuf>,
}

impl OrganizationStore {
    pub fn new(path: Option<PathBuf>) -> Self {
        let state = match &path {
            Some(p) => super::load_or_default(p),
            None => OrganizationState::default(),
        };
        Self {
            state: RwLock::new(state),
            path,
        }
    }

    pub fn in_memory() -> Self {
        Self::new(None)
    }

    /// Replace the full list. A selection that no longer appears is cleared.
    pub fn set_organizations(&self, organizations: Vec<Organization>) {
        {
            let mut state = self.state.write().expect("organization store lock poisoned");
            if let Some(current) = state.current_id {
                if !organizations.iter().any(|o| o.id == current) {
                    state.current_id = None;
                }
            }
            state.organizations = organizations;
        }
        self.persist();
    }

    /// Select an organization by id. Returns false when the id is not in the
    /// list, leaving the selection unchanged.
    pub fn set_current(&self, id: Uuid) -> bool {
        let selected = {
            let mut state = self.state.write().expect("organization store lock poisoned");
            if state.organizations.iter().any(|o| o.id == id) {
                state.current_id = Some(id);
                true
            } else {
                false
            }
        };
        if selected {
            self.persist();
        }
        selected
    }

    pub fn add_organization(&self, org: Organization) {
        {
            let mut state = self.state.write().expect("organization store lock poisoned");
            state.organizations.push(org);
        }
        self.persist();
    }

    pub fn update_organization(&self, id: Uuid, patch: &OrganizationPatch) {
        {
            let mut state = self.state.write().expect("organization store lock poisoned");
            if let Some(org) = state.organizations.iter_mut().find(|o| o.id == id) {
                patch.apply(org);
            }
        }
        self.persist();
    }

    /// Remove an organization. Deleting the current one clears the selection.
    pub fn delete_organization(&self, id: Uuid) {
        {
            let mut state = self.state.write().expect("organization store lock poisoned");
            state.organizations.retain(|o| o.id != id);
            if state.current_id == Some(id) {
                state.current_id = None;
            }
        }
        self.persist();
    }

    pub fn organizations(&self) -> Vec<Organization> {
        self.state
            .read()
            .expect("organization store lock poisoned")
            .organizations
            .clone()
    }

    pub fn current(&self) -> Option<Organization> {
        let state = self.state.read().expect("organization store lock poisoned");
        let current = state.current_id?;
        state.organizations.iter().find(|o| o.id == current).cloned()
    }

    fn persist(&self) {
        if let Some(path) = &self.path {
            let state = self.state.read().expect("organization store lock poisoned");
            super::persist(path, &*state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn org(name: &str) -> Organization {
        Organization {
            id: Uuid::new_v4(),
            name: name.to_string(),
            website: None,
            industry: None,
            size: None,
            owner_id: Uuid::new_v4(),
            created_at: None,
        }
    }

    fn seeded_store() -> (OrganizationStore, Organization, Organization) {
        let store = OrganizationStore::in_memory();
        let acme = org("Acme");
        let globex = org("Globex");
        store.set_organizations(vec![acme.clone(), globex.clone()]);
        (store, acme, globex)
    }

    #[test]
    fn update_on_current_is_reflected_and_idempotent() {
        let (store, acme, _) = seeded_store();
        assert!(store.set_current(acme.id));

        let patch = OrganizationPatch {
            name: Some("Acme Media".to_string()),
            industry: Some("publishing".to_string()),
            ..Default::default()
        };
        store.update_organization(acme.id, &patch);
        let after_first = store.current().unwrap();
        assert_eq!(after_first.name, "Acme Media");
        assert_eq!(after_first.industry.as_deref(), Some("publishing"));

        store.update_organization(acme.id, &patch);
        assert_eq!(store.current().unwrap(), after_first);
    }

    #[test]
    fn patch_leaves_absent_fields_untouched() {
        let (store, acme, _) = seeded_store();
        store.update_organization(
            acme.id,
            &OrganizationPatch {
                website: Some("https://acme.example".to_string()),
                ..Default::default()
            },
        );
        let updated = store
            .organizations()
            .into_iter()
            .find(|o| o.id == acme.id)
            .unwrap();
        assert_eq!(updated.name, "Acme");
        assert_eq!(updated.website.as_deref(), Some("https://acme.example"));
    }

    #[test]
    fn deleting_current_clears_selection() {
        let (store, acme, _) = seeded_store();
        store.set_current(acme.id);

        store.delete_organization(acme.id);
        assert!(store.current().is_none());
        assert_eq!(store.organizations().len(), 1);
    }

    #[test]
    fn deleting_non_current_keeps_selection() {
        let (store, acme, globex) = seeded_store();
        store.set_current(acme.id);

        store.delete_organization(globex.id);
        assert_eq!(store.current().unwrap().id, acme.id);
    }

    #[test]
    fn replacing_list_without_current_clears_selection() {
        let (store, acme, _) = seeded_store();
        store.set_current(acme.id);

        store.set_organizations(vec![org("Initech")]);
        assert!(store.current().is_none());
    }

    #[test]
    fn selecting_unknown_id_is_rejected() {
        let (store, acme, _) = seeded_store();
        store.set_current(acme.id);

        assert!(!store.set_current(Uuid::new_v4()));
        assert_eq!(store.current().unwrap().id, acme.id);
    }

    #[test]
    fn selection_survives_reload() {
        let path = std::env::temp_dir().join(format!("planline-orgs-{}.json", Uuid::new_v4()));
        let acme = org("Acme");
        {
            let store = OrganizationStore::new(Some(path.clone()));
            store.set_organizations(vec![acme.clone()]);
            store.set_current(acme.id);
        }
        let store = OrganizationStore::new(Some(path.clone()));
        assert_eq!(store.current().unwrap().id, acme.id);

        let _ = std::fs::remove_file(&path);
    }
}
