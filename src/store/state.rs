use crate::error::StoreError;
use crate::models::Entity;

/// Everything a view renders from: collection, selection and status flags
#[derive(Debug, Clone, PartialEq)]
pub struct StoreState<E> {
    pub items: Vec<E>,
    pub selected: Option<E>,
    pub is_loading: bool,
    pub error: Option<StoreError>,
    /// Running on local sample data after a connectivity failure
    pub is_offline: bool,
}

impl<E> Default for StoreState<E> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            selected: None,
            is_loading: false,
            error: None,
            is_offline: false,
        }
    }
}

impl<E: Entity> StoreState<E> {
    pub fn find(&self, id: &str) -> Option<&E> {
        self.items.iter().find(|e| e.id() == id)
    }

    /// Collection first, then the selected slot
    pub fn lookup(&self, id: &str) -> Option<&E> {
        self.find(id)
            .or_else(|| self.selected.as_ref().filter(|e| e.id() == id))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.lookup(id).is_some()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.as_ref().map(|e| e.id() == id).unwrap_or(false)
    }

    /// Swap in `entity` wherever `id` is held
    pub(crate) fn replace(&mut self, id: &str, entity: &E) {
        for item in self.items.iter_mut().filter(|e| e.id() == id) {
            *item = entity.clone();
        }
        if self.is_selected(id) {
            self.selected = Some(entity.clone());
        }
    }

    /// Overlay `patch` wherever `id` is held
    pub(crate) fn merge(&mut self, id: &str, patch: &E::Patch) {
        for item in self.items.iter_mut().filter(|e| e.id() == id) {
            item.apply_patch(patch);
        }
        if let Some(selected) = self.selected.as_mut().filter(|e| e.id() == id) {
            selected.apply_patch(patch);
        }
    }

    /// Drop one matching entity and clear the selection if it pointed at it
    pub(crate) fn remove(&mut self, id: &str) -> Option<E> {
        let removed = self
            .items
            .iter()
            .position(|e| e.id() == id)
            .map(|index| self.items.remove(index));

        if self.is_selected(id) {
            self.selected = None;
        }

        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Group, GroupDraft, GroupPatch, MemberInfo};
    use chrono::Utc;

    fn group(id: &str, name: &str) -> Group {
        Group::synthesize(
            GroupDraft::new(name),
            id.to_string(),
            Utc::now(),
            &MemberInfo::placeholder(),
        )
    }

    fn state() -> StoreState<Group> {
        StoreState {
            items: vec![group("1", "Morning HIIT"), group("2", "Yoga"), group("3", "Running")],
            selected: Some(group("2", "Yoga")),
            ..Default::default()
        }
    }

    #[test]
    fn test_remove_only_touches_the_match() {
        let mut state = state();
        let before = state.items.clone();

        let removed = state.remove("2");

        assert_eq!(removed.map(|g| g.id), Some("2".to_string()));
        assert_eq!(state.items, vec![before[0].clone(), before[2].clone()]);
        assert!(state.selected.is_none());
    }

    #[test]
    fn test_remove_missing_id_is_noop() {
        let mut state = state();
        assert!(state.remove("9").is_none());
        assert_eq!(state.items.len(), 3);
        assert!(state.selected.is_some());
    }

    #[test]
    fn test_merge_updates_collection_and_selection() {
        let mut state = state();
        state.merge(
            "2",
            &GroupPatch {
                description: Some("Stretch and breathe".to_string()),
                ..Default::default()
            },
        );

        assert_eq!(state.items[1].description.as_deref(), Some("Stretch and breathe"));
        assert_eq!(
            state.selected.as_ref().and_then(|g| g.description.as_deref()),
            Some("Stretch and breathe")
        );
        assert_eq!(state.items[0].description.as_deref(), Some(""));
    }

    #[test]
    fn test_lookup_falls_back_to_selection() {
        let mut state = state();
        state.items.remove(1);
        assert!(state.find("2").is_none());
        assert!(state.lookup("2").is_some());
    }
}
