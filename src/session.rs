use std::cell::RefCell;
use std::collections::HashMap;

pub const INTRO_PLAYED_KEY: &str = "introPlayed";

/// Session-scoped key/value capability. Browser builds back this with
/// `sessionStorage`; tests use [`MemorySessionStore`].
pub trait SessionStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str);
}

impl<S: SessionStore + ?Sized> SessionStore for &S {
    fn get_item(&self, key: &str) -> Option<String> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) {
        (**self).set_item(key, value);
    }
}

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    items: RefCell<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ends the session.
    pub fn clear(&self) {
        self.items.borrow_mut().clear();
    }
}

impl SessionStore for MemorySessionStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }
}

/// One-shot "intro played" marker for the current session.
pub struct IntroPlayedFlag<S> {
    store: S,
}

impl<S: SessionStore> IntroPlayedFlag<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Any non-empty stored value counts as played.
    pub fn is_set(&self) -> bool {
        self.store
            .get_item(INTRO_PLAYED_KEY)
            .is_some_and(|value| !value.is_empty())
    }

    pub fn set(&self) {
        self.store.set_item(INTRO_PLAYED_KEY, "true");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_is_unset_in_a_fresh_session() {
        let store = MemorySessionStore::new();
        assert!(!IntroPlayedFlag::new(&store).is_set());
    }

    #[test]
    fn setting_the_flag_persists_for_the_session() {
        let store = MemorySessionStore::new();
        IntroPlayedFlag::new(&store).set();

        assert_eq!(store.get_item(INTRO_PLAYED_KEY).as_deref(), Some("true"));
        assert!(IntroPlayedFlag::new(&store).is_set());
    }

    #[test]
    fn empty_value_does_not_count_as_played() {
        let store = MemorySessionStore::new();
        store.set_item(INTRO_PLAYED_KEY, "");
        assert!(!IntroPlayedFlag::new(&store).is_set());
    }

    #[test]
    fn ending_the_session_resets_the_flag() {
        let store = MemorySessionStore::new();
        IntroPlayedFlag::new(&store).set();
        store.clear();
        assert!(!IntroPlayedFlag::new(&store).is_set());
    }
}
