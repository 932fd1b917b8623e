use std::any::Any;
use std::collections::HashMap;
use std::rc::Rc;

use payloads::Role;
use payloads::responses::CurrentUser;
use yewdux::prelude::*;

use crate::realtime::RealtimeChannel;

#[derive(Clone, PartialEq, Default)]
pub enum AuthState {
    #[default]
    Unknown,
    LoggedOut,
    LoggedIn(CurrentUser),
}

#[derive(Default, Clone, PartialEq, Store)]
pub struct State {
    // === Authentication (managed by use_authentication) ===
    pub auth_state: AuthState,

    // === Realtime channel (managed by use_realtime_connection) ===
    pub channel: Option<RealtimeChannel>,

    // === Reads shared between components (managed by use_query) ===
    pub queries: QueryCache,

    /// Running operations that asked for the global loading overlay.
    pub busy: u32,
}

impl State {
    pub fn is_authenticated(&self) -> bool {
        matches!(self.auth_state, AuthState::LoggedIn(_))
    }

    pub fn current_user(&self) -> Option<&CurrentUser> {
        match &self.auth_state {
            AuthState::LoggedIn(user) => Some(user),
            AuthState::Unknown | AuthState::LoggedOut => None,
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.current_user().map(|user| user.role)
    }

    pub fn logout(&mut self) {
        self.auth_state = AuthState::LoggedOut;
        if let Some(channel) = self.channel.take() {
            channel.close();
        }
        // nothing fetched for the last account may leak to the next one
        self.queries = QueryCache::default();
        self.busy = 0;
    }

    pub fn set_busy(&mut self, on: bool) {
        if on {
            self.busy += 1;
        } else {
            self.busy = self.busy.saturating_sub(1);
        }
    }
}

/// One cached read.
#[derive(Clone, Default)]
pub struct QueryEntry {
    value: Option<Rc<dyn Any>>,
    pub error: Option<String>,
    pub in_flight: bool,
    /// A refetch was asked for while a fetch was running; the running
    /// fetch may predate a write, so it is run again once it settles.
    stale: bool,
    /// Bumped on every change so equality stays cheap.
    version: u64,
}

impl PartialEq for QueryEntry {
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version
            && self.in_flight == other.in_flight
            && self.error == other.error
    }
}

impl QueryEntry {
    pub fn value<T: 'static>(&self) -> Option<Rc<T>> {
        self.value.clone()?.downcast::<T>().ok()
    }
}

/// Results of reads keyed by [`payloads::query::QueryKey`], shared by
/// every component that asks for the same key.
#[derive(Clone, Default, PartialEq)]
pub struct QueryCache {
    entries: HashMap<String, QueryEntry>,
    next_version: u64,
}

impl QueryCache {
    pub fn entry(&self, key: &str) -> Option<&QueryEntry> {
        self.entries.get(key)
    }

    pub fn value<T: 'static>(&self, key: &str) -> Option<Rc<T>> {
        self.entry(key)?.value()
    }

    pub fn is_in_flight(&self, key: &str) -> bool {
        self.entry(key).is_some_and(|e| e.in_flight)
    }

    /// Mark `key` as being fetched. Returns false when a fetch for the key
    /// is already running, in which case the caller must not start another;
    /// the running one is repeated when it settles.
    pub fn begin(&mut self, key: &str) -> bool {
        let version = self.bump();
        let entry = self.entries.entry(key.to_string()).or_default();
        if entry.in_flight {
            entry.stale = true;
            return false;
        }
        entry.in_flight = true;
        entry.version = version;
        true
    }

    /// Store a fetched value. The key stays in flight when a refetch was
    /// asked for meanwhile; the fetching task checks [`Self::is_in_flight`]
    /// and goes again.
    pub fn resolve<T: 'static>(&mut self, key: &str, value: T) {
        let version = self.bump();
        let entry = self.entries.entry(key.to_string()).or_default();
        entry.value = Some(Rc::new(value));
        entry.error = None;
        entry.in_flight = std::mem::take(&mut entry.stale);
        entry.version = version;
    }

    /// Record a failed fetch. A value from an earlier fetch is kept.
    pub fn fail(&mut self, key: &str, error: String) {
        let version = self.bump();
        let entry = self.entries.entry(key.to_string()).or_default();
        entry.error = Some(error);
        entry.in_flight = std::mem::take(&mut entry.stale);
        entry.version = version;
    }

    /// Drop what is cached for `key`, so the next reader waits for a fresh
    /// fetch instead of seeing the old value.
    pub fn evict(&mut self, key: &str) {
        if self.entries.get(key).is_some_and(|e| !e.in_flight) {
            self.entries.remove(key);
        }
    }

    fn bump(&mut self) -> u64 {
        self.next_version += 1;
        self.next_version
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_fetch_of_a_key_is_deduplicated() {
        let mut cache = QueryCache::default();
        assert!(cache.begin("employees"));
        assert!(!cache.begin("employees"));
        assert!(cache.begin("clients"));
        cache.resolve("clients", vec![4]);
        assert!(!cache.is_in_flight("clients"));
        assert!(cache.begin("clients"));
    }

    #[test]
    fn refetch_during_a_fetch_runs_it_again() {
        let mut cache = QueryCache::default();
        assert!(cache.begin("departments"));
        // a write lands and the page asks again while the first read runs
        assert!(!cache.begin("departments"));
        cache.resolve("departments", vec!["Ops".to_string()]);
        assert!(cache.is_in_flight("departments"));

        cache.resolve("departments", vec!["Ops".to_string(), "Sales".to_string()]);
        assert!(!cache.is_in_flight("departments"));
        let departments = cache.value::<Vec<String>>("departments").unwrap();
        assert_eq!(departments.len(), 2);
    }

    #[test]
    fn evicted_keys_are_gone_unless_fetching() {
        let mut cache = QueryCache::default();
        cache.resolve("departments/3", 1_u32);
        cache.evict("departments/3");
        assert!(cache.entry("departments/3").is_none());

        cache.begin("departments/4");
        cache.evict("departments/4");
        assert!(cache.is_in_flight("departments/4"));
    }

    #[test]
    fn values_come_back_typed() {
        let mut cache = QueryCache::default();
        cache.resolve("holidays", vec!["New Year".to_string()]);
        let holidays = cache.value::<Vec<String>>("holidays").unwrap();
        assert_eq!(holidays.len(), 1);
        assert!(cache.value::<Vec<i64>>("holidays").is_none());
        assert!(cache.value::<Vec<String>>("events").is_none());
    }

    #[test]
    fn failure_keeps_the_previous_value() {
        let mut cache = QueryCache::default();
        cache.begin("tasks");
        cache.resolve("tasks", 7_u32);
        let before = cache.clone();
        cache.begin("tasks");
        cache.fail("tasks", "Network error".into());
        assert_eq!(cache.value::<u32>("tasks").as_deref(), Some(&7));
        assert_eq!(
            cache.entry("tasks").and_then(|e| e.error.as_deref()),
            Some("Network error")
        );
        assert!(before != cache);
    }

    #[test]
    fn busy_counter_never_underflows() {
        let mut state = State::default();
        state.set_busy(true);
        state.set_busy(false);
        state.set_busy(false);
        assert_eq!(state.busy, 0);
    }
}
