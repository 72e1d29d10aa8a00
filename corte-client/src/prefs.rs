//! Persisted query preferences
//!
//! The collection screen keeps its date-range/stage filter across
//! navigations, but only briefly: stored values older than five minutes are
//! thrown away and the filter resets to its defaults. Storage is a trait so
//! hosts can back it with whatever durable key-value store they have.

use std::collections::HashMap;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

const STALE_AFTER_MINUTES: i64 = 5;

/// How long stored preferences stay valid.
pub fn stale_after() -> Duration {
    Duration::minutes(STALE_AFTER_MINUTES)
}

/// Default stage filter.
pub const DEFAULT_STAGE: &str = "FILA";

const KEY_START: &str = "dataInicio";
const KEY_END: &str = "dataFim";
const KEY_STAGE: &str = "etapa";
const KEY_SAVED_AT: &str = "datasTimestamp";

/// Durable string key-value storage for preferences.
pub trait PrefsStore {
    /// Reads a value.
    fn get(&self, key: &str) -> Option<String>;

    /// Writes a value.
    fn set(&mut self, key: &str, value: &str);
}

/// An in-memory [`PrefsStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PrefsStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

/// The collection screen's filter: date range and production stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPrefs {
    /// Range start, minute precision (`YYYY-MM-DDTHH:MM`), if set.
    pub start: Option<String>,
    /// Range end, minute precision.
    pub end: String,
    /// Production stage.
    pub stage: String,
}

impl QueryPrefs {
    /// Default filter: no start, end three hours before `now`, stage
    /// `FILA`.
    pub fn defaults(now: DateTime<Utc>) -> Self {
        Self {
            start: None,
            end: (now - Duration::hours(3)).format("%Y-%m-%dT%H:%M").to_string(),
            stage: DEFAULT_STAGE.to_string(),
        }
    }

    /// Builds the query parameters for the collection endpoint.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(start) = &self.start {
            query.push(("data_inicio".to_string(), start.clone()));
        }
        query.push(("data_fim".to_string(), self.end.clone()));
        query.push(("etapa".to_string(), self.stage.clone()));
        query
    }

    /// Restores preferences from a store.
    ///
    /// Stored values win only while fresh; past [`stale_after`] (or when no
    /// timestamp exists) the defaults come back and the staleness clock
    /// restarts.
    pub fn restore(store: &mut dyn PrefsStore, now: DateTime<Utc>) -> Self {
        let fresh = store
            .get(KEY_SAVED_AT)
            .and_then(|raw| raw.parse::<i64>().ok())
            .and_then(|millis| DateTime::<Utc>::from_timestamp_millis(millis))
            .is_some_and(|saved_at| now - saved_at <= stale_after());

        if !fresh {
            store.set(KEY_SAVED_AT, &now.timestamp_millis().to_string());
            return Self::defaults(now);
        }

        let mut prefs = Self::defaults(now);
        prefs.start = store.get(KEY_START).filter(|s| !s.is_empty());
        if let Some(end) = store.get(KEY_END).filter(|s| !s.is_empty()) {
            prefs.end = end;
        }
        if let Some(stage) = store.get(KEY_STAGE).filter(|s| !s.is_empty()) {
            prefs.stage = stage;
        }
        prefs
    }

    /// Saves preferences and refreshes the staleness clock.
    pub fn save(&self, store: &mut dyn PrefsStore, now: DateTime<Utc>) {
        store.set(KEY_START, self.start.as_deref().unwrap_or(""));
        store.set(KEY_END, &self.end);
        store.set(KEY_STAGE, &self.stage);
        store.set(KEY_SAVED_AT, &now.timestamp_millis().to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn test_defaults() {
        let prefs = QueryPrefs::defaults(at("2025-03-10T12:00:00Z"));
        assert_eq!(prefs.start, None);
        assert_eq!(prefs.end, "2025-03-10T09:00");
        assert_eq!(prefs.stage, "FILA");
    }

    #[test]
    fn test_restore_fresh_values() {
        let mut store = MemoryStore::new();
        let saved = at("2025-03-10T12:00:00Z");
        let prefs = QueryPrefs {
            start: Some("2025-03-09T06:00".to_string()),
            end: "2025-03-10T11:30".to_string(),
            stage: "CORTE".to_string(),
        };
        prefs.save(&mut store, saved);

        let restored = QueryPrefs::restore(&mut store, saved + Duration::minutes(4));
        assert_eq!(restored, prefs);
    }

    #[test]
    fn test_restore_stale_resets() {
        let mut store = MemoryStore::new();
        let saved = at("2025-03-10T12:00:00Z");
        QueryPrefs {
            start: None,
            end: "2025-03-10T11:30".to_string(),
            stage: "CORTE".to_string(),
        }
        .save(&mut store, saved);

        let later = saved + Duration::minutes(6);
        let restored = QueryPrefs::restore(&mut store, later);
        assert_eq!(restored, QueryPrefs::defaults(later));
        // The staleness clock restarted, so an immediate second restore is
        // fresh again.
        let again = QueryPrefs::restore(&mut store, later + Duration::minutes(1));
        assert_eq!(again.stage, "FILA");
    }

    #[test]
    fn test_restore_without_history() {
        let mut store = MemoryStore::new();
        let now = at("2025-03-10T12:00:00Z");
        assert_eq!(QueryPrefs::restore(&mut store, now), QueryPrefs::defaults(now));
    }

    #[test]
    fn test_query_parameters() {
        let prefs = QueryPrefs {
            start: Some("2025-03-09T06:00".to_string()),
            end: "2025-03-10T11:30".to_string(),
            stage: "FILA".to_string(),
        };
        let query = prefs.to_query();
        assert_eq!(query.len(), 3);
        assert_eq!(query[0], ("data_inicio".to_string(), "2025-03-09T06:00".to_string()));
        assert_eq!(query[2].1, "FILA");
    }
}
