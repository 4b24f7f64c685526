//! JSON encoding of whole collections on top of a [`KeyValueStore`].
//!
//! Unparsable values are treated as absent rather than as errors.

use log::{debug, warn};
use serde::{de::DeserializeOwned, Serialize};

use crate::error::{AppError, Result};
use crate::traits::KeyValueStore;

/// Key holding the single active session.
pub const SESSION_KEY: &str = "ticketapp_session";
/// Key holding the array of registered users.
pub const USERS_KEY: &str = "ticketapp_users";
/// Key holding the array of tickets.
pub const TICKETS_KEY: &str = "ticketapp_tickets";

pub(crate) fn load<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>> {
    let Some(raw) = store.get(key)? else {
        debug!("\"{key}\" is empty");
        return Ok(None);
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            warn!("ignoring unparsable value under \"{key}\": {e}");
            Ok(None)
        }
    }
}

/// Loads a JSON array record by record. Records that no longer match `T`
/// are skipped with a warning; the rest are kept.
pub(crate) fn load_all<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Result<Vec<T>> {
    let Some(records) = load::<Vec<serde_json::Value>>(store, key)? else {
        return Ok(Vec::new());
    };

    let records = records
        .into_iter()
        .enumerate()
        .filter_map(|(i, record)| match serde_json::from_value(record) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("skipping record {i} under \"{key}\": {e}");
                None
            }
        })
        .collect();

    Ok(records)
}

pub(crate) fn save<T: Serialize + ?Sized>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<()> {
    let json = serde_json::to_string(value)
        .map_err(|e| AppError::Internal(format!("couldn't encode \"{key}\": {e}")))?;

    store.set(key, &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::traits::MockKeyValueStore;

    #[test]
    fn missing_key_loads_as_empty() {
        let store = MemoryStore::new();
        let values: Vec<u32> = load_all(&store, "nothing").unwrap();
        assert!(values.is_empty());
    }

    #[test]
    fn garbage_loads_as_empty() {
        let store = MemoryStore::new();
        store.set(USERS_KEY, "{not json").unwrap();

        let values: Vec<u32> = load_all(&store, USERS_KEY).unwrap();
        assert!(values.is_empty());
    }

    #[test]
    fn bad_records_are_skipped_not_the_whole_array() {
        let store = MemoryStore::new();
        store.set(USERS_KEY, r#"[1, "two", 3, {"four": 4}]"#).unwrap();

        let values: Vec<u32> = load_all(&store, USERS_KEY).unwrap();
        assert_eq!(values, [1, 3]);
    }

    #[test]
    fn non_array_json_loads_as_empty() {
        let store = MemoryStore::new();
        store.set(USERS_KEY, r#"{"users": []}"#).unwrap();

        let values: Vec<u32> = load_all(&store, USERS_KEY).unwrap();
        assert!(values.is_empty());
    }

    #[test]
    fn substrate_failures_propagate() {
        let mut store = MockKeyValueStore::new();
        store
            .expect_get()
            .returning(|_| Err(AppError::Internal("disk on fire".into())));

        let err = load_all::<u32>(&store, TICKETS_KEY).unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[test]
    fn save_writes_compact_json() {
        let store = MemoryStore::new();
        save(&store, "numbers", &[1, 2, 3]).unwrap();
        assert_eq!(store.get("numbers").unwrap().as_deref(), Some("[1,2,3]"));
    }
}
