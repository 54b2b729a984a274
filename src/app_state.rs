//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use crate::{
    Error,
    store::{JsonStore, Ledger},
};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,

    /// The ledger shared between request handlers.
    pub ledger: Arc<Mutex<Ledger>>,

    /// The store that persists the ledger.
    pub store: JsonStore,
}

impl AppState {
    /// Create a new [AppState] by loading the ledger from `store`.
    ///
    /// The ledger is read exactly once, before the server starts taking
    /// requests. `local_timezone` should be a valid, canonical timezone name,
    /// e.g. "Pacific/Auckland".
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::MalformedLedger] if the ledger file exists but cannot be parsed,
    /// - or [Error::LedgerIoError] if the ledger file cannot be read.
    pub fn new(store: JsonStore, local_timezone: &str) -> Result<Self, Error> {
        let ledger = store.load()?;

        Ok(Self {
            local_timezone: local_timezone.to_owned(),
            ledger: Arc::new(Mutex::new(ledger)),
            store,
        })
    }
}

#[cfg(test)]
mod app_state_tests {
    use std::fs;

    use tempfile::TempDir;

    use crate::{Error, store::JsonStore};

    use super::AppState;

    #[test]
    fn new_loads_ledger_before_serving() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonStore::new(temp_dir.path().join("outlay.json"));
        fs::write(
            store.path(),
            r#"{"theme": "light", "expenses": [{"id": 1, "amount": 9.5, "category": "Food", "date": "2024-01-05", "note": ""}]}"#,
        )
        .unwrap();

        let state = AppState::new(store, "Etc/UTC").expect("state should load");

        let ledger = state.ledger.lock().unwrap();
        assert_eq!(ledger.expenses.len(), 1);
        assert_eq!(ledger.expenses[0].amount, 9.5);
    }

    #[test]
    fn new_fails_on_malformed_ledger() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonStore::new(temp_dir.path().join("outlay.json"));
        fs::write(store.path(), "{not json").unwrap();

        let result = AppState::new(store, "Etc/UTC");

        assert!(matches!(result, Err(Error::MalformedLedger(_))));
    }
}
