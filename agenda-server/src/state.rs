use crate::storage::Storage;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub storage: Storage,
}
