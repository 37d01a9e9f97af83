use axum::extract::FromRef;
use storage::Database;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    /// Page size used when a list request does not pass `limit`
    pub page_size: u32,
}

impl AppState {
    pub fn new(db: Database, page_size: u32) -> Self {
        Self { db, page_size }
    }
}

impl FromRef<AppState> for Database {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}
