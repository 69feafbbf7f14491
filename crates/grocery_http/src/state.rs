use std::path::PathBuf;
use std::sync::Arc;

/// Shared handler state: where the product database lives.
#[derive(Debug, Clone)]
pub struct AppState {
    db_path: Arc<PathBuf>,
}

impl AppState {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: Arc::new(db_path.into()),
        }
    }

    pub fn db_path(&self) -> Arc<PathBuf> {
        Arc::clone(&self.db_path)
    }
}
