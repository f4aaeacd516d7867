use sqlx::SqlitePool;
use std::sync::Arc;

use crate::config::SearchConfig;
use crate::file_store::FileRepo;
use crate::search::{ObjectIdCodec, SearchRepo, SqliteUserLookup};

/// Shared handler state / 共享状态
pub struct AppState {
    pub db: SqlitePool,
    pub search: SearchRepo,
    pub files: FileRepo,
    pub search_config: SearchConfig,
}

impl AppState {
    pub fn new(db: SqlitePool, search_config: SearchConfig) -> Self {
        let users = Arc::new(SqliteUserLookup::new(db.clone()));
        Self {
            search: SearchRepo::new(db.clone(), users, Arc::new(ObjectIdCodec)),
            files: FileRepo::new(db.clone()),
            db,
            search_config,
        }
    }
}
