//! Error types / 错误类型

use thiserror::Error;

/// Search failures / 搜索错误
#[derive(Debug, Error)]
pub enum SearchError {
    /// Page is 1-based and size must be positive / 页码从1开始，每页数量必须为正
    #[error("invalid pagination: page={page}, size={size}")]
    InvalidPagination { page: i64, size: i64 },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Identifier does not decode to an object type / 对象ID无法解析
    #[error("object not found: {0}")]
    ObjectId(String),
}

impl SearchError {
    pub fn is_client_error(&self) -> bool {
        matches!(self, SearchError::InvalidPagination { .. })
    }
}

/// File store failures / 文件存储错误
#[derive(Debug, Error)]
pub enum FileError {
    #[error("file not found: {0}")]
    NotFound(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
