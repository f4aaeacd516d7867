//! Blob file store / 文件存储
//!
//! Whole files are kept in a single row; there is no chunking.

use sqlx::SqlitePool;

use crate::error::FileError;
use crate::models::FileBlob;

#[derive(Clone)]
pub struct FileRepo {
    db: SqlitePool,
}

impl FileRepo {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Insert a blob / 保存文件
    pub async fn save(&self, file: &FileBlob) -> Result<(), FileError> {
        sqlx::query(
            "INSERT INTO file (id, file_name, mime_type, size, content, created_at) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&file.id)
        .bind(&file.file_name)
        .bind(&file.mime_type)
        .bind(file.size)
        .bind(&file.content)
        .bind(&file.created_at)
        .execute(&self.db)
        .await?;

        tracing::debug!("File saved: {} ({} bytes)", file.id, file.size);
        Ok(())
    }

    /// Fetch a blob by id / 按ID获取文件
    pub async fn get_by_id(&self, id: &str) -> Result<FileBlob, FileError> {
        sqlx::query_as::<_, FileBlob>(
            "SELECT id, file_name, mime_type, size, content, created_at FROM file WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| FileError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil;

    #[tokio::test]
    async fn test_save_and_get() {
        let pool = testutil::memory_pool().await;
        let repo = FileRepo::new(pool);

        let blob = FileBlob::new("notes.txt", None, b"hello blob".to_vec());
        repo.save(&blob).await.unwrap();

        let got = repo.get_by_id(&blob.id).await.unwrap();
        assert_eq!(got.file_name, "notes.txt");
        assert_eq!(got.mime_type, "text/plain");
        assert_eq!(got.size, 10);
        assert_eq!(got.content, b"hello blob");
    }

    #[tokio::test]
    async fn test_get_missing() {
        let pool = testutil::memory_pool().await;
        let repo = FileRepo::new(pool);
        let err = repo.get_by_id("nope").await.unwrap_err();
        assert!(matches!(err, FileError::NotFound(id) if id == "nope"));
    }

    #[tokio::test]
    async fn test_duplicate_id_is_database_error() {
        let pool = testutil::memory_pool().await;
        let repo = FileRepo::new(pool);
        let blob = FileBlob::new("a.bin", Some("application/octet-stream"), vec![1]);
        repo.save(&blob).await.unwrap();
        assert!(matches!(repo.save(&blob).await, Err(FileError::Database(_))));
    }
}
