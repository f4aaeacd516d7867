use anyhow::Result;
use sqlx::SqlitePool;

/// Create tables read by search and the file store / 创建数据表
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS user (
            id TEXT PRIMARY KEY,
            username TEXT NOT NULL UNIQUE,
            display_name TEXT NOT NULL DEFAULT '',
            rank INTEGER NOT NULL DEFAULT 0,
            avatar TEXT NOT NULL DEFAULT '',
            website TEXT NOT NULL DEFAULT '',
            location TEXT NOT NULL DEFAULT '',
            ip_info TEXT NOT NULL DEFAULT '',
            status INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS question (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            title TEXT NOT NULL DEFAULT '',
            original_text TEXT NOT NULL DEFAULT '',
            parsed_text TEXT NOT NULL DEFAULT '',
            status INTEGER NOT NULL DEFAULT 1,
            view_count INTEGER NOT NULL DEFAULT 0,
            vote_count INTEGER NOT NULL DEFAULT 0,
            answer_count INTEGER NOT NULL DEFAULT 0,
            accepted_answer_id TEXT NOT NULL DEFAULT '0',
            last_answer_id TEXT NOT NULL DEFAULT '0',
            post_update_time TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS answer (
            id TEXT PRIMARY KEY,
            question_id TEXT NOT NULL,
            user_id TEXT NOT NULL,
            original_text TEXT NOT NULL DEFAULT '',
            parsed_text TEXT NOT NULL DEFAULT '',
            status INTEGER NOT NULL DEFAULT 1,
            adopted INTEGER NOT NULL DEFAULT 1,
            vote_count INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS tag (
            id TEXT PRIMARY KEY,
            slug_name TEXT NOT NULL UNIQUE,
            display_name TEXT NOT NULL DEFAULT '',
            main_tag_slug_name TEXT NOT NULL DEFAULT '',
            status INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS tag_rel (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            object_id TEXT NOT NULL,
            tag_id TEXT NOT NULL,
            status INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL,
            UNIQUE(object_id, tag_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS file (
            id TEXT PRIMARY KEY,
            file_name TEXT NOT NULL,
            mime_type TEXT NOT NULL DEFAULT '',
            size INTEGER NOT NULL DEFAULT 0,
            content BLOB NOT NULL,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // 索引
    for stmt in [
        "CREATE INDEX IF NOT EXISTS idx_question_user ON question(user_id)",
        "CREATE INDEX IF NOT EXISTS idx_answer_question ON answer(question_id)",
        "CREATE INDEX IF NOT EXISTS idx_answer_user ON answer(user_id)",
        "CREATE INDEX IF NOT EXISTS idx_tag_rel_tag ON tag_rel(tag_id)",
    ] {
        sqlx::query(stmt).execute(pool).await?;
    }

    tracing::info!("Database schema ready");
    Ok(())
}
