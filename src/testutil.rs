//! Test fixtures: in-memory database and row seeding / 测试辅助

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use crate::models::{
    ANSWER_ADOPTED_FAILED, ANSWER_STATUS_AVAILABLE, NO_ACCEPTED_ANSWER, QUESTION_STATUS_AVAILABLE,
};
use crate::search::{ObjectIdCodec, ObjectType};

/// Single-connection pool, every connection of `sqlite::memory:` is a new database
pub async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    crate::db::run_migrations(&pool).await.unwrap();
    pool
}

pub fn question_id(seq: u64) -> String {
    ObjectIdCodec::encode(ObjectType::Question, seq)
}

pub fn answer_id(seq: u64) -> String {
    ObjectIdCodec::encode(ObjectType::Answer, seq)
}

pub async fn insert_user(pool: &SqlitePool, id: &str, username: &str) {
    let mut display_name: String = username.chars().take(1).flat_map(char::to_uppercase).collect();
    display_name.push_str(username.get(1..).unwrap_or(""));
    sqlx::query(
        "INSERT INTO user (id, username, display_name, rank, created_at) VALUES (?, ?, ?, 1, '2024-01-01 00:00:00')",
    )
    .bind(id)
    .bind(username)
    .bind(display_name)
    .execute(pool)
    .await
    .unwrap();
}

pub struct QuestionSeed {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub text: String,
    pub vote_count: i64,
    pub answer_count: i64,
    pub accepted_answer_id: String,
    pub status: i64,
    pub created_at: String,
    pub post_update_time: String,
}

impl QuestionSeed {
    pub fn new(seq: u64, title: &str, text: &str) -> Self {
        Self {
            id: question_id(seq),
            user_id: "u1".to_string(),
            title: title.to_string(),
            text: text.to_string(),
            vote_count: 0,
            answer_count: 0,
            accepted_answer_id: NO_ACCEPTED_ANSWER.to_string(),
            status: QUESTION_STATUS_AVAILABLE,
            created_at: "2024-01-01 10:00:00".to_string(),
            post_update_time: "2024-01-01 10:00:00".to_string(),
        }
    }

    pub fn user(mut self, user_id: &str) -> Self {
        self.user_id = user_id.to_string();
        self
    }

    pub fn votes(mut self, n: i64) -> Self {
        self.vote_count = n;
        self
    }

    pub fn answers(mut self, n: i64) -> Self {
        self.answer_count = n;
        self
    }

    pub fn accepted(mut self, answer_id: &str) -> Self {
        self.accepted_answer_id = answer_id.to_string();
        self
    }

    pub fn status(mut self, status: i64) -> Self {
        self.status = status;
        self
    }

    pub fn created(mut self, at: &str) -> Self {
        self.created_at = at.to_string();
        self
    }

    pub fn active(mut self, at: &str) -> Self {
        self.post_update_time = at.to_string();
        self
    }

    pub async fn insert(&self, pool: &SqlitePool) {
        sqlx::query(
            r#"
            INSERT INTO question (id, user_id, title, original_text, status, vote_count, answer_count,
                accepted_answer_id, post_update_time, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&self.id)
        .bind(&self.user_id)
        .bind(&self.title)
        .bind(&self.text)
        .bind(self.status)
        .bind(self.vote_count)
        .bind(self.answer_count)
        .bind(&self.accepted_answer_id)
        .bind(&self.post_update_time)
        .bind(&self.created_at)
        .bind(&self.created_at)
        .execute(pool)
        .await
        .unwrap();
    }
}

pub struct AnswerSeed {
    pub id: String,
    pub question_id: String,
    pub user_id: String,
    pub text: String,
    pub vote_count: i64,
    pub adopted: i64,
    pub status: i64,
    pub created_at: String,
}

impl AnswerSeed {
    pub fn new(seq: u64, question_id: &str, text: &str) -> Self {
        Self {
            id: answer_id(seq),
            question_id: question_id.to_string(),
            user_id: "u1".to_string(),
            text: text.to_string(),
            vote_count: 0,
            adopted: ANSWER_ADOPTED_FAILED,
            status: ANSWER_STATUS_AVAILABLE,
            created_at: "2024-01-02 10:00:00".to_string(),
        }
    }

    pub fn user(mut self, user_id: &str) -> Self {
        self.user_id = user_id.to_string();
        self
    }

    pub fn votes(mut self, n: i64) -> Self {
        self.vote_count = n;
        self
    }

    pub fn adopted(mut self, flag: i64) -> Self {
        self.adopted = flag;
        self
    }

    pub fn status(mut self, status: i64) -> Self {
        self.status = status;
        self
    }

    pub fn created(mut self, at: &str) -> Self {
        self.created_at = at.to_string();
        self
    }

    pub async fn insert(&self, pool: &SqlitePool) {
        sqlx::query(
            r#"
            INSERT INTO answer (id, question_id, user_id, original_text, status, adopted, vote_count,
                created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&self.id)
        .bind(&self.question_id)
        .bind(&self.user_id)
        .bind(&self.text)
        .bind(self.status)
        .bind(self.adopted)
        .bind(self.vote_count)
        .bind(&self.created_at)
        .bind(&self.created_at)
        .execute(pool)
        .await
        .unwrap();
    }
}

pub async fn insert_tag(pool: &SqlitePool, id: &str, slug_name: &str, display_name: &str) {
    sqlx::query(
        "INSERT INTO tag (id, slug_name, display_name, created_at) VALUES (?, ?, ?, '2024-01-01 00:00:00')",
    )
    .bind(id)
    .bind(slug_name)
    .bind(display_name)
    .execute(pool)
    .await
    .unwrap();
}

pub async fn bind_tag(pool: &SqlitePool, object_id: &str, tag_id: &str, status: i64) {
    sqlx::query(
        "INSERT INTO tag_rel (object_id, tag_id, status, created_at) VALUES (?, ?, ?, '2024-01-01 00:00:00')",
    )
    .bind(object_id)
    .bind(tag_id)
    .bind(status)
    .execute(pool)
    .await
    .unwrap();
}
