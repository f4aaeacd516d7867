use serde::{Deserialize, Serialize};

/// Question status codes / 问题状态
pub const QUESTION_STATUS_AVAILABLE: i64 = 1;
pub const QUESTION_STATUS_CLOSED: i64 = 2;
pub const QUESTION_STATUS_DELETED: i64 = 10;

/// Answer status codes / 回答状态
pub const ANSWER_STATUS_AVAILABLE: i64 = 1;
pub const ANSWER_STATUS_DELETED: i64 = 10;

/// Answer adoption flag / 回答采纳标记
pub const ANSWER_ADOPTED_FAILED: i64 = 1;
pub const ANSWER_ADOPTED_ENABLE: i64 = 2;

/// Tag relation status / 标签关联状态
pub const TAG_REL_STATUS_AVAILABLE: i64 = 1;
pub const TAG_REL_STATUS_DELETED: i64 = 10;

/// `accepted_answer_id` of a question without an accepted answer
pub const NO_ACCEPTED_ANSWER: &str = "0";

/// Timestamp layout of `created_at` columns / 时间列格式
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const QUESTION_STATUS_LABELS: &[(&str, i64)] = &[
    ("available", QUESTION_STATUS_AVAILABLE),
    ("closed", QUESTION_STATUS_CLOSED),
    ("deleted", QUESTION_STATUS_DELETED),
];

const ANSWER_STATUS_LABELS: &[(&str, i64)] = &[
    ("available", ANSWER_STATUS_AVAILABLE),
    ("deleted", ANSWER_STATUS_DELETED),
];

/// Question status label, empty for unknown codes / 问题状态名称
pub fn question_status_label(code: i64) -> &'static str {
    lookup_label(QUESTION_STATUS_LABELS, code)
}

/// Answer status label, empty for unknown codes / 回答状态名称
pub fn answer_status_label(code: i64) -> &'static str {
    lookup_label(ANSWER_STATUS_LABELS, code)
}

fn lookup_label(table: &[(&'static str, i64)], code: i64) -> &'static str {
    table
        .iter()
        .find(|(_, v)| *v == code)
        .map(|(k, _)| *k)
        .unwrap_or("")
}

/// Stored blob / 文件记录
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct FileBlob {
    pub id: String,
    pub file_name: String,
    pub mime_type: String,
    pub size: i64,
    #[serde(skip_serializing)]
    pub content: Vec<u8>,
    pub created_at: String,
}

impl FileBlob {
    /// Create a blob with a fresh id; mime type is guessed from the name when absent
    pub fn new(file_name: &str, mime_type: Option<&str>, content: Vec<u8>) -> Self {
        let mime_type = match mime_type {
            Some(m) if !m.is_empty() => m.to_string(),
            _ => mime_guess::from_path(file_name)
                .first_or_octet_stream()
                .to_string(),
        };
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            file_name: file_name.to_string(),
            mime_type,
            size: content.len() as i64,
            content,
            created_at: chrono::Local::now().format(DATETIME_FORMAT).to_string(),
        }
    }
}
