//! Collaborators of the search repository / 搜索依赖的外部组件
//!
//! - [`UserLookup`]: author summaries by user id
//! - [`ObjectTypeDecoder`]: object type encoded in an identifier

use async_trait::async_trait;
use serde::Serialize;
use sqlx::SqlitePool;

use super::schema::UserBasicInfo;
use crate::error::SearchError;

/// Object kinds addressable by identifier / 对象类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectType {
    Question,
    Answer,
    Tag,
    User,
    Collection,
    Comment,
    Report,
}

impl ObjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectType::Question => "question",
            ObjectType::Answer => "answer",
            ObjectType::Tag => "tag",
            ObjectType::User => "user",
            ObjectType::Collection => "collection",
            ObjectType::Comment => "comment",
            ObjectType::Report => "report",
        }
    }

    pub fn code(&self) -> u32 {
        match self {
            ObjectType::Question => 1,
            ObjectType::Answer => 2,
            ObjectType::Tag => 3,
            ObjectType::User => 4,
            ObjectType::Collection => 6,
            ObjectType::Comment => 7,
            ObjectType::Report => 8,
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(ObjectType::Question),
            2 => Some(ObjectType::Answer),
            3 => Some(ObjectType::Tag),
            4 => Some(ObjectType::User),
            6 => Some(ObjectType::Collection),
            7 => Some(ObjectType::Comment),
            8 => Some(ObjectType::Report),
            _ => None,
        }
    }
}

/// Resolve the object type of an identifier / 解析对象ID的类型
pub trait ObjectTypeDecoder: Send + Sync {
    fn object_type_by_id(&self, object_id: &str) -> Result<ObjectType, SearchError>;
}

/// Identifier layout `1` + 3-digit type code + 13-digit sequence
/// 对象ID格式：1 + 三位类型码 + 十三位序号
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectIdCodec;

impl ObjectIdCodec {
    pub fn encode(object_type: ObjectType, seq: u64) -> String {
        format!("1{:03}{:013}", object_type.code(), seq)
    }
}

impl ObjectTypeDecoder for ObjectIdCodec {
    fn object_type_by_id(&self, object_id: &str) -> Result<ObjectType, SearchError> {
        if object_id.len() < 5 {
            return Err(SearchError::ObjectId(object_id.to_string()));
        }
        object_id
            .get(1..4)
            .and_then(|code| code.parse::<u32>().ok())
            .and_then(ObjectType::from_code)
            .ok_or_else(|| SearchError::ObjectId(object_id.to_string()))
    }
}

/// Author summary lookup / 用户信息查询
#[async_trait]
pub trait UserLookup: Send + Sync {
    /// `Ok(None)` when the user does not exist
    async fn get_user_basic_info_by_id(&self, id: &str) -> Result<Option<UserBasicInfo>, SearchError>;
}

/// [`UserLookup`] over the `user` table
#[derive(Clone)]
pub struct SqliteUserLookup {
    db: SqlitePool,
}

impl SqliteUserLookup {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserLookup for SqliteUserLookup {
    async fn get_user_basic_info_by_id(&self, id: &str) -> Result<Option<UserBasicInfo>, SearchError> {
        let info = sqlx::query_as::<_, UserBasicInfo>(
            "SELECT id, username, rank, display_name, avatar, website, location, ip_info FROM user WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(info)
    }
}
