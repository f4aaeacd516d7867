//! Search rows and response objects / 搜索结果结构

use serde::{Deserialize, Serialize};

use super::collab::ObjectType;

/// One row of a search query, question and answer selects share this shape
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SearchRow {
    pub id: String,
    pub question_id: String,
    pub title: Option<String>,
    pub original_text: String,
    pub created_at: String,
    pub user_id: String,
    pub vote_count: i64,
    pub answer_count: i64,
    pub accepted: i64,
    pub status: i64,
}

/// Compact author summary / 用户简要信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserBasicInfo {
    pub id: String,
    pub username: String,
    pub rank: i64,
    pub display_name: String,
    pub avatar: String,
    pub website: String,
    pub location: String,
    pub ip_info: String,
}

/// Tag attached to a result / 标签
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TagResp {
    pub slug_name: String,
    pub display_name: String,
    pub main_tag_slug_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchObject {
    pub id: String,
    pub question_id: String,
    pub title: String,
    pub excerpt: String,
    /// Unix seconds / 创建时间戳
    pub created_at: i64,
    pub user_info: Option<UserBasicInfo>,
    pub tags: Vec<TagResp>,
    pub vote_count: i64,
    pub accepted: bool,
    pub answer_count: i64,
    pub status: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResp {
    pub object_type: ObjectType,
    pub object: SearchObject,
}
