//! Row to response mapping / 搜索结果转换

use std::collections::HashMap;
use std::sync::Arc;

use sqlx::SqlitePool;

use super::collab::{ObjectType, ObjectTypeDecoder, UserLookup};
use super::schema::{SearchObject, SearchResp, SearchRow, TagResp, UserBasicInfo};
use crate::error::SearchError;
use crate::models::{
    answer_status_label, question_status_label, ANSWER_ADOPTED_ENABLE, TAG_REL_STATUS_AVAILABLE,
};
use crate::utils::{cut_out_parsed_text, parse_local_timestamp};

pub struct ResultMapper {
    db: SqlitePool,
    users: Arc<dyn UserLookup>,
    decoder: Arc<dyn ObjectTypeDecoder>,
}

impl ResultMapper {
    pub fn new(db: SqlitePool, users: Arc<dyn UserLookup>, decoder: Arc<dyn ObjectTypeDecoder>) -> Self {
        Self { db, users, decoder }
    }

    /// Convert rows into responses / 转换查询结果
    ///
    /// Rows with an undecodable id are skipped. An author or tag lookup
    /// failure fails the whole call.
    pub async fn parse_result(&self, rows: Vec<SearchRow>) -> Result<Vec<SearchResp>, SearchError> {
        let mut authors: HashMap<String, Option<UserBasicInfo>> = HashMap::new();
        let mut resp = Vec::with_capacity(rows.len());

        for row in rows {
            let object_type = match self.decoder.object_type_by_id(&row.id) {
                Ok(t) => t,
                Err(e) => {
                    tracing::debug!("Skip search row {}: {}", row.id, e);
                    continue;
                }
            };

            let user_info = match authors.get(&row.user_id) {
                Some(info) => info.clone(),
                None => {
                    let info = self.users.get_user_basic_info_by_id(&row.user_id).await?;
                    authors.insert(row.user_id.clone(), info.clone());
                    info
                }
            };

            let tags = self.find_tags(&row.question_id).await?;

            let status = match object_type {
                ObjectType::Question => question_status_label(row.status),
                ObjectType::Answer => answer_status_label(row.status),
                _ => "",
            };

            resp.push(SearchResp {
                object_type,
                object: SearchObject {
                    excerpt: cut_out_parsed_text(&row.original_text),
                    created_at: parse_local_timestamp(&row.created_at),
                    title: row.title.unwrap_or_default(),
                    user_info,
                    tags,
                    vote_count: row.vote_count,
                    accepted: row.accepted == ANSWER_ADOPTED_ENABLE,
                    answer_count: row.answer_count,
                    status: status.to_string(),
                    id: row.id,
                    question_id: row.question_id,
                },
            });
        }

        Ok(resp)
    }

    /// Available tags of a question / 问题的有效标签
    async fn find_tags(&self, question_id: &str) -> Result<Vec<TagResp>, SearchError> {
        let tags = sqlx::query_as::<_, TagResp>(
            r#"
            SELECT tag.slug_name, tag.display_name, tag.main_tag_slug_name
            FROM tag
            INNER JOIN tag_rel ON tag.id = tag_rel.tag_id
            WHERE tag_rel.object_id = ? AND tag_rel.status = ?
            ORDER BY tag_rel.id
            "#,
        )
        .bind(question_id)
        .bind(TAG_REL_STATUS_AVAILABLE)
        .fetch_all(&self.db)
        .await?;
        Ok(tags)
    }
}
