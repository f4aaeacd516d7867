use serde::{Deserialize, Serialize};

use crate::config::SearchConfig;
use crate::search::{AnswerQuery, ContentQuery, QuestionQuery, SearchOrder, SearchResp};
use crate::utils::split_words;

fn default_page() -> i64 { 1 }
fn default_count_filter() -> i64 { -1 }

/// GET /api/search 参数
#[derive(Debug, Deserialize)]
pub struct SearchContentsParams {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub tag_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default = "default_count_filter")]
    pub votes: i64,
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default)]
    pub size: Option<i64>,
    #[serde(default)]
    pub order: String,
}

/// GET /api/search/questions 参数
#[derive(Debug, Deserialize)]
pub struct SearchQuestionsParams {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub no_accepted: bool,
    #[serde(default = "default_count_filter")]
    pub answers: i64,
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default)]
    pub size: Option<i64>,
    #[serde(default)]
    pub order: String,
}

/// GET /api/search/answers 参数
#[derive(Debug, Deserialize)]
pub struct SearchAnswersParams {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub accepted: bool,
    #[serde(default)]
    pub question_id: Option<String>,
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default)]
    pub size: Option<i64>,
    #[serde(default)]
    pub order: String,
}

impl SearchContentsParams {
    pub fn into_query(self, search: &SearchConfig) -> ContentQuery {
        ContentQuery {
            words: split_words(&self.q),
            tag_id: self.tag_id,
            user_id: self.user_id,
            votes: self.votes,
            page: self.page,
            size: search.page_size(self.size),
            order: SearchOrder::from(self.order.as_str()),
        }
    }
}

impl SearchQuestionsParams {
    pub fn into_query(self, search: &SearchConfig) -> QuestionQuery {
        QuestionQuery {
            words: split_words(&self.q),
            limit_no_accepted: self.no_accepted,
            answers: self.answers,
            page: self.page,
            size: search.page_size(self.size),
            order: SearchOrder::from(self.order.as_str()),
        }
    }
}

impl SearchAnswersParams {
    pub fn into_query(self, search: &SearchConfig) -> AnswerQuery {
        AnswerQuery {
            words: split_words(&self.q),
            limit_accepted: self.accepted,
            question_id: self.question_id,
            page: self.page,
            size: search.page_size(self.size),
            order: SearchOrder::from(self.order.as_str()),
        }
    }
}

/// 分页搜索结果
#[derive(Debug, Serialize)]
pub struct SearchPage {
    pub total: i64,
    pub list: Vec<SearchResp>,
}
