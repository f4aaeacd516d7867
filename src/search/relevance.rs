//! Relevance column and ordering / 相关度字段与排序
//!
//! The score of a field is `LENGTH(field) - LENGTH(field with every word
//! removed)`, i.e. the number of matched characters. Scores of all search
//! fields are summed into a `relevance` column.

use super::query::Fragment;

/// Select list of question rows / 问题查询字段
pub const QUESTION_FIELDS: &[&str] = &[
    "question.id AS id",
    "question.id AS question_id",
    "question.title AS title",
    "question.original_text AS original_text",
    "question.created_at AS created_at",
    "question.user_id AS user_id",
    "question.vote_count AS vote_count",
    "question.answer_count AS answer_count",
    "0 AS accepted",
    "question.status AS status",
    "question.post_update_time AS post_update_time",
];

/// Select list of answer rows, title comes from the parent question / 回答查询字段
pub const ANSWER_FIELDS: &[&str] = &[
    "answer.id AS id",
    "answer.question_id AS question_id",
    "question.title AS title",
    "answer.original_text AS original_text",
    "answer.created_at AS created_at",
    "answer.user_id AS user_id",
    "answer.vote_count AS vote_count",
    "0 AS answer_count",
    "answer.adopted AS accepted",
    "answer.status AS status",
    "answer.created_at AS post_update_time",
];

pub const QUESTION_SEARCH_FIELDS: &[&str] = &["question.title", "question.original_text"];
pub const ANSWER_SEARCH_FIELDS: &[&str] = &["answer.original_text"];

/// Result ordering / 排序方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchOrder {
    #[default]
    Newest,
    Active,
    Score,
    Relevance,
}

impl SearchOrder {
    pub fn order_by(&self) -> &'static str {
        match self {
            SearchOrder::Newest => "created_at DESC",
            SearchOrder::Active => "post_update_time DESC",
            SearchOrder::Score => "vote_count DESC",
            SearchOrder::Relevance => "relevance DESC",
        }
    }
}

impl From<&str> for SearchOrder {
    /// Unknown or empty values fall back to newest / 未知值默认按最新排序
    fn from(s: &str) -> Self {
        match s {
            "active" => SearchOrder::Active,
            "score" => SearchOrder::Score,
            "relevance" => SearchOrder::Relevance,
            _ => SearchOrder::Newest,
        }
    }
}

/// Resolve an order name to its ORDER BY clause / 解析排序
pub fn parse_order(order: &str) -> &'static str {
    SearchOrder::from(order).order_by()
}

/// Plain select list / 基础字段
pub fn base_fields(fields: &[&str]) -> Vec<Fragment> {
    fields.iter().map(|f| Fragment::raw(f)).collect()
}

/// Return `fields` plus a computed `relevance` column / 追加相关度字段
///
/// Each word is removed by one `REPLACE`, nested in word order, so the
/// first word is stripped first. With no words every term is 0.
pub fn add_relevance_field(search_fields: &[&str], words: &[String], fields: &[&str]) -> Vec<Fragment> {
    let mut res = base_fields(fields);

    if search_fields.is_empty() {
        res.push(Fragment::raw("0 AS relevance"));
        return res;
    }

    let mut expr = Fragment::raw("(");
    for (i, field) in search_fields.iter().enumerate() {
        if i > 0 {
            expr.push_sql(" + ");
        }
        expr.push_sql("(LENGTH(").push_sql(field).push_sql(") - LENGTH(");
        for _ in words {
            expr.push_sql("REPLACE(");
        }
        expr.push_sql(field);
        for word in words {
            expr.push_sql(", ").push_bind(word.as_str()).push_sql(", '')");
        }
        expr.push_sql("))");
    }
    expr.push_sql(") AS relevance");

    res.push(expr);
    res
}
