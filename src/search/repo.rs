//! Question and answer search / 问答搜索
//!
//! Every search runs two statements: one page of rows, then a `COUNT(*)`
//! over the same filters.

use std::sync::Arc;

use sqlx::SqlitePool;

use super::collab::{ObjectTypeDecoder, UserLookup};
use super::mapper::ResultMapper;
use super::query::{count, paginate, union_all, Cond, Fragment, Page, Select};
use super::relevance::{
    add_relevance_field, base_fields, SearchOrder, ANSWER_FIELDS, ANSWER_SEARCH_FIELDS, QUESTION_FIELDS,
    QUESTION_SEARCH_FIELDS,
};
use super::schema::{SearchResp, SearchRow};
use crate::error::SearchError;
use crate::models::{
    ANSWER_ADOPTED_ENABLE, ANSWER_STATUS_DELETED, NO_ACCEPTED_ANSWER, QUESTION_STATUS_DELETED,
    TAG_REL_STATUS_AVAILABLE,
};

pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Combined question and answer search / 问题+回答搜索条件
#[derive(Debug, Clone)]
pub struct ContentQuery {
    pub words: Vec<String>,
    pub tag_id: Option<String>,
    pub user_id: Option<String>,
    /// 0: exactly zero, >0: at least, <0: any
    pub votes: i64,
    pub page: i64,
    pub size: i64,
    pub order: SearchOrder,
}

impl Default for ContentQuery {
    fn default() -> Self {
        Self {
            words: Vec::new(),
            tag_id: None,
            user_id: None,
            votes: -1,
            page: 1,
            size: DEFAULT_PAGE_SIZE,
            order: SearchOrder::default(),
        }
    }
}

/// Question search / 问题搜索条件
#[derive(Debug, Clone)]
pub struct QuestionQuery {
    pub words: Vec<String>,
    /// Only questions without an accepted answer / 仅未采纳问题
    pub limit_no_accepted: bool,
    /// Answer count filter, same rules as votes
    pub answers: i64,
    pub page: i64,
    pub size: i64,
    pub order: SearchOrder,
}

impl Default for QuestionQuery {
    fn default() -> Self {
        Self {
            words: Vec::new(),
            limit_no_accepted: false,
            answers: -1,
            page: 1,
            size: DEFAULT_PAGE_SIZE,
            order: SearchOrder::default(),
        }
    }
}

/// Answer search / 回答搜索条件
#[derive(Debug, Clone)]
pub struct AnswerQuery {
    pub words: Vec<String>,
    /// Only adopted answers / 仅已采纳回答
    pub limit_accepted: bool,
    pub question_id: Option<String>,
    pub page: i64,
    pub size: i64,
    pub order: SearchOrder,
}

impl Default for AnswerQuery {
    fn default() -> Self {
        Self {
            words: Vec::new(),
            limit_accepted: false,
            question_id: None,
            page: 1,
            size: DEFAULT_PAGE_SIZE,
            order: SearchOrder::default(),
        }
    }
}

/// Data statement and count statement of one search
#[derive(Debug, Clone)]
pub struct BuiltSearch {
    pub data: Fragment,
    pub total: Fragment,
}

pub struct SearchRepo {
    db: SqlitePool,
    mapper: ResultMapper,
}

impl SearchRepo {
    pub fn new(db: SqlitePool, users: Arc<dyn UserLookup>, decoder: Arc<dyn ObjectTypeDecoder>) -> Self {
        let mapper = ResultMapper::new(db.clone(), users, decoder);
        Self { db, mapper }
    }

    /// Search questions and answers / 搜索问题和回答
    pub async fn search_contents(&self, q: &ContentQuery) -> Result<(Vec<SearchResp>, i64), SearchError> {
        let built = build_contents(q)?;
        self.execute(built).await
    }

    /// Search questions / 搜索问题
    pub async fn search_questions(&self, q: &QuestionQuery) -> Result<(Vec<SearchResp>, i64), SearchError> {
        let built = build_questions(q)?;
        self.execute(built).await
    }

    /// Search answers / 搜索回答
    pub async fn search_answers(&self, q: &AnswerQuery) -> Result<(Vec<SearchResp>, i64), SearchError> {
        let built = build_answers(q)?;
        self.execute(built).await
    }

    async fn execute(&self, built: BuiltSearch) -> Result<(Vec<SearchResp>, i64), SearchError> {
        tracing::debug!("search sql: {} ({} binds)", built.data.sql(), built.data.binds().len());

        let rows: Vec<SearchRow> = built.data.query_as::<SearchRow>().fetch_all(&self.db).await?;
        let (total,): (i64,) = built.total.query_as::<(i64,)>().fetch_one(&self.db).await?;

        let resp = self.mapper.parse_result(rows).await?;
        tracing::debug!("search matched {} rows, page has {}", total, resp.len());
        Ok((resp, total))
    }
}

/// Drop blank words, keep order and duplicates
fn clean_words(words: &[String]) -> Vec<String> {
    words.iter().filter(|w| !w.trim().is_empty()).cloned().collect()
}

fn non_empty(v: &Option<String>) -> Option<&str> {
    v.as_deref().filter(|s| !s.is_empty())
}

/// Any word in any column / 任一关键词匹配任一字段
fn word_filter(columns: &[&'static str], words: &[String]) -> Cond {
    Cond::Or(
        words
            .iter()
            .flat_map(|w| columns.iter().map(move |c| Cond::contains(*c, w)))
            .collect(),
    )
}

fn select_fields(order: SearchOrder, search_fields: &[&str], words: &[String], fields: &[&str]) -> Vec<Fragment> {
    if order == SearchOrder::Relevance {
        add_relevance_field(search_fields, words, fields)
    } else {
        base_fields(fields)
    }
}

fn question_select(words: &[String], order: SearchOrder) -> Select {
    Select::from("question")
        .fields(select_fields(order, QUESTION_SEARCH_FIELDS, words, QUESTION_FIELDS))
        .and_where(Cond::lt("question.status", QUESTION_STATUS_DELETED))
        .and_where(word_filter(QUESTION_SEARCH_FIELDS, words))
}

fn answer_select(words: &[String], order: SearchOrder) -> Select {
    Select::from("answer")
        .fields(select_fields(order, ANSWER_SEARCH_FIELDS, words, ANSWER_FIELDS))
        .left_join("question", "question.id = answer.question_id")
        .and_where(Cond::lt("question.status", QUESTION_STATUS_DELETED))
        .and_where(Cond::lt("answer.status", ANSWER_STATUS_DELETED))
        .and_where(word_filter(ANSWER_SEARCH_FIELDS, words))
}

fn finish(inner: Fragment, order: SearchOrder, page: Page) -> BuiltSearch {
    BuiltSearch {
        data: paginate(&inner, order.order_by(), page),
        total: count(&inner),
    }
}

pub fn build_contents(q: &ContentQuery) -> Result<BuiltSearch, SearchError> {
    let page = Page::new(q.page, q.size)?;
    let words = clean_words(&q.words);

    let mut questions = question_select(&words, q.order);
    let mut answers = answer_select(&words, q.order);

    // answers are filtered by the tags of their question
    if let Some(tag_id) = non_empty(&q.tag_id) {
        questions = questions
            .inner_join("tag_rel", "tag_rel.object_id = question.id")
            .and_where(Cond::eq("tag_rel.tag_id", tag_id))
            .and_where(Cond::eq("tag_rel.status", TAG_REL_STATUS_AVAILABLE));
        answers = answers
            .inner_join("tag_rel", "tag_rel.object_id = answer.question_id")
            .and_where(Cond::eq("tag_rel.tag_id", tag_id))
            .and_where(Cond::eq("tag_rel.status", TAG_REL_STATUS_AVAILABLE));
    }

    if let Some(user_id) = non_empty(&q.user_id) {
        questions = questions.and_where(Cond::eq("question.user_id", user_id));
        answers = answers.and_where(Cond::eq("answer.user_id", user_id));
    }

    questions = questions.and_where_opt(Cond::count_filter("question.vote_count", q.votes));
    answers = answers.and_where_opt(Cond::count_filter("answer.vote_count", q.votes));

    Ok(finish(union_all(&[questions, answers]), q.order, page))
}

pub fn build_questions(q: &QuestionQuery) -> Result<BuiltSearch, SearchError> {
    let page = Page::new(q.page, q.size)?;
    let words = clean_words(&q.words);

    let mut questions = question_select(&words, q.order);
    if q.limit_no_accepted {
        questions = questions.and_where(Cond::eq("question.accepted_answer_id", NO_ACCEPTED_ANSWER));
    }
    questions = questions.and_where_opt(Cond::count_filter("question.answer_count", q.answers));

    Ok(finish(questions.render(), q.order, page))
}

pub fn build_answers(q: &AnswerQuery) -> Result<BuiltSearch, SearchError> {
    let page = Page::new(q.page, q.size)?;
    let words = clean_words(&q.words);

    let mut answers = answer_select(&words, q.order);
    if q.limit_accepted {
        answers = answers.and_where(Cond::eq("answer.adopted", ANSWER_ADOPTED_ENABLE));
    }
    if let Some(question_id) = non_empty(&q.question_id) {
        answers = answers.and_where(Cond::eq("answer.question_id", question_id));
    }

    Ok(finish(answers.render(), q.order, page))
}
