//! Search module - relevance search over questions and answers / 搜索模块
//!
//! Architecture / 架构:
//! - `query`: typed SQL builder, placeholders and binds travel together
//! - `relevance`: select lists, relevance column, ordering
//! - `repo`: the three searches, page query + count query
//! - `mapper`: rows → responses (author, tags, status labels)
//! - `collab`: user lookup and object id decoding
//!
//! Matching is plain `LIKE` containment; there is no index and no caching.

pub mod collab;
pub mod mapper;
pub mod query;
pub mod relevance;
pub mod repo;
pub mod schema;

pub use collab::{ObjectIdCodec, ObjectType, ObjectTypeDecoder, SqliteUserLookup, UserLookup};
pub use relevance::{parse_order, SearchOrder};
pub use repo::{AnswerQuery, ContentQuery, QuestionQuery, SearchRepo};
pub use schema::{SearchObject, SearchResp, TagResp, UserBasicInfo};
