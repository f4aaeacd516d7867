pub mod query;
pub mod types;

pub use query::{search_answers, search_contents, search_questions};
