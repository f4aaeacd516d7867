//! Typed SQL assembly / 类型化SQL构建
//!
//! A `?` placeholder is only ever written together with its bound value, so a
//! rendered [`Fragment`] always carries exactly as many binds as placeholders.

use sqlx::query::QueryAs;
use sqlx::sqlite::{Sqlite, SqliteArguments, SqliteRow};
use sqlx::FromRow;

use crate::error::SearchError;

/// Bound parameter value / 绑定参数
#[derive(Debug, Clone, PartialEq)]
pub enum Bind {
    Int(i64),
    Text(String),
}

impl From<i64> for Bind {
    fn from(v: i64) -> Self {
        Bind::Int(v)
    }
}

impl From<i32> for Bind {
    fn from(v: i32) -> Self {
        Bind::Int(v as i64)
    }
}

impl From<&str> for Bind {
    fn from(v: &str) -> Self {
        Bind::Text(v.to_string())
    }
}

impl From<String> for Bind {
    fn from(v: String) -> Self {
        Bind::Text(v)
    }
}

/// SQL text together with its bound values / SQL片段及其参数
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fragment {
    sql: String,
    binds: Vec<Bind>,
}

impl Fragment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw(sql: &str) -> Self {
        Self {
            sql: sql.to_string(),
            binds: Vec::new(),
        }
    }

    pub fn push_sql(&mut self, sql: &str) -> &mut Self {
        self.sql.push_str(sql);
        self
    }

    pub fn push_bind(&mut self, value: impl Into<Bind>) -> &mut Self {
        self.sql.push('?');
        self.binds.push(value.into());
        self
    }

    pub fn append(&mut self, other: &Fragment) -> &mut Self {
        self.sql.push_str(&other.sql);
        self.binds.extend(other.binds.iter().cloned());
        self
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn binds(&self) -> &[Bind] {
        &self.binds
    }

    /// Prepare a typed query with every bind applied in order / 生成绑定好参数的查询
    pub fn query_as<'q, O>(&'q self) -> QueryAs<'q, Sqlite, O, SqliteArguments<'q>>
    where
        O: for<'r> FromRow<'r, SqliteRow>,
    {
        let mut query = sqlx::query_as::<_, O>(&self.sql);
        for bind in &self.binds {
            query = match bind {
                Bind::Int(v) => query.bind(*v),
                Bind::Text(v) => query.bind(v.as_str()),
            };
        }
        query
    }
}

/// Predicate tree / 条件树
///
/// Empty `And`/`Or` groups impose no constraint and are left out of the
/// rendered SQL.
#[derive(Debug, Clone, PartialEq)]
pub enum Cond {
    Eq(&'static str, Bind),
    Lt(&'static str, Bind),
    Gte(&'static str, Bind),
    /// Substring match, LIKE wildcards in the needle are escaped
    Contains(&'static str, String),
    And(Vec<Cond>),
    Or(Vec<Cond>),
}

impl Cond {
    pub fn eq(column: &'static str, value: impl Into<Bind>) -> Self {
        Cond::Eq(column, value.into())
    }

    pub fn lt(column: &'static str, value: impl Into<Bind>) -> Self {
        Cond::Lt(column, value.into())
    }

    pub fn gte(column: &'static str, value: impl Into<Bind>) -> Self {
        Cond::Gte(column, value.into())
    }

    pub fn contains(column: &'static str, needle: &str) -> Self {
        Cond::Contains(column, needle.to_string())
    }

    /// `= 0` when n is 0, `>= n` when positive, nothing when negative
    /// 计数过滤：0 精确匹配，正数为下限，负数不过滤
    pub fn count_filter(column: &'static str, n: i64) -> Option<Self> {
        match n {
            0 => Some(Cond::eq(column, 0)),
            n if n > 0 => Some(Cond::gte(column, n)),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Cond::And(items) | Cond::Or(items) => items.iter().all(Cond::is_empty),
            _ => false,
        }
    }

    fn write(&self, out: &mut Fragment) {
        match self {
            Cond::Eq(column, value) => {
                out.push_sql(column).push_sql(" = ").push_bind(value.clone());
            }
            Cond::Lt(column, value) => {
                out.push_sql(column).push_sql(" < ").push_bind(value.clone());
            }
            Cond::Gte(column, value) => {
                out.push_sql(column).push_sql(" >= ").push_bind(value.clone());
            }
            Cond::Contains(column, needle) => {
                out.push_sql(column)
                    .push_sql(" LIKE ")
                    .push_bind(format!("%{}%", escape_like(needle)))
                    .push_sql(" ESCAPE '\\'");
            }
            Cond::And(items) => write_group(items, " AND ", out),
            Cond::Or(items) => write_group(items, " OR ", out),
        }
    }

    pub fn render(&self) -> Fragment {
        let mut out = Fragment::new();
        self.write(&mut out);
        out
    }
}

fn write_group(items: &[Cond], sep: &str, out: &mut Fragment) {
    let items: Vec<&Cond> = items.iter().filter(|c| !c.is_empty()).collect();
    out.push_sql("(");
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_sql(sep);
        }
        item.write(out);
    }
    out.push_sql(")");
}

fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Single SELECT statement / 单条查询
#[derive(Debug, Clone, Default)]
pub struct Select {
    fields: Vec<Fragment>,
    from: String,
    joins: Vec<String>,
    filters: Vec<Cond>,
}

impl Select {
    pub fn from(table: &str) -> Self {
        Self {
            from: table.to_string(),
            ..Default::default()
        }
    }

    pub fn fields(mut self, fields: Vec<Fragment>) -> Self {
        self.fields = fields;
        self
    }

    pub fn left_join(mut self, table: &str, on: &str) -> Self {
        self.joins.push(format!("LEFT JOIN {} ON {}", table, on));
        self
    }

    pub fn inner_join(mut self, table: &str, on: &str) -> Self {
        self.joins.push(format!("INNER JOIN {} ON {}", table, on));
        self
    }

    /// Filters are ANDed together / 多个条件以 AND 连接
    pub fn and_where(mut self, cond: Cond) -> Self {
        if !cond.is_empty() {
            self.filters.push(cond);
        }
        self
    }

    pub fn and_where_opt(self, cond: Option<Cond>) -> Self {
        match cond {
            Some(cond) => self.and_where(cond),
            None => self,
        }
    }

    pub fn render(&self) -> Fragment {
        let mut out = Fragment::raw("SELECT ");
        if self.fields.is_empty() {
            out.push_sql("*");
        }
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                out.push_sql(", ");
            }
            out.append(field);
        }
        out.push_sql(" FROM ").push_sql(&self.from);
        for join in &self.joins {
            out.push_sql(" ").push_sql(join);
        }
        for (i, cond) in self.filters.iter().enumerate() {
            out.push_sql(if i == 0 { " WHERE " } else { " AND " });
            cond.write(&mut out);
        }
        out
    }
}

/// Validated 1-based pagination / 分页参数
///
/// The offset must fit in an `i64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    size: i64,
    offset: i64,
}

impl Page {
    pub fn new(page: i64, size: i64) -> Result<Self, SearchError> {
        if page < 1 || size < 1 {
            return Err(SearchError::InvalidPagination { page, size });
        }
        let offset = (page - 1)
            .checked_mul(size)
            .ok_or(SearchError::InvalidPagination { page, size })?;
        Ok(Self { size, offset })
    }

    pub fn size(&self) -> i64 {
        self.size
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }
}

/// `a UNION ALL b ...`
pub fn union_all(parts: &[Select]) -> Fragment {
    let mut out = Fragment::new();
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            out.push_sql(" UNION ALL ");
        }
        out.append(&part.render());
    }
    out
}

/// Wrap a query as a derived table, order it and cut one page / 排序并分页
pub fn paginate(inner: &Fragment, order_by: &str, page: Page) -> Fragment {
    let mut out = Fragment::raw("SELECT * FROM (");
    out.append(inner)
        .push_sql(") t ORDER BY ")
        .push_sql(order_by)
        .push_sql(" LIMIT ")
        .push_bind(page.size())
        .push_sql(" OFFSET ")
        .push_bind(page.offset());
    out
}

/// `SELECT COUNT(*) AS total` over a query / 统计总数
pub fn count(inner: &Fragment) -> Fragment {
    let mut out = Fragment::raw("SELECT COUNT(*) AS total FROM (");
    out.append(inner).push_sql(") c");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placeholders(f: &Fragment) -> usize {
        f.sql().matches('?').count()
    }

    #[test]
    fn test_cond_render() {
        let cond = Cond::And(vec![
            Cond::lt("question.status", 10),
            Cond::Or(vec![
                Cond::contains("question.title", "foo"),
                Cond::contains("question.original_text", "foo"),
            ]),
        ]);
        let f = cond.render();
        assert_eq!(
            f.sql(),
            "(question.status < ? AND (question.title LIKE ? ESCAPE '\\' OR question.original_text LIKE ? ESCAPE '\\'))"
        );
        assert_eq!(
            f.binds(),
            &[
                Bind::Int(10),
                Bind::Text("%foo%".to_string()),
                Bind::Text("%foo%".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_groups_are_skipped() {
        assert!(Cond::Or(vec![]).is_empty());
        assert!(Cond::And(vec![Cond::Or(vec![])]).is_empty());

        let f = Select::from("question")
            .and_where(Cond::Or(vec![]))
            .and_where(Cond::eq("question.user_id", "u1"))
            .render();
        assert_eq!(f.sql(), "SELECT * FROM question WHERE question.user_id = ?");
    }

    #[test]
    fn test_contains_escapes_wildcards() {
        let f = Cond::contains("answer.original_text", "100%_a\\b").render();
        assert_eq!(f.binds(), &[Bind::Text("%100\\%\\_a\\\\b%".to_string())]);
    }

    #[test]
    fn test_count_filter() {
        assert_eq!(Cond::count_filter("vote_count", 0), Some(Cond::eq("vote_count", 0)));
        assert_eq!(Cond::count_filter("vote_count", 3), Some(Cond::gte("vote_count", 3)));
        assert_eq!(Cond::count_filter("vote_count", -1), None);
    }

    #[test]
    fn test_select_paginate_and_count() {
        let select = Select::from("answer")
            .fields(vec![Fragment::raw("answer.id AS id")])
            .left_join("question", "question.id = answer.question_id")
            .and_where(Cond::lt("answer.status", 10))
            .and_where_opt(Cond::count_filter("answer.vote_count", 2));
        let inner = select.render();
        assert_eq!(
            inner.sql(),
            "SELECT answer.id AS id FROM answer LEFT JOIN question ON question.id = answer.question_id \
             WHERE answer.status < ? AND answer.vote_count >= ?"
        );

        let page = Page::new(3, 20).unwrap();
        let data = paginate(&inner, "created_at DESC", page);
        assert!(data.sql().ends_with(") t ORDER BY created_at DESC LIMIT ? OFFSET ?"));
        assert_eq!(&data.binds()[2..], &[Bind::Int(20), Bind::Int(40)]);
        assert_eq!(placeholders(&data), data.binds().len());

        let total = count(&inner);
        assert!(total.sql().starts_with("SELECT COUNT(*) AS total FROM (SELECT"));
        assert_eq!(total.binds(), inner.binds());
    }

    #[test]
    fn test_union_all_keeps_bind_order() {
        let q = Select::from("question").and_where(Cond::eq("question.user_id", "q"));
        let a = Select::from("answer").and_where(Cond::eq("answer.user_id", "a"));
        let f = union_all(&[q, a]);
        assert!(f.sql().contains(" UNION ALL "));
        assert_eq!(f.binds(), &[Bind::from("q"), Bind::from("a")]);
    }

    #[test]
    fn test_page_validation() {
        assert!(Page::new(0, 10).is_err());
        assert!(Page::new(-1, 10).is_err());
        assert!(Page::new(1, 0).is_err());
        let page = Page::new(1, 10).unwrap();
        assert_eq!(page.offset(), 0);
        assert_eq!(Page::new(2, 10).unwrap().offset(), 10);
    }

    #[test]
    fn test_page_offset_overflow_is_rejected() {
        let err = Page::new(i64::MAX, 20).unwrap_err();
        assert!(matches!(err, SearchError::InvalidPagination { page: i64::MAX, size: 20 }));
        assert!(Page::new(2, i64::MAX).is_ok());
        assert!(Page::new(3, i64::MAX).is_err());
    }
}
