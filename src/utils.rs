//! Text helpers shared by search and API / 文本处理工具函数

use chrono::{Local, NaiveDateTime, TimeZone};

use crate::models::DATETIME_FORMAT;

/// Split a raw query string into search words / 将查询字符串拆分为搜索词
/// Whitespace separated, order preserved, duplicates kept
pub fn split_words(query: &str) -> Vec<String> {
    query.split_whitespace().map(|w| w.to_string()).collect()
}

/// Excerpt: trimmed text up to the first line break / 摘要：首个换行前的文本
pub fn cut_out_parsed_text(text: &str) -> String {
    let text = text.trim();
    match text.find('\n') {
        Some(idx) => text[..idx].trim_end().to_string(),
        None => text.to_string(),
    }
}

/// Parse a local `YYYY-MM-DD HH:MM:SS` timestamp into unix seconds / 解析本地时间
/// Unparseable input yields 0
pub fn parse_local_timestamp(value: &str) -> i64 {
    let naive = match NaiveDateTime::parse_from_str(value.trim(), DATETIME_FORMAT) {
        Ok(t) => t,
        Err(_) => return 0,
    };
    // DST gaps have no local mapping; ambiguous times take the earlier one
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|t| t.timestamp())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_words() {
        assert_eq!(split_words("  golang   channels "), vec!["golang", "channels"]);
        assert_eq!(split_words("foo bar foo"), vec!["foo", "bar", "foo"]);
        assert!(split_words("   ").is_empty());
    }

    #[test]
    fn test_cut_out_parsed_text() {
        assert_eq!(cut_out_parsed_text("first line\nsecond line"), "first line");
        assert_eq!(cut_out_parsed_text("  padded  "), "padded");
        assert_eq!(cut_out_parsed_text("\n\nlead\nrest"), "lead");
        assert_eq!(cut_out_parsed_text("windows\r\nline"), "windows");
        assert_eq!(cut_out_parsed_text(""), "");
    }

    #[test]
    fn test_parse_local_timestamp() {
        let expected = Local
            .with_ymd_and_hms(2024, 3, 1, 12, 30, 0)
            .earliest()
            .map(|t| t.timestamp())
            .unwrap();
        assert_eq!(parse_local_timestamp("2024-03-01 12:30:00"), expected);
        assert_eq!(parse_local_timestamp("not a date"), 0);
        assert_eq!(parse_local_timestamp(""), 0);
    }
}
