// search-core/src/content.rs
//! 内容扫描 - 大小写无关的子串查找和上下文摘录

use once_cell::sync::Lazy;
use regex::Regex;

use crate::text::{byte_offset, char_offset, find_ignore_case};

/// 摘录被截断时使用的省略标记
pub const ELLIPSIS: &str = "...";

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// 文本中是否包含查询（大小写无关）
pub fn contains(query: &str, text: &str) -> bool {
    find_ignore_case(text, query).is_some()
}

/// 提取第一次命中周围的上下文
///
/// 命中前后各取 `window_radius` 个字符，越界时截断到文本边界。
/// 窗口没有从文本开头开始时加前缀省略号，没有到达结尾时加后缀省略号。
/// 所有空白（包括换行）合并为单个空格，命中部分保留原大小写。
pub fn excerpt(query: &str, text: &str, window_radius: usize) -> Option<String> {
    let hit = find_ignore_case(text, query)?;

    let match_start = char_offset(text, hit.start);
    let match_end = char_offset(text, hit.end);
    let total = match_end + text[hit.end..].chars().count();

    let start = match_start.saturating_sub(window_radius);
    let end = match_end.saturating_add(window_radius).min(total);

    let window = &text[byte_offset(text, start)..byte_offset(text, end)];

    let mut context = String::with_capacity(window.len() + ELLIPSIS.len() * 2);
    if start > 0 {
        context.push_str(ELLIPSIS);
    }
    context.push_str(window);
    if end < total {
        context.push_str(ELLIPSIS);
    }

    Some(WHITESPACE_RUN.replace_all(&context, " ").into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("search", "Some search tips", true)]
    #[case("SEARCH", "Some search tips", true)]
    #[case("search", "Some SeArCh tips", true)]
    #[case("searching", "Some search tips", false)]
    #[case("检索", "全文检索笔记", true)]
    fn test_contains(#[case] query: &str, #[case] text: &str, #[case] expected: bool) {
        assert_eq!(contains(query, text), expected);
    }

    #[rstest]
    #[case("gamma", "alpha beta gamma delta", 3, "...ta gamma de...")]
    #[case("beta", "alpha beta", 100, "alpha beta")]
    #[case("alpha", "alpha beta", 2, "alpha b...")]
    #[case("beta", "alpha beta", 2, "...a beta")]
    #[case("检索", "日本語のメモ検索テスト", 2, "")]
    #[case("検索", "日本語のメモ検索テスト", 2, "...メモ検索テス...")]
    fn test_excerpt_window(
        #[case] query: &str,
        #[case] text: &str,
        #[case] radius: usize,
        #[case] expected: &str,
    ) {
        let result = excerpt(query, text, radius);
        if expected.is_empty() {
            assert_eq!(result, None);
        } else {
            assert_eq!(result.as_deref(), Some(expected));
        }
    }

    #[test]
    fn test_excerpt_collapses_whitespace() {
        let text = "first line\n\n  second\tline search   here";
        let result = excerpt("search", text, 100).unwrap();
        assert_eq!(result, "first line second line search here");
    }

    #[test]
    fn test_excerpt_preserves_match_casing() {
        let result = excerpt("search", "Use SEARCH wisely", 4).unwrap();
        assert_eq!(result, "Use SEARCH wis...");
    }

    #[test]
    fn test_excerpt_contains_every_substring_query() {
        let text = "The quick Brown fox jumps over the lazy dog";
        let chars: Vec<char> = text.chars().collect();
        for start in 0..chars.len() {
            for len in 2..=6 {
                if start + len > chars.len() {
                    continue;
                }
                let query: String = chars[start..start + len].iter().collect();
                if query.chars().any(char::is_whitespace) {
                    continue;
                }
                assert!(contains(&query, text));
                let result = excerpt(&query.to_uppercase(), text, 5).unwrap();
                let hit = find_ignore_case(text, &query).unwrap();
                assert!(result.contains(&text[hit]));
            }
        }
    }
}
