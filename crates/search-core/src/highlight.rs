// search-core/src/highlight.rs
//! 高亮切分 - 把摘录拆成 命中前 / 命中 / 命中后 三段交给展示层

use std::ops::Range;

use crate::text::find_ignore_case;

/// 高亮切分结果，三段拼接后等于原文
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightSpans<'a> {
    pub before: &'a str,
    pub matched: &'a str,
    pub after: &'a str,
}

impl<'a> HighlightSpans<'a> {
    /// 整段文本不高亮
    pub fn plain(text: &'a str) -> Self {
        Self {
            before: text,
            matched: "",
            after: "",
        }
    }

    /// 按字节范围切分，范围必须落在字符边界上
    pub fn from_range(text: &'a str, range: Range<usize>) -> Self {
        Self {
            before: &text[..range.start],
            matched: &text[range.start..range.end],
            after: &text[range.end..],
        }
    }

    pub fn is_highlighted(&self) -> bool {
        !self.matched.is_empty()
    }
}

/// 查询在文本中第一次出现的字节范围（大小写无关）
pub fn match_range(text: &str, query: &str) -> Option<Range<usize>> {
    find_ignore_case(text, query)
}

/// 按第一次命中切分文本，没有命中时返回 `(text, "", "")`
pub fn split_on_match<'a>(text: &'a str, query: &str) -> HighlightSpans<'a> {
    match match_range(text, query) {
        Some(range) => HighlightSpans::from_range(text, range),
        None => HighlightSpans::plain(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn concat(spans: &HighlightSpans<'_>) -> String {
        format!("{}{}{}", spans.before, spans.matched, spans.after)
    }

    #[rstest]
    #[case("...some Search tips...", "search", "...some ", "Search", " tips...")]
    #[case("search at start", "SEARCH", "", "search", " at start")]
    #[case("ends with search", "search", "ends with ", "search", "")]
    #[case("no hit here", "search", "no hit here", "", "")]
    #[case("anything", "", "anything", "", "")]
    #[case("关于全文检索的笔记", "检索", "关于全文", "检索", "的笔记")]
    fn test_split_on_match(
        #[case] text: &str,
        #[case] query: &str,
        #[case] before: &str,
        #[case] matched: &str,
        #[case] after: &str,
    ) {
        let spans = split_on_match(text, query);
        assert_eq!(spans, HighlightSpans { before, matched, after });
        assert_eq!(concat(&spans), text);
    }

    #[test]
    fn test_concatenation_invariant() {
        let text = "Ärger mit dem Ölfass: ÄRGER überall";
        let chars: Vec<char> = text.chars().collect();
        for start in 0..chars.len() {
            for end in start + 1..=chars.len().min(start + 5) {
                let query: String = chars[start..end].iter().collect();
                let spans = split_on_match(text, &query);
                assert!(spans.is_highlighted());
                assert_eq!(concat(&spans), text);
                assert_eq!(spans.matched.to_lowercase(), query.to_lowercase());
            }
        }
    }
}
