// search-core/src/text.rs
//! 大小写无关的文本查找
//!
//! 内容扫描和高亮共用同一个查找原语，保证两者对"第一次出现"的判断一致。
//! 比较按字符进行小写折叠，不做区域相关的折叠。

use std::ops::Range;

/// 两个字符小写折叠后是否相等
pub(crate) fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// 查找 `needle` 在 `haystack` 中第一次出现的位置（大小写无关）
///
/// 返回 `haystack` 中的字节范围，范围内的原文保持原大小写。
/// 空 `needle` 视为没有匹配。
pub fn find_ignore_case(haystack: &str, needle: &str) -> Option<Range<usize>> {
    if needle.is_empty() {
        return None;
    }

    // ASCII 小写化不改变字节长度，可以直接用 str::find
    if haystack.is_ascii() && needle.is_ascii() {
        let start = haystack
            .to_ascii_lowercase()
            .find(&needle.to_ascii_lowercase())?;
        return Some(start..start + needle.len());
    }

    let needle: Vec<char> = needle.chars().collect();
    'outer: for (start, _) in haystack.char_indices() {
        let mut rest = haystack[start..].char_indices();
        let mut end = start;
        for &expected in &needle {
            match rest.next() {
                Some((offset, ch)) if chars_eq_ignore_case(ch, expected) => {
                    end = start + offset + ch.len_utf8();
                }
                _ => continue 'outer,
            }
        }
        return Some(start..end);
    }

    None
}

/// 字节偏移转换为字符偏移
pub(crate) fn char_offset(text: &str, byte_offset: usize) -> usize {
    text[..byte_offset].chars().count()
}

/// 字符偏移转换为字节偏移，超出范围时返回文本长度
pub(crate) fn byte_offset(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map(|(offset, _)| offset)
        .unwrap_or(text.len())
}
