// search-core/src/media.rs
//! 图片引用提取
//!
//! 支持两种语法，按优先级：
//! 1. `![alt](path)`
//! 2. `![[path]]`
//!
//! 先在全文查找语法 1 的第一个匹配，只有语法 1 没有结果时才查找语法 2。
//! 这不是"全文最早出现"的比较：即使语法 2 出现在更前面，语法 1 仍然优先。

use once_cell::sync::Lazy;
use regex::Regex;

static MARKDOWN_IMAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"!\[.*?\]\((.*?)\)").unwrap());
static EMBED_IMAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"!\[\[(.*?)\]\]").unwrap());

/// 返回文本中第一个图片引用的路径，不校验路径是否存在
pub fn first_image_reference(text: &str) -> Option<&str> {
    first_capture(&MARKDOWN_IMAGE, text).or_else(|| first_capture(&EMBED_IMAGE, text))
}

// 只看该语法的第一个匹配，捕获为空视为没有匹配
fn first_capture<'t>(regex: &Regex, text: &'t str) -> Option<&'t str> {
    regex
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|path| !path.is_empty())
}
