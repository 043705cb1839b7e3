// search-core/src/models.rs
//! 数据模型定义

use std::ops::Range;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::Serialize;

use crate::fuzzy::FuzzyMatch;
use crate::highlight::HighlightSpans;

/// 文档句柄，由文档存储提供，核心只读
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub path: PathBuf,
    /// 显示名称（不含扩展名的文件名）
    pub basename: String,
    pub modified_at: SystemTime,
}

impl Document {
    pub fn new(path: impl Into<PathBuf>, modified_at: SystemTime) -> Self {
        let path = path.into();
        let basename = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            path,
            basename,
            modified_at,
        }
    }

    pub fn with_basename(mut self, basename: impl Into<String>) -> Self {
        self.basename = basename.into();
        self
    }
}

/// 内容摘录，`highlight` 是命中在 `text` 中的字节范围
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Excerpt {
    pub text: String,
    pub highlight: Option<Range<usize>>,
}

impl Excerpt {
    pub fn spans(&self) -> HighlightSpans<'_> {
        match &self.highlight {
            Some(range) => HighlightSpans::from_range(&self.text, range.clone()),
            None => HighlightSpans::plain(&self.text),
        }
    }
}

/// 单个文档在一次查询中的匹配结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub document: Document,
    pub name_match: Option<FuzzyMatch>,
    pub content_match: bool,
    pub excerpt: Option<Excerpt>,
    pub image: Option<String>,
}

impl MatchResult {
    /// 只有文件名或内容至少一项命中才算匹配
    pub fn is_match(&self) -> bool {
        self.name_match.is_some() || self.content_match
    }
}

/// 各项得分
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ScoreBreakdown {
    pub name: f64,
    pub content: f64,
    pub recency: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.name + self.content + self.recency
    }
}

/// 排序后的结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedResult {
    #[serde(flatten)]
    pub result: MatchResult,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

impl RankedResult {
    pub fn name(&self) -> &str {
        &self.result.document.basename
    }

    pub fn path(&self) -> &Path {
        &self.result.document.path
    }

    pub fn excerpt(&self) -> Option<&Excerpt> {
        self.result.excerpt.as_ref()
    }

    pub fn image(&self) -> Option<&str> {
        self.result.image.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_basename_drops_extension() {
        let doc = Document::new("vault/daily/2024-05-01.md", SystemTime::UNIX_EPOCH);
        assert_eq!(doc.basename, "2024-05-01");

        let doc = Document::new("vault/Project Notes.md", SystemTime::UNIX_EPOCH);
        assert_eq!(doc.basename, "Project Notes");
    }

    #[test]
    fn test_excerpt_spans() {
        let excerpt = Excerpt {
            text: "...some Search tips...".to_string(),
            highlight: Some(8..14),
        };
        let spans = excerpt.spans();
        assert_eq!(spans.matched, "Search");

        let plain = Excerpt {
            text: "nothing".to_string(),
            highlight: None,
        };
        assert!(!plain.spans().is_highlighted());
    }
}
