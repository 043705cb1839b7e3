// search-core/src/lib.rs
//! 笔记搜索引擎核心库
//!
//! 每次查询对全部文档做一次全量扫描，支持：
//! - 文件名模糊匹配 (`fuzzy`)
//! - 大小写无关的内容搜索和上下文摘录 (`content`)
//! - 第一张图片引用提取 (`media`)
//! - 综合文件名、内容、最近修改时间的排序 (`ranking`)
//! - 带防抖和代数校验的查询会话 (`session`)
//! - 命中高亮切分 (`highlight`)

pub mod config;
pub mod content;
pub mod error;
pub mod fuzzy;
pub mod highlight;
pub mod media;
pub mod models;
pub mod ranking;
pub mod session;
pub mod store;
pub mod text;

// 重导出核心类型
pub use config::SearchSettings;
pub use content::{contains, excerpt};
pub use error::{Result, SearchError};
pub use fuzzy::{FuzzyMatch, fuzzy_match};
pub use highlight::{HighlightSpans, split_on_match};
pub use media::first_image_reference;
pub use models::{Document, Excerpt, MatchResult, RankedResult, ScoreBreakdown};
pub use ranking::{MIN_QUERY_LEN, rank};
pub use session::{Generation, QuerySession, SessionSnapshot};
pub use store::{DocumentStore, FsDocumentStore, MemoryStore};
