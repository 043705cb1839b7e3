// search-core/src/ranking.rs
//! 排序模块
//!
//! 每次查询对全部文档做一次全量扫描：
//! - 文件名模糊匹配：得分 × 10
//! - 内容包含查询：固定 5 分，并生成摘录、提取第一张图片
//! - 最近修改：`max(0, 10 - 距今天数)`，无论哪种匹配都会加上
//!
//! 只有文件名或内容命中的文档才会进入结果，最近修改本身不能让文档入选。
//! 各文档的扫描互不依赖，用 rayon 并行执行，排序前恢复原始顺序，
//! 再用稳定排序保证同分文档保持枚举顺序。

use std::time::SystemTime;

use rayon::prelude::*;

use crate::config::SearchSettings;
use crate::content;
use crate::fuzzy::fuzzy_match;
use crate::highlight::match_range;
use crate::media::first_image_reference;
use crate::models::{Document, Excerpt, MatchResult, RankedResult, ScoreBreakdown};
use crate::store::DocumentStore;

/// 查询最少字符数，更短的查询直接返回空结果
pub const MIN_QUERY_LEN: usize = 2;
pub const NAME_WEIGHT: f64 = 10.0;
pub const CONTENT_SCORE: f64 = 5.0;
/// 最近修改加分的时间范围（天）
pub const RECENCY_HORIZON_DAYS: f64 = 10.0;

const SECONDS_PER_DAY: f64 = 86_400.0;

pub fn is_searchable(query: &str) -> bool {
    query.chars().count() >= MIN_QUERY_LEN
}

/// 对单个文档求匹配结果（不含打分）
pub fn evaluate(document: &Document, text: &str, query: &str, context_length: usize) -> MatchResult {
    let name_match = fuzzy_match(query, &document.basename);
    let content_match = content::contains(query, text);

    let (excerpt, image) = if content_match {
        let excerpt = content::excerpt(query, text, context_length).map(|text| Excerpt {
            highlight: match_range(&text, query),
            text,
        });
        (excerpt, first_image_reference(text).map(str::to_string))
    } else {
        (None, None)
    };

    MatchResult {
        document: document.clone(),
        name_match,
        content_match,
        excerpt,
        image,
    }
}

/// 最近修改加分，修改时间在未来时按 0 天计算
pub fn recency_score(modified_at: SystemTime, now: SystemTime) -> f64 {
    let days = now
        .duration_since(modified_at)
        .map(|age| age.as_secs_f64() / SECONDS_PER_DAY)
        .unwrap_or(0.0);
    (RECENCY_HORIZON_DAYS - days).max(0.0)
}

pub fn score(result: &MatchResult, now: SystemTime) -> ScoreBreakdown {
    ScoreBreakdown {
        name: result
            .name_match
            .as_ref()
            .map_or(0.0, |m| m.score * NAME_WEIGHT),
        content: if result.content_match { CONTENT_SCORE } else { 0.0 },
        recency: recency_score(result.document.modified_at, now),
    }
}

/// 按分数从高到低稳定排序
pub fn sort_results(results: &mut [RankedResult]) {
    results.sort_by(|a, b| b.score.total_cmp(&a.score));
}

/// 扫描存储中的全部文档并返回排序、截断后的结果
///
/// 读取失败的文档按不匹配处理，不会中断整个查询。
pub fn rank<S>(store: &S, query: &str, settings: &SearchSettings, now: SystemTime) -> Vec<RankedResult>
where
    S: DocumentStore + ?Sized,
{
    if !is_searchable(query) {
        return Vec::new();
    }

    let documents = store.list_documents();
    let scanned = documents.len();

    let mut results: Vec<RankedResult> = documents
        .par_iter()
        .filter_map(|document| {
            let text = match store.read_text(document) {
                Ok(text) => text,
                Err(e) => {
                    tracing::debug!("跳过无法读取的文档: {}", e);
                    return None;
                }
            };

            let result = evaluate(document, &text, query, settings.context_length);
            if !result.is_match() {
                return None;
            }

            let breakdown = score(&result, now);
            Some(RankedResult {
                result,
                score: breakdown.total(),
                breakdown,
            })
        })
        .collect();

    let matched = results.len();
    sort_results(&mut results);
    results.truncate(settings.max_results);

    tracing::debug!(
        "[排序] 查询 '{}': 扫描 {} 个文档, 命中 {}, 返回 {}",
        query,
        scanned,
        matched,
        results.len()
    );
    results
}
