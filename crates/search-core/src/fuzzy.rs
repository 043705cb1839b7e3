// search-core/src/fuzzy.rs
//! 文件名模糊匹配
//!
//! 查询中的每个字符都必须按顺序出现在候选字符串中（不要求连续，大小写无关）。
//! 对齐由 skim 匹配器在全部可能的对齐方式中选出得分最高的一种，
//! 它的得分已经包含连续段、词首（开头、分隔符之后、驼峰大写）和间隔惩罚。
//! 在此基础上再加：
//! - 基础分：只要匹配就有，保证结果非负
//! - 密度：查询长度 / 候选长度
//! - 起始位置：越靠前越高

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;
use serde::Serialize;

const BASE_SCORE: f64 = 1.0;
/// skim 中单个字符匹配的基础得分，用来把原始得分归一化到每个查询字符
const SKIM_SCORE_PER_CHAR: f64 = 16.0;
const DENSITY_WEIGHT: f64 = 1.0;
const EARLY_START_WEIGHT: f64 = 0.5;

/// 模糊匹配结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuzzyMatch {
    pub score: f64,
    /// 候选字符串中被匹配的字符下标（按字符计，不是字节）
    pub positions: Vec<usize>,
}

/// 对候选字符串做模糊匹配，查询不是候选的子序列时返回 `None`
pub fn fuzzy_match(query: &str, candidate: &str) -> Option<FuzzyMatch> {
    let query_len = query.chars().count();
    let candidate_len = candidate.chars().count();
    if query_len == 0 || query_len > candidate_len {
        return None;
    }

    let matcher = SkimMatcherV2::default().ignore_case();
    let (raw, positions) = matcher.fuzzy_indices(candidate, query)?;
    let first = *positions.first()?;

    let score = BASE_SCORE
        + raw.max(0) as f64 / (SKIM_SCORE_PER_CHAR * query_len as f64)
        + DENSITY_WEIGHT * query_len as f64 / candidate_len as f64
        + EARLY_START_WEIGHT * (1.0 - first as f64 / candidate_len as f64);

    Some(FuzzyMatch { score, positions })
}
