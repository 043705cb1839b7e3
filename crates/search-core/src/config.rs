// search-core/src/config.rs
//! 配置模块
//!
//! 搜索设置只在边界处校验：非法值被拒绝，原值保留，不会有错误进入排序流程。

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SearchError};

pub const DEFAULT_SEARCH_DELAY_MS: u64 = 300;
pub const DEFAULT_MAX_RESULTS: usize = 50;
pub const DEFAULT_SHOW_PREVIEW: bool = true;
pub const DEFAULT_CONTEXT_LENGTH: usize = 100;

/// 搜索设置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", from = "toml::Table")]
pub struct SearchSettings {
    /// 最后一次输入到开始扫描之间的延迟（毫秒）
    pub search_delay: u64,
    pub max_results: usize,
    pub show_preview: bool,
    /// 摘录中命中前后各保留的字符数
    pub context_length: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            search_delay: DEFAULT_SEARCH_DELAY_MS,
            max_results: DEFAULT_MAX_RESULTS,
            show_preview: DEFAULT_SHOW_PREVIEW,
            context_length: DEFAULT_CONTEXT_LENGTH,
        }
    }
}

impl SearchSettings {
    pub const KEYS: [&'static str; 4] = [
        "search-delay",
        "max-results",
        "show-preview",
        "context-length",
    ];

    pub fn search_delay(&self) -> Duration {
        Duration::from_millis(self.search_delay)
    }

    /// 设置单个字段，值以字符串形式给出
    ///
    /// 键名接受 kebab-case 和 snake_case。失败时当前值不变。
    pub fn apply(&mut self, key: &str, raw: &str) -> Result<()> {
        let value = raw.trim();
        match normalize_key(key).as_str() {
            "search-delay" => {
                self.search_delay = parse_integer(key, value, 0)?;
            }
            "max-results" => {
                self.max_results = parse_integer(key, value, 1)?;
            }
            "context-length" => {
                self.context_length = parse_integer(key, value, 1)?;
            }
            "show-preview" => {
                self.show_preview = value.parse().map_err(|_| SearchError::InvalidSetting {
                    key: key.to_string(),
                    value: raw.to_string(),
                    reason: "expected `true` or `false`",
                })?;
            }
            _ => return Err(SearchError::UnknownSetting(key.to_string())),
        }
        Ok(())
    }

    /// 读取单个字段的当前值
    pub fn get(&self, key: &str) -> Result<String> {
        match normalize_key(key).as_str() {
            "search-delay" => Ok(self.search_delay.to_string()),
            "max-results" => Ok(self.max_results.to_string()),
            "context-length" => Ok(self.context_length.to_string()),
            "show-preview" => Ok(self.show_preview.to_string()),
            _ => Err(SearchError::UnknownSetting(key.to_string())),
        }
    }

    /// 把表中的值逐项合并到默认值上，非法或未知的项记录警告后跳过
    pub fn from_table(table: &toml::Table) -> Self {
        let mut settings = Self::default();
        for (key, value) in table {
            let raw = match value {
                toml::Value::String(s) => s.clone(),
                toml::Value::Integer(i) => i.to_string(),
                toml::Value::Float(f) => f.to_string(),
                toml::Value::Boolean(b) => b.to_string(),
                other => {
                    tracing::warn!("设置项 `{}` 的类型不受支持: {}", key, other.type_str());
                    continue;
                }
            };
            if let Err(e) = settings.apply(key, &raw) {
                tracing::warn!("忽略设置项: {}", e);
            }
        }
        settings
    }

    /// 从 TOML 文本加载，语法错误返回错误，单项非法值只跳过该项
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let table: toml::Table = toml::from_str(content)?;
        Ok(Self::from_table(&table))
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl From<toml::Table> for SearchSettings {
    fn from(table: toml::Table) -> Self {
        Self::from_table(&table)
    }
}

fn normalize_key(key: &str) -> String {
    key.trim().replace('_', "-").to_ascii_lowercase()
}

fn parse_integer<T>(key: &str, value: &str, min: T) -> Result<T>
where
    T: std::str::FromStr + PartialOrd,
{
    let invalid = |reason| SearchError::InvalidSetting {
        key: key.to_string(),
        value: value.to_string(),
        reason,
    };
    let parsed: T = value
        .parse()
        .map_err(|_| invalid("expected a non-negative integer"))?;
    if parsed < min {
        return Err(invalid("value is below the allowed minimum"));
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_defaults() {
        let settings = SearchSettings::default();
        assert_eq!(settings.search_delay(), Duration::from_millis(300));
        assert_eq!(settings.max_results, 50);
        assert!(settings.show_preview);
        assert_eq!(settings.context_length, 100);
    }

    #[rstest]
    #[case("search-delay", "0", "0")]
    #[case("search_delay", "150", "150")]
    #[case("max-results", "10", "10")]
    #[case("context-length", " 40 ", "40")]
    #[case("show-preview", "false", "false")]
    fn test_apply_valid(#[case] key: &str, #[case] raw: &str, #[case] expected: &str) {
        let mut settings = SearchSettings::default();
        settings.apply(key, raw).unwrap();
        assert_eq!(settings.get(key).unwrap(), expected);
    }

    #[rstest]
    #[case("search-delay", "-1")]
    #[case("search-delay", "soon")]
    #[case("max-results", "0")]
    #[case("max-results", "2.5")]
    #[case("context-length", "0")]
    #[case("context-length", "")]
    #[case("show-preview", "maybe")]
    fn test_apply_invalid_keeps_previous(#[case] key: &str, #[case] raw: &str) {
        let mut settings = SearchSettings::default();
        let before = settings.clone();
        let err = settings.apply(key, raw).unwrap_err();
        assert!(matches!(err, SearchError::InvalidSetting { .. }));
        assert_eq!(settings, before);
    }

    #[test]
    fn test_unknown_key() {
        let mut settings = SearchSettings::default();
        assert!(matches!(
            settings.apply("font-size", "12"),
            Err(SearchError::UnknownSetting(_))
        ));
    }

    #[test]
    fn test_from_toml_merges_over_defaults() {
        let settings = SearchSettings::from_toml_str(
            r#"
            max-results = 20
            context-length = 0
            show-preview = "false"
            theme = "dark"
            "#,
        )
        .unwrap();

        assert_eq!(settings.max_results, 20);
        assert_eq!(settings.context_length, DEFAULT_CONTEXT_LENGTH);
        assert!(!settings.show_preview);
        assert_eq!(settings.search_delay, DEFAULT_SEARCH_DELAY_MS);
    }

    #[test]
    fn test_toml_round_trip_through_serde() {
        let mut settings = SearchSettings::default();
        settings.apply("max-results", "7").unwrap();
        let text = settings.to_toml_string().unwrap();
        assert!(text.contains("max-results = 7"));
        let loaded: SearchSettings = toml::from_str(&text).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_syntax_error_is_reported() {
        assert!(matches!(
            SearchSettings::from_toml_str("max-results = "),
            Err(SearchError::Parse(_))
        ));
    }
}
