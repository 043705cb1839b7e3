// search-core/src/error.rs
//! 错误类型

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, SearchError>;

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// 文档无法读取（扫描时视为不匹配）
    #[error("failed to read document {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 配置值不合法，原值保留
    #[error("invalid value {value:?} for setting `{key}`: {reason}")]
    InvalidSetting {
        key: String,
        value: String,
        reason: &'static str,
    },

    #[error("unknown setting `{0}`")]
    UnknownSetting(String),

    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl SearchError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
