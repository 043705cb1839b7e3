// search-core/src/store.rs
//! 文档存储
//!
//! 核心只通过 [`DocumentStore`] 读取文档：枚举文档句柄、读取全文。
//! 提供两个实现：遍历目录的 [`FsDocumentStore`] 和用于测试/嵌入的 [`MemoryStore`]。

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use ignore::WalkBuilder;

use crate::error::{Result, SearchError};
use crate::models::Document;

/// 文档存储接口
pub trait DocumentStore: Send + Sync {
    /// 枚举全部文档，顺序即排序时的并列顺序
    fn list_documents(&self) -> Vec<Document>;

    /// 读取文档全文，无法读取时返回 [`SearchError::Io`]
    fn read_text(&self, document: &Document) -> Result<String>;
}

impl<S: DocumentStore + ?Sized> DocumentStore for std::sync::Arc<S> {
    fn list_documents(&self) -> Vec<Document> {
        (**self).list_documents()
    }

    fn read_text(&self, document: &Document) -> Result<String> {
        (**self).read_text(document)
    }
}

// ============== 内存存储 ==============

/// 内存文档存储
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    documents: Vec<Document>,
    texts: HashMap<PathBuf, Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, document: Document, text: impl Into<String>) -> &mut Self {
        self.texts.insert(document.path.clone(), Some(text.into()));
        self.documents.push(document);
        self
    }

    /// 插入一个读取时总是失败的文档
    pub fn insert_unreadable(&mut self, document: Document) -> &mut Self {
        self.texts.insert(document.path.clone(), None);
        self.documents.push(document);
        self
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl DocumentStore for MemoryStore {
    fn list_documents(&self) -> Vec<Document> {
        self.documents.clone()
    }

    fn read_text(&self, document: &Document) -> Result<String> {
        match self.texts.get(&document.path) {
            Some(Some(text)) => Ok(text.clone()),
            Some(None) => Err(SearchError::io(
                &document.path,
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "document is unreadable"),
            )),
            None => Err(SearchError::io(
                &document.path,
                std::io::Error::from(std::io::ErrorKind::NotFound),
            )),
        }
    }
}

// ============== 文件系统存储 ==============

/// 遍历一个或多个笔记库目录的文档存储
#[derive(Debug, Clone)]
pub struct FsDocumentStore {
    roots: Vec<PathBuf>,
    extensions: Vec<String>,
}

impl FsDocumentStore {
    pub fn new(roots: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
            extensions: vec!["md".to_string()],
        }
    }

    pub fn with_extensions(mut self, extensions: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.extensions = extensions
            .into_iter()
            .map(|ext| ext.into().trim_start_matches('.').to_ascii_lowercase())
            .collect();
        self
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    fn is_supported(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
            .unwrap_or(false)
    }

    fn walk(&self, root: &Path) -> impl Iterator<Item = PathBuf> {
        let mut builder = WalkBuilder::new(root);
        builder
            .hidden(true)
            .git_ignore(true)
            .require_git(false)
            .follow_links(false);

        builder
            .build()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::debug!("跳过无法访问的路径: {}", e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
            .map(|entry| entry.into_path())
    }

    /// 解析笔记中的图片链接
    ///
    /// 依次尝试：相对于笔记所在目录、相对于各个库根目录、按文件名在库中唯一匹配。
    /// 链接中的 `|尺寸` 和 `#锚点` 后缀会被去掉。
    pub fn resolve_link(&self, link: &str, from: &Document) -> Option<PathBuf> {
        let link = link.split(['|', '#']).next().unwrap_or(link).trim();
        if link.is_empty() || link.contains("://") {
            return None;
        }

        let link_path = Path::new(link);
        if link_path.is_absolute() {
            return link_path.is_file().then(|| link_path.to_path_buf());
        }

        let candidates = from
            .path
            .parent()
            .into_iter()
            .chain(self.roots.iter().map(PathBuf::as_path))
            .map(|base| base.join(link_path));
        for candidate in candidates {
            if candidate.is_file() {
                return Some(candidate);
            }
        }

        let file_name = link_path.file_name()?;
        let mut found = self
            .roots
            .iter()
            .flat_map(|root| self.walk(root))
            .filter(|path| path.file_name() == Some(file_name));
        let first = found.next()?;
        if found.next().is_some() {
            tracing::debug!("图片链接 '{}' 匹配到多个文件，无法确定", link);
            return None;
        }
        Some(first)
    }
}

impl DocumentStore for FsDocumentStore {
    fn list_documents(&self) -> Vec<Document> {
        let mut documents = Vec::new();

        for root in &self.roots {
            for path in self.walk(root) {
                if !self.is_supported(&path) {
                    continue;
                }
                let modified_at = match fs::metadata(&path).and_then(|m| m.modified()) {
                    Ok(time) => time,
                    Err(e) => {
                        tracing::debug!("无法读取修改时间 {:?}: {}", path, e);
                        SystemTime::UNIX_EPOCH
                    }
                };
                documents.push(Document::new(path, modified_at));
            }
        }

        documents.sort_by(|a, b| a.path.cmp(&b.path));
        documents.dedup_by(|a, b| a.path == b.path);
        tracing::debug!("共枚举到 {} 个文档", documents.len());
        documents
    }

    fn read_text(&self, document: &Document) -> Result<String> {
        read_text_with_encoding_detection(&document.path)
    }
}

/// 读取文本文件（自动检测编码）
fn read_text_with_encoding_detection(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| SearchError::io(path, e))?;

    // 带 BOM 的文件（UTF-8 / UTF-16）直接按 BOM 解码
    if let Some((encoding, bom_len)) = Encoding::for_bom(&bytes) {
        tracing::debug!("文件 {:?} 带 {} BOM", path, encoding.name());
        let (decoded, _) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        return Ok(decoded.into_owned());
    }

    let bytes = match String::from_utf8(bytes) {
        Ok(text) => return Ok(text),
        Err(e) => e.into_bytes(),
    };

    let mut detector = EncodingDetector::new();
    detector.feed(&bytes, true);
    let encoding = detector.guess(None, true);

    let (decoded, encoding_used, had_errors) = encoding.decode(&bytes);
    if had_errors {
        tracing::warn!("文件 {:?} 使用 {} 解码时有部分错误", path, encoding_used.name());
    } else {
        tracing::debug!("文件 {:?} 使用 {} 编码", path, encoding_used.name());
    }

    Ok(decoded.into_owned())
}
