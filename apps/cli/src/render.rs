//! 终端输出

use chrono::{DateTime, Local};
use search_core::{FsDocumentStore, HighlightSpans, RankedResult};
use std::fmt::{self, Write};
use std::time::SystemTime;

/// 高亮方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// 终端粗体黄色
    Ansi,
    /// 非终端输出时用 `[` `]` 包住命中
    Brackets,
}

impl Marker {
    pub fn detect() -> Self {
        use std::io::IsTerminal;
        if std::io::stdout().is_terminal() {
            Marker::Ansi
        } else {
            Marker::Brackets
        }
    }

    fn open(self) -> &'static str {
        match self {
            Marker::Ansi => "\x1b[1;33m",
            Marker::Brackets => "[",
        }
    }

    fn close(self) -> &'static str {
        match self {
            Marker::Ansi => "\x1b[0m",
            Marker::Brackets => "]",
        }
    }
}

pub fn system_time_to_local_string(time: SystemTime) -> String {
    let local_time: DateTime<Local> = time.into();
    local_time.format("%Y-%m-%d %H:%M:%S").to_string()
}

pub fn highlight_spans(spans: &HighlightSpans<'_>, marker: Marker) -> String {
    if !spans.is_highlighted() {
        return spans.before.to_string();
    }
    format!(
        "{}{}{}{}{}",
        spans.before,
        marker.open(),
        spans.matched,
        marker.close(),
        spans.after
    )
}

/// 高亮文件名中模糊匹配到的字符，`positions` 是字符下标
pub fn highlight_positions(name: &str, positions: &[usize], marker: Marker) -> String {
    let mut out = String::with_capacity(name.len());
    let mut inside = false;
    for (i, ch) in name.chars().enumerate() {
        let hit = positions.contains(&i);
        if hit && !inside {
            out.push_str(marker.open());
        } else if !hit && inside {
            out.push_str(marker.close());
        }
        inside = hit;
        out.push(ch);
    }
    if inside {
        out.push_str(marker.close());
    }
    out
}

/// 渲染单个结果，`store` 用于把图片链接解析成实际文件
pub fn render_result(
    index: usize,
    hit: &RankedResult,
    show_preview: bool,
    store: Option<&FsDocumentStore>,
    marker: Marker,
) -> Result<String, fmt::Error> {
    let mut out = String::new();
    let name = match &hit.result.name_match {
        Some(m) => highlight_positions(hit.name(), &m.positions, marker),
        None => hit.name().to_string(),
    };

    writeln!(out, "{:>3}. {}  (score {:.2})", index + 1, name, hit.score)?;
    writeln!(out, "     {}", hit.path().display())?;
    writeln!(
        out,
        "     modified {}",
        system_time_to_local_string(hit.result.document.modified_at)
    )?;

    if show_preview && let Some(excerpt) = hit.excerpt() {
        writeln!(out, "     {}", highlight_spans(&excerpt.spans(), marker))?;
    }

    if let Some(image) = hit.image() {
        match store.and_then(|s| s.resolve_link(image, &hit.result.document)) {
            Some(path) => writeln!(out, "     image {}", path.display())?,
            None => writeln!(out, "     image {} (unresolved)", image)?,
        }
    }
    Ok(out)
}
