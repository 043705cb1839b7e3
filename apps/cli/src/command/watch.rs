use super::{Command, open_store};
use crate::config::Config;
use crate::error::Result;
use crate::render::{Marker, render_result};
use search_core::{DocumentStore, FsDocumentStore, QuerySession, SessionSnapshot};
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

/// 把标准输入的每一行当作一次按键后的查询框内容
pub struct WatchCommand {
    config: Config,
    roots: Vec<PathBuf>,
}

impl WatchCommand {
    pub fn new(cfg: Config, roots: Vec<PathBuf>) -> Self {
        Self { config: cfg, roots }
    }
}

fn print_snapshot(snapshot: &SessionSnapshot, show_preview: bool, store: &FsDocumentStore) -> Result<()> {
    let marker = Marker::detect();
    println!(
        "── #{} '{}': {} result(s)",
        snapshot.generation,
        snapshot.query,
        snapshot.results.len()
    );
    for (i, hit) in snapshot.results.iter().enumerate() {
        print!("{}", render_result(i, hit, show_preview, Some(store), marker)?);
    }
    Ok(())
}

/// 逐行提交查询并把发布的结果交给 `on_snapshot`
///
/// 输入结束后等到最后一次提交的查询发布结果再返回。
async fn drive<S, R, F>(session: &QuerySession<S>, input: R, mut on_snapshot: F) -> Result<()>
where
    S: DocumentStore + 'static,
    R: AsyncBufRead + Unpin,
    F: FnMut(&SessionSnapshot) -> Result<()>,
{
    let mut updates = session.subscribe();
    let mut lines = input.lines();

    let mut last_submitted = session.current_generation();
    let mut input_open = true;

    loop {
        tokio::select! {
            line = lines.next_line(), if input_open => match line? {
                Some(line) => {
                    last_submitted = session.submit(line);
                    tracing::debug!("提交查询 generation={}", last_submitted);
                }
                None => {
                    input_open = false;
                    if session.snapshot().generation >= last_submitted {
                        break;
                    }
                }
            },
            changed = updates.changed() => {
                changed?;
                let snapshot = updates.borrow_and_update().clone();
                on_snapshot(&snapshot)?;
                if !input_open && snapshot.generation >= last_submitted {
                    break;
                }
            }
        }
    }

    Ok(())
}

#[async_trait::async_trait]
impl Command for WatchCommand {
    async fn execute(&self) -> Result<()> {
        let store = open_store(&self.config, &self.roots)?;
        let settings = self.config.search.clone();
        let show_preview = settings.show_preview;

        let session = QuerySession::new(store.clone(), settings);
        let stdin = BufReader::new(tokio::io::stdin());
        drive(&session, stdin, |snapshot| print_snapshot(snapshot, show_preview, &store)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use search_core::{Document, MemoryStore, SearchSettings};
    use std::time::SystemTime;

    fn store() -> MemoryStore {
        let mut store = MemoryStore::new();
        store
            .insert(Document::new("search.md", SystemTime::UNIX_EPOCH), "tips")
            .insert(Document::new("other.md", SystemTime::UNIX_EPOCH), "search inside");
        store
    }

    #[tokio::test(start_paused = true)]
    async fn test_stops_after_last_query_is_published() {
        let session = QuerySession::new(store(), SearchSettings::default());
        let mut seen = Vec::new();

        drive(&session, &b"se\nsea\nsearch\n"[..], |snapshot| {
            seen.push(snapshot.clone());
            Ok(())
        })
        .await
        .unwrap();

        // 前两次按键被后一次取代，只发布最后一代
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].generation, 3);
        assert_eq!(seen[0].query, "search");
        assert_eq!(seen[0].results.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_input_returns_immediately() {
        let session = QuerySession::new(store(), SearchSettings::default());
        let mut seen = 0;

        drive(&session, &b""[..], |_| {
            seen += 1;
            Ok(())
        })
        .await
        .unwrap();

        assert_eq!(seen, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_short_last_query_still_finishes() {
        let session = QuerySession::new(store(), SearchSettings::default());
        let mut seen = Vec::new();

        drive(&session, &b"search\ns\n"[..], |snapshot| {
            seen.push(snapshot.generation);
            Ok(())
        })
        .await
        .unwrap();

        assert_eq!(seen, vec![2]);
        assert!(session.snapshot().results.is_empty());
    }
}
