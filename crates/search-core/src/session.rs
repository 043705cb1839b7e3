// search-core/src/session.rs
//! 查询会话管理模块
//!
//! 每次 `submit` 生成一个新的查询代数（generation），并取消上一代还没开始的扫描。
//! 扫描在防抖延迟之后开始；结果只有在发布时仍属于最新一代才会写入会话，
//! 因此先提交、后完成的旧查询不会覆盖新查询的结果。

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use std::time::SystemTime;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::config::SearchSettings;
use crate::models::RankedResult;
use crate::ranking::rank;
use crate::store::DocumentStore;

/// 查询代数，单调递增，0 表示还没有任何查询
pub type Generation = u64;

/// 某一代查询发布的结果
#[derive(Debug, Clone, Default)]
pub struct SessionSnapshot {
    pub generation: Generation,
    pub query: String,
    pub results: Arc<Vec<RankedResult>>,
}

struct SessionState {
    generation: Generation,
    query: String,
    pending: Option<JoinHandle<()>>,
}

struct Shared<S> {
    store: S,
    settings: RwLock<SearchSettings>,
    state: Mutex<SessionState>,
    updates: watch::Sender<SessionSnapshot>,
}

impl<S> Shared<S> {
    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// 只有仍是最新一代时才发布，返回是否发布成功
    fn publish(&self, snapshot: SessionSnapshot) -> bool {
        let state = self.state();
        if state.generation != snapshot.generation {
            tracing::debug!(
                "[会话] 丢弃过期结果: generation={} (当前 {})",
                snapshot.generation,
                state.generation
            );
            return false;
        }
        // 持锁发送，保证与 submit 的代数递增互斥
        self.updates.send_replace(snapshot);
        true
    }
}

/// 查询会话
pub struct QuerySession<S> {
    shared: Arc<Shared<S>>,
}

impl<S> QuerySession<S>
where
    S: DocumentStore + 'static,
{
    pub fn new(store: S, settings: SearchSettings) -> Self {
        let (updates, _) = watch::channel(SessionSnapshot::default());
        Self {
            shared: Arc::new(Shared {
                store,
                settings: RwLock::new(settings),
                state: Mutex::new(SessionState {
                    generation: 0,
                    query: String::new(),
                    pending: None,
                }),
                updates,
            }),
        }
    }

    /// 提交新的查询文本，返回本次查询的代数
    ///
    /// 必须在 tokio 运行时中调用。扫描会在 `search_delay` 之后开始，
    /// 期间再次提交会取消本次扫描并重新计时。
    pub fn submit(&self, raw_query: impl Into<String>) -> Generation {
        let query = raw_query.into();
        let settings = self.settings();

        let mut state = self.shared.state();
        state.generation += 1;
        state.query.clone_from(&query);
        let generation = state.generation;

        if let Some(previous) = state.pending.take() {
            previous.abort();
        }

        let shared = Arc::clone(&self.shared);
        state.pending = Some(tokio::spawn(async move {
            let delay = settings.search_delay();
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            if shared.state().generation != generation {
                return;
            }

            let scan = Arc::clone(&shared);
            let scan_query = query.clone();
            let ranked = tokio::task::spawn_blocking(move || {
                rank(&scan.store, &scan_query, &settings, SystemTime::now())
            })
            .await;

            // 扫描失败时这一代发布空结果
            let results = match ranked {
                Ok(results) => results,
                Err(e) => {
                    tracing::warn!("[会话] generation={} 扫描任务失败: {}", generation, e);
                    Vec::new()
                }
            };

            tracing::debug!(
                "[会话] generation={} 查询 '{}' 得到 {} 个结果",
                generation,
                query,
                results.len()
            );
            shared.publish(SessionSnapshot {
                generation,
                query,
                results: Arc::new(results),
            });
        }));

        generation
    }

    /// 取消正在等待或进行中的查询，已发布的结果保持不变
    pub fn cancel(&self) {
        let mut state = self.shared.state();
        state.generation += 1;
        if let Some(pending) = state.pending.take() {
            pending.abort();
        }
    }
}

impl<S> QuerySession<S> {
    pub fn current_query(&self) -> String {
        self.shared.state().query.clone()
    }

    pub fn current_generation(&self) -> Generation {
        self.shared.state().generation
    }

    /// 最近一次发布的结果
    pub fn snapshot(&self) -> SessionSnapshot {
        self.shared.updates.borrow().clone()
    }

    /// 订阅结果发布
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.shared.updates.subscribe()
    }

    pub fn settings(&self) -> SearchSettings {
        self.shared
            .settings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// 替换设置，下一次 `submit` 生效
    pub fn update_settings(&self, settings: SearchSettings) {
        *self
            .shared
            .settings
            .write()
            .unwrap_or_else(PoisonError::into_inner) = settings;
    }
}

impl<S> Drop for QuerySession<S> {
    fn drop(&mut self) {
        if let Some(pending) = self.shared.state().pending.take() {
            pending.abort();
        }
    }
}
