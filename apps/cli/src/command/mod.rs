pub mod config;
pub mod search;
pub mod watch;

use crate::error::Result;

pub use config::ConfigCommand;
pub use search::SearchCommand;
pub use watch::WatchCommand;

#[async_trait::async_trait]
pub trait Command {
    async fn execute(&self) -> Result<()>;
}

/// 按配置和命令行参数打开笔记库
pub(crate) fn open_store(
    cfg: &crate::config::Config,
    roots: &[std::path::PathBuf],
) -> Result<search_core::FsDocumentStore> {
    let vault_paths = cfg.vault_paths_or(roots);
    if vault_paths.is_empty() {
        return Err(crate::error::error!(
            "No vault configured: pass --root or add vault-paths to the configuration file"
        ));
    }
    for path in &vault_paths {
        if !path.is_dir() {
            tracing::warn!("笔记库目录不存在: {}", path.display());
        }
    }
    Ok(search_core::FsDocumentStore::new(vault_paths).with_extensions(cfg.extensions.iter().cloned()))
}
