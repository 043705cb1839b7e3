use super::{Command, open_store};
use crate::config::Config;
use crate::error::{Result, WrapErr};
use crate::render::{Marker, render_result};
use search_core::SearchSettings;
use std::path::PathBuf;
use std::time::SystemTime;

pub struct SearchCommand {
    config: Config,
    query: String,
    roots: Vec<PathBuf>,
    limit: Option<usize>,
    json: bool,
}

impl SearchCommand {
    pub fn new(cfg: Config, query: String, roots: Vec<PathBuf>, limit: Option<usize>, json: bool) -> Self {
        Self {
            config: cfg,
            query,
            roots,
            limit,
            json,
        }
    }

    /// 配置中的设置，`--limit` 按 max-results 的规则校验后覆盖
    fn settings(&self) -> Result<SearchSettings> {
        let mut settings = self.config.search.clone();
        if let Some(limit) = self.limit {
            settings
                .apply("max-results", &limit.to_string())
                .wrap_err("Invalid --limit")?;
        }
        Ok(settings)
    }
}

#[async_trait::async_trait]
impl Command for SearchCommand {
    async fn execute(&self) -> Result<()> {
        let settings = self.settings()?;
        let store = open_store(&self.config, &self.roots)?;

        let query = self.query.clone();
        let scan_settings = settings.clone();
        let (store, results) = tokio::task::spawn_blocking(move || {
            let results = search_core::rank(&store, &query, &scan_settings, SystemTime::now());
            (store, results)
        })
        .await?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&results)?);
            return Ok(());
        }

        if results.is_empty() {
            if !search_core::ranking::is_searchable(&self.query) {
                eprintln!(
                    "Query must be at least {} characters long",
                    search_core::MIN_QUERY_LEN
                );
            } else {
                eprintln!("No matching notes");
            }
            return Ok(());
        }

        let marker = Marker::detect();
        for (i, hit) in results.iter().enumerate() {
            print!("{}", render_result(i, hit, settings.show_preview, Some(&store), marker)?);
        }
        Ok(())
    }
}
