use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Increase verbosity. Can be used multiple times (e.g., -v, -vv, -vvv).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search the vault once and print ranked results
    Search {
        /// 查询文本，少于两个字符时没有结果
        query: String,
        /// 笔记库目录（可多次指定，不提供则使用配置文件中的 vault-paths）
        #[arg(short, long)]
        root: Vec<PathBuf>,
        /// Override `max-results` for this search
        #[arg(short, long)]
        limit: Option<usize>,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Read queries from stdin, one per line, as if typed into a search box
    Watch {
        /// 笔记库目录（可多次指定）
        #[arg(short, long)]
        root: Vec<PathBuf>,
    },
    /// Show or change settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Print the configuration file location
    Path,
    /// Change one search setting, e.g. `config set max-results 20`
    Set { key: String, value: String },
}
