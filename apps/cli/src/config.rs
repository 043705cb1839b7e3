use crate::error::{Result, WrapErr};
use search_core::SearchSettings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default = "default_config", deny_unknown_fields)]
pub struct Config {
    /// 要搜索的笔记库目录列表
    pub vault_paths: Vec<PathBuf>,
    /// 笔记文件扩展名
    pub extensions: Vec<String>,
    pub search: SearchSettings,
}

fn default_config() -> Config {
    Config {
        vault_paths: vec![], // 默认为空，要求用户配置
        extensions: vec!["md".to_string()],
        search: SearchSettings::default(),
    }
}

impl Default for Config {
    fn default() -> Self {
        default_config()
    }
}

impl Config {
    fn load_str(user_config_str: &str) -> Result<Config> {
        let user_config: Config = toml::from_str(user_config_str)?;
        Ok(user_config)
    }

    /// 配置文件位置，`--config` 优先
    pub fn path(explicit: Option<&Path>) -> Result<PathBuf> {
        match explicit {
            Some(path) => Ok(path.to_path_buf()),
            None => Ok(config::config_file_path()?),
        }
    }

    pub fn load(config_path: &Path) -> Result<Config> {
        match std::fs::read_to_string(config_path) {
            Ok(user_config_str) => Self::load_str(&user_config_str)
                .wrap_err_with(|| format!("Invalid configuration file {}", config_path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // 配置文件不存在，创建示例配置文件
                Self::create_example_config(config_path)?;
                Self::load_str("")
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(config_path, toml::to_string_pretty(self)?)?;
        tracing::info!("配置已写入 {}", config_path.display());
        Ok(())
    }

    /// 命令行指定的目录优先于配置文件中的 vault-paths
    pub fn vault_paths_or(&self, overrides: &[PathBuf]) -> Vec<PathBuf> {
        if overrides.is_empty() {
            self.vault_paths.clone()
        } else {
            overrides.to_vec()
        }
    }

    fn create_example_config(config_path: &Path) -> Result<()> {
        use std::io::Write;

        // 确保配置目录存在
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let example_config = r#"# notesearch 配置文件
#
# 此文件在首次运行时自动创建

# 要搜索的笔记库目录列表
vault-paths = [
    # "/Users/yourname/Notes",
]

# 笔记文件扩展名
extensions = ["md"]

[search]
# 最后一次输入后等待多少毫秒再开始搜索
search-delay = 300
# 最多显示多少个结果
max-results = 50
# 是否显示内容摘录
show-preview = true
# 摘录中命中前后各保留的字符数
context-length = 100
"#;

        let mut file = std::fs::File::create(config_path)?;
        file.write_all(example_config.as_bytes())?;

        eprintln!("\n📝 已创建配置文件: {}", config_path.display());
        eprintln!("💡 请编辑配置文件，添加笔记库目录到 vault-paths\n");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_config_uses_defaults() {
        let cfg = Config::load_str("").unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn test_invalid_search_values_fall_back() {
        let cfg = Config::load_str(
            r#"
            vault-paths = ["/notes"]

            [search]
            max-results = 0
            context-length = 40
            "#,
        )
        .unwrap();

        assert_eq!(cfg.vault_paths, vec![PathBuf::from("/notes")]);
        assert_eq!(cfg.search.max_results, 50);
        assert_eq!(cfg.search.context_length, 40);
    }

    #[test]
    fn test_unknown_top_level_key_is_rejected() {
        assert!(Config::load_str("watch-paths = []").is_err());
    }

    #[test]
    fn test_load_creates_example_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let cfg = Config::load(&path).unwrap();
        assert!(path.exists());
        assert_eq!(cfg, Config::default());

        // 示例文件本身也必须是合法配置
        let reloaded = Config::load(&path).unwrap();
        assert_eq!(reloaded, Config::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut cfg = Config::default();
        cfg.vault_paths.push(PathBuf::from("/notes"));
        cfg.search.apply("search-delay", "120").unwrap();
        cfg.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), cfg);
    }

    #[test]
    fn test_vault_paths_override() {
        let mut cfg = Config::default();
        cfg.vault_paths.push(PathBuf::from("/notes"));

        assert_eq!(cfg.vault_paths_or(&[]), vec![PathBuf::from("/notes")]);
        assert_eq!(
            cfg.vault_paths_or(&[PathBuf::from("/other")]),
            vec![PathBuf::from("/other")]
        );
    }
}
