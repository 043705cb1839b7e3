use super::Command;
use crate::cli::ConfigAction;
use crate::config::Config;
use crate::error::{Result, WrapErr};
use std::path::PathBuf;

pub struct ConfigCommand {
    config: Config,
    config_path: PathBuf,
    action: ConfigAction,
}

impl ConfigCommand {
    pub fn new(cfg: Config, config_path: PathBuf, action: ConfigAction) -> Self {
        Self {
            config: cfg,
            config_path,
            action,
        }
    }
}

#[async_trait::async_trait]
impl Command for ConfigCommand {
    async fn execute(&self) -> Result<()> {
        match &self.action {
            ConfigAction::Show => {
                print!("{}", toml::to_string_pretty(&self.config)?);
            }
            ConfigAction::Path => {
                println!("{}", self.config_path.display());
            }
            ConfigAction::Set { key, value } => {
                let mut cfg = self.config.clone();
                cfg.search
                    .apply(key, value)
                    .wrap_err_with(|| format!("Setting `{}` was not changed", key))?;
                cfg.save(&self.config_path)?;
                println!("{} = {}", key, cfg.search.get(key)?);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn saved_config() -> (TempDir, PathBuf, Config) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.vault_paths.push(PathBuf::from("/notes"));
        cfg.save(&path).unwrap();
        (dir, path, cfg)
    }

    fn set(key: &str, value: &str) -> ConfigAction {
        ConfigAction::Set {
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    #[tokio::test]
    async fn test_rejected_value_leaves_file_untouched() {
        let (_dir, path, cfg) = saved_config();
        let before = std::fs::read(&path).unwrap();

        for (key, value) in [("max-results", "0"), ("search-delay", "soon"), ("font-size", "12")] {
            let command = ConfigCommand::new(cfg.clone(), path.clone(), set(key, value));
            assert!(command.execute().await.is_err(), "{key} = {value}");
            assert_eq!(std::fs::read(&path).unwrap(), before);
        }
    }

    #[tokio::test]
    async fn test_accepted_value_is_written_back() {
        let (_dir, path, cfg) = saved_config();

        let command = ConfigCommand::new(cfg, path.clone(), set("max_results", "20"));
        command.execute().await.unwrap();

        let reloaded = Config::load(&path).unwrap();
        assert_eq!(reloaded.search.max_results, 20);
        assert_eq!(reloaded.vault_paths, vec![PathBuf::from("/notes")]);
    }

    #[tokio::test]
    async fn test_show_and_path_do_not_write() {
        let (_dir, path, cfg) = saved_config();
        let before = std::fs::read(&path).unwrap();

        for action in [ConfigAction::Show, ConfigAction::Path] {
            ConfigCommand::new(cfg.clone(), path.clone(), action)
                .execute()
                .await
                .unwrap();
        }
        assert_eq!(std::fs::read(&path).unwrap(), before);
    }
}
