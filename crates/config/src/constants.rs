pub const TOP_LEVEL_DOMAIN: &str = "org";
pub const AUTHOR: &str = "notesearch";
pub const APP_NAME: &str = "notesearch";

pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const CONFIG_DIR_ENV: &str = "NOTESEARCH_CONFIG_DIR";
