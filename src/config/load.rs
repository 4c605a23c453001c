use crate::config::types::{Config, UserSettings};
use anyhow::{Context, Result};
use log::warn;
use std::fs;
use std::path::Path;

const SETTINGS_FILE: &str = "settings.json";

impl Config {
    /// 讀取工作目錄下的 settings.json；不存在或格式錯誤時使用預設值
    #[must_use]
    pub fn new() -> Self {
        let settings = match Self::load_settings(Path::new(SETTINGS_FILE)) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("設定檔讀取失敗，使用預設值: {e:#}");
                UserSettings::default()
            }
        };

        Self { settings }
    }

    pub fn load_settings(path: &Path) -> Result<UserSettings> {
        if !path.exists() {
            return Ok(UserSettings::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings from {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ExitCodePolicy, Language};
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_settings() {
        let temp_dir = TempDir::new().unwrap();
        let settings = Config::load_settings(&temp_dir.path().join("settings.json")).unwrap();
        assert_eq!(settings.exit_code_policy, ExitCodePolicy::Check);
    }

    #[test]
    fn test_load_settings_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        fs::write(&path, r#"{ "language": "ja", "exit_code_policy": "ignore" }"#).unwrap();

        let settings = Config::load_settings(&path).unwrap();
        assert_eq!(settings.language, Language::Ja);
        assert_eq!(settings.exit_code_policy, ExitCodePolicy::Ignore);
    }

    #[test]
    fn test_load_broken_settings() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(Config::load_settings(&path).is_err());
    }
}
