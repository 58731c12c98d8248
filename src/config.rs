use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::importer::DEFAULT_SOURCE_APPLICATION;
use crate::process::DEFAULT_PROCESS_NAME;
use crate::repair::RecoveryPolicy;
use crate::shortcut::{ShortcutAlphabet, MACCY_SHORTCUT_KEYS};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct PinConfig {
    pub database: Option<String>,
    pub backup: Option<String>,
    pub shortcut_keys: Option<String>,
    pub source_application: Option<String>,
    pub process_name: Option<String>,
    pub recovery: Option<RecoveryPolicy>,
}

impl PinConfig {
    /// Config with every field filled from the built-in defaults
    pub fn with_defaults() -> Self {
        let database = default_database_path();
        Self {
            backup: Some(default_backup_path(&database).display().to_string()),
            database: Some(database.display().to_string()),
            shortcut_keys: Some(MACCY_SHORTCUT_KEYS.to_string()),
            source_application: Some(DEFAULT_SOURCE_APPLICATION.to_string()),
            process_name: Some(DEFAULT_PROCESS_NAME.to_string()),
            recovery: Some(RecoveryPolicy::default()),
        }
    }

    pub fn database_path(&self) -> PathBuf {
        self.database
            .as_deref()
            .map(expand_home)
            .unwrap_or_else(default_database_path)
    }

    pub fn backup_path(&self) -> PathBuf {
        self.backup
            .as_deref()
            .map(expand_home)
            .unwrap_or_else(|| default_backup_path(&self.database_path()))
    }

    pub fn alphabet(&self) -> crate::Result<ShortcutAlphabet> {
        match self.shortcut_keys.as_deref() {
            Some(keys) => ShortcutAlphabet::parse(keys),
            None => Ok(ShortcutAlphabet::maccy()),
        }
    }

    pub fn source_application(&self) -> &str {
        self.source_application
            .as_deref()
            .unwrap_or(DEFAULT_SOURCE_APPLICATION)
    }

    pub fn process_name(&self) -> &str {
        self.process_name.as_deref().unwrap_or(DEFAULT_PROCESS_NAME)
    }

    pub fn recovery(&self) -> RecoveryPolicy {
        self.recovery.unwrap_or_default()
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("maccy-pins.toml")
}

/// `~/Library/Application Support/Maccy/Storage.sqlite` on macOS
pub fn default_database_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Maccy")
        .join("Storage.sqlite")
}

/// `Storage.sqlite` -> `Storage.sqlite.backup`, next to the store
pub fn default_backup_path(db_path: &Path) -> PathBuf {
    let mut name = db_path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "Storage.sqlite".into());
    name.push(".backup");
    db_path.with_file_name(name)
}

fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| PathBuf::from(path)),
        None => PathBuf::from(path),
    }
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<PinConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: PinConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &PinConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_is_none() {
        let dir = TempDir::new().unwrap();
        let loaded = load_config(Some(&dir.path().join("absent.toml"))).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_write_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("maccy-pins.toml");
        let config = PinConfig {
            database: Some("/tmp/Storage.sqlite".to_string()),
            shortcut_keys: Some("bcd".to_string()),
            recovery: Some(RecoveryPolicy::Report),
            ..Default::default()
        };

        write_config(&path, &config, false).unwrap();
        assert!(write_config(&path, &config, false).is_err());
        write_config(&path, &config, true).unwrap();

        let loaded = load_config(Some(&path)).unwrap().unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.alphabet().unwrap().len(), 3);
        assert_eq!(loaded.recovery(), RecoveryPolicy::Report);
        assert_eq!(
            loaded.backup_path(),
            PathBuf::from("/tmp/Storage.sqlite.backup")
        );
    }

    #[test]
    fn test_defaults() {
        let config = PinConfig::default();
        assert_eq!(config.alphabet().unwrap(), ShortcutAlphabet::maccy());
        assert_eq!(config.source_application(), "com.maccy.import");
        assert_eq!(config.process_name(), "Maccy");
        assert_eq!(config.recovery(), RecoveryPolicy::Title);
        assert!(config.database_path().ends_with("Maccy/Storage.sqlite"));
    }

    #[test]
    fn test_invalid_keys_rejected() {
        let config: PinConfig = toml::from_str("shortcut_keys = \"b_c\"").unwrap();
        assert!(config.alphabet().is_err());
    }
}
