use crate::utils::get_data_dir;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Upper bound for the notification timeout, in seconds
pub const MAX_NOTIFICATION_TIMEOUT_SECS: u64 = 3600;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Firewall tool executable, used as the first token of every command
    #[serde(default = "default_tool")]
    pub tool: String,
    /// Directory the tool reads application profile definitions from
    #[serde(default = "default_applications_dir")]
    pub applications_dir: PathBuf,
    /// Directory holding `user.rules` and `user6.rules`
    #[serde(default = "default_rules_dir")]
    pub rules_dir: PathBuf,
    /// How long a notification stays visible (clamped to 1..=3600)
    #[serde(default = "default_notification_timeout")]
    pub notification_timeout_secs: u64,
    /// File name of the restore script written by "Export rules"
    #[serde(default = "default_export_file_name")]
    pub export_file_name: String,
    #[serde(default = "default_true")]
    pub audit_log_enabled: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tool: default_tool(),
            applications_dir: default_applications_dir(),
            rules_dir: default_rules_dir(),
            notification_timeout_secs: default_notification_timeout(),
            export_file_name: default_export_file_name(),
            audit_log_enabled: true,
        }
    }
}

impl AppConfig {
    /// Notification lifetime with the configured value clamped into range
    pub fn notification_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(
            self.notification_timeout_secs
                .clamp(1, MAX_NOTIFICATION_TIMEOUT_SECS),
        )
    }
}

fn default_tool() -> String {
    "ufw".to_string()
}

fn default_applications_dir() -> PathBuf {
    PathBuf::from("/etc/ufw/applications.d")
}

fn default_rules_dir() -> PathBuf {
    PathBuf::from("/etc/ufw")
}

fn default_notification_timeout() -> u64 {
    10
}

fn default_export_file_name() -> String {
    "ufw_import.sh".to_string()
}

fn default_true() -> bool {
    true
}

/// Default config location: `<data_dir>/config.json`
pub fn default_config_path() -> Option<PathBuf> {
    get_data_dir().map(|dir| dir.join("config.json"))
}

/// Saves the config using an atomic write pattern.
/// 1. Writes to a temporary file next to the target.
/// 2. Sets restrictive permissions (0o600).
/// 3. Atomically renames to the target path.
///
/// # Async
/// Uses `tokio::fs` for non-blocking I/O.
pub async fn save_config(config: &AppConfig, path: &Path) -> crate::Result<()> {
    use tokio::io::AsyncWriteExt;

    let json = serde_json::to_string_pretty(config)?;
    let temp_path = path.with_extension("json.tmp");

    let mut options = tokio::fs::OpenOptions::new();
    options.create(true).write(true).truncate(true);
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options.open(&temp_path).await?;
    file.write_all(json.as_bytes()).await?;
    file.sync_all().await?;

    tokio::fs::rename(temp_path, path).await?;
    Ok(())
}

/// Loads the config at `path`, or returns defaults if it is missing or invalid.
///
/// A malformed file is logged and ignored rather than treated as fatal.
pub async fn load_config(path: &Path) -> AppConfig {
    match tokio::fs::read_to_string(path).await {
        Ok(json) => match serde_json::from_str::<AppConfig>(&json) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring malformed config {}: {e}", path.display());
                AppConfig::default()
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => AppConfig::default(),
        Err(e) => {
            tracing::warn!("Failed to read config {}: {e}", path.display());
            AppConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("config.json")).await;
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.tool, "ufw");
        assert_eq!(config.export_file_name, "ufw_import.sh");
    }

    #[tokio::test]
    async fn test_malformed_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        tokio::fs::write(&path, "{ not json").await.unwrap();
        assert_eq!(load_config(&path).await, AppConfig::default());
    }

    #[tokio::test]
    async fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        tokio::fs::write(&path, r#"{"tool": "/usr/sbin/ufw"}"#)
            .await
            .unwrap();

        let config = load_config(&path).await;
        assert_eq!(config.tool, "/usr/sbin/ufw");
        assert_eq!(config.notification_timeout_secs, 10);
        assert!(config.audit_log_enabled);
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = AppConfig {
            notification_timeout_secs: 3,
            audit_log_enabled: false,
            ..AppConfig::default()
        };

        save_config(&config, &path).await.unwrap();
        assert_eq!(load_config(&path).await, config);
        assert!(!dir.path().join("config.json.tmp").exists());
    }

    #[test]
    fn test_notification_timeout_is_clamped() {
        let mut config = AppConfig {
            notification_timeout_secs: 0,
            ..AppConfig::default()
        };
        assert_eq!(config.notification_timeout().as_secs(), 1);
        config.notification_timeout_secs = u64::MAX;
        assert_eq!(
            config.notification_timeout().as_secs(),
            MAX_NOTIFICATION_TIMEOUT_SECS
        );
    }
}
