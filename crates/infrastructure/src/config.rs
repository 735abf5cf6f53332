use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use domain::roster::Participant;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StorageConfig {
    /// JSON file holding the tag registry
    #[serde(default = "default_data_file")]
    pub data_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
        }
    }
}

fn default_data_file() -> String {
    "bot_data.json".to_string()
}

/// Participants of one group, used when no live roster is available
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GroupConfig {
    pub group_id: String,
    #[serde(default)]
    pub participants: Vec<Participant>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BotConfig {
    #[serde(default = "default_bot_name")]
    pub bot_name: String,
    #[serde(default)]
    pub storage: StorageConfig,
    /// Upper bound for roster queries; unset waits indefinitely
    #[serde(default)]
    pub collaborator_timeout_secs: Option<u64>,
    #[serde(default)]
    pub groups: Vec<GroupConfig>,
}

fn default_bot_name() -> String {
    "TagAll Bot".to_string()
}

impl BotConfig {
    pub fn load(config_dir: &str) -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = Config::builder()
            // Start with default settings
            .set_default("bot_name", default_bot_name())?
            .set_default("storage.data_file", default_data_file())?
            // Local config file, e.g. config/default.toml
            .add_source(File::with_name(&format!("{}/default", config_dir)).required(false))
            // Run-mode overrides, e.g. config/production.toml
            .add_source(File::with_name(&format!("{}/{}", config_dir, run_mode)).required(false))
            // Environment variables (e.g. TAGBOT__STORAGE__DATA_FILE=/var/lib/tagbot.json)
            .add_source(Environment::with_prefix("TAGBOT").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    pub fn collaborator_timeout(&self) -> Option<Duration> {
        self.collaborator_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::ParticipantRole;
    use std::fs;

    fn temp_config_dir() -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("tagbot_config_{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_defaults_without_files() {
        let dir = temp_config_dir();
        let config = BotConfig::load(dir.to_str().unwrap()).unwrap();

        assert_eq!(config.storage.data_file, "bot_data.json");
        assert!(config.groups.is_empty());
        assert_eq!(config.collaborator_timeout(), None);
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_load_groups_from_toml() {
        let dir = temp_config_dir();
        fs::write(
            dir.join("default.toml"),
            r#"
bot_name = "Class Bot"
collaborator_timeout_secs = 5

[storage]
data_file = "data/tags.json"

[[groups]]
group_id = "120363000000000000@g.us"
participants = [
    { member_id = "919000000000@s.whatsapp.net", role = "super_admin" },
    { member_id = "919111111111@s.whatsapp.net" },
]
"#,
        )
        .unwrap();

        let config = BotConfig::load(dir.to_str().unwrap()).unwrap();
        assert_eq!(config.bot_name, "Class Bot");
        assert_eq!(config.storage.data_file, "data/tags.json");
        assert_eq!(config.collaborator_timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.groups.len(), 1);
        assert_eq!(config.groups[0].participants[0].role, ParticipantRole::SuperAdmin);
        assert_eq!(config.groups[0].participants[1].role, ParticipantRole::Member);
        fs::remove_dir_all(dir).ok();
    }
}
