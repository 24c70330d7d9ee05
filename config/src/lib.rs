//! fm Configuration System
//!
//! Layered YAML configuration for the `fm` file manager shell.
//!
//! # Configuration Loading Priority
//!
//! 1. Compiled-in defaults
//! 2. `/etc/fm/fm.yaml` (system-wide)
//! 3. `~/.config/fm/fm.yaml` (user)
//! 4. `./fm.yaml` (project-local)
//! 5. `FM_CONFIG=/path/to/config.yaml` (explicit)
//! 6. Environment variables (highest priority)
//!
//! # Example Configuration
//!
//! ```yaml
//! shell:
//!   username: "${USER}"
//!   start_dir: "~/work"
//!   status: "You are currently in {cwd}"
//!
//! engine:
//!   chunk_size: 65536
//!   compression_quality: 9
//!
//! logging:
//!   level: debug
//! ```

#![allow(missing_docs)]

mod error;
mod loader;
mod types;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use types::*;

/// Load configuration from default locations.
///
/// Searches for config files in order and merges them.
/// Environment variables override file values.
pub fn load() -> Result<FmConfig, ConfigError> {
    ConfigLoader::new().load()
}

/// Load configuration from a specific file.
pub fn load_from_file(path: &str) -> Result<FmConfig, ConfigError> {
    ConfigLoader::new().with_file(path).load()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = FmConfig::default();
        assert_eq!(config.shell.username, "Username");
        assert_eq!(config.engine.chunk_size, DEFAULT_CHUNK_SIZE);
        assert_eq!(config.logging.level, LogLevel::Warn);
    }

    #[test]
    fn parse_minimal_yaml() {
        let yaml = r#"
engine:
  chunk_size: 8192
"#;
        let config: FmConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.engine.chunk_size, 8192);
        assert_eq!(config.shell.status, "You are currently in {cwd}"); // default
    }

    #[test]
    fn parse_full_config() {
        let yaml = r#"
shell:
  username: "operator"
  start_dir: "/srv/data"
  prompt: "{user}@{cwd}> "
  history:
    enabled: false
    file: "/tmp/fm_history"
    max_entries: 50

engine:
  chunk_size: 4096
  compression_quality: 11

logging:
  level: debug
  format: json
"#;
        let config: FmConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.shell.username, "operator");
        assert_eq!(config.shell.start_dir.as_deref(), Some("/srv/data"));
        assert!(!config.shell.history.enabled);
        assert_eq!(config.shell.history.max_entries, 50);
        assert_eq!(config.engine.compression_quality, Some(11));
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn history_file_expands_tilde() {
        let history = HistoryConfig::default();
        let expanded = history.expanded_file();
        match dirs::home_dir() {
            Some(home) => assert_eq!(
                std::path::PathBuf::from(expanded),
                home.join(".fm_history")
            ),
            None => assert_eq!(expanded, "~/.fm_history"),
        }
    }
}
