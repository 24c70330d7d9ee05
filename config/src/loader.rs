use crate::{ConfigError, FmConfig};
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct ConfigLoader {
    explicit_file: Option<PathBuf>,
    search_paths: Vec<PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        let mut search_paths = Vec::new();

        if let Some(home) = dirs::home_dir() {
            search_paths.push(home.join(".config/fm/fm.yaml"));
        }
        search_paths.push(PathBuf::from("./fm.yaml"));

        #[cfg(unix)]
        search_paths.insert(0, PathBuf::from("/etc/fm/fm.yaml"));

        Self {
            explicit_file: None,
            search_paths,
        }
    }

    pub fn with_file(mut self, path: &str) -> Self {
        self.explicit_file = Some(PathBuf::from(path));
        self
    }

    pub fn load(&self) -> Result<FmConfig, ConfigError> {
        let mut config = FmConfig::default();

        if let Ok(env_path) = std::env::var("FM_CONFIG") {
            config = self.read_file(&PathBuf::from(env_path))?;
        } else if let Some(ref explicit) = self.explicit_file {
            config = self.read_file(explicit)?;
        } else {
            for path in &self.search_paths {
                if path.exists() {
                    if let Ok(content) = std::fs::read_to_string(path) {
                        debug!(path = %path.display(), "merging config file");
                        config = self.merge_yaml(&config, &content)?;
                    }
                }
            }
        }

        self.apply_env_overrides(&mut config);
        Self::validate(&config)?;
        Ok(config)
    }

    fn read_file(&self, path: &Path) -> Result<FmConfig, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        debug!(path = %path.display(), "loading config file");
        self.parse_yaml(&content)
    }

    fn parse_yaml(&self, content: &str) -> Result<FmConfig, ConfigError> {
        let expanded = self.expand_env_vars(content);
        Ok(serde_yaml::from_str(&expanded)?)
    }

    fn merge_yaml(&self, base: &FmConfig, content: &str) -> Result<FmConfig, ConfigError> {
        let overlay = self.parse_yaml(content)?;
        Ok(self.merge_configs(base, &overlay))
    }

    fn merge_configs(&self, base: &FmConfig, overlay: &FmConfig) -> FmConfig {
        let defaults = FmConfig::default();
        let mut result = base.clone();

        if overlay.shell.username != defaults.shell.username {
            result.shell.username = overlay.shell.username.clone();
        }
        if overlay.shell.start_dir.is_some() {
            result.shell.start_dir = overlay.shell.start_dir.clone();
        }
        if overlay.shell.prompt != defaults.shell.prompt {
            result.shell.prompt = overlay.shell.prompt.clone();
        }
        if overlay.shell.status != defaults.shell.status {
            result.shell.status = overlay.shell.status.clone();
        }
        if overlay.shell.history.file != defaults.shell.history.file
            || overlay.shell.history.enabled != defaults.shell.history.enabled
            || overlay.shell.history.max_entries != defaults.shell.history.max_entries
        {
            result.shell.history = overlay.shell.history.clone();
        }
        if overlay.engine.chunk_size != defaults.engine.chunk_size {
            result.engine.chunk_size = overlay.engine.chunk_size;
        }
        if overlay.engine.compression_quality.is_some() {
            result.engine.compression_quality = overlay.engine.compression_quality;
        }
        if overlay.logging.level != defaults.logging.level
            || overlay.logging.format != defaults.logging.format
            || !overlay.logging.filter.is_empty()
        {
            result.logging = overlay.logging.clone();
        }

        result
    }

    fn expand_env_vars(&self, content: &str) -> String {
        let Ok(re) = Regex::new(r"\$\{([^}]+)\}") else {
            return content.to_string();
        };
        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_default()
        })
        .to_string()
    }

    fn apply_env_overrides(&self, config: &mut FmConfig) {
        if let Ok(username) = std::env::var("FM_USERNAME") {
            if !username.is_empty() {
                config.shell.username = username;
            }
        }
        if let Ok(dir) = std::env::var("FM_START_DIR") {
            if !dir.is_empty() {
                config.shell.start_dir = Some(dir);
            }
        }
        if let Ok(size) = std::env::var("FM_CHUNK_SIZE") {
            if let Ok(s) = size.parse() {
                config.engine.chunk_size = s;
            }
        }
        if let Ok(level) = std::env::var("FM_LOG_LEVEL") {
            if let Ok(l) = serde_yaml::from_str(&level) {
                config.logging.level = l;
            }
        }
    }

    fn validate(config: &FmConfig) -> Result<(), ConfigError> {
        if config.engine.chunk_size == 0 {
            return Err(ConfigError::InvalidValue(
                "engine.chunk_size must be greater than zero".to_string(),
            ));
        }
        if let Some(quality) = config.engine.compression_quality {
            if quality > 11 {
                return Err(ConfigError::InvalidValue(format!(
                    "engine.compression_quality must be between 0 and 11, got {quality}"
                )));
            }
        }
        Ok(())
    }
}
