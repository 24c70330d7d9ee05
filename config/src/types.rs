use serde::{Deserialize, Serialize};

/// Default size of the read buffer used by every streaming operation.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FmConfig {
    pub shell: ShellConfig,
    pub engine: EngineConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Name used in the greeting when none is passed on the command line.
    pub username: String,
    /// Starting directory; the home directory when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_dir: Option<String>,
    /// Line-editor prompt. `{cwd}` and `{user}` are substituted.
    pub prompt: String,
    /// Status line printed after every command. `{cwd}` is substituted.
    pub status: String,
    pub history: HistoryConfig,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            username: "Username".to_string(),
            start_dir: None,
            prompt: "> ".to_string(),
            status: "You are currently in {cwd}".to_string(),
            history: HistoryConfig::default(),
        }
    }
}

impl ShellConfig {
    /// Start directory with `~` and `$VAR` expanded.
    pub fn expanded_start_dir(&self) -> Option<String> {
        self.start_dir
            .as_deref()
            .map(|dir| shellexpand::full(dir).map_or_else(|_| dir.to_string(), |s| s.into_owned()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub enabled: bool,
    pub file: String,
    pub max_entries: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            file: "~/.fm_history".to_string(),
            max_entries: 1000,
        }
    }
}

impl HistoryConfig {
    pub fn expanded_file(&self) -> String {
        shellexpand::tilde(&self.file).into_owned()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub chunk_size: usize,
    /// Brotli quality (0-11). The encoder default when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compression_quality: Option<u32>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            compression_quality: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
    pub format: LogFormat,
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Warn,
            format: LogFormat::Compact,
            filter: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
    Compact,
}
