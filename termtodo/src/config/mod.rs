//! Configuration system for the `TermTodo` client.
//!
//! Supports layered configuration with the following priority (highest first):
//! 1. CLI arguments
//! 2. Environment variables (via clap `env` attribute)
//! 3. TOML config file (`~/.config/termtodo/config.toml`)
//! 4. Compiled defaults
//!
//! Missing config file is not an error (defaults are used). An explicit
//! `--config` path that doesn't exist is an error.

use std::path::PathBuf;
use std::time::Duration;

use crate::net::SyncConfig;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),
}

// ---------------------------------------------------------------------------
// TOML file structs (all fields Option for partial overrides)
// ---------------------------------------------------------------------------

/// Top-level TOML config file structure.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ConfigFile {
    sync: SyncFileConfig,
    assist: AssistFileConfig,
    ui: UiFileConfig,
}

/// `[sync]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct SyncFileConfig {
    backend_url: Option<String>,
    local_store_path: Option<PathBuf>,
    channel_capacity: Option<usize>,
}

/// `[assist]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct AssistFileConfig {
    api_key: Option<String>,
    assist_url: Option<String>,
}

/// `[ui]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct UiFileConfig {
    poll_timeout_ms: Option<u64>,
    timestamp_format: Option<String>,
}

// ---------------------------------------------------------------------------
// Resolved configuration (concrete types, all fields populated)
// ---------------------------------------------------------------------------

/// Fully resolved client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    // -- Sync --
    /// Base URL of the persistence service. `None` selects the
    /// file-backed local store.
    pub backend_url: Option<String>,
    /// Path of the local store slot.
    pub local_store_path: PathBuf,
    /// Channel capacity for command/event mpsc channels.
    pub channel_capacity: usize,

    // -- Assist --
    /// Credential for the decomposition assistant. `None` disables it.
    pub api_key: Option<String>,
    /// Override for the assistant's generation endpoint.
    pub assist_url: Option<String>,

    // -- UI --
    /// Poll timeout for the TUI event loop.
    pub poll_timeout: Duration,
    /// Timestamp display format string (chrono).
    pub timestamp_format: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend_url: None,
            local_store_path: default_store_path(),
            channel_capacity: 256,
            api_key: None,
            assist_url: None,
            poll_timeout: Duration::from_millis(50),
            timestamp_format: "%b %e %H:%M".to_string(),
        }
    }
}

impl ClientConfig {
    /// Load configuration by merging CLI args, env vars, and a TOML file.
    ///
    /// CLI args and env vars are parsed via `clap`. If `--config` is given
    /// and the file does not exist, returns an error. If no `--config` is
    /// given, the default path (`~/.config/termtodo/config.toml`) is tried
    /// and silently ignored if missing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the explicit config file cannot be read
    /// or parsed.
    pub fn load(cli: &CliArgs) -> Result<Self, ConfigError> {
        let file = load_config_file(cli.config.as_deref())?;
        Ok(Self::resolve(cli, &file))
    }

    /// Resolve a `ClientConfig` from CLI args and a parsed config file.
    ///
    /// Priority: CLI > file > default. This is separated from `load()` to
    /// enable unit testing without CLI parsing.
    #[must_use]
    fn resolve(cli: &CliArgs, file: &ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            backend_url: cli
                .backend_url
                .clone()
                .or_else(|| file.sync.backend_url.clone()),
            local_store_path: cli
                .local_store_path
                .clone()
                .or_else(|| file.sync.local_store_path.clone())
                .unwrap_or(defaults.local_store_path),
            channel_capacity: file
                .sync
                .channel_capacity
                .unwrap_or(defaults.channel_capacity),
            api_key: cli.api_key.clone().or_else(|| file.assist.api_key.clone()),
            assist_url: cli
                .assist_url
                .clone()
                .or_else(|| file.assist.assist_url.clone()),
            poll_timeout: file
                .ui
                .poll_timeout_ms
                .map_or(defaults.poll_timeout, Duration::from_millis),
            timestamp_format: file
                .ui
                .timestamp_format
                .clone()
                .unwrap_or(defaults.timestamp_format),
        }
    }

    /// Build a [`SyncConfig`] from this configuration.
    ///
    /// A configured backend URL selects the remote store; otherwise the
    /// local file slot is used, so this never fails.
    #[must_use]
    pub fn to_sync_config(&self) -> SyncConfig {
        let mut sync = SyncConfig::new(
            self.backend_url.clone(),
            self.local_store_path.clone(),
            self.api_key.clone(),
            self.assist_url.clone(),
        );
        sync.channel_capacity = self.channel_capacity;
        sync
    }
}

/// CLI arguments parsed by clap.
///
/// Environment variables are supported via `env` attributes so the
/// client can be configured without a config file.
#[derive(clap::Parser, Debug, Default)]
#[command(version, about = "Terminal-native task list manager")]
pub struct CliArgs {
    /// Base URL of the persistence service (e.g. `http://127.0.0.1:5000`).
    #[arg(long, env = "TERMTODO_BACKEND_URL")]
    pub backend_url: Option<String>,

    /// Path of the local store file (used without a backend URL).
    #[arg(long)]
    pub local_store_path: Option<PathBuf>,

    /// API credential for the task decomposition assistant.
    #[arg(long, env = "TERMTODO_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Override the assistant's generation endpoint URL.
    #[arg(long, env = "TERMTODO_ASSIST_URL")]
    pub assist_url: Option<String>,

    /// Path to config file (default: `~/.config/termtodo/config.toml`).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long, default_value = "info", env = "TERMTODO_LOG")]
    pub log_level: String,

    /// Path to log file (default: `$TMPDIR/termtodo.log`).
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Default location of the local store slot.
fn default_store_path() -> PathBuf {
    dirs::data_dir().map_or_else(
        || PathBuf::from("termtodo-todos.json"),
        |dir| dir.join("termtodo").join("todos.json"),
    )
}

/// Load and parse a TOML config file.
///
/// If `explicit_path` is `Some`, the file must exist (error if not).
/// If `explicit_path` is `None`, the default path is tried and missing file
/// is treated as empty config.
fn load_config_file(explicit_path: Option<&std::path::Path>) -> Result<ConfigFile, ConfigError> {
    let path = if let Some(p) = explicit_path {
        let contents = std::fs::read_to_string(p).map_err(|e| ConfigError::ReadFile {
            path: p.to_path_buf(),
            source: e,
        })?;
        return Ok(toml::from_str(&contents)?);
    } else {
        let Some(config_dir) = dirs::config_dir() else {
            // No config dir available — use defaults.
            return Ok(ConfigFile::default());
        };
        config_dir.join("termtodo").join("config.toml")
    };

    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ConfigFile::default()),
        Err(e) => Err(ConfigError::ReadFile { path, source: e }),
    }
}
