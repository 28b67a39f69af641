use chrono::FixedOffset;
use index::{BackendConfig, IndexConfig};
use perceptual::WinnowConfig;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server bind address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum request body size in MB
    #[serde(default = "default_max_body_size_mb")]
    pub max_body_size_mb: usize,

    /// Enable CORS (any origin, no credentials)
    #[serde(default = "default_true")]
    pub enable_cors: bool,

    /// Log level / `EnvFilter` directive
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Shingle length used when a request omits `k`
    #[serde(default = "default_k")]
    pub default_k: usize,

    /// Winnowing window used when a request omits `window_size`
    #[serde(default = "default_window_size")]
    pub default_window_size: usize,

    /// History backend: `"redb"` or `"memory"`
    #[serde(default = "default_storage_backend")]
    pub storage_backend: String,

    /// Redb file path, ignored for the memory backend
    #[serde(default = "default_storage_path")]
    pub storage_path: String,

    /// UTC offset of generated session ids, in minutes
    #[serde(default = "default_session_utc_offset_minutes")]
    pub session_utc_offset_minutes: i32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            timeout_secs: default_timeout_secs(),
            max_body_size_mb: default_max_body_size_mb(),
            enable_cors: default_true(),
            log_level: default_log_level(),
            default_k: default_k(),
            default_window_size: default_window_size(),
            storage_backend: default_storage_backend(),
            storage_path: default_storage_path(),
            session_utc_offset_minutes: default_session_utc_offset_minutes(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from an optional `server.{toml,yaml,json}` file and
    /// `PLAGSCAN_SERVER__*` environment variables.
    pub fn load() -> anyhow::Result<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("server").required(false))
            .add_source(config::Environment::with_prefix("PLAGSCAN_SERVER").separator("__"));

        let config: ServerConfig = builder.build()?.try_deserialize()?;
        config.winnow()?;
        config.session_offset()?;
        config.index_config()?;
        Ok(config)
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.bind_addr, self.port);
        Ok(addr_str.parse()?)
    }

    /// Get request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get max body size in bytes
    pub fn max_body_size(&self) -> usize {
        self.max_body_size_mb * 1024 * 1024
    }

    /// Default winnowing parameters, validated.
    pub fn winnow(&self) -> anyhow::Result<WinnowConfig> {
        let cfg = WinnowConfig::new()
            .with_k(self.default_k)
            .with_w(self.default_window_size);
        cfg.validate()?;
        Ok(cfg)
    }

    /// Offset used when rendering session ids.
    pub fn session_offset(&self) -> anyhow::Result<FixedOffset> {
        FixedOffset::east_opt(self.session_utc_offset_minutes * 60).ok_or_else(|| {
            anyhow::anyhow!(
                "session_utc_offset_minutes out of range: {}",
                self.session_utc_offset_minutes
            )
        })
    }

    /// History store configuration.
    pub fn index_config(&self) -> anyhow::Result<IndexConfig> {
        let backend = match self.storage_backend.as_str() {
            "redb" => BackendConfig::redb(self.storage_path.clone()),
            "memory" | "in-memory" => BackendConfig::in_memory(),
            other => anyhow::bail!("unknown storage_backend '{other}' (expected redb or memory)"),
        };
        Ok(IndexConfig::new().with_backend(backend))
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_body_size_mb() -> usize {
    10
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_k() -> usize {
    WinnowConfig::default().k
}

fn default_window_size() -> usize {
    WinnowConfig::default().w
}

fn default_storage_backend() -> String {
    "redb".to_string()
}

fn default_storage_path() -> String {
    "plagiarism.redb".to_string()
}

fn default_session_utc_offset_minutes() -> i32 {
    plagscan::DEFAULT_SESSION_OFFSET_SECS / 60
}
