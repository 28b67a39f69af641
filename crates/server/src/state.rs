use crate::config::ServerConfig;
use crate::error::ServerResult;
use chrono::FixedOffset;
use index::{HistoryStore, ResultIndex};
use perceptual::WinnowConfig;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Check-result history (shared across requests)
    pub store: Arc<dyn HistoryStore>,

    /// Winnowing parameters applied when a request omits them
    pub defaults: WinnowConfig,

    /// Offset session ids are rendered in
    pub session_offset: FixedOffset,
}

impl ServerState {
    /// Create state with the history backend named in `config`.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let store = ResultIndex::new(config.index_config()?)?;
        Self::with_store(config, Arc::new(store))
    }

    /// Create state around an existing store (e.g. in-memory for tests).
    pub fn with_store(config: ServerConfig, store: Arc<dyn HistoryStore>) -> ServerResult<Self> {
        let defaults = config.winnow()?;
        let session_offset = config.session_offset()?;
        Ok(Self {
            config: Arc::new(config),
            store,
            defaults,
            session_offset,
        })
    }

    /// Resolve request parameters against the configured defaults.
    ///
    /// Values arrive signed so that negatives are reported as invalid
    /// parameters rather than as malformed JSON.
    pub fn winnow_for(
        &self,
        k: Option<i64>,
        window_size: Option<i64>,
    ) -> ServerResult<WinnowConfig> {
        let k = k.unwrap_or(self.defaults.k as i64);
        let w = window_size.unwrap_or(self.defaults.w as i64);
        Ok(WinnowConfig::from_signed(k, w)?)
    }

    /// Fresh session id for a batch.
    pub fn new_session_id(&self) -> String {
        plagscan::session_id_now(&self.session_offset)
    }
}
