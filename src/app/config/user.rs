use crate::app::keys::KeyConfig;
use crate::engine::Capability;
use crate::ui::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// User-editable configuration (read-only after load)
/// stored in `config.toml`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    /// Catalog used when none is given on the command line
    pub catalog: Option<PathBuf>,
    /// Virtual pixels per carousel item
    pub item_width: f64,
    /// Pixels moved per carousel key press / wheel notch
    pub scroll_step: f64,
    /// Quiet time before a scroll counts as settled
    pub settle_ms: u64,
    /// Quiet time before keyboard seeking commits
    pub seek_settle_ms: u64,
    pub seek_step_secs: f64,
    pub progress_interval_ms: u64,
    pub tick_ms: u64,
    pub capabilities: Vec<Capability>,
    pub keys: KeyConfig,
    pub theme: Theme,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            catalog: None,
            item_width: 320.0,
            scroll_step: 40.0,
            settle_ms: 150,
            seek_settle_ms: 500,
            seek_step_secs: 5.0,
            progress_interval_ms: 1000,
            tick_ms: 33,
            capabilities: Capability::ALL.to_vec(),
            keys: KeyConfig::default(),
            theme: Theme::default(),
        }
    }
}

impl UserConfig {
    pub fn settle_after(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    pub fn seek_settle_after(&self) -> Duration {
        Duration::from_millis(self.seek_settle_ms)
    }

    pub fn progress_interval(&self) -> Duration {
        Duration::from_millis(self.progress_interval_ms.max(1))
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }
}
