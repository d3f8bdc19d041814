use crate::app::config::UserConfig;
use clap::Parser;
use std::path::PathBuf;

/// orbit - a music player screen for your terminal 🎵
#[derive(Parser, Debug)]
#[command(name = "orbit", version, about)]
pub struct Args {
    /// Catalog file listing the tracks (TOML)
    pub catalog: Option<PathBuf>,

    /// Use this config file instead of ~/.config/orbit/config.toml
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Carousel item width in virtual pixels
    #[arg(long)]
    pub item_width: Option<f64>,

    /// Scroll debounce in milliseconds
    #[arg(long)]
    pub settle_ms: Option<u64>,

    /// Generate default config.toml to stdout
    #[arg(long)]
    pub generate_config: bool,
}

impl Args {
    /// Command-line values win over the config file.
    pub fn apply(&self, config: &mut UserConfig) {
        if let Some(path) = &self.catalog {
            config.catalog = Some(path.clone());
        }
        if let Some(width) = self.item_width.filter(|w| *w > 0.0) {
            config.item_width = width;
        }
        if let Some(ms) = self.settle_ms {
            config.settle_ms = ms;
        }
    }
}
