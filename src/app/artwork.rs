use image::DynamicImage;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub enum ArtworkState {
    Loading,
    Loaded(Arc<DynamicImage>),
    Failed,
}

/// Cover images keyed by track id.
#[derive(Default)]
pub struct ArtworkCache {
    entries: HashMap<String, ArtworkState>,
}

impl ArtworkCache {
    pub fn get(&self, id: &str) -> Option<&ArtworkState> {
        self.entries.get(id)
    }

    /// Mark `id` as loading. Returns false when it was already requested.
    pub fn claim(&mut self, id: &str) -> bool {
        if self.entries.contains_key(id) {
            return false;
        }
        self.entries.insert(id.to_string(), ArtworkState::Loading);
        true
    }

    pub fn store(&mut self, id: String, state: ArtworkState) {
        self.entries.insert(id, state);
    }
}

/// A cover that still has to be read from disk.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtworkRequest {
    pub id: String,
    pub path: PathBuf,
}

/// Blocking; run it off the event loop.
pub fn load_artwork(path: &Path) -> ArtworkState {
    match image::open(path) {
        Ok(img) => ArtworkState::Loaded(Arc::new(img)),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to load artwork");
            ArtworkState::Failed
        }
    }
}
