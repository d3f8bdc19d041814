//! Static track list, read from a TOML catalog file.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub title: String,
    pub artist: String,
    #[serde(default)]
    pub album: Option<String>,
    /// Artwork image path
    #[serde(default)]
    pub artwork: Option<PathBuf>,
    /// Local path or `file://` URI of the audio
    pub url: String,
    /// Length hint in seconds, used when the decoder can't tell
    #[serde(default)]
    pub duration: Option<f64>,
}

impl Track {
    /// Filesystem path of the audio source.
    pub fn audio_path(&self) -> PathBuf {
        PathBuf::from(self.url.strip_prefix("file://").unwrap_or(&self.url))
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("duplicate track id '{0}'")]
    DuplicateId(String),

    #[error("track '{id}' is missing a {field}")]
    MissingField { id: String, field: &'static str },
}

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default, rename = "track")]
    tracks: Vec<Track>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    tracks: Vec<Track>,
}

impl Catalog {
    pub fn new(tracks: Vec<Track>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for track in &tracks {
            if !seen.insert(track.id.as_str()) {
                return Err(CatalogError::DuplicateId(track.id.clone()));
            }
            for (field, value) in [
                ("title", &track.title),
                ("artist", &track.artist),
                ("url", &track.url),
            ] {
                if value.trim().is_empty() {
                    return Err(CatalogError::MissingField {
                        id: track.id.clone(),
                        field,
                    });
                }
            }
        }
        Ok(Self { tracks })
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        Self::from_toml_str(&content, base)
    }

    /// Parse catalog TOML; relative artwork and audio paths are resolved
    /// against `base`.
    pub fn from_toml_str(content: &str, base: &Path) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(content)?;
        let tracks = file
            .tracks
            .into_iter()
            .map(|mut track| {
                track.artwork = track.artwork.map(|p| resolve(base, p));
                if !track.url.contains("://") {
                    track.url = resolve(base, PathBuf::from(&track.url))
                        .to_string_lossy()
                        .into_owned();
                }
                track
            })
            .collect();
        Self::new(tracks)
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

fn resolve(base: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}
