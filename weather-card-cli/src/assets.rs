//! Icon images, read from disk once at startup and served from memory.

use std::{collections::HashMap, fs, path::Path};

use axum::body::Bytes;
use weather_card_core::IconKey;

#[derive(Debug, Default)]
pub struct AssetStore {
    images: HashMap<IconKey, Bytes>,
}

impl AssetStore {
    /// Read every icon image found in `dir`. Missing files are logged and skipped.
    pub fn load(dir: &Path) -> Self {
        let mut by_file: HashMap<&'static str, Bytes> = HashMap::new();
        let mut images = HashMap::new();

        for key in IconKey::all() {
            let Some(file_name) = key.file_name() else { continue };

            if let Some(bytes) = by_file.get(file_name) {
                images.insert(*key, bytes.clone());
                continue;
            }

            let path = dir.join(file_name);
            match fs::read(&path) {
                Ok(data) => {
                    let bytes = Bytes::from(data);
                    by_file.insert(file_name, bytes.clone());
                    images.insert(*key, bytes);
                }
                Err(e) => {
                    tracing::warn!("Icon {} unavailable ({}): {}", key, path.display(), e);
                }
            }
        }

        tracing::info!("Loaded {} icon images from {}", by_file.len(), dir.display());
        Self { images }
    }

    pub fn get(&self, key: IconKey) -> Option<&Bytes> {
        self.images.get(&key)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_files_are_read_once_and_reused() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("rain.png"), b"rain-bytes").unwrap();
        fs::write(dir.path().join("mist.png"), b"mist-bytes").unwrap();

        let store = AssetStore::load(dir.path());

        assert_eq!(store.get(IconKey::Rain).map(|b| b.to_vec()), Some(b"rain-bytes".to_vec()));
        assert_eq!(store.get(IconKey::Thunderstorm), store.get(IconKey::Rain));
        assert_eq!(store.get(IconKey::Fog).map(|b| b.to_vec()), Some(b"mist-bytes".to_vec()));
        assert_eq!(store.len(), 5);
    }

    #[test]
    fn missing_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();

        let store = AssetStore::load(dir.path());

        assert!(store.is_empty());
        assert!(store.get(IconKey::Clear).is_none());
    }

    #[test]
    fn error_glyph_has_no_image() {
        let dir = tempfile::tempdir().unwrap();
        for key in IconKey::all() {
            if let Some(name) = key.file_name() {
                fs::write(dir.path().join(name), name.as_bytes()).unwrap();
            }
        }

        let store = AssetStore::load(dir.path());

        assert!(store.get(IconKey::Error).is_none());
        assert_eq!(store.len(), IconKey::all().len() - 1);
    }
}
