//! In-memory storage engine.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::{Repository, StoreError, require_id};
use crate::model::{Album, Artist};

/// Process-local store. Reads share the lock, writes serialize and the last
/// write wins. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    artists: RwLock<HashMap<String, Artist>>,
    albums: RwLock<HashMap<String, Album>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository for MemoryStore {
    async fn get_artist(&self, id: &str) -> Result<Option<Artist>, StoreError> {
        Ok(self.artists.read().get(id).cloned())
    }

    async fn save_artist(&self, artist: &Artist) -> Result<(), StoreError> {
        require_id(&artist.id)?;
        self.artists
            .write()
            .insert(artist.id.clone(), artist.clone());
        Ok(())
    }

    async fn get_album(&self, id: &str) -> Result<Option<Album>, StoreError> {
        Ok(self.albums.read().get(id).cloned())
    }

    async fn save_album(&self, album: &Album) -> Result<(), StoreError> {
        require_id(&album.id)?;
        self.albums.write().insert(album.id.clone(), album.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{mock_album, mock_artist};

    #[tokio::test]
    async fn test_unknown_id_is_none() {
        let store = MemoryStore::new();
        assert!(store.get_artist("nope").await.unwrap().is_none());
        assert!(store.get_album("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_and_get_artist() {
        let store = MemoryStore::new();
        let artist = mock_artist("a1");

        store.save_artist(&artist).await.unwrap();

        assert_eq!(store.get_artist("a1").await.unwrap(), Some(artist));
    }

    #[tokio::test]
    async fn test_save_is_upsert() {
        let store = MemoryStore::new();
        let mut album = mock_album("rg1");
        store.save_album(&album).await.unwrap();

        album.title = "Renamed".to_string();
        store.save_album(&album).await.unwrap();

        assert_eq!(store.get_album("rg1").await.unwrap().unwrap().title, "Renamed");
    }

    #[tokio::test]
    async fn test_copy_on_read() {
        let store = MemoryStore::new();
        store.save_artist(&mock_artist("a1")).await.unwrap();

        let mut first = store.get_artist("a1").await.unwrap().unwrap();
        first.name = "Mutated".to_string();
        first.genres.push("noise".to_string());

        let second = store.get_artist("a1").await.unwrap().unwrap();
        assert_eq!(second, mock_artist("a1"));
    }

    #[tokio::test]
    async fn test_saved_copy_is_detached_from_caller() {
        let store = MemoryStore::new();
        let mut album = mock_album("rg1");
        store.save_album(&album).await.unwrap();

        album.tracks.clear();

        assert_eq!(store.get_album("rg1").await.unwrap(), Some(mock_album("rg1")));
    }

    #[tokio::test]
    async fn test_empty_id_rejected() {
        let store = MemoryStore::new();
        let result = store.save_artist(&Artist::default()).await;
        assert!(matches!(result, Err(StoreError::MissingId)));
        let result = store.save_album(&Album::default()).await;
        assert!(matches!(result, Err(StoreError::MissingId)));
    }
}
