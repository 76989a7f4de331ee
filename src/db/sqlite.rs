//! SQLite storage engine.
//!
//! Each record is stored as a JSON document next to its id and the time it
//! was last written.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use sqlx::sqlite::SqlitePool;

use super::{Repository, StoreError, require_id};
use crate::model::{Album, Artist};

/// Cache tables, one per entity
#[derive(Debug, Clone, Copy)]
enum Table {
    Artists,
    Albums,
}

impl Table {
    fn name(self) -> &'static str {
        match self {
            Table::Artists => "artists",
            Table::Albums => "albums",
        }
    }
}

/// Store backed by a SQLite connection pool
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Wrap a pool that already has the migrations applied (see [`super::init_db`])
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn load<T: DeserializeOwned>(&self, table: Table, id: &str) -> Result<Option<T>, StoreError> {
        let sql = format!("SELECT payload FROM {} WHERE id = ?", table.name());
        let row: Option<(String,)> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some((payload,)) => Ok(Some(serde_json::from_str(&payload)?)),
            None => Ok(None),
        }
    }

    async fn upsert<T: Serialize>(&self, table: Table, id: &str, record: &T) -> Result<(), StoreError> {
        require_id(id)?;
        let payload = serde_json::to_string(record)?;
        let sql = format!(
            "INSERT INTO {} (id, payload, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET payload = excluded.payload, updated_at = excluded.updated_at",
            table.name()
        );

        sqlx::query(&sql)
            .bind(id)
            .bind(payload)
            .bind(chrono::Utc::now().to_rfc3339())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[async_trait]
impl Repository for SqliteStore {
    async fn get_artist(&self, id: &str) -> Result<Option<Artist>, StoreError> {
        self.load(Table::Artists, id).await
    }

    async fn save_artist(&self, artist: &Artist) -> Result<(), StoreError> {
        self.upsert(Table::Artists, &artist.id, artist).await
    }

    async fn get_album(&self, id: &str) -> Result<Option<Album>, StoreError> {
        self.load(Table::Albums, id).await
    }

    async fn save_album(&self, album: &Album) -> Result<(), StoreError> {
        self.upsert(Table::Albums, &album.id, album).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{mock_album, mock_artist, temp_db};

    #[tokio::test]
    async fn test_unknown_id_is_none() {
        let (pool, _dir) = temp_db().await;
        let store = SqliteStore::new(pool);

        assert!(store.get_artist("nope").await.unwrap().is_none());
        assert!(store.get_album("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_artist_roundtrip_keeps_albums() {
        let (pool, _dir) = temp_db().await;
        let store = SqliteStore::new(pool);
        let mut artist = mock_artist("a1");
        artist.albums.push(mock_album("rg1"));

        store.save_artist(&artist).await.unwrap();

        assert_eq!(store.get_artist("a1").await.unwrap(), Some(artist));
    }

    #[tokio::test]
    async fn test_album_roundtrip_keeps_tracks_and_review() {
        let (pool, _dir) = temp_db().await;
        let store = SqliteStore::new(pool);
        let album = mock_album("rg1");

        store.save_album(&album).await.unwrap();

        let loaded = store.get_album("rg1").await.unwrap().unwrap();
        assert_eq!(loaded, album);
        assert_eq!(loaded.tracks.len(), 2);
        assert_eq!(loaded.review.source, "Discogs");
    }

    #[tokio::test]
    async fn test_upsert_replaces_payload() {
        let (pool, _dir) = temp_db().await;
        let store = SqliteStore::new(pool.clone());
        let mut artist = mock_artist("a1");
        store.save_artist(&artist).await.unwrap();

        artist.biography = "Updated".to_string();
        store.save_artist(&artist).await.unwrap();

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM artists")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
        assert_eq!(
            store.get_artist("a1").await.unwrap().unwrap().biography,
            "Updated"
        );
    }

    #[tokio::test]
    async fn test_updated_at_is_rfc3339() {
        let (pool, _dir) = temp_db().await;
        let store = SqliteStore::new(pool.clone());
        store.save_album(&mock_album("rg1")).await.unwrap();

        let (updated_at,): (String,) =
            sqlx::query_as("SELECT updated_at FROM albums WHERE id = 'rg1'")
                .fetch_one(&pool)
                .await
                .unwrap();

        assert!(chrono::DateTime::parse_from_rfc3339(&updated_at).is_ok());
    }

    #[tokio::test]
    async fn test_copy_on_read() {
        let (pool, _dir) = temp_db().await;
        let store = SqliteStore::new(pool);
        store.save_album(&mock_album("rg1")).await.unwrap();

        let mut first = store.get_album("rg1").await.unwrap().unwrap();
        first.tracks.clear();

        let second = store.get_album("rg1").await.unwrap().unwrap();
        assert_eq!(second.tracks.len(), 2);
    }

    #[tokio::test]
    async fn test_empty_id_rejected() {
        let (pool, _dir) = temp_db().await;
        let store = SqliteStore::new(pool);
        let result = store.save_album(&Album::default()).await;
        assert!(matches!(result, Err(StoreError::MissingId)));
    }

    #[tokio::test]
    async fn test_corrupt_payload_is_encode_error() {
        let (pool, _dir) = temp_db().await;
        sqlx::query("INSERT INTO artists (id, payload, updated_at) VALUES ('bad', 'not json', '')")
            .execute(&pool)
            .await
            .unwrap();
        let store = SqliteStore::new(pool);

        assert!(matches!(
            store.get_artist("bad").await,
            Err(StoreError::Encode(_))
        ));
    }
}
