mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::{config::StoreKind, Result};

use super::{Note, NoteFilter};

/// Notes the service starts with when seeding is enabled.
pub const SAMPLE_NOTES: [(&str, bool); 3] = [
    ("HTML is easy", true),
    ("Browser can execute only JavaScript", false),
    ("GET and POST are the most important methods of HTTP protocol", true),
];

/// Backing storage for notes, chosen once at startup.
#[derive(Clone, Debug)]
pub enum NoteStore {
    Memory(MemoryStore),
    Sqlite(SqliteStore),
}

impl NoteStore {
    pub fn kind(&self) -> StoreKind {
        match self {
            NoteStore::Memory(_) => StoreKind::Memory,
            NoteStore::Sqlite(_) => StoreKind::Sqlite,
        }
    }

    pub async fn list(&self, filter: NoteFilter) -> Result<Vec<Note>> {
        match self {
            NoteStore::Memory(store) => store.list(filter).await,
            NoteStore::Sqlite(store) => store.list(filter).await,
        }
    }

    pub async fn create(&self, content: Option<String>, important: bool) -> Result<Note> {
        match self {
            NoteStore::Memory(store) => store.create(content, important).await,
            NoteStore::Sqlite(store) => store.create(content, important).await,
        }
    }

    pub async fn find(&self, id: &str) -> Result<Option<Note>> {
        match self {
            NoteStore::Memory(store) => store.find(id).await,
            NoteStore::Sqlite(store) => store.find(id).await,
        }
    }

    pub async fn replace(&self, id: &str, content: Option<String>, important: bool) -> Result<Option<Note>> {
        match self {
            NoteStore::Memory(store) => store.replace(id, content, important).await,
            NoteStore::Sqlite(store) => store.replace(id, content, important).await,
        }
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        match self {
            NoteStore::Memory(store) => store.delete(id).await,
            NoteStore::Sqlite(store) => store.delete(id).await,
        }
    }

    /// Inserts [`SAMPLE_NOTES`] into an empty store. Returns how many notes were added.
    pub async fn seed(&self) -> Result<usize> {
        if !self.list(NoteFilter::default()).await?.is_empty() {
            return Ok(0);
        }
        for (content, important) in SAMPLE_NOTES {
            self.create(Some(content.into()), important).await?;
        }
        tracing::info!("seeded {} sample notes", SAMPLE_NOTES.len());
        Ok(SAMPLE_NOTES.len())
    }
}

impl From<MemoryStore> for NoteStore {
    fn from(store: MemoryStore) -> Self {
        NoteStore::Memory(store)
    }
}

impl From<SqliteStore> for NoteStore {
    fn from(store: SqliteStore) -> Self {
        NoteStore::Sqlite(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_test_db;

    async fn stores() -> Result<Vec<NoteStore>> {
        Ok(vec![
            MemoryStore::new().into(),
            SqliteStore::new(init_test_db().await?).into(),
        ])
    }

    #[tokio::test]
    async fn seed_fills_an_empty_store_once() -> Result<()> {
        for store in stores().await? {
            assert_eq!(store.seed().await?, 3);
            assert_eq!(store.seed().await?, 0);

            let notes = store.list(NoteFilter::default()).await?;
            assert_eq!(notes.len(), 3);
            assert_eq!(notes[0].content, "HTML is easy");
        }
        Ok(())
    }

    #[tokio::test]
    async fn created_ids_are_unique() -> Result<()> {
        for store in stores().await? {
            let first = store.create(Some("first note".into()), false).await?;
            let second = store.create(Some("second note".into()), false).await?;
            assert_ne!(first.id, second.id);
        }
        Ok(())
    }

    #[tokio::test]
    async fn delete_is_idempotent() -> Result<()> {
        for store in stores().await? {
            let note = store.create(Some("short lived".into()), true).await?;
            let id = note.id.to_string();

            store.delete(&id).await?;
            store.delete(&id).await?;

            assert_eq!(store.find(&id).await?, None);
        }
        Ok(())
    }

    #[tokio::test]
    async fn replace_validates_like_create() -> Result<()> {
        for store in stores().await? {
            let note = store.create(Some("valid content".into()), false).await?;
            let id = note.id.to_string();

            let res = store.replace(&id, Some("abc".into()), true).await;
            assert!(matches!(res, Err(crate::Error::Validation(_))));

            assert_eq!(store.find(&id).await?, Some(note));
        }
        Ok(())
    }

    #[tokio::test]
    async fn filter_by_importance() -> Result<()> {
        for store in stores().await? {
            store.seed().await?;

            let important = store.list(NoteFilter { important: Some(true) }).await?;
            assert_eq!(important.len(), 2);
            assert!(important.iter().all(|n| n.important));
        }
        Ok(())
    }
}
