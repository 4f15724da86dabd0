use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    notes::{validation::validate_content, Note, NoteFilter, NoteId},
    Error, Result,
};

/// Notes held in process memory with sequential integer ids.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    notes: Arc<RwLock<Vec<Note>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_notes(notes: Vec<Note>) -> Self {
        Self {
            notes: Arc::new(RwLock::new(notes)),
        }
    }

    pub async fn list(&self, filter: NoteFilter) -> Result<Vec<Note>> {
        let notes = self.notes.read().await;
        Ok(notes.iter().filter(|n| filter.matches(n)).cloned().collect())
    }

    pub async fn create(&self, content: Option<String>, important: bool) -> Result<Note> {
        let content = validate_content(content.as_deref())?.to_owned();

        let mut notes = self.notes.write().await;
        let note = Note {
            id: NoteId::Seq(next_id(&notes)),
            content,
            important,
        };
        notes.push(note.clone());

        Ok(note)
    }

    pub async fn find(&self, id: &str) -> Result<Option<Note>> {
        let id = parse_id(id)?;
        let notes = self.notes.read().await;
        Ok(notes.iter().find(|n| n.id == id).cloned())
    }

    pub async fn replace(&self, id: &str, content: Option<String>, important: bool) -> Result<Option<Note>> {
        let id = parse_id(id)?;
        let content = validate_content(content.as_deref())?.to_owned();

        let mut notes = self.notes.write().await;
        let Some(note) = notes.iter_mut().find(|n| n.id == id) else {
            return Ok(None);
        };
        note.content = content;
        note.important = important;

        Ok(Some(note.clone()))
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let id = parse_id(id)?;
        self.notes.write().await.retain(|n| n.id != id);
        Ok(())
    }
}

fn parse_id(id: &str) -> Result<NoteId> {
    id.parse::<u64>()
        .map(NoteId::Seq)
        .map_err(|_| Error::MalformedId(id.to_owned()))
}

/// Highest sequential id plus one; 1 for an empty store.
fn next_id(notes: &[Note]) -> u64 {
    notes
        .iter()
        .filter_map(|n| match n.id {
            NoteId::Seq(id) => Some(id),
            NoteId::Doc(_) => None,
        })
        .max()
        .unwrap_or(0)
        + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(id: u64, content: &str) -> Note {
        Note {
            id: NoteId::Seq(id),
            content: content.into(),
            important: false,
        }
    }

    #[tokio::test]
    async fn ids_continue_from_the_highest() -> Result<()> {
        let store = MemoryStore::with_notes(vec![note(1, "first note"), note(7, "seventh note")]);

        let created = store.create(Some("next one".into()), true).await?;

        assert_eq!(created.id, NoteId::Seq(8));
        assert!(created.important);
        Ok(())
    }

    #[tokio::test]
    async fn ids_follow_the_highest_remaining() -> Result<()> {
        let store = MemoryStore::new();
        let first = store.create(Some("first note".into()), false).await?;
        assert_eq!(first.id, NoteId::Seq(1));

        let second = store.create(Some("second note".into()), false).await?;
        store.delete("1").await?;

        let third = store.create(Some("third note".into()), false).await?;
        assert_eq!(third.id, NoteId::Seq(3));
        assert_ne!(third.id, second.id);
        Ok(())
    }

    #[tokio::test]
    async fn rejected_create_leaves_store_unchanged() -> Result<()> {
        let store = MemoryStore::new();

        assert!(matches!(store.create(Some("abc".into()), false).await, Err(Error::Validation(_))));
        assert!(matches!(store.create(None, false).await, Err(Error::Validation(_))));

        assert!(store.list(NoteFilter::default()).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn find_distinguishes_missing_from_malformed() -> Result<()> {
        let store = MemoryStore::with_notes(vec![note(1, "first note")]);

        assert_eq!(store.find("1").await?, Some(note(1, "first note")));
        assert_eq!(store.find("999999").await?, None);
        assert!(matches!(store.find("abc").await, Err(Error::MalformedId(_))));
        assert!(matches!(store.delete("-1").await, Err(Error::MalformedId(_))));
        Ok(())
    }

    #[tokio::test]
    async fn replace_keeps_the_id() -> Result<()> {
        let store = MemoryStore::with_notes(vec![note(4, "first note")]);

        let updated = store.replace("4", Some("Updated".into()), true).await?;

        assert_eq!(
            updated,
            Some(Note {
                id: NoteId::Seq(4),
                content: "Updated".into(),
                important: true,
            })
        );
        assert_eq!(store.replace("5", Some("Updated".into()), true).await?, None);
        Ok(())
    }
}
