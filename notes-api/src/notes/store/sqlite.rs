use rusqlite::{params, OptionalExtension, Row};
use uuid::Uuid;

use crate::{
    db::DB,
    notes::{validation::validate_content, Note, NoteFilter, NoteId},
    Error, Result,
};

const COLUMNS: &str = "id, content, important, version";

/// Row shape of the `notes` table. `version` counts replacements and never leaves the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteDocument {
    pub id: Uuid,
    pub content: String,
    pub important: bool,
    pub version: i64,
}

impl<'a> TryFrom<&Row<'a>> for NoteDocument {
    type Error = rusqlite::Error;

    fn try_from(row: &Row<'a>) -> std::result::Result<Self, Self::Error> {
        Ok(Self {
            id: row.get(0)?,
            content: row.get(1)?,
            important: row.get(2)?,
            version: row.get(3)?,
        })
    }
}

impl From<NoteDocument> for Note {
    fn from(doc: NoteDocument) -> Self {
        Self {
            id: NoteId::Doc(doc.id),
            content: doc.content,
            important: doc.important,
        }
    }
}

/// Notes persisted as documents in SQLite, keyed by UUID v7.
#[derive(Clone)]
pub struct SqliteStore {
    db: DB,
}

impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore").finish_non_exhaustive()
    }
}

impl SqliteStore {
    pub fn new(db: DB) -> Self {
        Self { db }
    }

    pub async fn list(&self, NoteFilter { important }: NoteFilter) -> Result<Vec<Note>> {
        self.db
            .call(move |conn| {
                let docs = conn
                    .prepare(&format!(
                        "SELECT {COLUMNS} FROM notes WHERE ?1 IS NULL OR important = ?1 ORDER BY rowid"
                    ))?
                    .query_map(params![important], |row| NoteDocument::try_from(row))?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(docs)
            })
            .await
            .map(|docs| docs.into_iter().map(Note::from).collect())
            .map_err(Error::from)
    }

    pub async fn create(&self, content: Option<String>, important: bool) -> Result<Note> {
        let content = validate_content(content.as_deref())?.to_owned();

        self.db
            .call(move |conn| {
                conn.query_row(
                    &format!("INSERT INTO notes (content, important) VALUES (?, ?) RETURNING {COLUMNS}"),
                    params![content, important],
                    |row| NoteDocument::try_from(row),
                )
                .map_err(|e| e.into())
            })
            .await
            .map(Note::from)
            .map_err(Error::from)
    }

    pub async fn find(&self, id: &str) -> Result<Option<Note>> {
        let id = parse_id(id)?;

        self.db
            .call(move |conn| {
                conn.query_row(
                    &format!("SELECT {COLUMNS} FROM notes WHERE id = ?"),
                    params![id],
                    |row| NoteDocument::try_from(row),
                )
                .optional()
                .map_err(|e| e.into())
            })
            .await
            .map(|doc| doc.map(Note::from))
            .map_err(Error::from)
    }

    pub async fn replace(&self, id: &str, content: Option<String>, important: bool) -> Result<Option<Note>> {
        let id = parse_id(id)?;
        let content = validate_content(content.as_deref())?.to_owned();

        self.db
            .call(move |conn| {
                conn.query_row(
                    &format!(
                        r#"UPDATE notes SET content = ?, important = ?, version = version + 1
                        WHERE id = ?
                        RETURNING {COLUMNS}"#
                    ),
                    params![content, important, id],
                    |row| NoteDocument::try_from(row),
                )
                .optional()
                .map_err(|e| e.into())
            })
            .await
            .map(|doc| doc.map(Note::from))
            .map_err(Error::from)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let id = parse_id(id)?;

        self.db
            .call(move |conn| {
                let deleted = conn.execute("DELETE FROM notes WHERE id = ?", params![id])?;
                tracing::trace!("deleted {deleted} note(s) with id {id}");
                Ok(())
            })
            .await
            .map_err(Error::from)
    }

    /// Raw document, including the internal revision marker.
    #[cfg(test)]
    pub async fn document(&self, id: Uuid) -> Result<Option<NoteDocument>> {
        self.db
            .call(move |conn| {
                conn.query_row(
                    &format!("SELECT {COLUMNS} FROM notes WHERE id = ?"),
                    params![id],
                    |row| NoteDocument::try_from(row),
                )
                .optional()
                .map_err(|e| e.into())
            })
            .await
            .map_err(Error::from)
    }
}

fn parse_id(id: &str) -> Result<Uuid> {
    Uuid::parse_str(id).map_err(|_| Error::MalformedId(id.to_owned()))
}
