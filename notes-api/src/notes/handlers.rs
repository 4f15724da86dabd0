use crate::{ctx::BaseParams, Error, Result};

use super::{content_text, truthy, CreateNote, Note, NoteFilter, ReplaceNote};

pub async fn find_notes(filter: NoteFilter, BaseParams { store }: BaseParams) -> Result<Vec<Note>> {
    store.list(filter).await
}

pub async fn create_note(CreateNote { content, important }: CreateNote, BaseParams { store }: BaseParams) -> Result<Note> {
    let content = content_text(content.as_ref())
        .map_err(Error::Validation)?
        .ok_or(Error::ContentMissing)?;

    let note = store.create(Some(content), truthy(important.as_ref())).await?;
    tracing::debug!("created note {}", note.id);
    Ok(note)
}

pub async fn get_note(note_id: String, BaseParams { store }: BaseParams) -> Result<Note> {
    store.find(&note_id).await?.ok_or(Error::NotFound)
}

pub async fn replace_note(
    note_id: String,
    ReplaceNote { content, important }: ReplaceNote,
    BaseParams { store }: BaseParams,
) -> Result<Note> {
    let content = content_text(content.as_ref()).map_err(Error::Validation)?;

    store
        .replace(&note_id, content, truthy(important.as_ref()))
        .await?
        .ok_or(Error::NotFound)
}

pub async fn delete_note(note_id: String, BaseParams { store }: BaseParams) -> Result<()> {
    store.delete(&note_id).await
}
