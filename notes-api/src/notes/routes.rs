use axum::{extract::rejection::JsonRejection, http::StatusCode, routing::get, Router};

use crate::{
    ctx::BaseParams,
    extract::{Json, Path, Query},
    Error, Result,
};

use super::{handlers, CreateNote, Note, NoteFilter, NoteIdPath, ReplaceNote};

pub fn router() -> Router {
    Router::new()
        .route("/api/notes", get(find_notes).post(create_note))
        .route("/api/notes/{id}", get(get_note).put(replace_note).delete(delete_note))
}

async fn find_notes(base: BaseParams, Query(filter): Query<NoteFilter>) -> Result<Json<Vec<Note>>> {
    handlers::find_notes(filter, base).await.map(Json)
}

async fn create_note(base: BaseParams, body: Result<Json<CreateNote>>) -> Result<Json<Note>> {
    handlers::create_note(or_empty(body)?, base).await.map(Json)
}

async fn get_note(Path(NoteIdPath { id }): Path<NoteIdPath>, base: BaseParams) -> Result<Json<Note>> {
    handlers::get_note(id, base).await.map(Json)
}

async fn replace_note(
    Path(NoteIdPath { id }): Path<NoteIdPath>,
    base: BaseParams,
    body: Result<Json<ReplaceNote>>,
) -> Result<Json<Note>> {
    handlers::replace_note(id, or_empty(body)?, base).await.map(Json)
}

/// A body sent without a JSON content type reads as an empty object.
fn or_empty<T: Default>(body: Result<Json<T>>) -> Result<T> {
    match body {
        Ok(Json(args)) => Ok(args),
        Err(Error::JsonValidation(JsonRejection::MissingJsonContentType(_))) => Ok(T::default()),
        Err(error) => Err(error),
    }
}

async fn delete_note(Path(NoteIdPath { id }): Path<NoteIdPath>, base: BaseParams) -> Result<StatusCode> {
    handlers::delete_note(id, base)
        .await
        .map(|_| StatusCode::NO_CONTENT)
}
