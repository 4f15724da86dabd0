use axum::extract::{Extension, FromRequestParts};

use crate::notes::NoteStore;

/// Per-request dependencies handed to note handlers.
#[derive(Clone, Debug, FromRequestParts)]
pub struct BaseParams {
    #[from_request(via(Extension))]
    pub store: NoteStore,
}

#[cfg(test)]
impl BaseParams {
    pub fn new(store: NoteStore) -> Self {
        Self { store }
    }
}
