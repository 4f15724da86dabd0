mod handlers;
mod model;
mod routes;
mod store;
mod validation;

pub use model::*;
pub use routes::router;
pub use store::{MemoryStore, NoteStore, SqliteStore, SAMPLE_NOTES};
