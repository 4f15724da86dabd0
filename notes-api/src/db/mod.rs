mod migrations;

use rusqlite::functions::FunctionFlags;
use uuid::Uuid;

pub use rusqlite;
pub use tokio_rusqlite;

use migrations::MIGRATIONS;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    TokioRusqlite(#[from] tokio_rusqlite::Error),
    #[error(transparent)]
    Rusqlite(#[from] rusqlite::Error),
    #[error("migration: {0}")]
    Migration(String),
}

pub type DB = tokio_rusqlite::Connection;

pub async fn init_db(path: &str) -> Result<DB> {
    let conn = tokio_rusqlite::Connection::open(path).await?;

    conn.call(|conn| {
        prepare(conn)?;
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |_| Ok(()))?;
        Ok(())
    })
    .await?;

    tracing::debug!("sqlite database ready at {path}");

    Ok(conn)
}

/// Fresh in-memory database with migrations applied.
pub async fn init_test_db() -> Result<DB> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    conn.call(|conn| prepare(conn)).await?;
    Ok(conn)
}

fn prepare(conn: &mut rusqlite::Connection) -> tokio_rusqlite::Result<()> {
    add_uuid_functions(conn)?;

    MIGRATIONS
        .to_latest(conn)
        .map_err(|e| tokio_rusqlite::Error::Other(Box::new(Error::Migration(e.to_string()))))?;

    conn.pragma_update(None, "foreign_keys", "ON")?;

    Ok(())
}

fn add_uuid_functions(conn: &mut rusqlite::Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function("uuid7_now", 0, FunctionFlags::SQLITE_UTF8, |_| Ok(Uuid::now_v7()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_db_has_empty_notes_table() -> Result<()> {
        let db = init_test_db().await?;

        let count = db
            .call(|conn| {
                conn.query_row::<u32, _, _>("select count(*) from notes", [], |r| r.get(0))
                    .map_err(|e| e.into())
            })
            .await?;

        assert_eq!(count, 0);
        Ok(())
    }

    #[tokio::test]
    async fn notes_table_rejects_short_content() -> Result<()> {
        let db = init_test_db().await?;

        let inserted = db
            .call(|conn| {
                conn.execute("INSERT INTO notes (content) VALUES ('abc')", [])
                    .map_err(|e| e.into())
            })
            .await;

        assert!(inserted.is_err());
        Ok(())
    }
}
