use lazy_static::lazy_static;
use rusqlite_migration::{Migrations, M};

lazy_static! {
    pub static ref MIGRATIONS: Migrations<'static> = Migrations::new(vec![M::up(
        r#"
            CREATE TABLE notes (
                id BLOB PRIMARY KEY CHECK(length(id) = 16) NOT NULL UNIQUE DEFAULT (uuid7_now()),

                content TEXT NOT NULL CHECK(length(content) >= 5),
                important INTEGER NOT NULL DEFAULT 0,

                version INTEGER NOT NULL DEFAULT 0
            );
        "#
    )]);
}

