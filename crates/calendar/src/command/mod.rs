use sqlx::SqlitePool;

mod create;
mod delete;
mod update;

/// Write side of the calendar. Reads that a write depends on go through
/// `read_db`, everything else through the single-connection `write_db`.
#[derive(Clone)]
pub struct Command {
    pub read_db: SqlitePool,
    pub write_db: SqlitePool,
}

impl Command {
    pub fn new(read_db: SqlitePool, write_db: SqlitePool) -> Self {
        Self { read_db, write_db }
    }
}
