mod event;

use sqlx_migrator::vec_box;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "weekplan",
    "m0001",
    vec_box![],
    vec_box![
        event::CreateTable,
        event::CreateIdxDay,
        event::CreateIdxCreatedAt,
        event::CreateIdxUpdatedAt
    ]
);
