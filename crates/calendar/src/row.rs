use sqlx::prelude::FromRow;
use time::OffsetDateTime;
use weekplan_db::table::Event as EventTable;
use weekplan_shared::calendar::{Day, Event};

pub(crate) const COLUMNS: [EventTable; 7] = [
    EventTable::Id,
    EventTable::Title,
    EventTable::Day,
    EventTable::Time,
    EventTable::Description,
    EventTable::CreatedAt,
    EventTable::UpdatedAt,
];

#[derive(Debug, FromRow)]
pub(crate) struct EventRow {
    pub id: String,
    pub title: String,
    pub day: sqlx::types::Text<Day>,
    pub time: Option<String>,
    pub description: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl TryFrom<EventRow> for Event {
    type Error = weekplan_shared::Error;

    fn try_from(row: EventRow) -> Result<Self, Self::Error> {
        Ok(Event {
            id: row.id,
            title: row.title,
            day: row.day.0,
            time: row.time,
            description: row.description,
            created_at: from_millis(row.created_at)?,
            updated_at: from_millis(row.updated_at)?,
        })
    }
}

/// Timestamps are stored as unix milliseconds.
pub(crate) fn to_millis(instant: OffsetDateTime) -> i64 {
    (instant.unix_timestamp_nanos() / 1_000_000) as i64
}

pub(crate) fn from_millis(millis: i64) -> anyhow::Result<OffsetDateTime> {
    Ok(OffsetDateTime::from_unix_timestamp_nanos(
        millis as i128 * 1_000_000,
    )?)
}
