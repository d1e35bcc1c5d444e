use sea_query::{Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use time::OffsetDateTime;
use validator::Validate;
use weekplan_db::table::Event as EventTable;
use weekplan_shared::{
    calendar::{CreateEventInput, Event, normalize_text, normalize_time},
    user,
};

use crate::row::{EventRow, to_millis};

impl super::Command {
    pub async fn create(&self, input: CreateEventInput) -> weekplan_shared::Result<Event> {
        input.validate()?;

        let Some(day) = input.day else {
            user!("Day is required");
        };

        let id = uuid::Uuid::new_v4().to_string();
        let now = to_millis(OffsetDateTime::now_utc());

        let statement = Query::insert()
            .into_table(EventTable::Table)
            .columns([
                EventTable::Id,
                EventTable::Title,
                EventTable::Day,
                EventTable::Time,
                EventTable::Description,
                EventTable::CreatedAt,
                EventTable::UpdatedAt,
            ])
            .values_panic([
                id.to_owned().into(),
                input.title.trim().into(),
                day.to_string().into(),
                normalize_time(input.time).into(),
                normalize_text(input.description).into(),
                now.into(),
                now.into(),
            ])
            .returning_all()
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let row = sqlx::query_as_with::<_, EventRow, _>(&sql, values)
            .fetch_one(&self.write_db)
            .await?;

        tracing::info!(id = %id, day = %day, "event created");

        Event::try_from(row)
    }
}
