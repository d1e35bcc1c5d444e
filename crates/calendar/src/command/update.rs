use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use time::OffsetDateTime;
use validator::Validate;
use weekplan_db::table::Event as EventTable;
use weekplan_shared::{
    calendar::{Event, EventPatch, normalize_text, normalize_time},
    not_found,
};

use crate::row::{EventRow, to_millis};

impl super::Command {
    /// Applies the fields present in `patch`. The stored `updated_at` is
    /// bumped past its previous value even when the clock has not moved.
    ///
    /// An unknown id is reported before an invalid patch.
    pub async fn update(
        &self,
        id: impl Into<String>,
        patch: EventPatch,
    ) -> weekplan_shared::Result<Event> {
        let id = id.into();

        if let Err(errors) = patch.validate() {
            if crate::find(&self.read_db, &id).await?.is_none() {
                not_found!("Event not found");
            }

            return Err(errors.into());
        }

        if patch.is_empty() {
            let Some(event) = crate::find(&self.read_db, &id).await? else {
                not_found!("Event not found");
            };

            return Ok(event);
        }

        let now = to_millis(OffsetDateTime::now_utc());
        let mut statement = Query::update();
        statement.table(EventTable::Table);

        if let Some(title) = &patch.title {
            statement.value(EventTable::Title, title.trim());
        }

        if let Some(day) = patch.day {
            statement.value(EventTable::Day, day.to_string());
        }

        if let Some(time) = patch.time {
            statement.value(EventTable::Time, normalize_time(time));
        }

        if let Some(description) = patch.description {
            statement.value(EventTable::Description, normalize_text(description));
        }

        statement
            .value(
                EventTable::UpdatedAt,
                Expr::cust_with_values("MAX(?, \"updated_at\" + 1)", [now]),
            )
            .and_where(Expr::col(EventTable::Id).eq(id.as_str()))
            .returning_all();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let Some(row) = sqlx::query_as_with::<_, EventRow, _>(&sql, values)
            .fetch_optional(&self.write_db)
            .await?
        else {
            not_found!("Event not found");
        };

        tracing::info!(id = %id, "event updated");

        Event::try_from(row)
    }
}
