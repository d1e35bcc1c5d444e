use sea_query::{Expr, ExprTrait, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::SqlitePool;
use time::OffsetDateTime;
use weekplan_db::table::Event as EventTable;
use weekplan_shared::{
    calendar::{Event, WeeklyCalendarData},
    week::WeekWindow,
};

use crate::row::{COLUMNS, EventRow};

#[derive(Clone)]
pub struct Query(pub SqlitePool);

impl Query {
    /// Week window around `reference`, in the IANA timezone `tz`, with every
    /// stored event.
    ///
    /// Events only carry a weekday label, so there is nothing to filter on:
    /// the same events come back for every week.
    #[tracing::instrument(skip(self))]
    pub async fn weekly_calendar(
        &self,
        reference: OffsetDateTime,
        tz: &str,
    ) -> weekplan_shared::Result<WeeklyCalendarData> {
        let window = WeekWindow::new(reference, tz);
        let events = all(&self.0).await?;

        Ok(WeeklyCalendarData::new(window, events))
    }

    pub async fn find(&self, id: impl Into<String>) -> weekplan_shared::Result<Option<Event>> {
        find(&self.0, id).await
    }

    pub async fn all(&self) -> weekplan_shared::Result<Vec<Event>> {
        all(&self.0).await
    }
}

pub async fn find(
    pool: &SqlitePool,
    id: impl Into<String>,
) -> weekplan_shared::Result<Option<Event>> {
    let id: String = id.into();
    let statement = sea_query::Query::select()
        .columns(COLUMNS)
        .from(EventTable::Table)
        .and_where(Expr::col(EventTable::Id).eq(id))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    sqlx::query_as_with::<_, EventRow, _>(&sql, values)
        .fetch_optional(pool)
        .await?
        .map(Event::try_from)
        .transpose()
}

/// Every stored event, Monday first, scheduled before unscheduled.
pub async fn all(pool: &SqlitePool) -> weekplan_shared::Result<Vec<Event>> {
    let statement = sea_query::Query::select()
        .columns(COLUMNS)
        .from(EventTable::Table)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let rows = sqlx::query_as_with::<_, EventRow, _>(&sql, values)
        .fetch_all(pool)
        .await?;

    let mut events = rows
        .into_iter()
        .map(Event::try_from)
        .collect::<weekplan_shared::Result<Vec<_>>>()?;

    events.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));

    Ok(events)
}
