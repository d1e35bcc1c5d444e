use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use weekplan_db::table::Event as EventTable;
use weekplan_shared::not_found;

impl super::Command {
    pub async fn delete(&self, id: impl Into<String>) -> weekplan_shared::Result<()> {
        let id = id.into();
        let statement = Query::delete()
            .from_table(EventTable::Table)
            .and_where(Expr::col(EventTable::Id).eq(id.as_str()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        if result.rows_affected() == 0 {
            not_found!("Event not found");
        }

        tracing::info!(id = %id, "event deleted");

        Ok(())
    }
}
