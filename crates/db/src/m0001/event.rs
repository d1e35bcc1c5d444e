use sea_query::{
    ColumnDef, Expr, ExprTrait, Index, IndexCreateStatement, IndexDropStatement, Table,
    TableCreateStatement, TableDropStatement,
};

use crate::table::Event;

/// Weekday labels accepted by the `day` column when this migration ran
const DAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

pub struct CreateTable;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(Event::Table)
        .col(
            ColumnDef::new(Event::Id)
                .string()
                .not_null()
                .string_len(36)
                .primary_key(),
        )
        .col(
            ColumnDef::new(Event::Title)
                .string()
                .not_null()
                .string_len(255),
        )
        .col(
            ColumnDef::new(Event::Day)
                .string()
                .not_null()
                .string_len(9)
                .check(Expr::col(Event::Day).is_in(DAYS)),
        )
        .col(ColumnDef::new(Event::Time).string().string_len(5).null())
        .col(ColumnDef::new(Event::Description).text().null())
        .col(ColumnDef::new(Event::CreatedAt).big_integer().not_null())
        .col(ColumnDef::new(Event::UpdatedAt).big_integer().not_null())
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(Event::Table).to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateTable {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = create_table().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = drop_table().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }
}

fn create_idx(name: &str, col: Event) -> IndexCreateStatement {
    Index::create().name(name).table(Event::Table).col(col).to_owned()
}

fn drop_idx(name: &str) -> IndexDropStatement {
    Index::drop().name(name).table(Event::Table).to_owned()
}

macro_rules! index_operation {
    ($op:ident, $name:literal, $col:expr) => {
        pub struct $op;

        #[async_trait::async_trait]
        impl sqlx_migrator::Operation<sqlx::Sqlite> for $op {
            async fn up(
                &self,
                connection: &mut sqlx::SqliteConnection,
            ) -> Result<(), sqlx_migrator::Error> {
                let statement = create_idx($name, $col).to_string(sea_query::SqliteQueryBuilder);
                sqlx::query(&statement).execute(connection).await?;

                Ok(())
            }

            async fn down(
                &self,
                connection: &mut sqlx::SqliteConnection,
            ) -> Result<(), sqlx_migrator::Error> {
                let statement = drop_idx($name).to_string(sea_query::SqliteQueryBuilder);
                sqlx::query(&statement).execute(connection).await?;

                Ok(())
            }
        }
    };
}

index_operation!(CreateIdxDay, "idx_event_day", Event::Day);
index_operation!(CreateIdxCreatedAt, "idx_event_created_at", Event::CreatedAt);
index_operation!(CreateIdxUpdatedAt, "idx_event_updated_at", Event::UpdatedAt);
