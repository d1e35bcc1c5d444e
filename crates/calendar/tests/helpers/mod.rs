use std::{path::PathBuf, str::FromStr};

use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};
use weekplan_calendar::{Command, CreateEventInput, Day, Event, Query};

pub struct State {
    pub command: Command,
    pub query: Query,
}

pub async fn setup_test_state(path: PathBuf) -> anyhow::Result<State> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    weekplan_db::migrator()?
        .run(&mut conn, &Plan::apply_all())
        .await?;

    Ok(State {
        command: Command::new(pool.clone(), pool.clone()),
        query: Query(pool),
    })
}

#[allow(dead_code)]
pub fn input(title: &str, day: Day, time: Option<&str>) -> CreateEventInput {
    CreateEventInput {
        title: title.to_owned(),
        day: Some(day),
        time: time.map(ToOwned::to_owned),
        description: None,
    }
}

#[allow(dead_code)]
pub async fn create_event(state: &State, title: &str, day: Day) -> anyhow::Result<Event> {
    Ok(state.command.create(input(title, day, Some("09:00"))).await?)
}
