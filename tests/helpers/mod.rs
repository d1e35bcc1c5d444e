#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::Value;
use temp_dir::TempDir;
use tower::ServiceExt;
use weekplan::{AppState, Config};

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub config: Config,
    // dropped last, removes the database file
    _dir: TempDir,
}

pub async fn setup_test_app() -> anyhow::Result<TestApp> {
    setup_test_app_with(Config::default()).await
}

pub async fn setup_test_app_with(mut config: Config) -> anyhow::Result<TestApp> {
    let dir = TempDir::new()?;
    config.database.url = format!("sqlite:{}", dir.child("db.sqlite3").to_str().unwrap());

    let write_pool = weekplan::db::create_write_pool(&config.database.url).await?;
    weekplan::migrate::run_migrations(&write_pool).await?;
    let read_pool =
        weekplan::db::create_read_pool(&config.database.url, config.database.max_connections)
            .await?;

    let state = AppState::new(config.clone(), read_pool, write_pool);

    Ok(TestApp {
        router: weekplan::router(state.clone()),
        state,
        config,
        _dir: dir,
    })
}

impl TestApp {
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> anyhow::Result<(StatusCode, Value)> {
        let mut req = Request::builder().method(method).uri(uri);

        let body = match body {
            Some(body) => {
                req = req.header(header::CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_vec(&body)?)
            }
            None => Body::empty(),
        };

        self.send(req.body(body)?).await
    }

    pub async fn send(&self, req: Request<Body>) -> anyhow::Result<(StatusCode, Value)> {
        let res = self.router.clone().oneshot(req).await?;
        let status = res.status();
        let bytes = res.into_body().collect().await?.to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };

        Ok((status, body))
    }

    pub async fn get(&self, uri: &str) -> anyhow::Result<(StatusCode, Value)> {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> anyhow::Result<(StatusCode, Value)> {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, body: Value) -> anyhow::Result<(StatusCode, Value)> {
        self.request(Method::PATCH, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> anyhow::Result<(StatusCode, Value)> {
        self.request(Method::DELETE, uri, None).await
    }

    /// Creates an event and returns its JSON representation
    pub async fn create_event(&self, body: Value) -> anyhow::Result<Value> {
        let (status, body) = self.post("/api/calendar/events", body).await?;
        assert_eq!(status, StatusCode::OK, "{body}");

        Ok(body["data"].clone())
    }
}
