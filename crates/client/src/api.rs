use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use time::{Date, macros::format_description};
use weekplan_shared::{
    ApiResponse,
    calendar::{CreateEventInput, Event, EventPatch, WeeklyCalendarData},
};

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("{message}")]
    Api { status: StatusCode, message: String },

    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    InvalidInput(String),

    #[error("Response is missing data")]
    MissingData,
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(err) => err.status(),
            _ => None,
        }
    }
}

/// HTTP client for the calendar endpoints
#[derive(Debug, Clone)]
pub struct CalendarApi {
    http: reqwest::Client,
    base_url: String,
}

impl Default for CalendarApi {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl CalendarApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET /calendar/weekly, `week_start` is a local date sent as
    /// `YYYY-MM-DD` so the server resolves it in its own timezone.
    pub async fn weekly(&self, week_start: Option<Date>) -> Result<WeeklyCalendarData, ClientError> {
        let mut req = self.request(Method::GET, "/calendar/weekly");

        if let Some(week_start) = week_start {
            let week_start = week_start
                .format(format_description!("[year]-[month]-[day]"))
                .map_err(|err| ClientError::InvalidInput(err.to_string()))?;
            req = req.query(&[("weekStart", week_start)]);
        }

        send::<WeeklyCalendarData>(req)
            .await?
            .ok_or(ClientError::MissingData)
    }

    /// POST /calendar/events
    pub async fn create(&self, input: &CreateEventInput) -> Result<Event, ClientError> {
        let req = self.request(Method::POST, "/calendar/events").json(input);

        send::<Event>(req).await?.ok_or(ClientError::MissingData)
    }

    /// PATCH /calendar/events/{id}
    pub async fn update(&self, id: &str, patch: &EventPatch) -> Result<(), ClientError> {
        let req = self
            .request(Method::PATCH, &format!("/calendar/events/{id}"))
            .json(patch);

        send::<serde_json::Value>(req).await?;

        Ok(())
    }

    /// DELETE /calendar/events/{id}
    pub async fn delete(&self, id: &str) -> Result<(), ClientError> {
        let req = self.request(Method::DELETE, &format!("/calendar/events/{id}"));

        send::<serde_json::Value>(req).await?;

        Ok(())
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, format!("{}{path}", self.base_url))
    }
}

/// Sends the request and unwraps the response envelope.
async fn send<T: DeserializeOwned>(req: RequestBuilder) -> Result<Option<T>, ClientError> {
    let resp = req.send().await?;
    let status = resp.status();

    if !status.is_success() {
        let message = match resp.json::<ApiResponse<serde_json::Value>>().await {
            Ok(ApiResponse {
                message: Some(message),
                ..
            }) => message,
            _ => status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_owned(),
        };

        tracing::debug!(status = %status, message = %message, "api request failed");

        return Err(ClientError::Api { status, message });
    }

    let body = resp.json::<ApiResponse<T>>().await?;

    if !body.success {
        return Err(ClientError::Api {
            status,
            message: body.message.unwrap_or_else(|| "Request failed".to_owned()),
        });
    }

    Ok(body.data)
}
