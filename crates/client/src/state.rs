use time::{Date, Duration, OffsetDateTime};
use weekplan_shared::{
    calendar::{CreateEventInput, Day, Event, EventPatch, WeeklyCalendarData},
    week::{Week, WeekWindow},
};

use crate::{CalendarApi, ClientError};

pub const NEW_EVENT_TITLE: &str = "New Event";
pub const NEW_EVENT_TIME: &str = "12:00";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Prev,
    Next,
    Current,
}

/// Client-side cache of one week. Mutations are applied locally only after
/// the server confirmed them.
#[derive(Debug, Clone)]
pub struct CalendarState {
    api: CalendarApi,
    calendar: WeeklyCalendarData,
    error: Option<String>,
    loading: bool,
}

impl CalendarState {
    pub fn new(api: CalendarApi) -> Self {
        Self {
            api,
            calendar: WeeklyCalendarData::new(WeekWindow::now("UTC"), vec![]),
            error: None,
            loading: false,
        }
    }

    pub fn calendar(&self) -> &WeeklyCalendarData {
        &self.calendar
    }

    pub fn events(&self) -> &[Event] {
        &self.calendar.events
    }

    pub fn week(&self) -> Week {
        self.calendar.week()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn events_on(&self, day: Day) -> Vec<&Event> {
        self.calendar.events_on(day).collect()
    }

    /// Fetches the server's current week.
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        self.fetch(None).await
    }

    pub async fn navigate(&mut self, navigation: Navigation) -> Result<(), ClientError> {
        self.fetch(self.target_monday(navigation)).await
    }

    /// Local Monday seven days away from the shown one, `None` for the
    /// server's current week.
    fn target_monday(&self, navigation: Navigation) -> Option<Date> {
        let monday = self.calendar.week().monday();

        match navigation {
            Navigation::Prev => Some(monday - Duration::weeks(1)),
            Navigation::Next => Some(monday + Duration::weeks(1)),
            Navigation::Current => None,
        }
    }

    pub async fn create(&mut self, input: CreateEventInput) -> Result<Event, ClientError> {
        let event = self.api.create(&input).await?;
        self.created(event.clone());

        Ok(event)
    }

    /// Creates the placeholder event the week view adds on a day column.
    pub async fn add_event(&mut self, day: Day) -> Result<Event, ClientError> {
        self.create(CreateEventInput {
            title: NEW_EVENT_TITLE.to_owned(),
            day: Some(day),
            time: Some(NEW_EVENT_TIME.to_owned()),
            description: None,
        })
        .await
    }

    pub async fn update(&mut self, id: &str, patch: EventPatch) -> Result<(), ClientError> {
        self.api.update(id, &patch).await?;
        self.updated(id, &patch, OffsetDateTime::now_utc());

        Ok(())
    }

    pub async fn delete(&mut self, id: &str) -> Result<(), ClientError> {
        self.api.delete(id).await?;
        self.deleted(id);

        Ok(())
    }

    async fn fetch(&mut self, week_start: Option<Date>) -> Result<(), ClientError> {
        self.loading = true;
        let res = self.api.weekly(week_start).await;
        self.loading = false;

        self.fetched(res)
    }

    fn fetched(
        &mut self,
        res: Result<WeeklyCalendarData, ClientError>,
    ) -> Result<(), ClientError> {
        match res {
            Ok(calendar) => {
                self.calendar = calendar;
                self.error = None;

                Ok(())
            }
            Err(err) => {
                tracing::warn!(err = %err, "failed to fetch calendar");
                self.error = Some(err.to_string());

                Err(err)
            }
        }
    }

    fn created(&mut self, event: Event) {
        self.calendar.events.push(event);
    }

    fn updated(&mut self, id: &str, patch: &EventPatch, now: OffsetDateTime) {
        if let Some(event) = self.calendar.events.iter_mut().find(|event| event.id == id) {
            event.apply(patch, now);
        }
    }

    fn deleted(&mut self, id: &str) {
        self.calendar.events.retain(|event| event.id != id);
    }
}
