mod input;

pub use input::*;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};
use time::{OffsetDateTime, Weekday};

use crate::week::{Week, WeekWindow};

#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    /// Monday = 1 ... Sunday = 7
    pub fn number_from_monday(self) -> u8 {
        self as u8 + 1
    }
}

impl From<Weekday> for Day {
    fn from(value: Weekday) -> Self {
        match value {
            Weekday::Monday => Day::Monday,
            Weekday::Tuesday => Day::Tuesday,
            Weekday::Wednesday => Day::Wednesday,
            Weekday::Thursday => Day::Thursday,
            Weekday::Friday => Day::Friday,
            Weekday::Saturday => Day::Saturday,
            Weekday::Sunday => Day::Sunday,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub day: Day,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Event {
    /// Applies a patch the way the store does, stamping `updated_at` only
    /// when the patch carries at least one field.
    pub fn apply(&mut self, patch: &EventPatch, updated_at: OffsetDateTime) {
        if patch.is_empty() {
            return;
        }

        if let Some(title) = &patch.title {
            self.title = title.trim().to_owned();
        }

        if let Some(day) = patch.day {
            self.day = day;
        }

        if let Some(time) = &patch.time {
            self.time = normalize_time(time.clone());
        }

        if let Some(description) = &patch.description {
            self.description = normalize_text(description.clone());
        }

        self.updated_at = updated_at.max(self.updated_at);
    }

    /// Day first, then scheduled before unscheduled, then insertion order.
    pub fn sort_key(&self) -> (Day, bool, Option<&str>, OffsetDateTime) {
        (
            self.day,
            self.time.is_none(),
            self.time.as_deref(),
            self.created_at,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyCalendarData {
    pub year: i32,
    pub month: String,
    pub week_number: u8,
    #[serde(with = "time::serde::rfc3339")]
    pub week_start: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub week_end: OffsetDateTime,
    pub events: Vec<Event>,
}

impl WeeklyCalendarData {
    pub fn new(window: WeekWindow, events: Vec<Event>) -> Self {
        Self {
            year: window.year,
            month: window.month_name(),
            week_number: window.week_number,
            week_start: window.week.start,
            week_end: window.week.end,
            events,
        }
    }

    pub fn week(&self) -> Week {
        Week {
            start: self.week_start,
            end: self.week_end,
        }
    }

    pub fn events_on(&self, day: Day) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(move |event| event.day == day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn event() -> Event {
        Event {
            id: "5b1f0a52-2c1c-4f55-9b59-4c1bb1a4f0a1".to_owned(),
            title: "Standup".to_owned(),
            day: Day::Monday,
            time: Some("09:00".to_owned()),
            description: None,
            created_at: datetime!(2025-01-20 08:00:00 UTC),
            updated_at: datetime!(2025-01-20 08:00:00 UTC),
        }
    }

    #[test]
    fn test_day_labels() {
        assert_eq!(Day::VARIANTS.len(), 7);
        assert_eq!(Day::VARIANTS[0], Day::Monday);
        assert_eq!(Day::Sunday.number_from_monday(), 7);
        assert_eq!(Day::from(Weekday::Wednesday), Day::Wednesday);
        assert_eq!("Friday".parse::<Day>().unwrap(), Day::Friday);
        assert!("Funday".parse::<Day>().is_err());
        assert!(Day::Monday < Day::Sunday);
    }

    #[test]
    fn test_event_json_shape() {
        let value = serde_json::to_value(event()).unwrap();

        assert_eq!(value["day"], "Monday");
        assert_eq!(value["time"], "09:00");
        assert_eq!(value["createdAt"], "2025-01-20T08:00:00Z");
        assert!(value.get("description").is_none());
    }

    #[test]
    fn test_apply_patch() {
        let mut event = event();
        let patch = EventPatch {
            description: Some(Some("  daily sync ".to_owned())),
            time: Some(None),
            ..Default::default()
        };

        event.apply(&patch, datetime!(2025-01-20 09:00:00 UTC));

        assert_eq!(event.title, "Standup");
        assert_eq!(event.day, Day::Monday);
        assert_eq!(event.time, None);
        assert_eq!(event.description.as_deref(), Some("daily sync"));
        assert_eq!(event.updated_at, datetime!(2025-01-20 09:00:00 UTC));
    }

    #[test]
    fn test_apply_empty_patch_keeps_updated_at() {
        let mut event = event();
        event.apply(&EventPatch::default(), datetime!(2025-01-20 09:00:00 UTC));

        assert_eq!(event.updated_at, datetime!(2025-01-20 08:00:00 UTC));
    }

    #[test]
    fn test_sort_key_orders_unscheduled_last() {
        let mut morning = event();
        morning.time = Some("07:00".to_owned());
        let mut unscheduled = event();
        unscheduled.time = None;
        let mut tuesday = event();
        tuesday.day = Day::Tuesday;

        let mut events = vec![tuesday.clone(), unscheduled.clone(), event(), morning.clone()];
        events.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));

        assert_eq!(events, vec![morning, event(), unscheduled, tuesday]);
    }
}
