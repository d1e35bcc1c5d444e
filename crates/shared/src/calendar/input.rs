use std::{borrow::Cow, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use super::Day;

pub const TITLE_MAX_LEN: usize = 255;

static RE_TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([01]\d|2[0-3]):([0-5]\d)$").unwrap());

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct CreateEventInput {
    #[serde(default)]
    #[validate(custom(function = "validate_title"))]
    pub title: String,
    #[validate(required(message = "Day is required"))]
    pub day: Option<Day>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_time"))]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Sparse update: `None` leaves the field untouched. For `time` and
/// `description`, `Some(None)` clears the stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EventPatch {
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<String>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub day: Option<Day>,
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub time: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
}

impl EventPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.day.is_none()
            && self.time.is_none()
            && self.description.is_none()
    }

    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }
}

impl Validate for EventPatch {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Some(Err(err)) = self.title.as_deref().map(validate_title) {
            errors.add("title", err);
        }

        if let Some(Err(err)) = self
            .time
            .as_ref()
            .and_then(|time| time.as_deref())
            .map(validate_time)
        {
            errors.add("time", err);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// A present key must carry a value, `null` is rejected.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Distinguishes a missing key (`None`) from an explicit `null` (`Some(None)`).
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    let title = title.trim();

    if title.is_empty() {
        let mut error = ValidationError::new("required");
        error.message = Some(Cow::from("Title is required"));
        return Err(error);
    }

    if title.chars().count() > TITLE_MAX_LEN {
        let mut error = ValidationError::new("length");
        error.message = Some(Cow::from("Title must be at most 255 characters"));
        return Err(error);
    }

    Ok(())
}

/// An empty string means unscheduled.
fn validate_time(time: &str) -> Result<(), ValidationError> {
    if time.is_empty() || RE_TIME.is_match(time) {
        return Ok(());
    }

    let mut error = ValidationError::new("time");
    error.message = Some(Cow::from("Time must be in HH:MM format"));
    Err(error)
}

/// Trims free text, empty text is stored as absent.
pub fn normalize_text(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

pub fn normalize_time(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}
