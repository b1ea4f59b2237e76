//! Calendar upstream client, Google Calendar v3 wire shape.
//!
//! Authentication is an API key query parameter supplied by configuration;
//! how that key is provisioned is outside this repo. Reads go through a
//! [`crate::cache::Cache`]; event creation is an uncached write.

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::cache::Fetch;
use crate::error::FetchError;
use crate::http;

/// Upcoming-events window: now .. now + 7 days.
const WINDOW_DAYS: i64 = 7;

/// Calendar upstream client for one configured calendar.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    calendar_id: String,
    api_key: String,
}

impl Client {
    pub fn new(
        base_url: impl Into<String>,
        calendar_id: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self::with_client(http::client(), base_url, calendar_id, api_key)
    }

    /// Same, with a caller-supplied `reqwest::Client`.
    pub fn with_client(
        http: reqwest::Client,
        base_url: impl Into<String>,
        calendar_id: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            calendar_id: calendar_id.into(),
            api_key: api_key.into(),
        }
    }

    /// Upcoming events: the 7-day window, recurring events expanded to single
    /// instances, deleted events excluded.
    pub async fn list(&self) -> Result<Events, FetchError> {
        let now = Utc::now();
        let time_min = now.to_rfc3339();
        let time_max = (now + Duration::days(WINDOW_DAYS)).to_rfc3339();
        let url = format!("{}/calendars/{}/events", self.base_url, self.calendar_id);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("singleEvents", "true"),
                ("showDeleted", "false"),
                ("timeMin", time_min.as_str()),
                ("timeMax", time_max.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;
        FetchError::check_status(response.status())?;
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Inserts `event` as an all-day entry on the configured calendar and
    /// returns the saved upstream event.
    pub async fn insert(&self, event: &NewEvent) -> Result<Event, FetchError> {
        let url = format!("{}/calendars/{}/events", self.base_url, self.calendar_id);
        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&all_day_body(event))
            .send()
            .await?;
        FetchError::check_status(response.status())?;
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Calendars visible to the configured key.
    pub async fn calendars(&self) -> Result<CalendarList, FetchError> {
        let url = format!("{}/users/me/calendarList", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;
        FetchError::check_status(response.status())?;
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// The upstream body for an all-day event: start date == end date, no times.
fn all_day_body(event: &NewEvent) -> Event {
    let date = EventDateTime {
        date: Some(event.date.date_naive()),
        ..EventDateTime::default()
    };
    Event {
        summary: event.summary.clone(),
        start: date.clone(),
        end: date,
        ..Event::default()
    }
}

#[async_trait]
impl Fetch for Client {
    type Value = Events;

    async fn fetch(&self) -> Result<Events, FetchError> {
        self.list().await
    }
}

/// Inbound shape for creating an event: `{"summary": ..., "date": rfc3339}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEvent {
    pub summary: String,
    pub date: DateTime<Utc>,
}

/// One page of upcoming events.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Events {
    pub summary: String,
    pub time_zone: String,
    pub items: Vec<Event>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Event {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub status: String,
    pub summary: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub start: EventDateTime,
    pub end: EventDateTime,
}

/// Either an all-day `date` or a timed `dateTime`, as the upstream models it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EventDateTime {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CalendarList {
    pub items: Vec<CalendarListEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CalendarListEntry {
    pub id: String,
    pub summary: String,
    pub primary: bool,
}
