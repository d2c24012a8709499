//! Calendar events, as the remote calendar understands them

pub mod remote_calendar;

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::task::Task;

/// The time zone every mirrored event is interpreted in.
///
/// The remote calendar receives local wall-clock stamps together with this zone
/// identifier, so task times stay at the hour the user typed regardless of where
/// the server thinks it is.
pub const EVENT_TIME_ZONE: &str = "America/Bogota";

/// One end of an event's time range, in the remote calendar's wire representation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventTime {
    /// A naive ISO-8601 local stamp (`YYYY-MM-DDTHH:MM:SS`)
    #[serde(rename = "dateTime")]
    pub date_time: String,
    #[serde(rename = "timeZone")]
    pub time_zone: String,
}

impl EventTime {
    fn from_local(stamp: NaiveDateTime) -> Self {
        Self {
            date_time: stamp.format("%Y-%m-%dT%H:%M:%S").to_string(),
            time_zone: EVENT_TIME_ZONE.to_string(),
        }
    }
}

/// An event to be created on the remote calendar
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EventDraft {
    pub summary: String,
    pub start: EventTime,
    pub end: EventTime,
}

impl EventDraft {
    /// Derive the calendar event that mirrors a task.
    ///
    /// Start and end instants combine the task's date with its clock times; the
    /// summary is the title, with the category appended when one is set.
    pub fn from_task(task: &Task) -> Self {
        let summary = if task.category().is_empty() {
            task.title().to_string()
        } else {
            format!("{} ({})", task.title(), task.category())
        };

        Self {
            summary,
            start: EventTime::from_local(combine(task, task.start_time())),
            end: EventTime::from_local(combine(task, task.end_time())),
        }
    }
}

fn combine(task: &Task, time: NaiveTime) -> NaiveDateTime {
    task.date().and_time(time)
}

/// An existing event fetched from the remote calendar
#[derive(Clone, Debug, Deserialize)]
pub struct RemoteEvent {
    /// The identifier the server assigned to this event
    pub id: String,
    /// The display name. Events are not required to have one
    #[serde(default)]
    pub summary: Option<String>,
}

impl RemoteEvent {
    pub fn display_name(&self) -> &str {
        self.summary.as_deref().unwrap_or("(no title)")
    }
}
