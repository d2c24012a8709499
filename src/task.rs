//! Agenda entries (a title, a date, a time range and a category)

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// A stable, opaque identifier for a [`Task`].
///
/// Tasks are displayed in insertion order, but they are addressed (e.g. for deletion)
/// by this identifier rather than by their position, so that a stale position in the
/// UI cannot remove the wrong entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId {
    content: Uuid,
}

impl TaskId {
    /// Generate a random TaskId
    pub fn random() -> Self {
        Self {
            content: Uuid::new_v4(),
        }
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.content.to_hyphenated())
    }
}

impl FromStr for TaskId {
    type Err = uuid::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let content = Uuid::parse_str(s)?;
        Ok(Self { content })
    }
}

/// A single agenda entry.
///
/// Tasks are created once (usually from user-supplied form fields, see
/// [`Task::from_form`]) and are never edited afterwards. They are owned by the
/// [`TaskStore`](crate::store::TaskStore), other components only read snapshots.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Persistent unique identifier, picked at creation
    id: TaskId,
    /// The display name of the task
    title: String,
    /// The calendar day this task is scheduled on (no time zone attached)
    date: NaiveDate,
    /// Start of the time range, as a local clock time
    start_time: NaiveTime,
    /// End of the time range. Nothing enforces it to be later than `start_time`
    end_time: NaiveTime,
    /// Free-text label. May be empty
    category: String,
}

impl Task {
    /// Create a brand new Task. This will pick a new (random) task ID.
    pub fn new(
        title: String,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        category: String,
    ) -> Self {
        Self {
            id: TaskId::random(),
            title,
            date,
            start_time,
            end_time,
            category,
        }
    }

    /// Build a Task from raw form fields.
    ///
    /// Every field is trimmed first. `title`, `date`, `start_time` and `end_time` are
    /// required and must be non-empty; `category` is optional. Dates are expected as
    /// `YYYY-MM-DD` and clock times as `HH:MM`, which is what HTML date/time inputs
    /// produce.
    pub fn from_form(
        title: &str,
        date: &str,
        start_time: &str,
        end_time: &str,
        category: &str,
    ) -> Result<Self, ValidationError> {
        let title = non_empty(title, "title")?;
        let date = non_empty(date, "date")?;
        let start_time = non_empty(start_time, "start time")?;
        let end_time = non_empty(end_time, "end time")?;
        let category = category.trim();

        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| ValidationError::InvalidField("date"))?;
        let start_time = parse_clock_time(start_time)
            .ok_or(ValidationError::InvalidField("start time"))?;
        let end_time = parse_clock_time(end_time)
            .ok_or(ValidationError::InvalidField("end time"))?;

        Ok(Self::new(
            title.to_string(),
            date,
            start_time,
            end_time,
            category.to_string(),
        ))
    }

    pub fn id(&self) -> &TaskId { &self.id }
    pub fn title(&self) -> &str { &self.title }
    pub fn date(&self) -> NaiveDate { self.date }
    pub fn start_time(&self) -> NaiveTime { self.start_time }
    pub fn end_time(&self) -> NaiveTime { self.end_time }
    pub fn category(&self) -> &str { &self.category }
}

fn non_empty<'a>(value: &'a str, field: &'static str) -> Result<&'a str, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(value)
    }
}

/// Parse `HH:MM`, also accepting an explicit seconds part
fn parse_clock_time(text: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(text, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(text, "%H:%M:%S"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_form_fields() {
        let task = Task::from_form("Exam", "2025-05-01", "09:00", "11:00", "Math").unwrap();
        assert_eq!(task.title(), "Exam");
        assert_eq!(task.date(), NaiveDate::from_ymd(2025, 5, 1));
        assert_eq!(task.start_time(), NaiveTime::from_hms(9, 0, 0));
        assert_eq!(task.end_time(), NaiveTime::from_hms(11, 0, 0));
        assert_eq!(task.category(), "Math");
    }

    #[test]
    fn fields_are_trimmed() {
        let task = Task::from_form("  Exam ", " 2025-05-01", "09:00 ", " 11:00", "  ").unwrap();
        assert_eq!(task.title(), "Exam");
        assert_eq!(task.category(), "");
    }

    #[test]
    fn missing_required_fields_are_rejected() {
        let cases = [
            ("",     "2025-05-01", "09:00", "11:00", "title"),
            ("   ",  "2025-05-01", "09:00", "11:00", "title"),
            ("Exam", "",           "09:00", "11:00", "date"),
            ("Exam", "2025-05-01", "",      "11:00", "start time"),
            ("Exam", "2025-05-01", "09:00", "",      "end time"),
        ];
        for (title, date, start, end, expected) in cases.iter() {
            match Task::from_form(title, date, start, end, "Math") {
                Err(ValidationError::MissingField(f)) => assert_eq!(&f, expected),
                other => panic!("expected a missing `{}` error, got {:?}", expected, other),
            }
        }
    }

    #[test]
    fn unparseable_fields_are_rejected() {
        assert!(matches!(
            Task::from_form("Exam", "01/05/2025", "09:00", "11:00", ""),
            Err(ValidationError::InvalidField("date"))
        ));
        assert!(matches!(
            Task::from_form("Exam", "2025-05-01", "9am", "11:00", ""),
            Err(ValidationError::InvalidField("start time"))
        ));
    }

    #[test]
    fn category_is_optional() {
        assert!(Task::from_form("Exam", "2025-05-01", "09:00", "11:00", "").is_ok());
    }

    #[test]
    fn task_ids_are_unique() {
        let a = Task::from_form("A", "2025-05-01", "09:00", "11:00", "").unwrap();
        let b = Task::from_form("A", "2025-05-01", "09:00", "11:00", "").unwrap();
        assert_ne!(a.id(), b.id());
    }
}
