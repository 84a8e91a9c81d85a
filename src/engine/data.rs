use serde::de::Error as _;
use serde::{self, Deserializer, Serializer};
use serde_derive::{Deserialize, Serialize};
use std::fmt::{Display, Error as FmtError, Formatter};
use std::str::FromStr;
use std::time::Duration as StdDuration;
use thiserror::Error;
use time::macros::format_description;
use time::Date;

/// Stored when the user declines to add notes.
pub const NO_NOTES: &str = " ";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
  #[error("Task name cannot be empty.")]
  EmptyName,
  #[error("Sorry, {0} is not a valid date.")]
  InvalidDate(String),
  #[error("{0} is not a valid number of minutes.")]
  InvalidDuration(String),
  #[error("The start date {start} cannot be after the end date {end}.")]
  InvalidRange { start: TaskDate, end: TaskDate },
  #[error("Not a valid regular expression: {0}")]
  InvalidPattern(String),
}

#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct TaskDate(Date);

impl TaskDate {
  #[must_use]
  pub const fn new(date: Date) -> Self {
    Self(date)
  }
}

impl Display for TaskDate {
  fn fmt(&self, formatter: &mut Formatter<'_>) -> Result<(), FmtError> {
    write!(
      formatter,
      "{:02}-{:02}-{:04}",
      self.0.day(),
      u8::from(self.0.month()),
      self.0.year()
    )
  }
}

impl FromStr for TaskDate {
  type Err = ValidationError;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let invalid = || ValidationError::InvalidDate(s.into());
    let trimmed = s.trim();
    // `[year]` also accepts a sign and extra digits.
    let year = trimmed.splitn(3, '-').nth(2).ok_or_else(invalid)?;
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
      return Err(invalid());
    }
    let date = Date::parse(
      trimmed,
      format_description!("[day padding:none]-[month padding:none]-[year]"),
    )
    .map_err(|_| invalid())?;
    if date.year() < 1 {
      return Err(invalid());
    }
    Ok(Self(date))
  }
}

impl serde::Serialize for TaskDate {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    serializer.serialize_str(&self.to_string())
  }
}

impl<'de> serde::Deserialize<'de> for TaskDate {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    let s = String::deserialize(deserializer)?;
    s.parse().map_err(|e: ValidationError| D::Error::custom(e.to_string()))
  }
}

/// One row of the work log. Two tasks are the same task iff all four fields
/// are equal; there is no other identity.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Task {
  pub name: String,
  pub date: TaskDate,
  /// Minutes.
  pub duration: i64,
  pub notes: String,
}

impl Task {
  #[must_use]
  pub const fn new(name: String, date: TaskDate, duration: i64, notes: String) -> Self {
    Self {
      name,
      date,
      duration,
      notes,
    }
  }

  /// Human readable duration, e.g. `1h 30m`, for positive durations.
  #[must_use]
  pub fn human_duration(&self) -> Option<String> {
    let minutes = u64::try_from(self.duration).ok().filter(|&m| m > 0)?;
    let elapsed = StdDuration::from_secs(minutes.saturating_mul(60));
    Some(humantime::format_duration(elapsed).to_string())
  }
}

impl Display for Task {
  fn fmt(&self, formatter: &mut Formatter<'_>) -> Result<(), FmtError> {
    writeln!(formatter, "Task Name: {}", self.name)?;
    writeln!(formatter, "Date: {}", self.date)?;
    match self.human_duration() {
      Some(human) => writeln!(formatter, "Duration: {} minutes ({human})", self.duration)?,
      None => writeln!(formatter, "Duration: {} minutes", self.duration)?,
    }
    write!(formatter, "Notes: {}", self.notes)
  }
}

pub fn parse_name(input: &str) -> Result<String, ValidationError> {
  if input.is_empty() {
    Err(ValidationError::EmptyName)
  } else {
    Ok(input.into())
  }
}

pub fn parse_duration(input: &str) -> Result<i64, ValidationError> {
  input
    .trim()
    .parse()
    .map_err(|_| ValidationError::InvalidDuration(input.into()))
}

#[cfg(test)]
mod test {
  use super::{parse_duration, parse_name, Task, TaskDate, ValidationError};
  use time::macros::date;

  #[test]
  fn parses_and_pads_dates() {
    let parsed: TaskDate = "1-2-2024".parse().unwrap();
    assert_eq!(parsed, TaskDate::new(date!(2024 - 02 - 01)));
    assert_eq!(parsed.to_string(), "01-02-2024");
    assert_eq!("01-02-2024".parse::<TaskDate>().unwrap(), parsed);
  }

  #[test]
  fn rejects_invalid_dates() {
    for input in [
      "",
      "2024-02-01",
      "31-02-2024",
      "01/02/2024",
      "1-2-24",
      "tomorrow",
      "01-02--2024",
      "01-02-+2024",
      "01-02-0000",
      "01-02-12024",
    ] {
      assert_eq!(
        input.parse::<TaskDate>(),
        Err(ValidationError::InvalidDate(input.into())),
        "{input}"
      );
    }
  }

  #[test]
  fn stored_years_keep_four_digits() {
    let parsed: TaskDate = "31-12-0001".parse().unwrap();
    assert_eq!(parsed, TaskDate::new(date!(1 - 12 - 31)));
    assert_eq!(parsed.to_string(), "31-12-0001");
    assert_eq!(" 9-9-9999 ".parse::<TaskDate>().unwrap().to_string(), "09-09-9999");
  }

  #[test]
  fn tasks_can_be_built_in_const_context() {
    const EMPTY: Task = Task::new(
      String::new(),
      TaskDate::new(date!(2024 - 02 - 01)),
      0,
      String::new(),
    );
    assert_eq!(EMPTY.date.to_string(), "01-02-2024");
    assert_eq!(EMPTY.human_duration(), None);
  }

  #[test]
  fn validates_name_and_duration() {
    assert_eq!(parse_name(""), Err(ValidationError::EmptyName));
    assert_eq!(parse_name(" Write report").unwrap(), " Write report");
    assert_eq!(parse_duration("90"), Ok(90));
    assert_eq!(parse_duration("-5"), Ok(-5));
    assert_eq!(
      parse_duration("1.5"),
      Err(ValidationError::InvalidDuration("1.5".into()))
    );
    assert!(parse_duration("ninety").is_err());
  }

  #[test]
  fn equality_covers_all_fields() {
    let date = "01-02-2024".parse().unwrap();
    let task = Task::new("Write report".into(), date, 30, "draft".into());
    assert_eq!(task, task.clone());
    let mut other = task.clone();
    other.notes = "final".into();
    assert_ne!(task, other);
    let mut other = task.clone();
    other.duration = 300;
    assert_ne!(task, other);
  }

  #[test]
  fn displays_human_duration() {
    let date = "01-02-2024".parse().unwrap();
    let task = Task::new("Write report".into(), date, 90, "draft".into());
    assert_eq!(
      task.to_string(),
      "Task Name: Write report\nDate: 01-02-2024\nDuration: 90 minutes (1h 30m)\nNotes: draft"
    );
    let task = Task::new("Nothing".into(), date, 0, " ".into());
    assert_eq!(task.human_duration(), None);
  }
}
