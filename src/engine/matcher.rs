use regex::Regex;

use super::{Task, TaskDate, ValidationError};

/// Inclusive range of dates. Cannot be built with the start after the end.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct DateRange {
  start: TaskDate,
  end: TaskDate,
}

impl DateRange {
  pub fn new(start: TaskDate, end: TaskDate) -> Result<Self, ValidationError> {
    if start > end {
      return Err(ValidationError::InvalidRange { start, end });
    }
    Ok(Self { start, end })
  }

  #[must_use]
  pub fn contains(&self, date: TaskDate) -> bool {
    self.start <= date && date <= self.end
  }
}

#[derive(Clone, Debug)]
pub enum Query {
  All,
  ExactDate(TaskDate),
  DateRange(DateRange),
  /// Minutes, compared numerically.
  Duration(i64),
  /// Case-sensitive substring of the name or the notes.
  Text(String),
  /// Searched in every field, date and duration in their stored form.
  Pattern(Regex),
}

impl Query {
  pub fn pattern(input: &str) -> Result<Self, ValidationError> {
    Regex::new(input)
      .map(Self::Pattern)
      .map_err(|e| ValidationError::InvalidPattern(e.to_string()))
  }

  #[must_use]
  pub fn matches(&self, task: &Task) -> bool {
    match self {
      Self::All => true,
      Self::ExactDate(date) => task.date == *date,
      Self::DateRange(range) => range.contains(task.date),
      Self::Duration(minutes) => task.duration == *minutes,
      Self::Text(text) => task.name.contains(text.as_str()) || task.notes.contains(text.as_str()),
      Self::Pattern(regex) => {
        regex.is_match(&task.name)
          || regex.is_match(&task.date.to_string())
          || regex.is_match(&task.duration.to_string())
          || regex.is_match(&task.notes)
      }
    }
  }
}

/// Tasks matching `query`, in store order.
#[must_use]
pub fn filter(tasks: &[Task], query: &Query) -> Vec<Task> {
  tasks
    .iter()
    .filter(|task| query.matches(task))
    .cloned()
    .collect()
}

/// Every date that has a task, in the order the dates first appear.
#[must_use]
pub fn distinct_dates(tasks: &[Task]) -> Vec<TaskDate> {
  let mut dates: Vec<TaskDate> = Vec::new();
  for task in tasks {
    if !dates.contains(&task.date) {
      dates.push(task.date);
    }
  }
  dates
}
