use std::fmt::{Display, Error as FmtError, Formatter};
use std::str::FromStr;
use thiserror::Error;

use super::Task;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Navigation {
  Edit,
  Delete,
  Next,
  Previous,
  Back,
}

impl Navigation {
  const ALL: [Self; 5] = [
    Self::Edit,
    Self::Delete,
    Self::Next,
    Self::Previous,
    Self::Back,
  ];

  #[must_use]
  pub const fn key(self) -> char {
    match self {
      Self::Edit => 'e',
      Self::Delete => 'd',
      Self::Next => 'n',
      Self::Previous => 'p',
      Self::Back => 'b',
    }
  }

  #[must_use]
  pub const fn label(self) -> &'static str {
    match self {
      Self::Edit => "[E]dit entry",
      Self::Delete => "[D]elete entry",
      Self::Next => "[N]ext",
      Self::Previous => "[P]revious",
      Self::Back => "[B]ack to search menu",
    }
  }
}

impl Display for Navigation {
  fn fmt(&self, formatter: &mut Formatter<'_>) -> Result<(), FmtError> {
    formatter.write_str(self.label())
  }
}

impl FromStr for Navigation {
  type Err = NavigationError;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let mut chars = s.trim().chars();
    match (chars.next(), chars.next()) {
      (Some(key), None) => Self::ALL
        .into_iter()
        .find(|nav| nav.key() == key.to_ascii_lowercase())
        .ok_or(NavigationError::Unknown),
      _ => Err(NavigationError::Unknown),
    }
  }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NavigationError {
  #[error("That is not an option. Try again.")]
  Unknown,
  #[error("{0} is not available here. Try again.")]
  Unavailable(Navigation),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BrowseStep {
  Moved,
  Back,
  Edit(Task),
  Delete(Task),
}

/// A cursor over a non-empty list of search results.
#[derive(Debug)]
pub struct Browser {
  results: Vec<Task>,
  cursor: usize,
}

impl Browser {
  #[must_use]
  pub fn new(results: Vec<Task>) -> Option<Self> {
    if results.is_empty() {
      None
    } else {
      Some(Self { results, cursor: 0 })
    }
  }

  #[must_use]
  pub fn current(&self) -> &Task {
    &self.results[self.cursor]
  }

  #[must_use]
  pub const fn cursor(&self) -> usize {
    self.cursor
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.results.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.results.is_empty()
  }

  #[must_use]
  pub fn available(&self) -> Vec<Navigation> {
    Navigation::ALL
      .into_iter()
      .filter(|nav| self.is_available(*nav))
      .collect()
  }

  #[must_use]
  pub fn is_available(&self, nav: Navigation) -> bool {
    match nav {
      Navigation::Next => self.cursor + 1 < self.results.len(),
      Navigation::Previous => self.cursor > 0,
      Navigation::Edit | Navigation::Delete | Navigation::Back => true,
    }
  }

  pub fn apply(&mut self, nav: Navigation) -> Result<BrowseStep, NavigationError> {
    if !self.is_available(nav) {
      return Err(NavigationError::Unavailable(nav));
    }
    Ok(match nav {
      Navigation::Next => {
        self.cursor += 1;
        BrowseStep::Moved
      }
      Navigation::Previous => {
        self.cursor -= 1;
        BrowseStep::Moved
      }
      Navigation::Back => BrowseStep::Back,
      Navigation::Edit => BrowseStep::Edit(self.current().clone()),
      Navigation::Delete => BrowseStep::Delete(self.current().clone()),
    })
  }
}
