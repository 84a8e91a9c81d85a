use thiserror::Error;
use tracing::{debug, info, warn};

use super::guard::is_duplicate;
use super::matcher::{distinct_dates, filter, Query};
use super::{Store, StoreError, Task, TaskDate};

#[derive(Debug, Error)]
pub enum WorkLogError {
  #[error("This task already exists.")]
  Duplicate,
  #[error("There are no tasks to search.")]
  EmptyStore,
  #[error("No matches.")]
  NoMatches,
  #[error("The task is no longer in the work log.")]
  NotFound,
  #[error(transparent)]
  Storage(#[from] StoreError),
}

pub trait WorkLog {
  type Store: Store;
  fn create_task(&mut self, task: Task) -> Result<(), WorkLogError>;
  fn tasks(&self) -> Result<Vec<Task>, WorkLogError>;
  /// All tasks, or `EmptyStore` if there is nothing to search.
  fn searchable_tasks(&self) -> Result<Vec<Task>, WorkLogError>;
  fn known_dates(&self) -> Result<Vec<TaskDate>, WorkLogError>;
  fn search(&self, query: &Query) -> Result<Vec<Task>, WorkLogError>;
  fn edit_task(&mut self, target: &Task, replacement: Task) -> Result<(), WorkLogError>;
  fn delete_task(&mut self, target: &Task) -> Result<(), WorkLogError>;
  fn get_store(&self) -> &Self::Store;
}

#[derive(Debug)]
pub struct WorkLogImpl<S: Store> {
  store: S,
}

#[must_use]
pub const fn new<S: Store>(store: S) -> WorkLogImpl<S> {
  WorkLogImpl { store }
}

/// `tasks` without the first task equal to `target`.
fn without(mut tasks: Vec<Task>, target: &Task) -> Result<Vec<Task>, WorkLogError> {
  let pos = tasks
    .iter()
    .position(|task| task == target)
    .ok_or(WorkLogError::NotFound)?;
  tasks.remove(pos);
  Ok(tasks)
}

impl<S: Store> WorkLog for WorkLogImpl<S> {
  type Store = S;

  fn create_task(&mut self, task: Task) -> Result<(), WorkLogError> {
    if is_duplicate(&task, &self.store.load_all()?) {
      warn!(name = %task.name, date = %task.date, "refusing duplicate task");
      return Err(WorkLogError::Duplicate);
    }
    self.store.append(&task)?;
    info!(name = %task.name, date = %task.date, "created task");
    Ok(())
  }

  fn tasks(&self) -> Result<Vec<Task>, WorkLogError> {
    Ok(self.store.load_all()?)
  }

  fn searchable_tasks(&self) -> Result<Vec<Task>, WorkLogError> {
    let tasks = self.tasks()?;
    if tasks.is_empty() {
      return Err(WorkLogError::EmptyStore);
    }
    Ok(tasks)
  }

  fn known_dates(&self) -> Result<Vec<TaskDate>, WorkLogError> {
    Ok(distinct_dates(&self.tasks()?))
  }

  fn search(&self, query: &Query) -> Result<Vec<Task>, WorkLogError> {
    let results = filter(&self.searchable_tasks()?, query);
    debug!(?query, count = results.len(), "searched work log");
    if results.is_empty() {
      return Err(WorkLogError::NoMatches);
    }
    Ok(results)
  }

  fn edit_task(&mut self, target: &Task, replacement: Task) -> Result<(), WorkLogError> {
    let mut others = without(self.store.load_all()?, target)?;
    if is_duplicate(&replacement, &others) {
      warn!(
        name = %replacement.name,
        date = %replacement.date,
        "refusing edit into duplicate task"
      );
      return Err(WorkLogError::Duplicate);
    }
    info!(name = %replacement.name, date = %replacement.date, "edited task");
    others.push(replacement);
    self.store.replace_all(&others)?;
    Ok(())
  }

  fn delete_task(&mut self, target: &Task) -> Result<(), WorkLogError> {
    let others = without(self.store.load_all()?, target)?;
    self.store.replace_all(&others)?;
    info!(name = %target.name, date = %target.date, "deleted task");
    Ok(())
  }

  fn get_store(&self) -> &Self::Store {
    &self.store
  }
}
