use thiserror::Error;

use super::Task;

#[derive(Debug, Error)]
pub enum StoreError {
  #[error("Could not access the work log: {0}")]
  Io(#[from] std::io::Error),
  #[error("Could not read or write the work log: {0}")]
  Csv(#[from] csv::Error),
}

/// The durable, ordered sequence of all tasks. Insertion order is the only
/// ordering there is.
pub trait Store {
  fn load_all(&self) -> Result<Vec<Task>, StoreError>;
  fn append(&mut self, task: &Task) -> Result<(), StoreError>;
  fn replace_all(&mut self, tasks: &[Task]) -> Result<(), StoreError>;
}
