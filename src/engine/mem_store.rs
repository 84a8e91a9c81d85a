use super::{Store, StoreError, Task};

#[derive(Debug, Default)]
pub struct MemStore {
  tasks: Vec<Task>,
}

impl MemStore {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }
}

impl Store for MemStore {
  fn load_all(&self) -> Result<Vec<Task>, StoreError> {
    Ok(self.tasks.clone())
  }

  fn append(&mut self, task: &Task) -> Result<(), StoreError> {
    self.tasks.push(task.clone());
    Ok(())
  }

  fn replace_all(&mut self, tasks: &[Task]) -> Result<(), StoreError> {
    self.tasks = tasks.to_vec();
    Ok(())
  }
}
