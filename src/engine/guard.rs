use super::Task;

/// Whether `candidate` is already recorded in `existing`.
#[must_use]
pub fn is_duplicate(candidate: &Task, existing: &[Task]) -> bool {
  existing.iter().any(|task| task == candidate)
}

#[cfg(test)]
mod test {
  use super::is_duplicate;
  use crate::engine::Task;

  fn task(notes: &str) -> Task {
    Task::new("Write report".into(), "01-02-2024".parse().unwrap(), 30, notes.into())
  }

  #[test]
  fn detects_equal_tasks_only() {
    let existing = vec![task("draft")];
    assert!(is_duplicate(&task("draft"), &existing));
    assert!(!is_duplicate(&task("final"), &existing));
    assert!(!is_duplicate(&task("draft"), &[]));
  }
}
