use std::fs::{self, File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{Store, StoreError, Task};

/// Header-less CSV file with one task per row: name, date, duration, notes.
/// A missing file is an empty work log; it is created on the first write.
#[derive(Debug, Clone)]
pub struct CsvStore {
  path: PathBuf,
}

impl CsvStore {
  #[must_use]
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  #[must_use]
  pub fn path(&self) -> &Path {
    &self.path
  }
}

impl Store for CsvStore {
  fn load_all(&self) -> Result<Vec<Task>, StoreError> {
    let file = match File::open(&self.path) {
      Ok(file) => file,
      Err(e) if e.kind() == ErrorKind::NotFound => {
        debug!(path = %self.path.display(), "work log does not exist yet");
        return Ok(Vec::new());
      }
      Err(e) => return Err(e.into()),
    };
    let tasks = csv::ReaderBuilder::new()
      .has_headers(false)
      .from_reader(file)
      .deserialize()
      .collect::<Result<Vec<Task>, _>>()?;
    debug!(path = %self.path.display(), count = tasks.len(), "loaded work log");
    Ok(tasks)
  }

  fn append(&mut self, task: &Task) -> Result<(), StoreError> {
    let file = OpenOptions::new()
      .create(true)
      .append(true)
      .open(&self.path)?;
    let mut writer = csv::WriterBuilder::new()
      .has_headers(false)
      .from_writer(file);
    writer.serialize(task)?;
    writer.flush()?;
    debug!(path = %self.path.display(), "appended task");
    Ok(())
  }

  fn replace_all(&mut self, tasks: &[Task]) -> Result<(), StoreError> {
    let mut writer = csv::WriterBuilder::new()
      .has_headers(false)
      .from_writer(Vec::new());
    for task in tasks {
      writer.serialize(task)?;
    }
    let content = writer.into_inner().map_err(|e| e.into_error())?;
    fs::write(&self.path, content)?;
    debug!(path = %self.path.display(), count = tasks.len(), "rewrote work log");
    Ok(())
  }
}

#[cfg(test)]
mod test {
  use super::CsvStore;
  use crate::engine::{Store, StoreError, Task};
  use std::fs;

  fn task(name: &str, date: &str, duration: i64, notes: &str) -> Task {
    Task::new(name.into(), date.parse().unwrap(), duration, notes.into())
  }

  #[test]
  fn missing_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = CsvStore::new(dir.path().join("work_log.csv"));
    assert_eq!(store.load_all().unwrap(), vec![]);
    assert!(!store.path().exists());
  }

  #[test]
  fn append_creates_file_and_keeps_order() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = CsvStore::new(dir.path().join("work_log.csv"));
    let first = task("Write report", "01-02-2024", 30, "draft");
    let second = task("Review", "02-02-2024", 90, " ");
    store.append(&first).unwrap();
    store.append(&second).unwrap();
    assert_eq!(store.load_all().unwrap(), vec![first, second]);
    assert_eq!(
      fs::read_to_string(store.path()).unwrap(),
      "Write report,01-02-2024,30,draft\nReview,02-02-2024,90, \n"
    );
  }

  #[test]
  fn replace_all_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = CsvStore::new(dir.path().join("work_log.csv"));
    let tasks = vec![
      task("Call, then mail", "03-03-2024", 15, "said \"hi\", twice"),
      task("Plan", "04-03-2024", 45, "line one\nline two"),
      task("Empty notes", "05-03-2024", 5, ""),
    ];
    store.replace_all(&tasks).unwrap();
    assert_eq!(store.load_all().unwrap(), tasks);

    store.replace_all(&tasks[1..2]).unwrap();
    assert_eq!(store.load_all().unwrap(), tasks[1..2].to_vec());
  }

  #[test]
  fn replace_all_with_nothing_leaves_empty_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = CsvStore::new(dir.path().join("work_log.csv"));
    store
      .append(&task("Write report", "01-02-2024", 30, "draft"))
      .unwrap();
    store.replace_all(&[]).unwrap();
    assert!(store.path().exists());
    assert_eq!(fs::read_to_string(store.path()).unwrap(), "");
    assert_eq!(store.load_all().unwrap(), vec![]);
  }

  #[test]
  fn reads_files_written_elsewhere() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("work_log.csv");
    fs::write(&path, "Write report,1-2-2024,30,draft\r\nReview,02-02-2024,90, \r\n").unwrap();
    let store = CsvStore::new(&path);
    assert_eq!(
      store.load_all().unwrap(),
      vec![
        task("Write report", "01-02-2024", 30, "draft"),
        task("Review", "02-02-2024", 90, " "),
      ]
    );
  }

  #[test]
  fn malformed_rows_are_storage_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("work_log.csv");
    fs::write(&path, "Write report,not a date,30,draft\n").unwrap();
    assert!(matches!(
      CsvStore::new(&path).load_all(),
      Err(StoreError::Csv(_))
    ));
  }

  #[test]
  fn unreadable_path_is_storage_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = CsvStore::new(dir.path());
    assert!(matches!(store.load_all(), Err(StoreError::Io(_)) | Err(StoreError::Csv(_))));
  }
}
