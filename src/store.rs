//! This module provides the local, durable task list

use std::path::Path;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::task::{Task, TaskId};

/// The fixed column headers of a CSV export
pub const CSV_HEADER: &str = "Title,Date,StartTime,EndTime,Category";
/// The name of the file a CSV export should be offered as
pub const EXPORT_FILE_NAME: &str = "UniTrack_tasks.csv";

/// The ordered task list, mirrored to a local file on every mutation.
///
/// The in-memory list and the backing file are kept equivalent: every mutating
/// operation writes the whole list back before returning (write-through, not
/// write-behind). Every other component goes through this store, nothing else
/// touches the backing file.
#[derive(Debug, PartialEq)]
pub struct TaskStore {
    backing_file: PathBuf,
    data: StoredData,
}

#[derive(Default, Debug, PartialEq, Serialize, Deserialize)]
struct StoredData {
    tasks: Vec<Task>,
}

impl TaskStore {
    /// Get the default path to the backing file
    pub fn default_file() -> PathBuf {
        PathBuf::from(String::from("~/.config/unitrack/tasks.json"))
    }

    /// Initialize a store from the content of a valid backing file if it exists.
    /// Returns an error otherwise
    pub fn from_file(path: &Path) -> Result<Self, StoreError> {
        let file = std::fs::File::open(path)?;
        let data = serde_json::from_reader(file)?;

        Ok(Self {
            backing_file: PathBuf::from(path),
            data,
        })
    }

    /// Initialize an empty store that will persist to the given file
    pub fn new(path: &Path) -> Self {
        Self {
            backing_file: PathBuf::from(path),
            data: StoredData::default(),
        }
    }

    /// Store the current task list to the backing file
    fn save_to_file(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.backing_file.parent() {
            if parent.exists() == false {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = std::fs::File::create(&self.backing_file)?;
        serde_json::to_writer(file, &self.data)?;
        Ok(())
    }

    /// Append a task to the end of the list (insertion order is display order)
    /// and persist the whole list.
    ///
    /// Returns the id of the new task. Field validation is expected to have
    /// happened when the [`Task`] was built (see [`Task::from_form`](crate::Task::from_form)).
    pub fn add(&mut self, task: Task) -> Result<TaskId, StoreError> {
        let id = *task.id();
        self.data.tasks.push(task);
        self.save_to_file()?;
        log::debug!("Added task {}", id);
        Ok(id)
    }

    /// Remove the task with the given id and persist the whole list.
    ///
    /// Returns the removed task, or [`StoreError::TaskNotFound`] if no task has this
    /// id (e.g. it has been removed already). Later tasks keep their relative order.
    pub fn remove(&mut self, id: &TaskId) -> Result<Task, StoreError> {
        let position = self
            .data
            .tasks
            .iter()
            .position(|task| task.id() == id)
            .ok_or(StoreError::TaskNotFound(*id))?;

        let removed = self.data.tasks.remove(position);
        self.save_to_file()?;
        log::debug!("Removed task {}", id);
        Ok(removed)
    }

    /// The current task list, in insertion order
    pub fn list(&self) -> &[Task] {
        &self.data.tasks
    }

    /// Serialize the task list to a comma-separated table.
    ///
    /// The first line is [`CSV_HEADER`], then one line per task, fields in the same
    /// column order. Field values are written as-is: embedded commas or quotes are
    /// not escaped. Returns [`StoreError::NothingToExport`] when the list is empty,
    /// in which case no file should be produced.
    pub fn export_csv(&self) -> Result<String, StoreError> {
        if self.data.tasks.is_empty() {
            return Err(StoreError::NothingToExport);
        }

        let mut content = String::from(CSV_HEADER);
        for task in &self.data.tasks {
            content.push('\n');
            content.push_str(&format!(
                "{},{},{},{},{}",
                task.title(),
                task.date().format("%Y-%m-%d"),
                task.start_time().format("%H:%M"),
                task.end_time().format("%H:%M"),
                task.category(),
            ));
        }
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_task(title: &str) -> Task {
        Task::from_form(title, "2025-05-01", "09:00", "11:00", "Math").unwrap()
    }

    fn temp_store(file_name: &str) -> (tempfile::TempDir, TaskStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = TaskStore::new(&dir.path().join(file_name));
        (dir, store)
    }

    #[test]
    fn add_appends_in_insertion_order() {
        let (_dir, mut store) = temp_store("tasks.json");
        store.add(sample_task("A")).unwrap();
        store.add(sample_task("B")).unwrap();
        store.add(sample_task("C")).unwrap();

        let titles: Vec<&str> = store.list().iter().map(|t| t.title()).collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
    }

    #[test]
    fn remove_shifts_later_tasks_down() {
        let (_dir, mut store) = temp_store("tasks.json");
        store.add(sample_task("A")).unwrap();
        let id_b = store.add(sample_task("B")).unwrap();
        store.add(sample_task("C")).unwrap();

        let removed = store.remove(&id_b).unwrap();
        assert_eq!(removed.title(), "B");

        let titles: Vec<&str> = store.list().iter().map(|t| t.title()).collect();
        assert_eq!(titles, vec!["A", "C"]);

        // Removing the same task again must not resurrect anything
        assert!(matches!(store.remove(&id_b), Err(StoreError::TaskNotFound(_))));
        assert_eq!(store.list().len(), 2);
    }

    #[test]
    fn serde_store() {
        let (_dir, mut store) = temp_store("tasks.json");
        store.add(sample_task("Exam")).unwrap();
        store.add(sample_task("Homework")).unwrap();

        let retrieved_store = TaskStore::from_file(&store.backing_file).unwrap();
        assert_eq!(store, retrieved_store);
    }

    #[test]
    fn backing_file_is_written_on_every_mutation() {
        let (_dir, mut store) = temp_store("tasks.json");
        let id = store.add(sample_task("Exam")).unwrap();
        assert_eq!(TaskStore::from_file(&store.backing_file).unwrap().list().len(), 1);

        store.remove(&id).unwrap();
        assert_eq!(TaskStore::from_file(&store.backing_file).unwrap().list().len(), 0);
    }

    #[test]
    fn export_empty_store_produces_nothing() {
        let (_dir, store) = temp_store("tasks.json");
        assert!(matches!(store.export_csv(), Err(StoreError::NothingToExport)));
    }

    #[test]
    fn export_has_one_line_per_task_plus_header() {
        let (_dir, mut store) = temp_store("tasks.json");
        store.add(sample_task("Exam")).unwrap();
        store.add(sample_task("Homework")).unwrap();

        let csv = store.export_csv().unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(lines[1], "Exam,2025-05-01,09:00,11:00,Math");
        assert_eq!(lines[2], "Homework,2025-05-01,09:00,11:00,Math");
    }

    #[test]
    fn export_does_not_escape_embedded_commas() {
        let (_dir, mut store) = temp_store("tasks.json");
        store
            .add(Task::from_form("Exam, part 1", "2025-05-01", "09:00", "11:00", "Math").unwrap())
            .unwrap();

        let csv = store.export_csv().unwrap();
        assert_eq!(csv.lines().count(), 2);
        assert!(csv.lines().nth(1).unwrap().starts_with("Exam, part 1,"));
    }
}
