//! To-do tasks

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A generated identifier for a task.
///
/// Tasks used to be identified by their (date, time, text) tuple only, which made two identical entries
/// impossible to tell apart. Each task now carries a random identifier instead.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId {
    content: String,
}

impl TaskId {
    /// Generate a random TaskId.
    pub fn random() -> Self {
        let random = Uuid::new_v4().to_hyphenated().to_string();
        Self { content: random }
    }

    /// The ID of a record stored without one, at a given position of the stored list.
    ///
    /// It stays the same from one load to the next, until the list is written again with its IDs
    fn legacy(position: usize) -> Self {
        Self { content: format!("legacy-{}", position) }
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }
}

impl From<String> for TaskId {
    fn from(content: String) -> Self {
        Self { content }
    }
}

impl From<&str> for TaskId {
    fn from(content: &str) -> Self {
        Self { content: content.to_string() }
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.content)
    }
}


/// The input field that was left empty when creating a task
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MissingField {
    Date,
    Time,
    Text,
}

impl Display for MissingField {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            MissingField::Date => write!(f, "date"),
            MissingField::Time => write!(f, "time"),
            MissingField::Text => write!(f, "text"),
        }
    }
}

/// Rejected task input. Every field is required, so the task is not created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskInputError {
    missing: Vec<MissingField>,
}

impl TaskInputError {
    /// The fields that were empty, in input order
    pub fn missing_fields(&self) -> &[MissingField] {
        &self.missing
    }

    /// The blocking notice shown to the user
    pub fn notice(&self) -> &'static str {
        "Please fill in all the details for the task."
    }
}

impl Display for TaskInputError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        let names: Vec<String> = self.missing.iter().map(|field| field.to_string()).collect();
        write!(f, "missing task {}", names.join(", "))
    }
}

impl std::error::Error for TaskInputError {}


/// A to-do task
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Records written before identifiers existed do not have one.
    /// It is left empty by deserialization, the [`Store`](crate::Store) fills it in
    #[serde(default)]
    id: TaskId,

    /// The calendar date, as typed by the user (e.g. `2024-01-01`)
    date: String,
    /// The clock time, as typed by the user (e.g. `09:00`)
    time: String,
    /// The label of the task
    text: String,

    completed: bool,
}


impl Task {
    /// Create a brand new, pending task.
    /// This will pick a new (random) task ID.
    ///
    /// Fails when any of the fields is empty (or only made of whitespace).
    pub fn new(date: &str, time: &str, text: &str) -> Result<Self, TaskInputError> {
        let mut missing = Vec::new();
        if date.trim().is_empty() { missing.push(MissingField::Date); }
        if time.trim().is_empty() { missing.push(MissingField::Time); }
        if text.trim().is_empty() { missing.push(MissingField::Text); }
        if missing.is_empty() == false {
            return Err(TaskInputError { missing });
        }

        Ok(Self::new_with_parameters(TaskId::random(), date.to_string(), time.to_string(), text.to_string(), false))
    }

    /// Create a new Task instance, that may have been persisted already
    pub fn new_with_parameters(id: TaskId, date: String, time: String, text: String, completed: bool) -> Self {
        Self { id, date, time, text, completed }
    }

    pub fn id(&self) -> &TaskId     { &self.id      }
    pub fn date(&self) -> &str      { &self.date    }
    pub fn time(&self) -> &str      { &self.time    }
    pub fn text(&self) -> &str      { &self.text    }
    pub fn completed(&self) -> bool { self.completed }

    /// The line displayed for this task: `"{date} {time} - {text}"`
    pub fn label(&self) -> String {
        format!("{} {} - {}", self.date, self.time, self.text)
    }

    /// Flip the completion flag (pending <-> completed)
    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }

    /// Give this task its position-based ID if it was stored without one. Returns whether it had none
    pub(crate) fn fill_missing_id(&mut self, position: usize) -> bool {
        if self.id.as_str().is_empty() == false {
            return false;
        }
        self.id = TaskId::legacy(position);
        true
    }

    /// Whether both tasks share the same (date, time, text) tuple.
    ///
    /// This ignores the identifier and the completion flag, which is how tasks were told apart before they had IDs.
    pub fn same_tuple_as(&self, other: &Task) -> bool {
           self.date == other.date
        && self.time == other.time
        && self.text == other.text
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_task_is_pending() {
        let task = Task::new("2024-01-01", "09:00", "Write report").unwrap();
        assert_eq!(task.date(), "2024-01-01");
        assert_eq!(task.time(), "09:00");
        assert_eq!(task.text(), "Write report");
        assert!(task.completed() == false);
        assert_eq!(task.label(), "2024-01-01 09:00 - Write report");
    }

    #[test]
    fn every_field_is_required() {
        let err = Task::new("", "09:00", "  ").unwrap_err();
        assert_eq!(err.missing_fields(), &[MissingField::Date, MissingField::Text]);
        assert_eq!(err.to_string(), "missing task date, text");

        let err = Task::new("2024-01-01", "", "Write report").unwrap_err();
        assert_eq!(err.missing_fields(), &[MissingField::Time]);
    }

    #[test]
    fn toggling_twice_is_a_no_op() {
        let mut task = Task::new("2024-01-01", "09:00", "Write report").unwrap();
        task.toggle();
        assert!(task.completed());
        task.toggle();
        assert!(task.completed() == false);
    }

    #[test]
    fn identical_tuples_get_distinct_ids() {
        let a = Task::new("2024-01-01", "09:00", "Stand-up").unwrap();
        let b = Task::new("2024-01-01", "09:00", "Stand-up").unwrap();
        assert!(a.same_tuple_as(&b));
        assert_ne!(a.id(), b.id());
        assert_ne!(a, b);
    }

    #[test]
    fn serde_layout() {
        let task = Task::new_with_parameters(TaskId::from("abc"), "2024-01-01".into(), "09:00".into(), "Write report".into(), true);
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value, serde_json::json!({
            "id": "abc",
            "date": "2024-01-01",
            "time": "09:00",
            "text": "Write report",
            "completed": true,
        }));
    }

    #[test]
    fn legacy_record_gets_a_positional_id() {
        let json = r#"{"date":"2024-01-01","time":"09:00","text":"Write report","completed":false}"#;
        let mut task: Task = serde_json::from_str(json).unwrap();
        assert!(task.id().as_str().is_empty());
        assert_eq!(task.label(), "2024-01-01 09:00 - Write report");

        assert!(task.fill_missing_id(3));
        assert_eq!(task.id().as_str(), "legacy-3");
        assert!(task.fill_missing_id(4) == false);
        assert_eq!(task.id().as_str(), "legacy-3");
    }

    #[test]
    fn completed_flag_is_required() {
        let json = r#"{"date":"2024-01-01","time":"09:00","text":"Write report"}"#;
        assert!(serde_json::from_str::<Task>(json).is_err());
    }
}
