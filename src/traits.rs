use std::error::Error;

use crate::theme::Theme;
use crate::view::TaskRow;
use crate::TaskId;

/// A string-keyed storage slot, the local equivalent of a browser's `localStorage`
pub trait KeyValueStorage {
    /// Returns the value stored under `key`, or `None` if this key has never been written
    fn get_item(&self, key: &str) -> Result<Option<String>, Box<dyn Error>>;
    /// Overwrites the value stored under `key`
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), Box<dyn Error>>;
    /// Forgets `key`. Removing a key that does not exist is not an error
    fn remove_item(&mut self, key: &str) -> Result<(), Box<dyn Error>>;
}

/// The host surface that displays tasks (a page, a terminal...).
///
/// The [`ViewController`](crate::controller::ViewController) drives it, but never builds it.
pub trait TaskView {
    /// Empty the task display region
    fn clear_rows(&mut self);
    /// Append a row at the end of the task display region
    fn append_row(&mut self, row: TaskRow);
    /// Remove the row of a given task, if it is displayed
    fn remove_row(&mut self, id: &TaskId);

    /// Apply a theme to the whole surface
    fn apply_theme(&mut self, theme: Theme);
    /// Show a blocking notice to the user
    fn alert(&mut self, message: &str);
    /// Reset the date, time and text input fields
    fn clear_inputs(&mut self);
}
