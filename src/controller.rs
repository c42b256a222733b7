//! The view controller: projects tasks to rows, and turns user commands into store mutations
//!
//! Every user action is a [`Command`], consumed by [`ViewController::dispatch`]. \
//! The controller keeps an in-memory copy of the tasks ([`AppState`]) that is synchronized to the [`Store`] on every mutation.

use std::error::Error;

use crate::store::Store;
use crate::theme::Theme;
use crate::traits::{KeyValueStorage, TaskView};
use crate::view::TaskRow;
use crate::{Task, TaskId};


/// A discrete user action
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Create a pending task. Every field is required
    AddTask { date: String, time: String, text: String },
    /// Flip the completion flag of a task
    ToggleTask(TaskId),
    /// Remove a task for good
    DeleteTask(TaskId),
    /// Switch between the light and the dark theme
    ToggleTheme,
}


/// The application state owned by a [`ViewController`]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppState {
    tasks: Vec<Task>,
    theme: Theme,
}

impl AppState {
    /// Tasks, in display order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id() == id)
    }
}


/// Drives a [`TaskView`] from the content of a [`Store`]
pub struct ViewController<S, V>
where
    S: KeyValueStorage,
    V: TaskView,
{
    store: Store<S>,
    view: V,
    state: AppState,

    /// The storage key of the theme, if it is persisted
    theme_key: Option<String>,
}

impl<S, V> ViewController<S, V>
where
    S: KeyValueStorage,
    V: TaskView,
{
    /// Create a controller. Nothing is displayed until [`start`](Self::start) is called
    pub fn new(store: Store<S>, view: V) -> Self {
        Self {
            store,
            view,
            state: AppState::default(),
            theme_key: None,
        }
    }

    /// Save the theme under `key` whenever it changes, and restore it on start
    pub fn with_theme_persistence(mut self, key: &str) -> Self {
        self.theme_key = Some(key.to_string());
        self
    }

    pub fn state(&self) -> &AppState { &self.state }
    pub fn view(&self) -> &V         { &self.view  }
    pub fn view_mut(&mut self) -> &mut V { &mut self.view }
    pub fn store(&self) -> &Store<S> { &self.store }

    /// Apply the theme and display every stored task
    pub fn start(&mut self) {
        if let Some(theme) = self.restore_theme() {
            self.state.theme = theme;
        }
        self.view.apply_theme(self.state.theme);
        self.render_all();
    }

    /// Empty the display region, then display every task the store contains
    pub fn render_all(&mut self) {
        self.view.clear_rows();
        let tasks = self.store.load_all();
        for task in &tasks {
            self.render_row(task);
        }
        self.state.tasks = tasks;
    }

    /// Append the row of a task to the display region
    pub fn render_row(&mut self, task: &Task) {
        self.view.append_row(TaskRow::new(task));
    }

    /// Handle a user action.
    ///
    /// Invalid input and IDs that are not displayed are reported to the user (or logged) and are not errors.
    /// Errors come from the store (unreadable or unwritable storage, displayed task no longer stored).
    /// In that case the application state is left unchanged.
    pub fn dispatch(&mut self, command: Command) -> Result<(), Box<dyn Error>> {
        log::debug!("Handling {:?}", command);
        match command {
            Command::AddTask { date, time, text } => self.add_task(&date, &time, &text),
            Command::ToggleTask(id) => self.toggle_task(&id),
            Command::DeleteTask(id) => self.delete_task(&id),
            Command::ToggleTheme => self.toggle_theme(),
        }
    }

    /// Validate, append, persist and display a new task, then clear the inputs.
    ///
    /// The task is appended to what the store holds, not to what is displayed. If the store cannot be read, nothing is written.
    pub fn add_task(&mut self, date: &str, time: &str, text: &str) -> Result<(), Box<dyn Error>> {
        let task = match Task::new(date, time, text) {
            Err(err) => {
                log::info!("Rejected a new task: {}", err);
                self.view.alert(err.notice());
                return Ok(());
            },
            Ok(task) => task,
        };

        let mut tasks = self.store.try_load_all()?;
        let displayed_in_sync = tasks == self.state.tasks;
        tasks.push(task.clone());
        self.store.save_all(&tasks)?;

        if displayed_in_sync {
            self.state.tasks = tasks;
            self.render_row(&task);
        } else {
            log::info!("Stored tasks differ from the displayed ones. Rendering everything again");
            self.render_all();
        }
        self.view.clear_inputs();
        log::info!("Added task {}", task.id());
        Ok(())
    }

    /// Flip the completion flag of a task, persist it, then render everything again from the store
    pub fn toggle_task(&mut self, id: &TaskId) -> Result<(), Box<dyn Error>> {
        let mut task = match self.state.task(id) {
            None => {
                log::warn!("Trying to toggle unknown task {}. Ignoring", id);
                return Ok(());
            },
            Some(task) => task.clone(),
        };

        task.toggle();
        self.store.update(&task)?;
        self.render_all();
        Ok(())
    }

    /// Remove a task from the store, then from the display region.
    ///
    /// The row stays on display if the store does not hold the task, or cannot be written
    pub fn delete_task(&mut self, id: &TaskId) -> Result<(), Box<dyn Error>> {
        let task = match self.state.task(id) {
            None => {
                log::warn!("Trying to delete unknown task {}. Ignoring", id);
                return Ok(());
            },
            Some(task) => task.clone(),
        };

        self.store.remove(&task)?;
        self.view.remove_row(id);
        self.state.tasks.retain(|t| t.id() != id);
        log::info!("Deleted task {}", id);
        Ok(())
    }

    /// Switch the theme flag, and persist it if this controller has been asked to
    pub fn toggle_theme(&mut self) -> Result<(), Box<dyn Error>> {
        let theme = self.state.theme.toggled();

        if let Some(key) = &self.theme_key {
            let serialized = serde_json::to_string(&theme)?;
            self.store.storage_mut().set_item(key, &serialized)?;
        }

        self.state.theme = theme;
        self.view.apply_theme(theme);
        log::debug!("Switched to the {} theme", theme);
        Ok(())
    }

    fn restore_theme(&self) -> Option<Theme> {
        let key = self.theme_key.as_ref()?;
        let raw = match self.store.storage().get_item(key) {
            Err(err) => {
                log::warn!("Unable to read the stored theme: {}", err);
                return None;
            },
            Ok(raw) => raw?,
        };
        match serde_json::from_str(&raw) {
            Err(err) => {
                log::warn!("Ignoring invalid stored theme {:?}: {}", raw, err);
                None
            },
            Ok(theme) => Some(theme),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    use crate::storage::MemoryStorage;
    use crate::view::TerminalView;

    fn controller() -> ViewController<MemoryStorage, TerminalView> {
        let mut controller = ViewController::new(Store::new(MemoryStorage::new()), TerminalView::new(false));
        controller.start();
        controller
    }

    #[test]
    fn add_then_toggle() {
        let mut controller = controller();
        controller.dispatch(Command::AddTask {
            date: "2024-01-01".into(),
            time: "09:00".into(),
            text: "Write report".into(),
        }).unwrap();

        let rows = controller.view().rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].label(), "2024-01-01 09:00 - Write report");
        assert!(rows[0].completed() == false);

        let id = rows[0].id().clone();
        controller.dispatch(Command::ToggleTask(id.clone())).unwrap();
        assert!(controller.view().rows()[0].completed());
        assert!(controller.store().load_all()[0].completed());
        assert!(controller.state().task(&id).unwrap().completed());
    }

    #[test]
    fn incomplete_input_alerts_and_stores_nothing() {
        let mut controller = controller();
        controller.add_task("2024-01-01", "", "Write report").unwrap();

        assert!(controller.store().storage().is_empty());
        assert!(controller.state().tasks().is_empty());
        assert_eq!(controller.view().pending_notices(), &["Please fill in all the details for the task.".to_string()]);
    }

    #[test]
    fn theme_is_not_persisted_by_default() {
        let mut controller = controller();
        controller.dispatch(Command::ToggleTheme).unwrap();
        assert_eq!(controller.state().theme(), Theme::Dark);
        assert_eq!(controller.view().theme(), Theme::Dark);
        assert!(controller.store().storage().is_empty());
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut controller = controller();
        controller.dispatch(Command::ToggleTask(TaskId::from("nope"))).unwrap();
        controller.dispatch(Command::DeleteTask(TaskId::from("nope"))).unwrap();
        assert!(controller.store().storage().is_empty());
    }
}
