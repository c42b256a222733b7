//! Task rows, and a terminal surface to display them

use std::io::Write;

use crate::theme::{Rgb, Theme};
use crate::traits::TaskView;
use crate::{Task, TaskId};

const RESET: &str = "\x1b[0m";
const STRIKETHROUGH: &str = "\x1b[9m";


/// What a surface displays for a task
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskRow {
    id: TaskId,
    label: String,
    completed: bool,
}

impl TaskRow {
    pub fn new(task: &Task) -> Self {
        Self {
            id: task.id().clone(),
            label: task.label(),
            completed: task.completed(),
        }
    }

    /// The task this row stands for. Interactions on the row refer to it
    pub fn id(&self) -> &TaskId     { &self.id      }
    /// `"{date} {time} - {text}"`
    pub fn label(&self) -> &str     { &self.label   }
    /// Completed rows are visually marked
    pub fn completed(&self) -> bool { self.completed }
}


/// A [`TaskView`] that paints a numbered task list to a terminal
#[derive(Debug, Default)]
pub struct TerminalView {
    rows: Vec<TaskRow>,
    theme: Theme,
    use_colours: bool,
    notices: Vec<String>,
}

impl TerminalView {
    /// Create a view. `use_colours` enables 24-bit ANSI colours taken from the theme palette
    pub fn new(use_colours: bool) -> Self {
        Self {
            use_colours,
            ..Self::default()
        }
    }

    pub fn rows(&self) -> &[TaskRow] {
        &self.rows
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// The task displayed at a given 1-based position
    pub fn row_id(&self, number: usize) -> Option<&TaskId> {
        if number == 0 {
            return None;
        }
        self.rows.get(number - 1).map(|row| row.id())
    }

    /// Notices that have not been painted yet
    pub fn pending_notices(&self) -> &[String] {
        &self.notices
    }

    /// Write the pending notices, then the whole list
    pub fn paint<W: Write>(&mut self, out: &mut W) -> std::io::Result<()> {
        for notice in self.notices.drain(..) {
            writeln!(out, "! {}", notice)?;
        }

        if self.rows.is_empty() {
            let line = format!("No tasks yet ({} theme).", self.theme);
            writeln!(out, "{}", self.decorate_page(&line))?;
            return Ok(());
        }

        let header = format!("Tasks ({} theme):", self.theme);
        writeln!(out, "{}", self.decorate_page(&header))?;
        for (i, row) in self.rows.iter().enumerate() {
            let completion = if row.completed() { "✓" } else { " " };
            let line = format!("[{}] {}", completion, row.label());
            writeln!(out, "{:>3}. {}", i + 1, self.decorate(&line, row.completed()))?;
        }
        Ok(())
    }

    /// Lines that are not task rows use the page colours of the theme
    fn decorate_page(&self, line: &str) -> String {
        let palette = self.theme.palette();
        self.colour(line, palette.foreground, palette.background, "")
    }

    fn decorate(&self, line: &str, completed: bool) -> String {
        let palette = self.theme.palette();
        match completed {
            true  => self.colour(line, palette.completed_foreground, palette.completed_background, STRIKETHROUGH),
            false => self.colour(line, palette.pending_foreground, palette.pending_background, ""),
        }
    }

    fn colour(&self, line: &str, fg: &str, bg: &str, style: &str) -> String {
        if self.use_colours == false {
            return line.to_string();
        }

        match (Rgb::parse(fg), Rgb::parse(bg)) {
            (Ok(fg), Ok(bg)) => format!("{}{}{}{}{}", fg.ansi_foreground(), bg.ansi_background(), style, line, RESET),
            (Err(err), _) | (_, Err(err)) => {
                log::warn!("Unable to colour {:?}: {}", line, err);
                line.to_string()
            },
        }
    }
}

impl TaskView for TerminalView {
    fn clear_rows(&mut self) {
        self.rows.clear();
    }

    fn append_row(&mut self, row: TaskRow) {
        self.rows.push(row);
    }

    fn remove_row(&mut self, id: &TaskId) {
        self.rows.retain(|row| row.id() != id);
    }

    fn apply_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    fn alert(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }

    fn clear_inputs(&mut self) {
        // Inputs are typed on the command line, there is nothing left to reset
    }
}
