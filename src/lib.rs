//! This crate provides a small local to-do list.
//!
//! Tasks have a date, a time, a text and a completion flag. They are persisted as a JSON array under a single key of a
//! [`KeyValueStorage`](traits::KeyValueStorage), see the [`store`] module. \
//! The [`ViewController`](controller::ViewController) projects them as rows on a [`TaskView`](traits::TaskView), and turns
//! user [`Command`](controller::Command)s into store mutations. \
//! The `tickoff` binary puts all of this behind a terminal.

pub mod traits;

mod task;
pub use task::{MissingField, Task, TaskId, TaskInputError};
pub mod theme;
pub use theme::Theme;

pub mod store;
pub use store::Store;
pub mod storage;
pub mod controller;
pub use controller::{Command, ViewController};
pub mod view;

pub mod config;
pub mod mock_behaviour;
