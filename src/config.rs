//! Support for application configuration options

use std::path::PathBuf;

use once_cell::sync::Lazy;

/// The storage key of the task collection
pub const DEFAULT_TASKS_KEY: &str = "tasks";
/// The storage key of the theme, when it is persisted
pub const DEFAULT_THEME_KEY: &str = "theme";

/// Overrides the data folder
pub const DATA_DIR_VAR: &str = "TICKOFF_DATA_DIR";
/// Set to `1`, `true` or `yes` to remember the theme between runs
pub const PERSIST_THEME_VAR: &str = "TICKOFF_PERSIST_THEME";

/// Where data is stored when nothing else is configured: `~/.config/tickoff`, or `./tickoff-data` when there is no home folder
pub static DEFAULT_DATA_DIR: Lazy<PathBuf> = Lazy::new(|| {
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(".config").join("tickoff"),
        None => PathBuf::from("tickoff-data"),
    }
});


/// Runtime settings
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    /// The folder of the [`FileStorage`](crate::storage::FileStorage)
    pub data_dir: PathBuf,
    pub tasks_key: String,
    pub theme_key: String,
    /// Whether the theme is saved and restored. Off by default: the theme resets to light at every start
    pub persist_theme: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: (*DEFAULT_DATA_DIR).clone(),
            tasks_key: DEFAULT_TASKS_KEY.to_string(),
            theme_key: DEFAULT_THEME_KEY.to_string(),
            persist_theme: false,
        }
    }
}

impl Settings {
    /// Default settings, overridden by the environment
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Default settings, overridden by whatever `lookup` returns for each variable name
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(dir) = lookup(DATA_DIR_VAR) {
            if dir.trim().is_empty() == false {
                settings.data_dir = PathBuf::from(dir);
            }
        }

        if let Some(value) = lookup(PERSIST_THEME_VAR) {
            match parse_flag(&value) {
                Some(flag) => settings.persist_theme = flag,
                None => log::warn!("Ignoring invalid {} value {:?}", PERSIST_THEME_VAR, value),
            }
        }

        settings
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
