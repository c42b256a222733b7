use std::io::{stdin, stdout, BufRead, Write};

use chrono::{DateTime, Local};

use tickoff::config::Settings;
use tickoff::storage::FileStorage;
use tickoff::view::TerminalView;
use tickoff::{Command, Store, ViewController};

const USAGE: &str = "Commands:
  add <date|today> <time|now> <text...>   add a task
  toggle <n>                              mark task n as completed (or pending again)
  delete <n>                              delete task n
  theme                                   switch between the light and dark themes
  list                                    show the tasks
  help                                    show this help
  quit                                    exit";

/// What a typed line asks for
#[derive(Debug, PartialEq)]
enum Action {
    Dispatch(Command),
    List,
    Help,
    Quit,
}


fn main() {
    env_logger::init();

    let settings = Settings::from_env();
    log::info!("Using data folder {:?}", settings.data_dir);

    let store = match Store::open(FileStorage::new(&settings.data_dir), &settings.tasks_key) {
        Ok(store) => store,
        Err(err) => {
            log::warn!("Unable to migrate stored tasks: {}", err);
            Store::new_with_key(FileStorage::new(&settings.data_dir), &settings.tasks_key)
        }
    };
    let use_colours = std::env::var_os("NO_COLOR").is_none();
    let mut controller = ViewController::new(store, TerminalView::new(use_colours));
    if settings.persist_theme {
        controller = controller.with_theme_persistence(&settings.theme_key);
    }
    controller.start();
    paint(&mut controller);

    let stdin = stdin();
    loop {
        print!("> ");
        let _ = stdout().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {},
            Err(err) => {
                log::error!("Unable to read input: {}", err);
                break;
            }
        }

        match parse_line(&line, controller.view(), Local::now()) {
            Ok(None) => continue,
            Ok(Some(Action::Quit)) => break,
            Ok(Some(Action::Help)) => println!("{}", USAGE),
            Ok(Some(Action::List)) => paint(&mut controller),
            Ok(Some(Action::Dispatch(command))) => {
                if let Err(err) = controller.dispatch(command) {
                    log::error!("Unable to apply a command: {}", err);
                    println!("! Changes were not applied: {}", err);
                }
                paint(&mut controller);
            },
            Err(message) => println!("{}\n{}", message, USAGE),
        }
    }
}

fn paint(controller: &mut ViewController<FileStorage, TerminalView>) {
    let mut out = stdout();
    if let Err(err) = controller.view_mut().paint(&mut out) {
        log::error!("Unable to write to the terminal: {}", err);
    }
}

/// Turn a typed line into an action. Blank lines yield `None`
fn parse_line(line: &str, view: &TerminalView, now: DateTime<Local>) -> Result<Option<Action>, String> {
    let mut words = line.split_whitespace();
    let verb = match words.next() {
        None => return Ok(None),
        Some(verb) => verb.to_ascii_lowercase(),
    };

    let action = match verb.as_str() {
        "add" => {
            let date = match words.next() {
                Some("today") => now.format("%Y-%m-%d").to_string(),
                other => other.unwrap_or_default().to_string(),
            };
            let time = match words.next() {
                Some("now") => now.format("%H:%M").to_string(),
                other => other.unwrap_or_default().to_string(),
            };
            let text = words.collect::<Vec<_>>().join(" ");
            Action::Dispatch(Command::AddTask { date, time, text })
        },
        "toggle" => Action::Dispatch(Command::ToggleTask(row_id(words.next(), view)?)),
        "delete" | "rm" => Action::Dispatch(Command::DeleteTask(row_id(words.next(), view)?)),
        "theme" => Action::Dispatch(Command::ToggleTheme),
        "list" | "ls" => Action::List,
        "help" | "?" => Action::Help,
        "quit" | "exit" | "q" => Action::Quit,
        other => return Err(format!("Unknown command {:?}", other)),
    };
    Ok(Some(action))
}

fn row_id(word: Option<&str>, view: &TerminalView) -> Result<tickoff::TaskId, String> {
    let word = word.ok_or_else(|| "Missing task number".to_string())?;
    let number: usize = word.parse()
        .map_err(|_| format!("{:?} is not a task number", word))?;
    view.row_id(number)
        .cloned()
        .ok_or_else(|| format!("There is no task number {}", number))
}
