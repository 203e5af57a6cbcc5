//! Slash-command parsing and dispatch.
//!
//! [`parse`] is a pure function from an input line to a [`Command`]. Lines
//! that are not recognized commands, including unknown `/names`, parse to
//! `None` and are treated as chat input by [`process_input`].

mod registry;

pub use registry::{all_commands, find_command, CommandSpec};

use crate::core::app::App;

pub const COMMAND_PREFIX: char = '/';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Help,
    Theme,
    Clear,
}

impl CommandKind {
    pub fn name(self) -> &'static str {
        match self {
            CommandKind::Help => "help",
            CommandKind::Theme => "theme",
            CommandKind::Clear => "clear",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub kind: CommandKind,
    pub args: Vec<String>,
}

pub enum CommandResult {
    Continue,
    ProcessAsMessage(String),
}

/// Parse `line` as a slash-command.
///
/// The line must start with `/` exactly; the rest is split on whitespace, the
/// first token naming the command and the remainder becoming its arguments.
pub fn parse(line: &str) -> Option<Command> {
    let body = line.strip_prefix(COMMAND_PREFIX)?;
    let mut tokens = body.split_whitespace();
    let name = tokens.next().unwrap_or("");
    let spec = find_command(name)?;
    Some(Command {
        kind: spec.kind,
        args: tokens.map(str::to_string).collect(),
    })
}

pub fn process_input(app: &mut App, input: &str) -> CommandResult {
    match parse(input) {
        Some(command) => dispatch(app, &command),
        None => CommandResult::ProcessAsMessage(input.to_string()),
    }
}

pub fn dispatch(app: &mut App, command: &Command) -> CommandResult {
    match command.kind {
        CommandKind::Help => handle_help(app, command),
        CommandKind::Theme => handle_theme(app, command),
        CommandKind::Clear => handle_clear(app, command),
    }
}

const KEY_HELP: &[(&str, &str)] = &[
    ("Enter", "Send the message or run the command"),
    ("Up/Down", "Recall earlier input"),
    ("PageUp/PageDown", "Scroll the transcript"),
    ("Esc, Ctrl+C", "Quit"),
];

fn handle_help(app: &mut App, _command: &Command) -> CommandResult {
    let mut help = String::from("Commands:\n");
    for command in all_commands() {
        help.push_str(&format!("  {:<16} {}\n", command.usage, command.help));
    }
    help.push_str("\nKeys:\n");
    for (keys, description) in KEY_HELP {
        help.push_str(&format!("  {keys:<16} {description}\n"));
    }
    app.add_system_message(help.trim_end().to_string());
    CommandResult::Continue
}

fn handle_theme(app: &mut App, command: &Command) -> CommandResult {
    match command.args.first() {
        None => {
            let active = app.themes.active_id();
            let mut listing = String::from("Themes:\n");
            for (id, theme) in app.themes.registry().iter() {
                let mark = if id == active { "*" } else { " " };
                listing.push_str(&format!("  {mark} {id} - {}\n", theme.display_name));
            }
            app.add_system_message(listing.trim_end().to_string());
        }
        Some(id) => {
            app.themes.set_active_theme(id);
            let active = app.themes.active_id();
            app.set_status(format!("Theme: {active}"));
        }
    }
    CommandResult::Continue
}

fn handle_clear(app: &mut App, _command: &Command) -> CommandResult {
    app.clear_transcript();
    app.set_status("Transcript cleared");
    CommandResult::Continue
}
