use super::CommandKind;

pub struct CommandSpec {
    pub name: &'static str,
    pub kind: CommandKind,
    pub usage: &'static str,
    pub help: &'static str,
}

pub fn all_commands() -> &'static [CommandSpec] {
    COMMANDS
}

/// Exact, case-sensitive lookup by command name.
pub fn find_command(name: &str) -> Option<&'static CommandSpec> {
    all_commands().iter().find(|command| command.name == name)
}

const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "help",
        kind: CommandKind::Help,
        usage: "/help",
        help: "Show available commands and key bindings.",
    },
    CommandSpec {
        name: "theme",
        kind: CommandKind::Theme,
        usage: "/theme [name]",
        help: "List themes, or switch to the named theme.",
    },
    CommandSpec {
        name: "clear",
        kind: CommandKind::Clear,
        usage: "/clear",
        help: "Clear the transcript.",
    },
];
