use std::{error::Error, io, io::Write};

use ratatui::backend::CrosstermBackend;
use ratatui::crossterm::{
    cursor::SetCursorStyle,
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::Terminal;

pub type ChatTerminal = Terminal<CrosstermBackend<io::Stdout>>;

pub fn setup_terminal() -> Result<ChatTerminal, Box<dyn Error>> {
    enable_raw_mode()?;

    let mut stdout = io::stdout();
    if let Err(err) = execute!(
        stdout,
        EnterAlternateScreen,
        EnableBracketedPaste,
        SetCursorStyle::SteadyBar
    ) {
        let _ = leave_screen(&mut stdout);
        let _ = disable_raw_mode();
        return Err(err.into());
    }

    let terminal = Terminal::new(CrosstermBackend::new(stdout)).inspect_err(|_| {
        let _ = leave_screen(&mut io::stdout());
        let _ = disable_raw_mode();
    })?;

    Ok(terminal)
}

/// Undo [`setup_terminal`]. Every step runs even if an earlier one fails; the
/// first error is returned.
pub fn restore_terminal(terminal: &mut ChatTerminal) -> Result<(), Box<dyn Error>> {
    let raw = disable_raw_mode();
    let screen = leave_screen(terminal.backend_mut());
    let cursor = terminal.show_cursor();

    raw?;
    screen?;
    cursor?;
    Ok(())
}

fn leave_screen<W: Write>(writer: &mut W) -> io::Result<()> {
    execute!(
        writer,
        SetCursorStyle::DefaultUserShape,
        LeaveAlternateScreen,
        DisableBracketedPaste
    )
}
