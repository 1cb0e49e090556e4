//! Terminal setup and teardown.

use std::io::{self, IsTerminal, Stdout};

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::{ImsError, Result};

/// Terminal type the console draws on.
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Switches the terminal into raw mode on the alternate screen.
///
/// Also installs a panic hook that puts the terminal back before the
/// panic message is printed.
///
/// # Errors
///
/// Returns [`ImsError::Io`] if stdout is not a TTY or the terminal
/// cannot be prepared.
pub fn setup_terminal() -> Result<Tui> {
    if !io::stdout().is_terminal() {
        return Err(ImsError::Io(
            "the inventory console needs an interactive terminal".to_string(),
        ));
    }

    enable_raw_mode().map_err(io_error("failed to enable raw mode"))?;

    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(io_error("failed to enter alternate screen")(e));
    }

    let terminal = match Terminal::new(CrosstermBackend::new(stdout)) {
        Ok(terminal) => terminal,
        Err(e) => {
            leave_screen();
            return Err(io_error("failed to create terminal")(e));
        }
    };

    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        leave_screen();
        default_hook(info);
    }));

    Ok(terminal)
}

/// Leaves raw mode and the alternate screen and shows the cursor again.
///
/// # Errors
///
/// Returns [`ImsError::Io`] if any step fails.
pub fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode().map_err(io_error("failed to disable raw mode"))?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .map_err(io_error("failed to leave alternate screen"))?;
    terminal
        .show_cursor()
        .map_err(io_error("failed to show cursor"))?;
    Ok(())
}

/// Best-effort restore used on error paths and panics.
fn leave_screen() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

fn io_error(context: &'static str) -> impl Fn(io::Error) -> ImsError {
    move |e| ImsError::Io(format!("{context}: {e}"))
}
