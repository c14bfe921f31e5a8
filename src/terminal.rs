use std::io::{self, Stdout, Write};

use crossterm::{
    cursor::MoveToColumn,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    queue,
    style::Print,
    terminal::{disable_raw_mode, enable_raw_mode, Clear, ClearType},
};
use tracing::warn;

use crate::control_loop::Console;

/// Raw-mode terminal, restored when dropped.
pub struct Terminal {
    out: Stdout,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self { out: io::stdout() })
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if let Err(err) = disable_raw_mode() {
            warn!(%err, "failed to restore terminal");
        }
    }
}

impl Console for Terminal {
    fn read_key(&mut self) -> io::Result<char> {
        loop {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                // Raw mode swallows SIGINT.
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok('q')
                }
                KeyCode::Char(c) => return Ok(c),
                KeyCode::Enter => return Ok('\n'),
                _ => {}
            }
        }
    }

    fn print_line(&mut self, line: &str) -> io::Result<()> {
        queue!(
            self.out,
            MoveToColumn(0),
            Clear(ClearType::CurrentLine),
            Print(line),
            Print("\r\n")
        )?;
        self.out.flush()
    }

    fn show_status(&mut self, percent: u8) -> io::Result<()> {
        queue!(
            self.out,
            MoveToColumn(0),
            Clear(ClearType::CurrentLine),
            Print(format!("Current brightness = {percent}%"))
        )?;
        self.out.flush()
    }
}
