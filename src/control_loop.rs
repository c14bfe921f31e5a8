use std::io;

use tracing::debug;

use crate::{
    brightness::{self, MAX_BRIGHTNESS, MIN_BRIGHTNESS},
    display::{self, FeatureReportChannel},
    error::{AppError, Result, TransferOp},
    steps::{next_step, prev_step, StepSize},
};

const HELP: [&str; 5] = [
    "Press '-' or '=' to adjust brightness.",
    "Press '[' or ']' to fine tune.",
    "Press 'p' to use the minimum brightness.",
    "Press '\\' to use the maximum brightness.",
    "Press 'q' to quit.",
];

/// Terminal surface the control loop talks to.
pub trait Console {
    /// Block until the next key press.
    fn read_key(&mut self) -> io::Result<char>;

    fn print_line(&mut self, line: &str) -> io::Result<()>;

    /// Rewrite the status line in place.
    fn show_status(&mut self, percent: u8) -> io::Result<()>;
}

/// What to do after a feature report transfer failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// Keep the locally tracked brightness.
    Continue,
    /// Re-read the display and adopt its value.
    Resync,
}

/// Decides how the control loop recovers from failed transfers.
///
/// The failure itself is always shown to the user before the policy runs.
pub trait TransferErrorPolicy {
    fn on_transfer_error(&mut self, err: &AppError) -> Recovery;
}

/// Ignore failures; local and device brightness may drift apart.
#[derive(Debug, Default, Clone, Copy)]
pub struct FireAndForget;

impl TransferErrorPolicy for FireAndForget {
    fn on_transfer_error(&mut self, _err: &AppError) -> Recovery {
        Recovery::Continue
    }
}

/// Re-read the display after a failed write.
#[derive(Debug, Default, Clone, Copy)]
pub struct Resynchronize;

impl TransferErrorPolicy for Resynchronize {
    fn on_transfer_error(&mut self, err: &AppError) -> Recovery {
        match err {
            AppError::ControlTransfer {
                op: TransferOp::Write,
                ..
            } => Recovery::Resync,
            _ => Recovery::Continue,
        }
    }
}

/// User intent decoded from a single key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    StepUp(StepSize),
    StepDown(StepSize),
    Maximum,
    Minimum,
    Quit,
}

impl Action {
    pub fn from_key(key: char) -> Option<Self> {
        match key {
            '+' | '=' => Some(Action::StepUp(StepSize::Coarse)),
            '-' | '_' => Some(Action::StepDown(StepSize::Coarse)),
            ']' => Some(Action::StepUp(StepSize::Fine)),
            '[' => Some(Action::StepDown(StepSize::Fine)),
            '\\' => Some(Action::Maximum),
            'p' => Some(Action::Minimum),
            'q' | '\n' => Some(Action::Quit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlState {
    pub brightness: u16,
    pub phase: Phase,
}

impl ControlState {
    pub fn new(brightness: u16) -> Self {
        Self {
            brightness,
            phase: Phase::Running,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Pure transition. A stopped state absorbs every action.
    pub fn apply(self, action: Action) -> Self {
        if !self.is_running() {
            return self;
        }
        let brightness = match action {
            Action::StepUp(size) => next_step(self.brightness, size.table()),
            Action::StepDown(size) => prev_step(self.brightness, size.table()),
            Action::Maximum => MAX_BRIGHTNESS,
            Action::Minimum => MIN_BRIGHTNESS,
            Action::Quit => {
                return Self {
                    phase: Phase::Stopped,
                    ..self
                }
            }
        };
        Self { brightness, ..self }
    }
}

/// Interactive keyboard control of a display.
pub struct ControlLoop<'a> {
    channel: &'a mut dyn FeatureReportChannel,
    console: &'a mut dyn Console,
    policy: Box<dyn TransferErrorPolicy>,
}

impl<'a> ControlLoop<'a> {
    pub fn new(
        channel: &'a mut dyn FeatureReportChannel,
        console: &'a mut dyn Console,
        policy: Box<dyn TransferErrorPolicy>,
    ) -> Self {
        Self {
            channel,
            console,
            policy,
        }
    }

    /// Run until the user quits, returning the last tracked brightness.
    ///
    /// Only terminal failures end the loop early; transfer failures are
    /// reported and handed to the policy.
    pub fn run(&mut self) -> Result<u16> {
        let initial = match display::read_brightness(&mut *self.channel) {
            Ok(value) => value,
            Err(err) => {
                self.report(&err)?;
                brightness::decode(&[0; brightness::READ_REPORT_LEN])
            }
        };
        debug!(initial, "entering control loop");

        for line in HELP {
            self.console.print_line(line)?;
        }

        let mut state = ControlState::new(initial);
        while state.is_running() {
            self.console.show_status(brightness::to_percent(state.brightness))?;

            let key = self.console.read_key()?;
            let Some(action) = Action::from_key(key) else {
                continue;
            };

            let next = state.apply(action);
            state = if next.is_running() {
                self.push(next)?
            } else {
                next
            };
        }

        self.console.print_line("")?;
        Ok(state.brightness)
    }

    fn push(&mut self, state: ControlState) -> Result<ControlState> {
        let err = match display::write_brightness(&mut *self.channel, state.brightness) {
            Ok(()) => return Ok(state),
            Err(err) => err,
        };

        if self.report(&err)? == Recovery::Resync {
            match display::read_brightness(&mut *self.channel) {
                Ok(brightness) => {
                    debug!(brightness, "resynchronized after failed write");
                    return Ok(ControlState { brightness, ..state });
                }
                Err(err) => {
                    self.console.print_line(&err.describe())?;
                }
            }
        }
        Ok(state)
    }

    fn report(&mut self, err: &AppError) -> Result<Recovery> {
        debug!(%err, "transfer failed");
        self.console.print_line(&err.describe())?;
        Ok(self.policy.on_transfer_error(err))
    }
}
