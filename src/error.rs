/*
    Error Types
*/

use core::fmt;

pub type Result<T> = core::result::Result<T, Error>;

/* --------------------------- Error -------------------------- */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Direction pin or PWM channel of a wheel driver refused a write
    Actuator,
    /// Step, direction or enable pin of the stepper driver refused a write
    Stepper,
    /// A configuration value is out of its physical range
    InvalidConfig(&'static str),
    /// Raw stepper direction outside {-1, 0, 1}
    InvalidDirection(i32),
    /// Malformed command line
    Command(CommandError),
    /// Telemetry values do not fit one output line
    TelemetryOverflow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// Neither 2 nor 3 comma separated fields
    FieldCount(usize),
    /// Field is not a finite decimal number
    InvalidNumber,
    /// Line longer than the receive buffer
    LineTooLong,
}

impl From<CommandError> for Error {
    fn from(err: CommandError) -> Self {
        Error::Command(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Actuator => write!(f, "wheel driver output failed"),
            Error::Stepper => write!(f, "stepper driver output failed"),
            Error::InvalidConfig(field) => write!(f, "invalid config: {}", field),
            Error::InvalidDirection(value) => write!(f, "invalid stepper direction {} (expected -1, 0 or 1)", value),
            Error::Command(err) => write!(f, "invalid command: {}", err),
            Error::TelemetryOverflow => write!(f, "telemetry line overflow"),
        }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::FieldCount(count) => write!(f, "expected 2 or 3 fields, got {}", count),
            CommandError::InvalidNumber => write!(f, "field is not a finite number"),
            CommandError::LineTooLong => write!(f, "line too long"),
        }
    }
}
