/*
* USB Serial Line Protocol
    Input Command Pattern
        <linear>,<angular>
        <linear>,<angular>,<stepper_dir>        stepper_dir in {-1, 0, 1}
    Output Pattern (every telemetry period)
        <measured_linear>, <measured_angular>
*/

use core::fmt::Write;

use heapless::String;
use heapless::Vec;

use crate::control::kinematics::DriveCommand;
use crate::devices::stepper::StepperDirection;
use crate::error::CommandError;
use crate::error::Error;
use crate::error::Result;

pub const TELEMETRY_LINE_SIZE: usize = 48;
pub const COMMAND_LINE_SIZE: usize = 64;

/* --------------------------- Command -------------------------- */
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    Drive(DriveCommand),
    DriveWithStepper(DriveCommand, StepperDirection),
}

impl Command {
    pub fn drive(&self) -> DriveCommand {
        match self {
            Command::Drive(drive) | Command::DriveWithStepper(drive, _) => *drive,
        }
    }

    pub fn stepper(&self) -> Option<StepperDirection> {
        match self {
            Command::Drive(_) => None,
            Command::DriveWithStepper(_, direction) => Some(*direction),
        }
    }
}

fn parse_velocity(field: &str) -> Result<f32> {
    match field.trim().parse::<f32>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(CommandError::InvalidNumber.into()),
    }
}

fn parse_direction(field: &str) -> Result<StepperDirection> {
    let raw = field
        .trim()
        .parse::<i32>()
        .map_err(|_| Error::from(CommandError::InvalidNumber))?;
    StepperDirection::try_from(raw)
}

/// Parse one command line. Surrounding whitespace and the line ending are ignored.
pub fn parse_command(line: &str) -> Result<Command> {
    let line = line.trim();
    let count = line.split(',').count();
    let mut fields = line.split(',');

    match (count, fields.next(), fields.next(), fields.next()) {
        (2, Some(linear), Some(angular), None) => {
            let drive = DriveCommand::new(parse_velocity(linear)?, parse_velocity(angular)?);
            Ok(Command::Drive(drive))
        },
        (3, Some(linear), Some(angular), Some(direction)) => {
            let drive = DriveCommand::new(parse_velocity(linear)?, parse_velocity(angular)?);
            Ok(Command::DriveWithStepper(drive, parse_direction(direction)?))
        },
        _ => Err(CommandError::FieldCount(count).into()),
    }
}

/// Telemetry line without the line ending, four decimals per field.
pub fn format_telemetry(linear: f32, angular: f32) -> Result<String<TELEMETRY_LINE_SIZE>> {
    let mut line = String::new();
    write!(line, "{:.4}, {:.4}", linear, angular).map_err(|_| Error::TelemetryOverflow)?;
    Ok(line)
}

/* --------------------------- Line Assembler -------------------------- */
/// Rebuilds command lines from USB packets, which may carry part of a line
/// or several lines at once. Blank lines are skipped.
pub struct LineAssembler {
    buf: Vec<u8, COMMAND_LINE_SIZE>,
    overflowed: bool,
}

impl LineAssembler {
    pub const fn new() -> Self {
        Self {
            buf: Vec::new(),
            overflowed: false,
        }
    }

    pub fn feed(&mut self, data: &[u8], mut on_line: impl FnMut(Result<Command>)) {
        for &byte in data {
            if byte == b'\n' || byte == b'\r' {
                self.finish_line(&mut on_line);
            }
            else if self.buf.push(byte).is_err() {
                self.overflowed = true;
            }
        }
    }

    fn finish_line(&mut self, on_line: &mut impl FnMut(Result<Command>)) {
        if self.overflowed {
            on_line(Err(CommandError::LineTooLong.into()));
        }
        else {
            match core::str::from_utf8(&self.buf) {
                Ok(line) if line.trim().is_empty() => {},
                Ok(line) => on_line(parse_command(line)),
                Err(_) => on_line(Err(CommandError::InvalidNumber.into())),
            }
        }
        self.buf.clear();
        self.overflowed = false;
    }
}

impl Default for LineAssembler {
    fn default() -> Self {
        Self::new()
    }
}
