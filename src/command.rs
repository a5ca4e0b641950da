//! Requests sent to the keyboard
//!
//! A command is encoded as a single frame `0xFF, 1 + argc, opcode, args..`. All arguments are
//! single bytes and at most three of them exist, so every encoded command fits
//! [`MAX_COMMAND_FRAME_LENGTH`] bytes.
//!
//! Commands can also be written as text, `name@arg|arg|..`, e.g. `led@4|1` or `version@`. This
//! is what the `output` binary accepts.
#[cfg(feature = "std")]
use core::fmt;
use core::str::FromStr;
use heapless::Vec;

use crate::{Error, SYNC_BYTE};

/// sync + length + opcode + 3 arguments
pub const MAX_COMMAND_FRAME_LENGTH: usize = 6;

pub type EncodedCommand = Vec<u8, MAX_COMMAND_FRAME_LENGTH>;

/// LED numbers on the keyboard
#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(Debug))]
#[repr(u8)]
pub enum Led {
    Shift = 1,
    Alt = 2,
    CapsLock = 4,
    CtrlCmd = 5,
    Mouse = 7,
    NumLock = 8,
}

impl From<Led> for u8 {
    fn from(led: Led) -> u8 {
        led as u8
    }
}

#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(Debug))]
pub enum Command {
    GetVersion,
    /// `state` 1 turns the LED on, 0 off
    SetLed { number: u8, state: u8 },
    Scan,
    /// Beep through the keyboard speaker
    SetTone {
        frequency: u8,
        duration: u8,
        volume: u8,
    },
    GetEvent,
    Init,
    EepromRead,
    EepromWrite,
    /// Ask for the state of the top on/off switch
    GetOnOff,
    /// Ask the keyboard to report every pressed cell and switch, ends with `CorrectDone`
    GetCorrect,
    EepromReadByte,
    ResetDevice,
    StartAuto,
    StopAuto,
    AllLeds,
    StartOutput,
    StopOutput,
    /// Ask for a `SensorChange` event for every overlay sensor
    AllSensors,
    GetSerialNumber,
}

#[allow(clippy::len_without_is_empty)]
impl Command {
    pub fn set_led(led: Led, on: bool) -> Self {
        Command::SetLed {
            number: led.into(),
            state: on as u8,
        }
    }

    pub fn opcode(&self) -> u8 {
        match self {
            Command::GetVersion => 1,
            Command::SetLed { .. } => 2,
            Command::Scan => 3,
            Command::SetTone { .. } => 4,
            Command::GetEvent => 5,
            Command::Init => 6,
            Command::EepromRead => 7,
            Command::EepromWrite => 8,
            Command::GetOnOff => 9,
            Command::GetCorrect => 10,
            Command::EepromReadByte => 11,
            Command::ResetDevice => 12,
            Command::StartAuto => 13,
            Command::StopAuto => 14,
            Command::AllLeds => 15,
            Command::StartOutput => 16,
            Command::StopOutput => 17,
            Command::AllSensors => 18,
            Command::GetSerialNumber => 40,
        }
    }

    /// Argument bytes in wire order
    pub fn args(&self) -> Vec<u8, 3> {
        let (bytes, count) = match *self {
            Command::SetLed { number, state } => ([number, state, 0], 2),
            Command::SetTone {
                frequency,
                duration,
                volume,
            } => ([frequency, duration, volume], 3),
            _ => ([0; 3], 0),
        };
        bytes[..count].iter().copied().collect()
    }

    /// Number of bytes [`Command::encode`] produces
    pub fn len(&self) -> usize {
        3 + self.args().len()
    }

    pub fn encode(&self) -> EncodedCommand {
        let mut buf = [0u8; MAX_COMMAND_FRAME_LENGTH];
        let len = self.write_frame(&mut buf);
        buf[..len].iter().copied().collect()
    }

    /// Writes the frame to the start of `buf`, returns the number of bytes written
    pub fn encode_into(&self, buf: &mut [u8]) -> Result<usize, Error> {
        if buf.len() < self.len() {
            return Err(Error::BufferTooSmall);
        }
        Ok(self.write_frame(buf))
    }

    fn write_frame(&self, buf: &mut [u8]) -> usize {
        let args = self.args();
        buf[0] = SYNC_BYTE;
        buf[1] = 1 + args.len() as u8;
        buf[2] = self.opcode();
        buf[3..3 + args.len()].copy_from_slice(&args);
        3 + args.len()
    }
}

#[derive(PartialEq)]
#[cfg_attr(feature = "std", derive(Debug))]
pub enum ParseCommandError {
    MissingSeparator,
    UnknownCommand,
    InvalidArgument,
    WrongArgumentCount { expected: usize, actual: usize },
}

#[cfg(feature = "std")]
impl fmt::Display for ParseCommandError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ParseCommandError::MissingSeparator => write!(f, "missing '@' separator"),
            ParseCommandError::UnknownCommand => write!(f, "unknown command"),
            ParseCommandError::InvalidArgument => write!(f, "argument is not a number 0-255"),
            ParseCommandError::WrongArgumentCount { expected, actual } => {
                write!(f, "expected {} arguments, got {}", expected, actual)
            }
        }
    }
}

fn parse_args<const K: usize>(val: &str) -> Result<[u8; K], ParseCommandError> {
    let mut args = [0u8; K];
    if val.trim().is_empty() {
        return match K {
            0 => Ok(args),
            _ => Err(ParseCommandError::WrongArgumentCount {
                expected: K,
                actual: 0,
            }),
        };
    }

    let actual = val.split('|').count();
    if actual != K {
        return Err(ParseCommandError::WrongArgumentCount {
            expected: K,
            actual,
        });
    }
    for (arg, s) in args.iter_mut().zip(val.split('|')) {
        *arg = u8::from_str(s.trim()).map_err(|_| ParseCommandError::InvalidArgument)?;
    }
    Ok(args)
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, ParseCommandError> {
        let (cmd_type, val) = s
            .split_once('@')
            .ok_or(ParseCommandError::MissingSeparator)?;

        let simple = |cmd: Command| parse_args::<0>(val).map(|_| cmd);
        match cmd_type {
            "version" => simple(Command::GetVersion),
            "led" => {
                let [number, state] = parse_args::<2>(val)?;
                Ok(Command::SetLed { number, state })
            }
            "scan" => simple(Command::Scan),
            "tone" => {
                let [frequency, duration, volume] = parse_args::<3>(val)?;
                Ok(Command::SetTone {
                    frequency,
                    duration,
                    volume,
                })
            }
            "event" => simple(Command::GetEvent),
            "init" => simple(Command::Init),
            "eeprom_read" => simple(Command::EepromRead),
            "eeprom_write" => simple(Command::EepromWrite),
            "onoff" => simple(Command::GetOnOff),
            "correct" => simple(Command::GetCorrect),
            "eeprom_read_byte" => simple(Command::EepromReadByte),
            "reset" => simple(Command::ResetDevice),
            "start_auto" => simple(Command::StartAuto),
            "stop_auto" => simple(Command::StopAuto),
            "all_leds" => simple(Command::AllLeds),
            "start_output" => simple(Command::StartOutput),
            "stop_output" => simple(Command::StopOutput),
            "sensors" => simple(Command::AllSensors),
            "sn" => simple(Command::GetSerialNumber),
            _ => Err(ParseCommandError::UnknownCommand),
        }
    }
}
