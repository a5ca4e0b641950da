use defmt::Formatter;

use crate::command::{Command, Led, ParseCommandError};
use crate::event::{Event, EventCode, SerialNumber};
use crate::frame::DecoderState;
use crate::Error;

impl defmt::Format for Error {
    fn format(&self, fmt: Formatter<'_>) {
        match self {
            Error::FrameTooLarge { length, capacity } => defmt::write!(
                fmt,
                "FrameTooLarge {{ length: {=u8}, capacity: {=usize} }}",
                length,
                capacity
            ),
            Error::EmptyFrame => defmt::write!(fmt, "EmptyFrame"),
            Error::TruncatedPayload {
                code,
                expected,
                actual,
            } => defmt::write!(
                fmt,
                "TruncatedPayload {{ code: {=u8}, expected: {=usize}, actual: {=usize} }}",
                code,
                expected,
                actual
            ),
            Error::BufferTooSmall => defmt::write!(fmt, "BufferTooSmall"),
        }
    }
}

impl defmt::Format for SerialNumber {
    fn format(&self, fmt: Formatter<'_>) {
        defmt::write!(fmt, "SerialNumber({=[u8]:a})", self.as_bytes())
    }
}

impl defmt::Format for Event {
    fn format(&self, fmt: Formatter<'_>) {
        match self {
            Event::MembranePress { x, y } => {
                defmt::write!(fmt, "MembranePress {{ x: {=u8}, y: {=u8} }}", x, y)
            }
            Event::MembraneRelease { x, y } => {
                defmt::write!(fmt, "MembraneRelease {{ x: {=u8}, y: {=u8} }}", x, y)
            }
            Event::Switch { number, state } => defmt::write!(
                fmt,
                "Switch {{ number: {=u8}, state: {=u8} }}",
                number,
                state
            ),
            Event::SensorChange { number, state } => defmt::write!(
                fmt,
                "SensorChange {{ number: {=u8}, state: {=u8} }}",
                number,
                state
            ),
            Event::Version { major, minor } => {
                defmt::write!(fmt, "Version {=u8}.{=u8}", major, minor)
            }
            Event::OnOffSwitch { state } => {
                defmt::write!(fmt, "OnOffSwitch {{ state: {=u8} }}", state)
            }
            Event::CorrectMembrane { x, y } => {
                defmt::write!(fmt, "CorrectMembrane {{ x: {=u8}, y: {=u8} }}", x, y)
            }
            Event::CorrectSwitch { number, state } => defmt::write!(
                fmt,
                "CorrectSwitch {{ number: {=u8}, state: {=u8} }}",
                number,
                state
            ),
            Event::CorrectDone => defmt::write!(fmt, "CorrectDone"),
            Event::Connect => defmt::write!(fmt, "Connect"),
            Event::Disconnect => defmt::write!(fmt, "Disconnect"),
            Event::SerialNumber(sn) => defmt::write!(fmt, "{}", sn),
            Event::Unhandled { code, args } => defmt::write!(
                fmt,
                "Unhandled {{ code: {=u8}, args: {=[u8]} }}",
                code,
                &args[..]
            ),
        }
    }
}

impl defmt::Format for EventCode {
    fn format(&self, fmt: Formatter<'_>) {
        defmt::write!(fmt, "EventCode({=u8})", u8::from(*self))
    }
}

impl defmt::Format for Command {
    fn format(&self, fmt: Formatter<'_>) {
        defmt::write!(
            fmt,
            "Command {{ opcode: {=u8}, args: {=[u8]} }}",
            self.opcode(),
            &self.args()[..]
        )
    }
}

impl defmt::Format for Led {
    fn format(&self, fmt: Formatter<'_>) {
        defmt::write!(fmt, "Led({=u8})", u8::from(*self))
    }
}

impl defmt::Format for ParseCommandError {
    fn format(&self, fmt: Formatter<'_>) {
        match self {
            ParseCommandError::MissingSeparator => defmt::write!(fmt, "MissingSeparator"),
            ParseCommandError::UnknownCommand => defmt::write!(fmt, "UnknownCommand"),
            ParseCommandError::InvalidArgument => defmt::write!(fmt, "InvalidArgument"),
            ParseCommandError::WrongArgumentCount { expected, actual } => defmt::write!(
                fmt,
                "WrongArgumentCount {{ expected: {=usize}, actual: {=usize} }}",
                expected,
                actual
            ),
        }
    }
}

impl defmt::Format for DecoderState {
    fn format(&self, fmt: Formatter<'_>) {
        match self {
            DecoderState::Idle => defmt::write!(fmt, "Idle"),
            DecoderState::AwaitLength => defmt::write!(fmt, "AwaitLength"),
            DecoderState::AwaitPayload { expected } => {
                defmt::write!(fmt, "AwaitPayload {{ expected: {=u8} }}", expected)
            }
        }
    }
}
