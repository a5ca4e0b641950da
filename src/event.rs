//! Events reported by the keyboard
//!
//! The first payload byte of every incoming frame is an event type code, the bytes after it are
//! arguments at fixed offsets. Only a subset of the codes the firmware defines carries meaning
//! for a host, everything else decodes to [`Event::Unhandled`].
use core::convert::TryFrom;
use core::fmt;
use heapless::Vec;

use crate::{Error, MAX_PAYLOAD_LENGTH};

/// Argument bytes that fit into the largest possible frame, after the type code
pub const MAX_ARGS_LENGTH: usize = MAX_PAYLOAD_LENGTH - 1;

/// Serial number bytes that fit into the largest possible frame
pub const SERIAL_NUMBER_CAPACITY: usize = MAX_ARGS_LENGTH;

/// Every event type code the firmware defines
#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(Debug))]
#[repr(u8)]
pub enum EventCode {
    Ack = 51,
    MembranePress = 52,
    MembraneRelease = 53,
    Switch = 54,
    SensorChange = 55,
    Version = 56,
    EepromRead = 57,
    OnOffSwitch = 58,
    NoMoreEvents = 59,
    MembraneRepeat = 60,
    SwitchRepeat = 61,
    CorrectMembrane = 62,
    CorrectSwitch = 63,
    CorrectDone = 64,
    EepromReadByte = 65,
    DeviceReady = 66,
    AutopilotState = 67,
    Delay = 68,
    AllSensors = 69,
    // generated by the bridge, not the keyboard
    Connect = 81,
    Disconnect = 82,
    SerialNumber = 83,
}

impl TryFrom<u8> for EventCode {
    type Error = &'static str;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            51 => Ok(EventCode::Ack),
            52 => Ok(EventCode::MembranePress),
            53 => Ok(EventCode::MembraneRelease),
            54 => Ok(EventCode::Switch),
            55 => Ok(EventCode::SensorChange),
            56 => Ok(EventCode::Version),
            57 => Ok(EventCode::EepromRead),
            58 => Ok(EventCode::OnOffSwitch),
            59 => Ok(EventCode::NoMoreEvents),
            60 => Ok(EventCode::MembraneRepeat),
            61 => Ok(EventCode::SwitchRepeat),
            62 => Ok(EventCode::CorrectMembrane),
            63 => Ok(EventCode::CorrectSwitch),
            64 => Ok(EventCode::CorrectDone),
            65 => Ok(EventCode::EepromReadByte),
            66 => Ok(EventCode::DeviceReady),
            67 => Ok(EventCode::AutopilotState),
            68 => Ok(EventCode::Delay),
            69 => Ok(EventCode::AllSensors),
            81 => Ok(EventCode::Connect),
            82 => Ok(EventCode::Disconnect),
            83 => Ok(EventCode::SerialNumber),
            _ => Err("Unknown EventCode"),
        }
    }
}

impl From<EventCode> for u8 {
    fn from(code: EventCode) -> u8 {
        code as u8
    }
}

/// Serial number as reported by the bridge
///
/// Each byte is taken as the character with the same code point. Nothing is validated, bytes
/// outside printable ASCII come through unchanged.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct SerialNumber(Vec<u8, SERIAL_NUMBER_CAPACITY>);

impl SerialNumber {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        Vec::from_slice(bytes)
            .map(SerialNumber)
            .map_err(|_| Error::BufferTooSmall)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.0.iter().map(|&b| char::from(b))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl PartialEq<str> for SerialNumber {
    fn eq(&self, other: &str) -> bool {
        self.chars().eq(other.chars())
    }
}

impl PartialEq<&str> for SerialNumber {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl fmt::Display for SerialNumber {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use core::fmt::Write;
        for c in self.chars() {
            f.write_char(c)?;
        }
        Ok(())
    }
}

#[cfg(feature = "std")]
impl fmt::Debug for SerialNumber {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use core::fmt::Write;
        f.write_str("SerialNumber(\"")?;
        for c in self.chars().flat_map(char::escape_debug) {
            f.write_char(c)?;
        }
        f.write_str("\")")
    }
}

/// Decoded event
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(Debug))]
pub enum Event {
    /// Membrane cell pressed, coordinates are cells below [`crate::MEMBRANE_RESOLUTION_X`] and
    /// [`crate::MEMBRANE_RESOLUTION_Y`]
    MembranePress { x: u8, y: u8 },
    MembraneRelease { x: u8, y: u8 },
    /// External switch jack changed, one of [`crate::NUM_SWITCHES`]
    Switch { number: u8, state: u8 },
    /// Overlay bar code sensor changed, one of [`crate::NUM_SENSORS`]
    SensorChange { number: u8, state: u8 },
    /// Keyboard firmware version
    Version { major: u8, minor: u8 },
    /// Top on/off switch
    OnOffSwitch { state: u8 },
    /// Membrane cell reported while correcting (answer to [`crate::Command::GetCorrect`])
    CorrectMembrane { x: u8, y: u8 },
    /// Switch reported while correcting
    CorrectSwitch { number: u8, state: u8 },
    CorrectDone,
    /// Keyboard attached to the bridge
    Connect,
    /// Keyboard detached from the bridge
    Disconnect,
    SerialNumber(SerialNumber),
    /// Any other type code, known to the firmware or not, with every argument byte it came with
    Unhandled {
        code: u8,
        args: Vec<u8, MAX_ARGS_LENGTH>,
    },
}

impl Event {
    /// Decodes a complete payload, type code included
    ///
    /// Argument bytes past the ones an event carries are ignored. An unknown type code is never
    /// an error, it becomes [`Event::Unhandled`].
    pub fn from_payload(payload: &[u8]) -> Result<Event, Error> {
        let (&code, args) = payload.split_first().ok_or(Error::EmptyFrame)?;

        let event = match EventCode::try_from(code) {
            Ok(EventCode::MembranePress) => {
                let [x, y] = take_args::<2>(code, args)?;
                Event::MembranePress { x, y }
            }
            Ok(EventCode::MembraneRelease) => {
                let [x, y] = take_args::<2>(code, args)?;
                Event::MembraneRelease { x, y }
            }
            Ok(EventCode::Switch) => {
                let [number, state] = take_args::<2>(code, args)?;
                Event::Switch { number, state }
            }
            Ok(EventCode::SensorChange) => {
                let [number, state] = take_args::<2>(code, args)?;
                Event::SensorChange { number, state }
            }
            Ok(EventCode::Version) => {
                let [major, minor] = take_args::<2>(code, args)?;
                Event::Version { major, minor }
            }
            Ok(EventCode::OnOffSwitch) => {
                let [state] = take_args::<1>(code, args)?;
                Event::OnOffSwitch { state }
            }
            Ok(EventCode::CorrectMembrane) => {
                let [x, y] = take_args::<2>(code, args)?;
                Event::CorrectMembrane { x, y }
            }
            Ok(EventCode::CorrectSwitch) => {
                let [number, state] = take_args::<2>(code, args)?;
                Event::CorrectSwitch { number, state }
            }
            Ok(EventCode::CorrectDone) => Event::CorrectDone,
            Ok(EventCode::Connect) => Event::Connect,
            Ok(EventCode::Disconnect) => Event::Disconnect,
            Ok(EventCode::SerialNumber) => Event::SerialNumber(SerialNumber::from_bytes(args)?),
            Ok(_) | Err(_) => Event::Unhandled {
                code,
                args: Vec::from_slice(args).map_err(|_| Error::BufferTooSmall)?,
            },
        };
        Ok(event)
    }

    /// Type code this event was decoded from
    pub fn code(&self) -> u8 {
        let code = match self {
            Event::MembranePress { .. } => EventCode::MembranePress,
            Event::MembraneRelease { .. } => EventCode::MembraneRelease,
            Event::Switch { .. } => EventCode::Switch,
            Event::SensorChange { .. } => EventCode::SensorChange,
            Event::Version { .. } => EventCode::Version,
            Event::OnOffSwitch { .. } => EventCode::OnOffSwitch,
            Event::CorrectMembrane { .. } => EventCode::CorrectMembrane,
            Event::CorrectSwitch { .. } => EventCode::CorrectSwitch,
            Event::CorrectDone => EventCode::CorrectDone,
            Event::Connect => EventCode::Connect,
            Event::Disconnect => EventCode::Disconnect,
            Event::SerialNumber(_) => EventCode::SerialNumber,
            Event::Unhandled { code, .. } => return *code,
        };
        code.into()
    }

    /// Calls the `handler` method matching this event
    pub fn dispatch<H: EventHandler + ?Sized>(&self, handler: &mut H) {
        match self {
            Event::MembranePress { x, y } => handler.on_membrane_press(*x, *y),
            Event::MembraneRelease { x, y } => handler.on_membrane_release(*x, *y),
            Event::Switch { number, state } => handler.on_switch(*number, *state),
            Event::SensorChange { number, state } => handler.on_sensor_change(*number, *state),
            Event::Version { major, minor } => handler.on_version(*major, *minor),
            Event::OnOffSwitch { state } => handler.on_on_off_switch(*state),
            Event::CorrectMembrane { x, y } => handler.on_correct_membrane(*x, *y),
            Event::CorrectSwitch { number, state } => handler.on_correct_switch(*number, *state),
            Event::CorrectDone => handler.on_correct_done(),
            Event::Connect => handler.on_connect(),
            Event::Disconnect => handler.on_disconnect(),
            Event::SerialNumber(sn) => handler.on_serial_number(sn),
            Event::Unhandled { code, args } => handler.on_unhandled(*code, args),
        }
    }
}

fn take_args<const K: usize>(code: u8, args: &[u8]) -> Result<[u8; K], Error> {
    match args.get(..K) {
        Some(slice) => {
            let mut out = [0u8; K];
            out.copy_from_slice(slice);
            Ok(out)
        }
        None => Err(Error::TruncatedPayload {
            code,
            expected: 1 + K,
            actual: 1 + args.len(),
        }),
    }
}

/// Receives events one method per kind, every method defaults to doing nothing
pub trait EventHandler {
    fn on_membrane_press(&mut self, _x: u8, _y: u8) {}
    fn on_membrane_release(&mut self, _x: u8, _y: u8) {}
    fn on_switch(&mut self, _number: u8, _state: u8) {}
    fn on_sensor_change(&mut self, _number: u8, _state: u8) {}
    fn on_version(&mut self, _major: u8, _minor: u8) {}
    fn on_on_off_switch(&mut self, _state: u8) {}
    fn on_correct_membrane(&mut self, _x: u8, _y: u8) {}
    fn on_correct_switch(&mut self, _number: u8, _state: u8) {}
    fn on_correct_done(&mut self) {}
    fn on_connect(&mut self) {}
    fn on_disconnect(&mut self) {}
    fn on_serial_number(&mut self, _serial_number: &SerialNumber) {}
    fn on_unhandled(&mut self, _code: u8, _args: &[u8]) {}
}
