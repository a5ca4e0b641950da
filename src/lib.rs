//! Serial event protocol spoken by IntelliKeys keyboards (and their UART bridges).
//!
//! Every unit on the wire is a frame:
//!
//! ```text
//! 0xFF | LEN | TYPE | ARG0 .. ARG(LEN-2)
//! ```
//!
//! `LEN` counts the `TYPE` byte and the arguments. There is no checksum and no escaping.
//!
//! Incoming bytes are turned into [`Event`]s by a [`FrameDecoder`], outgoing requests are
//! serialized with [`Command::encode`].

#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

pub mod command;
pub mod event;
pub mod frame;

// include defmt::Format implementations
// we don't want them derive()d in the modules unless defmt-impl feature is set
#[cfg(feature = "defmt-impl")]
pub mod defmt;

// reexport heapless
pub use heapless;

pub use command::{Command, EncodedCommand, Led, ParseCommandError};
pub use event::{Event, EventCode, EventHandler, SerialNumber};
pub use frame::{DecoderState, Feed, FrameDecoder};

#[cfg(feature = "std")]
use core::fmt;

/// First byte of every frame in both directions
pub const SYNC_BYTE: u8 = 0xFF;

/// Baud rate of the device UART. Not used by the codec itself.
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// Payload buffer size used by [`FrameDecoder::new`]
pub const DEFAULT_PAYLOAD_CAPACITY: usize = 64;

/// Largest payload a length byte can announce
pub const MAX_PAYLOAD_LENGTH: usize = u8::MAX as usize;

/// Membrane cells across, `x` of a membrane event is below this
pub const MEMBRANE_RESOLUTION_X: u8 = 24;
/// Membrane cells down, `y` of a membrane event is below this
pub const MEMBRANE_RESOLUTION_Y: u8 = 24;

/// Switch jacks on the keyboard
pub const NUM_SWITCHES: u8 = 2;
/// Overlay bar code sensors, `number` of a sensor event is below this
pub const NUM_SENSORS: u8 = 3;

#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(Debug))]
pub enum Error {
    /// Length byte announced more payload than the decoder can hold, frame was dropped
    FrameTooLarge { length: u8, capacity: usize },
    /// Length byte was zero, there is no type code to decode
    EmptyFrame,
    /// Known type code with fewer argument bytes than it carries
    TruncatedPayload {
        code: u8,
        expected: usize,
        actual: usize,
    },
    BufferTooSmall,
}

#[cfg(feature = "std")]
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::FrameTooLarge { length, capacity } => write!(
                f,
                "frame of {} bytes does not fit {} byte payload buffer",
                length, capacity
            ),
            Error::EmptyFrame => write!(f, "frame with zero length"),
            Error::TruncatedPayload {
                code,
                expected,
                actual,
            } => write!(
                f,
                "event {} needs {} payload bytes, got {}",
                code, expected, actual
            ),
            Error::BufferTooSmall => write!(f, "output buffer too small"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
