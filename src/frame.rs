//! Incremental frame decoder
//!
//! Bytes arrive from the UART in arbitrary pieces, a frame can be split anywhere and a single
//! read can hold several frames. [`FrameDecoder`] keeps the partial frame between calls so the
//! caller can hand over whatever it got from the transport.
//!
//! There is no checksum in the protocol. After corruption in the middle of a frame the decoder
//! does not notice anything, it finishes the frame it believes it is reading and then waits for
//! the next `0xFF`. Garbage can therefore turn into a bogus event or an error before the stream
//! is back in sync.
use heapless::Vec;

use crate::event::Event;
use crate::{Error, DEFAULT_PAYLOAD_CAPACITY, SYNC_BYTE};

/// Where in a frame the decoder currently is
#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(Debug))]
pub enum DecoderState {
    /// Skipping bytes until the sync byte
    Idle,
    /// Sync byte seen, next byte is the payload length
    AwaitLength,
    /// Collecting `expected` payload bytes
    AwaitPayload { expected: u8 },
}

/// Turns a byte stream into [`Event`]s
///
/// `N` is the payload buffer capacity. Frames announcing a longer payload are dropped with
/// [`Error::FrameTooLarge`]. One decoder serves exactly one byte stream.
#[cfg_attr(feature = "std", derive(Debug))]
pub struct FrameDecoder<const N: usize = DEFAULT_PAYLOAD_CAPACITY> {
    state: DecoderState,
    payload: Vec<u8, N>,
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self::with_capacity()
    }
}

impl<const N: usize> FrameDecoder<N> {
    pub fn with_capacity() -> Self {
        Self {
            state: DecoderState::Idle,
            payload: Vec::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        N
    }

    pub fn state(&self) -> DecoderState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == DecoderState::Idle
    }

    /// Number of payload bytes collected for the frame in progress
    pub fn received(&self) -> usize {
        self.payload.len()
    }

    /// Drops any partial frame and waits for the next sync byte
    pub fn reset(&mut self) {
        self.state = DecoderState::Idle;
        self.payload.clear();
    }

    /// Advances the state machine by one byte
    ///
    /// Returns `Some` when the byte completed a frame or made the decoder drop one.
    pub fn feed_byte(&mut self, byte: u8) -> Option<Result<Event, Error>> {
        match self.state {
            DecoderState::Idle => {
                if byte == SYNC_BYTE {
                    self.state = DecoderState::AwaitLength;
                }
                None
            }
            DecoderState::AwaitLength => {
                self.payload.clear();
                if byte == 0 {
                    self.reset();
                    return Some(Err(Error::EmptyFrame));
                }
                if usize::from(byte) > N {
                    #[cfg(feature = "defmt-impl")]
                    defmt::warn!(
                        "dropping frame of {=u8} bytes, capacity is {=usize}",
                        byte,
                        N
                    );
                    self.reset();
                    return Some(Err(Error::FrameTooLarge {
                        length: byte,
                        capacity: N,
                    }));
                }
                self.state = DecoderState::AwaitPayload { expected: byte };
                None
            }
            DecoderState::AwaitPayload { expected } => {
                // expected <= N was checked when the length arrived
                if self.payload.push(byte).is_err() {
                    self.reset();
                    return Some(Err(Error::FrameTooLarge {
                        length: expected,
                        capacity: N,
                    }));
                }
                if self.payload.len() < usize::from(expected) {
                    return None;
                }

                let event = Event::from_payload(&self.payload);
                #[cfg(feature = "defmt-impl")]
                defmt::trace!("frame complete: {=[u8]}", &self.payload[..]);
                self.reset();
                Some(event)
            }
        }
    }

    /// Lazily decodes `bytes`, yielding every event completed along the way
    ///
    /// A frame left unfinished at the end of `bytes` is kept and continued by the next call.
    /// Bytes are consumed only as the iterator is advanced, whatever is left when it is dropped
    /// never reaches the decoder.
    pub fn feed<'a>(&'a mut self, bytes: &'a [u8]) -> Feed<'a, N> {
        Feed {
            decoder: self,
            bytes: bytes.iter(),
        }
    }

    /// Decodes all of `bytes`, handing every outcome to `f`
    pub fn feed_with<F>(&mut self, bytes: &[u8], mut f: F)
    where
        F: FnMut(Result<Event, Error>),
    {
        for outcome in self.feed(bytes) {
            f(outcome);
        }
    }
}

impl Default for FrameDecoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator returned by [`FrameDecoder::feed`]
pub struct Feed<'a, const N: usize> {
    decoder: &'a mut FrameDecoder<N>,
    bytes: core::slice::Iter<'a, u8>,
}

impl<'a, const N: usize> Feed<'a, N> {
    /// Input not yet seen by the decoder
    pub fn remaining(&self) -> &'a [u8] {
        self.bytes.as_slice()
    }
}

impl<'a, const N: usize> Iterator for Feed<'a, N> {
    type Item = Result<Event, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        for &byte in self.bytes.by_ref() {
            if let Some(outcome) = self.decoder.feed_byte(byte) {
                return Some(outcome);
            }
        }
        None
    }
}
