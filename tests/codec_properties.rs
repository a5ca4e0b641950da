//! Property-based tests for the frame decoder and command encoder.
//!
//! - Splitting the input differently never changes the decoded events
//! - Bytes without a sync byte never produce anything
//! - The payload buffer never grows past its capacity
//! - Encoded commands are always single well formed frames

use intellikeys_serial::{
    Command, DecoderState, Error, Event, FrameDecoder, DEFAULT_PAYLOAD_CAPACITY,
    MEMBRANE_RESOLUTION_X, MEMBRANE_RESOLUTION_Y, NUM_SENSORS, NUM_SWITCHES, SYNC_BYTE,
};
use proptest::prelude::*;

// A complete frame with a payload that fits the default decoder
fn frame_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 1..=DEFAULT_PAYLOAD_CAPACITY).prop_map(|payload| {
        let mut frame = vec![SYNC_BYTE, payload.len() as u8];
        frame.extend(payload);
        frame
    })
}

fn stream_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(frame_strategy(), 0..16).prop_map(|frames| frames.concat())
}

fn command_strategy() -> impl Strategy<Value = Command> {
    prop_oneof![
        Just(Command::GetVersion),
        Just(Command::Scan),
        Just(Command::GetEvent),
        Just(Command::Init),
        Just(Command::GetOnOff),
        Just(Command::GetCorrect),
        Just(Command::ResetDevice),
        Just(Command::AllSensors),
        Just(Command::GetSerialNumber),
        (any::<u8>(), any::<u8>()).prop_map(|(number, state)| Command::SetLed { number, state }),
        (any::<u8>(), any::<u8>(), any::<u8>()).prop_map(|(frequency, duration, volume)| {
            Command::SetTone {
                frequency,
                duration,
                volume,
            }
        }),
    ]
}

fn decode_in_chunks(stream: &[u8], cuts: &[usize]) -> Vec<Result<Event, Error>> {
    let mut decoder = FrameDecoder::new();
    let mut events = Vec::new();
    let mut start = 0;
    let mut cuts: Vec<usize> = cuts.iter().map(|c| c % (stream.len() + 1)).collect();
    cuts.sort_unstable();
    for cut in cuts {
        events.extend(decoder.feed(&stream[start..cut]));
        start = cut;
    }
    events.extend(decoder.feed(&stream[start..]));
    events
}

#[test]
fn prop_chunking_does_not_change_events() {
    proptest!(|(stream in stream_strategy(), cuts in prop::collection::vec(any::<usize>(), 0..32))| {
        let mut decoder = FrameDecoder::new();
        let whole: Vec<_> = decoder.feed(&stream).collect();

        prop_assert_eq!(decode_in_chunks(&stream, &cuts), whole);
    });
}

#[test]
fn prop_byte_at_a_time_matches_whole() {
    proptest!(|(stream in stream_strategy())| {
        let mut whole_decoder = FrameDecoder::new();
        let whole: Vec<_> = whole_decoder.feed(&stream).collect();

        let mut decoder = FrameDecoder::new();
        let mut single = Vec::new();
        for b in &stream {
            single.extend(decoder.feed(std::slice::from_ref(b)));
        }
        prop_assert_eq!(single, whole);
        prop_assert!(decoder.is_idle());
    });
}

#[test]
fn prop_one_outcome_per_frame() {
    proptest!(|(frames in prop::collection::vec(frame_strategy(), 0..16))| {
        let mut decoder = FrameDecoder::new();
        let outcomes = decoder.feed(&frames.concat()).count();
        prop_assert_eq!(outcomes, frames.len());
    });
}

#[test]
fn prop_bytes_without_sync_are_ignored() {
    proptest!(|(noise in prop::collection::vec(0u8..SYNC_BYTE, 0..512))| {
        let mut decoder = FrameDecoder::new();
        prop_assert_eq!(decoder.feed(&noise).count(), 0);
        prop_assert_eq!(decoder.state(), DecoderState::Idle);
    });
}

#[test]
fn prop_buffer_stays_within_capacity() {
    // sync bytes and short lengths often enough to reach the payload state
    let byte = prop_oneof![Just(SYNC_BYTE), 0u8..=20, any::<u8>()];
    proptest!(|(bytes in prop::collection::vec(byte, 0..1024))| {
        let mut decoder = FrameDecoder::<16>::with_capacity();
        for b in bytes {
            let _ = decoder.feed_byte(b);
            prop_assert!(decoder.received() <= decoder.capacity());
            match decoder.state() {
                DecoderState::AwaitPayload { expected } => {
                    prop_assert!(usize::from(expected) <= decoder.capacity());
                    prop_assert!(decoder.received() < usize::from(expected));
                }
                DecoderState::Idle | DecoderState::AwaitLength => {
                    prop_assert_eq!(decoder.received(), 0);
                }
            }
        }
    });
}

#[test]
fn prop_oversized_length_is_rejected() {
    proptest!(|(length in (DEFAULT_PAYLOAD_CAPACITY as u8 + 1)..=u8::MAX, tail in prop::collection::vec(0u8..SYNC_BYTE, 0..300))| {
        let mut decoder = FrameDecoder::new();
        let mut stream = vec![SYNC_BYTE, length];
        stream.extend(tail);
        let outcomes: Vec<_> = decoder.feed(&stream).collect();
        prop_assert_eq!(
            outcomes,
            vec![Err(Error::FrameTooLarge { length, capacity: DEFAULT_PAYLOAD_CAPACITY })]
        );
        prop_assert!(decoder.is_idle());
    });
}

#[test]
fn prop_encoded_command_is_well_formed() {
    proptest!(|(command in command_strategy())| {
        let frame = command.encode();
        let args = command.args();
        prop_assert_eq!(frame.len(), command.len());
        prop_assert_eq!(frame[0], SYNC_BYTE);
        prop_assert_eq!(usize::from(frame[1]), frame.len() - 2);
        prop_assert_eq!(frame[2], command.opcode());
        prop_assert_eq!(&frame[3..], &args[..]);

        // the decoder sees exactly one frame
        let mut decoder = FrameDecoder::new();
        prop_assert_eq!(decoder.feed(&frame).count(), 1);
        prop_assert!(decoder.is_idle());
    });
}

#[test]
fn prop_version_round_trip() {
    // a version answer is laid out like a two argument command
    proptest!(|(major in any::<u8>(), minor in any::<u8>())| {
        let mut frame = Command::SetLed { number: major, state: minor }.encode();
        frame[2] = 56;
        let mut decoder = FrameDecoder::new();
        let events: Vec<_> = decoder.feed(&frame).collect();
        prop_assert_eq!(events, vec![Ok(Event::Version { major, minor })]);
    });
}

#[test]
fn prop_device_inputs_decode_unchanged() {
    proptest!(|(x in 0..MEMBRANE_RESOLUTION_X, y in 0..MEMBRANE_RESOLUTION_Y, switch in 0..NUM_SWITCHES, sensor in 0..NUM_SENSORS, state in 0u8..2)| {
        let stream = [
            SYNC_BYTE, 3, 52, x, y,
            SYNC_BYTE, 3, 54, switch, state,
            SYNC_BYTE, 3, 55, sensor, state,
        ];
        let mut decoder = FrameDecoder::new();
        let events: Vec<_> = decoder.feed(&stream).collect();
        prop_assert_eq!(
            events,
            vec![
                Ok(Event::MembranePress { x, y }),
                Ok(Event::Switch { number: switch, state }),
                Ok(Event::SensorChange { number: sensor, state }),
            ]
        );
    });
}

#[test]
fn serial_number_decodes_as_ascii() {
    let mut decoder = FrameDecoder::new();
    let events: Vec<_> = decoder.feed(&[0xff, 4, 83, 0x41, 0x42, 0x43]).collect();
    match events.as_slice() {
        [Ok(Event::SerialNumber(sn))] => assert_eq!(sn.to_string(), "ABC"),
        other => panic!("unexpected outcome {:?}", other),
    }
}

#[test]
fn resume_after_split_header() {
    let mut decoder = FrameDecoder::new();
    assert_eq!(decoder.feed(&[0xff, 3]).count(), 0);
    let events: Vec<_> = decoder.feed(&[52, 10, 20]).collect();
    assert_eq!(events, vec![Ok(Event::MembranePress { x: 10, y: 20 })]);
}
