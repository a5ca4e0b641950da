use std::env;

use intellikeys_serial::{Command, FrameDecoder};

const USAGE: &str = "usage: output encode <command@args> | output decode <hex bytes>";

fn encode(text: &str) -> Result<(), Box<dyn std::error::Error>> {
    let command: Command = text
        .parse()
        .map_err(|e| format!("could not parse command {}: {}", text, e))?;
    let frame = command.encode();

    let mut hex = [0u8; 2 * intellikeys_serial::command::MAX_COMMAND_FRAME_LENGTH];
    let hex_len = base16::encode_config_slice(&frame, base16::EncodeLower, &mut hex);

    println!(
        "command {:?},\nbytes: {:02x?},\nhex: {}",
        command,
        &frame[..],
        std::str::from_utf8(&hex[..hex_len])?
    );
    Ok(())
}

fn decode(hex: &str) -> Result<(), Box<dyn std::error::Error>> {
    let clean: String = hex
        .trim_start_matches("0x")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    let mut bytes = vec![0u8; clean.len() / 2];
    base16::decode_slice(&clean, &mut bytes).map_err(|e| format!("malformed hex: {}", e))?;

    let mut decoder = FrameDecoder::<{ intellikeys_serial::MAX_PAYLOAD_LENGTH }>::with_capacity();
    for outcome in decoder.feed(&bytes) {
        match outcome {
            Ok(event) => println!("event {:?}", event),
            Err(e) => println!("error {}", e),
        }
    }
    if !decoder.is_idle() {
        println!("incomplete frame left: {:?}", decoder.state());
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().skip(1).collect();

    match args.as_slice() {
        [mode, value] if mode == "encode" => encode(value),
        [mode, rest @ ..] if mode == "decode" && !rest.is_empty() => decode(&rest.concat()),
        _ => Err(USAGE.into()),
    }
}
