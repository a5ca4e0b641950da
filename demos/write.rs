use ::std::{thread, time};
use std::env;
use std::io::Write;
use std::time::Duration;

use intellikeys_serial::{Command, Led, DEFAULT_BAUD_RATE};

const DEFAULT_PORT_NAME: &str = "/dev/ttyUSB0";

const LEDS: [Led; 6] = [
    Led::Shift,
    Led::Alt,
    Led::CapsLock,
    Led::CtrlCmd,
    Led::Mouse,
    Led::NumLock,
];

fn main() {
    let port_name = env::var("INTELLIKEYS_PORT").unwrap_or_else(|_| DEFAULT_PORT_NAME.into());
    let port = serialport::new(&port_name, DEFAULT_BAUD_RATE)
        .timeout(Duration::from_millis(10))
        .open();

    match port {
        Ok(mut port) => {
            let mut send = |command: Command| {
                if let Err(e) = port.write_all(&command.encode()) {
                    eprintln!("could not write {:?}: {:?}", command, e);
                }
            };

            for led in LEDS {
                send(Command::set_led(led, true));
            }
            send(Command::SetTone {
                frequency: 0,
                duration: 0,
                volume: 0,
            });
            send(Command::GetOnOff);
            send(Command::AllSensors);
            send(Command::GetSerialNumber);
            send(Command::GetVersion);
            thread::sleep(time::Duration::from_millis(100));
            send(Command::GetCorrect);

            thread::sleep(time::Duration::from_secs(1));
            for led in LEDS {
                send(Command::set_led(led, false));
            }
        }
        Err(e) => {
            eprintln!("Failed to open \"{}\". Error: {}", port_name, e);
            ::std::process::exit(1);
        }
    }
}
