use std::env;
use std::io::{self, Read, Write};
use std::time::Duration;

use intellikeys_serial::{
    Command, EventHandler, FrameDecoder, SerialNumber, DEFAULT_BAUD_RATE, MEMBRANE_RESOLUTION_X,
    MEMBRANE_RESOLUTION_Y, NUM_SENSORS,
};

const DEFAULT_PORT_NAME: &str = "/dev/ttyUSB0";

struct Printer;

impl EventHandler for Printer {
    fn on_membrane_press(&mut self, x: u8, y: u8) {
        if x >= MEMBRANE_RESOLUTION_X || y >= MEMBRANE_RESOLUTION_Y {
            eprintln!("press outside the membrane {} {}", x, y);
        }
        println!("press {} {}", x, y);
    }
    fn on_membrane_release(&mut self, x: u8, y: u8) {
        println!("release {} {}", x, y);
    }
    fn on_switch(&mut self, number: u8, state: u8) {
        println!("switch {} {}", number, state);
    }
    fn on_sensor_change(&mut self, number: u8, state: u8) {
        if number >= NUM_SENSORS {
            eprintln!("unknown sensor {}", number);
        }
        println!("sensor {} {}", number, state);
    }
    fn on_version(&mut self, major: u8, minor: u8) {
        println!("FW version {} {}", major, minor);
    }
    fn on_on_off_switch(&mut self, state: u8) {
        println!("Top switch {}", state);
    }
    fn on_correct_membrane(&mut self, x: u8, y: u8) {
        println!("correct membrane {} {}", x, y);
    }
    fn on_correct_switch(&mut self, number: u8, state: u8) {
        println!("correct switch {} {}", number, state);
    }
    fn on_correct_done(&mut self) {
        println!("correct done");
    }
    fn on_connect(&mut self) {
        println!("IK connect");
    }
    fn on_disconnect(&mut self) {
        println!("IK disconnect");
    }
    fn on_serial_number(&mut self, serial_number: &SerialNumber) {
        println!("IK serial number {}", serial_number);
    }
    fn on_unhandled(&mut self, code: u8, args: &[u8]) {
        println!("Unknown event {} {:02x?}", code, args);
    }
}

fn main() {
    let port_name = env::var("INTELLIKEYS_PORT").unwrap_or_else(|_| DEFAULT_PORT_NAME.into());
    let port = serialport::new(&port_name, DEFAULT_BAUD_RATE)
        .timeout(Duration::from_millis(10))
        .open();

    let mut decoder = FrameDecoder::new();
    let mut printer = Printer;

    match port {
        Ok(mut port) => {
            // ask for the current state so something shows up right away
            for command in [
                Command::GetOnOff,
                Command::AllSensors,
                Command::GetSerialNumber,
                Command::GetVersion,
            ] {
                if let Err(e) = port.write_all(&command.encode()) {
                    eprintln!("could not write {:?}: {:?}", command, e);
                }
            }

            let mut serial_buf: Vec<u8> = vec![0; 64];
            loop {
                match port.read(serial_buf.as_mut_slice()) {
                    Ok(t) => decoder.feed_with(&serial_buf[..t], |outcome| match outcome {
                        Ok(event) => event.dispatch(&mut printer),
                        Err(e) => eprintln!("Error while decoding events = {}", e),
                    }),
                    Err(ref e) if e.kind() == io::ErrorKind::TimedOut => (),
                    Err(e) => eprintln!("{:?}", e),
                }
            }
        }
        Err(e) => {
            eprintln!("Failed to open \"{}\". Error: {}", port_name, e);
            ::std::process::exit(1);
        }
    }
}

