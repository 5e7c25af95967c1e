use cardreader_core::{KeyEvent, Machine};
use evdev::Key;
use log::error;
use std::{error::Error, path::Path};

mod machine;
mod raw_event;

use machine::DeviceMachine;

/// A card reader that shows up as a keyboard under `/dev/input`
pub struct EvdevMachine {
    machine: DeviceMachine,
}

impl EvdevMachine {
    /// Opens the device at the path. When `grab` is set, nothing else receives its keys while
    /// this machine is alive
    pub fn new(device_path: &Path, grab: bool) -> Result<Self, Box<dyn Error>> {
        let machine = DeviceMachine::new(device_path, grab)?;
        Ok(Self { machine })
    }
}

impl Machine for EvdevMachine {
    fn read(&mut self) -> Result<Option<KeyEvent>, Box<dyn Error>> {
        loop {
            let raw = self.machine.read()?;
            if let Some(event) = raw_event::parse_raw(&raw) {
                return Ok(Some(event));
            }
        }
    }
}

pub fn print_available_devices() {
    let mut found = 0;
    for (path, device) in evdev::enumerate() {
        // a card reader has to be able to finish an entry
        let has_enter = device
            .supported_keys()
            .map_or(false, |keys| keys.contains(Key::KEY_ENTER));
        if !has_enter {
            continue;
        }

        found += 1;
        println!("  {}", path.display());
        println!("          Name: {}", device.name().unwrap_or(""));
        println!("      Physical: {}", device.physical_path().unwrap_or(""));
        let id = device.input_id();
        println!(
            "    VID:{:04x} PID:{:04x}",
            id.vendor(),
            id.product()
        );
    }

    match found {
        0 => error!("No devices with keys found. Devices under /dev/input are often only readable by root or the `input` group"),
        1 => println!("Found 1 device"),
        n => println!("Found {} devices", n),
    }
}
