use evdev::{Device, InputEvent};
use log::info;
use std::{collections::VecDeque, error::Error, path::Path};

pub struct DeviceMachine {
    device: Device,
    /// Events already fetched from the device but not read yet
    pending: VecDeque<InputEvent>,
}

impl DeviceMachine {
    pub fn new(path: &Path, grab: bool) -> Result<Self, Box<dyn Error>> {
        let mut device = Device::open(path)?;
        info!(
            "Opened {:?} ({})",
            path,
            device.name().unwrap_or("unnamed device")
        );

        if grab {
            // other readers (ex: the console) stop seeing the keys typed by this device
            device.grab()?;
            info!("Grabbed {:?}", path);
        }

        Ok(Self {
            device,
            pending: VecDeque::new(),
        })
    }

    /// Waits for the next raw event on the device
    pub fn read(&mut self) -> Result<InputEvent, Box<dyn Error>> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Ok(event);
            }

            // blocks until the device has something; a device that went away is an error here
            self.pending.extend(self.device.fetch_events()?);
        }
    }
}
