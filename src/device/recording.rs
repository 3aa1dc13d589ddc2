//! Test double that records everything a device would have done.

use std::sync::{Arc, Mutex};

use crate::device::{DeviceError, OutputDevice};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceId {
    Joystick,
    Mouse,
    Keyboard,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recorded {
    KeyCap { device: DeviceId, code: u16 },
    AbsCap { device: DeviceId, code: u16, min: i32, max: i32 },
    RelCap { device: DeviceId, code: u16 },
    Finished { device: DeviceId },
    Key { device: DeviceId, code: u16, pressed: bool },
    Abs { device: DeviceId, code: u16, value: i32 },
    Rel { device: DeviceId, code: u16, delta: i32 },
}

/// Clones share the same log, so tests can keep a handle while the device
/// itself moves into a `DeviceSet`.
#[derive(Debug, Clone)]
pub struct RecordingDevice {
    id: DeviceId,
    log: Arc<Mutex<Vec<Recorded>>>,
}

impl RecordingDevice {
    pub fn new(id: DeviceId) -> Self {
        Self {
            id,
            log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn events(&self) -> Vec<Recorded> {
        self.log.lock().unwrap().clone()
    }

    /// Only the emitted events, capability registration filtered out.
    pub fn emitted(&self) -> Vec<Recorded> {
        self.events()
            .into_iter()
            .filter(|event| {
                matches!(
                    event,
                    Recorded::Key { .. } | Recorded::Abs { .. } | Recorded::Rel { .. }
                )
            })
            .collect()
    }

    fn push(&self, event: Recorded) {
        self.log.lock().unwrap().push(event);
    }
}

impl OutputDevice for RecordingDevice {
    fn add_key(&mut self, code: u16) -> Result<(), DeviceError> {
        self.push(Recorded::KeyCap {
            device: self.id,
            code,
        });
        Ok(())
    }

    fn add_abs(&mut self, code: u16, min: i32, max: i32) -> Result<(), DeviceError> {
        self.push(Recorded::AbsCap {
            device: self.id,
            code,
            min,
            max,
        });
        Ok(())
    }

    fn add_rel(&mut self, code: u16) -> Result<(), DeviceError> {
        self.push(Recorded::RelCap {
            device: self.id,
            code,
        });
        Ok(())
    }

    fn finish(&mut self) -> Result<(), DeviceError> {
        self.push(Recorded::Finished { device: self.id });
        Ok(())
    }

    fn send_key(&mut self, code: u16, pressed: bool) -> Result<(), DeviceError> {
        self.push(Recorded::Key {
            device: self.id,
            code,
            pressed,
        });
        Ok(())
    }

    fn send_abs(&mut self, code: u16, value: i32) -> Result<(), DeviceError> {
        self.push(Recorded::Abs {
            device: self.id,
            code,
            value,
        });
        Ok(())
    }

    fn send_rel(&mut self, code: u16, delta: i32) -> Result<(), DeviceError> {
        self.push(Recorded::Rel {
            device: self.id,
            code,
            delta,
        });
        Ok(())
    }
}
