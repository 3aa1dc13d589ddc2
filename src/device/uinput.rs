//! uinput-backed output device.
//!
//! Capabilities are staged in memory until [`OutputDevice::finish`] builds
//! the actual kernel device; uinput locks a device's capability set at
//! creation time, so registration after `finish` is an error.

use evdev::uinput::{VirtualDevice, VirtualDeviceBuilder};
use evdev::{
    AbsInfo, AbsoluteAxisType, AttributeSet, EventType, InputEvent, Key, RelativeAxisType,
    UinputAbsSetup,
};
use tracing::{debug, info};

use crate::device::{DeviceError, OutputDevice};

pub struct UinputDevice {
    name: String,
    keys: AttributeSet<Key>,
    rels: AttributeSet<RelativeAxisType>,
    abs: Vec<(AbsoluteAxisType, AbsInfo)>,
    device: Option<VirtualDevice>,
}

impl UinputDevice {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            keys: AttributeSet::new(),
            rels: AttributeSet::new(),
            abs: Vec::new(),
            device: None,
        }
    }

    fn device_mut(&mut self) -> Result<&mut VirtualDevice, DeviceError> {
        self.device.as_mut().ok_or_else(|| DeviceError::NotProvisioned {
            name: self.name.clone(),
        })
    }

    fn check_unfinished(&self) -> Result<(), DeviceError> {
        if self.device.is_some() {
            return Err(DeviceError::AlreadyProvisioned {
                name: self.name.clone(),
            });
        }
        Ok(())
    }
}

impl OutputDevice for UinputDevice {
    fn add_key(&mut self, code: u16) -> Result<(), DeviceError> {
        self.check_unfinished()?;
        self.keys.insert(Key::new(code));
        Ok(())
    }

    fn add_abs(&mut self, code: u16, min: i32, max: i32) -> Result<(), DeviceError> {
        self.check_unfinished()?;
        self.abs.push((
            AbsoluteAxisType(code),
            AbsInfo::new(0, min, max, 0, 0, 0),
        ));
        Ok(())
    }

    fn add_rel(&mut self, code: u16) -> Result<(), DeviceError> {
        self.check_unfinished()?;
        self.rels.insert(RelativeAxisType(code));
        Ok(())
    }

    fn finish(&mut self) -> Result<(), DeviceError> {
        self.check_unfinished()?;
        debug!(
            "Building uinput device '{}': {} keys, {} abs axes, {} rel axes",
            self.name,
            self.keys.iter().count(),
            self.abs.len(),
            self.rels.iter().count()
        );

        let mut builder = VirtualDeviceBuilder::new()
            .map_err(|e| DeviceError::Creation(e.to_string()))?
            .name(&self.name);

        if self.keys.iter().next().is_some() {
            builder = builder
                .with_keys(&self.keys)
                .map_err(|e| DeviceError::Creation(e.to_string()))?;
        }
        if self.rels.iter().next().is_some() {
            builder = builder
                .with_relative_axes(&self.rels)
                .map_err(|e| DeviceError::Creation(e.to_string()))?;
        }
        for (axis, info) in &self.abs {
            let setup = UinputAbsSetup::new(*axis, *info);
            builder = builder
                .with_absolute_axis(&setup)
                .map_err(|e| DeviceError::Creation(e.to_string()))?;
        }

        let device = builder
            .build()
            .map_err(|e| DeviceError::Creation(e.to_string()))?;
        info!("Created virtual device '{}'", self.name);
        self.device = Some(device);
        Ok(())
    }

    fn send_key(&mut self, code: u16, pressed: bool) -> Result<(), DeviceError> {
        let event = InputEvent::new(EventType::KEY, code, pressed as i32);
        self.device_mut()?.emit(&[event])?;
        Ok(())
    }

    fn send_abs(&mut self, code: u16, value: i32) -> Result<(), DeviceError> {
        let event = InputEvent::new(EventType::ABSOLUTE, code, value);
        self.device_mut()?.emit(&[event])?;
        Ok(())
    }

    fn send_rel(&mut self, code: u16, delta: i32) -> Result<(), DeviceError> {
        let event = InputEvent::new(EventType::RELATIVE, code, delta);
        self.device_mut()?.emit(&[event])?;
        Ok(())
    }
}
