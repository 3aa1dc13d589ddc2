//! Routing of output events onto keyboard, mouse and joystick devices.

use tracing::{debug, info};

use crate::device::{DeviceError, OutputDevice};
use crate::mapping::profile::MappingProfile;
use crate::mapping::symbols;

/// Which virtual device a given event code belongs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceCategory {
    Keyboard,
    Mouse,
    Joystick,
}

/// Classifies a key/button code by its range: everything below the button
/// block is a keyboard key, the `BTN_MOUSE` block is a mouse button, the
/// rest is joystick territory.
pub fn classify(code: u16) -> DeviceCategory {
    if symbols::is_keyboard_key(code) {
        DeviceCategory::Keyboard
    } else if symbols::is_mouse_button(code) {
        DeviceCategory::Mouse
    } else {
        DeviceCategory::Joystick
    }
}

/// The up to three virtual devices one profile emits into. Keyboard and
/// mouse exist only when the profile both allows extra devices and maps
/// something that needs them.
pub struct DeviceSet {
    joystick: Box<dyn OutputDevice>,
    mouse: Option<Box<dyn OutputDevice>>,
    keyboard: Option<Box<dyn OutputDevice>>,
}

impl DeviceSet {
    /// Opens the devices a profile requires. `open` is called once per
    /// needed category so the caller decides what backs each device.
    pub fn provision_with<F>(profile: &MappingProfile, mut open: F) -> Result<Self, DeviceError>
    where
        F: FnMut(DeviceCategory) -> Result<Box<dyn OutputDevice>, DeviceError>,
    {
        let joystick = open(DeviceCategory::Joystick)?;

        let mouse = if profile.extra_devices && profile.needs_mouse_device() {
            info!("Profile maps mouse output, opening dedicated mouse device");
            Some(open(DeviceCategory::Mouse)?)
        } else {
            None
        };

        let keyboard = if profile.extra_devices && profile.needs_keyboard_device() {
            info!("Profile maps keyboard output, opening dedicated keyboard device");
            Some(open(DeviceCategory::Keyboard)?)
        } else {
            None
        };

        Ok(Self {
            joystick,
            mouse,
            keyboard,
        })
    }

    /// Resolves a category to a device. Missing keyboard/mouse devices fall
    /// back to the joystick device silently, so profiles keep working when
    /// `extra_devices` is off.
    pub fn resolve_mut(&mut self, category: DeviceCategory) -> &mut dyn OutputDevice {
        match category {
            DeviceCategory::Joystick => self.joystick.as_mut(),
            DeviceCategory::Mouse => match self.mouse.as_mut() {
                Some(device) => device.as_mut(),
                None => self.joystick.as_mut(),
            },
            DeviceCategory::Keyboard => match self.keyboard.as_mut() {
                Some(device) => device.as_mut(),
                None => self.joystick.as_mut(),
            },
        }
    }

    /// Resolves a key code via [`classify`].
    pub fn resolve_key_mut(&mut self, code: u16) -> &mut dyn OutputDevice {
        self.resolve_mut(classify(code))
    }

    /// Finishes capability registration on every open device.
    pub fn finish_all(&mut self) -> Result<(), DeviceError> {
        debug!("Finishing capability registration on all devices");
        self.joystick.finish()?;
        if let Some(mouse) = self.mouse.as_mut() {
            mouse.finish()?;
        }
        if let Some(keyboard) = self.keyboard.as_mut() {
            keyboard.finish()?;
        }
        Ok(())
    }
}
