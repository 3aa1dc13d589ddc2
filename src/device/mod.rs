//! Virtual output devices.
//!
//! [`OutputDevice`] is the seam between the translation engine and the
//! kernel: capability registration first, then `finish`, then event
//! emission. The uinput-backed implementation lives in [`uinput`], the
//! keyboard/mouse/joystick split in [`router`].

pub mod router;
pub mod uinput;

#[cfg(test)]
pub(crate) mod recording;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("Failed to create virtual device: {0}")]
    Creation(String),

    #[error("Device '{name}' is not finished yet, cannot emit events")]
    NotProvisioned { name: String },

    #[error("Device '{name}' is already finished, cannot register capabilities")]
    AlreadyProvisioned { name: String },

    #[error("Device I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A write-only virtual input device.
///
/// Lifecycle: any number of `add_*` calls, exactly one `finish`, then any
/// number of `send_*` calls. Implementations report out-of-order use via
/// [`DeviceError::NotProvisioned`] / [`DeviceError::AlreadyProvisioned`].
pub trait OutputDevice: Send {
    fn add_key(&mut self, code: u16) -> Result<(), DeviceError>;
    fn add_abs(&mut self, code: u16, min: i32, max: i32) -> Result<(), DeviceError>;
    fn add_rel(&mut self, code: u16) -> Result<(), DeviceError>;
    fn finish(&mut self) -> Result<(), DeviceError>;

    fn send_key(&mut self, code: u16, pressed: bool) -> Result<(), DeviceError>;
    fn send_abs(&mut self, code: u16, value: i32) -> Result<(), DeviceError>;
    fn send_rel(&mut self, code: u16, delta: i32) -> Result<(), DeviceError>;
}
