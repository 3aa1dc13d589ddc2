//! Physical pad input: gilrs-backed event collection and the snapshot
//! messages handed to the translation engine.

pub mod collector;
pub mod message;

pub use collector::{CollectorError, CollectorHandle, CollectorSettings};
pub use message::{ClassicReport, GamepadMessage, GamepadModel, GuitarReport, ModernReport};
