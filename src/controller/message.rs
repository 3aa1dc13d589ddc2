//! Pad state reports exchanged between the collector and the engine.
//!
//! Every report is a full snapshot of the pad, not a delta. The engine
//! diffs consecutive snapshots itself, so lossy channels only cost latency,
//! never stuck buttons.

use serde::{Deserialize, Serialize};

/// Hardware generation of the pad being translated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GamepadModel {
    /// First-generation pad: White/Black instead of shoulders, no guide.
    Classic,
    Modern,
    ModernWireless,
    Guitar,
}

/// Snapshot of a first-generation pad.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassicReport {
    pub dpad_up: bool,
    pub dpad_down: bool,
    pub dpad_left: bool,
    pub dpad_right: bool,
    pub start: bool,
    pub back: bool,
    pub a: bool,
    pub b: bool,
    pub x: bool,
    pub y: bool,
    pub white: bool,
    pub black: bool,
    pub thumb_left: bool,
    pub thumb_right: bool,
    pub lt: u8,
    pub rt: u8,
    pub x1: i16,
    pub y1: i16,
    pub x2: i16,
    pub y2: i16,
}

/// Snapshot of a modern (wired or wireless) pad.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModernReport {
    pub dpad_up: bool,
    pub dpad_down: bool,
    pub dpad_left: bool,
    pub dpad_right: bool,
    pub start: bool,
    pub back: bool,
    pub guide: bool,
    pub a: bool,
    pub b: bool,
    pub x: bool,
    pub y: bool,
    pub lb: bool,
    pub rb: bool,
    pub thumb_left: bool,
    pub thumb_right: bool,
    pub lt: u8,
    pub rt: u8,
    pub x1: i16,
    pub y1: i16,
    pub x2: i16,
    pub y2: i16,
}

/// Snapshot of a guitar controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GuitarReport {
    pub dpad_up: bool,
    pub dpad_down: bool,
    pub dpad_left: bool,
    pub dpad_right: bool,
    pub start: bool,
    pub back: bool,
    pub guide: bool,
    pub green: bool,
    pub red: bool,
    pub yellow: bool,
    pub blue: bool,
    pub orange: bool,
    pub whammy: i16,
    pub tilt: i16,
}

/// One full pad snapshot, tagged with its model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamepadMessage {
    Classic(ClassicReport),
    Modern(ModernReport),
    ModernWireless(ModernReport),
    Guitar(GuitarReport),
}

impl GamepadMessage {
    pub fn model(&self) -> GamepadModel {
        match self {
            GamepadMessage::Classic(_) => GamepadModel::Classic,
            GamepadMessage::Modern(_) => GamepadModel::Modern,
            GamepadMessage::ModernWireless(_) => GamepadModel::ModernWireless,
            GamepadMessage::Guitar(_) => GamepadModel::Guitar,
        }
    }
}
