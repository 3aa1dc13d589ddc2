//! Logische Controls des Gamepad-Modells.
//!
//! `PadButton` und `PadAxis` benennen die Eingänge der Übersetzungsschicht,
//! unabhängig davon, welches physische Pad sie liefert. Die Tabellen-Typen
//! speichern pro Control genau einen Wert und werden direkt über die Enums
//! indiziert.

use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

/// Digital inputs the translation layer understands. The guitar fret
/// buttons (`Green`..`Orange`) and the legacy shoulder pair
/// (`White`/`Black`) share the table with the modern layout; a profile
/// simply leaves the controls its model never reports unmapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PadButton {
    Start,
    Guide,
    Back,
    A,
    B,
    X,
    Y,
    Green,
    Red,
    Yellow,
    Blue,
    Orange,
    White,
    Black,
    LeftShoulder,
    RightShoulder,
    LeftTrigger,
    RightTrigger,
    ThumbLeft,
    ThumbRight,
    DpadUp,
    DpadDown,
    DpadLeft,
    DpadRight,
}

/// Analog inputs. `Trigger` is the combined axis used when both physical
/// triggers collapse onto one output (`rt - lt`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PadAxis {
    LeftX,
    LeftY,
    RightX,
    RightY,
    LeftTrigger,
    RightTrigger,
    Trigger,
    DpadX,
    DpadY,
}

impl PadButton {
    pub const COUNT: usize = 24;

    pub const ALL: [PadButton; Self::COUNT] = [
        PadButton::Start,
        PadButton::Guide,
        PadButton::Back,
        PadButton::A,
        PadButton::B,
        PadButton::X,
        PadButton::Y,
        PadButton::Green,
        PadButton::Red,
        PadButton::Yellow,
        PadButton::Blue,
        PadButton::Orange,
        PadButton::White,
        PadButton::Black,
        PadButton::LeftShoulder,
        PadButton::RightShoulder,
        PadButton::LeftTrigger,
        PadButton::RightTrigger,
        PadButton::ThumbLeft,
        PadButton::ThumbRight,
        PadButton::DpadUp,
        PadButton::DpadDown,
        PadButton::DpadLeft,
        PadButton::DpadRight,
    ];
}

impl PadAxis {
    pub const COUNT: usize = 9;

    pub const ALL: [PadAxis; Self::COUNT] = [
        PadAxis::LeftX,
        PadAxis::LeftY,
        PadAxis::RightX,
        PadAxis::RightY,
        PadAxis::LeftTrigger,
        PadAxis::RightTrigger,
        PadAxis::Trigger,
        PadAxis::DpadX,
        PadAxis::DpadY,
    ];
}

/// Ein Wert pro [`PadButton`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonTable<T>([T; PadButton::COUNT]);

/// Ein Wert pro [`PadAxis`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisTable<T>([T; PadAxis::COUNT]);

impl<T: Copy> ButtonTable<T> {
    pub fn filled(value: T) -> Self {
        Self([value; PadButton::COUNT])
    }
}

impl<T: Default> Default for ButtonTable<T> {
    fn default() -> Self {
        Self(std::array::from_fn(|_| T::default()))
    }
}

impl<T> ButtonTable<T> {
    pub fn iter(&self) -> impl Iterator<Item = (PadButton, &T)> {
        PadButton::ALL.iter().copied().zip(self.0.iter())
    }
}

impl<T> Index<PadButton> for ButtonTable<T> {
    type Output = T;

    fn index(&self, button: PadButton) -> &T {
        &self.0[button as usize]
    }
}

impl<T> IndexMut<PadButton> for ButtonTable<T> {
    fn index_mut(&mut self, button: PadButton) -> &mut T {
        &mut self.0[button as usize]
    }
}

impl<T: Copy> AxisTable<T> {
    pub fn filled(value: T) -> Self {
        Self([value; PadAxis::COUNT])
    }
}

impl<T: Default> Default for AxisTable<T> {
    fn default() -> Self {
        Self(std::array::from_fn(|_| T::default()))
    }
}

impl<T> AxisTable<T> {
    pub fn iter(&self) -> impl Iterator<Item = (PadAxis, &T)> {
        PadAxis::ALL.iter().copied().zip(self.0.iter())
    }
}

impl<T> Index<PadAxis> for AxisTable<T> {
    type Output = T;

    fn index(&self, axis: PadAxis) -> &T {
        &self.0[axis as usize]
    }
}

impl<T> IndexMut<PadAxis> for AxisTable<T> {
    fn index_mut(&mut self, axis: PadAxis) -> &mut T {
        &mut self.0[axis as usize]
    }
}
