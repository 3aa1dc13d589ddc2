//! Übersetzungsschicht zwischen Pad-Zustand und virtuellen Geräten.
//!
//! Die Module bauen aufeinander auf: [`symbols`] kennt die Ereigniscodes,
//! [`descriptor`] beschreibt einzelne Ausgabeziele, [`controls`] und
//! [`profile`] bilden daraus die vollständige Zuordnungstabelle, und
//! [`engine`] führt sie aus.

pub mod controls;
pub mod descriptor;
pub mod engine;
pub mod error;
pub mod profile;
pub mod symbols;

pub use controls::{AxisTable, ButtonTable, PadAxis, PadButton};
pub use descriptor::{AxisTarget, ButtonTarget};
pub use engine::Translator;
pub use error::MappingError;
pub use profile::MappingProfile;
