//! Mapping profile: the complete per-pad translation table plus the
//! behavior flags that reshape it.

use crate::mapping::controls::{AxisTable, ButtonTable, PadAxis, PadButton};
use crate::mapping::descriptor::{AxisTarget, ButtonTarget};
use crate::mapping::error::MappingError;
use crate::mapping::symbols;

/// One fully resolved translation table. Built from [`Default`] and then
/// adjusted through the config layer; the engine only ever reads it.
#[derive(Debug, Clone)]
pub struct MappingProfile {
    pub button_map: ButtonTable<ButtonTarget>,
    pub axis_map: AxisTable<AxisTarget>,
    /// Triggers become the digital `LeftTrigger`/`RightTrigger` buttons
    /// instead of analog axes.
    pub trigger_as_button: bool,
    /// Both triggers collapse onto the combined `Trigger` axis (`rt - lt`).
    pub trigger_as_zaxis: bool,
    /// The dpad reports through its button mappings instead of the hat axes.
    pub dpad_as_button: bool,
    /// The dpad is the only stick: it reports on the left-stick axes and
    /// every other axis stays silent.
    pub dpad_only: bool,
    /// Carried for compatibility with existing configs; nothing consumes it
    /// yet because the virtual devices are write-only.
    pub force_feedback: bool,
    /// Allow splitting output across dedicated keyboard/mouse devices.
    pub extra_devices: bool,
}

impl Default for MappingProfile {
    fn default() -> Self {
        let mut button_map = ButtonTable::filled(ButtonTarget::None);
        button_map[PadButton::Start] = ButtonTarget::key(symbols::BTN_START);
        button_map[PadButton::Guide] = ButtonTarget::key(symbols::BTN_MODE);
        button_map[PadButton::Back] = ButtonTarget::key(symbols::BTN_SELECT);
        button_map[PadButton::A] = ButtonTarget::key(symbols::BTN_A);
        button_map[PadButton::B] = ButtonTarget::key(symbols::BTN_B);
        button_map[PadButton::X] = ButtonTarget::key(symbols::BTN_X);
        button_map[PadButton::Y] = ButtonTarget::key(symbols::BTN_Y);
        button_map[PadButton::Green] = ButtonTarget::key(symbols::BTN_0);
        button_map[PadButton::Red] = ButtonTarget::key(symbols::BTN_1);
        button_map[PadButton::Yellow] = ButtonTarget::key(symbols::BTN_2);
        button_map[PadButton::Blue] = ButtonTarget::key(symbols::BTN_3);
        button_map[PadButton::Orange] = ButtonTarget::key(symbols::BTN_4);
        button_map[PadButton::White] = ButtonTarget::key(symbols::BTN_TL);
        button_map[PadButton::Black] = ButtonTarget::key(symbols::BTN_TR);
        button_map[PadButton::LeftShoulder] = ButtonTarget::key(symbols::BTN_TL);
        button_map[PadButton::RightShoulder] = ButtonTarget::key(symbols::BTN_TR);
        button_map[PadButton::LeftTrigger] = ButtonTarget::key(symbols::BTN_TL2);
        button_map[PadButton::RightTrigger] = ButtonTarget::key(symbols::BTN_TR2);
        button_map[PadButton::ThumbLeft] = ButtonTarget::key(symbols::BTN_THUMBL);
        button_map[PadButton::ThumbRight] = ButtonTarget::key(symbols::BTN_THUMBR);
        button_map[PadButton::DpadUp] = ButtonTarget::key(symbols::BTN_BASE);
        button_map[PadButton::DpadDown] = ButtonTarget::key(symbols::BTN_BASE2);
        button_map[PadButton::DpadLeft] = ButtonTarget::key(symbols::BTN_BASE3);
        button_map[PadButton::DpadRight] = ButtonTarget::key(symbols::BTN_BASE4);

        let mut axis_map = AxisTable::filled(AxisTarget::None);
        axis_map[PadAxis::LeftX] = AxisTarget::abs(symbols::ABS_X);
        axis_map[PadAxis::LeftY] = AxisTarget::abs(symbols::ABS_Y);
        axis_map[PadAxis::RightX] = AxisTarget::abs(symbols::ABS_RX);
        axis_map[PadAxis::RightY] = AxisTarget::abs(symbols::ABS_RY);
        axis_map[PadAxis::LeftTrigger] = AxisTarget::abs(symbols::ABS_GAS);
        axis_map[PadAxis::RightTrigger] = AxisTarget::abs(symbols::ABS_BRAKE);
        axis_map[PadAxis::Trigger] = AxisTarget::abs(symbols::ABS_Z);
        axis_map[PadAxis::DpadX] = AxisTarget::abs(symbols::ABS_HAT0X);
        axis_map[PadAxis::DpadY] = AxisTarget::abs(symbols::ABS_HAT0Y);

        Self {
            button_map,
            axis_map,
            trigger_as_button: false,
            trigger_as_zaxis: false,
            dpad_as_button: false,
            dpad_only: false,
            force_feedback: false,
            extra_devices: true,
        }
    }
}

impl MappingProfile {
    /// Rejects flag combinations the engine cannot honor.
    pub fn validate(&self) -> Result<(), MappingError> {
        if self.trigger_as_button && self.trigger_as_zaxis {
            return Err(MappingError::ConflictingFlags);
        }
        Ok(())
    }

    /// True if any mapped code lands in the keyboard key range.
    pub fn needs_keyboard_device(&self) -> bool {
        let button_hit = self.button_map.iter().any(|(_, target)| match *target {
            ButtonTarget::Key { code } => symbols::is_keyboard_key(code),
            _ => false,
        });
        button_hit
            || self.axis_map.iter().any(|(_, target)| match *target {
                AxisTarget::Key {
                    primary, secondary, ..
                } => symbols::is_keyboard_key(primary) || symbols::is_keyboard_key(secondary),
                _ => false,
            })
    }

    /// True if any mapping produces mouse buttons or relative motion.
    pub fn needs_mouse_device(&self) -> bool {
        let button_hit = self.button_map.iter().any(|(_, target)| match *target {
            ButtonTarget::Key { code } => symbols::is_mouse_button(code),
            ButtonTarget::Rel { .. } => true,
            _ => false,
        });
        button_hit
            || self.axis_map.iter().any(|(_, target)| match *target {
                AxisTarget::Key {
                    primary, secondary, ..
                } => symbols::is_mouse_button(primary) || symbols::is_mouse_button(secondary),
                AxisTarget::Rel { .. } => true,
                _ => false,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_needs_no_extra_devices() {
        let profile = MappingProfile::default();
        assert!(!profile.needs_keyboard_device());
        assert!(!profile.needs_mouse_device());
        profile.validate().unwrap();
    }

    #[test]
    fn keyboard_scan_sees_axis_secondary_codes() {
        let mut profile = MappingProfile::default();
        profile.axis_map[PadAxis::LeftX] = AxisTarget::Key {
            primary: symbols::BTN_BASE,
            secondary: symbols::KEY_RIGHT,
            threshold: 8000,
        };
        assert!(profile.needs_keyboard_device());
    }

    #[test]
    fn mouse_scan_sees_relative_targets() {
        let mut profile = MappingProfile::default();
        profile.button_map[PadButton::A] = ButtonTarget::rel(symbols::REL_WHEEL);
        assert!(profile.needs_mouse_device());
    }

    #[test]
    fn conflicting_trigger_flags_are_rejected() {
        let mut profile = MappingProfile::default();
        profile.trigger_as_button = true;
        profile.trigger_as_zaxis = true;
        assert!(matches!(
            profile.validate(),
            Err(MappingError::ConflictingFlags)
        ));
    }
}
