//! The translation engine.
//!
//! Consumes full pad snapshots and turns them into key, absolute and
//! relative events on the virtual devices. The engine is a two-phase state
//! machine: in `Provisioning` it registers the capabilities the active
//! profile needs, in `Running` it diffs snapshots and emits. Registration
//! after the devices are finished is unrepresentable that way.

use statum::{machine, state};
use tracing::{debug, info};

use crate::controller::message::{
    ClassicReport, GamepadMessage, GamepadModel, GuitarReport, ModernReport,
};
use crate::device::router::{DeviceCategory, DeviceSet};
use crate::device::DeviceError;
use crate::mapping::controls::{AxisTable, ButtonTable, PadAxis, PadButton};
use crate::mapping::descriptor::{AxisTarget, ButtonTarget};
use crate::mapping::error::MappingError;
use crate::mapping::profile::MappingProfile;

/// Repeat timer for one relative-motion mapping. `control` points back at
/// the logical input whose live state scales the emitted delta.
#[derive(Debug)]
struct RelTimer<C> {
    control: C,
    code: u16,
    step: i32,
    repeat_ms: u64,
    elapsed_ms: u64,
    next_fire_ms: u64,
}

impl<C> RelTimer<C> {
    fn new(control: C, code: u16, step: i32, repeat_ms: u64) -> Self {
        Self {
            control,
            code,
            step,
            repeat_ms,
            elapsed_ms: 0,
            next_fire_ms: 0,
        }
    }
}

#[state]
#[derive(Debug, Clone)]
pub enum TranslatorState {
    Provisioning,
    Running,
}

#[machine]
pub struct Translator<S: TranslatorState> {
    model: GamepadModel,
    profile: MappingProfile,
    devices: DeviceSet,
    button_state: ButtonTable<bool>,
    axis_state: AxisTable<i32>,
    rel_axis_timers: Vec<RelTimer<PadAxis>>,
    rel_button_timers: Vec<RelTimer<PadButton>>,
}

impl Translator<Provisioning> {
    /// Validates the profile and prepares an engine for the given model.
    pub fn create(
        model: GamepadModel,
        profile: MappingProfile,
        devices: DeviceSet,
    ) -> Result<Self, MappingError> {
        profile.validate()?;
        debug!("Creating translator for model {:?}", model);
        Ok(Self::new(
            model,
            profile,
            devices,
            ButtonTable::filled(false),
            AxisTable::filled(0),
            Vec::new(),
            Vec::new(),
        ))
    }

    /// Registers every capability the profile maps for this model, finishes
    /// the devices and hands back a running engine.
    pub fn provision(mut self) -> Result<Translator<Running>, DeviceError> {
        match self.model {
            GamepadModel::Guitar => self.setup_guitar()?,
            _ => self.setup_gamepad()?,
        }
        self.devices.finish_all()?;
        info!("Translator provisioned for model {:?}", self.model);
        Ok(self.transition())
    }

    fn setup_gamepad(&mut self) -> Result<(), DeviceError> {
        self.add_axis(PadAxis::LeftX, -32768, 32767)?;
        self.add_axis(PadAxis::LeftY, -32768, 32767)?;

        if !self.profile.dpad_only {
            self.add_axis(PadAxis::RightX, -32768, 32767)?;
            self.add_axis(PadAxis::RightY, -32768, 32767)?;
        }

        if self.profile.trigger_as_button {
            self.add_button(PadButton::LeftTrigger)?;
            self.add_button(PadButton::RightTrigger)?;
        } else if self.profile.trigger_as_zaxis {
            self.add_axis(PadAxis::Trigger, -255, 255)?;
        } else {
            self.add_axis(PadAxis::LeftTrigger, 0, 255)?;
            self.add_axis(PadAxis::RightTrigger, 0, 255)?;
        }

        if !self.profile.dpad_only {
            if self.profile.dpad_as_button {
                self.add_button(PadButton::DpadUp)?;
                self.add_button(PadButton::DpadDown)?;
                self.add_button(PadButton::DpadLeft)?;
                self.add_button(PadButton::DpadRight)?;
            } else {
                self.add_axis(PadAxis::DpadX, -1, 1)?;
                self.add_axis(PadAxis::DpadY, -1, 1)?;
            }
        }

        self.add_button(PadButton::Start)?;
        self.add_button(PadButton::Back)?;

        // Only the modern pads have a guide button.
        if matches!(
            self.model,
            GamepadModel::Modern | GamepadModel::ModernWireless
        ) {
            self.add_button(PadButton::Guide)?;
        }

        self.add_button(PadButton::A)?;
        self.add_button(PadButton::B)?;
        self.add_button(PadButton::X)?;
        self.add_button(PadButton::Y)?;

        match self.model {
            GamepadModel::Classic => {
                self.add_button(PadButton::White)?;
                self.add_button(PadButton::Black)?;
            }
            _ => {
                self.add_button(PadButton::LeftShoulder)?;
                self.add_button(PadButton::RightShoulder)?;
            }
        }

        self.add_button(PadButton::ThumbLeft)?;
        self.add_button(PadButton::ThumbRight)?;
        Ok(())
    }

    fn setup_guitar(&mut self) -> Result<(), DeviceError> {
        // Whammy and tilt report on the left-stick axes.
        self.add_axis(PadAxis::LeftX, -32768, 32767)?;
        self.add_axis(PadAxis::LeftY, -32768, 32767)?;

        self.add_button(PadButton::DpadUp)?;
        self.add_button(PadButton::DpadDown)?;
        self.add_button(PadButton::DpadLeft)?;
        self.add_button(PadButton::DpadRight)?;

        self.add_button(PadButton::Start)?;
        self.add_button(PadButton::Back)?;
        self.add_button(PadButton::Guide)?;

        self.add_button(PadButton::Green)?;
        self.add_button(PadButton::Red)?;
        self.add_button(PadButton::Yellow)?;
        self.add_button(PadButton::Blue)?;
        self.add_button(PadButton::Orange)?;
        Ok(())
    }

    fn add_axis(&mut self, axis: PadAxis, min: i32, max: i32) -> Result<(), DeviceError> {
        match self.profile.axis_map[axis] {
            AxisTarget::Abs { code } => self
                .devices
                .resolve_mut(DeviceCategory::Joystick)
                .add_abs(code, min, max),
            AxisTarget::Rel {
                code,
                step,
                repeat_ms,
            } => {
                self.devices
                    .resolve_mut(DeviceCategory::Mouse)
                    .add_rel(code)?;
                self.rel_axis_timers
                    .push(RelTimer::new(axis, code, step, repeat_ms));
                Ok(())
            }
            AxisTarget::Key {
                primary, secondary, ..
            } => {
                self.add_key(primary)?;
                if secondary != primary {
                    self.add_key(secondary)?;
                }
                Ok(())
            }
            AxisTarget::None => Ok(()),
        }
    }

    fn add_button(&mut self, button: PadButton) -> Result<(), DeviceError> {
        match self.profile.button_map[button] {
            ButtonTarget::Key { code } => self.add_key(code),
            ButtonTarget::Rel {
                code,
                step,
                repeat_ms,
            } => {
                self.devices
                    .resolve_mut(DeviceCategory::Mouse)
                    .add_rel(code)?;
                self.rel_button_timers
                    .push(RelTimer::new(button, code, step, repeat_ms));
                Ok(())
            }
            ButtonTarget::None => Ok(()),
        }
    }

    fn add_key(&mut self, code: u16) -> Result<(), DeviceError> {
        self.devices.resolve_key_mut(code).add_key(code)
    }
}

impl Translator<Running> {
    /// Applies one full pad snapshot, emitting events only for the controls
    /// whose value actually changed.
    pub fn apply(&mut self, msg: &GamepadMessage) -> Result<(), DeviceError> {
        match msg {
            GamepadMessage::Classic(report) => self.apply_classic(report),
            GamepadMessage::Modern(report) | GamepadMessage::ModernWireless(report) => {
                self.apply_modern(report)
            }
            GamepadMessage::Guitar(report) => self.apply_guitar(report),
        }
    }

    fn apply_modern(&mut self, msg: &ModernReport) -> Result<(), DeviceError> {
        self.send_button(PadButton::ThumbLeft, msg.thumb_left)?;
        self.send_button(PadButton::ThumbRight, msg.thumb_right)?;

        self.send_button(PadButton::LeftShoulder, msg.lb)?;
        self.send_button(PadButton::RightShoulder, msg.rb)?;

        self.send_button(PadButton::Start, msg.start)?;
        self.send_button(PadButton::Guide, msg.guide)?;
        self.send_button(PadButton::Back, msg.back)?;

        self.send_button(PadButton::A, msg.a)?;
        self.send_button(PadButton::B, msg.b)?;
        self.send_button(PadButton::X, msg.x)?;
        self.send_button(PadButton::Y, msg.y)?;

        // The hardware reports stick Y inverted relative to the axis
        // convention downstream consumers expect.
        self.send_axis(PadAxis::LeftX, msg.x1 as i32)?;
        self.send_axis(PadAxis::LeftY, -(msg.y1 as i32))?;

        self.send_axis(PadAxis::RightX, msg.x2 as i32)?;
        self.send_axis(PadAxis::RightY, -(msg.y2 as i32))?;

        self.send_triggers(msg.lt, msg.rt)?;

        if self.profile.dpad_as_button && !self.profile.dpad_only {
            self.send_button(PadButton::DpadUp, msg.dpad_up)?;
            self.send_button(PadButton::DpadDown, msg.dpad_down)?;
            self.send_button(PadButton::DpadLeft, msg.dpad_left)?;
            self.send_button(PadButton::DpadRight, msg.dpad_right)?;
        } else {
            // With dpad_only the dpad takes over the left-stick axes and
            // reports the same -1/0/1 steps there.
            let (dpad_x, dpad_y) = if self.profile.dpad_only {
                (PadAxis::LeftX, PadAxis::LeftY)
            } else {
                (PadAxis::DpadX, PadAxis::DpadY)
            };

            self.send_dpad_axes(dpad_x, dpad_y, msg.dpad_up, msg.dpad_down, msg.dpad_left, msg.dpad_right)?;
        }

        Ok(())
    }

    fn apply_classic(&mut self, msg: &ClassicReport) -> Result<(), DeviceError> {
        self.send_button(PadButton::ThumbLeft, msg.thumb_left)?;
        self.send_button(PadButton::ThumbRight, msg.thumb_right)?;

        self.send_button(PadButton::White, msg.white)?;
        self.send_button(PadButton::Black, msg.black)?;

        self.send_button(PadButton::Start, msg.start)?;
        self.send_button(PadButton::Back, msg.back)?;

        self.send_button(PadButton::A, msg.a)?;
        self.send_button(PadButton::B, msg.b)?;
        self.send_button(PadButton::X, msg.x)?;
        self.send_button(PadButton::Y, msg.y)?;

        self.send_axis(PadAxis::LeftX, msg.x1 as i32)?;
        self.send_axis(PadAxis::LeftY, msg.y1 as i32)?;

        self.send_axis(PadAxis::RightX, msg.x2 as i32)?;
        self.send_axis(PadAxis::RightY, msg.y2 as i32)?;

        self.send_triggers(msg.lt, msg.rt)?;

        if self.profile.dpad_as_button {
            self.send_button(PadButton::DpadUp, msg.dpad_up)?;
            self.send_button(PadButton::DpadDown, msg.dpad_down)?;
            self.send_button(PadButton::DpadLeft, msg.dpad_left)?;
            self.send_button(PadButton::DpadRight, msg.dpad_right)?;
        } else {
            self.send_dpad_axes(
                PadAxis::DpadX,
                PadAxis::DpadY,
                msg.dpad_up,
                msg.dpad_down,
                msg.dpad_left,
                msg.dpad_right,
            )?;
        }

        Ok(())
    }

    fn apply_guitar(&mut self, msg: &GuitarReport) -> Result<(), DeviceError> {
        self.send_button(PadButton::DpadUp, msg.dpad_up)?;
        self.send_button(PadButton::DpadDown, msg.dpad_down)?;
        self.send_button(PadButton::DpadLeft, msg.dpad_left)?;
        self.send_button(PadButton::DpadRight, msg.dpad_right)?;

        self.send_button(PadButton::Start, msg.start)?;
        self.send_button(PadButton::Guide, msg.guide)?;
        self.send_button(PadButton::Back, msg.back)?;

        self.send_button(PadButton::Green, msg.green)?;
        self.send_button(PadButton::Red, msg.red)?;
        self.send_button(PadButton::Yellow, msg.yellow)?;
        self.send_button(PadButton::Blue, msg.blue)?;
        self.send_button(PadButton::Orange, msg.orange)?;

        self.send_axis(PadAxis::LeftX, msg.whammy as i32)?;
        self.send_axis(PadAxis::LeftY, msg.tilt as i32)?;

        Ok(())
    }

    fn send_triggers(&mut self, lt: u8, rt: u8) -> Result<(), DeviceError> {
        if self.profile.trigger_as_zaxis {
            self.send_axis(PadAxis::Trigger, rt as i32 - lt as i32)
        } else if self.profile.trigger_as_button {
            self.send_button(PadButton::LeftTrigger, lt != 0)?;
            self.send_button(PadButton::RightTrigger, rt != 0)
        } else {
            self.send_axis(PadAxis::LeftTrigger, lt as i32)?;
            self.send_axis(PadAxis::RightTrigger, rt as i32)
        }
    }

    fn send_dpad_axes(
        &mut self,
        dpad_x: PadAxis,
        dpad_y: PadAxis,
        up: bool,
        down: bool,
        left: bool,
        right: bool,
    ) -> Result<(), DeviceError> {
        let y = if up { -1 } else if down { 1 } else { 0 };
        let x = if left { -1 } else if right { 1 } else { 0 };
        self.send_axis(dpad_y, y)?;
        self.send_axis(dpad_x, x)
    }

    /// Updates one logical button, emitting only on a state flank.
    pub fn send_button(&mut self, button: PadButton, pressed: bool) -> Result<(), DeviceError> {
        if self.button_state[button] == pressed {
            return Ok(());
        }
        self.button_state[button] = pressed;

        match self.profile.button_map[button] {
            ButtonTarget::Key { code } => self.send_key(code, pressed),
            // Relative targets emit from the repeat timer only.
            ButtonTarget::Rel { .. } | ButtonTarget::None => Ok(()),
        }
    }

    /// Updates one logical axis, emitting only when the value changed.
    pub fn send_axis(&mut self, axis: PadAxis, value: i32) -> Result<(), DeviceError> {
        let old = self.axis_state[axis];
        if old == value {
            return Ok(());
        }
        self.axis_state[axis] = value;

        match self.profile.axis_map[axis] {
            AxisTarget::Abs { code } => self
                .devices
                .resolve_mut(DeviceCategory::Joystick)
                .send_abs(code, value),
            // Emitted by tick(); the first flank after a direction change
            // waits for the next timer firing.
            AxisTarget::Rel { .. } => Ok(()),
            AxisTarget::Key {
                primary,
                secondary,
                threshold,
            } => {
                if old.abs() < threshold && value.abs() >= threshold {
                    // entering the active zone
                    if value < 0 {
                        self.send_key(secondary, false)?;
                        self.send_key(primary, true)
                    } else {
                        self.send_key(primary, false)?;
                        self.send_key(secondary, true)
                    }
                } else if old.abs() >= threshold && value.abs() < threshold {
                    // back into the center zone
                    self.send_key(primary, false)?;
                    self.send_key(secondary, false)
                } else {
                    Ok(())
                }
            }
            AxisTarget::None => Ok(()),
        }
    }

    /// Advances the repeat timers by `delta_ms` and fires every timer whose
    /// deadline passed, at most once per call. The emitted delta is the
    /// mapping's step scaled by the sign of the driving control, so a
    /// centered axis still fires zero-deltas on schedule.
    pub fn tick(&mut self, delta_ms: u64) -> Result<(), DeviceError> {
        let Translator {
            rel_axis_timers,
            rel_button_timers,
            devices,
            axis_state,
            button_state,
            ..
        } = self;

        for timer in rel_axis_timers.iter_mut() {
            timer.elapsed_ms += delta_ms;
            if timer.elapsed_ms >= timer.next_fire_ms {
                let delta = timer.step * axis_state[timer.control].signum();
                devices
                    .resolve_mut(DeviceCategory::Mouse)
                    .send_rel(timer.code, delta)?;
                timer.next_fire_ms += timer.repeat_ms;
            }
        }

        for timer in rel_button_timers.iter_mut() {
            timer.elapsed_ms += delta_ms;
            if timer.elapsed_ms >= timer.next_fire_ms {
                let delta = timer.step * button_state[timer.control] as i32;
                devices
                    .resolve_mut(DeviceCategory::Mouse)
                    .send_rel(timer.code, delta)?;
                timer.next_fire_ms += timer.repeat_ms;
            }
        }

        Ok(())
    }

    fn send_key(&mut self, code: u16, pressed: bool) -> Result<(), DeviceError> {
        self.devices.resolve_key_mut(code).send_key(code, pressed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::recording::{DeviceId, Recorded, RecordingDevice};
    use crate::device::OutputDevice;
    use crate::mapping::symbols;

    struct Harness {
        translator: Translator<Running>,
        joystick: RecordingDevice,
        mouse: RecordingDevice,
        keyboard: RecordingDevice,
    }

    fn harness(model: GamepadModel, profile: MappingProfile) -> Harness {
        let joystick = RecordingDevice::new(DeviceId::Joystick);
        let mouse = RecordingDevice::new(DeviceId::Mouse);
        let keyboard = RecordingDevice::new(DeviceId::Keyboard);
        let (j, m, k) = (joystick.clone(), mouse.clone(), keyboard.clone());

        let devices = DeviceSet::provision_with(&profile, move |category| {
            Ok(Box::new(match category {
                DeviceCategory::Joystick => j.clone(),
                DeviceCategory::Mouse => m.clone(),
                DeviceCategory::Keyboard => k.clone(),
            }) as Box<dyn OutputDevice>)
        })
        .unwrap();

        let translator = Translator::create(model, profile, devices)
            .unwrap()
            .provision()
            .unwrap();

        Harness {
            translator,
            joystick,
            mouse,
            keyboard,
        }
    }

    fn key_events(device: &RecordingDevice) -> Vec<(u16, bool)> {
        device
            .emitted()
            .into_iter()
            .filter_map(|event| match event {
                Recorded::Key { code, pressed, .. } => Some((code, pressed)),
                _ => None,
            })
            .collect()
    }

    fn rel_events(device: &RecordingDevice) -> Vec<(u16, i32)> {
        device
            .emitted()
            .into_iter()
            .filter_map(|event| match event {
                Recorded::Rel { code, delta, .. } => Some((code, delta)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn repeated_snapshot_emits_nothing_new() {
        let mut h = harness(GamepadModel::Modern, MappingProfile::default());
        let msg = GamepadMessage::Modern(ModernReport {
            a: true,
            ..ModernReport::default()
        });

        h.translator.apply(&msg).unwrap();
        assert_eq!(key_events(&h.joystick), vec![(symbols::BTN_A, true)]);

        h.translator.apply(&msg).unwrap();
        assert_eq!(key_events(&h.joystick), vec![(symbols::BTN_A, true)]);
    }

    #[test]
    fn release_emits_the_falling_flank() {
        let mut h = harness(GamepadModel::Modern, MappingProfile::default());
        let pressed = GamepadMessage::Modern(ModernReport {
            b: true,
            ..ModernReport::default()
        });
        h.translator.apply(&pressed).unwrap();
        h.translator
            .apply(&GamepadMessage::Modern(ModernReport::default()))
            .unwrap();
        assert_eq!(
            key_events(&h.joystick),
            vec![(symbols::BTN_B, true), (symbols::BTN_B, false)]
        );
    }

    #[test]
    fn stick_y_is_inverted_for_modern_pads() {
        let mut h = harness(GamepadModel::Modern, MappingProfile::default());
        h.translator
            .apply(&GamepadMessage::Modern(ModernReport {
                y1: 1000,
                ..ModernReport::default()
            }))
            .unwrap();
        assert!(h.joystick.emitted().contains(&Recorded::Abs {
            device: DeviceId::Joystick,
            code: symbols::ABS_Y,
            value: -1000,
        }));
    }

    #[test]
    fn classic_stick_y_is_not_inverted() {
        let mut h = harness(GamepadModel::Classic, MappingProfile::default());
        h.translator
            .apply(&GamepadMessage::Classic(ClassicReport {
                y1: 1000,
                ..ClassicReport::default()
            }))
            .unwrap();
        assert!(h.joystick.emitted().contains(&Recorded::Abs {
            device: DeviceId::Joystick,
            code: symbols::ABS_Y,
            value: 1000,
        }));
    }

    #[test]
    fn threshold_machine_walks_all_edges() {
        let mut profile = MappingProfile::default();
        profile.axis_map[PadAxis::LeftX] = AxisTarget::Key {
            primary: symbols::KEY_LEFT,
            secondary: symbols::KEY_RIGHT,
            threshold: 8000,
        };
        let mut h = harness(GamepadModel::Modern, profile);
        let t = &mut h.translator;

        t.send_axis(PadAxis::LeftX, 7999).unwrap();
        assert!(key_events(&h.keyboard).is_empty());

        t.send_axis(PadAxis::LeftX, 8000).unwrap();
        assert_eq!(
            key_events(&h.keyboard),
            vec![(symbols::KEY_LEFT, false), (symbols::KEY_RIGHT, true)]
        );

        // deeper into the zone: no new flank
        t.send_axis(PadAxis::LeftX, 9000).unwrap();
        assert_eq!(key_events(&h.keyboard).len(), 2);

        t.send_axis(PadAxis::LeftX, 10).unwrap();
        assert_eq!(
            key_events(&h.keyboard)[2..],
            [(symbols::KEY_LEFT, false), (symbols::KEY_RIGHT, false)]
        );

        t.send_axis(PadAxis::LeftX, -8200).unwrap();
        assert_eq!(
            key_events(&h.keyboard)[4..],
            [(symbols::KEY_RIGHT, false), (symbols::KEY_LEFT, true)]
        );

        t.send_axis(PadAxis::LeftX, 0).unwrap();
        assert_eq!(
            key_events(&h.keyboard)[6..],
            [(symbols::KEY_LEFT, false), (symbols::KEY_RIGHT, false)]
        );
    }

    #[test]
    fn rel_axis_fires_step_times_sign_per_interval() {
        let mut profile = MappingProfile::default();
        profile.axis_map[PadAxis::RightX] = AxisTarget::Rel {
            code: symbols::REL_X,
            step: 5,
            repeat_ms: 10,
        };
        let mut h = harness(GamepadModel::Modern, profile);
        let t = &mut h.translator;

        t.send_axis(PadAxis::RightX, 12000).unwrap();
        // Deflection alone emits nothing until the timer fires.
        assert!(rel_events(&h.mouse).is_empty());

        for _ in 0..3 {
            t.tick(10).unwrap();
        }
        assert_eq!(
            rel_events(&h.mouse),
            vec![(symbols::REL_X, 5), (symbols::REL_X, 5), (symbols::REL_X, 5)]
        );

        t.send_axis(PadAxis::RightX, -300).unwrap();
        t.tick(10).unwrap();
        assert_eq!(rel_events(&h.mouse)[3], (symbols::REL_X, -5));

        // Centered axis keeps firing, with zero deltas.
        t.send_axis(PadAxis::RightX, 0).unwrap();
        t.tick(10).unwrap();
        assert_eq!(rel_events(&h.mouse)[4], (symbols::REL_X, 0));
    }

    #[test]
    fn rel_button_fires_only_while_held() {
        let mut profile = MappingProfile::default();
        profile.button_map[PadButton::A] = ButtonTarget::Rel {
            code: symbols::REL_WHEEL,
            step: 3,
            repeat_ms: 100,
        };
        let mut h = harness(GamepadModel::Modern, profile);
        let t = &mut h.translator;

        t.send_button(PadButton::A, true).unwrap();
        t.tick(100).unwrap();
        t.send_button(PadButton::A, false).unwrap();
        t.tick(100).unwrap();
        assert_eq!(
            rel_events(&h.mouse),
            vec![(symbols::REL_WHEEL, 3), (symbols::REL_WHEEL, 0)]
        );
    }

    #[test]
    fn slow_ticks_fire_at_most_once_per_call() {
        let mut profile = MappingProfile::default();
        profile.axis_map[PadAxis::RightX] = AxisTarget::Rel {
            code: symbols::REL_X,
            step: 5,
            repeat_ms: 10,
        };
        let mut h = harness(GamepadModel::Modern, profile);
        h.translator.send_axis(PadAxis::RightX, 32000).unwrap();

        // 50ms in one call still produces a single event; the backlog is
        // worked off over the following calls.
        h.translator.tick(50).unwrap();
        assert_eq!(rel_events(&h.mouse).len(), 1);
        h.translator.tick(0).unwrap();
        assert_eq!(rel_events(&h.mouse).len(), 2);
    }

    #[test]
    fn rel_mapping_without_mouse_device_uses_joystick() {
        let mut profile = MappingProfile::default();
        profile.axis_map[PadAxis::RightX] = AxisTarget::Rel {
            code: symbols::REL_X,
            step: 5,
            repeat_ms: 10,
        };
        profile.extra_devices = false;
        let mut h = harness(GamepadModel::Modern, profile);

        h.translator.send_axis(PadAxis::RightX, 5000).unwrap();
        h.translator.tick(10).unwrap();
        assert!(h.mouse.events().is_empty());
        assert_eq!(rel_events(&h.joystick), vec![(symbols::REL_X, 5)]);
    }

    #[test]
    fn dpad_only_reroutes_onto_the_left_stick() {
        let mut profile = MappingProfile::default();
        profile.dpad_only = true;
        let mut h = harness(GamepadModel::Modern, profile);

        h.translator
            .apply(&GamepadMessage::Modern(ModernReport {
                dpad_up: true,
                ..ModernReport::default()
            }))
            .unwrap();
        assert!(h.joystick.emitted().contains(&Recorded::Abs {
            device: DeviceId::Joystick,
            code: symbols::ABS_Y,
            value: -1,
        }));
        // The right stick is not registered at all in dpad_only mode.
        assert!(!h.joystick.events().iter().any(|event| matches!(
            event,
            Recorded::AbsCap { code, .. } if *code == symbols::ABS_RX
        )));
    }

    #[test]
    fn trigger_as_zaxis_collapses_both_triggers() {
        let mut profile = MappingProfile::default();
        profile.trigger_as_zaxis = true;
        let mut h = harness(GamepadModel::Modern, profile);

        h.translator
            .apply(&GamepadMessage::Modern(ModernReport {
                lt: 40,
                rt: 100,
                ..ModernReport::default()
            }))
            .unwrap();
        assert!(h.joystick.emitted().contains(&Recorded::Abs {
            device: DeviceId::Joystick,
            code: symbols::ABS_Z,
            value: 60,
        }));
        // No per-trigger axes registered.
        assert!(!h.joystick.events().iter().any(|event| matches!(
            event,
            Recorded::AbsCap { code, .. } if *code == symbols::ABS_GAS
        )));
    }

    #[test]
    fn guide_is_registered_for_modern_pads_only() {
        let modern = harness(GamepadModel::Modern, MappingProfile::default());
        assert!(modern.joystick.events().iter().any(|event| matches!(
            event,
            Recorded::KeyCap { code, .. } if *code == symbols::BTN_MODE
        )));

        let classic = harness(GamepadModel::Classic, MappingProfile::default());
        assert!(!classic.joystick.events().iter().any(|event| matches!(
            event,
            Recorded::KeyCap { code, .. } if *code == symbols::BTN_MODE
        )));
    }

    #[test]
    fn guitar_maps_frets_and_whammy() {
        let mut h = harness(GamepadModel::Guitar, MappingProfile::default());
        h.translator
            .apply(&GamepadMessage::Guitar(GuitarReport {
                green: true,
                whammy: 4200,
                ..GuitarReport::default()
            }))
            .unwrap();
        assert_eq!(key_events(&h.joystick), vec![(symbols::BTN_0, true)]);
        assert!(h.joystick.emitted().contains(&Recorded::Abs {
            device: DeviceId::Joystick,
            code: symbols::ABS_X,
            value: 4200,
        }));
    }

    #[test]
    fn conflicting_flags_fail_at_creation() {
        let mut profile = MappingProfile::default();
        profile.trigger_as_button = true;
        profile.trigger_as_zaxis = true;
        let devices = DeviceSet::provision_with(&MappingProfile::default(), |_| {
            Ok(Box::new(RecordingDevice::new(DeviceId::Joystick)) as Box<dyn OutputDevice>)
        })
        .unwrap();
        assert!(matches!(
            Translator::create(GamepadModel::Modern, profile, devices),
            Err(MappingError::ConflictingFlags)
        ));
    }
}
