//! Gilrs-backed event collection.
//!
//! The collector polls gilrs, folds every event into a running pad
//! snapshot and forwards the full snapshot to the engine after each
//! change. It runs as its own tokio task via [`CollectorHandle::spawn`].

use gilrs::{Axis, Button, Event, EventType, Gamepad, GamepadId, Gilrs};
use statum::{machine, state};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::controller::message::{
    ClassicReport, GamepadMessage, GamepadModel, GuitarReport, ModernReport,
};

#[derive(Clone, Debug)]
pub struct CollectorSettings {
    /// Which snapshot variant to report to the engine.
    pub model: GamepadModel,
    /// Analog stick deadzone as a fraction (0.0-1.0).
    pub joystick_deadzone: f32,
}

impl Default for CollectorSettings {
    fn default() -> Self {
        Self {
            model: GamepadModel::Modern,
            joystick_deadzone: 0.05,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CollectorError {
    #[error("Failed to initialize collector: {0}")]
    InitializationError(String),

    #[error("Failed to send snapshot: {0}")]
    SnapshotSendError(String),
}

#[state]
#[derive(Debug, Clone)]
pub enum CollectionState {
    Initializing,
    Collecting,
}

#[machine]
pub struct SnapshotCollector<S: CollectionState> {
    gilrs: Gilrs,
    active_gamepad: Option<GamepadId>,
    settings: CollectorSettings,
    snapshot_sender: mpsc::Sender<GamepadMessage>,
    // Running state of the physical pad, folded from gilrs events.
    snapshot: ModernReport,
}

impl SnapshotCollector<Initializing> {
    pub fn create(
        settings: CollectorSettings,
        snapshot_sender: mpsc::Sender<GamepadMessage>,
    ) -> Result<Self, CollectorError> {
        debug!("Creating snapshot collector with settings: {:?}", settings);

        info!("Initializing gilrs controller interface");
        let gilrs = Gilrs::new().map_err(|e| {
            error!("Failed to initialize gilrs: {}", e);
            CollectorError::InitializationError(e.to_string())
        })?;

        Ok(Self::new(
            gilrs,
            None,
            settings,
            snapshot_sender,
            ModernReport::default(),
        ))
    }

    /// Picks a pad and transitions to the collecting state.
    pub fn initialize(mut self) -> Result<SnapshotCollector<Collecting>, CollectorError> {
        let gamepads: Vec<(GamepadId, Gamepad<'_>)> = self.gilrs.gamepads().collect();

        if gamepads.is_empty() {
            warn!("No gamepad connected, waiting for one to appear");
        } else {
            info!("Found {} gamepads:", gamepads.len());
            for (idx, (id, gamepad)) in gamepads.iter().enumerate() {
                info!("  [{}] ID: {}, Name: {}", idx, id, gamepad.name());
            }
            let (id, gamepad) = &gamepads[0];
            self.active_gamepad = Some(*id);
            info!("Selected gamepad: {} ({})", gamepad.name(), id);
        }

        Ok(self.transition())
    }
}

impl SnapshotCollector<Collecting> {
    /// Processes at most one pending gilrs event.
    pub fn collect_next_event(&mut self) -> Result<(), CollectorError> {
        let Some(Event { id, event, .. }) = self.gilrs.next_event() else {
            return Ok(());
        };

        match event {
            EventType::Connected => {
                if self.active_gamepad.is_none() {
                    info!("Gamepad connected, selecting {:?}", id);
                    self.active_gamepad = Some(id);
                }
                return Ok(());
            }
            EventType::Disconnected => {
                if self.active_gamepad == Some(id) {
                    warn!("Active gamepad {:?} disconnected", id);
                    self.active_gamepad = None;
                    self.snapshot = ModernReport::default();
                    return self.send_snapshot();
                }
                return Ok(());
            }
            _ => {}
        }

        if self.active_gamepad != Some(id) {
            debug!("Skipping event from non-active gamepad: {:?}", id);
            return Ok(());
        }

        if self.fold_event(event) {
            self.send_snapshot()?;
        }
        Ok(())
    }

    /// Folds one gilrs event into the snapshot, returning whether anything
    /// changed.
    fn fold_event(&mut self, event: EventType) -> bool {
        let deadzone = self.settings.joystick_deadzone;
        let old = self.snapshot;
        let snap = &mut self.snapshot;

        match event {
            EventType::ButtonPressed(button, _) | EventType::ButtonReleased(button, _) => {
                let pressed = matches!(event, EventType::ButtonPressed(..));
                match button {
                    Button::South => snap.a = pressed,
                    Button::East => snap.b = pressed,
                    Button::West => snap.x = pressed,
                    Button::North => snap.y = pressed,
                    Button::Start => snap.start = pressed,
                    Button::Select => snap.back = pressed,
                    Button::Mode => snap.guide = pressed,
                    Button::LeftTrigger => snap.lb = pressed,
                    Button::RightTrigger => snap.rb = pressed,
                    Button::LeftThumb => snap.thumb_left = pressed,
                    Button::RightThumb => snap.thumb_right = pressed,
                    Button::DPadUp => snap.dpad_up = pressed,
                    Button::DPadDown => snap.dpad_down = pressed,
                    Button::DPadLeft => snap.dpad_left = pressed,
                    Button::DPadRight => snap.dpad_right = pressed,
                    // Digital edge of the analog triggers; the analog value
                    // arrives via ButtonChanged and wins.
                    Button::LeftTrigger2 | Button::RightTrigger2 => {}
                    _ => return false,
                }
            }
            EventType::ButtonChanged(Button::LeftTrigger2, value, _) => {
                snap.lt = scale_trigger(value);
            }
            EventType::ButtonChanged(Button::RightTrigger2, value, _) => {
                snap.rt = scale_trigger(value);
            }
            EventType::AxisChanged(axis, value, _) => {
                let value = scale_stick(apply_deadzone(value, deadzone));
                match axis {
                    Axis::LeftStickX => snap.x1 = value,
                    Axis::LeftStickY => snap.y1 = value,
                    Axis::RightStickX => snap.x2 = value,
                    Axis::RightStickY => snap.y2 = value,
                    _ => return false,
                }
            }
            _ => return false,
        }

        *snap != old
    }

    fn send_snapshot(&mut self) -> Result<(), CollectorError> {
        let message = message_for_model(self.settings.model, &self.snapshot);
        match self.snapshot_sender.try_send(message) {
            Ok(()) => Ok(()),
            Err(mpsc::error::TrySendError::Full(_)) => {
                // Snapshots are self-contained, dropping one only costs
                // latency until the next event.
                warn!("Snapshot channel full, dropping snapshot");
                Ok(())
            }
            Err(e) => {
                error!("Failed to send snapshot: {}", e);
                Err(CollectorError::SnapshotSendError(e.to_string()))
            }
        }
    }

    pub fn run_collection_loop(&mut self) -> Result<(), CollectorError> {
        info!("Starting snapshot collector loop");
        loop {
            self.collect_next_event()?;
            // Small sleep to prevent 100% CPU usage
            std::thread::sleep(std::time::Duration::from_micros(100));
        }
    }
}

/// Handle owning the collector's background task.
pub struct CollectorHandle {
    snapshot_sender: mpsc::Sender<GamepadMessage>,
}

impl CollectorHandle {
    pub fn spawn(
        settings: CollectorSettings,
        snapshot_sender: mpsc::Sender<GamepadMessage>,
    ) -> Result<Self, CollectorError> {
        info!("Spawning snapshot collector with settings: {:?}", settings);
        let sender_clone = snapshot_sender.clone();

        let collector = SnapshotCollector::create(settings, snapshot_sender)?;

        tokio::task::spawn_blocking(move || match collector.initialize() {
            Ok(mut collecting) => {
                if let Err(e) = collecting.run_collection_loop() {
                    error!("Collector task terminated with error: {}", e);
                }
            }
            Err(e) => {
                error!("Failed to initialize snapshot collector: {}", e);
            }
        });

        info!("Snapshot collector started");
        Ok(Self {
            snapshot_sender: sender_clone,
        })
    }

    pub fn snapshot_sender(&self) -> mpsc::Sender<GamepadMessage> {
        self.snapshot_sender.clone()
    }
}

fn apply_deadzone(value: f32, deadzone: f32) -> f32 {
    if value.abs() < deadzone {
        0.0
    } else {
        value
    }
}

fn scale_stick(value: f32) -> i16 {
    (value.clamp(-1.0, 1.0) * 32767.0) as i16
}

fn scale_trigger(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0) as u8
}

/// Reshape the folded snapshot into the report variant the configured
/// model expects.
fn message_for_model(model: GamepadModel, snap: &ModernReport) -> GamepadMessage {
    match model {
        GamepadModel::Modern => GamepadMessage::Modern(*snap),
        GamepadModel::ModernWireless => GamepadMessage::ModernWireless(*snap),
        GamepadModel::Classic => GamepadMessage::Classic(ClassicReport {
            dpad_up: snap.dpad_up,
            dpad_down: snap.dpad_down,
            dpad_left: snap.dpad_left,
            dpad_right: snap.dpad_right,
            start: snap.start,
            back: snap.back,
            a: snap.a,
            b: snap.b,
            x: snap.x,
            y: snap.y,
            // The classic layout has White/Black where the shoulders sit.
            white: snap.lb,
            black: snap.rb,
            thumb_left: snap.thumb_left,
            thumb_right: snap.thumb_right,
            lt: snap.lt,
            rt: snap.rt,
            x1: snap.x1,
            y1: snap.y1,
            x2: snap.x2,
            y2: snap.y2,
        }),
        GamepadModel::Guitar => GamepadMessage::Guitar(GuitarReport {
            dpad_up: snap.dpad_up,
            dpad_down: snap.dpad_down,
            dpad_left: snap.dpad_left,
            dpad_right: snap.dpad_right,
            start: snap.start,
            back: snap.back,
            guide: snap.guide,
            // Guitar controllers report frets as face/shoulder buttons.
            green: snap.a,
            red: snap.b,
            yellow: snap.y,
            blue: snap.x,
            orange: snap.lb,
            whammy: snap.x1,
            tilt: snap.y1,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deadzone_zeroes_small_values() {
        assert_eq!(apply_deadzone(0.04, 0.05), 0.0);
        assert_eq!(apply_deadzone(-0.04, 0.05), 0.0);
        assert_eq!(apply_deadzone(0.5, 0.05), 0.5);
    }

    #[test]
    fn stick_and_trigger_scaling_saturate() {
        assert_eq!(scale_stick(1.0), 32767);
        assert_eq!(scale_stick(-1.5), -32767);
        assert_eq!(scale_stick(0.0), 0);
        assert_eq!(scale_trigger(1.0), 255);
        assert_eq!(scale_trigger(2.0), 255);
        assert_eq!(scale_trigger(0.0), 0);
    }

    #[test]
    fn classic_message_renames_the_shoulders() {
        let snap = ModernReport {
            lb: true,
            rb: true,
            guide: true,
            ..ModernReport::default()
        };
        match message_for_model(GamepadModel::Classic, &snap) {
            GamepadMessage::Classic(report) => {
                assert!(report.white);
                assert!(report.black);
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[test]
    fn guitar_message_maps_frets_and_whammy() {
        let snap = ModernReport {
            a: true,
            lb: true,
            x1: 1234,
            ..ModernReport::default()
        };
        match message_for_model(GamepadModel::Guitar, &snap) {
            GamepadMessage::Guitar(report) => {
                assert!(report.green);
                assert!(report.orange);
                assert_eq!(report.whammy, 1234);
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }
}
