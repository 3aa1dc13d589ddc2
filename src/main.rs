pub mod config;
pub mod controller;
pub mod device;
pub mod mapping;

use std::time::Duration;

use color_eyre::{eyre::eyre, Result};
use tokio::sync::mpsc;
use tracing::{debug, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use crate::config::DriverConfig;
use crate::controller::collector::{CollectorHandle, CollectorSettings};
use crate::device::router::{DeviceCategory, DeviceSet};
use crate::device::uinput::UinputDevice;
use crate::device::OutputDevice;
use crate::mapping::Translator;

/// Interval the relative-motion timers are driven at.
const TICK_MS: u64 = 10;

#[tokio::main]
async fn main() -> Result<()> {
    setup()?;

    let config = DriverConfig::load()?;
    let profile = config.to_profile();
    profile
        .validate()
        .map_err(|e| eyre!("Invalid mapping profile: {}", e))?;

    let device_name = config.device_name.clone();
    let devices = DeviceSet::provision_with(&profile, |category| {
        let name = match category {
            DeviceCategory::Joystick => device_name.clone(),
            DeviceCategory::Mouse => format!("{} - Mouse Emulation", device_name),
            DeviceCategory::Keyboard => format!("{} - Keyboard Emulation", device_name),
        };
        Ok(Box::new(UinputDevice::new(name)) as Box<dyn OutputDevice>)
    })
    .map_err(|e| eyre!("Failed to open virtual devices: {}", e))?;

    let translator = Translator::create(config.model, profile, devices)
        .map_err(|e| eyre!("Failed to create translator: {}", e))?;
    let mut translator = translator
        .provision()
        .map_err(|e| eyre!("Failed to provision virtual devices: {}", e))?;

    let (snapshot_tx, mut snapshot_rx) = mpsc::channel(1000);
    let collector_settings = CollectorSettings {
        model: config.model,
        joystick_deadzone: config.joystick_deadzone,
    };
    let _collector = CollectorHandle::spawn(collector_settings, snapshot_tx)
        .map_err(|e| eyre!("Failed to spawn collector: {}", e))?;

    info!("PadBridge running, press Ctrl-C to stop");

    let mut ticker = tokio::time::interval(Duration::from_millis(TICK_MS));
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            maybe_msg = snapshot_rx.recv() => {
                match maybe_msg {
                    Some(msg) => {
                        debug!("Applying snapshot: {:?}", msg);
                        if let Err(e) = translator.apply(&msg) {
                            warn!("Failed to apply snapshot: {}", e);
                        }
                    }
                    None => {
                        warn!("Snapshot channel closed, shutting down");
                        break;
                    }
                }
            }
            _ = ticker.tick() => {
                if let Err(e) = translator.tick(TICK_MS) {
                    warn!("Failed to drive repeat timers: {}", e);
                }
            }
            _ = &mut ctrl_c => {
                info!("Received Ctrl-C, shutting down");
                break;
            }
        }
    }

    Ok(())
}

fn setup() -> Result<()> {
    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "0")
    }
    color_eyre::install()?;
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }
    setup_logging_env();
    Ok(())
}

fn setup_logging_env() {
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .pretty()
        .init();
}
