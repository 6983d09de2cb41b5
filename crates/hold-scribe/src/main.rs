//! Hold-Scribe: press-and-hold voice notes with replay and transcription.
//!
//! Hold CTRL+SHIFT+Space to record, release to stop; the recording is
//! transcribed in the background and shown on the tray surface. A tray menu
//! entry replays the last recording.

mod app;
mod app_command;
mod config;
mod display_state;
mod error;
mod hold_handler;
mod press_state;
mod press_timer;
mod surface_command;
#[cfg(test)]
mod tests;
mod tray_manager;

pub(crate) use {
    app::App,
    app_command::{AppCommand, RecognitionOutcome},
    display_state::{DisplayModel, DisplaySnapshot, SurfaceStatus},
    error::{AppError, Result as AppResult},
    hold_handler::HoldHandler,
    press_state::PressState,
    press_timer::PressTimer,
    surface_command::SurfaceCommand,
    tray_manager::TrayManager,
};

use crate::config::Config;

use std::sync::Arc;

use global_hotkey::GlobalHotKeyManager;
use hold_scribe_core::{CpalRecorder, RecordingController, RodioPlayer, WhisperRecognizer};
use tao::{
    event::Event,
    event_loop::{ControlFlow, EventLoopBuilder},
};
use tokio::sync::{Mutex, mpsc, watch};
use tracing::error;

/// Application entry point.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("hold_scribe=debug")
        .init();

    let event_loop = EventLoopBuilder::<SurfaceCommand>::with_user_event().build();
    let surface_proxy = event_loop.create_proxy();

    // TrayManager lives on the main thread - TrayIcon is !Send on all platforms.
    let mut tray_manager = match TrayManager::new() {
        Ok(tm) => tm,
        Err(e) => {
            error!("Failed to create TrayManager: {:?}", e);
            std::process::exit(1);
        }
    };

    // Persists across event loop iterations — dropping it unregisters the hotkey.
    let mut hotkey_manager: Option<GlobalHotKeyManager> = None;

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::UserEvent(cmd) => {
                match cmd {
                    SurfaceCommand::Render(snapshot) => {
                        if let Err(e) = tray_manager.render(&snapshot) {
                            error!(error = ?e, "Failed to render tray surface");
                        }
                    }
                    SurfaceCommand::Shutdown => {
                        *control_flow = ControlFlow::ExitWithCode(0);
                    }
                }
                return;
            }
            Event::NewEvents(tao::event::StartCause::Init) => {
                let config = match Config::load() {
                    Ok(c) => c,
                    Err(e) => {
                        error!("Failed to load config: {:?}", e);
                        std::process::exit(1);
                    }
                };

                if let Err(e) = config.validate_model_path() {
                    error!("Model validation failed: {:?}", e);
                    std::process::exit(1);
                }

                let recording_path = match Config::recording_path() {
                    Ok(p) => p,
                    Err(e) => {
                        error!("Failed to resolve recording path: {:?}", e);
                        std::process::exit(1);
                    }
                };

                let mut controller = RecordingController::new(
                    CpalRecorder::with_device(config.recording.selected_device.clone()),
                    RodioPlayer::new(),
                    recording_path,
                    config.recording.format(),
                );

                // Capture setup failure is reported, not fatal: the surface
                // still comes up and recording errors on the next press.
                if let Err(e) = controller.configure() {
                    error!(error = ?e, "Capture setup failed; recording unavailable");
                }

                let controller = Arc::new(Mutex::new(controller));

                let recognizer = match WhisperRecognizer::new(
                    &config.recognition.model_path,
                    config.recognition.use_gpu,
                ) {
                    Ok(r) => Arc::new(Mutex::new(r)),
                    Err(e) => {
                        error!("Failed to load speech model: {:?}", e);
                        std::process::exit(1);
                    }
                };

                #[cfg(target_os = "macos")]
                unsafe {
                    use core_foundation::runloop::{CFRunLoopGetMain, CFRunLoopWakeUp};
                    CFRunLoopWakeUp(CFRunLoopGetMain());
                }

                let config = Arc::new(Mutex::new(config));
                let (display, display_rx) = DisplayModel::new();
                let (command_tx, command_rx) = mpsc::channel(32);
                let (outcome_tx, outcome_rx) = mpsc::channel(32);
                let (shutdown_tx, shutdown_rx) = watch::channel(false);

                // Register hotkey on the main thread — tao's event loop pumps
                // the Windows messages needed for WM_HOTKEY delivery.
                // hotkey_manager is stored in the closure's captured state so it
                // lives for the entire app lifetime.
                let (manager, hotkey_id) = match HoldHandler::register_hotkey() {
                    Ok(pair) => pair,
                    Err(e) => {
                        error!("Failed to register hotkey: {:?}", e);
                        std::process::exit(1);
                    }
                };
                hotkey_manager = Some(manager);

                let surface_proxy = surface_proxy.clone();
                let play_menu_id = tray_manager.play_item_id().clone();
                let exit_menu_id = tray_manager.exit_item_id().clone();

                // Spawn tokio runtime on separate thread.
                // TrayManager and hotkey_manager stay on the main thread.
                std::thread::spawn(move || {
                    let rt = match tokio::runtime::Runtime::new() {
                        Ok(rt) => rt,
                        Err(e) => {
                            error!("Failed to create tokio runtime: {:?}", e);
                            std::process::exit(1);
                        }
                    };

                    rt.block_on(async {
                        let hold_handler = HoldHandler::new(hotkey_id, command_tx.clone());

                        let app = App {
                            controller,
                            recognizer,
                            display,
                            display_rx,
                            surface_proxy,
                            config,
                            command_tx,
                            command_rx,
                            outcome_tx,
                            outcome_rx,
                            shutdown_tx,
                            play_menu_id,
                            exit_menu_id,
                        };

                        tokio::join!(
                            async {
                                if let Err(e) = hold_handler.run(shutdown_rx).await {
                                    error!(error = ?e, "Hold handler error");
                                }
                            },
                            async {
                                if let Err(e) = app.run().await {
                                    error!(error = ?e, "App error");
                                }
                            }
                        );
                    });
                });
            }
            _ => {}
        }

        // Keep hotkey_manager alive in the closure for the app's lifetime.
        let _ = &hotkey_manager;
    });
}
