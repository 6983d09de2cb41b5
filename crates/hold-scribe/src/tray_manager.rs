//! System tray rendering of the display state.
//!
//! Shows one of four icons (Idle, Recording, Transcribing, Error), carries
//! the current transcript or error in the tooltip, and exposes a context
//! menu with "Play Recording" and "Exit".

use crate::{AppError, AppResult, DisplaySnapshot, SurfaceStatus};

use std::panic::Location;

use error_location::ErrorLocation;
use tracing::{info, instrument};
use tray_icon::menu::{Menu, MenuId, MenuItem};
use tray_icon::{Icon, TrayIcon, TrayIconBuilder};

/// System tray icon manager.
pub struct TrayManager {
    tray_icon: TrayIcon,
    play_item_id: MenuId,
    exit_item_id: MenuId,
}

impl TrayManager {
    /// Create a new tray manager showing the initial display snapshot.
    #[track_caller]
    #[instrument]
    pub fn new() -> AppResult<Self> {
        let menu = Menu::new();

        let play_item = MenuItem::new("Play Recording", true, None);
        let exit_item = MenuItem::new("Exit", true, None);

        let play_id = play_item.id().clone();
        let exit_id = exit_item.id().clone();

        menu.append(&play_item).map_err(|e| AppError::Surface {
            reason: format!("Failed to add play menu: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        menu.append(&exit_item).map_err(|e| AppError::Surface {
            reason: format!("Failed to add exit menu: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let initial = DisplaySnapshot::default();
        let icon = Self::load_icon(initial.status)?;

        let tray_icon = TrayIconBuilder::new()
            .with_tooltip(Self::tooltip(&initial))
            .with_menu(Box::new(menu))
            .with_icon(icon)
            .build()
            .map_err(|e| AppError::Surface {
                reason: format!("Failed to create tray icon: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!("System tray icon initialized");

        Ok(Self {
            tray_icon,
            play_item_id: play_id,
            exit_item_id: exit_id,
        })
    }

    /// Re-render icon and tooltip from a display snapshot.
    #[track_caller]
    #[instrument(skip(self, snapshot))]
    pub fn render(&mut self, snapshot: &DisplaySnapshot) -> AppResult<()> {
        let icon = Self::load_icon(snapshot.status)?;

        self.tray_icon
            .set_icon(Some(icon))
            .map_err(|e| AppError::Surface {
                reason: format!("Failed to update icon: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        self.tray_icon
            .set_tooltip(Some(Self::tooltip(snapshot)))
            .map_err(|e| AppError::Surface {
                reason: format!("Failed to update tooltip: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(())
    }

    /// The tooltip doubles as the text surface: while idle it shows the
    /// most recent transcript (or the placeholder before the first cycle).
    fn tooltip(snapshot: &DisplaySnapshot) -> String {
        match snapshot.status {
            SurfaceStatus::Idle => snapshot.transcript.clone(),
            SurfaceStatus::Recording => "Hold-Scribe - Recording...".to_string(),
            SurfaceStatus::Transcribing => "Hold-Scribe - Transcribing...".to_string(),
            SurfaceStatus::Error => match &snapshot.last_error {
                Some(message) => format!("Hold-Scribe - {}", message),
                None => "Hold-Scribe - Error".to_string(),
            },
        }
    }

    /// Load icon from compile-time embedded PNG bytes.
    ///
    /// Icons are embedded via include_bytes! so they work regardless of
    /// install location -- no hardcoded filesystem paths.
    #[track_caller]
    fn load_icon(status: SurfaceStatus) -> AppResult<Icon> {
        let png_bytes: &[u8] = match status {
            SurfaceStatus::Idle => include_bytes!("../resources/icons/idle.png"),
            SurfaceStatus::Recording => include_bytes!("../resources/icons/recording.png"),
            SurfaceStatus::Transcribing => include_bytes!("../resources/icons/transcribing.png"),
            SurfaceStatus::Error => include_bytes!("../resources/icons/error.png"),
        };

        let img = image::load_from_memory(png_bytes).map_err(|e| AppError::Surface {
            reason: format!("Failed to decode embedded icon: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let rgba = img.into_rgba8();
        let (width, height) = (rgba.width(), rgba.height());

        Icon::from_rgba(rgba.into_raw(), width, height).map_err(|e| AppError::Surface {
            reason: format!("Failed to create icon from RGBA: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Get the play menu item ID.
    pub fn play_item_id(&self) -> &MenuId {
        &self.play_item_id
    }

    /// Get the exit menu item ID.
    pub fn exit_item_id(&self) -> &MenuId {
        &self.exit_item_id
    }
}
