use crate::DisplaySnapshot;

/// Commands sent from the async runtime to the main UI thread.
///
/// The main thread owns `TrayManager` (because `TrayIcon` is `!Send`),
/// so all tray mutations and process lifecycle events flow through this enum.
#[derive(Debug, Clone)]
pub enum SurfaceCommand {
    /// Re-render the tray from a fresh display snapshot.
    Render(DisplaySnapshot),
    /// Shut down the application. The main thread will exit the event loop.
    Shutdown,
}
