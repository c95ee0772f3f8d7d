//! Screen identifiers, routes and the actions screens hand back to the app.

use crate::library::MediaItem;

/// Screen currently on display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Home,
    Explorer,
    Gallery,
    Cast,
    Presentation,
    Settings,
    Technical,
}

impl Screen {
    pub fn title(self) -> &'static str {
        match self {
            Screen::Home => "Home",
            Screen::Explorer => "Explorer",
            Screen::Gallery => "Media Gallery",
            Screen::Cast => "Cast Screen",
            Screen::Presentation => "Presentation",
            Screen::Settings => "Settings",
            Screen::Technical => "Technical Mode",
        }
    }
}

/// A file handed from the explorer to the gallery viewer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenedMedia {
    pub item: MediaItem,
    /// Folder path the file came from, `root` at the top level.
    pub source: String,
}

/// Navigation target, with whatever the destination needs to mount.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Home,
    Explorer { path: Vec<String> },
    Gallery { opened: Option<OpenedMedia> },
    Cast,
    Presentation,
    Settings,
    Technical,
}

impl Route {
    pub fn screen(&self) -> Screen {
        match self {
            Route::Home => Screen::Home,
            Route::Explorer { .. } => Screen::Explorer,
            Route::Gallery { .. } => Screen::Gallery,
            Route::Cast => Screen::Cast,
            Route::Presentation => Screen::Presentation,
            Route::Settings => Screen::Settings,
            Route::Technical => Screen::Technical,
        }
    }
}

/// What the app should do after a screen handled an input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Unmount the current screen and mount another.
    Open(Route),
    /// Show a transient message in the status bar.
    Notice(String),
    /// Ask the device worker for a new cast PIN.
    RequestPin,
    /// Reset to the home screen as if freshly started.
    Restart,
    /// Leave the app.
    Quit,
}

/// State shared with the renderer that is not owned by a screen.
#[derive(Clone, Debug)]
pub struct UiState {
    /// Bottom status line.
    pub status: String,
    /// Error message (highlighted).
    pub error: Option<String>,
    /// Recent worker log lines.
    pub log: Vec<String>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            status: "Ready".into(),
            error: None,
            log: vec![],
        }
    }
}
