//! Folder and media providers backing the explorer and the gallery.
//!
//! Both are in-memory mocks loaded from `assets/library.json`; screens only
//! depend on the two traits.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Bundled fixture with the demo folders and media.
const FIXTURE: &str = include_str!("../assets/library.json");

/// Kind of an explorer entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Folder,
    Image,
    Video,
}

/// One node in the folder tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub name: String,
    pub kind: EntryKind,
    /// Children; always empty for files.
    #[serde(default)]
    pub children: Vec<Entry>,
}

/// Kind of a gallery item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Slideshow,
}

impl MediaKind {
    pub fn label(self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
            MediaKind::Slideshow => "slideshow",
        }
    }
}

/// One slideshow frame.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    pub src: String,
}

/// One gallery item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: u32,
    pub name: String,
    pub kind: MediaKind,
    #[serde(default)]
    pub src: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    /// Ordered frames for slideshows.
    #[serde(default)]
    pub frames: Vec<Frame>,
}

impl MediaItem {
    /// Build a one-off item for a file opened from the explorer.
    pub fn from_entry(entry: &Entry) -> Option<Self> {
        let kind = match entry.kind {
            EntryKind::Image => MediaKind::Image,
            EntryKind::Video => MediaKind::Video,
            EntryKind::Folder => return None,
        };
        Some(Self {
            id: 0,
            name: entry.name.clone(),
            kind,
            src: None,
            thumbnail: None,
            frames: vec![],
        })
    }

    /// Image shown in the grid tile.
    pub fn preview_src(&self) -> Option<&str> {
        match self.kind {
            MediaKind::Image => self.src.as_deref(),
            MediaKind::Video => self.thumbnail.as_deref(),
            MediaKind::Slideshow => self.frames.first().map(|f| f.src.as_str()),
        }
    }
}

/// Gallery filter tabs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MediaFilter {
    #[default]
    All,
    Image,
    Video,
    Slideshow,
}

impl MediaFilter {
    pub const ALL: [MediaFilter; 4] = [
        MediaFilter::All,
        MediaFilter::Image,
        MediaFilter::Video,
        MediaFilter::Slideshow,
    ];

    pub fn matches(self, item: &MediaItem) -> bool {
        match self {
            MediaFilter::All => true,
            MediaFilter::Image => item.kind == MediaKind::Image,
            MediaFilter::Video => item.kind == MediaKind::Video,
            MediaFilter::Slideshow => item.kind == MediaKind::Slideshow,
        }
    }

    /// Next tab, wrapping after the last.
    pub fn next(self) -> Self {
        match self {
            MediaFilter::All => MediaFilter::Image,
            MediaFilter::Image => MediaFilter::Video,
            MediaFilter::Video => MediaFilter::Slideshow,
            MediaFilter::Slideshow => MediaFilter::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MediaFilter::All => "All",
            MediaFilter::Image => "Images",
            MediaFilter::Video => "Videos",
            MediaFilter::Slideshow => "Slideshows",
        }
    }
}

/// Library lookup failures.
#[derive(Error, Debug)]
pub enum LibraryError {
    /// A path segment names no folder at that level.
    #[error("folder \"{0}\" does not exist")]
    FolderNotFound(String),
    /// A path segment names a file.
    #[error("\"{0}\" is not a folder")]
    NotAFolder(String),
    /// The bundled fixture could not be parsed.
    #[error("invalid library fixture: {0}")]
    Fixture(#[from] serde_json::Error),
}

/// Hierarchical listing provider.
pub trait FolderSource {
    /// Children of the folder reached by following `path` from the root.
    fn list(&self, path: &[String]) -> Result<Vec<Entry>, LibraryError>;
}

/// Flat media provider.
pub trait MediaSource {
    fn items(&self) -> &[MediaItem];
}

#[derive(Debug, Deserialize)]
struct Fixture {
    root: Entry,
    media: Vec<MediaItem>,
}

/// In-memory library used by the kiosk.
#[derive(Clone, Debug)]
pub struct MockLibrary {
    root: Entry,
    media: Vec<MediaItem>,
}

impl MockLibrary {
    /// Load the bundled fixture.
    pub fn load() -> Result<Self, LibraryError> {
        Self::from_json(FIXTURE)
    }

    /// Load from a JSON document shaped like the bundled fixture.
    pub fn from_json(json: &str) -> Result<Self, LibraryError> {
        let fixture: Fixture = serde_json::from_str(json)?;
        tracing::info!(
            media = fixture.media.len(),
            top_level = fixture.root.children.len(),
            "library loaded"
        );
        Ok(Self {
            root: fixture.root,
            media: fixture.media,
        })
    }
}

impl FolderSource for MockLibrary {
    fn list(&self, path: &[String]) -> Result<Vec<Entry>, LibraryError> {
        let mut folder = &self.root;
        for segment in path.iter().filter(|s| !s.is_empty()) {
            let Some(child) = folder.children.iter().find(|c| &c.name == segment) else {
                return Err(LibraryError::FolderNotFound(segment.clone()));
            };
            if child.kind != EntryKind::Folder {
                return Err(LibraryError::NotAFolder(segment.clone()));
            }
            folder = child;
        }
        Ok(folder.children.clone())
    }
}

impl MediaSource for MockLibrary {
    fn items(&self) -> &[MediaItem] {
        &self.media
    }
}
