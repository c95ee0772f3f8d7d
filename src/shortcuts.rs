//! Remote/keyboard key bindings.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::focus::{Direction, NavInput};

/// All key bindings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shortcuts {
    pub nav: NavShortcuts,
    pub global: GlobalShortcuts,
    pub gallery: GalleryShortcuts,
    pub hidden: HiddenShortcuts,
}

/// Keys translated into navigator inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavShortcuts {
    pub up: Vec<String>,
    pub down: Vec<String>,
    pub left: Vec<String>,
    pub right: Vec<String>,
    pub select: Vec<String>,
    pub back: Vec<String>,
}

/// Keys available on every screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalShortcuts {
    pub quit: Vec<String>,
}

/// Gallery commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryShortcuts {
    /// Cycle the media filter.
    pub filter: Vec<String>,
}

/// Long-press gestures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HiddenShortcuts {
    /// Held on the settings screen to open technical mode.
    pub technical: Vec<String>,
}

impl Shortcuts {
    /// Load from TOML, or fall back to defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let shortcuts: Shortcuts = toml::from_str(&content)?;
            Ok(shortcuts)
        } else {
            Ok(Self::default())
        }
    }

    /// Map a key to a navigator input.
    pub fn nav_input(&self, key: &KeyEvent) -> Option<NavInput> {
        let nav = &self.nav;
        if matches_shortcut(key, &nav.up) {
            Some(NavInput::Move(Direction::Up))
        } else if matches_shortcut(key, &nav.down) {
            Some(NavInput::Move(Direction::Down))
        } else if matches_shortcut(key, &nav.left) {
            Some(NavInput::Move(Direction::Left))
        } else if matches_shortcut(key, &nav.right) {
            Some(NavInput::Move(Direction::Right))
        } else if matches_shortcut(key, &nav.select) {
            Some(NavInput::Select)
        } else if matches_shortcut(key, &nav.back) {
            Some(NavInput::Back)
        } else {
            None
        }
    }
}

impl Default for Shortcuts {
    fn default() -> Self {
        Self {
            nav: NavShortcuts {
                up: vec!["Up".into(), "k".into()],
                down: vec!["Down".into(), "j".into()],
                left: vec!["Left".into(), "h".into()],
                right: vec!["Right".into(), "l".into()],
                select: vec!["Enter".into(), "Space".into()],
                back: vec!["Esc".into(), "Backspace".into()],
            },
            global: GlobalShortcuts {
                quit: vec!["q".into()],
            },
            gallery: GalleryShortcuts {
                filter: vec!["f".into(), "Tab".into()],
            },
            hidden: HiddenShortcuts {
                technical: vec!["Ctrl+t".into()],
            },
        }
    }
}

/// Whether the key matches any of the shortcut strings.
pub fn matches_shortcut(key: &KeyEvent, shortcuts: &[String]) -> bool {
    shortcuts.iter().any(|s| matches_single_shortcut(key, s))
}

/// Whether the key matches one shortcut string such as `"Ctrl+t"`.
fn matches_single_shortcut(key: &KeyEvent, shortcut: &str) -> bool {
    let parts: Vec<&str> = shortcut.split('+').collect();

    let (modifiers_str, key_str) = if parts.len() > 1 {
        (&parts[0..parts.len() - 1], parts[parts.len() - 1])
    } else {
        (&[][..], parts[0])
    };

    let mut expected_modifiers = KeyModifiers::empty();
    for modifier in modifiers_str {
        match *modifier {
            "Ctrl" | "ctrl" => expected_modifiers |= KeyModifiers::CONTROL,
            "Alt" | "alt" => expected_modifiers |= KeyModifiers::ALT,
            "Shift" | "shift" => expected_modifiers |= KeyModifiers::SHIFT,
            _ => return false,
        }
    }

    if key.modifiers != expected_modifiers {
        return false;
    }

    match key_str {
        "Enter" | "enter" => key.code == KeyCode::Enter,
        "Esc" | "esc" => key.code == KeyCode::Esc,
        "Tab" | "tab" => key.code == KeyCode::Tab,
        "Space" | "space" => key.code == KeyCode::Char(' '),
        "Backspace" | "backspace" => key.code == KeyCode::Backspace,
        "Delete" | "delete" => key.code == KeyCode::Delete,
        "Up" | "up" => key.code == KeyCode::Up,
        "Down" | "down" => key.code == KeyCode::Down,
        "Left" | "left" => key.code == KeyCode::Left,
        "Right" | "right" => key.code == KeyCode::Right,
        "Home" | "home" => key.code == KeyCode::Home,
        "End" | "end" => key.code == KeyCode::End,
        // Function keys: F1..F12.
        s if s.len() > 1 && (s.starts_with('F') || s.starts_with('f')) => s[1..]
            .parse::<u8>()
            .is_ok_and(|n| key.code == KeyCode::F(n)),
        s if s.chars().count() == 1 => s.chars().next().is_some_and(|c| key.code == KeyCode::Char(c)),
        _ => false,
    }
}

/// Display form of a binding list, e.g. `Up/k`.
pub fn format_keys(keys: &[String]) -> String {
    keys.join("/")
}
