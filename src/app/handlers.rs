//! Key routing.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Instant;

use crate::{screens::ScreenState, shortcuts};

use super::App;

/// Handle one key event. Returns `true` when the app should exit.
pub async fn handle_key(app: &mut App, k: KeyEvent) -> Result<bool> {
    let now = Instant::now();
    let hidden = shortcuts::matches_shortcut(&k, &app.shortcuts.hidden.technical);

    // Releases only matter to the hold gesture.
    if k.kind == KeyEventKind::Release {
        let unlocked = match &mut app.view {
            ScreenState::Settings(s) if hidden => s.hold_release(now),
            _ => None,
        };
        return match unlocked {
            Some(action) => app.apply(action).await,
            None => Ok(false),
        };
    }

    if shortcuts::matches_shortcut(&k, &app.shortcuts.global.quit) {
        return Ok(true);
    }

    if hidden {
        let unlocked = match &mut app.view {
            ScreenState::Settings(s) => s.hold_press(now),
            _ => None,
        };
        if let Some(action) = unlocked {
            return app.apply(action).await;
        }
        return Ok(false);
    }

    if shortcuts::matches_shortcut(&k, &app.shortcuts.gallery.filter)
        && let ScreenState::Gallery(g) = &mut app.view
    {
        g.cycle_filter(&app.library);
        app.ui.status = format!("Filter: {}", g.filter().label());
        return Ok(false);
    }

    if let Some(input) = app.shortcuts.nav_input(&k) {
        // The mounted screen consumes what was just published.
        app.bus.publish_at(input, now);
        return app.pump().await;
    }

    Ok(false)
}

/// Whether the key is Ctrl+C.
pub fn is_ctrl_c(k: &KeyEvent) -> bool {
    k.modifiers.contains(KeyModifiers::CONTROL) && k.code == KeyCode::Char('c')
}
