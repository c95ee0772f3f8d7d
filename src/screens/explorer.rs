//! File explorer over the folder provider.

use std::time::Duration;

use super::Ctx;
use crate::{
    events::{Action, OpenedMedia, Route},
    focus::{FocusNavigator, NavConfig, NavError, NavOutcome},
    library::{Entry, EntryKind, MediaItem},
};

/// Label of the storage root in the breadcrumb.
const ROOT_LABEL: &str = "Storage";

pub struct ExplorerScreen {
    path: Vec<String>,
    entries: Vec<Entry>,
    nav: FocusNavigator,
    throttle: Duration,
}

impl ExplorerScreen {
    /// Open `path`; an unknown path falls back to the root with a notice.
    pub fn mount(path: Vec<String>, ctx: &Ctx) -> Result<(Self, Option<Action>), NavError> {
        let throttle = ctx.cfg.throttle();
        let (path, entries, notice) = match ctx.folders.list(&path) {
            Ok(entries) => (path, entries, None),
            Err(e) => {
                tracing::warn!("explorer path rejected: {e}");
                let root = ctx.folders.list(&[]).unwrap_or_default();
                (vec![], root, Some(Action::Notice(format!("Folder not found: {e}"))))
            }
        };
        let nav = list_navigator(entries.len(), 0, throttle, ctx)?;
        Ok((
            Self {
                path,
                entries,
                nav,
                throttle,
            },
            notice,
        ))
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn navigator(&self) -> &FocusNavigator {
        &self.nav
    }

    /// `Storage > Photos > ...`
    pub fn breadcrumb(&self) -> String {
        std::iter::once(ROOT_LABEL)
            .chain(self.path.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" > ")
    }

    pub fn pump(&mut self, ctx: &Ctx) -> Result<Vec<Action>, NavError> {
        for outcome in self.nav.pump() {
            match outcome {
                NavOutcome::Selected(index) => return self.open(index, ctx),
                NavOutcome::Back => return self.back(ctx),
                _ => {}
            }
        }
        Ok(vec![])
    }

    fn open(&mut self, index: usize, ctx: &Ctx) -> Result<Vec<Action>, NavError> {
        let Some(entry) = self.entries.get(index).cloned() else {
            return Ok(vec![]);
        };
        match entry.kind {
            EntryKind::Folder => {
                self.path.push(entry.name);
                self.reload(0, ctx)
            }
            EntryKind::Image | EntryKind::Video => {
                let source = if self.path.is_empty() {
                    "root".to_string()
                } else {
                    self.path.join("/")
                };
                Ok(MediaItem::from_entry(&entry)
                    .map(|item| Action::Open(Route::Gallery {
                        opened: Some(OpenedMedia { item, source }),
                    }))
                    .into_iter()
                    .collect())
            }
        }
    }

    fn back(&mut self, ctx: &Ctx) -> Result<Vec<Action>, NavError> {
        let Some(left) = self.path.pop() else {
            return Ok(vec![Action::Open(Route::Home)]);
        };
        // Land on the folder we just came out of.
        let parent = ctx.folders.list(&self.path).unwrap_or_default();
        let focus = parent.iter().position(|e| e.name == left).unwrap_or(0);
        self.reload(focus, ctx)
    }

    /// Replace the listing and its navigator after a path change.
    fn reload(&mut self, focus: usize, ctx: &Ctx) -> Result<Vec<Action>, NavError> {
        let mut actions = vec![];
        self.entries = match ctx.folders.list(&self.path) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("explorer reload failed: {e}");
                actions.push(Action::Notice(format!("Folder not found: {e}")));
                self.path.clear();
                ctx.folders.list(&[]).unwrap_or_default()
            }
        };
        self.nav.destroy();
        self.nav = list_navigator(self.entries.len(), focus, self.throttle, ctx)?;
        tracing::debug!(path = %self.breadcrumb(), items = self.entries.len(), "explorer listing");
        Ok(actions)
    }

    pub fn unmount(&mut self) {
        self.nav.destroy();
    }
}

fn list_navigator(
    len: usize,
    focus: usize,
    throttle: Duration,
    ctx: &Ctx,
) -> Result<FocusNavigator, NavError> {
    FocusNavigator::listening(
        NavConfig::linear(len).initial(focus).throttle(throttle),
        ctx.bus,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        focus::{Direction, NavInput},
        library::MediaKind,
        screens::testing::Fixture,
    };

    fn send(fx: &Fixture, ex: &mut ExplorerScreen, input: NavInput) -> Vec<Action> {
        fx.bus.publish(input);
        ex.pump(&fx.ctx()).unwrap()
    }

    #[test]
    fn test_descend_and_back_restores_focus() {
        let fx = Fixture::new();
        let (mut ex, _) = ExplorerScreen::mount(vec![], &fx.ctx()).unwrap();
        send(&fx, &mut ex, NavInput::Move(Direction::Down));
        send(&fx, &mut ex, NavInput::Move(Direction::Down));
        assert!(send(&fx, &mut ex, NavInput::Select).is_empty());
        assert_eq!(ex.path(), ["Videos".to_string()]);
        assert_eq!(ex.entries().len(), 2);
        assert_eq!(ex.navigator().position(), Some(0));
        assert_eq!(ex.breadcrumb(), "Storage > Videos");

        assert!(send(&fx, &mut ex, NavInput::Back).is_empty());
        assert!(ex.path().is_empty());
        assert_eq!(ex.navigator().position(), Some(2));
        assert_eq!(fx.bus.subscriber_count(), 1);
    }

    #[test]
    fn test_back_at_root_goes_home() {
        let fx = Fixture::new();
        let (mut ex, _) = ExplorerScreen::mount(vec![], &fx.ctx()).unwrap();
        assert_eq!(send(&fx, &mut ex, NavInput::Back), vec![Action::Open(Route::Home)]);
    }

    #[test]
    fn test_empty_folder_still_allows_back() {
        let fx = Fixture::new();
        let (mut ex, _) = ExplorerScreen::mount(vec!["Documents".into()], &fx.ctx()).unwrap();
        assert!(ex.entries().is_empty());
        assert!(!ex.navigator().is_active());
        assert!(send(&fx, &mut ex, NavInput::Select).is_empty());
        send(&fx, &mut ex, NavInput::Back);
        assert!(ex.path().is_empty());
        assert_eq!(ex.navigator().position(), Some(0));
    }

    #[test]
    fn test_opening_file_routes_to_gallery_with_source() {
        let fx = Fixture::new();
        let (mut ex, _) = ExplorerScreen::mount(vec!["Photos".into()], &fx.ctx()).unwrap();
        send(&fx, &mut ex, NavInput::Move(Direction::Down));
        let actions = send(&fx, &mut ex, NavInput::Select);
        let [Action::Open(Route::Gallery { opened: Some(opened) })] = &actions[..] else {
            panic!("unexpected actions: {actions:?}");
        };
        assert_eq!(opened.item.name, "Image2.jpg");
        assert_eq!(opened.item.kind, MediaKind::Image);
        assert_eq!(opened.source, "Photos");
    }

    #[test]
    fn test_unknown_path_falls_back_to_root() {
        let fx = Fixture::new();
        let (ex, notice) = ExplorerScreen::mount(vec!["Nope".into()], &fx.ctx()).unwrap();
        assert!(ex.path().is_empty());
        assert_eq!(ex.entries().len(), 5);
        assert!(matches!(notice, Some(Action::Notice(msg)) if msg.contains("Nope")));
    }
}
