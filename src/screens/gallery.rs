//! Media gallery: filter tabs, a thumbnail grid and a fullscreen viewer.

use std::time::{Duration, Instant};

use super::Ctx;
use crate::{
    events::{Action, OpenedMedia, Route},
    focus::{FocusNavigator, NavConfig, NavError, NavOutcome},
    library::{MediaFilter, MediaItem, MediaKind, MediaSource},
};

/// How the viewer's arrows behave.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewerMode {
    /// Arrows step through the frames of a slideshow, wrapping.
    Frames,
    /// Arrows step through the filtered grid items, stopping at the ends.
    Items,
    /// A single file opened from the explorer.
    Single,
}

/// Open media item.
pub struct Viewer {
    pub item: MediaItem,
    pub mode: ViewerMode,
    /// Grid index the viewer is showing, if it came from the grid.
    pub grid_index: Option<usize>,
    pub playing: bool,
    nav: FocusNavigator,
    last_advance: Instant,
}

impl Viewer {
    pub fn navigator(&self) -> &FocusNavigator {
        &self.nav
    }

    /// Current slideshow frame, 0-based.
    pub fn frame(&self) -> Option<usize> {
        match self.mode {
            ViewerMode::Frames => self.nav.position(),
            _ => None,
        }
    }
}

pub struct GalleryScreen {
    filter: MediaFilter,
    /// Indices into the media provider that pass the filter.
    visible: Vec<usize>,
    grid: FocusNavigator,
    columns: usize,
    source: Option<String>,
    viewer: Option<Viewer>,
    throttle: Duration,
    interval: Duration,
}

impl GalleryScreen {
    pub fn mount(opened: Option<OpenedMedia>, ctx: &Ctx) -> Result<Self, NavError> {
        let columns = ctx.cfg.navigation.gallery_columns;
        let throttle = ctx.cfg.throttle();
        let visible = filtered(ctx.media, MediaFilter::All);
        let grid = FocusNavigator::listening(
            NavConfig::grid(visible.len(), columns).throttle(throttle),
            ctx.bus,
        )?;
        let mut screen = Self {
            filter: MediaFilter::All,
            visible,
            grid,
            columns,
            source: None,
            viewer: None,
            throttle,
            interval: ctx.cfg.slide_interval(),
        };
        if let Some(opened) = opened {
            screen.source = Some(opened.source);
            screen.open_viewer(opened.item, None, ctx)?;
        }
        Ok(screen)
    }

    pub fn filter(&self) -> MediaFilter {
        self.filter
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn grid(&self) -> &FocusNavigator {
        &self.grid
    }

    pub fn viewer(&self) -> Option<&Viewer> {
        self.viewer.as_ref()
    }

    /// Items currently shown in the grid.
    pub fn visible<'a>(&self, media: &'a dyn MediaSource) -> Vec<&'a MediaItem> {
        self.visible
            .iter()
            .filter_map(|&i| media.items().get(i))
            .collect()
    }

    /// Switch to the next filter tab; focus returns to the first item.
    pub fn cycle_filter(&mut self, media: &dyn MediaSource) {
        if self.viewer.is_some() {
            return;
        }
        self.filter = self.filter.next();
        self.visible = filtered(media, self.filter);
        self.grid.set_item_count(self.visible.len());
        self.grid.set_position(0);
        tracing::debug!(filter = ?self.filter, items = self.visible.len(), "gallery filter");
    }

    pub fn pump(&mut self, ctx: &Ctx) -> Result<Vec<Action>, NavError> {
        // The open viewer owns the arrows.
        if self.viewer.is_some() {
            self.pump_viewer(ctx)?;
            return Ok(vec![]);
        }
        for outcome in self.grid.pump() {
            match outcome {
                NavOutcome::Selected(index) => {
                    // Later outcomes belong to a grid that no longer listens.
                    if let Some(item) = self.item_at(index, ctx.media) {
                        self.open_viewer(item, Some(index), ctx)?;
                    }
                    break;
                }
                NavOutcome::Back => return Ok(vec![Action::Open(Route::Home)]),
                _ => {}
            }
        }
        Ok(vec![])
    }

    fn pump_viewer(&mut self, ctx: &Ctx) -> Result<(), NavError> {
        let outcomes = match self.viewer.as_mut() {
            Some(viewer) => viewer.nav.pump(),
            None => return Ok(()),
        };
        for outcome in outcomes {
            // Mode may change mid-batch when a slideshow opens.
            let Some(mode) = self.viewer.as_ref().map(|v| v.mode) else {
                break;
            };
            match outcome {
                NavOutcome::Moved { to, .. } if mode == ViewerMode::Items => {
                    let Some(item) = self.item_at(to, ctx.media) else {
                        continue;
                    };
                    if item.kind == MediaKind::Slideshow {
                        // Landing on a slideshow switches the arrows to its frames.
                        self.open_viewer(item, Some(to), ctx)?;
                    } else if let Some(viewer) = self.viewer.as_mut() {
                        viewer.item = item;
                        viewer.grid_index = Some(to);
                        viewer.playing = false;
                    }
                }
                NavOutcome::Moved { .. } => {
                    // Manual frame step restarts the autoplay interval.
                    if let Some(viewer) = self.viewer.as_mut() {
                        viewer.last_advance = Instant::now();
                    }
                }
                NavOutcome::Selected(_) => {
                    if let Some(viewer) = self.viewer.as_mut()
                        && matches!(viewer.item.kind, MediaKind::Video | MediaKind::Slideshow)
                    {
                        viewer.playing = !viewer.playing;
                        viewer.last_advance = Instant::now();
                    }
                }
                NavOutcome::Back => {
                    self.close_viewer(ctx);
                    break;
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn item_at(&self, index: usize, media: &dyn MediaSource) -> Option<MediaItem> {
        self.visible
            .get(index)
            .and_then(|&i| media.items().get(i))
            .cloned()
    }

    /// Open `item`, replacing any open viewer. `grid_index` is its position
    /// in the grid when it was picked there.
    fn open_viewer(
        &mut self,
        item: MediaItem,
        grid_index: Option<usize>,
        ctx: &Ctx,
    ) -> Result<(), NavError> {
        let (mode, config) = match (item.kind, grid_index) {
            (MediaKind::Slideshow, _) => (ViewerMode::Frames, NavConfig::carousel(item.frames.len())),
            (_, Some(index)) => (
                ViewerMode::Items,
                NavConfig::carousel(self.visible.len()).wrap(false).initial(index),
            ),
            (_, None) => (ViewerMode::Single, NavConfig::carousel(1)),
        };
        let mut nav = FocusNavigator::listening(config.throttle(self.throttle), ctx.bus)?;
        nav.inherit_throttle(&self.grid);

        // Replace the previous viewer, keeping its throttle window.
        if let Some(mut old) = self.viewer.take() {
            nav.inherit_throttle(&old.nav);
            old.nav.destroy();
        }
        self.grid.unsubscribe();
        tracing::info!(item = %item.name, ?mode, "viewer opened");
        self.viewer = Some(Viewer {
            playing: item.kind == MediaKind::Slideshow,
            item,
            mode,
            grid_index,
            nav,
            last_advance: Instant::now(),
        });
        Ok(())
    }

    fn close_viewer(&mut self, ctx: &Ctx) {
        if let Some(mut viewer) = self.viewer.take() {
            viewer.nav.destroy();
            self.grid.inherit_throttle(&viewer.nav);
            // Grid focus follows what the viewer last showed.
            if let Some(index) = viewer.grid_index {
                self.grid.set_position(index);
            }
        }
        self.grid.subscribe(ctx.bus);
    }

    /// Advance a playing slideshow once per interval.
    pub fn tick(&mut self, now: Instant) {
        let Some(viewer) = self.viewer.as_mut() else {
            return;
        };
        if viewer.mode != ViewerMode::Frames || !viewer.playing {
            return;
        }
        if now.saturating_duration_since(viewer.last_advance) < self.interval {
            return;
        }
        // Wraps back to the first frame.
        let frames = viewer.nav.item_count();
        if let Some(frame) = viewer.nav.position() {
            viewer.nav.set_position((frame + 1) % frames);
        }
        viewer.last_advance = now;
    }

    pub fn unmount(&mut self) {
        if let Some(viewer) = self.viewer.as_mut() {
            viewer.nav.destroy();
        }
        self.grid.destroy();
    }
}

fn filtered(media: &dyn MediaSource, filter: MediaFilter) -> Vec<usize> {
    media
        .items()
        .iter()
        .enumerate()
        .filter(|(_, item)| filter.matches(item))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        focus::{Direction, NavInput},
        library::{Entry, EntryKind},
        screens::testing::Fixture,
    };

    fn send(fx: &Fixture, g: &mut GalleryScreen, inputs: &[NavInput]) -> Vec<Action> {
        let mut actions = vec![];
        for input in inputs {
            fx.bus.publish(*input);
            actions.extend(g.pump(&fx.ctx()).unwrap());
        }
        actions
    }

    fn mount(fx: &Fixture) -> GalleryScreen {
        GalleryScreen::mount(None, &fx.ctx()).unwrap()
    }

    #[test]
    fn test_grid_uses_configured_columns() {
        let fx = Fixture::new();
        let mut g = mount(&fx);
        assert_eq!(g.columns(), 3);
        send(&fx, &mut g, &[NavInput::Move(Direction::Up)]);
        assert_eq!(g.grid().position(), Some(6));
    }

    #[test]
    fn test_filter_resets_focus_and_count() {
        let fx = Fixture::new();
        let mut g = mount(&fx);
        send(&fx, &mut g, &[NavInput::Move(Direction::Down), NavInput::Move(Direction::Right)]);
        assert_eq!(g.grid().position(), Some(4));

        g.cycle_filter(&fx.library);
        assert_eq!(g.filter(), MediaFilter::Image);
        assert_eq!(g.grid().item_count(), 6);
        assert_eq!(g.grid().position(), Some(0));

        g.cycle_filter(&fx.library);
        g.cycle_filter(&fx.library);
        assert_eq!(g.filter(), MediaFilter::Slideshow);
        assert_eq!(g.visible(&fx.library)[0].name, "Slideshow1");
    }

    #[test]
    fn test_item_viewer_steps_without_wrap_and_syncs_grid() {
        let fx = Fixture::new();
        let mut g = mount(&fx);
        send(&fx, &mut g, &[NavInput::Select]);
        assert_eq!(g.viewer().unwrap().mode, ViewerMode::Items);
        assert!(!g.grid().is_listening());

        // Left at the first item stays put.
        send(&fx, &mut g, &[NavInput::Move(Direction::Left)]);
        assert_eq!(g.viewer().unwrap().item.name, "Photo1.jpg");

        send(&fx, &mut g, &[NavInput::Move(Direction::Right), NavInput::Move(Direction::Right)]);
        assert_eq!(g.viewer().unwrap().item.name, "Photo3.jpg");

        send(&fx, &mut g, &[NavInput::Back]);
        assert!(g.viewer().is_none());
        assert!(g.grid().is_listening());
        assert_eq!(g.grid().position(), Some(2));
        assert_eq!(fx.bus.subscriber_count(), 1);
    }

    #[test]
    fn test_stepping_onto_slideshow_switches_to_frames() {
        let fx = Fixture::new();
        let mut g = mount(&fx);
        g.grid.set_position(7);
        send(&fx, &mut g, &[NavInput::Select, NavInput::Move(Direction::Right)]);
        let viewer = g.viewer().unwrap();
        assert_eq!(viewer.mode, ViewerMode::Frames);
        assert_eq!(viewer.grid_index, Some(8));
        assert_eq!(viewer.frame(), Some(0));
        assert!(viewer.playing);
        assert_eq!(fx.bus.subscriber_count(), 1);
    }

    #[test]
    fn test_viewer_handoffs_keep_throttle_window() {
        let mut fx = Fixture::new();
        fx.cfg.navigation.throttle_ms = 100;
        let mut g = mount(&fx);
        g.grid.set_position(7);
        let t0 = Instant::now();

        for (input, at) in [
            (NavInput::Select, 0),
            (NavInput::Move(Direction::Right), 0),
            (NavInput::Move(Direction::Right), 10),
        ] {
            fx.bus.publish_at(input, t0 + Duration::from_millis(at));
            g.pump(&fx.ctx()).unwrap();
        }
        let viewer = g.viewer().unwrap();
        assert_eq!(viewer.mode, ViewerMode::Frames);
        assert_eq!(viewer.frame(), Some(0));

        // Back to the grid, still inside the window.
        for (input, at) in [(NavInput::Back, 20), (NavInput::Move(Direction::Left), 30)] {
            fx.bus.publish_at(input, t0 + Duration::from_millis(at));
            g.pump(&fx.ctx()).unwrap();
        }
        assert!(g.viewer().is_none());
        assert_eq!(g.grid().position(), Some(8));

        fx.bus.publish_at(NavInput::Move(Direction::Left), t0 + Duration::from_millis(100));
        g.pump(&fx.ctx()).unwrap();
        assert_eq!(g.grid().position(), Some(7));
    }

    #[test]
    fn test_slideshow_autoplay_and_pause() {
        let fx = Fixture::new();
        let mut g = mount(&fx);
        g.grid.set_position(8);
        send(&fx, &mut g, &[NavInput::Select]);

        let start = g.viewer().unwrap().last_advance;
        g.tick(start + Duration::from_secs(1));
        assert_eq!(g.viewer().unwrap().frame(), Some(0));
        g.tick(start + Duration::from_secs(3));
        assert_eq!(g.viewer().unwrap().frame(), Some(1));
        g.tick(start + Duration::from_secs(6));
        g.tick(start + Duration::from_secs(9));
        assert_eq!(g.viewer().unwrap().frame(), Some(0));

        send(&fx, &mut g, &[NavInput::Select]);
        assert!(!g.viewer().unwrap().playing);
        g.tick(start + Duration::from_secs(60));
        assert_eq!(g.viewer().unwrap().frame(), Some(0));
    }

    #[test]
    fn test_manual_frame_navigation_wraps() {
        let fx = Fixture::new();
        let mut g = mount(&fx);
        g.grid.set_position(8);
        send(&fx, &mut g, &[NavInput::Select, NavInput::Move(Direction::Left)]);
        assert_eq!(g.viewer().unwrap().frame(), Some(2));
    }

    #[test]
    fn test_opened_from_explorer_shows_single_item() {
        let fx = Fixture::new();
        let entry = Entry {
            name: "Tutorial.mp4".into(),
            kind: EntryKind::Video,
            children: vec![],
        };
        let opened = OpenedMedia {
            item: MediaItem::from_entry(&entry).unwrap(),
            source: "root".into(),
        };
        let mut g = GalleryScreen::mount(Some(opened), &fx.ctx()).unwrap();
        assert_eq!(g.source(), Some("root"));
        assert_eq!(g.viewer().unwrap().mode, ViewerMode::Single);
        assert!(!g.viewer().unwrap().playing);

        send(&fx, &mut g, &[NavInput::Select]);
        assert!(g.viewer().unwrap().playing);

        // Back closes the viewer, a second back leaves the gallery.
        assert!(send(&fx, &mut g, &[NavInput::Back]).is_empty());
        assert_eq!(g.grid().position(), Some(0));
        assert_eq!(send(&fx, &mut g, &[NavInput::Back]), vec![Action::Open(Route::Home)]);
    }

    #[test]
    fn test_filter_is_ignored_while_viewing() {
        let fx = Fixture::new();
        let mut g = mount(&fx);
        send(&fx, &mut g, &[NavInput::Select]);
        g.cycle_filter(&fx.library);
        assert_eq!(g.filter(), MediaFilter::All);
    }
}
