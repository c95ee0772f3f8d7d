//! Drawing for every screen.

use ratatui::{
    Frame,
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap},
};

use crate::{
    events::Screen,
    focus::FocusNavigator,
    layout,
    library::{EntryKind, MediaFilter, MediaItem, MediaKind},
    screens::{
        CastScreen, ExplorerScreen, GalleryScreen, HomeScreen, INSTRUCTIONS, LEFT_MENU, MenuEntry,
        PresentationScreen, RIGHT_MENU, ScreenState, SettingsScreen, Side, TECHNICAL_ACTIONS,
        TechnicalScreen, ViewerMode,
    },
    shortcuts::{Shortcuts, format_keys},
};

use super::App;

/// Orange focus highlight.
fn focus_style() -> Style {
    Style::default()
        .bg(Color::Rgb(255, 140, 0))
        .fg(Color::Black)
        .add_modifier(Modifier::BOLD)
}

fn card_style(focused: bool) -> Style {
    if focused {
        focus_style()
    } else {
        Style::default()
    }
}

/// Draw the whole frame.
pub fn draw(f: &mut Frame, app: &App) {
    let main_layout = layout::create_main_layout(f.area());
    let body = main_layout.body;

    match &app.view {
        ScreenState::Home(s) => draw_home(f, body, app, s),
        ScreenState::Explorer(s) => draw_explorer(f, body, s),
        ScreenState::Gallery(s) => draw_gallery(f, body, app, s),
        ScreenState::Cast(s) => draw_cast(f, body, app, s),
        ScreenState::Presentation(s) => draw_presentation(f, body, s),
        ScreenState::Settings(s) => draw_settings(f, body, s),
        ScreenState::Technical(s) => draw_technical(f, body, app, s),
    }

    let help_bar = Paragraph::new(help_text(app.screen(), &app.shortcuts))
        .block(Block::default().borders(Borders::ALL).title("HELP"))
        .wrap(Wrap { trim: true });
    f.render_widget(help_bar, main_layout.help_bar);

    f.render_widget(build_status_bar(app), main_layout.status_bar);
}

fn draw_home(f: &mut Frame, area: Rect, app: &App, home: &HomeScreen) {
    let cols = layout::create_home_layout(area);
    draw_menu(f, cols.left, &LEFT_MENU, home, Side::Left);
    draw_menu(f, cols.right, &RIGHT_MENU, home, Side::Right);

    let logo = Paragraph::new(vec![
        Line::from(""),
        Line::from(app.cfg.hub.title.clone()).bold(),
        Line::from(""),
        Line::from(app.cfg.hub.subtitle.clone()).italic(),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(logo, cols.logo);
}

fn draw_menu(f: &mut Frame, area: Rect, menu: &[MenuEntry], home: &HomeScreen, side: Side) {
    let nav = home.navigator(side);
    let active = home.active() == side;
    for (i, cell) in layout::grid_cells(area, 1, menu.len(), 3, nav.position()) {
        let entry = &menu[i];
        let card = Paragraph::new(entry.label)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL))
            .style(card_style(active && nav.is_focused(i)));
        f.render_widget(card, cell);
    }
}

fn draw_explorer(f: &mut Frame, area: Rect, explorer: &ExplorerScreen) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    let crumb = Paragraph::new(explorer.breadcrumb())
        .block(Block::default().borders(Borders::ALL).title("Explorer"));
    f.render_widget(crumb, chunks[0]);

    let block = Block::default().borders(Borders::ALL).title("FILES");
    if explorer.entries().is_empty() {
        let empty = Paragraph::new("This folder is empty")
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(empty, chunks[1]);
        return;
    }

    let items: Vec<ListItem> = explorer
        .entries()
        .iter()
        .map(|e| {
            let tag = match e.kind {
                EntryKind::Folder => "[DIR]",
                EntryKind::Image => "[IMG]",
                EntryKind::Video => "[VID]",
            };
            ListItem::new(format!("{tag} {}", e.name))
        })
        .collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(focus_style());
    let mut state = list_state(explorer.navigator());
    f.render_stateful_widget(list, chunks[1], &mut state);
}

fn draw_gallery(f: &mut Frame, area: Rect, app: &App, gallery: &GalleryScreen) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    let selected = MediaFilter::ALL
        .iter()
        .position(|m| *m == gallery.filter())
        .unwrap_or(0);
    let tabs = Tabs::new(MediaFilter::ALL.iter().map(|m| m.label()))
        .block(Block::default().borders(Borders::ALL).title("Media Gallery"))
        .select(selected)
        .highlight_style(focus_style());
    f.render_widget(tabs, chunks[0]);

    let items = gallery.visible(&app.library);
    if items.is_empty() {
        let empty = Paragraph::new("No media for this filter")
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(empty, chunks[1]);
    }
    let focused = gallery.grid().position();
    for (i, cell) in layout::grid_cells(chunks[1], gallery.columns(), items.len(), 4, focused) {
        let item = items[i];
        let card = Paragraph::new(vec![
            Line::from(item.name.clone()).bold(),
            Line::from(item.preview_src().unwrap_or("-").to_string()),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(item.kind.label()))
        .style(card_style(gallery.viewer().is_none() && gallery.grid().is_focused(i)));
        f.render_widget(card, cell);
    }

    let Some(viewer) = gallery.viewer() else {
        return;
    };
    let popup = layout::centered_popup(area, 80, area.height.saturating_sub(4).max(8));
    f.render_widget(Clear, popup);

    let mut lines = vec![
        Line::from(viewer.item.name.clone()).bold(),
        Line::from(format!("Type: {}", viewer.item.kind.label())),
    ];
    match viewer.mode {
        ViewerMode::Frames => {
            let frame = viewer.frame().unwrap_or(0);
            let total = viewer.item.frames.len();
            lines.push(Line::from(format!("Frame {}/{}", frame + 1, total)));
            if let Some(src) = viewer.item.frames.get(frame) {
                lines.push(Line::from(src.src.clone()));
            }
            lines.push(Line::from(dots(frame, total)));
        }
        ViewerMode::Items => {
            let pos = viewer.navigator().position().unwrap_or(0);
            lines.push(Line::from(format!(
                "Item {}/{}",
                pos + 1,
                viewer.navigator().item_count()
            )));
            lines.push(Line::from(src_line(&viewer.item)));
        }
        ViewerMode::Single => lines.push(Line::from(src_line(&viewer.item))),
    }
    if let Some(source) = gallery.source() {
        lines.push(Line::from(format!("From: {source}")).italic());
    }
    if matches!(viewer.item.kind, MediaKind::Video | MediaKind::Slideshow) {
        let state = if viewer.playing { "Playing" } else { "Paused" };
        lines.push(Line::from(""));
        lines.push(Line::from(state).bold());
    }
    let view = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Viewer")
                .style(Style::default().bg(Color::DarkGray)),
        );
    f.render_widget(view, popup);
}

fn draw_cast(f: &mut Frame, area: Rect, app: &App, cast: &CastScreen) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)])
        .split(area);

    let device = &app.device;
    let pin = if device.pin_pending {
        "....".to_string()
    } else {
        device.pin.clone()
    };
    let session = device
        .session
        .map_or_else(|| "-".to_string(), |s| s.to_string());
    let mut lines = vec![
        Line::from(format!("Device: {}", app.cfg.device.name)),
        Line::from(""),
        Line::from(format!("PIN: {pin}")).bold(),
        Line::from(format!("Session: {session}")),
        Line::from(""),
    ];
    lines.extend(
        INSTRUCTIONS
            .iter()
            .enumerate()
            .map(|(i, step)| Line::from(format!("{}. {step}", i + 1))),
    );
    let info = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Cast Screen"))
        .wrap(Wrap { trim: true });
    f.render_widget(info, chunks[0]);

    let button = Paragraph::new("New PIN")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
        .style(card_style(cast.navigator().is_focused(0)));
    f.render_widget(button, chunks[1]);
}

fn draw_presentation(f: &mut Frame, area: Rect, presentation: &PresentationScreen) {
    if let Some(current) = presentation.current_slide() {
        let slides = presentation.slides();
        let Some(slide) = slides.get(current) else {
            return;
        };
        let view = Paragraph::new(vec![
            Line::from(""),
            Line::from(slide.title.clone()).bold(),
            Line::from(""),
            Line::from(slide.content.clone()),
            Line::from(""),
            Line::from(dots(current, slides.len())),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(view, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)])
        .split(area);
    let info = Paragraph::new(format!("{} slides ready", presentation.slides().len()))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Presentation"));
    f.render_widget(info, chunks[0]);
    let button = Paragraph::new("Start presentation")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
        .style(focus_style());
    f.render_widget(button, chunks[1]);
}

fn draw_settings(f: &mut Frame, area: Rect, settings: &SettingsScreen) {
    if let Some(section) = settings.open_section() {
        let mut lines = vec![Line::from(section.description).italic(), Line::from("")];
        lines.extend(section.details.iter().map(|d| Line::from(d.clone())));
        let detail = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title(section.title));
        f.render_widget(detail, area);
        return;
    }

    let sections = settings.sections();
    let focused = settings.navigator().position();
    for (i, cell) in layout::grid_cells(area, settings.columns(), sections.len(), 4, focused) {
        let section = &sections[i];
        let card = Paragraph::new(vec![
            Line::from(section.title).bold(),
            Line::from(section.description),
        ])
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL))
        .style(card_style(settings.navigator().is_focused(i)));
        f.render_widget(card, cell);
    }
}

fn draw_technical(f: &mut Frame, area: Rect, app: &App, technical: &TechnicalScreen) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);

    let mut lines = match &app.device.info {
        Some(info) => {
            let mut lines = vec![
                Line::from(format!("Network: {}", info.network)),
                Line::from("Storage:"),
            ];
            lines.extend(info.drives.iter().map(|d| Line::from(format!("  {d}"))));
            lines.push(Line::from(format!("Version: {}", info.version)));
            lines.push(Line::from(format!(
                "Last restart: {}",
                info.last_restart.format("%Y-%m-%d %H:%M:%S")
            )));
            lines.push(Line::from(format!(
                "Uptime: {}h {:02}m",
                info.uptime.num_hours(),
                info.uptime.num_minutes() % 60
            )));
            lines
        }
        None => vec![Line::from("Loading system status...")],
    };
    if !app.ui.log.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from("Log:").bold());
        lines.extend(
            app.ui
                .log
                .iter()
                .rev()
                .take(8)
                .rev()
                .map(|l| Line::from(l.clone())),
        );
    }
    let info = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("SYSTEM"));
    f.render_widget(info, chunks[0]);

    let items: Vec<ListItem> = TECHNICAL_ACTIONS.iter().map(|a| ListItem::new(*a)).collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("ACTIONS"))
        .highlight_style(focus_style());
    let mut state = list_state(technical.navigator());
    f.render_stateful_widget(list, chunks[1], &mut state);
}

fn src_line(item: &MediaItem) -> String {
    item.src.clone().unwrap_or_else(|| item.name.clone())
}

fn list_state(nav: &FocusNavigator) -> ListState {
    let mut state = ListState::default();
    state.select(nav.position());
    state
}

/// Position dots such as `○ ● ○`.
fn dots(current: usize, total: usize) -> String {
    (0..total)
        .map(|i| if i == current { "●" } else { "○" })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Status bar: screen title, latest notice, error in red.
fn build_status_bar(app: &App) -> Paragraph<'static> {
    let title = app.screen().title();
    let status_text = if let Some(err) = &app.ui.error {
        format!("[{title}] ERROR: {err}")
    } else {
        format!("[{title}] {}", app.ui.status)
    };

    let mut status_bar = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL).title("STATUS"))
        .wrap(Wrap { trim: true });
    if app.ui.error.is_some() {
        status_bar = status_bar.style(Style::default().fg(Color::Red));
    }
    status_bar
}

/// Key help for the current screen.
fn help_text(screen: Screen, shortcuts: &Shortcuts) -> String {
    let nav = &shortcuts.nav;
    let arrows = format!(
        "{} {} {} {}: move",
        format_keys(&nav.up),
        format_keys(&nav.down),
        format_keys(&nav.left),
        format_keys(&nav.right)
    );
    let select = format_keys(&nav.select);
    let back = format_keys(&nav.back);
    let quit = format_keys(&shortcuts.global.quit);
    match screen {
        Screen::Home => format!("{arrows} | {select}: open | {quit}: quit"),
        Screen::Gallery => format!(
            "{arrows} | {select}: view/play | {}: filter | {back}: back | {quit}: quit",
            format_keys(&shortcuts.gallery.filter)
        ),
        Screen::Cast => format!("{select}: new PIN | {back}: back | {quit}: quit"),
        _ => format!("{arrows} | {select}: select | {back}: back | {quit}: quit"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        app::testing::app,
        events::Route,
        focus::{Direction, NavInput},
    };
    use ratatui::{Terminal, backend::TestBackend};

    fn render(app: &App) -> String {
        render_sized(app, 120, 40)
    }

    fn render_sized(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[tokio::test]
    async fn test_home_shows_logo_and_menus() {
        let app = app();
        let screen = render(&app);
        assert!(screen.contains("Onda Hub"));
        assert!(screen.contains("Explorer"));
        assert!(screen.contains("Settings"));
    }

    #[tokio::test]
    async fn test_every_screen_renders() {
        let mut app = app();
        let expected = [
            (Route::Explorer { path: vec![] }, "Storage"),
            (Route::Gallery { opened: None }, "Slideshow1"),
            (Route::Cast, "PIN: 1234"),
            (Route::Presentation, "Start presentation"),
            (Route::Settings, "Screensaver"),
            (Route::Technical, "Restart App"),
        ];
        for (route, text) in expected {
            app.navigate(route).await.unwrap();
            let screen = render(&app);
            assert!(screen.contains(text), "{:?} missing {text}", app.screen());
        }
    }

    #[tokio::test]
    async fn test_short_terminal_keeps_focused_card_visible() {
        let mut app = app();
        app.navigate(Route::Gallery { opened: None }).await.unwrap();
        for dir in [Direction::Up, Direction::Right, Direction::Right] {
            app.bus.publish(NavInput::Move(dir));
            app.pump().await.unwrap();
        }
        let screen = render_sized(&app, 120, 16);
        assert!(screen.contains("Slideshow1"));
        assert!(!screen.contains("Photo1.jpg"));
    }

    #[tokio::test]
    async fn test_error_is_shown_in_status_bar() {
        let mut app = app();
        app.ui.error = Some("boom".into());
        assert!(render(&app).contains("ERROR: boom"));
    }

    #[test]
    fn test_dots_marks_current() {
        assert_eq!(dots(1, 3), "○ ● ○");
    }
}
