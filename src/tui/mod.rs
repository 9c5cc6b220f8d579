// SPDX-FileCopyrightText: 2026 The Flightdocs Authors
// SPDX-License-Identifier: LicenseRef-Flightdocs-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flightdocs and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! The docs shell (ratatui + crossterm): sidebar catalog, the current page with its "On this
//! page" outline, the search modal, and the guided flow player or FAQ browser on pages that
//! embed them.

use std::{
    error::Error,
    io,
    sync::Arc,
    time::{Duration, Instant},
};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    style::Print,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::content::{integration_faqs, integration_flow, load_page, nav_catalog, ContentError};
use crate::model::{Document, FaqItem, FlowModel, HeadingLevel, NavCatalog};
use crate::outline::{HeadingIndex, Viewport, ViewportObserver};
use crate::render::{
    render_document, text_len, truncate_with_ellipsis, EmbedRows, LineKind, RenderedPage,
};
use crate::search::SearchIndex;

mod faq;
mod listeners;
mod player;
mod search_modal;

use faq::{FaqBrowser, FaqInput};
use listeners::{KeyListeners, ListenerScope, ScrollLock};
use player::{FlowPlayer, PlayerInput};
use search_modal::{ModalOutcome, SearchModal};

const ACTIVE_COLOR: Color = Color::LightGreen;
const HEADING_COLOR: Color = Color::Cyan;
const FOOTER_LABEL_COLOR: Color = Color::Gray;
const FOOTER_KEY_COLOR: Color = Color::Cyan;
const SIDEBAR_WIDTH: u16 = 30;
const OUTLINE_WIDTH: u16 = 30;
const SIDEBAR_MIN_TOTAL_WIDTH: u16 = 80;
const OUTLINE_MIN_TOTAL_WIDTH: u16 = 110;
const IDLE_POLL: Duration = Duration::from_millis(250);
const TOAST_TTL: Duration = Duration::from_secs(2);

type ClipboardFn = fn(&str) -> Result<&'static str, String>;

/// Runs the docs shell until the user quits.
pub fn run(settings: &Settings, start_page: &str) -> Result<(), Box<dyn Error>> {
    let mut app = App::new(settings, start_page, Instant::now())?;
    let mut terminal = TerminalSession::new()?;
    info!(page = start_page, "docs shell started");

    while !app.should_quit {
        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(app.next_wakeup(Instant::now()))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key, Instant::now());
                }
                _ => {}
            }
        }
        app.tick(Instant::now());
    }

    info!("docs shell closed");
    Ok(())
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let now = Instant::now();
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    let main_area = layout[0];
    let status_area = layout[1];

    let mut constraints = Vec::with_capacity(3);
    if shows_sidebar(main_area) {
        constraints.push(Constraint::Length(SIDEBAR_WIDTH));
    }
    constraints.push(Constraint::Min(0));
    if shows_outline(main_area) {
        constraints.push(Constraint::Length(OUTLINE_WIDTH));
    }
    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(main_area);
    let mut panes = panes.iter().copied();
    let sidebar_area = if shows_sidebar(main_area) {
        panes.next()
    } else {
        None
    };
    let body_area = panes.next().unwrap_or(main_area);
    let outline_area = panes.next();

    if let Some(sidebar_area) = sidebar_area {
        let (items, selected) = sidebar_items(&app.catalog, &app.current_href);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(view_title("Docs", None));
        let highlight = bold(ACTIVE_COLOR);
        let list = List::new(items).block(block).highlight_style(highlight);
        let mut state = ListState::default();
        state.select(selected);
        frame.render_stateful_widget(list, sidebar_area, &mut state);
    }

    let body_block = Block::default()
        .borders(Borders::ALL)
        .title(view_title(app.page_title(), Some(&app.current_href)));
    let body_inner = body_block.inner(body_area);
    frame.render_widget(body_block, body_area);
    let body = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(body_inner);
    let text_area = body[0];

    app.layout_page(usize::from(text_area.width), usize::from(text_area.height));
    frame.render_widget(Paragraph::new(app.visible_page_lines()), text_area);
    let pager = pager_line(&app.catalog, &app.current_href, usize::from(body[1].width));
    frame.render_widget(Paragraph::new(pager), body[1]);

    if let Some(outline_area) = outline_area {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(view_title("On this page", None));
        let width = usize::from(block.inner(outline_area).width);
        let paragraph = Paragraph::new(outline_lines(&app.outline, width)).block(block);
        frame.render_widget(paragraph, outline_area);
    }

    frame.render_widget(Paragraph::new(footer_line(app, now)), status_area);

    if let Some(modal) = app.modal.as_ref() {
        modal.render(frame, centered_rect(64, 60, main_area), &app.search);
    } else if app.show_help {
        render_help(frame, main_area);
    }
}

include!("chrome.rs");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CopyTarget {
    PlayerPayload,
    FaqCode,
}

impl CopyTarget {
    fn label(self) -> &'static str {
        match self {
            Self::PlayerPayload => "payload",
            Self::FaqCode => "code",
        }
    }
}

#[derive(Debug, Clone)]
struct Toast {
    message: String,
    expires_at: Instant,
}

impl Toast {
    fn remaining(&self, now: Instant) -> Duration {
        self.expires_at.saturating_duration_since(now)
    }
}

struct App {
    catalog: NavCatalog,
    search: SearchIndex,
    flow: Arc<FlowModel>,
    faqs: Arc<[FaqItem]>,
    autoplay_interval: Duration,
    current_href: String,
    document: Document,
    rendered: Option<RenderedPage>,
    scroll: usize,
    page_height: usize,
    outline: HeadingIndex,
    observer: ViewportObserver,
    player: Option<FlowPlayer>,
    faq: Option<FaqBrowser>,
    modal: Option<SearchModal>,
    listeners: KeyListeners,
    scroll_lock: ScrollLock,
    clipboard: ClipboardFn,
    show_help: bool,
    toast: Option<Toast>,
    should_quit: bool,
}

impl App {
    fn new(settings: &Settings, start_page: &str, now: Instant) -> Result<Self, ContentError> {
        let catalog = nav_catalog();
        let search = SearchIndex::flatten(&catalog);
        let flow = Arc::new(integration_flow()?);
        let faqs: Arc<[FaqItem]> = integration_faqs()?.into();
        let document = load_page(start_page)?;

        let mut app = Self {
            catalog,
            search,
            flow,
            faqs,
            autoplay_interval: settings.autoplay_interval(),
            current_href: String::new(),
            document: Document::default(),
            rendered: None,
            scroll: 0,
            page_height: 1,
            outline: HeadingIndex::new(settings.heading_settle()),
            observer: ViewportObserver::new(settings.root_margin()),
            player: None,
            faq: None,
            modal: None,
            listeners: KeyListeners::default(),
            scroll_lock: ScrollLock::default(),
            clipboard: copy_to_clipboard,
            show_help: false,
            toast: None,
            should_quit: false,
        };
        app.open_document(start_page, document, now);
        Ok(app)
    }

    fn page_title(&self) -> &str {
        self.catalog
            .get(&self.current_href)
            .map(|item| item.title())
            .unwrap_or(self.current_href.as_str())
    }

    fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if self.handle_key_event(key, now) {
            self.should_quit = true;
        }
    }

    /// Routes one key press. Returns `true` when the shell should quit.
    fn handle_key_event(&mut self, key: KeyEvent, now: Instant) -> bool {
        if let Some(modal) = self.modal.as_mut() {
            match modal.handle_key(&key, &self.search) {
                ModalOutcome::Stay => {}
                ModalOutcome::Close => self.modal = None,
                ModalOutcome::Navigate(href) => {
                    self.modal = None;
                    self.navigate(&href, now);
                }
            }
            return false;
        }

        if self.show_help {
            match key.code {
                KeyCode::Esc | KeyCode::Char('?') => self.show_help = false,
                KeyCode::Char('q') => return true,
                _ => {}
            }
            return false;
        }

        if is_search_shortcut(&key) {
            self.modal = Some(SearchModal::open(&self.listeners, &self.scroll_lock));
            return false;
        }

        if self.listeners.is_installed(ListenerScope::Player) {
            if let Some(player) = self.player.as_mut() {
                match player.handle_key(&key, now) {
                    PlayerInput::Ignored => {}
                    PlayerInput::Handled => return false,
                    PlayerInput::CopyPayload(payload) => {
                        self.copy_text(&payload, CopyTarget::PlayerPayload, now);
                        return false;
                    }
                }
            }
        }

        if self.listeners.is_installed(ListenerScope::FaqBrowser) {
            if let Some(faq) = self.faq.as_mut() {
                match faq.handle_key(&key) {
                    FaqInput::Ignored => {}
                    FaqInput::Handled => {
                        self.refresh_faq();
                        return false;
                    }
                    FaqInput::CopyCode(code) => {
                        self.copy_text(&code, CopyTarget::FaqCode, now);
                        self.refresh_faq();
                        return false;
                    }
                }
            }
        }

        let chord = KeyModifiers::CONTROL | KeyModifiers::ALT;
        if key.modifiers.intersects(chord) {
            return false;
        }
        self.handle_key_code(key.code, now)
    }

    fn handle_key_code(&mut self, code: KeyCode, now: Instant) -> bool {
        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('[') => {
                if let Some(item) = self.catalog.previous(&self.current_href) {
                    let href = item.href().to_owned();
                    self.navigate(&href, now);
                }
            }
            KeyCode::Char(']') => {
                if let Some(item) = self.catalog.next(&self.current_href) {
                    let href = item.href().to_owned();
                    self.navigate(&href, now);
                }
            }
            _ => self.handle_scroll_key(code),
        }
        false
    }

    fn handle_scroll_key(&mut self, code: KeyCode) {
        if self.scroll_lock.is_locked() {
            return;
        }
        let page = self.page_height.saturating_sub(1).max(1);
        let target = match code {
            KeyCode::Down | KeyCode::Char('j') => self.scroll.saturating_add(1),
            KeyCode::Up | KeyCode::Char('k') => self.scroll.saturating_sub(1),
            KeyCode::PageDown | KeyCode::Char(' ') => self.scroll.saturating_add(page),
            KeyCode::PageUp => self.scroll.saturating_sub(page),
            KeyCode::Home => 0,
            KeyCode::End => usize::MAX,
            _ => return,
        };
        self.scroll_to(target);
    }

    fn max_scroll(&self) -> usize {
        self.rendered
            .as_ref()
            .map_or(0, |page| page.len().saturating_sub(self.page_height))
    }

    fn scroll_to(&mut self, line: usize) {
        let clamped = line.min(self.max_scroll());
        if clamped != self.scroll {
            self.scroll = clamped;
            self.sync_visibility();
        }
    }

    fn navigate(&mut self, href: &str, now: Instant) {
        if href == self.current_href {
            return;
        }
        match load_page(href) {
            Ok(document) => self.open_document(href, document, now),
            Err(err) => {
                warn!(href, %err, "cannot open page");
                self.set_toast(format!("Cannot open {href}"), now);
            }
        }
    }

    fn open_document(&mut self, href: &str, document: Document, now: Instant) {
        self.player = None;
        self.faq = None;
        self.outline.schedule_rebuild(now);
        self.current_href = href.to_owned();
        self.document = document;
        self.rendered = None;
        self.scroll = 0;
        if self.document.embeds_flow_player() {
            self.player = Some(FlowPlayer::mount(
                Arc::clone(&self.flow),
                self.autoplay_interval,
                &self.listeners,
            ));
        }
        if self.document.embeds_faq_browser() {
            self.faq = Some(FaqBrowser::mount(Arc::clone(&self.faqs), &self.listeners));
        }
        debug!(
            href,
            player = self.player.is_some(),
            faq = self.faq.is_some(),
            "opened page"
        );
    }

    /// Lays the page out for the body pane. Re-renders only when the width changes.
    fn layout_page(&mut self, width: usize, height: usize) {
        let width = width.max(1);
        let height = height.max(1);
        let stale = self
            .rendered
            .as_ref()
            .map_or(true, |page| page.width() != width);
        if stale {
            self.render_page(width);
        }
        if stale || height != self.page_height {
            self.page_height = height;
            self.scroll = self.scroll.min(self.max_scroll());
            self.sync_visibility();
        }
    }

    fn render_page(&mut self, width: usize) {
        let embeds = EmbedRows {
            player: self.player.as_ref().map_or(0, FlowPlayer::rows),
            faq: self.faq.as_ref().map_or(0, |faq| faq.rows(width)),
        };
        self.rendered = Some(render_document(&self.document, width, embeds));
        self.track_headings();
    }

    /// Re-lays the page after the FAQ browser changed height and keeps its selection in view.
    fn refresh_faq(&mut self) {
        let Some(width) = self.rendered.as_ref().map(RenderedPage::width) else {
            return;
        };
        self.render_page(width);
        self.scroll = self.scroll.min(self.max_scroll());
        self.sync_visibility();

        let base = self
            .document
            .faq_browser_block()
            .and_then(|block| self.rendered.as_ref()?.block_line(block));
        let row = self.faq.as_ref().and_then(|faq| faq.selected_row(width));
        if let (Some(base), Some(row)) = (base, row) {
            // the question and its category line
            let top = base + row;
            let bottom = top + 1;
            if top < self.scroll {
                self.scroll_to(top);
            } else if bottom >= self.scroll + self.page_height {
                self.scroll_to((bottom + 1).saturating_sub(self.page_height));
            }
        }
    }

    fn track_headings(&mut self) {
        if let Some(page) = self.rendered.as_ref() {
            self.outline
                .track_active(&self.observer, |block| page.block_line(block));
        }
    }

    fn sync_visibility(&mut self) {
        let viewport = Viewport::new(self.scroll, self.page_height);
        let batch = self.observer.update(viewport);
        if self.outline.on_visibility(&batch) {
            debug!(active = ?self.outline.active(), "active heading changed");
        }
    }

    /// Fires due deadlines: the outline scan, the player's autoplay and toast expiry.
    fn tick(&mut self, now: Instant) {
        let document = if self.rendered.is_some() {
            Some(&mut self.document)
        } else {
            None
        };
        if self.outline.poll(now, document) {
            self.track_headings();
            self.sync_visibility();
        }
        if let Some(player) = self.player.as_mut() {
            player.poll(now);
        }
        let expired = self.toast.as_ref().is_some_and(|t| t.expires_at <= now);
        if expired {
            self.toast = None;
        }
    }

    fn next_wakeup(&self, now: Instant) -> Duration {
        [
            self.outline.time_until_scan(now),
            self.player.as_ref().and_then(|p| p.time_until_tick(now)),
            self.toast.as_ref().map(|toast| toast.remaining(now)),
        ]
        .into_iter()
        .flatten()
        .fold(IDLE_POLL, Duration::min)
    }

    fn visible_page_lines(&self) -> Vec<Line<'static>> {
        let Some(page) = self.rendered.as_ref() else {
            return Vec::new();
        };
        let player_lines = self
            .player
            .as_ref()
            .map(|player| player.lines(page.width()))
            .unwrap_or_default();
        let faq_lines = self
            .faq
            .as_ref()
            .map(|faq| faq.lines(page.width()))
            .unwrap_or_default();
        page.lines()
            .iter()
            .skip(self.scroll)
            .take(self.page_height)
            .map(|line| match line.kind {
                LineKind::Player(row) => player_lines.get(row).cloned().unwrap_or_default(),
                LineKind::Faq(row) => faq_lines.get(row).cloned().unwrap_or_default(),
                kind => Line::styled(line.text.clone(), page_line_style(kind)),
            })
            .collect()
    }

    fn copy_text(&mut self, text: &str, target: CopyTarget, now: Instant) {
        match (self.clipboard)(text) {
            Ok(backend) => {
                match target {
                    CopyTarget::PlayerPayload => {
                        if let Some(player) = self.player.as_mut() {
                            player.mark_copied();
                        }
                    }
                    CopyTarget::FaqCode => {
                        if let Some(faq) = self.faq.as_mut() {
                            faq.mark_copied();
                        }
                    }
                }
                self.set_toast(format!("Copied {} ({backend})", target.label()), now);
            }
            Err(err) => {
                warn!(%err, target = target.label(), "failed to copy to clipboard");
                self.set_toast(format!("Clipboard error: {err}"), now);
            }
        }
    }

    fn set_toast(&mut self, message: impl Into<String>, now: Instant) {
        self.toast = Some(Toast {
            message: message.into(),
            expires_at: now + TOAST_TTL,
        });
    }
}

fn is_search_shortcut(key: &KeyEvent) -> bool {
    let chord = KeyModifiers::CONTROL | KeyModifiers::SUPER;
    matches!(key.code, KeyCode::Char('k') | KeyCode::Char('K')) && key.modifiers.intersects(chord)
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, LeaveAlternateScreen);
}

fn copy_to_clipboard(text: &str) -> Result<&'static str, String> {
    let mut stdout = io::stdout();
    execute!(stdout, Print(osc52_sequence(text))).map_err(|err| err.to_string())?;
    Ok("osc52")
}

fn osc52_sequence(text: &str) -> String {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;

    let encoded = STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x1b\\")
}
