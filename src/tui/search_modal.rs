// SPDX-FileCopyrightText: 2026 The Flightdocs Authors
// SPDX-License-Identifier: LicenseRef-Flightdocs-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flightdocs and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph};

use super::bold;
use super::listeners::{KeyListeners, ListenerGuard, ListenerScope, ScrollLock, ScrollLockGuard};
use crate::search::{SearchIndex, SearchableEntry};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ModalOutcome {
    Stay,
    Close,
    Navigate(String),
}

/// Ctrl+K search overlay. Holds the page scroll lock for as long as it is open.
#[derive(Debug)]
pub(crate) struct SearchModal {
    query: String,
    selected: usize,
    _keys: ListenerGuard,
    _scroll: ScrollLockGuard,
}

impl SearchModal {
    pub(crate) fn open(listeners: &KeyListeners, scroll_lock: &ScrollLock) -> Self {
        Self {
            query: String::new(),
            selected: 0,
            _keys: listeners.install(ListenerScope::SearchModal),
            _scroll: scroll_lock.lock(),
        }
    }

    pub(crate) fn query(&self) -> &str {
        &self.query
    }

    pub(crate) fn selected(&self) -> usize {
        self.selected
    }

    /// Quick links while the query is blank, matches otherwise.
    pub(crate) fn results<'a>(&self, index: &'a SearchIndex) -> Vec<&'a SearchableEntry> {
        if self.query.trim().is_empty() {
            index.quick_links().iter().collect()
        } else {
            index.query(&self.query)
        }
    }

    pub(crate) fn handle_key(&mut self, key: &KeyEvent, index: &SearchIndex) -> ModalOutcome {
        match key.code {
            KeyCode::Esc => ModalOutcome::Close,
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                ModalOutcome::Stay
            }
            KeyCode::Down => {
                let len = self.results(index).len();
                if self.selected + 1 < len {
                    self.selected += 1;
                }
                ModalOutcome::Stay
            }
            KeyCode::Enter => match self.results(index).get(self.selected) {
                Some(entry) => ModalOutcome::Navigate(entry.href().to_owned()),
                None => ModalOutcome::Stay,
            },
            KeyCode::Backspace => {
                self.query.pop();
                self.selected = 0;
                ModalOutcome::Stay
            }
            KeyCode::Char(ch) if !is_chord(key) => {
                self.query.push(ch);
                self.selected = 0;
                ModalOutcome::Stay
            }
            _ => ModalOutcome::Stay,
        }
    }

    pub(crate) fn render(&self, frame: &mut Frame<'_>, area: Rect, index: &SearchIndex) {
        frame.render_widget(Clear, area);
        let outer = Block::default()
            .borders(Borders::ALL)
            .title(" Search docs ")
            .border_style(Style::default().fg(Color::Cyan));
        let inner = outer.inner(area);
        frame.render_widget(outer, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(inner);

        let prompt = Paragraph::new(Line::from(vec![
            Span::styled("› ", Style::default().fg(Color::Cyan)),
            Span::raw(self.query.clone()),
        ]));
        frame.render_widget(prompt, rows[0]);
        let typed = u16::try_from(self.query.chars().count()).unwrap_or(u16::MAX);
        let cursor_x = rows[0].x.saturating_add(2).saturating_add(typed);
        frame.set_cursor_position((cursor_x, rows[0].y));

        let dim = Style::default().fg(Color::DarkGray);
        let results = self.results(index);
        if results.is_empty() {
            let message = format!("No results found for \"{}\"", self.query.trim());
            frame.render_widget(Paragraph::new(message).style(dim), rows[1]);
        } else {
            let heading = if self.query.trim().is_empty() {
                "Quick links"
            } else {
                "Results"
            };
            let mut items = vec![ListItem::new(Line::styled(heading, bold(Color::Gray)))];
            items.extend(results.iter().map(|entry| {
                ListItem::new(Line::from(vec![
                    Span::raw(entry.title().to_owned()),
                    Span::styled(format!("  {}", entry.href()), dim),
                ]))
            }));
            let highlight = Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD);
            let list = List::new(items).highlight_style(highlight);
            let mut state = ListState::default();
            state.select(Some(self.selected + 1));
            frame.render_stateful_widget(list, rows[1], &mut state);
        }

        let hint = Paragraph::new("↑/↓ navigate · Enter open · Esc close").style(dim);
        frame.render_widget(hint, rows[2]);
    }
}

fn is_chord(key: &KeyEvent) -> bool {
    let chords = KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER;
    key.modifiers.intersects(chords)
}

#[cfg(test)]
mod tests {
    use super::{ModalOutcome, SearchModal};
    use crate::content::nav_catalog;
    use crate::search::SearchIndex;
    use crate::tui::listeners::{KeyListeners, ListenerScope, ScrollLock};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn send(modal: &mut SearchModal, index: &SearchIndex, code: KeyCode) -> ModalOutcome {
        modal.handle_key(&key(code), index)
    }

    fn type_text(modal: &mut SearchModal, index: &SearchIndex, text: &str) {
        for ch in text.chars() {
            assert_eq!(send(modal, index, KeyCode::Char(ch)), ModalOutcome::Stay);
        }
    }

    #[test]
    fn open_holds_scroll_lock_and_listener_until_dropped() {
        let listeners = KeyListeners::default();
        let lock = ScrollLock::default();
        let modal = SearchModal::open(&listeners, &lock);
        assert!(lock.is_locked());
        assert!(listeners.is_installed(ListenerScope::SearchModal));
        drop(modal);
        assert!(!lock.is_locked());
        assert!(!listeners.is_installed(ListenerScope::SearchModal));
    }

    #[test]
    fn blank_query_shows_quick_links() {
        let index = SearchIndex::flatten(&nav_catalog());
        let modal = SearchModal::open(&KeyListeners::default(), &ScrollLock::default());
        assert_eq!(modal.results(&index).len(), 5);
    }

    #[test]
    fn typing_filters_and_enter_navigates() {
        let index = SearchIndex::flatten(&nav_catalog());
        let mut modal = SearchModal::open(&KeyListeners::default(), &ScrollLock::default());
        type_text(&mut modal, &index, "web");
        assert_eq!(modal.query(), "web");
        assert_eq!(
            send(&mut modal, &index, KeyCode::Enter),
            ModalOutcome::Navigate("/docs/integration/webhooks".to_owned())
        );
    }

    #[test]
    fn selection_is_clamped_to_results() {
        let index = SearchIndex::flatten(&nav_catalog());
        let mut modal = SearchModal::open(&KeyListeners::default(), &ScrollLock::default());
        type_text(&mut modal, &index, "samples");
        for _ in 0..10 {
            send(&mut modal, &index, KeyCode::Down);
        }
        assert_eq!(modal.selected(), 2);
        send(&mut modal, &index, KeyCode::Up);
        assert_eq!(modal.selected(), 1);
    }

    #[test]
    fn enter_without_results_stays_open() {
        let index = SearchIndex::flatten(&nav_catalog());
        let mut modal = SearchModal::open(&KeyListeners::default(), &ScrollLock::default());
        type_text(&mut modal, &index, "zzz");
        assert!(modal.results(&index).is_empty());
        assert_eq!(send(&mut modal, &index, KeyCode::Enter), ModalOutcome::Stay);
        assert_eq!(send(&mut modal, &index, KeyCode::Esc), ModalOutcome::Close);
    }
}
