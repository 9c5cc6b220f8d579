// SPDX-FileCopyrightText: 2026 The Flightdocs Authors
// SPDX-License-Identifier: LicenseRef-Flightdocs-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flightdocs and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;

use super::listeners::{KeyListeners, ListenerGuard, ListenerScope};
use super::ACTIVE_COLOR;
use crate::model::{FaqCategory, FaqId, FaqItem, FaqSeverity};
use crate::render::{truncate_with_ellipsis, wrap_words};
use crate::search::FaqFilter;

const DETAIL_INDENT: &str = "    ";
const CODE_INDENT: &str = "      ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FaqInput {
    Ignored,
    Handled,
    CopyCode(String),
}

/// The FAQ browser as mounted inside a page: search box, category chips and expandable rows.
#[derive(Debug)]
pub(crate) struct FaqBrowser {
    items: Arc<[FaqItem]>,
    filter: FaqFilter,
    editing: bool,
    selected: usize,
    expanded: Option<FaqId>,
    copied: bool,
    _keys: ListenerGuard,
}

impl FaqBrowser {
    pub(crate) fn mount(items: Arc<[FaqItem]>, listeners: &KeyListeners) -> Self {
        Self {
            items,
            filter: FaqFilter::default(),
            editing: false,
            selected: 0,
            expanded: None,
            copied: false,
            _keys: listeners.install(ListenerScope::FaqBrowser),
        }
    }

    pub(crate) fn filter(&self) -> &FaqFilter {
        &self.filter
    }

    pub(crate) fn is_editing(&self) -> bool {
        self.editing
    }

    pub(crate) fn selected(&self) -> usize {
        self.selected
    }

    pub(crate) fn expanded(&self) -> Option<&FaqId> {
        self.expanded.as_ref()
    }

    pub(crate) fn copied(&self) -> bool {
        self.copied
    }

    pub(crate) fn visible(&self) -> Vec<&FaqItem> {
        self.filter.apply(&self.items)
    }

    pub(crate) fn handle_key(&mut self, key: &KeyEvent) -> FaqInput {
        let chord = KeyModifiers::CONTROL | KeyModifiers::ALT;
        if key.modifiers.intersects(chord) {
            return FaqInput::Ignored;
        }
        if self.editing {
            return self.handle_query_key(key.code);
        }
        match key.code {
            KeyCode::Char('/') => self.editing = true,
            KeyCode::Char('c') => {
                self.filter.cycle_category(true);
                self.selected = 0;
            }
            KeyCode::Char('C') => {
                self.filter.cycle_category(false);
                self.selected = 0;
            }
            KeyCode::Tab => {
                let last = self.visible().len().saturating_sub(1);
                self.selected = (self.selected + 1).min(last);
            }
            KeyCode::BackTab => self.selected = self.selected.saturating_sub(1),
            KeyCode::Enter => self.toggle_selected(),
            KeyCode::Char('y') => {
                return match self.expanded_visible().and_then(FaqItem::code) {
                    Some(code) => FaqInput::CopyCode(code.to_owned()),
                    None => FaqInput::Handled,
                };
            }
            _ => return FaqInput::Ignored,
        }
        FaqInput::Handled
    }

    /// While the search box has focus every printable key belongs to the query.
    fn handle_query_key(&mut self, code: KeyCode) -> FaqInput {
        match code {
            KeyCode::Esc | KeyCode::Enter => self.editing = false,
            KeyCode::Backspace => {
                if self.filter.pop_char() {
                    self.selected = 0;
                }
            }
            KeyCode::Char(ch) => {
                self.filter.push_char(ch);
                self.selected = 0;
            }
            _ => return FaqInput::Ignored,
        }
        FaqInput::Handled
    }

    fn toggle_selected(&mut self) {
        let Some(id) = self.visible().get(self.selected).map(|item| item.id().clone()) else {
            return;
        };
        self.expanded = if self.expanded.as_ref() == Some(&id) {
            None
        } else {
            Some(id)
        };
        self.copied = false;
    }

    fn expanded_visible(&self) -> Option<&FaqItem> {
        let expanded = self.expanded.as_ref()?;
        self.visible()
            .into_iter()
            .find(|item| item.id() == expanded)
    }

    pub(crate) fn mark_copied(&mut self) {
        self.copied = true;
    }

    pub(crate) fn rows(&self, width: usize) -> usize {
        self.layout(width).0.len()
    }

    pub(crate) fn lines(&self, width: usize) -> Vec<Line<'static>> {
        self.layout(width).0
    }

    /// Row of the selected entry's question within [`Self::lines`].
    pub(crate) fn selected_row(&self, width: usize) -> Option<usize> {
        self.layout(width).1
    }

    fn layout(&self, width: usize) -> (Vec<Line<'static>>, Option<usize>) {
        let width = width.max(1);
        let visible = self.visible();
        let mut lines = Vec::<Line<'static>>::new();

        lines.push(self.search_line(width));
        lines.push(self.chip_line());
        lines.push(Line::styled(
            format!("{} issues found", visible.len()),
            Style::default().fg(Color::DarkGray),
        ));
        lines.push(Line::default());

        if visible.is_empty() {
            lines.push(Line::styled(
                "No matching issues found",
                Style::default().fg(Color::DarkGray),
            ));
            return (lines, None);
        }

        let mut selected_row = None;
        for (idx, item) in visible.iter().enumerate() {
            if idx > 0 {
                lines.push(Line::default());
            }
            let is_selected = idx == self.selected;
            let is_expanded = self.expanded.as_ref() == Some(item.id());
            if is_selected {
                selected_row = Some(lines.len());
            }

            let marker = if is_expanded { "▾" } else { "▸" };
            let pointer = if is_selected { "›" } else { " " };
            let question_style = if is_selected {
                Style::default()
                    .fg(ACTIVE_COLOR)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            lines.push(Line::styled(
                truncate_with_ellipsis(
                    &format!("{pointer} {marker} {}", item.question()),
                    width,
                ),
                question_style,
            ));
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{DETAIL_INDENT}{} • ", item.category()),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    item.severity().label(),
                    Style::default().fg(severity_color(item.severity())),
                ),
            ]));

            if is_expanded {
                self.push_details(&mut lines, item, width);
            }
        }
        (lines, selected_row)
    }

    fn push_details(&self, lines: &mut Vec<Line<'static>>, item: &FaqItem, width: usize) {
        let sections = [
            ("SCENARIO", item.scenario()),
            ("CAUSE", item.cause()),
            ("RESOLUTION", Some(item.resolution())),
        ];
        let text_width = width.saturating_sub(DETAIL_INDENT.len()).max(1);
        for (label, text) in sections {
            let Some(text) = text else {
                continue;
            };
            lines.push(Line::styled(
                format!("{DETAIL_INDENT}{label}"),
                Style::default()
                    .fg(Color::Gray)
                    .add_modifier(Modifier::BOLD),
            ));
            for wrapped in wrap_words(text, text_width) {
                lines.push(Line::raw(format!("{DETAIL_INDENT}{wrapped}")));
            }
        }

        if let Some(code) = item.code() {
            for code_line in code.lines() {
                lines.push(Line::styled(
                    truncate_with_ellipsis(&format!("{CODE_INDENT}{code_line}"), width),
                    Style::default().fg(Color::Yellow),
                ));
            }
            let hint = if self.copied {
                "Code (copied)"
            } else {
                "Code · y copy"
            };
            lines.push(Line::styled(
                format!("{DETAIL_INDENT}{hint}"),
                Style::default().fg(Color::Cyan),
            ));
        }

        for identifier in item.identifiers() {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{DETAIL_INDENT}{}", identifier.name),
                    Style::default().fg(Color::Cyan),
                ),
                Span::styled(
                    format!(": {}", identifier.value),
                    Style::default().fg(Color::Gray),
                ),
            ]));
        }
    }

    fn search_line(&self, width: usize) -> Line<'static> {
        let query = self.filter.query();
        if self.editing {
            let text = truncate_with_ellipsis(&format!("Search: {query}▏"), width);
            return Line::styled(text, Style::default().fg(ACTIVE_COLOR));
        }
        if query.is_empty() {
            return Line::styled(
                "Search issues... (/ to type)",
                Style::default().fg(Color::DarkGray),
            );
        }
        Line::raw(truncate_with_ellipsis(&format!("Search: {query}"), width))
    }

    fn chip_line(&self) -> Line<'static> {
        let chips = std::iter::once((None, "All Issues")).chain(
            FaqCategory::ALL
                .into_iter()
                .map(|category| (Some(category), category.label())),
        );
        let mut spans = Vec::<Span<'static>>::new();
        for (category, label) in chips {
            if !spans.is_empty() {
                spans.push(Span::raw(" "));
            }
            if category == self.filter.category() {
                spans.push(Span::styled(
                    format!("[{label}]"),
                    Style::default()
                        .fg(ACTIVE_COLOR)
                        .add_modifier(Modifier::BOLD),
                ));
            } else {
                spans.push(Span::styled(
                    format!(" {label} "),
                    Style::default().fg(Color::Gray),
                ));
            }
        }
        Line::from(spans)
    }
}

fn severity_color(severity: FaqSeverity) -> Color {
    match severity {
        FaqSeverity::Critical => Color::LightRed,
        FaqSeverity::Common => Color::LightYellow,
        FaqSeverity::EdgeCase => Color::LightBlue,
    }
}
