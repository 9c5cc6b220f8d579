// SPDX-FileCopyrightText: 2026 The Flightdocs Authors
// SPDX-License-Identifier: LicenseRef-Flightdocs-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flightdocs and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

fn shows_outline(area: Rect) -> bool {
    area.width >= OUTLINE_MIN_TOTAL_WIDTH
}

fn shows_sidebar(area: Rect) -> bool {
    area.width >= SIDEBAR_MIN_TOTAL_WIDTH
}

fn view_title(label: &str, tail: Option<&str>) -> String {
    let mut title = format!("─ {label}");
    if let Some(tail) = tail {
        let tail = tail.trim();
        if !tail.is_empty() {
            title.push_str(" · ");
            title.push_str(tail);
        }
    }
    title.push(' ');
    title
}

fn bold(color: Color) -> Style {
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

fn page_line_style(kind: LineKind) -> Style {
    match kind {
        LineKind::Heading(HeadingLevel::H1) => bold(HEADING_COLOR),
        LineKind::Heading(HeadingLevel::H2) => bold(Color::White),
        LineKind::Heading(_) => Style::default().add_modifier(Modifier::BOLD),
        LineKind::Rule(_) => Style::default().fg(Color::DarkGray),
        LineKind::Code => Style::default().fg(Color::Yellow),
        LineKind::Paragraph
        | LineKind::ListItem
        | LineKind::Blank
        | LineKind::Player(_)
        | LineKind::Faq(_) => Style::default(),
    }
}

fn sidebar_items(
    catalog: &NavCatalog,
    current_href: &str,
) -> (Vec<ListItem<'static>>, Option<usize>) {
    let mut items = Vec::new();
    let mut selected = None;
    for (section_idx, section) in catalog.sections().iter().enumerate() {
        if section_idx > 0 {
            items.push(ListItem::new(Line::default()));
        }
        items.push(ListItem::new(Line::styled(
            section.title().to_owned(),
            bold(FOOTER_LABEL_COLOR),
        )));
        for item in section.items() {
            if item.href() == current_href {
                selected = Some(items.len());
            }
            items.push(ListItem::new(Line::raw(format!("  {}", item.title()))));
        }
    }
    (items, selected)
}

fn outline_lines(outline: &HeadingIndex, width: usize) -> Vec<Line<'static>> {
    if outline.entries().is_empty() {
        let dim = Style::default().fg(Color::DarkGray);
        return vec![Line::styled("(no sections)", dim)];
    }
    outline
        .entries()
        .iter()
        .map(|entry| {
            let indent = if entry.level() == HeadingLevel::H3 {
                "  "
            } else {
                ""
            };
            let text = truncate_with_ellipsis(&format!("{indent}{}", entry.text()), width);
            let style = if outline.active() == Some(entry.id()) {
                bold(ACTIVE_COLOR)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::styled(text, style)
        })
        .collect()
}

fn pager_line(catalog: &NavCatalog, current_href: &str, width: usize) -> Line<'static> {
    let left = catalog
        .previous(current_href)
        .map(|item| format!("← {}", item.title()))
        .unwrap_or_default();
    let right = catalog
        .next(current_href)
        .map(|item| format!("{} →", item.title()))
        .unwrap_or_default();
    let used = text_len(&left) + text_len(&right);
    let gap = width.saturating_sub(used).max(1);
    Line::from(vec![
        Span::styled(left, Style::default().fg(FOOTER_KEY_COLOR)),
        Span::raw(" ".repeat(gap)),
        Span::styled(right, Style::default().fg(FOOTER_KEY_COLOR)),
    ])
}

fn footer_line(app: &App, now: Instant) -> Line<'static> {
    let mut spans = Vec::<Span<'static>>::new();
    let faq_editing = app.faq.as_ref().is_some_and(|faq| faq.is_editing());
    if app.modal.is_some() {
        push_footer_entry(&mut spans, "SEARCH", "type");
        push_footer_entry(&mut spans, "OPEN", "Enter");
        push_footer_entry(&mut spans, "CLOSE", "Esc");
    } else if faq_editing {
        push_footer_entry(&mut spans, "FILTER", "type");
        push_footer_entry(&mut spans, "DONE", "Enter/Esc");
    } else {
        push_footer_entry(&mut spans, "SEARCH", "Ctrl+K");
        push_footer_entry(&mut spans, "PAGE", "[]");
        push_footer_entry(&mut spans, "SCROLL", "j/k");
        if app.player.is_some() {
            push_footer_entry(&mut spans, "FLOW", "←/→ 1-9 Space");
        }
        if app.faq.is_some() {
            push_footer_entry(&mut spans, "FAQ", "/ c Tab Enter");
        }
        push_footer_entry(&mut spans, "HELP", "?");
        push_footer_entry(&mut spans, "QUIT", "q");
    }

    if let Some(toast) = app.toast.as_ref().filter(|toast| toast.expires_at > now) {
        spans.push(footer_separator());
        spans.push(Span::raw(toast.message.clone()));
    }
    Line::from(spans)
}

fn push_footer_entry(spans: &mut Vec<Span<'static>>, label: &str, value: &str) {
    if !spans.is_empty() {
        spans.push(footer_separator());
    }
    spans.push(Span::styled(
        format!("{}:", footer_label_ucfirst(label)),
        Style::default().fg(FOOTER_LABEL_COLOR),
    ));
    spans.push(Span::styled(value.to_owned(), bold(FOOTER_KEY_COLOR)));
}

fn footer_separator() -> Span<'static> {
    Span::styled(" | ", Style::default().fg(FOOTER_LABEL_COLOR))
}

fn footer_label_ucfirst(label: &str) -> String {
    let lower = label.to_lowercase();
    let mut chars = lower.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut out = first.to_uppercase().collect::<String>();
    out.push_str(chars.as_str());
    out
}

fn centered_rect(width_percent: u16, height_percent: u16, area: Rect) -> Rect {
    let vertical_margin = (100u16.saturating_sub(height_percent)) / 2;
    let horizontal_margin = (100u16.saturating_sub(width_percent)) / 2;

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(vertical_margin),
            Constraint::Percentage(height_percent),
            Constraint::Percentage(vertical_margin),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(horizontal_margin),
            Constraint::Percentage(width_percent),
            Constraint::Percentage(horizontal_margin),
        ])
        .split(vertical[1])[1]
}

fn help_kv(key: &str, desc: &str, key_width: usize, key_style: Style) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{key:>key_width$}"), key_style),
        Span::raw("  "),
        Span::raw(desc.to_owned()),
    ])
}

fn render_help(frame: &mut Frame<'_>, main_area: Rect) {
    let area = centered_rect(70, 70, main_area);
    frame.render_widget(Clear, area);

    let key_style = bold(FOOTER_KEY_COLOR);
    let header_style = bold(Color::White);
    const PAGE_KEYS: &str = "j/k, ↑/↓, PgUp/PgDn, Home/End";
    let key_width = PAGE_KEYS.chars().count();

    let lines = vec![
        Line::from(Span::styled("--- Docs ---", header_style)),
        help_kv("?", "Help (toggle)", key_width, key_style),
        help_kv("q", "Quit", key_width, key_style),
        help_kv("Ctrl+K", "Search pages", key_width, key_style),
        help_kv("[/]", "Previous/next page", key_width, key_style),
        help_kv(PAGE_KEYS, "Scroll page", key_width, key_style),
        help_kv("Space", "Page down (no flow player)", key_width, key_style),
        Line::default(),
        Line::from(Span::styled("--- Flow player ---", header_style)),
        help_kv("←/→", "Previous/next phase", key_width, key_style),
        help_kv("1-9", "Jump to phase", key_width, key_style),
        help_kv("Space", "Play/pause the phase", key_width, key_style),
        help_kv("x", "Show/hide step payload", key_width, key_style),
        help_kv("y", "Copy step payload", key_width, key_style),
        Line::default(),
        Line::from(Span::styled("--- FAQ ---", header_style)),
        help_kv("/", "Filter issues (Enter/Esc done)", key_width, key_style),
        help_kv("c/C", "Next/previous category", key_width, key_style),
        help_kv("Tab/Shift+Tab", "Move between issues", key_width, key_style),
        help_kv("Enter", "Expand/collapse issue", key_width, key_style),
        help_kv("y", "Copy code sample", key_width, key_style),
        Line::default(),
        Line::from(Span::styled("--- Search ---", header_style)),
        help_kv("↑/↓", "Move selection", key_width, key_style),
        help_kv("Enter", "Open page", key_width, key_style),
        help_kv("Esc", "Close", key_width, key_style),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .title(view_title("Help", Some("? closes")));
    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
