// SPDX-FileCopyrightText: 2026 The Flightdocs Authors
// SPDX-License-Identifier: LicenseRef-Flightdocs-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flightdocs and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;

use super::listeners::{KeyListeners, ListenerGuard, ListenerScope};
use crate::model::{FlowModel, StepKind};
use crate::playback::{PlaybackController, PlaybackState, PlayerCommand};
use crate::render::{
    lane_width_for, legend, render_phase_lanes, truncate_with_ellipsis, FlowLineKind,
};

/// Title, phase tabs, phase summary and progress.
const HEAD_ROWS: usize = 4;
/// Step detail, legend and payload hint.
const FOOT_ROWS: usize = 3;
const PROGRESS_CELLS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PlayerInput {
    Ignored,
    Handled,
    CopyPayload(String),
}

/// The guided flow player as mounted inside a page.
#[derive(Debug)]
pub(crate) struct FlowPlayer {
    controller: PlaybackController,
    payload_expanded: bool,
    copied: bool,
    rows: usize,
    _keys: ListenerGuard,
}

impl FlowPlayer {
    pub(crate) fn mount(
        model: Arc<FlowModel>,
        interval: Duration,
        listeners: &KeyListeners,
    ) -> Self {
        let rows = player_rows(&model);
        let keys = listeners.install(ListenerScope::Player);
        Self {
            controller: PlaybackController::new(model, interval),
            payload_expanded: false,
            copied: false,
            rows,
            _keys: keys,
        }
    }

    pub(crate) fn controller(&self) -> &PlaybackController {
        &self.controller
    }

    pub(crate) fn payload_expanded(&self) -> bool {
        self.payload_expanded
    }

    pub(crate) fn copied(&self) -> bool {
        self.copied
    }

    /// Rows reserved in the page. Constant for a model so page positions never shift.
    pub(crate) fn rows(&self) -> usize {
        self.rows
    }

    pub(crate) fn handle_key(&mut self, key: &KeyEvent, now: Instant) -> PlayerInput {
        if let Some(command) = PlayerCommand::from_key(key) {
            let before = self.controller.state();
            self.controller.apply(command, now);
            self.after_move(before);
            return PlayerInput::Handled;
        }
        let chord = KeyModifiers::CONTROL | KeyModifiers::ALT;
        if key.modifiers.intersects(chord) {
            return PlayerInput::Ignored;
        }
        match key.code {
            KeyCode::Char('x') => {
                self.payload_expanded = !self.payload_expanded;
                PlayerInput::Handled
            }
            KeyCode::Char('y') => match self.controller.current_step().payload() {
                Some(payload) => PlayerInput::CopyPayload(payload.to_owned()),
                None => PlayerInput::Handled,
            },
            _ => PlayerInput::Ignored,
        }
    }

    pub(crate) fn mark_copied(&mut self) {
        self.copied = true;
    }

    pub(crate) fn poll(&mut self, now: Instant) -> bool {
        let before = self.controller.state();
        let changed = self.controller.poll(now);
        if changed {
            self.after_move(before);
        }
        changed
    }

    pub(crate) fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        self.controller.time_until_tick(now)
    }

    fn after_move(&mut self, before: PlaybackState) {
        let after = self.controller.state();
        if before.current_phase_index() != after.current_phase_index()
            || before.current_step_index() != after.current_step_index()
        {
            self.copied = false;
        }
    }

    /// Exactly [`Self::rows`] styled lines.
    pub(crate) fn lines(&self, width: usize) -> Vec<Line<'static>> {
        let controller = &self.controller;
        let model = controller.model();
        let state = controller.state();
        let phase = controller.current_phase();
        let step = controller.current_step();
        let mut lines = Vec::<Line<'static>>::with_capacity(self.rows);

        lines.push(Line::from(vec![
            Span::styled(
                "Integration flow",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "  ←/→ phase · 1-9 jump · Space play/pause · x payload · y copy",
                Style::default().fg(Color::DarkGray),
            ),
        ]));

        let mut tabs = Vec::<Span<'static>>::new();
        for (idx, candidate) in model.phases().iter().enumerate() {
            if idx > 0 {
                tabs.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
            }
            let label = format!("{} {}", idx + 1, candidate.title());
            let style = if idx == state.current_phase_index() {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            tabs.push(Span::styled(label, style));
        }
        lines.push(Line::from(tabs));

        let summary = format!("{} · {}", phase.subtitle(), phase.description());
        lines.push(Line::from(Span::styled(
            truncate_with_ellipsis(&summary, width),
            Style::default().fg(Color::Gray),
        )));

        lines.push(progress_line(controller));

        let lane_width = lane_width_for(model.participants().len(), width);
        let lanes = render_phase_lanes(model, phase, lane_width);
        let blank_lanes = lanes
            .iter()
            .find(|line| line.kind == FlowLineKind::Lanes)
            .map(|line| line.text.clone())
            .unwrap_or_default();
        for line in &lanes {
            match line.kind {
                FlowLineKind::Header => {
                    let spans = model
                        .participants()
                        .iter()
                        .zip(chunk_chars(&line.text, lane_width))
                        .map(|(participant, chunk)| {
                            let style = if controller.participant_is_active(participant.key()) {
                                Style::default()
                                    .fg(Color::White)
                                    .add_modifier(Modifier::BOLD)
                            } else {
                                Style::default().fg(Color::DarkGray)
                            };
                            Span::styled(chunk, style)
                        })
                        .collect::<Vec<_>>();
                    lines.push(Line::from(spans));
                }
                FlowLineKind::Lanes => {
                    lines.push(Line::styled(line.text.clone(), lane_style()));
                }
                FlowLineKind::StepLabel(idx) | FlowLineKind::StepArrow(idx) => {
                    if !controller.step_is_revealed(idx) {
                        lines.push(Line::styled(blank_lanes.clone(), lane_style()));
                        continue;
                    }
                    let kind = phase.steps()[idx].kind();
                    let mut style = Style::default().fg(kind_color(kind));
                    if idx == state.current_step_index() {
                        style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
                    }
                    lines.push(Line::styled(line.text.clone(), style));
                }
            }
        }

        let mut detail = format!(
            "Step {}/{}: {} [{}]",
            state.current_step_index() + 1,
            phase.step_count(),
            step.label(),
            step.kind()
        );
        if let Some(description) = step.description() {
            detail.push_str(" · ");
            detail.push_str(description);
        }
        lines.push(Line::from(Span::styled(
            truncate_with_ellipsis(&detail, width),
            Style::default().fg(Color::White),
        )));
        lines.push(Line::from(Span::styled(
            truncate_with_ellipsis(&legend(), width),
            Style::default().fg(Color::DarkGray),
        )));

        match step.payload() {
            Some(payload) => {
                let hint = match (self.payload_expanded, self.copied) {
                    (_, true) => "Payload (copied)",
                    (true, false) => "Payload · x hide · y copy",
                    (false, false) => "Payload · x show · y copy",
                };
                let hint_style = Style::default().fg(Color::Cyan);
                lines.push(Line::from(Span::styled(hint, hint_style)));
                if self.payload_expanded {
                    for payload_line in payload.lines() {
                        lines.push(Line::from(Span::styled(
                            truncate_with_ellipsis(&format!("  {payload_line}"), width),
                            Style::default().fg(Color::Yellow),
                        )));
                    }
                }
            }
            None => lines.push(Line::default()),
        }

        lines.truncate(self.rows);
        while lines.len() < self.rows {
            lines.push(Line::default());
        }
        lines
    }
}

fn player_rows(model: &FlowModel) -> usize {
    let max_steps = model
        .phases()
        .iter()
        .map(|phase| phase.step_count())
        .max()
        .unwrap_or(0);
    let max_payload = model
        .phases()
        .iter()
        .flat_map(|phase| phase.steps())
        .filter_map(|step| step.payload())
        .map(|payload| payload.lines().count())
        .max()
        .unwrap_or(0);
    HEAD_ROWS + 2 + max_steps * 2 + FOOT_ROWS + max_payload
}

fn progress_line(controller: &PlaybackController) -> Line<'static> {
    let filled = (controller.progress() * PROGRESS_CELLS as f64).round() as usize;
    let bar = format!(
        "{}{}",
        "▰".repeat(filled.min(PROGRESS_CELLS)),
        "▱".repeat(PROGRESS_CELLS.saturating_sub(filled))
    );
    let status = if controller.is_playing() {
        "▶ playing"
    } else {
        "⏸ paused"
    };
    Line::from(vec![
        Span::styled(bar, Style::default().fg(Color::Cyan)),
        Span::raw(format!(" {status}")),
    ])
}

fn lane_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

fn kind_color(kind: StepKind) -> Color {
    match kind {
        StepKind::Request => Color::LightBlue,
        StepKind::Response => Color::LightGreen,
        StepKind::Event => Color::LightMagenta,
        StepKind::Callback => Color::LightYellow,
        StepKind::Webhook => Color::LightRed,
    }
}

fn chunk_chars(text: &str, width: usize) -> Vec<String> {
    let chars = text.chars().collect::<Vec<_>>();
    chars
        .chunks(width.max(1))
        .map(|chunk| chunk.iter().collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{FlowPlayer, PlayerInput};
    use crate::content::integration_flow;
    use crate::tui::listeners::{KeyListeners, ListenerScope};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::text::Line;
    use rstest::{fixture, rstest};
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    const TICK: Duration = Duration::from_millis(1500);

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[fixture]
    fn listeners() -> KeyListeners {
        KeyListeners::default()
    }

    fn mount(listeners: &KeyListeners) -> FlowPlayer {
        let model = Arc::new(integration_flow().expect("flow"));
        FlowPlayer::mount(model, TICK, listeners)
    }

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[rstest]
    fn mount_installs_and_drop_releases_listener(listeners: KeyListeners) {
        let player = mount(&listeners);
        assert!(listeners.is_installed(ListenerScope::Player));
        drop(player);
        assert!(!listeners.is_installed(ListenerScope::Player));
    }

    #[rstest]
    fn space_toggles_and_is_consumed(listeners: KeyListeners) {
        let mut player = mount(&listeners);
        let now = Instant::now();
        let space = press(KeyCode::Char(' '));
        assert_eq!(player.handle_key(&space, now), PlayerInput::Handled);
        assert!(player.controller().is_playing());
        assert!(player.controller().autoplay_armed());
        assert_eq!(player.handle_key(&space, now), PlayerInput::Handled);
        assert!(!player.controller().autoplay_armed());
    }

    #[rstest]
    fn page_keys_are_not_consumed(listeners: KeyListeners) {
        let mut player = mount(&listeners);
        let now = Instant::now();
        for code in [KeyCode::Char('j'), KeyCode::Down] {
            assert_eq!(player.handle_key(&press(code), now), PlayerInput::Ignored);
        }
    }

    #[rstest]
    fn copy_offers_payload_only_when_step_has_one(listeners: KeyListeners) {
        let mut player = mount(&listeners);
        let now = Instant::now();
        let copy = press(KeyCode::Char('y'));
        // auth step 0 has no payload
        assert_eq!(player.handle_key(&copy, now), PlayerInput::Handled);

        // payment phase, step 1 carries the init body
        player.handle_key(&press(KeyCode::Right), now);
        player.handle_key(&press(KeyCode::Right), now);
        player.handle_key(&press(KeyCode::Char(' ')), now);
        assert!(player.poll(now + TICK));
        match player.handle_key(&copy, now + TICK) {
            PlayerInput::CopyPayload(payload) => assert!(payload.contains("ORD123")),
            other => panic!("expected payload, got {other:?}"),
        }
        player.mark_copied();
        assert!(player.copied());
        assert!(player.poll(now + TICK * 2));
        assert!(!player.copied());
    }

    #[rstest]
    fn renders_a_stable_number_of_rows(listeners: KeyListeners) {
        let mut player = mount(&listeners);
        let rows = player.rows();
        assert_eq!(player.lines(100).len(), rows);
        player.handle_key(&press(KeyCode::Char('x')), Instant::now());
        assert!(player.payload_expanded());
        player.handle_key(&press(KeyCode::Right), Instant::now());
        assert_eq!(player.lines(40).len(), rows);
    }

    #[rstest]
    fn unrevealed_steps_render_as_bare_lanes(listeners: KeyListeners) {
        let mut player = mount(&listeners);
        let now = Instant::now();
        player.handle_key(&press(KeyCode::Char(' ')), now);
        let text = player
            .lines(100)
            .iter()
            .map(line_text)
            .collect::<Vec<_>>()
            .join("\n");
        assert!(text.contains("eventLogin()"));
        assert!(!text.contains("Create Session"));
    }
}
