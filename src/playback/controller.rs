// SPDX-FileCopyrightText: 2026 The Flightdocs Authors
// SPDX-License-Identifier: LicenseRef-Flightdocs-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flightdocs and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::debug;

use super::autoplay::Autoplay;
use super::keys::PlayerCommand;
use crate::model::{FlowModel, ParticipantKey, Phase, Step};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlaybackState {
    current_phase_index: usize,
    current_step_index: usize,
    is_playing: bool,
}

impl PlaybackState {
    pub fn current_phase_index(&self) -> usize {
        self.current_phase_index
    }

    pub fn current_step_index(&self) -> usize {
        self.current_step_index
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }
}

/// State machine for the guided flow player.
///
/// States are `Idle` and `Playing`. Manual phase changes always land in `Idle`; timer ticks
/// only happen in `Playing` and stop at the last step of the last phase without wrapping.
#[derive(Debug, Clone)]
pub struct PlaybackController {
    model: Arc<FlowModel>,
    state: PlaybackState,
    autoplay: Autoplay,
}

impl PlaybackController {
    pub fn new(model: Arc<FlowModel>, interval: Duration) -> Self {
        Self {
            model,
            state: PlaybackState::default(),
            autoplay: Autoplay::new(interval),
        }
    }

    pub fn model(&self) -> &FlowModel {
        &self.model
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing
    }

    pub fn autoplay_armed(&self) -> bool {
        self.autoplay.is_armed()
    }

    pub fn current_phase(&self) -> &Phase {
        // FlowModel guarantees at least one phase and the index is kept in range.
        &self.model.phases()[self.state.current_phase_index]
    }

    pub fn current_step(&self) -> &Step {
        &self.current_phase().steps()[self.state.current_step_index]
    }

    pub fn select_phase(&mut self, index: usize) {
        if index >= self.model.phase_count() {
            debug!(index, "ignoring out-of-range phase selection");
            return;
        }
        self.enter_phase_idle(index);
    }

    pub fn toggle_play(&mut self, now: Instant) {
        if self.state.is_playing {
            self.stop();
        } else {
            self.state.is_playing = true;
            self.state.current_step_index = 0;
            self.autoplay.arm(now);
        }
    }

    /// One autoplay tick.
    pub fn advance_step(&mut self) {
        let phase_index = self.state.current_phase_index;
        if self.state.current_step_index < self.model.step_count(phase_index).saturating_sub(1) {
            self.state.current_step_index += 1;
        } else if phase_index < self.model.last_phase_index() {
            self.state.current_phase_index += 1;
            self.state.current_step_index = 0;
        } else {
            self.stop();
        }
    }

    pub fn navigate_previous(&mut self) {
        if let Some(index) = self.state.current_phase_index.checked_sub(1) {
            self.enter_phase_idle(index);
        }
    }

    pub fn navigate_next(&mut self) {
        let index = self.state.current_phase_index + 1;
        if index < self.model.phase_count() {
            self.enter_phase_idle(index);
        }
    }

    pub fn apply(&mut self, command: PlayerCommand, now: Instant) {
        match command {
            PlayerCommand::Previous => self.navigate_previous(),
            PlayerCommand::Next => self.navigate_next(),
            PlayerCommand::TogglePlay => self.toggle_play(now),
            PlayerCommand::Select(index) => self.select_phase(index),
        }
    }

    /// Fires a due autoplay tick. Returns whether the state changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.state.is_playing {
            self.autoplay.disarm();
            return false;
        }
        if !self.autoplay.take_due(now) {
            return false;
        }
        self.advance_step();
        true
    }

    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        self.autoplay.time_until_due(now)
    }

    /// Fraction of the current phase reached, in `(0, 1]`.
    pub fn progress(&self) -> f64 {
        let total = self.current_phase().step_count().max(1);
        (self.state.current_step_index + 1) as f64 / total as f64
    }

    pub fn participant_is_active(&self, key: &ParticipantKey) -> bool {
        self.current_phase()
            .steps()
            .iter()
            .any(|step| step.involves(key))
    }

    /// Steps are all shown while idle; during playback only those already reached.
    pub fn step_is_revealed(&self, index: usize) -> bool {
        !self.state.is_playing || index <= self.state.current_step_index
    }

    fn enter_phase_idle(&mut self, index: usize) {
        self.state.current_phase_index = index;
        self.state.current_step_index = 0;
        self.stop();
    }

    fn stop(&mut self) {
        self.state.is_playing = false;
        self.autoplay.disarm();
    }
}

#[cfg(test)]
mod tests {
    use super::PlaybackController;
    use crate::content::integration_flow;
    use crate::model::{FlowModel, Participant, ParticipantKey, Phase, PhaseId, Step, StepKind};
    use crate::playback::PlayerCommand;
    use rstest::{fixture, rstest};
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    const TICK: Duration = Duration::from_millis(1500);

    #[fixture]
    fn controller() -> PlaybackController {
        PlaybackController::new(Arc::new(integration_flow().expect("flow")), TICK)
    }

    fn flow_with_step_counts(counts: &[usize]) -> Arc<FlowModel> {
        let a = ParticipantKey::new("a").expect("key");
        let b = ParticipantKey::new("b").expect("key");
        let phases = counts
            .iter()
            .enumerate()
            .map(|(idx, count)| {
                let steps = (0..*count)
                    .map(|step| {
                        let label = format!("s{idx}.{step}");
                        Step::new(a.clone(), b.clone(), label, StepKind::Request)
                    })
                    .collect();
                let phase_id = PhaseId::new(format!("p{idx}")).expect("phase id");
                Phase::new(phase_id, "t", "s", "d", steps)
            })
            .collect();
        let participants = vec![
            Participant::new(a, "App", "A"),
            Participant::new(b, "Api", "B"),
        ];
        Arc::new(FlowModel::new(participants, phases).expect("model"))
    }

    fn position(controller: &PlaybackController) -> (usize, usize, bool) {
        let state = controller.state();
        (
            state.current_phase_index(),
            state.current_step_index(),
            state.is_playing(),
        )
    }

    #[rstest]
    fn starts_idle_at_origin(controller: PlaybackController) {
        assert_eq!(position(&controller), (0, 0, false));
        assert!(!controller.autoplay_armed());
    }

    #[rstest]
    fn select_phase_resets_step_and_stops(
        mut controller: PlaybackController,
        #[values(0, 1, 2, 3)] phase: usize,
    ) {
        let now = Instant::now();
        controller.toggle_play(now);
        controller.advance_step();
        controller.select_phase(phase);
        assert_eq!(position(&controller), (phase, 0, false));
        assert!(!controller.autoplay_armed());
    }

    #[rstest]
    fn select_phase_out_of_range_is_ignored(mut controller: PlaybackController) {
        controller.select_phase(2);
        controller.select_phase(4);
        controller.select_phase(usize::MAX);
        assert_eq!(position(&controller), (2, 0, false));
    }

    #[rstest]
    fn select_command_routes_to_select_phase(mut controller: PlaybackController) {
        let now = Instant::now();
        controller.apply(PlayerCommand::Select(3), now);
        assert_eq!(position(&controller), (3, 0, false));
        controller.apply(PlayerCommand::Select(7), now);
        assert_eq!(position(&controller), (3, 0, false));
    }

    #[rstest]
    fn toggle_play_resets_step_when_starting(mut controller: PlaybackController) {
        let now = Instant::now();
        controller.toggle_play(now);
        controller.advance_step();
        controller.advance_step();
        controller.toggle_play(now);
        assert_eq!(position(&controller), (0, 2, false));

        controller.toggle_play(now);
        assert_eq!(position(&controller), (0, 0, true));
        assert!(controller.autoplay_armed());
    }

    #[test]
    fn advance_visits_every_pair_once_then_stops() {
        let model = flow_with_step_counts(&[3, 1, 4]);
        let mut controller = PlaybackController::new(model.clone(), TICK);
        controller.toggle_play(Instant::now());

        let mut visited = vec![(0usize, 0usize)];
        for _ in 0..32 {
            controller.advance_step();
            if !controller.is_playing() {
                break;
            }
            let state = controller.state();
            visited.push((state.current_phase_index(), state.current_step_index()));
        }

        let expected = model
            .phases()
            .iter()
            .enumerate()
            .flat_map(|(phase, p)| (0..p.step_count()).map(move |step| (phase, step)))
            .collect::<Vec<_>>();
        assert_eq!(visited, expected);
        assert_eq!(position(&controller), (2, 3, false));
        assert!(!controller.autoplay_armed());

        controller.advance_step();
        assert_eq!(position(&controller), (2, 3, false));
    }

    #[rstest]
    fn navigate_previous_is_noop_at_first_phase(mut controller: PlaybackController) {
        let now = Instant::now();
        controller.toggle_play(now);
        controller.advance_step();
        controller.navigate_previous();
        assert_eq!(position(&controller), (0, 1, true));
    }

    #[rstest]
    fn navigate_next_is_noop_at_last_phase(mut controller: PlaybackController) {
        controller.select_phase(3);
        controller.navigate_next();
        assert_eq!(position(&controller), (3, 0, false));
    }

    #[rstest]
    fn navigation_moves_one_phase_and_stops_playback(mut controller: PlaybackController) {
        let now = Instant::now();
        controller.toggle_play(now);
        controller.advance_step();
        controller.navigate_next();
        assert_eq!(position(&controller), (1, 0, false));
        controller.navigate_previous();
        assert_eq!(position(&controller), (0, 0, false));
    }

    #[test]
    fn space_then_ticks_walk_a_four_step_phase() {
        let model = flow_with_step_counts(&[4, 2]);
        let mut controller = PlaybackController::new(model, TICK);
        let t0 = Instant::now();

        controller.apply(PlayerCommand::TogglePlay, t0);
        assert_eq!(position(&controller), (0, 0, true));

        for tick in 1..=3u32 {
            assert!(controller.poll(t0 + TICK * tick));
        }
        assert_eq!(position(&controller), (0, 3, true));

        assert!(controller.poll(t0 + TICK * 4));
        assert_eq!(position(&controller), (1, 0, true));
    }

    #[test]
    fn fourth_tick_in_last_phase_stops_playing() {
        let model = flow_with_step_counts(&[4]);
        let mut controller = PlaybackController::new(model, TICK);
        let t0 = Instant::now();
        controller.toggle_play(t0);
        for tick in 1..=4u32 {
            controller.poll(t0 + TICK * tick);
        }
        assert_eq!(position(&controller), (0, 3, false));
        assert!(!controller.poll(t0 + TICK * 10));
    }

    #[rstest]
    fn poll_before_interval_does_nothing(mut controller: PlaybackController) {
        let t0 = Instant::now();
        controller.toggle_play(t0);
        assert!(!controller.poll(t0 + TICK / 2));
        assert_eq!(position(&controller), (0, 0, true));
    }

    #[rstest]
    fn pause_cancels_a_tick_that_is_already_due(mut controller: PlaybackController) {
        let t0 = Instant::now();
        controller.toggle_play(t0);
        let due = t0 + TICK * 2;
        controller.apply(PlayerCommand::TogglePlay, due);
        assert!(!controller.poll(due));
        assert_eq!(position(&controller), (0, 0, false));
        assert_eq!(controller.time_until_tick(due), None);
    }

    #[rstest]
    fn progress_tracks_current_step(mut controller: PlaybackController) {
        assert!((controller.progress() - 0.2).abs() < f64::EPSILON);
        controller.toggle_play(Instant::now());
        for _ in 0..4 {
            controller.advance_step();
        }
        assert!((controller.progress() - 1.0).abs() < f64::EPSILON);
    }

    #[rstest]
    fn reveals_steps_up_to_current_while_playing(mut controller: PlaybackController) {
        assert!(controller.step_is_revealed(4));
        controller.toggle_play(Instant::now());
        controller.advance_step();
        assert!(controller.step_is_revealed(1));
        assert!(!controller.step_is_revealed(2));
    }

    #[rstest]
    fn participants_active_in_current_phase(mut controller: PlaybackController) {
        let partner = ParticipantKey::new("partner").expect("key");
        let native = ParticipantKey::new("native").expect("key");
        controller.select_phase(1);
        assert!(!controller.participant_is_active(&partner));
        assert!(controller.participant_is_active(&native));
    }
}
