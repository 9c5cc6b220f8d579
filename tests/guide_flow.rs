// SPDX-FileCopyrightText: 2026 The Flightdocs Authors
// SPDX-License-Identifier: LicenseRef-Flightdocs-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flightdocs and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;
use std::time::{Duration, Instant};

use flightdocs::config::Settings;
use flightdocs::content::{integration_flow, OVERVIEW_HREF};
use flightdocs::model::FlowModel;
use flightdocs::playback::PlaybackController;

fn flow() -> Arc<FlowModel> {
    Arc::new(integration_flow().expect("built-in flow is valid"))
}

#[test]
fn autoplay_walks_every_step_once_and_stops_at_the_end() {
    let model = flow();
    let interval = Settings::default().autoplay_interval();
    let mut controller = PlaybackController::new(Arc::clone(&model), interval);

    let start = Instant::now();
    controller.toggle_play(start);

    let mut visited = vec![(0, 0)];
    let mut now = start;
    while controller.is_playing() {
        now += interval;
        assert!(
            controller.poll(now),
            "a due tick always changes state while playing"
        );
        let state = controller.state();
        if controller.is_playing() {
            visited.push((state.current_phase_index(), state.current_step_index()));
        }
    }

    let expected = model
        .phases()
        .iter()
        .enumerate()
        .flat_map(|(i, p)| (0..p.step_count()).map(move |step| (i, step)))
        .collect::<Vec<_>>();
    assert_eq!(visited, expected);

    let end = controller.state();
    assert_eq!(end.current_phase_index(), model.last_phase_index());
    let last_phase = &model.phases()[model.last_phase_index()];
    assert_eq!(end.current_step_index(), last_phase.last_step_index());
    assert!(!controller.autoplay_armed());
    assert!(!controller.poll(now + interval * 10));
}

#[test]
fn ticks_only_fire_on_the_interval() {
    let model = flow();
    let interval = Duration::from_millis(1500);
    let mut controller = PlaybackController::new(model, interval);
    let start = Instant::now();
    controller.toggle_play(start);

    let just_before = start + interval - Duration::from_millis(1);
    assert!(!controller.poll(just_before));
    assert_eq!(controller.state().current_step_index(), 0);
    assert!(controller.poll(start + interval));
    assert_eq!(controller.state().current_step_index(), 1);
    assert_eq!(controller.time_until_tick(start + interval), Some(interval));
}

#[test]
fn pausing_cancels_a_tick_that_was_already_due() {
    let mut controller = PlaybackController::new(flow(), Duration::from_millis(1500));
    let start = Instant::now();
    controller.toggle_play(start);

    let due = start + Duration::from_secs(5);
    controller.toggle_play(due);
    assert!(!controller.poll(due));
    assert_eq!(controller.state().current_step_index(), 0);
    assert!(!controller.autoplay_armed());
}

#[test]
fn overview_page_is_the_one_embedding_the_player() {
    let catalog = flightdocs::content::nav_catalog();
    let embedding = catalog
        .items()
        .filter(|item| {
            flightdocs::content::load_page(item.href())
                .expect("catalog page loads")
                .embeds_flow_player()
        })
        .map(|item| item.href().to_owned())
        .collect::<Vec<_>>();
    assert_eq!(embedding, vec![OVERVIEW_HREF.to_owned()]);
}
