// SPDX-FileCopyrightText: 2026 The Flightdocs Authors
// SPDX-License-Identifier: LicenseRef-Flightdocs-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flightdocs and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Static lane rendering of a phase.
//!
//! One lane per participant in definition order, one label row and one arrow row per step.

use crate::model::{FlowModel, Phase, StepKind};

use super::text::{text_len, truncate_with_ellipsis};

pub const MIN_LANE_WIDTH: usize = 8;

const LANE: char = '│';
const ARROW_RIGHT: char = '▶';
const ARROW_LEFT: char = '◀';
const SELF_CALL: &str = "↺";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowLineKind {
    Header,
    Lanes,
    StepLabel(usize),
    StepArrow(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowLine {
    pub kind: FlowLineKind,
    pub text: String,
}

/// Stroke used for arrows of a step category.
pub fn stroke(kind: StepKind) -> char {
    match kind {
        StepKind::Request => '─',
        StepKind::Response => '╌',
        StepKind::Event => '═',
        StepKind::Callback => '┈',
        StepKind::Webhook => '┅',
    }
}

pub fn legend() -> String {
    StepKind::ALL
        .iter()
        .map(|kind| format!("{} {}", stroke(*kind), kind.label()))
        .collect::<Vec<_>>()
        .join("  ")
}

/// Widest lane that fits `participants` lanes into `width` columns, never below
/// [`MIN_LANE_WIDTH`].
pub fn lane_width_for(participants: usize, width: usize) -> usize {
    (width / participants.max(1)).max(MIN_LANE_WIDTH)
}

pub fn render_phase_lanes(model: &FlowModel, phase: &Phase, lane_width: usize) -> Vec<FlowLine> {
    let lane_width = lane_width.max(MIN_LANE_WIDTH);
    let lane_count = model.participants().len();
    let total_width = lane_width * lane_count;
    let center = |lane: usize| lane * lane_width + lane_width / 2;

    let mut lines = Vec::with_capacity(phase.step_count() * 2 + 2);

    let mut header = vec![' '; total_width];
    for (lane, participant) in model.participants().iter().enumerate() {
        let label = truncate_with_ellipsis(participant.short(), lane_width - 1);
        let start = lane * lane_width + (lane_width - text_len(&label)) / 2;
        put_str(&mut header, start, &label);
    }
    lines.push(FlowLine {
        kind: FlowLineKind::Header,
        text: collect_row(header),
    });

    let empty_lanes = {
        let mut row = vec![' '; total_width];
        for lane in 0..lane_count {
            row[center(lane)] = LANE;
        }
        row
    };
    lines.push(FlowLine {
        kind: FlowLineKind::Lanes,
        text: collect_row(empty_lanes.clone()),
    });

    for (index, step) in phase.steps().iter().enumerate() {
        // FlowModel validated that both ends resolve.
        let from = model.participant_index(step.from());
        let to = model.participant_index(step.to());
        let (Some(from), Some(to)) = (from, to) else {
            continue;
        };
        let (from_x, to_x) = (center(from), center(to));

        let mut label_row = empty_lanes.clone();
        let mut arrow_row = empty_lanes.clone();
        if from == to {
            let start = from_x + 2;
            let label = truncate_with_ellipsis(step.label(), total_width.saturating_sub(start));
            put_str(&mut label_row, start, &label);
            arrow_row[from_x + 1] = stroke(step.kind());
            put_str(&mut arrow_row, from_x + 2, SELF_CALL);
        } else {
            let (lo, hi) = (from_x.min(to_x), from_x.max(to_x));
            let span = hi - lo - 1;
            let label = truncate_with_ellipsis(step.label(), span);
            let start = lo + 1 + (span - text_len(&label)) / 2;
            put_str(&mut label_row, start, &label);

            for cell in &mut arrow_row[lo + 1..hi] {
                *cell = stroke(step.kind());
            }
            if to_x > from_x {
                arrow_row[hi - 1] = ARROW_RIGHT;
            } else {
                arrow_row[lo + 1] = ARROW_LEFT;
            }
        }

        lines.push(FlowLine {
            kind: FlowLineKind::StepLabel(index),
            text: collect_row(label_row),
        });
        lines.push(FlowLine {
            kind: FlowLineKind::StepArrow(index),
            text: collect_row(arrow_row),
        });
    }

    lines
}

fn put_str(row: &mut [char], start: usize, text: &str) {
    for (offset, ch) in text.chars().enumerate() {
        if let Some(cell) = row.get_mut(start + offset) {
            *cell = ch;
        }
    }
}

fn collect_row(row: Vec<char>) -> String {
    row.into_iter().collect::<String>().trim_end().to_owned()
}
