// SPDX-FileCopyrightText: 2026 The Flightdocs Authors
// SPDX-License-Identifier: LicenseRef-Flightdocs-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flightdocs and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;
use std::fmt;

use thiserror::Error;

use super::ids::{ParticipantKey, PhaseId};

/// A named actor of the integration flow (host app, bridge, PWA, platform, partner backend).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    key: ParticipantKey,
    name: String,
    short: String,
}

impl Participant {
    pub fn new(key: ParticipantKey, name: impl Into<String>, short: impl Into<String>) -> Self {
        Self {
            key,
            name: name.into(),
            short: short.into(),
        }
    }

    pub fn key(&self) -> &ParticipantKey {
        &self.key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn short(&self) -> &str {
        &self.short
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StepKind {
    Request,
    Response,
    Event,
    Callback,
    Webhook,
}

impl StepKind {
    pub const ALL: [StepKind; 5] = [
        Self::Request,
        Self::Response,
        Self::Event,
        Self::Callback,
        Self::Webhook,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Request => "Request",
            Self::Response => "Response",
            Self::Event => "Event",
            Self::Callback => "Callback",
            Self::Webhook => "Webhook",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single modeled interaction between two participants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    from: ParticipantKey,
    to: ParticipantKey,
    label: String,
    kind: StepKind,
    description: Option<String>,
    payload: Option<String>,
}

impl Step {
    pub fn new(
        from: ParticipantKey,
        to: ParticipantKey,
        label: impl Into<String>,
        kind: StepKind,
    ) -> Self {
        Self {
            from,
            to,
            label: label.into(),
            kind,
            description: None,
            payload: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_payload(mut self, payload: impl Into<String>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    pub fn from(&self) -> &ParticipantKey {
        &self.from
    }

    pub fn to(&self) -> &ParticipantKey {
        &self.to
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> StepKind {
        self.kind
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn payload(&self) -> Option<&str> {
        self.payload.as_deref()
    }

    pub fn involves(&self, key: &ParticipantKey) -> bool {
        &self.from == key || &self.to == key
    }

    pub fn is_self_call(&self) -> bool {
        self.from == self.to
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phase {
    phase_id: PhaseId,
    title: String,
    subtitle: String,
    description: String,
    steps: Vec<Step>,
}

impl Phase {
    pub fn new(
        phase_id: PhaseId,
        title: impl Into<String>,
        subtitle: impl Into<String>,
        description: impl Into<String>,
        steps: Vec<Step>,
    ) -> Self {
        Self {
            phase_id,
            title: title.into(),
            subtitle: subtitle.into(),
            description: description.into(),
            steps,
        }
    }

    pub fn phase_id(&self) -> &PhaseId {
        &self.phase_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn subtitle(&self) -> &str {
        &self.subtitle
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn last_step_index(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("flow must define at least one phase")]
    NoPhases,
    #[error("phase {phase_id} has no steps")]
    EmptyPhase { phase_id: PhaseId },
    #[error("duplicate participant {key}")]
    DuplicateParticipant { key: ParticipantKey },
    #[error("duplicate phase {phase_id}")]
    DuplicatePhase { phase_id: PhaseId },
    #[error("step {step_index} of phase {phase_id} uses unknown participant {key}")]
    UnknownParticipant {
        phase_id: PhaseId,
        step_index: usize,
        key: ParticipantKey,
    },
}

/// The immutable catalog of participants and phases the player walks through.
///
/// Construction validates the whole catalog once, so every index in `0..phase_count()` has a
/// non-empty step list and every step endpoint resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowModel {
    participants: Vec<Participant>,
    phases: Vec<Phase>,
}

impl FlowModel {
    pub fn new(participants: Vec<Participant>, phases: Vec<Phase>) -> Result<Self, ModelError> {
        if phases.is_empty() {
            return Err(ModelError::NoPhases);
        }

        let mut keys = BTreeSet::new();
        for participant in &participants {
            if !keys.insert(participant.key()) {
                return Err(ModelError::DuplicateParticipant {
                    key: participant.key().clone(),
                });
            }
        }

        let mut phase_ids = BTreeSet::new();
        for phase in &phases {
            if !phase_ids.insert(phase.phase_id()) {
                return Err(ModelError::DuplicatePhase {
                    phase_id: phase.phase_id().clone(),
                });
            }
            if phase.steps().is_empty() {
                return Err(ModelError::EmptyPhase {
                    phase_id: phase.phase_id().clone(),
                });
            }
            for (step_index, step) in phase.steps().iter().enumerate() {
                for key in [step.from(), step.to()] {
                    if !keys.contains(key) {
                        return Err(ModelError::UnknownParticipant {
                            phase_id: phase.phase_id().clone(),
                            step_index,
                            key: key.clone(),
                        });
                    }
                }
            }
        }

        Ok(Self {
            participants,
            phases,
        })
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn participant(&self, key: &ParticipantKey) -> Option<&Participant> {
        self.participants
            .iter()
            .find(|participant| participant.key() == key)
    }

    pub fn participant_index(&self, key: &ParticipantKey) -> Option<usize> {
        self.participants
            .iter()
            .position(|participant| participant.key() == key)
    }

    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    pub fn phase(&self, index: usize) -> Option<&Phase> {
        self.phases.get(index)
    }

    pub fn phase_count(&self) -> usize {
        self.phases.len()
    }

    pub fn last_phase_index(&self) -> usize {
        self.phases.len().saturating_sub(1)
    }

    /// Number of steps in phase `index`, or 0 when out of range.
    pub fn step_count(&self, index: usize) -> usize {
        self.phases.get(index).map(Phase::step_count).unwrap_or(0)
    }

    pub fn total_steps(&self) -> usize {
        self.phases.iter().map(Phase::step_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::{FlowModel, ModelError, Participant, Phase, Step, StepKind};
    use crate::model::ids::{ParticipantKey, PhaseId};

    fn key(value: &str) -> ParticipantKey {
        ParticipantKey::new(value).expect("participant key")
    }

    fn phase(id: &str, steps: Vec<Step>) -> Phase {
        Phase::new(PhaseId::new(id).expect("phase id"), id, "", "", steps)
    }

    fn two_participants() -> Vec<Participant> {
        vec![
            Participant::new(key("app"), "App", "App"),
            Participant::new(key("api"), "Api", "Api"),
        ]
    }

    fn call(from: &str, to: &str) -> Step {
        Step::new(key(from), key(to), "call", StepKind::Request)
    }

    #[test]
    fn rejects_empty_flow() {
        assert_eq!(
            FlowModel::new(two_participants(), Vec::new()),
            Err(ModelError::NoPhases)
        );
    }

    #[test]
    fn rejects_phase_without_steps() {
        let err = FlowModel::new(two_participants(), vec![phase("auth", Vec::new())]).unwrap_err();
        assert!(matches!(err, ModelError::EmptyPhase { .. }));
    }

    #[test]
    fn rejects_unknown_participant() {
        let steps = vec![call("app", "ghost")];
        let err = FlowModel::new(two_participants(), vec![phase("auth", steps)]).unwrap_err();
        assert_eq!(
            err,
            ModelError::UnknownParticipant {
                phase_id: PhaseId::new("auth").expect("phase id"),
                step_index: 0,
                key: key("ghost"),
            }
        );
    }

    #[test]
    fn rejects_duplicate_participant() {
        let mut participants = two_participants();
        participants.push(Participant::new(key("app"), "Again", "Again"));
        let steps = vec![call("app", "api")];
        let err = FlowModel::new(participants, vec![phase("auth", steps)]).unwrap_err();
        assert_eq!(err, ModelError::DuplicateParticipant { key: key("app") });
    }

    #[test]
    fn self_calls_are_allowed() {
        let phases = vec![phase("search", vec![call("app", "app")])];
        let model = FlowModel::new(two_participants(), phases).expect("valid model");
        assert!(model.phase(0).expect("phase").steps()[0].is_self_call());
        assert_eq!(model.step_count(0), 1);
        assert_eq!(model.step_count(7), 0);
    }

    #[test]
    fn step_kind_labels_cover_closed_set() {
        let labels = StepKind::ALL.map(StepKind::label);
        assert_eq!(
            labels,
            ["Request", "Response", "Event", "Callback", "Webhook"]
        );
    }
}
