// SPDX-FileCopyrightText: 2026 The Flightdocs Authors
// SPDX-License-Identifier: LicenseRef-Flightdocs-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flightdocs and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::{Duration, Instant};

/// Fixed-interval tick source, armed only while playback runs.
///
/// There is no background thread: the owner asks [`Autoplay::take_due`] with the current instant.
/// Disarming clears the deadline, so nothing can fire after playback stops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Autoplay {
    interval: Duration,
    deadline: Option<Instant>,
}

impl Autoplay {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            deadline: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + self.interval);
    }

    pub fn disarm(&mut self) {
        self.deadline = None;
    }

    /// Returns `true` at most once per elapsed interval and re-arms from `now`.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }

    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::Autoplay;
    use std::time::{Duration, Instant};

    #[test]
    fn disarmed_never_fires() {
        let mut autoplay = Autoplay::new(Duration::from_millis(10));
        let now = Instant::now();
        assert!(!autoplay.take_due(now + Duration::from_secs(60)));
        assert_eq!(autoplay.time_until_due(now), None);
    }

    #[test]
    fn fires_once_per_interval() {
        let mut autoplay = Autoplay::new(Duration::from_millis(10));
        let t0 = Instant::now();
        autoplay.arm(t0);
        assert!(!autoplay.take_due(t0 + Duration::from_millis(9)));
        assert!(autoplay.take_due(t0 + Duration::from_millis(10)));
        assert!(!autoplay.take_due(t0 + Duration::from_millis(10)));
        assert!(autoplay.take_due(t0 + Duration::from_millis(20)));
    }

    #[test]
    fn disarm_cancels_pending_tick() {
        let mut autoplay = Autoplay::new(Duration::from_millis(10));
        let t0 = Instant::now();
        autoplay.arm(t0);
        autoplay.disarm();
        assert!(!autoplay.take_due(t0 + Duration::from_millis(50)));
    }
}
