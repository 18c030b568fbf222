use std::time::{Duration, Instant};

use tracing::{debug, info};

/// Startup milestones with the time spent reaching each of them.
#[derive(Debug)]
pub struct StartupTimeline {
    started: Instant,
    last: Instant,
    milestones: Vec<(&'static str, Duration)>,
}

impl StartupTimeline {
    #[must_use]
    pub fn start() -> Self {
        let now = Instant::now();
        Self {
            started: now,
            last: now,
            milestones: Vec::new(),
        }
    }

    pub fn mark(&mut self, milestone: &'static str) {
        let now = Instant::now();
        let spent = now.duration_since(self.last);
        self.last = now;
        self.milestones.push((milestone, spent));
        debug!(
            milestone,
            spent_ms = spent.as_millis(),
            since_start_ms = now.duration_since(self.started).as_millis(),
            "startup milestone"
        );
    }

    pub fn milestones(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.milestones.iter().map(|(name, _)| *name)
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Log the whole startup time; called right before the event loop blocks.
    pub fn report(&self) {
        if self.milestones.is_empty() {
            info!("startup timeline empty");
            return;
        }
        info!(
            total_ms = self.elapsed().as_millis(),
            milestones = self.milestones.len(),
            "whole startup"
        );
    }
}
