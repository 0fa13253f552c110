//! Collection run state tracking.

use std::time::Instant;

use crate::model::RunWarning;

/// Per-run counters and warnings for a collection.
#[derive(Debug)]
pub struct CollectState {
    pub target_username: String,

    // Counters
    pub pages_fetched: u64,
    pub followers_collected: u64,
    pub posts_collected: u64,
    pub likes_collected: u64,
    /// Followers emitted with missing posts and/or likes.
    pub followers_degraded: u64,

    pub warnings: Vec<RunWarning>,

    started_at: Instant,
}

impl CollectState {
    pub fn new(target_username: String) -> Self {
        Self {
            target_username,
            pages_fetched: 0,
            followers_collected: 0,
            posts_collected: 0,
            likes_collected: 0,
            followers_degraded: 0,
            warnings: Vec::new(),
            started_at: Instant::now(),
        }
    }

    /// Record a recoverable problem and log it.
    pub fn warn(&mut self, subject: &str, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!("{}: {}", subject, message);
        self.warnings.push(RunWarning::new(subject, message));
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warn_accumulates_entries() {
        let mut state = CollectState::new("jack".into());
        state.warn("alice", "posts unavailable");
        state.warn("bob", "likes unavailable");

        assert_eq!(state.warning_count(), 2);
        assert_eq!(state.warnings[0].subject, "alice");
    }
}
