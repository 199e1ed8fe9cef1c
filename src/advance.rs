use std::time::{Duration, Instant};

use log::debug;

/// Delay between a correct answer and the next question.
pub const DEFAULT_ADVANCE_DELAY: Duration = Duration::from_millis(1200);

/// Identifies one scheduled transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AdvanceToken(u64);

/// Single-slot deferred transition. Scheduling replaces whatever was pending, so at most one
/// transition can fire. The owner polls it with the current time.
#[derive(Debug)]
pub struct AutoAdvance {
    delay: Duration,
    pending: Option<(AdvanceToken, Instant)>,
    issued: u64,
}

impl Default for AutoAdvance {
    fn default() -> Self {
        Self::new(DEFAULT_ADVANCE_DELAY)
    }
}

impl AutoAdvance {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            issued: 0,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn schedule(&mut self, now: Instant) -> AdvanceToken {
        if let Some((previous, _)) = self.pending.take() {
            debug!("auto-advance {previous:?} superseded");
        }
        self.issued += 1;
        let token = AdvanceToken(self.issued);
        self.pending = Some((token, now + self.delay));
        token
    }

    /// Drops the pending transition, returning it if there was one.
    pub fn cancel(&mut self) -> Option<AdvanceToken> {
        self.pending.take().map(|(token, _)| token)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.map(|(_, at)| at)
    }

    /// Fires the pending transition once its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<AdvanceToken> {
        match self.pending {
            Some((token, at)) if now >= at => {
                self.pending = None;
                Some(token)
            }
            _ => None,
        }
    }
}
