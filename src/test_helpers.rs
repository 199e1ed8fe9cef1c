use crate::dataset::Item;
use crate::error::Result;
use crate::sampling::session_rng;
use crate::scheduler::{SchedulerConfig, SessionScheduler};

/// `n` letters with ids `i0..i{n-1}`, in that order.
pub(crate) fn letters(n: usize) -> Vec<Item> {
    (0..n)
        .map(|i| Item::letter(&format!("i{i}"), &format!("g{i}"), &format!("r{i}"), None))
        .collect()
}

pub(crate) fn scheduler(n: usize, config: SchedulerConfig, seed: u64) -> Result<SessionScheduler> {
    SessionScheduler::new(letters(n), config, session_rng(Some(seed)))
}

pub(crate) trait TestHelper {
    /// Answers every presented item correctly until nothing is left. Returns the question count.
    fn drain_correct(&mut self) -> Result<usize>;
}

impl TestHelper for SessionScheduler {
    fn drain_correct(&mut self) -> Result<usize> {
        let mut asked = 0;
        while let Some(id) = self.next_item().map(|item| item.id.clone()) {
            self.record_answer(&id, true)?;
            asked += 1;
        }
        Ok(asked)
    }
}
