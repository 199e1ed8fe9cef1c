use std::cmp::Reverse;
use std::collections::{HashMap, VecDeque};

use itertools::Itertools;
use log::{debug, info, warn};
use priority_queue::PriorityQueue;
use rand::rngs::StdRng;
use serde::Serialize;

use crate::catalog::{Catalog, Category};
use crate::dataset::Item;
use crate::error::{DuplicateItemSnafu, InvalidConfigSnafu, Result, UnknownItemSnafu};
use crate::sampling::{pick, shuffled};
use crate::stats::{AnswerRecord, SessionStats};

pub const DEFAULT_MASTERY_THRESHOLD: u32 = 3;
pub const DEFAULT_WINDOW_CAPACITY: usize = 10;
pub const DEFAULT_REPEAT_SPACING: usize = 5;

/// The three difficulty knobs. They are fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SchedulerConfig {
    /// Consecutive correct answers that retire an item.
    pub mastery_threshold: u32,
    /// Upper bound on the number of items in rotation at once.
    pub window_capacity: usize,
    /// How many of the most recent presentations are avoided when picking the next item.
    pub repeat_spacing: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            mastery_threshold: DEFAULT_MASTERY_THRESHOLD,
            window_capacity: DEFAULT_WINDOW_CAPACITY,
            repeat_spacing: DEFAULT_REPEAT_SPACING,
        }
    }
}

impl SchedulerConfig {
    pub(crate) fn validate(&self) -> Result<()> {
        if self.mastery_threshold == 0 {
            return InvalidConfigSnafu {
                reason: "mastery threshold must be at least 1",
            }
            .fail();
        }
        if self.window_capacity == 0 {
            return InvalidConfigSnafu {
                reason: "window capacity must be at least 1",
            }
            .fail();
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ItemProgress {
    /// Correct answers since the last miss.
    pub consecutive_correct: u32,
    /// Logical clock at the latest presentation, 0 if never presented.
    pub last_presented_at: u64,
}

impl ItemProgress {
    pub fn is_mastered(&self, mastery_threshold: u32) -> bool {
        self.consecutive_correct >= mastery_threshold
    }
}

/// What a reported answer did to the item's progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// Streak grew but is still below the threshold.
    Progressed { streak: u32 },
    /// Streak reached the threshold; the item left the rotation.
    Mastered,
    /// Wrong answer, streak back to zero.
    Reset,
    /// The item was already mastered. Nothing changed and nothing was logged.
    AlreadyMastered,
}

/// Owns every piece of mutable state of one learning session.
///
/// Items are kept in session order (the order given at construction). The active window holds
/// at most `window_capacity` unmastered items; `next_item` draws from it while skipping the last
/// `repeat_spacing` presentations whenever something else is available.
#[derive(Debug)]
pub struct SessionScheduler {
    config: SchedulerConfig,
    items: Vec<Item>,
    index: HashMap<String, usize>,
    progress: Vec<ItemProgress>,
    window: Vec<usize>,
    recent: VecDeque<usize>,
    answers: Vec<AnswerRecord>,
    clock: u64,
    rng: StdRng,
}

impl SessionScheduler {
    pub fn new(items: Vec<Item>, config: SchedulerConfig, rng: StdRng) -> Result<Self> {
        config.validate()?;
        let mut index = HashMap::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            if index.insert(item.id.clone(), i).is_some() {
                return DuplicateItemSnafu { id: item.id.clone() }.fail();
            }
        }
        let mut scheduler = Self {
            config,
            progress: vec![ItemProgress::default(); items.len()],
            items,
            index,
            window: Vec::with_capacity(config.window_capacity),
            recent: VecDeque::with_capacity(config.repeat_spacing + 1),
            answers: vec![],
            clock: 0,
            rng,
        };
        scheduler.refill_window();
        info!(
            "session scheduler ready: {} items, window {}/{}",
            scheduler.items.len(),
            scheduler.window.len(),
            config.window_capacity
        );
        Ok(scheduler)
    }

    /// Starts a session over one catalog category, shuffled once with `rng`.
    pub fn for_category(
        catalog: &Catalog,
        category: Category,
        config: SchedulerConfig,
        mut rng: StdRng,
    ) -> Result<Self> {
        let items = shuffled(&catalog.list_items(category), &mut rng);
        info!("starting {category} session");
        Self::new(items, config, rng)
    }

    fn is_mastered(&self, index: usize) -> bool {
        self.progress[index].is_mastered(self.config.mastery_threshold)
    }

    fn refill_window(&mut self) {
        if self.window.len() >= self.config.window_capacity {
            return;
        }
        // Least recently presented first, then session order.
        let mut candidates: PriorityQueue<usize, Reverse<(u64, usize)>> = (0..self.items.len())
            .filter(|&i| !self.is_mastered(i) && !self.window.contains(&i))
            .map(|i| (i, Reverse((self.progress[i].last_presented_at, i))))
            .collect();
        while self.window.len() < self.config.window_capacity {
            let Some((next, _)) = candidates.pop() else {
                break;
            };
            self.window.push(next);
        }
        debug!(
            "window refilled: [{}]",
            self.window.iter().map(|&i| self.items[i].id()).join(", ")
        );
    }

    /// Picks the next item to present, or `None` once nothing is left in rotation.
    pub fn next_item(&mut self) -> Option<&Item> {
        if self.window.is_empty() {
            debug!("window is empty, nothing to present");
            return None;
        }
        let fresh = self
            .window
            .iter()
            .copied()
            .filter(|i| !self.recent.contains(i))
            .collect_vec();
        let candidates = if fresh.is_empty() {
            debug!("every window item was shown recently, falling back to the whole window");
            self.window.clone()
        } else {
            fresh
        };
        let chosen = *pick(&candidates, &mut self.rng)?;

        self.clock += 1;
        self.progress[chosen].last_presented_at = self.clock;
        if self.config.repeat_spacing > 0 {
            self.recent.push_back(chosen);
            while self.recent.len() > self.config.repeat_spacing {
                self.recent.pop_front();
            }
        }
        debug!(
            "selected [{}] | candidates: {} | history: [{}]",
            self.items[chosen].id(),
            candidates.len(),
            self.recent_history().join(", ")
        );
        Some(&self.items[chosen])
    }

    /// Reports the learner's answer for an item previously handed out by `next_item`.
    pub fn record_answer(&mut self, item_id: &str, is_correct: bool) -> Result<AnswerOutcome> {
        let Some(&index) = self.index.get(item_id) else {
            warn!("answer reported for unknown item {item_id}");
            return UnknownItemSnafu { id: item_id }.fail();
        };
        if self.is_mastered(index) {
            debug!("ignoring answer for mastered item {item_id}");
            return Ok(AnswerOutcome::AlreadyMastered);
        }

        let threshold = self.config.mastery_threshold;
        let progress = &mut self.progress[index];
        let before = progress.consecutive_correct;
        let outcome = if is_correct {
            progress.consecutive_correct += 1;
            if progress.is_mastered(threshold) {
                AnswerOutcome::Mastered
            } else {
                AnswerOutcome::Progressed {
                    streak: progress.consecutive_correct,
                }
            }
        } else {
            progress.consecutive_correct = 0;
            AnswerOutcome::Reset
        };
        let after = progress.consecutive_correct;
        debug!("progress of {item_id}: {before} -> {after}/{threshold}");

        self.answers.push(AnswerRecord {
            item_id: item_id.to_owned(),
            is_correct,
            sequence: self.answers.len() as u64 + 1,
        });

        if outcome == AnswerOutcome::Mastered {
            info!("item {item_id} mastered");
            self.window.retain(|&i| i != index);
            self.refill_window();
        }
        Ok(outcome)
    }

    /// True once every item of the session is mastered, regardless of the window.
    pub fn is_complete(&self) -> bool {
        (0..self.items.len()).all(|i| self.is_mastered(i))
    }

    pub fn stats(&self) -> SessionStats {
        SessionStats::collect(
            self.progress.iter().map(|p| p.consecutive_correct),
            self.answers.iter(),
            self.config.mastery_threshold,
        )
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// All session items in session order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn item(&self, item_id: &str) -> Option<&Item> {
        self.index.get(item_id).map(|&i| &self.items[i])
    }

    pub fn progress(&self, item_id: &str) -> Option<ItemProgress> {
        self.index.get(item_id).map(|&i| self.progress[i])
    }

    /// Ids currently in rotation, in insertion order.
    pub fn window(&self) -> Vec<&str> {
        self.window.iter().map(|&i| self.items[i].id()).collect()
    }

    /// Most recent presentations, oldest first.
    pub fn recent_history(&self) -> Vec<&str> {
        self.recent.iter().map(|&i| self.items[i].id()).collect()
    }

    pub fn answer_log(&self) -> &[AnswerRecord] {
        &self.answers
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::Rng;

    use super::*;
    use crate::error::DrillError;
    use crate::sampling::session_rng;
    use crate::test_helpers::{TestHelper, letters, scheduler};

    fn config(
        mastery_threshold: u32,
        window_capacity: usize,
        repeat_spacing: usize,
    ) -> SchedulerConfig {
        SchedulerConfig {
            mastery_threshold,
            window_capacity,
            repeat_spacing,
        }
    }

    #[test]
    fn answering_everything_correctly_completes_the_session() -> Result<()> {
        let mut scheduler = scheduler(5, config(3, 5, 3), 42)?;
        assert!(!scheduler.is_complete());
        let asked = scheduler.drain_correct()?;
        assert_eq!(asked, 15);
        assert!(scheduler.is_complete());
        assert!(scheduler.next_item().is_none());
        let stats = scheduler.stats();
        assert_eq!(stats.mastered, 5);
        assert_eq!(stats.remaining, 0);
        assert_eq!(stats.answered, 15);
        assert_eq!(stats.accuracy_percent, 100);
        assert_eq!(stats.progress_percent, 100);
        Ok(())
    }

    #[test]
    fn a_miss_resets_the_streak() -> Result<()> {
        let mut scheduler = scheduler(1, config(3, 5, 3), 1)?;
        let script = [
            (true, AnswerOutcome::Progressed { streak: 1 }),
            (true, AnswerOutcome::Progressed { streak: 2 }),
            (false, AnswerOutcome::Reset),
            (true, AnswerOutcome::Progressed { streak: 1 }),
            (true, AnswerOutcome::Progressed { streak: 2 }),
            (true, AnswerOutcome::Mastered),
        ];
        for (is_correct, expected) in script {
            assert!(!scheduler.is_complete());
            let id = scheduler.next_item().map(|item| item.id.clone()).unwrap();
            assert_eq!(id, "i0");
            assert_eq!(scheduler.record_answer(&id, is_correct)?, expected);
        }
        assert!(scheduler.is_complete());
        assert_eq!(scheduler.stats().correct, 5);
        assert_eq!(scheduler.stats().accuracy_percent, 83);
        Ok(())
    }

    #[test]
    fn initial_window_takes_the_first_items_in_session_order() -> Result<()> {
        let scheduler = scheduler(5, config(3, 2, 3), 7)?;
        assert_eq!(scheduler.window(), ["i0", "i1"]);
        for id in scheduler.window() {
            assert_eq!(scheduler.progress(id).unwrap().last_presented_at, 0);
        }
        Ok(())
    }

    #[test]
    fn spacing_avoids_recent_items_when_the_window_allows_it() -> Result<()> {
        let mut scheduler = scheduler(4, config(3, 4, 3), 11)?;
        let ids: Vec<String> = (0..4)
            .map(|_| scheduler.next_item().unwrap().id.clone())
            .collect();
        assert_eq!(ids.iter().unique().count(), 4);
        // The only item outside the last three is the first one.
        assert_eq!(scheduler.next_item().unwrap().id, ids[0]);
        Ok(())
    }

    #[test]
    fn falls_back_to_the_whole_window_when_everything_is_recent() -> Result<()> {
        let mut scheduler = scheduler(2, config(3, 2, 3), 5)?;
        let first = scheduler.next_item().unwrap().id.clone();
        let second = scheduler.next_item().unwrap().id.clone();
        assert_ne!(first, second);
        assert_eq!(scheduler.recent_history(), [first.as_str(), second.as_str()]);
        let third = scheduler.next_item().unwrap().id.clone();
        assert!(third == first || third == second);
        assert_eq!(scheduler.recent_history().len(), 3);
        Ok(())
    }

    #[test]
    fn unknown_item_is_a_caller_error() -> Result<()> {
        let mut scheduler = scheduler(3, SchedulerConfig::default(), 0)?;
        assert_eq!(
            scheduler.record_answer("nonexistent-id", true),
            Err(DrillError::UnknownItem {
                id: "nonexistent-id".into()
            })
        );
        assert!(scheduler.answer_log().is_empty());
        Ok(())
    }

    #[test]
    fn mastery_is_permanent() -> Result<()> {
        let mut scheduler = scheduler(3, config(2, 3, 0), 3)?;
        scheduler.record_answer("i1", true)?;
        assert_eq!(scheduler.record_answer("i1", true)?, AnswerOutcome::Mastered);
        assert_eq!(scheduler.window(), ["i0", "i2"]);

        let logged = scheduler.answer_log().len();
        assert_eq!(
            scheduler.record_answer("i1", false)?,
            AnswerOutcome::AlreadyMastered
        );
        assert_eq!(scheduler.answer_log().len(), logged);
        assert_eq!(scheduler.progress("i1").unwrap().consecutive_correct, 2);

        for _ in 0..50 {
            assert_ne!(scheduler.next_item().unwrap().id, "i1");
        }
        Ok(())
    }

    #[test]
    fn mastered_items_are_replaced_in_session_order() -> Result<()> {
        let mut scheduler = scheduler(4, config(1, 2, 0), 9)?;
        assert_eq!(scheduler.window(), ["i0", "i1"]);
        scheduler.record_answer("i0", true)?;
        assert_eq!(scheduler.window(), ["i1", "i2"]);
        scheduler.record_answer("i2", true)?;
        assert_eq!(scheduler.window(), ["i1", "i3"]);
        scheduler.record_answer("i1", true)?;
        assert_eq!(scheduler.window(), ["i3"]);
        scheduler.record_answer("i3", true)?;
        assert!(scheduler.window().is_empty());
        assert!(scheduler.is_complete());
        assert!(scheduler.next_item().is_none());
        Ok(())
    }

    #[test]
    fn presentation_clock_is_strictly_increasing() -> Result<()> {
        let mut scheduler = scheduler(6, config(3, 6, 2), 21)?;
        let mut last = 0;
        for _ in 0..30 {
            let id = scheduler.next_item().unwrap().id.clone();
            let stamp = scheduler.progress(&id).unwrap().last_presented_at;
            assert!(stamp > last);
            last = stamp;
        }
        Ok(())
    }

    #[test]
    fn no_repeats_within_the_spacing_window() -> Result<()> {
        const SPACING: usize = 5;
        let mut scheduler = scheduler(20, config(3, 10, SPACING), 2024)?;
        let mut answers = session_rng(Some(2025));
        let mut shown: Vec<String> = vec![];
        loop {
            let window_len = scheduler.window().len();
            let Some(id) = scheduler.next_item().map(|item| item.id.clone()) else {
                break;
            };
            if window_len > SPACING {
                let start = shown.len().saturating_sub(SPACING);
                assert!(!shown[start..].contains(&id), "{id} repeated within {SPACING}");
            }
            shown.push(id.clone());
            scheduler.record_answer(&id, answers.random_bool(0.8))?;
        }
        assert!(scheduler.is_complete());
        Ok(())
    }

    #[test]
    fn random_play_keeps_the_invariants() -> Result<()> {
        let config = config(3, 4, 2);
        let mut scheduler = scheduler(12, config, 99)?;
        let mut answers = session_rng(Some(100));
        let mut streaks: HashMap<String, u32> = HashMap::new();
        let mut mastered: HashSet<String> = HashSet::new();

        for _ in 0..10_000 {
            assert!(scheduler.window().len() <= config.window_capacity);
            assert_eq!(scheduler.is_complete(), mastered.len() == 12);
            let Some(id) = scheduler.next_item().map(|item| item.id.clone()) else {
                break;
            };
            assert!(!mastered.contains(&id));
            let is_correct = answers.random_bool(0.6);
            scheduler.record_answer(&id, is_correct)?;

            let streak = streaks.entry(id.clone()).or_default();
            *streak = if is_correct { *streak + 1 } else { 0 };
            assert_eq!(scheduler.progress(&id).unwrap().consecutive_correct, *streak);
            if *streak == config.mastery_threshold {
                mastered.insert(id);
            }
        }
        assert!(scheduler.is_complete());
        let stats = scheduler.stats();
        assert_eq!(stats.mastered, 12);
        assert_eq!(stats.answered, scheduler.answer_log().len());
        Ok(())
    }

    #[test]
    fn construction_rejects_bad_input() {
        assert!(matches!(
            scheduler(3, config(0, 5, 3), 0),
            Err(DrillError::InvalidConfig { .. })
        ));
        assert!(matches!(
            scheduler(3, config(3, 0, 3), 0),
            Err(DrillError::InvalidConfig { .. })
        ));
        let mut items = letters(2);
        items.push(items[0].clone());
        assert_eq!(
            SessionScheduler::new(items, SchedulerConfig::default(), session_rng(Some(0)))
                .unwrap_err(),
            DrillError::DuplicateItem { id: "i0".into() }
        );
    }

    #[test]
    fn empty_session_is_complete_from_the_start() -> Result<()> {
        let mut scheduler = scheduler(0, SchedulerConfig::default(), 0)?;
        assert!(scheduler.is_complete());
        assert!(scheduler.next_item().is_none());
        assert_eq!(scheduler.stats(), SessionStats::default());
        Ok(())
    }

    #[test]
    fn category_sessions_cover_the_whole_category() -> Result<()> {
        let catalog = Catalog::georgian();
        let scheduler = SessionScheduler::for_category(
            &catalog,
            Category::Letters,
            SchedulerConfig::default(),
            session_rng(Some(4)),
        )?;
        assert_eq!(scheduler.items().len(), 33);
        assert_eq!(scheduler.window().len(), DEFAULT_WINDOW_CAPACITY);
        assert_eq!(scheduler.item("l1").unwrap().target_text(), "а");
        assert_ne!(scheduler.items(), catalog.letters());
        Ok(())
    }
}
