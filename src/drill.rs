use std::time::{Duration, Instant};

use log::{debug, info};
use rand::{SeedableRng, rngs::StdRng};

use crate::advance::{AdvanceToken, AutoAdvance};
use crate::catalog::{Catalog, Category};
use crate::dataset::Item;
use crate::error::{NoPendingQuestionSnafu, Result};
use crate::question::{Question, QuestionContext};
use crate::sampling::session_rng;
use crate::scheduler::{AnswerOutcome, SchedulerConfig, SessionScheduler};
use crate::stats::SessionStats;

/// What the presentation layer should show next.
#[derive(Debug, PartialEq)]
pub enum Step<'a> {
    Question(&'a Question),
    Finished(SessionStats),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub is_correct: bool,
    pub expected: String,
    pub outcome: AnswerOutcome,
    /// Set after a correct answer: the next question follows automatically once it fires.
    pub auto_advance: Option<AdvanceToken>,
}

/// One learning session: scheduler, question construction and auto-advance behind a single
/// owner. Dropping it ends the session.
#[derive(Debug)]
pub struct Drill {
    category: Category,
    scheduler: SessionScheduler,
    letters: Vec<Item>,
    practice_words: Vec<Item>,
    rng: StdRng,
    current: Option<Question>,
    answered: bool,
    advance: AutoAdvance,
}

impl Drill {
    /// Starts a session. With a seed, item order, template choice and distractors are reproducible.
    pub fn start(
        catalog: &Catalog,
        category: Category,
        config: SchedulerConfig,
        seed: Option<u64>,
    ) -> Result<Self> {
        let mut rng = session_rng(seed);
        let question_rng = StdRng::from_rng(&mut rng);
        let scheduler = SessionScheduler::for_category(catalog, category, config, rng)?;
        info!(
            "session started: {category}, {} items",
            scheduler.items().len()
        );
        Ok(Self {
            category,
            scheduler,
            letters: catalog.letters().to_vec(),
            practice_words: catalog.practice_words().to_vec(),
            rng: question_rng,
            current: None,
            answered: false,
            advance: AutoAdvance::default(),
        })
    }

    pub fn with_advance_delay(mut self, delay: Duration) -> Self {
        self.advance = AutoAdvance::new(delay);
        self
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn scheduler(&self) -> &SessionScheduler {
        &self.scheduler
    }

    pub fn stats(&self) -> SessionStats {
        self.scheduler.stats()
    }

    pub fn is_complete(&self) -> bool {
        self.scheduler.is_complete()
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.current.as_ref()
    }

    /// Moves on to the next question, cancelling any pending auto-advance.
    pub fn next_question(&mut self) -> Result<Step<'_>> {
        if let Some(token) = self.advance.cancel() {
            debug!("pending auto-advance {token:?} cancelled");
        }
        self.current = None;
        if self.scheduler.is_complete() {
            let stats = self.scheduler.stats();
            info!("session finished: {stats:?}");
            return Ok(Step::Finished(stats));
        }
        let Some(item) = self.scheduler.next_item().cloned() else {
            let stats = self.scheduler.stats();
            info!("no item left to present: {stats:?}");
            return Ok(Step::Finished(stats));
        };

        let context = QuestionContext {
            pool: self.scheduler.items(),
            letters: &self.letters,
            practice_words: &self.practice_words,
        };
        let template = context.choose_template(item.kind(), &mut self.rng);
        let question = context.build(&item, template, &mut self.rng)?;
        debug!(
            "question shown: {} via {template}, expecting {:?}",
            item.id, question.expected
        );
        self.answered = false;
        Ok(Step::Question(self.current.insert(question)))
    }

    /// Checks a typed or chosen answer for the open question.
    pub fn submit(&mut self, answer: &str, now: Instant) -> Result<Feedback> {
        self.answer_with(now, |question| question.check(answer))
    }

    /// Checks assembled tiles for the open question.
    pub fn submit_tiles<S: AsRef<str>>(&mut self, tiles: &[S], now: Instant) -> Result<Feedback> {
        self.answer_with(now, |question| question.check_assembly(tiles))
    }

    fn answer_with(
        &mut self,
        now: Instant,
        check: impl FnOnce(&Question) -> bool,
    ) -> Result<Feedback> {
        let question = match &self.current {
            Some(question) if !self.answered => question,
            _ => return NoPendingQuestionSnafu.fail(),
        };
        let is_correct = check(question);
        let outcome = self.scheduler.record_answer(&question.item_id, is_correct)?;
        self.answered = true;
        debug!(
            "{} answer for {}: {outcome:?}",
            if is_correct { "correct" } else { "incorrect" },
            question.item_id
        );
        let auto_advance = is_correct.then(|| self.advance.schedule(now));
        Ok(Feedback {
            is_correct,
            expected: question.expected.clone(),
            outcome,
            auto_advance,
        })
    }

    /// Returns true when a pending auto-advance fired; the caller then asks for the next question.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.advance.poll(now).is_some()
    }

    /// Ends the session and hands back the final numbers.
    pub fn finish(self) -> SessionStats {
        let stats = self.scheduler.stats();
        info!("session ended: {stats:?}");
        stats
    }
}
