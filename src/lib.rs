mod advance;
mod catalog;
mod dataset;
mod drill;
mod error;
mod question;
mod sampling;
mod scheduler;
mod stats;
#[cfg(test)]
mod test_helpers;

pub use advance::{AdvanceToken, AutoAdvance, DEFAULT_ADVANCE_DELAY};
pub use catalog::{Catalog, Category};
pub use dataset::{Entry, Item, ItemKind};
pub use drill::{Drill, Feedback, Step};
pub use error::{DrillError, Result};
pub use question::{Question, QuestionContext, QuestionTemplate, Response};
pub use sampling::{pick, sample_distinct, session_rng, shuffled};
pub use scheduler::{
    AnswerOutcome, DEFAULT_MASTERY_THRESHOLD, DEFAULT_REPEAT_SPACING, DEFAULT_WINDOW_CAPACITY,
    ItemProgress, SchedulerConfig, SessionScheduler,
};
pub use stats::{AnswerRecord, SessionStats};
