use serde::Serialize;

/// One entry of the append-only answer log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerRecord {
    pub item_id: String,
    pub is_correct: bool,
    /// 1-based position in the log.
    pub sequence: u64,
}

/// Snapshot of a session, recomputed on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SessionStats {
    pub total: usize,
    pub mastered: usize,
    pub remaining: usize,
    pub answered: usize,
    pub correct: usize,
    /// round(100 * correct / answered), 0 before the first answer.
    pub accuracy_percent: u32,
    /// Share of all streak points earned so far, capped per item at the mastery threshold.
    pub progress_percent: u32,
}

/// Percentage rounded half up, 0 when `whole` is 0.
pub(crate) fn rounded_percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((200 * part as u64 + whole as u64) / (2 * whole as u64)) as u32
}

impl SessionStats {
    pub(crate) fn collect<'a>(
        streaks: impl Iterator<Item = u32>,
        answers: impl Iterator<Item = &'a AnswerRecord>,
        mastery_threshold: u32,
    ) -> Self {
        let (mut total, mut mastered, mut points) = (0, 0, 0);
        for streak in streaks {
            total += 1;
            if streak >= mastery_threshold {
                mastered += 1;
            }
            points += streak.min(mastery_threshold) as usize;
        }
        let (mut answered, mut correct) = (0, 0);
        for answer in answers {
            answered += 1;
            correct += answer.is_correct as usize;
        }
        Self {
            total,
            mastered,
            remaining: total - mastered,
            answered,
            correct,
            accuracy_percent: rounded_percent(correct, answered),
            progress_percent: rounded_percent(points, total * mastery_threshold as usize),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.remaining == 0
    }
}
