//! Revision plan: the sentence sequence cut into balanced daily chunks.

use crate::types::{Sentence, StudyPlanDay};

/// Checklist attached to every day
pub const DAY_TIPS: &str = "- Spend 10 min on the quiz\n- Redo the flashcards\n- Write down 3 key points";

/// Split `sentences` into at most `total_days` contiguous chunks of
/// `ceil(n / total_days)` sentences.
///
/// Fewer days come back when there are fewer sentences than days; no day
/// is ever empty. `total_days = 0` is treated as one day.
pub fn build_plan(
    sentences: &[Sentence],
    total_days: usize,
    daily_minutes: usize,
) -> Vec<StudyPlanDay> {
    let n = sentences.len();
    if n == 0 {
        return Vec::new();
    }
    let days = total_days.max(1);
    let chunk = n.div_ceil(days);

    let mut plan = Vec::with_capacity(days.min(n));
    for day in 0..days {
        let start = day * chunk;
        let end = ((day + 1) * chunk).min(n);
        if start >= end {
            break;
        }
        plan.push(StudyPlanDay {
            day_label: format!("Day {}", day + 1),
            objective: format!("Review {} sentences (~{daily_minutes} min)", end - start),
            tips: DAY_TIPS.to_string(),
            start,
            end,
        });
    }
    plan
}
