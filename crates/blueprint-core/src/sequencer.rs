use crate::answer::AnswerRecord;
use crate::types::Stage;
use serde::Serialize;

/// Where a project stands in the stage sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    /// Stages complete contiguously from the first one. An answered stage
    /// after a gap does not count.
    pub completed: usize,
    pub total: usize,
    /// First incomplete stage, `None` once every stage is answered.
    pub current_stage: Option<Stage>,
    pub percent: u8,
    pub is_complete: bool,
}

/// Scan the stages in order against the live answer record.
pub fn progress(answers: &AnswerRecord) -> Progress {
    let stages = Stage::all();
    let total = stages.len();
    let current_stage = stages.iter().copied().find(|s| !answers.contains(*s));
    let completed = current_stage.map_or(total, Stage::index);

    Progress {
        completed,
        total,
        current_stage,
        percent: (completed * 100 / total) as u8,
        is_complete: completed == total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answer::StageAnswers;

    fn record(stages: &[Stage]) -> AnswerRecord {
        let mut r = AnswerRecord::new();
        for s in stages {
            r.insert(*s, StageAnswers::new());
        }
        r
    }

    #[test]
    fn empty_record_starts_at_intent() {
        let p = progress(&AnswerRecord::new());
        assert_eq!(p.completed, 0);
        assert_eq!(p.current_stage, Some(Stage::Intent));
        assert_eq!(p.percent, 0);
        assert!(!p.is_complete);
    }

    #[test]
    fn percent_is_floored_per_stage() {
        let stages = Stage::all();
        for k in 0..=stages.len() {
            let p = progress(&record(&stages[..k]));
            assert_eq!(p.completed, k);
            assert_eq!(p.percent as usize, 100 * k / 5);
            assert_eq!(p.is_complete, k == 5);
            assert_eq!(p.current_stage, stages.get(k).copied());
        }
    }

    #[test]
    fn gap_stops_the_count() {
        let p = progress(&record(&[Stage::Intent, Stage::UiUx, Stage::Quality]));
        assert_eq!(p.completed, 1);
        assert_eq!(p.current_stage, Some(Stage::Platform));
        assert_eq!(p.percent, 20);
        assert!(!p.is_complete);
    }

    #[test]
    fn all_answered_is_complete() {
        let p = progress(&record(Stage::all()));
        assert!(p.is_complete);
        assert_eq!(p.current_stage, None);
        assert_eq!(p.percent, 100);
    }
}
