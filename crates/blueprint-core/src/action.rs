use crate::project::Project;
use crate::sequencer;
use crate::types::Phase;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// NextAction
// ---------------------------------------------------------------------------

/// The single thing a user should do next with a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NextAction {
    StartPlanning,
    ResumeQuestions,
    ReviewAndLock,
    GenerateBlueprint,
    ViewBlueprint,
}

impl NextAction {
    pub fn as_str(self) -> &'static str {
        match self {
            NextAction::StartPlanning => "start_planning",
            NextAction::ResumeQuestions => "resume_questions",
            NextAction::ReviewAndLock => "review_and_lock",
            NextAction::GenerateBlueprint => "generate_blueprint",
            NextAction::ViewBlueprint => "view_blueprint",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            NextAction::StartPlanning => "Start Planning",
            NextAction::ResumeQuestions => "Resume Questions",
            NextAction::ReviewAndLock => "Review & Lock Requirements",
            NextAction::GenerateBlueprint => "Generate Blueprint",
            NextAction::ViewBlueprint => "View Blueprint",
        }
    }

    pub fn for_project(project: &Project) -> Self {
        if project.phase >= Phase::ExecutionGuide {
            return NextAction::ViewBlueprint;
        }
        if project.is_locked() {
            return NextAction::GenerateBlueprint;
        }
        if project.answers.is_empty() {
            return NextAction::StartPlanning;
        }
        if sequencer::progress(&project.answers).is_complete {
            NextAction::ReviewAndLock
        } else {
            NextAction::ResumeQuestions
        }
    }
}

impl fmt::Display for NextAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wire form: `{"action": "...", "label": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionHint {
    pub action: NextAction,
    pub label: &'static str,
}

impl From<NextAction> for ActionHint {
    fn from(action: NextAction) -> Self {
        Self {
            action,
            label: action.label(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answer::StageAnswers;
    use crate::types::Stage;

    #[test]
    fn action_follows_lifecycle() {
        let mut p = Project::new("alice", "Taxi", None);
        assert_eq!(NextAction::for_project(&p), NextAction::StartPlanning);

        p.answers.insert(Stage::Intent, StageAnswers::new());
        assert_eq!(NextAction::for_project(&p), NextAction::ResumeQuestions);

        for stage in Stage::all() {
            p.answers.insert(*stage, StageAnswers::new());
        }
        assert_eq!(NextAction::for_project(&p), NextAction::ReviewAndLock);

        p.advance_phase(Phase::BlueprintGeneration).unwrap();
        assert_eq!(NextAction::for_project(&p), NextAction::GenerateBlueprint);

        p.record_blueprint(serde_json::json!({"overview": "x"})).unwrap();
        assert_eq!(NextAction::for_project(&p), NextAction::ViewBlueprint);
    }

    #[test]
    fn out_of_order_answers_resume() {
        let mut p = Project::new("alice", "Taxi", None);
        p.answers.insert(Stage::Quality, StageAnswers::new());
        assert_eq!(NextAction::for_project(&p), NextAction::ResumeQuestions);
    }

    #[test]
    fn hint_serializes_with_label() {
        let hint = ActionHint::from(NextAction::ReviewAndLock);
        let json = serde_json::to_value(&hint).unwrap();
        assert_eq!(json["action"], "review_and_lock");
        assert_eq!(json["label"], "Review & Lock Requirements");
    }
}
