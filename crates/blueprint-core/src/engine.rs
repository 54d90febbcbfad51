use crate::answer::{AnswerRecord, StageAnswers};
use crate::catalog::{self, StageDefinition};
use crate::error::{BlueprintError, Result};
use crate::project::Project;
use crate::sequencer;
use crate::store::ProjectStore;
use crate::types::{Phase, ProjectStatus, Stage};
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

/// Shown in the summary for a question with no recorded answer.
pub const UNANSWERED: &str = "—";

/// The phase a successful lock moves the project to.
pub const LOCKED_PHASE: Phase = Phase::BlueprintGeneration;

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowState {
    pub current_stage: Option<Stage>,
    pub next_stage_index: usize,
    pub total_stages: usize,
    pub progress_percent: u8,
    pub is_completed: bool,
    pub answers_so_far: AnswerRecord,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryItem {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageSummary {
    pub title: &'static str,
    pub key: Stage,
    pub items: Vec<SummaryItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LockReceipt {
    pub status: &'static str,
    pub next_phase: Phase,
    /// True when the project was already locked and nothing changed.
    pub already_locked: bool,
}

// ---------------------------------------------------------------------------
// FlowEngine
// ---------------------------------------------------------------------------

/// Drives the requirements wizard for one project.
///
/// Every read is computed from the project's live answer record; every
/// mutation builds the complete next project, hands it to
/// [`ProjectStore::save`], and is adopted only once the save succeeded.
pub struct FlowEngine<'s, S: ProjectStore + ?Sized> {
    store: &'s S,
    project: Project,
}

impl<'s, S: ProjectStore + ?Sized> FlowEngine<'s, S> {
    pub fn new(store: &'s S, project: Project) -> Self {
        Self { store, project }
    }

    /// Load the project fresh from the store and bind an engine to it.
    pub fn open(store: &'s S, id: &Uuid, owner: &str) -> Result<Self> {
        let project = store.load(id, owner)?;
        Ok(Self::new(store, project))
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn into_project(self) -> Project {
        self.project
    }

    pub fn current_state(&self) -> FlowState {
        let progress = sequencer::progress(&self.project.answers);
        FlowState {
            current_stage: progress.current_stage,
            next_stage_index: progress.completed,
            total_stages: progress.total,
            progress_percent: progress.percent,
            is_completed: progress.is_complete,
            answers_so_far: self.project.answers.clone(),
        }
    }

    /// Catalog entry for the stage to answer next, `None` once complete.
    pub fn current_questions(&self) -> Option<&'static StageDefinition> {
        sequencer::progress(&self.project.answers)
            .current_stage
            .map(catalog::definition)
    }

    /// Record `data` as the full answer for `stage`.
    ///
    /// Skipping ahead is the only rejected case: the stage is not the current
    /// one, the wizard is not complete, and the stage has never been answered.
    /// Editing an answered stage and answering after completion always succeed.
    pub fn submit_answer(&mut self, stage: Stage, data: StageAnswers) -> Result<FlowState> {
        let progress = sequencer::progress(&self.project.answers);
        if let Some(current) = progress.current_stage {
            if stage != current && !self.project.answers.contains(stage) {
                return Err(BlueprintError::SequenceViolation {
                    stage: stage.to_string(),
                    required: current.to_string(),
                });
            }
        }

        let mut next = self.project.clone();
        next.answers.insert(stage, data);
        if next.status == ProjectStatus::Draft {
            next.set_status(ProjectStatus::InProgress);
        } else {
            next.updated_at = Utc::now();
        }

        self.store.save(&next)?;
        self.project = next;
        Ok(self.current_state())
    }

    pub fn summary(&self) -> Vec<StageSummary> {
        catalog::all()
            .iter()
            .map(|def| {
                let answers = self.project.answers.get(def.stage);
                let items = def
                    .questions
                    .iter()
                    .map(|q| SummaryItem {
                        label: q.text,
                        value: answers
                            .and_then(|a| a.get(q.id))
                            .map(|v| v.display())
                            .unwrap_or_else(|| UNANSWERED.to_string()),
                    })
                    .collect();
                StageSummary {
                    title: def.title,
                    key: def.stage,
                    items,
                }
            })
            .collect()
    }

    /// Freeze the requirements and hand the project to blueprint generation.
    ///
    /// Locking an already locked project is a no-op that reports
    /// `already_locked` instead of failing.
    pub fn lock_requirements(&mut self) -> Result<LockReceipt> {
        if !sequencer::progress(&self.project.answers).is_complete {
            return Err(BlueprintError::NotReady);
        }
        if self.project.is_locked() {
            return Ok(LockReceipt {
                status: "locked",
                next_phase: LOCKED_PHASE,
                already_locked: true,
            });
        }

        let mut next = self.project.clone();
        next.advance_phase(LOCKED_PHASE)?;
        next.set_status(ProjectStatus::Architecting);

        self.store.save(&next)?;
        self.project = next;
        Ok(LockReceipt {
            status: "locked",
            next_phase: LOCKED_PHASE,
            already_locked: false,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
