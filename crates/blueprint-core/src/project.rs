use crate::answer::AnswerRecord;
use crate::error::{BlueprintError, Result};
use crate::types::{Phase, ProjectStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// PhaseTransition
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseTransition {
    pub phase: Phase,
    pub entered: DateTime<Utc>,
    pub exited: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// Project
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub owner: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub phase: Phase,
    #[serde(default)]
    pub answers: AnswerRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blueprint: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub phase_history: Vec<PhaseTransition>,
}

impl Project {
    pub fn new(
        owner: impl Into<String>,
        name: impl Into<String>,
        description: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner: owner.into(),
            name: name.into(),
            description,
            status: ProjectStatus::Draft,
            phase: Phase::EnvironmentSetup,
            answers: AnswerRecord::new(),
            blueprint: None,
            documentation: None,
            created_at: now,
            updated_at: now,
            phase_history: vec![PhaseTransition {
                phase: Phase::EnvironmentSetup,
                entered: now,
                exited: None,
            }],
        }
    }

    /// A fresh draft copy under `owner`: new id, reset status and phase,
    /// answers and artifacts carried over.
    pub fn duplicate(&self, owner: impl Into<String>) -> Self {
        let mut copy = Self::new(
            owner,
            format!("Copy of {}", self.name),
            self.description.clone(),
        );
        copy.answers = self.answers.clone();
        copy.blueprint = self.blueprint.clone();
        copy.documentation = self.documentation.clone();
        copy
    }

    /// Requirements are frozen once the project reaches blueprint generation.
    pub fn is_locked(&self) -> bool {
        self.phase >= Phase::BlueprintGeneration
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Move to `target`, closing the open history entry. Forward-only.
    pub(crate) fn advance_phase(&mut self, target: Phase) -> Result<()> {
        if target <= self.phase {
            return Err(BlueprintError::InvalidTransition {
                from: self.phase.to_string(),
                to: target.to_string(),
                reason: "phases only move forward".to_string(),
            });
        }

        let now = Utc::now();
        if let Some(last) = self.phase_history.last_mut() {
            last.exited = Some(now);
        }
        self.phase = target;
        self.updated_at = now;
        self.phase_history.push(PhaseTransition {
            phase: target,
            entered: now,
            exited: None,
        });
        Ok(())
    }

    pub(crate) fn set_status(&mut self, status: ProjectStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }

    // -----------------------------------------------------------------------
    // Downstream artifacts
    // -----------------------------------------------------------------------

    /// Store a generated blueprint. The requirements must be locked first.
    pub fn record_blueprint(&mut self, blueprint: serde_json::Value) -> Result<()> {
        if !self.is_locked() {
            return Err(BlueprintError::InvalidTransition {
                from: self.phase.to_string(),
                to: Phase::ExecutionGuide.to_string(),
                reason: "requirements must be locked before a blueprint is recorded".to_string(),
            });
        }
        if !blueprint.is_object() {
            return Err(BlueprintError::InvalidBlueprint(
                "blueprint must be a JSON object".to_string(),
            ));
        }

        self.blueprint = Some(blueprint);
        if self.phase < Phase::ExecutionGuide {
            self.advance_phase(Phase::ExecutionGuide)?;
        }
        self.set_status(ProjectStatus::BlueprintReady);
        Ok(())
    }

    pub fn record_documentation(&mut self, markdown: impl Into<String>) -> Result<()> {
        if self.blueprint.is_none() {
            return Err(BlueprintError::InvalidTransition {
                from: self.phase.to_string(),
                to: self.phase.to_string(),
                reason: "documentation needs a blueprint".to_string(),
            });
        }
        self.documentation = Some(markdown.into());
        self.updated_at = Utc::now();
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Metadata mutations
    // -----------------------------------------------------------------------

    /// Rename and/or re-describe. An empty description clears it; an empty
    /// name is rejected and leaves the project untouched.
    pub fn update_details(
        &mut self,
        name: Option<String>,
        description: Option<String>,
    ) -> Result<()> {
        if let Some(name) = name {
            let name = name.trim();
            if name.is_empty() {
                return Err(BlueprintError::EmptyName);
            }
            self.name = name.to_string();
        }
        if let Some(description) = description {
            self.description = if description.is_empty() {
                None
            } else {
                Some(description)
            };
        }
        self.updated_at = Utc::now();
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answer::StageAnswers;
    use crate::types::Stage;

    fn locked_project() -> Project {
        let mut p = Project::new("alice", "Taxi", None);
        p.advance_phase(Phase::BlueprintGeneration).unwrap();
        p.set_status(ProjectStatus::Architecting);
        p
    }

    #[test]
    fn new_project_is_draft_at_phase_zero() {
        let p = Project::new("alice", "Taxi", Some("rides".to_string()));
        assert_eq!(p.status, ProjectStatus::Draft);
        assert_eq!(p.phase, Phase::EnvironmentSetup);
        assert!(p.answers.is_empty());
        assert!(!p.is_locked());
        assert_eq!(p.phase_history.len(), 1);
    }

    #[test]
    fn yaml_roundtrip() {
        let mut p = Project::new("alice", "Taxi", None);
        p.answers.insert(Stage::Intent, StageAnswers::new());
        let yaml = serde_yaml::to_string(&p).unwrap();
        assert!(yaml.contains("phase: 0"));
        assert!(yaml.contains("status: draft"));
        assert!(!yaml.contains("blueprint"));
        let back: Project = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn phases_only_move_forward() {
        let mut p = locked_project();
        assert!(p.advance_phase(Phase::RequirementLock).is_err());
        assert!(p.advance_phase(Phase::BlueprintGeneration).is_err());
        assert_eq!(p.phase_history.len(), 2);
        assert!(p.phase_history[0].exited.is_some());
        assert!(p.phase_history[1].exited.is_none());
    }

    #[test]
    fn duplicate_resets_lifecycle() {
        let mut p = locked_project();
        p.answers.insert(Stage::Intent, StageAnswers::new());
        p.record_blueprint(serde_json::json!({"overview": "x"})).unwrap();

        let copy = p.duplicate("bob");
        assert_ne!(copy.id, p.id);
        assert_eq!(copy.owner, "bob");
        assert_eq!(copy.name, "Copy of Taxi");
        assert_eq!(copy.status, ProjectStatus::Draft);
        assert_eq!(copy.phase, Phase::EnvironmentSetup);
        assert_eq!(copy.answers, p.answers);
        assert_eq!(copy.blueprint, p.blueprint);
        assert_eq!(copy.phase_history.len(), 1);
    }

    #[test]
    fn blueprint_requires_lock() {
        let mut p = Project::new("alice", "Taxi", None);
        let err = p
            .record_blueprint(serde_json::json!({"overview": "x"}))
            .unwrap_err();
        assert!(matches!(err, BlueprintError::InvalidTransition { .. }));
        assert!(p.blueprint.is_none());
    }

    #[test]
    fn blueprint_advances_to_execution_guide() {
        let mut p = locked_project();
        p.record_blueprint(serde_json::json!({"overview": "x"})).unwrap();
        assert_eq!(p.phase, Phase::ExecutionGuide);
        assert_eq!(p.status, ProjectStatus::BlueprintReady);

        // Re-recording replaces without moving the phase again.
        p.record_blueprint(serde_json::json!({"overview": "y"})).unwrap();
        assert_eq!(p.phase, Phase::ExecutionGuide);
        assert_eq!(p.blueprint.as_ref().unwrap()["overview"], "y");
    }

    #[test]
    fn blueprint_must_be_object() {
        let mut p = locked_project();
        assert!(matches!(
            p.record_blueprint(serde_json::json!(["not", "an", "object"])),
            Err(BlueprintError::InvalidBlueprint(_))
        ));
        assert_eq!(p.phase, Phase::BlueprintGeneration);
    }

    #[test]
    fn documentation_requires_blueprint() {
        let mut p = locked_project();
        assert!(p.record_documentation("# Docs").is_err());
        p.record_blueprint(serde_json::json!({"overview": "x"})).unwrap();
        p.record_documentation("# Docs").unwrap();
        assert_eq!(p.documentation.as_deref(), Some("# Docs"));
    }

    #[test]
    fn update_details_clears_empty_description() {
        let mut p = Project::new("alice", "Taxi", Some("rides".to_string()));
        p.update_details(Some("Taxi 2".to_string()), Some(String::new()))
            .unwrap();
        assert_eq!(p.name, "Taxi 2");
        assert!(p.description.is_none());

        assert!(matches!(
            p.update_details(Some("   ".to_string()), None),
            Err(BlueprintError::EmptyName)
        ));
        assert_eq!(p.name, "Taxi 2");
    }
}
