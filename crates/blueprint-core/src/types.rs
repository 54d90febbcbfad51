use crate::error::BlueprintError;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Stage
// ---------------------------------------------------------------------------

/// One step of the requirements wizard. Declaration order is the only
/// precedence order between stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Intent,
    Platform,
    UiUx,
    TechStack,
    Quality,
}

impl Stage {
    pub fn all() -> &'static [Stage] {
        &[
            Stage::Intent,
            Stage::Platform,
            Stage::UiUx,
            Stage::TechStack,
            Stage::Quality,
        ]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Intent => "intent",
            Stage::Platform => "platform",
            Stage::UiUx => "ui_ux",
            Stage::TechStack => "tech_stack",
            Stage::Quality => "quality",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Stage {
    type Err = BlueprintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "intent" => Ok(Stage::Intent),
            "platform" => Ok(Stage::Platform),
            "ui_ux" | "ui-ux" => Ok(Stage::UiUx),
            "tech_stack" | "tech-stack" => Ok(Stage::TechStack),
            "quality" => Ok(Stage::Quality),
            _ => Err(BlueprintError::InvalidStage(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// Project lifecycle phase. Stored and sent over the wire as its integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Phase {
    EnvironmentSetup,
    UserSystem,
    ProjectManagement,
    SystemLogic,
    UserQuestions,
    RequirementLock,
    BlueprintGeneration,
    ExecutionGuide,
    Testing,
    Deployment,
    FinalExport,
}

impl Phase {
    pub fn all() -> &'static [Phase] {
        &[
            Phase::EnvironmentSetup,
            Phase::UserSystem,
            Phase::ProjectManagement,
            Phase::SystemLogic,
            Phase::UserQuestions,
            Phase::RequirementLock,
            Phase::BlueprintGeneration,
            Phase::ExecutionGuide,
            Phase::Testing,
            Phase::Deployment,
            Phase::FinalExport,
        ]
    }

    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::EnvironmentSetup => "environment_setup",
            Phase::UserSystem => "user_system",
            Phase::ProjectManagement => "project_management",
            Phase::SystemLogic => "system_logic",
            Phase::UserQuestions => "user_questions",
            Phase::RequirementLock => "requirement_lock",
            Phase::BlueprintGeneration => "blueprint_generation",
            Phase::ExecutionGuide => "execution_guide",
            Phase::Testing => "testing",
            Phase::Deployment => "deployment",
            Phase::FinalExport => "final_export",
        }
    }

    /// Human-facing name, as shown next to the phase number.
    pub fn display_name(self) -> &'static str {
        match self {
            Phase::EnvironmentSetup => "Environment Setup",
            Phase::UserSystem => "User System",
            Phase::ProjectManagement => "Project Management",
            Phase::SystemLogic => "System Logic",
            Phase::UserQuestions => "User Questions",
            Phase::RequirementLock => "Requirement Lock",
            Phase::BlueprintGeneration => "Blueprint Generation",
            Phase::ExecutionGuide => "Execution Guide",
            Phase::Testing => "Testing",
            Phase::Deployment => "Deployment",
            Phase::FinalExport => "Final Export",
        }
    }
}

impl From<Phase> for u8 {
    fn from(phase: Phase) -> u8 {
        phase.number()
    }
}

impl TryFrom<u8> for Phase {
    type Error = BlueprintError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Phase::all()
            .get(n as usize)
            .copied()
            .ok_or_else(|| BlueprintError::InvalidPhase(n.to_string()))
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Phase {
    type Err = BlueprintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(n) = s.parse::<u8>() {
            return Phase::try_from(n);
        }
        Phase::all()
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| BlueprintError::InvalidPhase(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// ProjectStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Draft,
    InProgress,
    Architecting,
    BlueprintReady,
    Completed,
    Archived,
}

impl ProjectStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectStatus::Draft => "draft",
            ProjectStatus::InProgress => "in_progress",
            ProjectStatus::Architecting => "architecting",
            ProjectStatus::BlueprintReady => "blueprint_ready",
            ProjectStatus::Completed => "completed",
            ProjectStatus::Archived => "archived",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ProjectStatus::Draft => "Draft",
            ProjectStatus::InProgress => "In Progress",
            ProjectStatus::Architecting => "Architecting",
            ProjectStatus::BlueprintReady => "Blueprint Ready",
            ProjectStatus::Completed => "Completed",
            ProjectStatus::Archived => "Archived",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProjectStatus {
    type Err = BlueprintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(ProjectStatus::Draft),
            "in_progress" | "in-progress" => Ok(ProjectStatus::InProgress),
            "architecting" => Ok(ProjectStatus::Architecting),
            "blueprint_ready" | "blueprint-ready" => Ok(ProjectStatus::BlueprintReady),
            "completed" => Ok(ProjectStatus::Completed),
            "archived" => Ok(ProjectStatus::Archived),
            _ => Err(BlueprintError::InvalidStatus(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn stage_ordering() {
        assert!(Stage::Intent < Stage::Platform);
        assert!(Stage::TechStack < Stage::Quality);
        assert_eq!(Stage::all().len(), 5);
    }

    #[test]
    fn stage_wire_identifiers() {
        let wire: Vec<&str> = Stage::all().iter().map(|s| s.as_str()).collect();
        assert_eq!(wire, ["intent", "platform", "ui_ux", "tech_stack", "quality"]);
        for stage in Stage::all() {
            assert_eq!(Stage::from_str(stage.as_str()).unwrap(), *stage);
            let json = serde_json::to_string(stage).unwrap();
            assert_eq!(json, format!("\"{}\"", stage.as_str()));
        }
    }

    #[test]
    fn unknown_stage_rejected() {
        assert!(matches!(
            Stage::from_str("deployment"),
            Err(BlueprintError::InvalidStage(_))
        ));
    }

    #[test]
    fn phase_serializes_as_integer() {
        assert_eq!(serde_json::to_string(&Phase::BlueprintGeneration).unwrap(), "6");
        let parsed: Phase = serde_json::from_str("7").unwrap();
        assert_eq!(parsed, Phase::ExecutionGuide);
        assert!(serde_json::from_str::<Phase>("11").is_err());
    }

    #[test]
    fn phase_parses_number_or_name() {
        assert_eq!(Phase::from_str("6").unwrap(), Phase::BlueprintGeneration);
        assert_eq!(
            Phase::from_str("requirement_lock").unwrap(),
            Phase::RequirementLock
        );
        assert!(Phase::from_str("launch").is_err());
    }

    #[test]
    fn status_roundtrip() {
        for s in ["draft", "in_progress", "architecting", "blueprint_ready", "completed", "archived"] {
            assert_eq!(ProjectStatus::from_str(s).unwrap().as_str(), s);
        }
        assert!(ProjectStatus::from_str("locked").is_err());
    }
}
