use thiserror::Error;

#[derive(Debug, Error)]
pub enum BlueprintError {
    #[error("not initialized: run 'blueprint init'")]
    NotInitialized,

    #[error("project not found: {0}")]
    ProjectNotFound(String),

    #[error("invalid project id '{0}': must be a UUID")]
    InvalidProjectId(String),

    #[error("invalid stage: {0}")]
    InvalidStage(String),

    #[error("invalid phase: {0}")]
    InvalidPhase(String),

    #[error("invalid status: {0}")]
    InvalidStatus(String),

    #[error("invalid ordering '{0}': expected updated_at, -updated_at, status or -status")]
    InvalidOrdering(String),

    #[error("project name must not be empty")]
    EmptyName,

    #[error("sequence violation: you must complete '{required}' before '{stage}'")]
    SequenceViolation { stage: String, required: String },

    #[error("cannot lock requirements: questions are incomplete")]
    NotReady,

    #[error("invalid answer for '{stage}.{question}': {reason}")]
    InvalidAnswer {
        stage: String,
        question: String,
        reason: String,
    },

    #[error("invalid transition from {from} to {to}: {reason}")]
    InvalidTransition {
        from: String,
        to: String,
        reason: String,
    },

    #[error("invalid blueprint: {0}")]
    InvalidBlueprint(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BlueprintError>;
