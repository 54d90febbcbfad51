//! Downstream artifacts: the blueprint generated from locked requirements and
//! the Markdown documentation written from that blueprint.

use crate::answer::AnswerRecord;
use crate::error::{BlueprintError, Result};
use crate::project::Project;
use crate::repair;
use crate::store::ProjectStore;
use crate::types::Phase;
use uuid::Uuid;

/// Produces a blueprint document from a locked answer record.
///
/// Implementations typically call out to a language model; the returned value
/// must be a JSON object.
pub trait BlueprintGenerator {
    fn generate(&self, answers: &AnswerRecord) -> Result<serde_json::Value>;
}

/// Load, apply `f` to a copy, save, and return the saved project.
fn update<S, F>(store: &S, id: &Uuid, owner: &str, f: F) -> Result<Project>
where
    S: ProjectStore + ?Sized,
    F: FnOnce(&mut Project) -> Result<()>,
{
    let mut project = store.load(id, owner)?;
    f(&mut project)?;
    store.save(&project)?;
    Ok(project)
}

pub fn record_blueprint<S: ProjectStore + ?Sized>(
    store: &S,
    id: &Uuid,
    owner: &str,
    blueprint: serde_json::Value,
) -> Result<Project> {
    update(store, id, owner, |p| p.record_blueprint(blueprint))
}

/// Repair raw model output with [`repair::parse_model_json`] and record it.
pub fn record_raw_blueprint<S: ProjectStore + ?Sized>(
    store: &S,
    id: &Uuid,
    owner: &str,
    raw: &str,
) -> Result<Project> {
    let blueprint = repair::parse_model_json(raw)?;
    record_blueprint(store, id, owner, blueprint)
}

pub fn record_documentation<S: ProjectStore + ?Sized>(
    store: &S,
    id: &Uuid,
    owner: &str,
    markdown: &str,
) -> Result<Project> {
    update(store, id, owner, |p| p.record_documentation(markdown))
}

/// Run `generator` over a locked project's answers and record the result.
/// The generator is not called for a project that is not locked yet.
pub fn generate_blueprint<S, G>(store: &S, generator: &G, id: &Uuid, owner: &str) -> Result<Project>
where
    S: ProjectStore + ?Sized,
    G: BlueprintGenerator + ?Sized,
{
    let project = store.load(id, owner)?;
    if !project.is_locked() {
        return Err(BlueprintError::InvalidTransition {
            from: project.phase.to_string(),
            to: Phase::BlueprintGeneration.to_string(),
            reason: "lock the requirements before generating a blueprint".to_string(),
        });
    }
    let blueprint = generator.generate(&project.answers)?;
    record_blueprint(store, id, owner, blueprint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answer::StageAnswers;
    use crate::engine::FlowEngine;
    use crate::store::MemoryStore;
    use crate::types::{ProjectStatus, Stage};
    use std::cell::Cell;

    struct Fixed {
        calls: Cell<usize>,
    }

    impl BlueprintGenerator for Fixed {
        fn generate(&self, answers: &AnswerRecord) -> Result<serde_json::Value> {
            self.calls.set(self.calls.get() + 1);
            Ok(serde_json::json!({ "overview": "Taxi", "stages": answers.len() }))
        }
    }

    fn locked(store: &MemoryStore) -> Project {
        let project = store.create("alice", "Taxi", None).unwrap();
        let mut engine = FlowEngine::new(store, project);
        for stage in Stage::all() {
            engine.submit_answer(*stage, StageAnswers::new()).unwrap();
        }
        engine.lock_requirements().unwrap();
        engine.into_project()
    }

    #[test]
    fn generate_requires_lock() {
        let store = MemoryStore::new();
        let project = store.create("alice", "Taxi", None).unwrap();
        let generator = Fixed { calls: Cell::new(0) };

        let err = generate_blueprint(&store, &generator, &project.id, "alice").unwrap_err();
        assert!(matches!(err, BlueprintError::InvalidTransition { .. }));
        assert_eq!(generator.calls.get(), 0);
    }

    #[test]
    fn generate_records_blueprint() {
        let store = MemoryStore::new();
        let project = locked(&store);
        let generator = Fixed { calls: Cell::new(0) };

        let saved = generate_blueprint(&store, &generator, &project.id, "alice").unwrap();
        assert_eq!(saved.status, ProjectStatus::BlueprintReady);
        assert_eq!(saved.phase, Phase::ExecutionGuide);
        assert_eq!(saved.blueprint.as_ref().unwrap()["stages"], 5);

        let stored = store.load(&project.id, "alice").unwrap();
        assert_eq!(stored, saved);
    }

    #[test]
    fn raw_blueprint_is_repaired() {
        let store = MemoryStore::new();
        let project = locked(&store);
        let saved = record_raw_blueprint(
            &store,
            &project.id,
            "alice",
            "```json\n{\"overview\": \"Taxi\", \"phases\": [\"MVP\"",
        )
        .unwrap();
        assert_eq!(saved.blueprint.unwrap()["phases"][0], "MVP");
    }

    #[test]
    fn invalid_raw_blueprint_leaves_project_unchanged() {
        let store = MemoryStore::new();
        let project = locked(&store);
        assert!(record_raw_blueprint(&store, &project.id, "alice", "no json here").is_err());
        let stored = store.load(&project.id, "alice").unwrap();
        assert!(stored.blueprint.is_none());
        assert_eq!(stored.phase, Phase::BlueprintGeneration);
    }

    #[test]
    fn documentation_after_blueprint() {
        let store = MemoryStore::new();
        let project = locked(&store);
        assert!(record_documentation(&store, &project.id, "alice", "# Guide").is_err());

        record_blueprint(&store, &project.id, "alice", serde_json::json!({"overview": "x"}))
            .unwrap();
        let saved = record_documentation(&store, &project.id, "alice", "# Guide").unwrap();
        assert_eq!(saved.documentation.as_deref(), Some("# Guide"));
        assert_eq!(saved.status, ProjectStatus::BlueprintReady);
    }
}
