use super::{project_id, Ctx};
use crate::output::{print_json, progress_bar};
use anyhow::{bail, Context};
use blueprint_core::answer::StageAnswers;
use blueprint_core::catalog::{self, QuestionKind, StageDefinition};
use blueprint_core::engine::FlowEngine;
use blueprint_core::store::FileStore;
use blueprint_core::types::Stage;

fn open<'s>(ctx: &Ctx<'_>, store: &'s FileStore, id: &str) -> anyhow::Result<FlowEngine<'s, FileStore>> {
    let uuid = project_id(id)?;
    FlowEngine::open(store, &uuid, ctx.owner).with_context(|| format!("failed to load project '{id}'"))
}

// ---------------------------------------------------------------------------
// state / questions
// ---------------------------------------------------------------------------

pub fn state(ctx: &Ctx<'_>, id: &str) -> anyhow::Result<()> {
    let store = ctx.store();
    let engine = open(ctx, &store, id)?;
    let state = engine.current_state();

    if ctx.json {
        print_json(&state)?;
        return Ok(());
    }

    println!("Project:  {}", engine.project().name);
    println!("Progress: {}", progress_bar(state.progress_percent));
    for stage in Stage::all() {
        let mark = if state.answers_so_far.contains(*stage) {
            "x"
        } else if state.current_stage == Some(*stage) {
            ">"
        } else {
            " "
        };
        println!("  [{mark}] {}", catalog::definition(*stage).title);
    }
    match state.current_stage {
        Some(stage) => println!("\nNext: blueprint questions {id}   (stage: {stage})"),
        None if engine.project().is_locked() => println!("\nRequirements locked."),
        None => println!("\nAll stages answered. Next: blueprint lock {id}"),
    }
    Ok(())
}

pub fn questions(ctx: &Ctx<'_>, id: &str) -> anyhow::Result<()> {
    let store = ctx.store();
    let engine = open(ctx, &store, id)?;
    let def = engine.current_questions();

    if ctx.json {
        print_json(&def)?;
        return Ok(());
    }

    match def {
        Some(def) => print_stage(def),
        None => println!("All stages answered. Review with: blueprint summary {id}"),
    }
    Ok(())
}

fn print_stage(def: &StageDefinition) {
    println!("{} ({})", def.title, def.stage);
    println!("{}\n", def.description);
    for q in def.questions {
        println!("  {:<14} {}", q.id, q.text);
        match q.kind {
            QuestionKind::Select => println!("  {:<14} one of: {}", "", q.options.join(" | ")),
            QuestionKind::Checkbox => println!("  {:<14} any of: {}", "", q.options.join(", ")),
            QuestionKind::Boolean => println!("  {:<14} yes / no", ""),
            QuestionKind::Text | QuestionKind::Textarea => {
                if let Some(hint) = q.placeholder {
                    println!("  {:<14} {hint}", "");
                }
            }
        }
    }
    println!("\nAnswer with: blueprint answer <id> {} --set question=value", def.stage);
}

// ---------------------------------------------------------------------------
// answer
// ---------------------------------------------------------------------------

/// Build a stage submission from `--data` JSON overlaid with `--set` pairs.
fn build_answers(stage: Stage, data: Option<&str>, set: &[String]) -> anyhow::Result<StageAnswers> {
    let mut answers = match data {
        Some(raw) => {
            let value: serde_json::Value =
                serde_json::from_str(raw).context("--data is not valid JSON")?;
            catalog::answers_from_json(stage, &value)?
        }
        None => StageAnswers::new(),
    };

    let def = catalog::definition(stage);
    for pair in set {
        let Some((question, value)) = pair.split_once('=') else {
            bail!("--set expects question=value, got '{pair}'");
        };
        let question = question.trim();
        answers.insert(question.to_string(), def.parse_input(question, value)?);
    }
    Ok(answers)
}

pub fn answer(
    ctx: &Ctx<'_>,
    id: &str,
    stage: &str,
    data: Option<&str>,
    set: &[String],
) -> anyhow::Result<()> {
    let stage: Stage = stage.parse()?;
    let answers = build_answers(stage, data, set)?;

    let store = ctx.store();
    let mut engine = open(ctx, &store, id)?;
    let state = engine.submit_answer(stage, answers)?;
    tracing::info!(project = %id, stage = %stage, progress = state.progress_percent, "answer accepted");

    if ctx.json {
        print_json(&state)?;
        return Ok(());
    }
    println!("Saved {stage}. Progress: {}", progress_bar(state.progress_percent));
    match state.current_stage {
        Some(next) => println!("Next stage: {next}"),
        None => println!("All stages answered. Next: blueprint lock {id}"),
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// summary / lock
// ---------------------------------------------------------------------------

pub fn summary(ctx: &Ctx<'_>, id: &str) -> anyhow::Result<()> {
    let store = ctx.store();
    let engine = open(ctx, &store, id)?;
    let summary = engine.summary();

    if ctx.json {
        print_json(&summary)?;
        return Ok(());
    }

    for section in &summary {
        println!("{}", section.title);
        for item in &section.items {
            println!("  {}\n    {}", item.label, item.value);
        }
        println!();
    }
    Ok(())
}

pub fn lock(ctx: &Ctx<'_>, id: &str) -> anyhow::Result<()> {
    let store = ctx.store();
    let mut engine = open(ctx, &store, id)?;
    let receipt = engine.lock_requirements()?;

    if ctx.json {
        print_json(&receipt)?;
        return Ok(());
    }
    if receipt.already_locked {
        println!("Requirements were already locked.");
    } else {
        println!(
            "Requirements locked. Phase {}: {}",
            receipt.next_phase.number(),
            receipt.next_phase.display_name()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use blueprint_core::answer::AnswerValue;

    #[test]
    fn set_pairs_overlay_data() {
        let answers = build_answers(
            Stage::Platform,
            Some(r#"{"priority": "Responsive", "offline": false}"#),
            &["offline=yes".to_string(), "platforms=Web, Mobile".to_string()],
        )
        .unwrap();
        assert_eq!(answers["priority"], AnswerValue::from("Responsive"));
        assert_eq!(answers["offline"], AnswerValue::Bool(true));
        assert_eq!(
            answers["platforms"],
            AnswerValue::List(vec!["Web".into(), "Mobile".into()])
        );
    }

    #[test]
    fn malformed_set_pair_rejected() {
        let err = build_answers(Stage::Intent, None, &["app_type".to_string()]).unwrap_err();
        assert!(err.to_string().contains("question=value"));
    }

    #[test]
    fn bad_json_rejected() {
        assert!(build_answers(Stage::Intent, Some("{not json"), &[]).is_err());
    }
}
