//! The static question catalog: one definition per wizard stage, in stage order.

use crate::answer::{AnswerValue, StageAnswers};
use crate::error::{BlueprintError, Result};
use crate::types::Stage;
use serde::Serialize;

// ---------------------------------------------------------------------------
// QuestionKind / Question
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    Text,
    Textarea,
    Select,
    Checkbox,
    Boolean,
}

impl QuestionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            QuestionKind::Text => "text",
            QuestionKind::Textarea => "textarea",
            QuestionKind::Select => "select",
            QuestionKind::Checkbox => "checkbox",
            QuestionKind::Boolean => "boolean",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Question {
    pub id: &'static str,
    pub text: &'static str,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    #[serde(skip_serializing_if = "no_options")]
    pub options: &'static [&'static str],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<&'static str>,
}

fn no_options(options: &&'static [&'static str]) -> bool {
    options.is_empty()
}

impl Question {
    /// Check that `value` has the shape this question's kind expects.
    /// Returns the reason on mismatch.
    fn check(&self, value: &AnswerValue) -> std::result::Result<(), String> {
        match (self.kind, value) {
            (QuestionKind::Text | QuestionKind::Textarea, AnswerValue::Text(_)) => Ok(()),
            (QuestionKind::Boolean, AnswerValue::Bool(_)) => Ok(()),
            (QuestionKind::Select, AnswerValue::Text(choice)) => {
                if self.options.contains(&choice.as_str()) {
                    Ok(())
                } else {
                    Err(format!(
                        "'{choice}' is not one of: {}",
                        self.options.join(", ")
                    ))
                }
            }
            (QuestionKind::Checkbox, AnswerValue::List(choices)) => {
                match choices.iter().find(|c| !self.options.contains(&c.as_str())) {
                    Some(bad) => Err(format!(
                        "'{bad}' is not one of: {}",
                        self.options.join(", ")
                    )),
                    None => Ok(()),
                }
            }
            (kind, value) => Err(format!(
                "expected a {} answer, got {}",
                expected_shape(kind),
                value.kind_name()
            )),
        }
    }

    /// Coerce a raw command-line string into a value for this question.
    fn coerce(&self, raw: &str) -> std::result::Result<AnswerValue, String> {
        let raw = raw.trim();
        match self.kind {
            QuestionKind::Checkbox => Ok(AnswerValue::List(
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect(),
            )),
            QuestionKind::Boolean => match raw.to_ascii_lowercase().as_str() {
                "yes" | "y" | "true" | "on" | "1" => Ok(AnswerValue::Bool(true)),
                "no" | "n" | "false" | "off" | "0" => Ok(AnswerValue::Bool(false)),
                other => Err(format!("'{other}' is not a yes/no value")),
            },
            QuestionKind::Text | QuestionKind::Textarea | QuestionKind::Select => {
                Ok(AnswerValue::Text(raw.to_string()))
            }
        }
    }
}

fn expected_shape(kind: QuestionKind) -> &'static str {
    match kind {
        QuestionKind::Text | QuestionKind::Textarea | QuestionKind::Select => "text",
        QuestionKind::Checkbox => "list",
        QuestionKind::Boolean => "boolean",
    }
}

// ---------------------------------------------------------------------------
// StageDefinition
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct StageDefinition {
    #[serde(rename = "key")]
    pub stage: Stage,
    pub title: &'static str,
    pub description: &'static str,
    pub questions: &'static [Question],
}

impl StageDefinition {
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Parse a `question=value` pair typed on the command line.
    pub fn parse_input(&self, question_id: &str, raw: &str) -> Result<AnswerValue> {
        let question = self.question(question_id).ok_or_else(|| self.unknown(question_id))?;
        let value = question
            .coerce(raw)
            .map_err(|reason| self.invalid(question_id, reason))?;
        question
            .check(&value)
            .map_err(|reason| self.invalid(question_id, reason))?;
        Ok(value)
    }

    fn unknown(&self, question_id: &str) -> BlueprintError {
        self.invalid(
            question_id,
            format!("no such question in stage '{}'", self.stage),
        )
    }

    fn invalid(&self, question_id: &str, reason: String) -> BlueprintError {
        BlueprintError::InvalidAnswer {
            stage: self.stage.to_string(),
            question: question_id.to_string(),
            reason,
        }
    }
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

pub fn all() -> &'static [StageDefinition] {
    &CATALOG
}

pub fn definition(stage: Stage) -> &'static StageDefinition {
    &CATALOG[stage.index()]
}

/// Boundary check for a stage submission: every key must name a question of
/// the stage and every value must fit that question's kind. Unanswered
/// questions are fine.
pub fn validate_answers(stage: Stage, answers: &StageAnswers) -> Result<()> {
    let def = definition(stage);
    for (id, value) in answers {
        let question = def.question(id).ok_or_else(|| def.unknown(id))?;
        question
            .check(value)
            .map_err(|reason| def.invalid(id, reason))?;
    }
    Ok(())
}

/// Decode a JSON object of `question -> value` and validate it for `stage`.
/// Anything but an object is rejected, `null` included; `{}` is an empty
/// submission.
pub fn answers_from_json(stage: Stage, data: &serde_json::Value) -> Result<StageAnswers> {
    let def = definition(stage);
    let map = match data {
        serde_json::Value::Object(map) => map,
        other => {
            return Err(def.invalid(
                "*",
                format!("answer_data must be an object, got {}", json_kind(other)),
            ))
        }
    };

    let mut answers = StageAnswers::new();
    for (id, raw) in map {
        let value: AnswerValue = serde_json::from_value(raw.clone()).map_err(|_| {
            def.invalid(
                id,
                format!("unsupported value type {}", json_kind(raw)),
            )
        })?;
        answers.insert(id.clone(), value);
    }
    validate_answers(stage, &answers)?;
    Ok(answers)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "text",
        serde_json::Value::Array(_) => "list",
        serde_json::Value::Object(_) => "object",
    }
}

// ---------------------------------------------------------------------------
// Data
// ---------------------------------------------------------------------------

const fn text(id: &'static str, text: &'static str) -> Question {
    Question {
        id,
        text,
        kind: QuestionKind::Text,
        options: &[],
        placeholder: None,
    }
}

const fn text_hint(id: &'static str, text: &'static str, placeholder: &'static str) -> Question {
    Question {
        id,
        text,
        kind: QuestionKind::Text,
        options: &[],
        placeholder: Some(placeholder),
    }
}

const fn textarea(id: &'static str, text: &'static str) -> Question {
    Question {
        id,
        text,
        kind: QuestionKind::Textarea,
        options: &[],
        placeholder: None,
    }
}

const fn select(id: &'static str, text: &'static str, options: &'static [&'static str]) -> Question {
    Question {
        id,
        text,
        kind: QuestionKind::Select,
        options,
        placeholder: None,
    }
}

const fn checkbox(
    id: &'static str,
    text: &'static str,
    options: &'static [&'static str],
) -> Question {
    Question {
        id,
        text,
        kind: QuestionKind::Checkbox,
        options,
        placeholder: None,
    }
}

const fn boolean(id: &'static str, text: &'static str) -> Question {
    Question {
        id,
        text,
        kind: QuestionKind::Boolean,
        options: &[],
        placeholder: None,
    }
}

static CATALOG: [StageDefinition; 5] = [
    StageDefinition {
        stage: Stage::Intent,
        title: "App Intent",
        description: "Let's define the core purpose of your application.",
        questions: &[
            text("app_type", "What type of application do you want to build?"),
            textarea("problem", "What problem does this app solve?"),
            text("target_user", "Who is the target user?"),
            select(
                "scope",
                "Is this an MVP or full production app?",
                &["MVP", "Full Production", "Prototype"],
            ),
            select(
                "purpose",
                "Is this for learning, business, or internal use?",
                &["Learning", "Business", "Internal Tool"],
            ),
        ],
    },
    StageDefinition {
        stage: Stage::Platform,
        title: "Platform & Devices",
        description: "Where will your users access this application?",
        questions: &[
            checkbox(
                "platforms",
                "Which platforms should this app support?",
                &["Web", "Mobile", "Desktop"],
            ),
            select(
                "priority",
                "Mobile-first or desktop-first?",
                &["Mobile-First", "Desktop-First", "Responsive"],
            ),
            boolean("offline", "Offline support needed?"),
            select(
                "performance",
                "Performance priority level?",
                &["Standard", "High", "Critical (Real-time)"],
            ),
        ],
    },
    StageDefinition {
        stage: Stage::UiUx,
        title: "UI / UX Preferences",
        description: "How should the application look and feel?",
        questions: &[
            select(
                "navigation",
                "Preferred navigation style?",
                &["Sidebar", "Top Navbar", "Bottom Tab Bar"],
            ),
            boolean("dark_mode", "Dark mode required?"),
            select(
                "style",
                "UI style preference?",
                &["Minimal", "Dashboard", "Content-Heavy", "Corporate"],
            ),
            text("inspiration", "Any reference apps or style inspirations?"),
        ],
    },
    StageDefinition {
        stage: Stage::TechStack,
        title: "Technical Decisions",
        description: "Let's lock in the engineering constraints.",
        questions: &[
            select(
                "backend_style",
                "Preferred backend style?",
                &[
                    "Python (Django Monolith)",
                    "Python (Django + Ninja/DRF)",
                    "Python (FastAPI)",
                    "Node.js (Express/NestJS)",
                    "PHP (Laravel)",
                    "Go (Gin/Echo)",
                    "Java (Spring Boot)",
                    "No Preference (AI Recommend)",
                ],
            ),
            boolean("auth", "Authentication needed?"),
            text_hint("roles", "User roles required?", "e.g., Admin, Editor, Viewer"),
            text_hint(
                "integrations",
                "External integrations needed?",
                "e.g., Stripe, AWS, Twilio",
            ),
        ],
    },
    StageDefinition {
        stage: Stage::Quality,
        title: "Quality & Delivery",
        description: "Final checks before architecture generation.",
        questions: &[
            boolean("tests", "Do you want tests included?"),
            boolean("debugging", "Debugging guidance needed?"),
            boolean("deployment", "Deployment guidance needed?"),
            select(
                "hosting",
                "Target hosting type?",
                &[
                    "Shared Hosting",
                    "VPS (DigitalOcean/Linode)",
                    "Cloud (AWS/GCP/Azure)",
                    "Heroku/Railway",
                ],
            ),
        ],
    },
];

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
