use crate::types::Stage;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// AnswerValue
// ---------------------------------------------------------------------------

/// A single recorded answer. The shape is not tied to the question kind here;
/// `catalog::validate_answers` checks that at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Bool(bool),
    Text(String),
    List(Vec<String>),
}

impl AnswerValue {
    /// Render for the review summary: lists comma-joined, booleans as Yes/No.
    pub fn display(&self) -> String {
        match self {
            AnswerValue::Bool(true) => "Yes".to_string(),
            AnswerValue::Bool(false) => "No".to_string(),
            AnswerValue::Text(s) => s.clone(),
            AnswerValue::List(items) => items.join(", "),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            AnswerValue::Bool(_) => "boolean",
            AnswerValue::Text(_) => "text",
            AnswerValue::List(_) => "list",
        }
    }
}

impl From<&str> for AnswerValue {
    fn from(s: &str) -> Self {
        AnswerValue::Text(s.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(s: String) -> Self {
        AnswerValue::Text(s)
    }
}

impl From<bool> for AnswerValue {
    fn from(b: bool) -> Self {
        AnswerValue::Bool(b)
    }
}

impl From<Vec<String>> for AnswerValue {
    fn from(items: Vec<String>) -> Self {
        AnswerValue::List(items)
    }
}

/// Per-question answers for one stage, keyed by question id.
pub type StageAnswers = BTreeMap<String, AnswerValue>;

// ---------------------------------------------------------------------------
// AnswerRecord
// ---------------------------------------------------------------------------

/// Stage -> answers. A stage counts as complete as soon as it has an entry,
/// even an empty one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerRecord(BTreeMap<Stage, StageAnswers>);

impl AnswerRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, stage: Stage) -> bool {
        self.0.contains_key(&stage)
    }

    pub fn get(&self, stage: Stage) -> Option<&StageAnswers> {
        self.0.get(&stage)
    }

    /// Overwrite the whole entry for `stage`. Returns the replaced entry.
    pub fn insert(&mut self, stage: Stage, answers: StageAnswers) -> Option<StageAnswers> {
        self.0.insert(stage, answers)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers(pairs: &[(&str, AnswerValue)]) -> StageAnswers {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn display_formats() {
        assert_eq!(AnswerValue::Bool(true).display(), "Yes");
        assert_eq!(AnswerValue::Bool(false).display(), "No");
        assert_eq!(AnswerValue::from("taxi app").display(), "taxi app");
        let list = AnswerValue::List(vec!["Web".into(), "Mobile".into()]);
        assert_eq!(list.display(), "Web, Mobile");
    }

    #[test]
    fn untagged_json_shapes() {
        let parsed: StageAnswers =
            serde_json::from_str(r#"{"a": "x", "b": ["Web"], "c": false}"#).unwrap();
        assert_eq!(parsed["a"], AnswerValue::from("x"));
        assert_eq!(parsed["b"], AnswerValue::List(vec!["Web".into()]));
        assert_eq!(parsed["c"], AnswerValue::Bool(false));
    }

    #[test]
    fn numbers_are_not_answers() {
        assert!(serde_json::from_str::<StageAnswers>(r#"{"a": 3}"#).is_err());
    }

    #[test]
    fn insert_replaces_instead_of_merging() {
        let mut record = AnswerRecord::new();
        record.insert(
            Stage::Intent,
            answers(&[("app_type", "taxi app".into()), ("problem", "rides".into())]),
        );
        let old = record.insert(Stage::Intent, answers(&[("app_type", "food app".into())]));

        assert_eq!(old.unwrap().len(), 2);
        let current = record.get(Stage::Intent).unwrap();
        assert_eq!(current.len(), 1);
        assert_eq!(current["app_type"], AnswerValue::from("food app"));
    }

    #[test]
    fn record_serializes_keyed_by_stage() {
        let mut record = AnswerRecord::new();
        record.insert(Stage::UiUx, answers(&[("dark_mode", true.into())]));
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["ui_ux"]["dark_mode"], serde_json::json!(true));

        let back: AnswerRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn empty_entry_still_counts() {
        let mut record = AnswerRecord::new();
        record.insert(Stage::Intent, StageAnswers::new());
        assert!(record.contains(Stage::Intent));
        assert!(!record.is_empty());
    }
}
