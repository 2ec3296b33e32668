//! Response plan input
//!
//! Lenient: unknown fields are ignored, missing fields get defaults, and a
//! bad action record becomes a `MalformedAction` instead of failing the
//! whole batch.

use std::path::Path;

use serde_json::Value;

use super::error::InputError;
use super::types::{Action, ActionEntry, MalformedAction, PlannedAction};

pub const UNKNOWN_SESSION: &str = "unknown";
const MALFORMED_ACTION_TYPE: &str = "<malformed>";

pub fn load_plan(path: &Path) -> Result<Vec<PlannedAction>, InputError> {
    let text = std::fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_plan(&text)
}

/// Flatten decision records into actions, preserving input order
pub fn parse_plan(text: &str) -> Result<Vec<PlannedAction>, InputError> {
    let records = match serde_json::from_str::<Value>(text)? {
        Value::Array(records) => records,
        record @ Value::Object(_) => vec![record],
        _ => return Err(InputError::NotAList),
    };

    let mut planned = Vec::new();
    for (index, record) in records.iter().enumerate() {
        let Some(fields) = record.as_object() else {
            log::warn!("Skipping decision record {}: not an object", index);
            continue;
        };

        let session_id = fields
            .get("session_id")
            .and_then(Value::as_str)
            .unwrap_or(UNKNOWN_SESSION);
        let confidence = fields
            .get("decision_confidence")
            .and_then(Value::as_f64)
            .unwrap_or(0.0);
        let Some(actions) = fields.get("recommended_actions").and_then(Value::as_array) else {
            continue;
        };

        for raw in actions {
            planned.push(PlannedAction {
                session_id: session_id.to_string(),
                confidence,
                entry: parse_action(raw),
            });
        }
    }
    Ok(planned)
}

fn parse_action(raw: &Value) -> ActionEntry {
    match serde_json::from_value::<Action>(raw.clone()) {
        Ok(action) => ActionEntry::Valid(action),
        Err(e) => {
            let action_type = raw
                .get("action_type")
                .and_then(Value::as_str)
                .unwrap_or(MALFORMED_ACTION_TYPE);
            let target = raw.get("target");
            let target_type = target
                .and_then(|t| t.get("type"))
                .and_then(Value::as_str)
                .unwrap_or("Unknown");
            let identifier = target
                .and_then(|t| t.get("identifier"))
                .and_then(Value::as_str)
                .unwrap_or("unknown");

            ActionEntry::Malformed(MalformedAction {
                action_type: action_type.to_string(),
                target: format!("{}:{}", target_type, identifier),
                error: e.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::execution::types::TargetType;

    #[test]
    fn test_defaults_for_missing_fields() {
        let plan = parse_plan(
            r#"[{"recommended_actions":[{"action_type":"Isolate Host","target":{"type":"Host","identifier":"WS-1"}}]}]"#,
        )
        .unwrap();

        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].session_id, "unknown");
        assert_eq!(plan[0].confidence, 0.0);
        match &plan[0].entry {
            ActionEntry::Valid(action) => {
                assert_eq!(action.target.target_type, TargetType::Host);
                assert!(action.justification.is_empty());
            }
            other => panic!("unexpected entry: {:?}", other),
        }
    }

    #[test]
    fn test_missing_actions_contribute_nothing() {
        let plan = parse_plan(
            r#"[{"session_id":"s1","decision_confidence":0.9,"urgency_level":"High"}, 42]"#,
        )
        .unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn test_order_and_extra_fields() {
        let plan = parse_plan(
            r#"[
                {"session_id":"s1","decision_confidence":0.8,"extra":true,"recommended_actions":[
                    {"action_type":"A","target":{"type":"User","identifier":"u1"},"justification":{"why":"x"}},
                    {"action_type":"B","target":{"type":"Network Segment","identifier":"n1"}}
                ]},
                {"session_id":"s2","decision_confidence":0.1,"recommended_actions":[
                    {"action_type":"C","target":{"type":"Host","identifier":"h1"}}
                ]}
            ]"#,
        )
        .unwrap();

        let order: Vec<(&str, &str)> = plan
            .iter()
            .map(|p| match &p.entry {
                ActionEntry::Valid(a) => (p.session_id.as_str(), a.action_type.as_str()),
                ActionEntry::Malformed(m) => (p.session_id.as_str(), m.action_type.as_str()),
            })
            .collect();
        assert_eq!(order, vec![("s1", "A"), ("s1", "B"), ("s2", "C")]);
    }

    #[test]
    fn test_malformed_action_is_kept() {
        let plan = parse_plan(
            r#"[{"session_id":"s1","recommended_actions":[{"action_type":"Isolate Host","target":{"type":"Planet","identifier":"mars"}}]}]"#,
        )
        .unwrap();

        match &plan[0].entry {
            ActionEntry::Malformed(m) => {
                assert_eq!(m.action_type, "Isolate Host");
                assert_eq!(m.target, "Planet:mars");
            }
            other => panic!("unexpected entry: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_non_json() {
        assert!(matches!(parse_plan("not json"), Err(InputError::Parse(_))));
        assert!(matches!(parse_plan("\"str\""), Err(InputError::NotAList)));
    }
}
