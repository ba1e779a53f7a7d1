//! Action extraction from prompts, code deltas, and file changes.

use regex::Regex;

use pkl_core::models::{
    Action, ActionOrigin, ActionVerb, ChangeType, Conversation, Session,
};

/// Verbs recognized in prompts. `modify` only comes from code and file changes.
const PROMPT_VERBS: [ActionVerb; 7] = [
    ActionVerb::Create,
    ActionVerb::Fix,
    ActionVerb::Refactor,
    ActionVerb::Test,
    ActionVerb::Document,
    ActionVerb::Analyze,
    ActionVerb::Deploy,
];

/// Objects recognized as targets of an action.
pub const OBJECT_VOCABULARY: &[&str] = &[
    "function", "class", "method", "variable", "file", "module", "component", "test", "tests",
    "api", "endpoint", "database", "query", "table", "schema", "model", "dataset", "data",
    "chart", "plot", "graph", "visualization", "feature", "bug", "error", "issue",
    "documentation", "readme", "comment", "script", "pipeline", "config", "server", "page",
    "form", "code",
];

const CONTEXT_CHARS: usize = 100;

fn is_known_object(word: &str) -> bool {
    OBJECT_VOCABULARY.contains(&word)
}

fn excerpt(text: &str) -> String {
    text.chars().take(CONTEXT_CHARS).collect()
}

/// Compiled verb-phrase matchers.
pub struct ActionExtractor {
    matchers: Vec<(ActionVerb, Regex)>,
}

impl Default for ActionExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionExtractor {
    pub fn new() -> Self {
        let matchers = PROMPT_VERBS
            .iter()
            .filter_map(|verb| {
                let synonyms = verb.synonyms().join("|");
                let pattern = format!(
                    r"\b(?:{synonyms})\s+(?:(?:a|an|the|some|new)\s+)*(\w+)(?:\s+(\w+))?"
                );
                match Regex::new(&pattern) {
                    Ok(re) => Some((*verb, re)),
                    Err(e) => {
                        tracing::error!(verb = %verb, error = %e, "invalid action pattern");
                        None
                    }
                }
            })
            .collect();
        Self { matchers }
    }

    /// All actions of a session, in extraction order
    /// (prompts, then code deltas, then file changes). Actions from one
    /// prompt appear in the order their verbs occur in the text.
    pub fn extract(&self, session: &Session, conversation: &Conversation) -> Vec<Action> {
        let mut actions = Vec::new();

        for prompt in conversation.prompts() {
            let lowered = prompt.content.to_lowercase();
            // (match start, action): one prompt's actions follow the text order
            let mut found: Vec<(usize, Action)> = Vec::new();
            for (verb, re) in &self.matchers {
                for caps in re.captures_iter(&lowered) {
                    let start = caps.get(0).map_or(0, |m| m.start());
                    let Some(first) = caps.get(1).map(|m| m.as_str()) else {
                        continue;
                    };
                    let second = caps.get(2).map(|m| m.as_str());
                    let object = match second {
                        Some(s) if !is_known_object(first) && is_known_object(s) => s,
                        _ => first,
                    };
                    found.push((
                        start,
                        Action {
                            verb: *verb,
                            object: object.to_string(),
                            origin: ActionOrigin::Prompt,
                            timestamp: prompt.timestamp,
                            source_context: excerpt(&prompt.content),
                        },
                    ));
                }
            }
            found.sort_by_key(|(start, _)| *start);
            actions.extend(found.into_iter().map(|(_, action)| action));
        }

        for delta in &session.code_deltas {
            let verb = match delta.before_content {
                None => ActionVerb::Create,
                Some(_) => ActionVerb::Modify,
            };
            actions.push(Action {
                verb,
                object: "code".to_string(),
                origin: ActionOrigin::CodeChange,
                timestamp: delta.timestamp,
                source_context: excerpt(&delta.after_content),
            });
        }

        for change in &session.file_changes {
            let verb = match change.change_type {
                ChangeType::Added => ActionVerb::Create,
                ChangeType::Modified => ActionVerb::Modify,
            };
            actions.push(Action {
                verb,
                object: "file".to_string(),
                origin: ActionOrigin::FileChange,
                timestamp: change.timestamp,
                source_context: change.file_path.clone(),
            });
        }

        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pkl_core::models::{CodeDelta, FileChange, Message};

    fn ts(secs: i64) -> chrono::DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn prompt_actions(text: &str) -> Vec<Action> {
        let session = Session::new("s", ts(0));
        let conv = Conversation::new(vec![Message::user(text, ts(0))]);
        ActionExtractor::new().extract(&session, &conv)
    }

    #[test]
    fn add_login_function_is_create_function() {
        let actions = prompt_actions("Please add a login function");
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].verb, ActionVerb::Create);
        assert_eq!(actions[0].object, "function");
        assert_eq!(actions[0].origin, ActionOrigin::Prompt);
    }

    #[test]
    fn known_first_word_is_kept() {
        let actions = prompt_actions("fix the bug in parsing");
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].verb, ActionVerb::Fix);
        assert_eq!(actions[0].object, "bug");
    }

    #[test]
    fn free_text_object_when_nothing_known() {
        let actions = prompt_actions("deploy staging now");
        assert_eq!(actions[0].verb, ActionVerb::Deploy);
        assert_eq!(actions[0].object, "staging");
    }

    #[test]
    fn multiple_verbs_in_one_prompt() {
        let actions = prompt_actions("create the parser and then verify output");
        let verbs: Vec<_> = actions.iter().map(|a| a.verb).collect();
        assert!(verbs.contains(&ActionVerb::Create));
        assert!(verbs.contains(&ActionVerb::Test));
    }

    #[test]
    fn prompt_actions_follow_text_order() {
        let actions = prompt_actions("analyze the logs then fix the bug");
        let verbs: Vec<_> = actions.iter().map(|a| a.verb).collect();
        assert_eq!(verbs, vec![ActionVerb::Analyze, ActionVerb::Fix]);
        assert_eq!(actions[0].object, "logs");
        assert_eq!(actions[1].object, "bug");
    }

    #[test]
    fn assistant_messages_are_ignored() {
        let session = Session::new("s", ts(0));
        let conv = Conversation::new(vec![Message::assistant("I will fix the bug", ts(0))]);
        assert!(ActionExtractor::new().extract(&session, &conv).is_empty());
    }

    #[test]
    fn modify_is_not_a_prompt_verb() {
        assert!(prompt_actions("update the config").is_empty());
    }

    #[test]
    fn code_and_file_changes_become_actions() {
        let mut session = Session::new("s", ts(0));
        session.code_deltas.push(CodeDelta {
            before_content: None,
            after_content: "def f(): pass".to_string(),
            timestamp: ts(10),
        });
        session.code_deltas.push(CodeDelta {
            before_content: Some("def f(): pass".to_string()),
            after_content: "def f(): return 1".to_string(),
            timestamp: ts(20),
        });
        session.file_changes.push(FileChange {
            change_type: ChangeType::Added,
            file_path: "src/f.py".to_string(),
            timestamp: ts(5),
        });
        session.file_changes.push(FileChange {
            change_type: ChangeType::Modified,
            file_path: "src/g.py".to_string(),
            timestamp: ts(30),
        });

        let actions = ActionExtractor::new().extract(&session, &Conversation::default());
        let summary: Vec<_> = actions
            .iter()
            .map(|a| (a.verb, a.object.as_str(), a.origin))
            .collect();
        assert_eq!(
            summary,
            vec![
                (ActionVerb::Create, "code", ActionOrigin::CodeChange),
                (ActionVerb::Modify, "code", ActionOrigin::CodeChange),
                (ActionVerb::Create, "file", ActionOrigin::FileChange),
                (ActionVerb::Modify, "file", ActionOrigin::FileChange),
            ]
        );
        assert_eq!(actions[2].source_context, "src/f.py");
    }
}
