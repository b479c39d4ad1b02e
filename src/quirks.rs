//! Quirk rule engine: ordered, user-editable text transformations applied
//! to outgoing chat messages.
//!
//! Rules run as a pipeline: each enabled rule consumes the output of the
//! previous one, in exactly the order the user configured. The engine is a
//! pure function of (input, rule list) and performs no I/O; callers that
//! need a consistent view under live edits clone the rule list before
//! invoking `process`.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Case transformation styles for `QuirkKind::Case`.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CaseStyle {
    Upper,
    Lower,
    /// Alternating caps, counting only alphabetic characters for parity.
    Alternating,
    /// Swap the case of every letter.
    Reversed,
}

/// A single transformation step. Closed set of kinds; new kinds are added
/// by extending this enum, not by runtime type checks.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuirkKind {
    /// Literal substring replacement, all occurrences.
    Replace { find: String, with: String },
    /// Regex replacement. `with` may reference capture groups ($1, $2, ...).
    Regex { pattern: String, with: String },
    /// Replace whole words only (word-boundary match on a literal).
    WordReplace { word: String, with: String },
    /// Insert text at the start of the message.
    Prefix { text: String },
    /// Insert text at the end of the message.
    Suffix { text: String },
    /// Transform letter casing.
    Case { style: CaseStyle },
}

/// One ordered rule in a quirk set.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct QuirkRule {
    #[serde(flatten)]
    pub kind: QuirkKind,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl QuirkRule {
    pub fn new(kind: QuirkKind) -> Self {
        Self {
            kind,
            enabled: true,
        }
    }
}

/// Result of running a quirk pipeline: the transformed text plus any
/// warnings from rules that had to be skipped.
#[derive(Debug, Clone)]
pub struct QuirkOutput {
    pub text: String,
    pub warnings: Vec<String>,
}

/// A named, user-ordered sequence of quirk rules owned by one profile.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct QuirkSet {
    pub name: String,
    pub rules: Vec<QuirkRule>,
}

impl QuirkSet {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            rules: Vec::new(),
        }
    }

    /// Append a rule at the end of the sequence.
    pub fn add(&mut self, rule: QuirkRule) {
        self.rules.push(rule);
    }

    /// Remove the rule at `index`, returning it if the index was valid.
    pub fn remove(&mut self, index: usize) -> Option<QuirkRule> {
        if index < self.rules.len() {
            Some(self.rules.remove(index))
        } else {
            None
        }
    }

    /// Move a rule from one position to another, preserving the relative
    /// order of the remaining rules. Returns false on an out-of-range index.
    pub fn move_rule(&mut self, from: usize, to: usize) -> bool {
        if from >= self.rules.len() || to >= self.rules.len() {
            return false;
        }
        let rule = self.rules.remove(from);
        self.rules.insert(to, rule);
        true
    }

    /// Flip the enabled flag of the rule at `index`, returning the new state.
    pub fn toggle(&mut self, index: usize) -> Option<bool> {
        let rule = self.rules.get_mut(index)?;
        rule.enabled = !rule.enabled;
        Some(rule.enabled)
    }

    /// Apply every enabled rule in order to `input`.
    ///
    /// Each rule sees the output of the previous one in a single
    /// left-to-right pass; disabled rules are skipped entirely. A rule with
    /// an invalid pattern is skipped with a warning and never blocks the
    /// rest of the pipeline.
    pub fn process(&self, input: &str) -> QuirkOutput {
        let mut text = input.to_string();
        let mut warnings = Vec::new();

        for (i, rule) in self.rules.iter().enumerate() {
            if !rule.enabled {
                continue;
            }
            match apply_kind(&rule.kind, &text) {
                Ok(next) => text = next,
                Err(e) => warnings.push(format!("Quirk rule {} skipped: {}", i + 1, e)),
            }
        }

        QuirkOutput { text, warnings }
    }
}

/// Apply one rule kind to `input`. Only pattern-based kinds can fail.
fn apply_kind(kind: &QuirkKind, input: &str) -> Result<String, String> {
    match kind {
        QuirkKind::Replace { find, with } => Ok(input.replace(find.as_str(), with)),
        QuirkKind::Regex { pattern, with } => {
            let re = Regex::new(pattern)
                .map_err(|e| format!("invalid pattern \"{}\": {}", pattern, e))?;
            Ok(re.replace_all(input, with.as_str()).into_owned())
        }
        QuirkKind::WordReplace { word, with } => {
            let pattern = format!(r"\b{}\b", regex::escape(word));
            let re = Regex::new(&pattern)
                .map_err(|e| format!("invalid word \"{}\": {}", word, e))?;
            Ok(re.replace_all(input, with.as_str()).into_owned())
        }
        QuirkKind::Prefix { text } => Ok(format!("{}{}", text, input)),
        QuirkKind::Suffix { text } => Ok(format!("{}{}", input, text)),
        QuirkKind::Case { style } => Ok(apply_case(*style, input)),
    }
}

fn apply_case(style: CaseStyle, input: &str) -> String {
    match style {
        CaseStyle::Upper => input.to_uppercase(),
        CaseStyle::Lower => input.to_lowercase(),
        CaseStyle::Alternating => {
            let mut nth_letter = 0usize;
            input
                .chars()
                .flat_map(|c| {
                    if c.is_alphabetic() {
                        nth_letter += 1;
                        if nth_letter % 2 == 1 {
                            c.to_uppercase().collect::<Vec<_>>()
                        } else {
                            c.to_lowercase().collect::<Vec<_>>()
                        }
                    } else {
                        vec![c]
                    }
                })
                .collect()
        }
        CaseStyle::Reversed => input
            .chars()
            .flat_map(|c| {
                if c.is_uppercase() {
                    c.to_lowercase().collect::<Vec<_>>()
                } else if c.is_lowercase() {
                    c.to_uppercase().collect::<Vec<_>>()
                } else {
                    vec![c]
                }
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn replace(find: &str, with: &str) -> QuirkRule {
        QuirkRule::new(QuirkKind::Replace {
            find: find.to_string(),
            with: with.to_string(),
        })
    }

    #[test]
    fn test_empty_set_is_identity() {
        let set = QuirkSet::new("none");
        let out = set.process("hello there");
        assert_eq!(out.text, "hello there");
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_all_disabled_is_identity() {
        let mut set = QuirkSet::new("off");
        let mut rule = replace("a", "b");
        rule.enabled = false;
        set.add(rule);
        let mut rule = QuirkRule::new(QuirkKind::Case {
            style: CaseStyle::Upper,
        });
        rule.enabled = false;
        set.add(rule);

        assert_eq!(set.process("aaa").text, "aaa");
    }

    #[test]
    fn test_rule_order_is_significant() {
        let mut forward = QuirkSet::new("fwd");
        forward.add(replace("a", "b"));
        forward.add(replace("b", "c"));
        assert_eq!(forward.process("a").text, "c");

        let mut backward = QuirkSet::new("bwd");
        backward.add(replace("b", "c"));
        backward.add(replace("a", "b"));
        assert_eq!(backward.process("a").text, "b");
    }

    #[test]
    fn test_invalid_regex_is_isolated() {
        let mut set = QuirkSet::new("mixed");
        set.add(QuirkRule::new(QuirkKind::Regex {
            pattern: "(unclosed".to_string(),
            with: "x".to_string(),
        }));
        set.add(replace("hello", "hi"));

        let out = set.process("hello");
        assert_eq!(out.text, "hi");
        assert_eq!(out.warnings.len(), 1);
        assert!(out.warnings[0].contains("rule 1"));
    }

    #[test]
    fn test_regex_capture_groups() {
        let mut set = QuirkSet::new("caps");
        set.add(QuirkRule::new(QuirkKind::Regex {
            pattern: r"(\w+)@(\w+)".to_string(),
            with: "$2 at $1".to_string(),
        }));
        assert_eq!(set.process("me@here").text, "here at me");
    }

    #[test]
    fn test_word_boundary_substitution() {
        let mut set = QuirkSet::new("words");
        set.add(QuirkRule::new(QuirkKind::WordReplace {
            word: "cat".to_string(),
            with: "dog".to_string(),
        }));
        assert_eq!(set.process("cat catalog cat").text, "dog catalog dog");
    }

    #[test]
    fn test_prefix_and_suffix() {
        let mut set = QuirkSet::new("frame");
        set.add(QuirkRule::new(QuirkKind::Prefix {
            text: ">> ".to_string(),
        }));
        set.add(QuirkRule::new(QuirkKind::Suffix {
            text: " <<".to_string(),
        }));
        assert_eq!(set.process("hi").text, ">> hi <<");
    }

    #[test]
    fn test_alternating_case_counts_letters_only() {
        let mut set = QuirkSet::new("alt");
        set.add(QuirkRule::new(QuirkKind::Case {
            style: CaseStyle::Alternating,
        }));
        // Punctuation and spaces do not consume a parity slot.
        assert_eq!(set.process("ab, cd").text, "Ab, Cd");
    }

    #[test]
    fn test_reversed_case() {
        let mut set = QuirkSet::new("rev");
        set.add(QuirkRule::new(QuirkKind::Case {
            style: CaseStyle::Reversed,
        }));
        assert_eq!(set.process("aBc 123").text, "AbC 123");
    }

    #[test]
    fn test_idempotent_when_output_cannot_retrigger() {
        let mut set = QuirkSet::new("idem");
        set.add(QuirkRule::new(QuirkKind::Case {
            style: CaseStyle::Upper,
        }));
        set.add(replace("AA", "XY"));

        let once = set.process("aab").text;
        let twice = set.process(&once).text;
        assert_eq!(once, "XYB");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_rule_can_strip_all_content() {
        let mut set = QuirkSet::new("strip");
        set.add(QuirkRule::new(QuirkKind::Regex {
            pattern: ".*".to_string(),
            with: "".to_string(),
        }));
        assert_eq!(set.process("anything").text, "");
    }

    #[test]
    fn test_add_remove_move_toggle() {
        let mut set = QuirkSet::new("edit");
        set.add(replace("a", "1"));
        set.add(replace("b", "2"));
        set.add(replace("c", "3"));

        assert!(set.move_rule(2, 0));
        assert_eq!(
            set.rules[0].kind,
            QuirkKind::Replace {
                find: "c".to_string(),
                with: "3".to_string()
            }
        );
        assert!(!set.move_rule(0, 5));

        assert_eq!(set.toggle(1), Some(false));
        assert_eq!(set.toggle(1), Some(true));
        assert_eq!(set.toggle(9), None);

        assert!(set.remove(0).is_some());
        assert_eq!(set.rules.len(), 2);
        assert!(set.remove(9).is_none());
    }

    #[test]
    fn test_rule_records_round_trip() {
        let mut set = QuirkSet::new("persist");
        set.add(replace("u", "you"));
        set.add(QuirkRule::new(QuirkKind::Case {
            style: CaseStyle::Alternating,
        }));
        set.rules[1].enabled = false;

        let json = serde_json::to_string_pretty(&set).unwrap();
        let back: QuirkSet = serde_json::from_str(&json).unwrap();
        assert_eq!(set, back);
        // Order survives the round trip.
        assert!(matches!(back.rules[0].kind, QuirkKind::Replace { .. }));
        assert!(!back.rules[1].enabled);
    }

    #[test]
    fn test_missing_enabled_defaults_to_true() {
        let json = r#"{ "kind": "replace", "find": "a", "with": "b" }"#;
        let rule: QuirkRule = serde_json::from_str(json).unwrap();
        assert!(rule.enabled);
    }
}
