// SPDX-FileCopyrightText: 2026 Traktr Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Keyword intent classification for chat messages.
//!
//! Each message gets exactly one [`Intent`]. Keyword lists are checked in
//! priority order and the first list with a case-insensitive substring hit
//! wins. No network, no model call.

use traktr_config::model::ClassifierConfig;
use traktr_core::Intent;

/// Result of classifying a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationResult {
    /// The assigned intent.
    pub intent: Intent,
    /// Keyword that decided it, `None` for [`Intent::Other`].
    pub matched: Option<String>,
}

/// Ordered keyword rules mapping text to an [`Intent`].
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    rules: Vec<(Intent, Vec<String>)>,
}

impl IntentClassifier {
    /// Builds the rule list from configuration. Keywords are lowercased once
    /// here; `Other` never has keywords and is skipped.
    pub fn new(config: &ClassifierConfig) -> Self {
        let rules = config
            .priority
            .iter()
            .filter(|intent| **intent != Intent::Other)
            .map(|&intent| {
                let keywords = config
                    .keywords_for(intent)
                    .iter()
                    .map(|k| k.trim().to_lowercase())
                    .filter(|k| !k.is_empty())
                    .collect();
                (intent, keywords)
            })
            .collect();
        Self { rules }
    }

    /// Classify `text`, reporting the keyword that matched.
    pub fn classify_with_match(&self, text: &str) -> ClassificationResult {
        let lower = text.to_lowercase();
        for (intent, keywords) in &self.rules {
            if let Some(hit) = keywords.iter().find(|k| lower.contains(k.as_str())) {
                return ClassificationResult {
                    intent: *intent,
                    matched: Some(hit.clone()),
                };
            }
        }
        ClassificationResult {
            intent: Intent::Other,
            matched: None,
        }
    }

    /// Classify `text`.
    pub fn classify(&self, text: &str) -> Intent {
        self.classify_with_match(text).intent
    }
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new(&ClassifierConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn classify_field_examples() {
        let c = IntentClassifier::default();
        assert_eq!(c.classify("Need more wire and breakers"), Intent::Materials);
        assert_eq!(c.classify("No power, breaker tripping"), Intent::Issue);
        assert_eq!(
            c.classify("Finished the panel, done for today"),
            Intent::Progress
        );
        assert_eq!(c.classify("hello there"), Intent::Other);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let c = IntentClassifier::default();
        assert_eq!(c.classify("NEED MORE CONDUIT"), Intent::Materials);
        assert_eq!(c.classify("Inspection FAILED"), Intent::Issue);
    }

    #[test]
    fn materials_outrank_issue_by_default() {
        let c = IntentClassifier::default();
        // Both lists hit; materials is checked first.
        let result = c.classify_with_match("ran out of wire, job is stuck");
        assert_eq!(result.intent, Intent::Materials);
        assert!(result.matched.is_some());
    }

    #[test]
    fn priority_is_configurable() {
        let config = ClassifierConfig {
            priority: vec![Intent::Issue, Intent::Materials, Intent::Progress],
            ..ClassifierConfig::default()
        };
        let c = IntentClassifier::new(&config);
        assert_eq!(c.classify("ran out of wire, job is stuck"), Intent::Issue);
    }

    #[test]
    fn custom_keywords_are_normalized() {
        let config = ClassifierConfig {
            materials: vec!["  Romex ".into(), "".into()],
            ..ClassifierConfig::default()
        };
        let c = IntentClassifier::new(&config);
        let result = c.classify_with_match("grab two rolls of romex");
        assert_eq!(result.intent, Intent::Materials);
        assert_eq!(result.matched.as_deref(), Some("romex"));
    }

    #[test]
    fn empty_text_is_other() {
        let c = IntentClassifier::default();
        assert_eq!(c.classify(""), Intent::Other);
        assert_eq!(c.classify_with_match("   ").matched, None);
    }

    proptest! {
        #[test]
        fn other_iff_no_keyword(text in ".{0,80}") {
            let result = IntentClassifier::default().classify_with_match(&text);
            prop_assert_eq!(result.intent == Intent::Other, result.matched.is_none());
        }

        #[test]
        fn ascii_case_does_not_matter(text in "[a-zA-Z ,']{0,60}") {
            let c = IntentClassifier::default();
            prop_assert_eq!(c.classify(&text), c.classify(&text.to_ascii_uppercase()));
        }
    }
}
