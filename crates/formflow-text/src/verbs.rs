//! Verb families and sentence classification.

use serde::{Deserialize, Serialize};
use tracing::trace;

/// A family of verbs that map to the same kind of action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verb {
    Reset,
    Set,
    Toggle,
    Add,
    Remove,
}

/// Families in the order they are tested; the first match wins.
pub const PRIORITY: [Verb; 5] = [Verb::Reset, Verb::Set, Verb::Toggle, Verb::Add, Verb::Remove];

impl Verb {
    pub fn words(&self) -> &'static [&'static str] {
        match self {
            Self::Set => &[
                "set", "changed", "change", "update", "modified", "modify", "filled", "fill",
            ],
            Self::Toggle => &[
                "toggle", "enabled", "enable", "disabled", "disable", "unchecked", "uncheck",
                "checked", "check",
            ],
            Self::Reset => &["reset", "clear", "empty"],
            Self::Add => &["add", "append", "push", "insert"],
            Self::Remove => &["remove", "delete", "pop", "drop"],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reset => "reset",
            Self::Set => "set",
            Self::Toggle => "toggle",
            Self::Add => "add",
            Self::Remove => "remove",
        }
    }
}

/// The family a sentence belongs to and where the text after the verb begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerbMatch {
    pub verb: Verb,
    pub word: &'static str,
    /// Byte offset of the text following the verb.
    pub rest: usize,
}

/// Classify normalized (lower-cased, trimmed) text.
///
/// A family matches when the text starts with one of its words, or contains
/// the word with a space on each side.
pub fn classify(text: &str) -> Option<VerbMatch> {
    for verb in PRIORITY {
        for &word in verb.words() {
            if text.starts_with(word) {
                let rest = text.find(char::is_whitespace).unwrap_or(text.len());
                trace!(verb = verb.as_str(), word, "classified by leading verb");
                return Some(VerbMatch { verb, word, rest });
            }
            if let Some(pos) = text.find(&format!(" {word} ")) {
                trace!(verb = verb.as_str(), word, "classified by inner verb");
                return Some(VerbMatch {
                    verb,
                    word,
                    rest: pos + word.len() + 2,
                });
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn family(text: &str) -> Option<Verb> {
        classify(text).map(|m| m.verb)
    }

    #[test]
    fn reset_outranks_set() {
        assert_eq!(family("reset the saturation field"), Some(Verb::Reset));
        assert_eq!(family("please clear and set x to 1"), Some(Verb::Reset));
    }

    #[test]
    fn leading_and_inner_verbs() {
        assert_eq!(family("set background to forest"), Some(Verb::Set));
        assert_eq!(family("please set background to forest"), Some(Verb::Set));
        assert_eq!(family("changed shadows from 1 to 3"), Some(Verb::Set));
        assert_eq!(family("enable hdr"), Some(Verb::Toggle));
        assert_eq!(family("append tree to objects"), Some(Verb::Add));
        assert_eq!(family("remove the last item from objects"), Some(Verb::Remove));
        assert_eq!(family("what is this"), None);
    }

    #[test]
    fn rest_offsets() {
        let m = classify("changed shadows from 1 to 3").unwrap();
        assert_eq!(&"changed shadows from 1 to 3"[m.rest..], " shadows from 1 to 3");

        let text = "now set x to 1";
        let m = classify(text).unwrap();
        assert_eq!(m.word, "set");
        assert_eq!(&text[m.rest..], "x to 1");
    }

    #[test]
    fn uncheck_is_not_check() {
        let m = classify("unchecked subtitles").unwrap();
        assert_eq!(m.verb, Verb::Toggle);
        assert_eq!(m.word, "unchecked");
    }
}
