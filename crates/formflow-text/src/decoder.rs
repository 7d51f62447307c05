//! Free text to actions.
//!
//! This is a best-effort classifier, not a grammar. Input is lower-cased and
//! trimmed, assigned a [`Verb`] family (see [`crate::verbs::classify`]), and
//! then mined for a field path, a value and an array index with a handful of
//! patterns. Nothing here fails: text that does not yield an action decodes
//! to `None`.

use std::sync::LazyLock;

use formflow_model::Action;
use regex::Regex;
use serde::Serialize;
use serde_json::{Number, Value};
use tracing::trace;

use crate::verbs::{Verb, classify};

/// Dotted identifier chain.
static PATH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[a-z_][a-z0-9_]*(?:\.[a-z0-9_]+)*\b").expect("Invalid path regex")
});

/// `to X`, `as X`, `value is X` with X quoted or bare.
static VALUE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\b(?:to|as|value\s+is)\s+(?:"([^"]*)"|'([^']*)'|([^\s,;]+))"#)
        .expect("Invalid value regex")
});

/// Explicit value anchors that do not collide with `add X to Y`.
static EXPLICIT_VALUE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\b(?:as|value\s+is)\s+(?:"([^"]*)"|'([^']*)'|([^\s,;]+))"#)
        .expect("Invalid explicit value regex")
});

/// `[N]` or `at (position|index) N`.
static INDEX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[(\d+)\]|\bat\s+(?:(?:position|index)\s+)?(\d+)\b").expect("Invalid index regex")
});

static TARGET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:to|into|onto)\b").expect("Invalid target regex"));

static FROM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bfrom\b").expect("Invalid from regex"));

static INT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d+$").expect("Invalid integer regex"));

static FLOAT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d*\.\d+$").expect("Invalid float regex"));

/// Words that never name a field.
pub const STOPWORDS: &[&str] = &[
    "a", "all", "an", "and", "as", "at", "end", "entry", "element", "field", "first", "from",
    "in", "index", "into", "is", "item", "items", "last", "my", "new", "of", "onto", "please",
    "position", "the", "then", "this", "to", "value", "values", "with",
];

/// Articles and fillers dropped from an `add X to Y` item phrase.
const ITEM_FILLERS: &[&str] = &["a", "an", "the", "new", "item", "another", "one", "entry"];

/// One clause of a multi-instruction input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextIntent {
    pub verb: Option<Verb>,
    pub target: String,
    pub value: Option<Value>,
    pub index: Option<usize>,
    /// The clause referred to the end of an array ("last", "end").
    pub at_end: bool,
}

impl TextIntent {
    /// Convert using the same rules as [`decode`].
    pub fn to_action(&self) -> Option<Action> {
        build_action(
            self.verb?,
            Some(&self.target),
            self.value.clone(),
            self.index,
            self.at_end,
        )
    }
}

/// Decode one instruction into at most one action.
pub fn decode(text: &str) -> Option<Action> {
    let text = normalize(text);
    let clause = parse_clause(&text);
    let verb = clause.verb?;
    let action = build_action(
        verb,
        clause.path.as_deref(),
        clause.value,
        clause.index,
        clause.at_end,
    );
    trace!(input = %text, action = action.as_ref().map(Action::kind), "decoded");
    action
}

/// Split on commas and semicolons and parse each clause.
///
/// Clauses without a recognizable field path are dropped.
pub fn decode_to_intents(text: &str) -> Vec<TextIntent> {
    clauses(text)
        .into_iter()
        .filter_map(|clause| {
            let parsed = parse_clause(&clause);
            Some(TextIntent {
                verb: parsed.verb,
                target: parsed.path?,
                value: parsed.value,
                index: parsed.index,
                at_end: parsed.at_end,
            })
        })
        .collect()
}

/// Decode every clause with [`decode`], keeping those that yield an action.
pub fn decode_all(text: &str) -> Vec<Action> {
    clauses(text)
        .iter()
        .filter_map(|clause| decode(clause))
        .collect()
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

fn clauses(text: &str) -> Vec<String> {
    normalize(text)
        .split([',', ';'])
        .map(str::trim)
        .filter(|clause| !clause.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Default)]
struct Clause {
    verb: Option<Verb>,
    path: Option<String>,
    value: Option<Value>,
    index: Option<usize>,
    at_end: bool,
}

fn parse_clause(text: &str) -> Clause {
    let matched = classify(text);
    let rest = matched.map_or(text, |m| &text[m.rest..]);
    let masked = mask_quoted(rest);
    let index = extract_index(rest);

    let Some(matched) = matched else {
        return Clause {
            path: first_path(&masked),
            value: extract_value(rest, &VALUE_RE),
            index,
            ..Clause::default()
        };
    };

    match matched.verb {
        Verb::Reset => Clause {
            verb: Some(Verb::Reset),
            path: first_path(&masked),
            ..Clause::default()
        },
        Verb::Set | Verb::Toggle => {
            let anchor = VALUE_RE.find(&masked).map_or(masked.len(), |m| m.start());
            let path = first_path(&masked[..anchor]).or_else(|| first_path(&masked));
            let mut value = extract_value(rest, &VALUE_RE);
            if matched.verb == Verb::Toggle && value.is_none() {
                let off = ["disable", "uncheck"]
                    .iter()
                    .any(|prefix| matched.word.starts_with(prefix));
                value = Some(Value::Bool(!off));
            }
            Clause {
                verb: Some(matched.verb),
                path,
                value,
                index,
                at_end: false,
            }
        }
        Verb::Add => {
            let (item, path) = match TARGET_RE.find(&masked) {
                Some(m) => (
                    item_value(&rest[..m.start()]),
                    first_path(&masked[m.end()..]),
                ),
                None => (None, first_path(&masked)),
            };
            let value = extract_value(rest, &EXPLICIT_VALUE_RE).or(item);
            Clause {
                verb: Some(Verb::Add),
                path,
                value,
                index,
                at_end: false,
            }
        }
        Verb::Remove => {
            let path = FROM_RE
                .find(&masked)
                .and_then(|m| first_path(&masked[m.end()..]))
                .or_else(|| first_path(&masked));
            let at_end = has_word(&masked, "last") || has_word(&masked, "end");
            let index = index.or_else(|| has_word(&masked, "first").then_some(0));
            Clause {
                verb: Some(Verb::Remove),
                path,
                value: None,
                index,
                at_end,
            }
        }
    }
}

fn build_action(
    verb: Verb,
    path: Option<&str>,
    value: Option<Value>,
    index: Option<usize>,
    at_end: bool,
) -> Option<Action> {
    let path = path.map(str::to_string);
    match verb {
        Verb::Reset => Some(Action::Reset),
        Verb::Set => Some(Action::SetField {
            path: path?,
            value: value?,
        }),
        Verb::Toggle => Some(Action::SetField {
            path: path?,
            value: value.unwrap_or(Value::Bool(true)),
        }),
        Verb::Add => {
            let path = path?;
            let value = value.unwrap_or(Value::Null);
            Some(match index {
                Some(index) => Action::ArrayInsert { path, index, value },
                None => Action::ArrayPush { path, value },
            })
        }
        Verb::Remove => {
            let path = path?;
            if at_end {
                Some(Action::ArrayPop { path })
            } else {
                index.map(|index| Action::ArrayRemove { path, index })
            }
        }
    }
}

/// Replace the contents of quoted spans with spaces, keeping byte offsets.
fn mask_quoted(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut open: Option<char> = None;
    for ch in text.chars() {
        match open {
            Some(quote) if ch == quote => {
                open = None;
                out.push(ch);
            }
            Some(_) => out.extend(std::iter::repeat_n(' ', ch.len_utf8())),
            None => {
                if ch == '"' {
                    open = Some(ch);
                }
                out.push(ch);
            }
        }
    }
    out
}

fn first_path(text: &str) -> Option<String> {
    PATH_RE
        .find_iter(text)
        .map(|m| m.as_str())
        .find(|candidate| !STOPWORDS.contains(candidate) && !is_verb_word(candidate))
        .map(str::to_string)
}

fn is_verb_word(word: &str) -> bool {
    crate::verbs::PRIORITY
        .iter()
        .any(|verb| verb.words().contains(&word))
}

fn has_word(text: &str, word: &str) -> bool {
    text.split(|c: char| !c.is_alphanumeric() && c != '_')
        .any(|token| token == word)
}

fn extract_value(text: &str, pattern: &Regex) -> Option<Value> {
    let caps = pattern.captures(text)?;
    if let Some(quoted) = caps.get(1).or_else(|| caps.get(2)) {
        return Some(Value::String(quoted.as_str().to_string()));
    }
    let bare = caps.get(3)?.as_str().trim_end_matches(['.', '!', '?']);
    Some(coerce(bare))
}

fn extract_index(text: &str) -> Option<usize> {
    let caps = INDEX_RE.captures(text)?;
    caps.get(1).or_else(|| caps.get(2))?.as_str().parse().ok()
}

/// Value named between the verb and `to`/`into`/`onto` in an add clause.
fn item_value(phrase: &str) -> Option<Value> {
    let phrase = phrase.trim();
    if let Some(inner) = phrase
        .strip_prefix('"')
        .and_then(|p| p.strip_suffix('"'))
    {
        return Some(Value::String(inner.to_string()));
    }
    let words: Vec<&str> = phrase
        .split_whitespace()
        .filter(|word| !ITEM_FILLERS.contains(word))
        .collect();
    match words.as_slice() {
        [] => None,
        [single] => Some(coerce(single)),
        many => Some(Value::String(many.join(" "))),
    }
}

/// Coerce a bare token: booleans, null, integers, decimals, else string.
fn coerce(token: &str) -> Value {
    match token {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        "null" | "undefined" => return Value::Null,
        _ => {}
    }
    let integer = INT_RE.is_match(token);
    if integer && let Ok(n) = token.parse::<i64>() {
        return Value::from(n);
    }
    if (integer || FLOAT_RE.is_match(token))
        && let Some(n) = token.parse::<f64>().ok().and_then(Number::from_f64)
    {
        return Value::Number(n);
    }
    Value::String(token.to_string())
}
