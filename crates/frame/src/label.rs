use serde::Serialize;
use std::fmt;

/// A single value at one level of an index key.
///
/// Index keys are tuples of labels, one per level. Text labels take part in
/// prefix matching when margins are filtered; integer labels only ever match
/// exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum Label {
    Int(i64),
    Text(String),
}

impl Label {
    /// Return the text content for string labels.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Label::Text(s) => Some(s.as_str()),
            Label::Int(_) => None,
        }
    }

    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self, Label::Text(_))
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Int(i) => write!(f, "{i}"),
            Label::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for Label {
    fn from(i: i64) -> Self {
        Label::Int(i)
    }
}

impl From<i32> for Label {
    fn from(i: i32) -> Self {
        Label::Int(i64::from(i))
    }
}

impl From<String> for Label {
    fn from(s: String) -> Self {
        Label::Text(s)
    }
}

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Label::Text(s.to_string())
    }
}

impl From<&String> for Label {
    fn from(s: &String) -> Self {
        Label::Text(s.clone())
    }
}
