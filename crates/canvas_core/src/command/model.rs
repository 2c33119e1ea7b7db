//! Structured command record.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Recognized command verbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandVerb {
    Create,
    Update,
    Delete,
    Clear,
    Select,
    Deselect,
}

impl CommandVerb {
    pub const ALL: [Self; 6] = [
        Self::Create,
        Self::Update,
        Self::Delete,
        Self::Clear,
        Self::Select,
        Self::Deselect,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Clear => "clear",
            Self::Select => "select",
            Self::Deselect => "deselect",
        }
    }
}

impl Display for CommandVerb {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommandVerb {
    type Err = UnknownVerb;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|verb| verb.as_str() == normalized)
            .ok_or_else(|| UnknownVerb(value.to_string()))
    }
}

/// Raised when a verb is outside the protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVerb(pub String);

impl Display for UnknownVerb {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown command verb: {}", self.0)
    }
}

impl Error for UnknownVerb {}

/// One instruction extracted from agent text.
///
/// `verb` and `element_type` stay raw so unknown values surface as executor
/// failures instead of being lost during parsing. The wire form matches the
/// fenced-block syntax: `{"command": ..., "elementType": ..., ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Command {
    #[serde(rename = "command")]
    pub verb: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Map<String, Value>>,
}

impl Command {
    pub fn new(verb: impl Into<String>) -> Self {
        Self {
            verb: verb.into(),
            element_type: None,
            element_id: None,
            params: None,
        }
    }

    pub fn with_element_type(mut self, element_type: impl Into<String>) -> Self {
        self.element_type = Some(element_type.into());
        self
    }

    pub fn with_element_id(mut self, element_id: impl Into<String>) -> Self {
        self.element_id = Some(element_id.into());
        self
    }

    pub fn with_params(mut self, params: Map<String, Value>) -> Self {
        self.params = Some(params);
        self
    }

    /// Resolves the raw verb against the protocol.
    pub fn parsed_verb(&self) -> Result<CommandVerb, UnknownVerb> {
        self.verb.parse()
    }
}
