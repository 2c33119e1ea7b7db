//! Command extraction from agent text.
//!
//! Two syntaxes are recognized:
//! - inline lines: `/canvas <verb> [<target>] [<json-object-or-text>]`
//! - one fenced code block holding a command object or an array of them
//!
//! Inline matches are emitted first, then fenced-block matches. Only the
//! first fenced block in a message is considered.

use crate::command::model::{Command, CommandVerb};
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use std::fmt::{Display, Formatter};

/// Prefix that marks an inline command line.
pub const COMMAND_PREFIX: &str = "/canvas";

// Target tokens cannot start with `{` or `[` so a bare JSON tail is never
// mistaken for an element type or id.
static INLINE_COMMAND_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?:^|\s){}\s+(\S+)(?:\s+([^\s{{\[]\S*))?(?:\s+(.*?))?\s*$",
        regex::escape(COMMAND_PREFIX)
    ))
    .expect("valid inline command regex")
});
static FENCED_BLOCK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```[\w+\-]*[ \t]*\r?\n?(.*?)```").expect("valid fenced block regex")
});

/// Recoverable problem found while parsing one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseIssue {
    /// Inline tail was not a JSON object and was kept as `{"text": ...}`.
    InlineTailAsText { line: usize },
    /// Fenced block content is not valid JSON; the block was dropped.
    InvalidBlockJson { message: String },
    /// Fenced block is valid JSON but neither an array nor a command object.
    BlockNotCommand,
    /// One array item did not have command shape and was skipped.
    InvalidBlockItem { index: usize, message: String },
}

impl Display for ParseIssue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InlineTailAsText { line } => {
                write!(f, "line {line}: inline payload is not a JSON object, kept as text")
            }
            Self::InvalidBlockJson { message } => {
                write!(f, "fenced block dropped, invalid JSON: {message}")
            }
            Self::BlockNotCommand => write!(
                f,
                "fenced block dropped, expected an array or an object with `command`"
            ),
            Self::InvalidBlockItem { index, message } => {
                write!(f, "fenced block item {index} skipped: {message}")
            }
        }
    }
}

/// Commands extracted from one message plus recovered issues.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedMessage {
    pub commands: Vec<Command>,
    pub issues: Vec<ParseIssue>,
}

/// Extracts the ordered command list from `text`.
pub fn parse_commands(text: &str) -> Vec<Command> {
    parse_message(text).commands
}

/// Extracts commands and reports every recovered parse issue.
pub fn parse_message(text: &str) -> ParsedMessage {
    let mut parsed = ParsedMessage::default();
    parse_inline(text, &mut parsed);
    let inline_count = parsed.commands.len();
    parse_fenced_block(text, &mut parsed);

    debug!(
        "event=message_parse module=parser status=ok inline={} block={} issues={}",
        inline_count,
        parsed.commands.len() - inline_count,
        parsed.issues.len()
    );
    parsed
}

fn parse_inline(text: &str, parsed: &mut ParsedMessage) {
    for (index, line) in text.lines().enumerate() {
        let Some(captures) = INLINE_COMMAND_RE.captures(line) else {
            continue;
        };
        let Some(verb) = captures.get(1) else {
            continue;
        };

        let mut command = Command::new(verb.as_str());
        if let Some(target) = captures.get(2) {
            if is_create(verb.as_str()) {
                command.element_type = Some(target.as_str().to_string());
            } else {
                command.element_id = Some(target.as_str().to_string());
            }
        }
        if let Some(tail) = captures.get(3).map(|m| m.as_str().trim()) {
            if !tail.is_empty() {
                let (params, as_text) = inline_params(tail);
                if as_text {
                    parsed.issues.push(ParseIssue::InlineTailAsText { line: index + 1 });
                }
                command.params = Some(params);
            }
        }
        parsed.commands.push(command);
    }
}

fn is_create(verb: &str) -> bool {
    verb.parse::<CommandVerb>()
        .is_ok_and(|parsed| parsed == CommandVerb::Create)
}

/// Returns the tail as a JSON object, or `{"text": tail}` when it is not one.
fn inline_params(tail: &str) -> (Map<String, Value>, bool) {
    match serde_json::from_str::<Value>(tail) {
        Ok(Value::Object(params)) => (params, false),
        _ => {
            let mut params = Map::new();
            params.insert("text".to_string(), Value::String(tail.to_string()));
            (params, true)
        }
    }
}

fn parse_fenced_block(text: &str, parsed: &mut ParsedMessage) {
    let Some(body) = FENCED_BLOCK_RE
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().trim())
    else {
        return;
    };

    let value = match serde_json::from_str::<Value>(body) {
        Ok(value) => value,
        Err(err) => {
            warn!(
                "event=block_parse module=parser status=error reason=invalid_json line={} column={}",
                err.line(),
                err.column()
            );
            parsed.issues.push(ParseIssue::InvalidBlockJson {
                message: err.to_string(),
            });
            return;
        }
    };

    match value {
        Value::Array(items) => {
            for (index, item) in items.into_iter().enumerate() {
                match block_command(item) {
                    Ok(command) => parsed.commands.push(command),
                    Err(message) => {
                        warn!(
                            "event=block_parse module=parser status=error reason=invalid_item index={index}"
                        );
                        parsed
                            .issues
                            .push(ParseIssue::InvalidBlockItem { index, message });
                    }
                }
            }
        }
        Value::Object(fields) if fields.contains_key("command") => {
            match block_command(Value::Object(fields)) {
                Ok(command) => parsed.commands.push(command),
                Err(message) => {
                    warn!("event=block_parse module=parser status=error reason=invalid_object");
                    parsed
                        .issues
                        .push(ParseIssue::InvalidBlockItem { index: 0, message });
                }
            }
        }
        _ => {
            warn!("event=block_parse module=parser status=error reason=not_a_command");
            parsed.issues.push(ParseIssue::BlockNotCommand);
        }
    }
}

/// Builds a command from one block value, checking shape only.
///
/// Scalar `command`/`elementType`/`elementId` values are taken as text and a
/// non-object `params` is treated as absent, so content problems surface as
/// executor failures rather than dropped commands.
fn block_command(value: Value) -> Result<Command, String> {
    let Value::Object(mut fields) = value else {
        return Err("expected an object with a `command` field".to_string());
    };
    let verb = fields
        .get("command")
        .and_then(scalar_text)
        .ok_or_else(|| "`command` must be a string, number or boolean".to_string())?;

    Ok(Command {
        verb,
        element_type: fields.get("elementType").and_then(scalar_text),
        element_id: fields.get("elementId").and_then(scalar_text),
        params: match fields.remove("params") {
            Some(Value::Object(params)) => Some(params),
            _ => None,
        },
    })
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
