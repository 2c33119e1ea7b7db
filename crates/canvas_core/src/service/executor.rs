//! Command execution against an element store.
//!
//! # Responsibility
//! - Validate one command and fill per-variant defaults on create.
//! - Delegate every scene change to `ElementStore`.
//!
//! # Invariants
//! - Failures are returned as values; no command panics or aborts a batch.
//! - A failed command never mutates the store.
//! - `update` can never change an element's variant.

use crate::command::model::{Command, CommandVerb};
use crate::model::element::{is_reserved_patch_key, ElementId, ElementKind, ElementProps};
use crate::store::element_store::{ElementStore, StoreError};
use log::{debug, info};
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Per-command outcome.
pub type CommandResult = Result<CommandEffect, CommandError>;

/// Successful scene change produced by one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandEffect {
    Created(ElementId),
    Updated(ElementId),
    /// Delete is idempotent; `existed` reports whether anything was removed.
    Deleted { id: ElementId, existed: bool },
    Cleared { removed: usize },
    Selected(ElementId),
    Deselected,
}

impl CommandEffect {
    /// Affected element id, if the verb reports one.
    pub fn element_id(&self) -> Option<&ElementId> {
        match self {
            Self::Created(id) | Self::Updated(id) | Self::Selected(id) => Some(id),
            Self::Deleted { id, .. } => Some(id),
            Self::Cleared { .. } | Self::Deselected => None,
        }
    }
}

impl Display for CommandEffect {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Created(id) => write!(f, "created {id}"),
            Self::Updated(id) => write!(f, "updated {id}"),
            Self::Deleted { id, existed: true } => write!(f, "deleted {id}"),
            Self::Deleted { id, existed: false } => {
                write!(f, "deleted {id} (not found, nothing removed)")
            }
            Self::Cleared { removed } => write!(f, "cleared {removed} element(s)"),
            Self::Selected(id) => write!(f, "selected {id}"),
            Self::Deselected => write!(f, "deselected"),
        }
    }
}

/// Local, non-fatal command failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Payload values could not be applied to element fields.
    MalformedCommand(String),
    UnknownVerb(String),
    UnknownElementType(String),
    /// `create` without `elementType`.
    MissingElementType,
    /// Verb requires `elementId` but none was given.
    MissingReference(CommandVerb),
    /// `update` target does not exist.
    NotFound(ElementId),
}

impl CommandError {
    /// Stable snake_case name used in log events.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedCommand(_) => "malformed_command",
            Self::UnknownVerb(_) => "unknown_verb",
            Self::UnknownElementType(_) => "unknown_element_type",
            Self::MissingElementType => "missing_element_type",
            Self::MissingReference(_) => "missing_reference",
            Self::NotFound(_) => "not_found",
        }
    }
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedCommand(message) => write!(f, "malformed command: {message}"),
            Self::UnknownVerb(verb) => write!(f, "unknown command verb: {verb}"),
            Self::UnknownElementType(value) => write!(f, "unknown element type: {value}"),
            Self::MissingElementType => write!(f, "create requires an element type"),
            Self::MissingReference(verb) => write!(f, "{verb} requires an element id"),
            Self::NotFound(id) => write!(f, "element not found: {id}"),
        }
    }
}

impl Error for CommandError {}

impl From<StoreError> for CommandError {
    fn from(value: StoreError) -> Self {
        Self::MalformedCommand(value.to_string())
    }
}

/// Applies commands to an owned element store.
pub struct CommandExecutor<S: ElementStore> {
    store: S,
}

impl<S: ElementStore> CommandExecutor<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Executes one command and returns its effect or failure.
    pub fn execute(&mut self, command: &Command) -> CommandResult {
        let result = self.dispatch(command);
        match &result {
            Ok(effect) => debug!(
                "event=command_execute module=executor status=ok verb={} id={}",
                command.verb,
                effect.element_id().map_or("-", ElementId::as_str)
            ),
            Err(err) => info!(
                "event=command_execute module=executor status=error verb={} error={}",
                command.verb,
                err.kind()
            ),
        }
        result
    }

    fn dispatch(&mut self, command: &Command) -> CommandResult {
        let verb = command
            .parsed_verb()
            .map_err(|err| CommandError::UnknownVerb(err.0))?;

        match verb {
            CommandVerb::Create => self.create(command),
            CommandVerb::Update => self.update(command),
            CommandVerb::Delete => {
                let id = require_reference(command, verb)?;
                let existed = self.store.remove(&id);
                Ok(CommandEffect::Deleted { id, existed })
            }
            CommandVerb::Clear => Ok(CommandEffect::Cleared {
                removed: self.store.clear_all(),
            }),
            CommandVerb::Select => {
                let id = require_reference(command, verb)?;
                self.store.select_element(Some(id.clone()));
                Ok(CommandEffect::Selected(id))
            }
            CommandVerb::Deselect => {
                self.store.clear_selection();
                Ok(CommandEffect::Deselected)
            }
        }
    }

    fn create(&mut self, command: &Command) -> CommandResult {
        let raw_type = command
            .element_type
            .as_deref()
            .ok_or(CommandError::MissingElementType)?;
        let kind = raw_type
            .parse::<ElementKind>()
            .map_err(|err| CommandError::UnknownElementType(err.0))?;
        let props = ElementProps::from_params(kind, command.params.as_ref())
            .map_err(|err| CommandError::MalformedCommand(err.to_string()))?;

        Ok(CommandEffect::Created(self.store.add(props)))
    }

    fn update(&mut self, command: &Command) -> CommandResult {
        let id = require_reference(command, CommandVerb::Update)?;
        if !self.store.contains(&id) {
            return Err(CommandError::NotFound(id));
        }

        let patch = strip_reserved(command.params.as_ref());
        if !self.store.update(&id, &patch)? {
            return Err(CommandError::NotFound(id));
        }
        Ok(CommandEffect::Updated(id))
    }
}

fn require_reference(command: &Command, verb: CommandVerb) -> Result<ElementId, CommandError> {
    match command.element_id.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => Ok(ElementId::from(raw)),
        _ => Err(CommandError::MissingReference(verb)),
    }
}

fn strip_reserved(params: Option<&Map<String, Value>>) -> Map<String, Value> {
    params
        .map(|fields| {
            fields
                .iter()
                .filter(|(key, _)| !is_reserved_patch_key(key))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect()
        })
        .unwrap_or_default()
}
