//! Core scene model and command protocol for agent-driven canvases.
//! This crate is the single writer of scene state.

pub mod command;
pub mod logging;
pub mod model;
pub mod protocol;
pub mod service;
pub mod store;

pub use command::model::{Command, CommandVerb, UnknownVerb};
pub use command::parser::{
    parse_commands, parse_message, ParseIssue, ParsedMessage, COMMAND_PREFIX,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::element::{
    Element, ElementId, ElementKind, ElementProps, Shape, UnknownElementKind, Vec3,
};
pub use protocol::protocol_instructions;
pub use service::executor::{CommandEffect, CommandError, CommandExecutor, CommandResult};
pub use service::processor::{BatchReport, MessageProcessor, ProcessedCommand};
pub use store::element_store::{ElementStore, InMemoryElementStore, StoreError, StoreResult};
pub use store::snapshot::{ElementSnapshot, SceneObserver, SceneSnapshot};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
