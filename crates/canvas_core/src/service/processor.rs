//! Message processing: parse agent text, then execute every command in order.

use crate::command::model::Command;
use crate::command::parser::{parse_message, ParseIssue};
use crate::service::executor::{CommandExecutor, CommandResult};
use crate::store::element_store::{ElementStore, InMemoryElementStore};
use log::info;

/// One parsed command together with its outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedCommand {
    pub command: Command,
    pub result: CommandResult,
}

/// Ordered outcomes of one agent message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    pub commands: Vec<ProcessedCommand>,
    pub issues: Vec<ParseIssue>,
}

impl BatchReport {
    pub fn results(&self) -> impl Iterator<Item = &CommandResult> {
        self.commands.iter().map(|processed| &processed.result)
    }

    pub fn into_results(self) -> Vec<CommandResult> {
        self.commands
            .into_iter()
            .map(|processed| processed.result)
            .collect()
    }

    pub fn succeeded(&self) -> usize {
        self.results().filter(|result| result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.commands.len() - self.succeeded()
    }
}

/// Composes parser and executor over one owned scene.
pub struct MessageProcessor<S: ElementStore> {
    executor: CommandExecutor<S>,
}

impl MessageProcessor<InMemoryElementStore> {
    /// Creates a processor over a fresh, empty in-memory scene.
    pub fn in_memory() -> Self {
        Self::new(InMemoryElementStore::new())
    }
}

impl<S: ElementStore> MessageProcessor<S> {
    pub fn new(store: S) -> Self {
        Self {
            executor: CommandExecutor::new(store),
        }
    }

    pub fn store(&self) -> &S {
        self.executor.store()
    }

    pub fn store_mut(&mut self) -> &mut S {
        self.executor.store_mut()
    }

    pub fn into_store(self) -> S {
        self.executor.into_store()
    }

    /// Parses `text` and executes every extracted command in order.
    ///
    /// Earlier failures never stop later commands.
    pub fn process(&mut self, text: &str) -> BatchReport {
        let parsed = parse_message(text);
        let commands = parsed
            .commands
            .into_iter()
            .map(|command| {
                let result = self.executor.execute(&command);
                ProcessedCommand { command, result }
            })
            .collect();

        let report = BatchReport {
            commands,
            issues: parsed.issues,
        };
        info!(
            "event=batch_process module=processor status=ok commands={} succeeded={} failed={} issues={} scene_size={}",
            report.commands.len(),
            report.succeeded(),
            report.failed(),
            report.issues.len(),
            self.executor.store().len()
        );
        report
    }
}
