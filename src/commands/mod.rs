//! Command handlers for the moneypath CLI.
//!
//! This module contains implementations for all CLI subcommands.

mod delete;
mod insert;
mod report;
mod rollover;

use crate::backup::ROLLOVER_PRE;
use crate::clock::Clock;
use crate::rollover::Rollover;
use crate::store::Store;
use crate::Config;
use serde::Serialize;
use std::fmt::Debug;
use tracing::{debug, error, info};

pub use delete::{delete_shared_expense, delete_transaction};
pub use insert::{insert_roommate, insert_shared_expense, insert_transaction};
pub use report::{history, summary};
pub use rollover::rollover;

/// The output type for a command. This allows the command to return a consistent message and,
/// optionally, structured data.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be printed to the user regarding the outcome of the command execution.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,
}

impl<T, S> From<S> for Out<T>
where
    T: Debug + Clone + Serialize,
    S: Into<String>,
{
    fn from(value: S) -> Self {
        Out::new_message(value)
    }
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
        }
    }

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
        }
    }

    /// Get the `message`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the structured data stored in `structure`.
    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    /// Print the message to `info!` and the structured data (if it exists) as JSON to `debug!`.
    pub fn print(&self) {
        info!("{}", self.message);
        if let Some(structure) = self.structure() {
            if let Ok(json) = serde_json::to_string_pretty(structure) {
                debug!("Command output:\n\n{json}\n\n");
            }
        }
    }
}

/// Starts a session against the data file named by `config`.
///
/// Loads the document and runs the month rollover check. When the check is about to archive a
/// month, the document is first backed up; a failed backup is logged and the rollover goes ahead.
pub fn open(config: &Config, clock: Box<dyn Clock>) -> (Store, Rollover) {
    let mut store = Store::load(Box::new(config.storage()), clock);
    if store.rollover_due() && !store.data().is_month_empty() {
        match config.backup().save_json(ROLLOVER_PRE, store.data()) {
            Ok(path) => debug!("Saved backup to {}", path.display()),
            Err(e) => error!("Unable to back up before archiving the month: {e:#}"),
        }
    }
    let outcome = store.run_rollover_check();
    (store, outcome)
}
