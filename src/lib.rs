mod backup;
mod clock;
mod config;
mod error;
mod rollover;
mod storage;
mod store;
mod utils;

pub mod args;
pub mod commands;
pub mod engine;
pub mod model;


pub use backup::Backup;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use engine::{SettlementLine, Summary};
pub use error::{Error, Rejection, Result};
pub use model::{Amount, FinanceData, HistoryEntry, Month, SharedExpense, Transaction};
pub use rollover::Rollover;
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::{Action, Applied, Store};
