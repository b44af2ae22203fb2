//! Types that represent the core data model, such as `Transaction` and `HistoryEntry`, and the
//! persisted document that holds them.
mod amount;
mod history;
mod month;
mod transaction;

pub use amount::{Amount, AmountError, CURRENCY};
pub use history::{CategoryTotals, HistoryEntry, Settlement, SettlementStatus};
pub use month::{Month, MonthError};
pub use transaction::{Record, SharedExpense, Transaction};

use crate::Result;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Categories offered on a fresh start.
pub const DEFAULT_CATEGORIES: [&str; 3] = ["Udhari", "Outside", "Useless"];

/// Roommates present on a fresh start.
pub const DEFAULT_ROOMMATES: [&str; 2] = ["You", "Ravi"];

/// The whole persisted state: the live month's records plus the archive of finished months.
///
/// Example document:
/// ```json
/// {
///   "currentMonth": "2024-02",
///   "transactions": [{"id": 1706745600000, "amount": 120, "description": "Chai", "category": "Outside", "date": "2/1/2024"}],
///   "categories": ["Udhari", "Outside", "Useless"],
///   "roommates": ["You", "Ravi"],
///   "sharedExpenses": [{"id": 1706745600001, "amount": 900, "description": "Wifi", "paidBy": "Ravi", "date": "2/1/2024"}],
///   "history": []
/// }
/// ```
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceData {
    pub(crate) current_month: Month,
    pub(crate) transactions: Vec<Transaction>,
    pub(crate) categories: Vec<String>,
    pub(crate) roommates: Vec<String>,
    pub(crate) shared_expenses: Vec<SharedExpense>,
    pub(crate) history: Vec<HistoryEntry>,
}

impl FinanceData {
    /// A fresh document for `current_month` with the default categories and roommates.
    pub fn new(current_month: Month) -> Self {
        Self {
            current_month,
            transactions: Vec::new(),
            categories: default_categories(),
            roommates: default_roommates(),
            shared_expenses: Vec::new(),
            history: Vec::new(),
        }
    }

    /// Parses a stored document.
    ///
    /// Documents written before month archiving existed have no `currentMonth`. Their four lists
    /// are kept, `currentMonth` becomes `actual_month` and `history` starts empty.
    ///
    /// # Errors
    /// Returns an error if `json` is not a document of either shape.
    pub fn from_json(json: &str, actual_month: Month) -> Result<Self> {
        let stored: StoredDocument =
            serde_json::from_str(json).context("Unable to parse the stored finance data")?;
        Ok(stored.into_current(actual_month))
    }

    /// Serializes the document for storage.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Unable to serialize the finance data")
    }

    pub fn current_month(&self) -> Month {
        self.current_month
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn roommates(&self) -> &[String] {
        &self.roommates
    }

    pub fn shared_expenses(&self) -> &[SharedExpense] {
        &self.shared_expenses
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Finds the archived entry for `month`.
    pub fn history_for(&self, month: Month) -> Option<&HistoryEntry> {
        self.history.iter().find(|entry| entry.month() == month)
    }

    /// True when there is nothing recorded for the live month.
    pub fn is_month_empty(&self) -> bool {
        self.transactions.is_empty() && self.shared_expenses.is_empty()
    }
}

/// Both the current and the pre-archiving document shapes. Every field is optional so that either
/// shape parses; `into_current` fills the gaps.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredDocument {
    current_month: Option<Month>,
    transactions: Option<Vec<Transaction>>,
    categories: Option<Vec<String>>,
    roommates: Option<Vec<String>>,
    shared_expenses: Option<Vec<SharedExpense>>,
    history: Option<Vec<HistoryEntry>>,
}

impl StoredDocument {
    fn into_current(self, actual_month: Month) -> FinanceData {
        let (current_month, history) = match self.current_month {
            Some(month) => (month, self.history.unwrap_or_default()),
            None => {
                info!("Old data format detected, migrating to the current structure");
                (actual_month, Vec::new())
            }
        };
        FinanceData {
            current_month,
            transactions: self.transactions.unwrap_or_default(),
            categories: self.categories.unwrap_or_else(default_categories),
            roommates: self.roommates.unwrap_or_else(default_roommates),
            shared_expenses: self.shared_expenses.unwrap_or_default(),
            history,
        }
    }
}

fn default_categories() -> Vec<String> {
    DEFAULT_CATEGORIES.iter().map(|s| s.to_string()).collect()
}

fn default_roommates() -> Vec<String> {
    DEFAULT_ROOMMATES.iter().map(|s| s.to_string()).collect()
}
