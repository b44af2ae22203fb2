//! The application state and every way it can change.
//!
//! A `Store` owns the `FinanceData` document together with the `Storage` it is persisted to and
//! the `Clock` it reads time from. Each successful mutation writes the whole document back before
//! returning. Storage failures are logged and swallowed; the in-memory state stays correct and
//! only durability for that write is lost.

use crate::clock::Clock;
use crate::engine::Summary;
use crate::error::Rejection;
use crate::model::{Amount, FinanceData, Record, SharedExpense, Transaction};
use crate::rollover::{self, Rollover};
use crate::storage::Storage;
use serde::Serialize;
use std::str::FromStr;
use tracing::{debug, error, warn};

/// The user actions the store accepts. Raw form values go in; validation happens in the store.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Action {
    AddTransaction {
        amount: String,
        description: String,
        /// The category picked from the existing list, possibly empty.
        category: String,
        /// A category typed in by the user. Wins over `category` when non-blank.
        new_category: String,
    },
    DeleteTransaction(u64),
    AddSharedExpense {
        amount: String,
        description: String,
        /// Defaults to the first roommate.
        paid_by: Option<String>,
    },
    DeleteSharedExpense(u64),
    AddRoommate(String),
    RunRolloverCheck,
}

/// The result of an accepted `Action`.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Applied {
    TransactionAdded(Transaction),
    /// `None` when no transaction had the id.
    TransactionDeleted(Option<Transaction>),
    SharedExpenseAdded(SharedExpense),
    SharedExpenseDeleted(Option<SharedExpense>),
    RoommateAdded(String),
    Rollover(Rollover),
}

#[derive(Debug)]
pub struct Store {
    data: FinanceData,
    storage: Box<dyn Storage>,
    clock: Box<dyn Clock>,
}

impl Store {
    /// Reads the document from `storage`.
    ///
    /// - Nothing stored: starts fresh for the clock's month.
    /// - Old document without `currentMonth`: migrated, see `FinanceData::from_json`.
    /// - Unreadable or unparsable document: logged and replaced by a fresh start.
    pub fn load(storage: Box<dyn Storage>, clock: Box<dyn Clock>) -> Self {
        let actual_month = clock.month();
        let data = match storage.read() {
            Ok(Some(json)) => match FinanceData::from_json(&json, actual_month) {
                Ok(data) => data,
                Err(e) => {
                    error!("Error loading data, starting fresh: {e:#}");
                    FinanceData::new(actual_month)
                }
            },
            Ok(None) => {
                debug!("No stored data, starting fresh for {actual_month}");
                FinanceData::new(actual_month)
            }
            Err(e) => {
                error!("Error loading data, starting fresh: {e:#}");
                FinanceData::new(actual_month)
            }
        };
        Self {
            data,
            storage,
            clock,
        }
    }

    /// Starts a session: loads the document and runs the month rollover check once.
    pub fn open(storage: Box<dyn Storage>, clock: Box<dyn Clock>) -> Self {
        let mut store = Self::load(storage, clock);
        store.run_rollover_check();
        store
    }

    /// Writes the whole document to storage. Failures are logged, never returned.
    pub fn save(&mut self) {
        let result = self
            .data
            .to_json()
            .and_then(|json| self.storage.write(&json));
        match result {
            Ok(()) => debug!("Saved finance data"),
            Err(e) => error!("Error saving data: {e:#}"),
        }
    }

    pub fn data(&self) -> &FinanceData {
        &self.data
    }

    /// Derived totals and settlements for the live month.
    pub fn summary(&self) -> Summary {
        Summary::current(&self.data)
    }

    /// True when the stored month differs from the clock's month.
    pub fn rollover_due(&self) -> bool {
        rollover::is_due(&self.data, self.clock.month())
    }

    /// Applies one user action.
    pub fn apply(&mut self, action: Action) -> Result<Applied, Rejection> {
        let applied = match action {
            Action::AddTransaction {
                amount,
                description,
                category,
                new_category,
            } => Applied::TransactionAdded(self.add_transaction(
                &amount,
                &description,
                &category,
                &new_category,
            )?),
            Action::DeleteTransaction(id) => Applied::TransactionDeleted(self.delete_transaction(id)),
            Action::AddSharedExpense {
                amount,
                description,
                paid_by,
            } => Applied::SharedExpenseAdded(self.add_shared_expense(
                &amount,
                &description,
                paid_by.as_deref(),
            )?),
            Action::DeleteSharedExpense(id) => {
                Applied::SharedExpenseDeleted(self.delete_shared_expense(id))
            }
            Action::AddRoommate(name) => Applied::RoommateAdded(self.add_roommate(&name)?),
            Action::RunRolloverCheck => Applied::Rollover(self.run_rollover_check()),
        };
        Ok(applied)
    }

    /// Records a personal expense.
    ///
    /// The category is the trimmed `new_category` when it is not blank, otherwise `category`. A
    /// category not yet in the list is added to it.
    pub fn add_transaction(
        &mut self,
        amount: &str,
        description: &str,
        category: &str,
        new_category: &str,
    ) -> Result<Transaction, Rejection> {
        let (amount, description) = validate(amount, description)?;
        let category = resolve_category(category, new_category).inspect_err(log_rejection)?;

        let id = next_id(self.clock.timestamp_millis(), &self.data.transactions);
        let transaction = Transaction::new(
            id,
            amount,
            description,
            category,
            self.clock.date_stamp(),
        );
        if !self.data.categories.iter().any(|c| c == category) {
            self.data.categories.push(category.to_string());
        }
        self.data.transactions.push(transaction.clone());
        self.save();
        Ok(transaction)
    }

    /// Removes the transaction with `id`. An unknown id changes nothing.
    pub fn delete_transaction(&mut self, id: u64) -> Option<Transaction> {
        let removed = remove_by_id(&mut self.data.transactions, id);
        if removed.is_some() {
            self.save();
        }
        removed
    }

    /// Records an expense paid on behalf of the household. `paid_by` defaults to the first
    /// roommate.
    pub fn add_shared_expense(
        &mut self,
        amount: &str,
        description: &str,
        paid_by: Option<&str>,
    ) -> Result<SharedExpense, Rejection> {
        let (amount, description) = validate(amount, description)?;
        let paid_by = self.resolve_payer(paid_by).inspect_err(log_rejection)?;

        let id = next_id(self.clock.timestamp_millis(), &self.data.shared_expenses);
        let expense = SharedExpense::new(id, amount, description, paid_by, self.clock.date_stamp());
        self.data.shared_expenses.push(expense.clone());
        self.save();
        Ok(expense)
    }

    /// Removes the shared expense with `id`. An unknown id changes nothing.
    pub fn delete_shared_expense(&mut self, id: u64) -> Option<SharedExpense> {
        let removed = remove_by_id(&mut self.data.shared_expenses, id);
        if removed.is_some() {
            self.save();
        }
        removed
    }

    /// Adds a roommate. Names are trimmed and compared case-sensitively.
    pub fn add_roommate(&mut self, name: &str) -> Result<String, Rejection> {
        let name = name.trim();
        let rejection = if name.is_empty() {
            Some(Rejection::EmptyName)
        } else if self.data.roommates.iter().any(|r| r == name) {
            Some(Rejection::DuplicateRoommate(name.to_string()))
        } else {
            None
        };
        if let Some(rejection) = rejection {
            log_rejection(&rejection);
            return Err(rejection);
        }
        self.data.roommates.push(name.to_string());
        self.save();
        Ok(name.to_string())
    }

    /// Archives the stored month if the calendar has moved on. Persists only when something
    /// changed.
    pub fn run_rollover_check(&mut self) -> Rollover {
        let outcome = rollover::check(&mut self.data, self.clock.month());
        if outcome.changed() {
            self.save();
        }
        outcome
    }

    fn resolve_payer(&self, paid_by: Option<&str>) -> Result<String, Rejection> {
        match paid_by.map(str::trim).filter(|p| !p.is_empty()) {
            Some(name) if self.data.roommates.iter().any(|r| r == name) => Ok(name.to_string()),
            Some(name) => Err(Rejection::UnknownRoommate(name.to_string())),
            None => self
                .data
                .roommates
                .first()
                .cloned()
                .ok_or(Rejection::NoRoommates),
        }
    }
}

/// Checks the fields shared by both kinds of record, returning the parsed amount and the trimmed
/// description.
fn validate<'a>(amount: &str, description: &'a str) -> Result<(Amount, &'a str), Rejection> {
    let result = parse_amount(amount).and_then(|amount| {
        let description = description.trim();
        if description.is_empty() {
            Err(Rejection::EmptyDescription)
        } else {
            Ok((amount, description))
        }
    });
    result.inspect_err(log_rejection)
}

fn parse_amount(amount: &str) -> Result<Amount, Rejection> {
    let trimmed = amount.trim();
    if trimmed.is_empty() {
        return Err(Rejection::EmptyAmount);
    }
    let parsed =
        Amount::from_str(trimmed).map_err(|_| Rejection::InvalidAmount(trimmed.to_string()))?;
    if !parsed.is_positive() {
        return Err(Rejection::NonPositiveAmount(trimmed.to_string()));
    }
    if parsed.exceeds_entry_limit() {
        return Err(Rejection::AmountTooLarge(trimmed.to_string()));
    }
    Ok(parsed)
}

fn resolve_category<'a>(category: &'a str, new_category: &'a str) -> Result<&'a str, Rejection> {
    let new_category = new_category.trim();
    let resolved = if new_category.is_empty() {
        category.trim()
    } else {
        new_category
    };
    if resolved.is_empty() {
        Err(Rejection::MissingCategory)
    } else {
        Ok(resolved)
    }
}

/// A timestamp id, bumped past the largest existing id when records arrive within the same
/// millisecond.
fn next_id<R: Record>(now_millis: u64, records: &[R]) -> u64 {
    match records.iter().map(Record::id).max() {
        Some(max) if max >= now_millis => match max.checked_add(1) {
            Some(id) => id,
            // No room above the largest id: take the first free id from the clock onward
            None => (now_millis..u64::MAX)
                .find(|id| !records.iter().any(|r| r.id() == *id))
                .unwrap_or(now_millis),
        },
        _ => now_millis,
    }
}

fn remove_by_id<R: Record>(records: &mut Vec<R>, id: u64) -> Option<R> {
    let ix = records.iter().position(|r| r.id() == id)?;
    Some(records.remove(ix))
}

fn log_rejection(rejection: &Rejection) {
    warn!("Declined: {rejection}");
}
