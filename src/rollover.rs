//! Archives a finished month when the stored month no longer matches the calendar.

use crate::engine::Summary;
use crate::model::{FinanceData, HistoryEntry, Month};
use serde::Serialize;
use std::mem;
use tracing::info;

/// What a rollover check did.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum Rollover {
    /// The stored month is the actual month. Nothing changed.
    Current,
    /// The stored month had no records, so only the month moved forward.
    Advanced { from: Month, to: Month },
    /// The stored month was archived into history and its records cleared.
    Archived { month: Month, to: Month },
}

impl Rollover {
    pub fn changed(&self) -> bool {
        !matches!(self, Rollover::Current)
    }
}

/// True when `data` belongs to a month other than `actual_month`.
pub fn is_due(data: &FinanceData, actual_month: Month) -> bool {
    data.current_month != actual_month
}

/// Moves `data` to `actual_month`, archiving the records of the stored month if there are any.
pub fn check(data: &mut FinanceData, actual_month: Month) -> Rollover {
    if !is_due(data, actual_month) {
        return Rollover::Current;
    }

    let from = data.current_month;
    if data.is_month_empty() {
        data.current_month = actual_month;
        info!("New month {actual_month}, nothing to archive for {from}");
        return Rollover::Advanced {
            from,
            to: actual_month,
        };
    }

    info!("New month detected, archiving data for {from}");
    let transactions = mem::take(&mut data.transactions);
    let shared_expenses = mem::take(&mut data.shared_expenses);
    let summary = Summary::new(&transactions, &shared_expenses, &data.roommates);
    let entry = HistoryEntry::new(
        from,
        summary.personal_total(),
        summary.category_totals().clone(),
        summary.total_shared(),
        summary.into_settlements(),
        transactions,
        shared_expenses,
    );
    data.history.push(entry);
    data.current_month = actual_month;

    Rollover::Archived {
        month: from,
        to: actual_month,
    }
}
