//! The `summary` and `history` reports.

use crate::args::{HistoryArgs, SummaryArgs};
use crate::commands::Out;
use crate::engine::{self, SettlementLine, Summary};
use crate::model::{HistoryEntry, Month, SettlementStatus, SharedExpense, Transaction};
use crate::store::Store;
use crate::Result;

const NO_HISTORY: &str = "You have no archived months yet.";

/// Reports the live month: personal spending per category and the shared-expense settlements.
pub fn summary(store: &Store, args: &SummaryArgs) -> Result<Out<Summary>> {
    let data = store.data();
    let summary = store.summary();
    let mut lines = vec![format!("Expenses for {}", data.current_month().long_name())];
    lines.push(String::new());
    personal_lines(
        &mut lines,
        &summary,
        args.details().then_some(data.transactions()),
    );
    lines.push(String::new());
    shared_lines(
        &mut lines,
        &summary,
        Tense::Present,
        args.details().then_some(data.shared_expenses()),
    );
    Ok(Out::new(lines.join("\n"), summary))
}

/// Reports archived months, newest first. Totals and settlements are the figures stored when the
/// month was archived; the archived records only feed the `--details` lists.
pub fn history(store: &Store, args: &HistoryArgs) -> Result<Out<Vec<HistoryEntry>>> {
    let entries: Vec<HistoryEntry> = store
        .data()
        .history()
        .iter()
        .rev()
        .filter(|entry| matches_month(entry, args.month()))
        .cloned()
        .collect();

    if entries.is_empty() {
        let message = match args.month() {
            Some(month) if !store.data().history().is_empty() => {
                format!("There is no archived month {month}.")
            }
            _ => NO_HISTORY.to_string(),
        };
        return Ok(Out::new(message, entries));
    }

    let mut lines = Vec::new();
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        let summary = Summary::archived(entry);
        lines.push(entry.month().long_name());
        personal_lines(
            &mut lines,
            &summary,
            args.details().then_some(entry.transactions()),
        );
        shared_lines(
            &mut lines,
            &summary,
            Tense::Past,
            args.details().then_some(entry.shared_expenses()),
        );
    }
    Ok(Out::new(lines.join("\n"), entries))
}

fn matches_month(entry: &HistoryEntry, month: Option<Month>) -> bool {
    month.is_none_or(|m| entry.month() == m)
}

#[derive(Debug, Clone, Copy)]
enum Tense {
    Present,
    Past,
}

fn personal_lines(
    lines: &mut Vec<String>,
    summary: &Summary,
    transactions: Option<&[Transaction]>,
) {
    lines.push(format!("Total Spent: {}", summary.personal_total()));
    for (category, total) in summary.category_totals() {
        lines.push(format!("  {category}: {total}"));
        if let Some(transactions) = transactions {
            let in_category: Vec<&Transaction> =
                engine::transactions_in(transactions, category).collect();
            for t in in_category.into_iter().rev() {
                lines.push(format!(
                    "    {}  {}  {}  (id {})",
                    t.date(),
                    t.description(),
                    t.amount(),
                    t.id()
                ));
            }
        }
    }
}

fn shared_lines(
    lines: &mut Vec<String>,
    summary: &Summary,
    tense: Tense,
    expenses: Option<&[SharedExpense]>,
) {
    lines.push(format!("Total Shared: {}", summary.total_shared()));
    lines.push(format!("Per Person: {}", summary.per_person_share()));
    for line in summary.settlements() {
        lines.push(settlement_line(line, tense));
        if let Some(expenses) = expenses {
            let paid: Vec<&SharedExpense> =
                engine::expenses_paid_by(expenses, line.settlement().name()).collect();
            for e in paid.into_iter().rev() {
                lines.push(format!(
                    "    {}  {}  {}  (id {})",
                    e.date(),
                    e.description(),
                    e.amount(),
                    e.id()
                ));
            }
        }
    }
}

fn settlement_line(line: &SettlementLine, tense: Tense) -> String {
    let s = line.settlement();
    let standing = match (s.status(), tense) {
        (SettlementStatus::GetsBack, Tense::Present) => format!("gets back {}", s.balance()),
        (SettlementStatus::GetsBack, Tense::Past) => format!("got back {}", s.balance()),
        (SettlementStatus::Owes, Tense::Present) => format!(
            "owes {}, needs to spend {} to settle",
            s.balance().abs(),
            line.amount_to_settle()
        ),
        (SettlementStatus::Owes, Tense::Past) => format!("owed {}", s.balance().abs()),
        (SettlementStatus::Settled, _) => "settled".to_string(),
    };
    format!("  {}: paid {}, {standing}", s.name(), s.paid())
}
