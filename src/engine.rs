//! Pure accounting over a month of records.
//!
//! Nothing here touches storage or the clock. The same functions summarize the live month and any
//! archived `HistoryEntry`.

use crate::model::{
    Amount, CategoryTotals, FinanceData, HistoryEntry, Settlement, SharedExpense, Transaction,
};
use serde::Serialize;

/// Sum of all transaction amounts.
pub fn personal_total(transactions: &[Transaction]) -> Amount {
    transactions.iter().map(Transaction::amount).sum()
}

/// Spending per category. Only categories that have at least one transaction appear.
pub fn category_totals(transactions: &[Transaction]) -> CategoryTotals {
    let mut totals = CategoryTotals::new();
    for t in transactions {
        *totals.entry(t.category().to_string()).or_default() += t.amount();
    }
    totals
}

/// Sum of all shared expense amounts.
pub fn total_shared(shared_expenses: &[SharedExpense]) -> Amount {
    shared_expenses.iter().map(SharedExpense::amount).sum()
}

/// Each roommate's even share of `total_shared`, or zero when there are no roommates.
pub fn per_person_share(total_shared: Amount, roommate_count: usize) -> Amount {
    total_shared.split(roommate_count)
}

/// What each roommate paid and how that compares to `per_person_share`, in roommate order.
pub fn settlements<S>(
    roommates: &[S],
    shared_expenses: &[SharedExpense],
    per_person_share: Amount,
) -> Vec<Settlement>
where
    S: AsRef<str>,
{
    roommates
        .iter()
        .map(|roommate| {
            let name = roommate.as_ref();
            let paid: Amount = expenses_paid_by(shared_expenses, name)
                .map(SharedExpense::amount)
                .sum();
            Settlement::new(name, paid, paid - per_person_share)
        })
        .collect()
}

/// The "needs to spend to settle" figure shown for a roommate who owes money. Zero otherwise.
///
/// NOTE: this is `|balance| * roommate_count`, which is not the amount the roommate actually owes
/// (that is `|balance|`). The figure is kept as the product defines it until someone confirms what
/// it is meant to show.
pub fn amount_to_settle(balance: Amount, roommate_count: usize) -> Amount {
    if balance.is_negative() {
        balance.abs().times(roommate_count)
    } else {
        Amount::ZERO
    }
}

/// The transactions filed under `category`, in insertion order.
pub fn transactions_in<'a>(
    transactions: &'a [Transaction],
    category: &'a str,
) -> impl Iterator<Item = &'a Transaction> + 'a {
    transactions.iter().filter(move |t| t.category() == category)
}

/// The shared expenses paid by `roommate`, in insertion order.
pub fn expenses_paid_by<'a>(
    shared_expenses: &'a [SharedExpense],
    roommate: &'a str,
) -> impl Iterator<Item = &'a SharedExpense> + 'a {
    shared_expenses.iter().filter(move |e| e.paid_by() == roommate)
}

/// A settlement together with the figures derived from it for display.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementLine {
    #[serde(flatten)]
    settlement: Settlement,
    amount_to_settle: Amount,
}

impl SettlementLine {
    fn new(settlement: Settlement, roommate_count: usize) -> Self {
        Self {
            amount_to_settle: amount_to_settle(settlement.balance(), roommate_count),
            settlement,
        }
    }

    pub fn settlement(&self) -> &Settlement {
        &self.settlement
    }

    pub fn amount_to_settle(&self) -> Amount {
        self.amount_to_settle
    }
}

/// Everything derived from one month of records.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    personal_total: Amount,
    category_totals: CategoryTotals,
    total_shared: Amount,
    per_person_share: Amount,
    settlements: Vec<SettlementLine>,
}

impl Summary {
    pub fn new<S>(
        transactions: &[Transaction],
        shared_expenses: &[SharedExpense],
        roommates: &[S],
    ) -> Self
    where
        S: AsRef<str>,
    {
        let total_shared = total_shared(shared_expenses);
        let per_person_share = per_person_share(total_shared, roommates.len());
        let settlements = settlements(roommates, shared_expenses, per_person_share)
            .into_iter()
            .map(|settlement| SettlementLine::new(settlement, roommates.len()))
            .collect();
        Self {
            personal_total: personal_total(transactions),
            category_totals: category_totals(transactions),
            total_shared,
            per_person_share,
            settlements,
        }
    }

    /// Summarizes the live month.
    pub fn current(data: &FinanceData) -> Self {
        Self::new(data.transactions(), data.shared_expenses(), data.roommates())
    }

    /// The summary of an archived month, built from the totals and settlements frozen into the
    /// entry. Only the per-person share and the amounts to settle are derived, from the roommates
    /// named in the stored settlements.
    pub fn archived(entry: &HistoryEntry) -> Self {
        let roommate_count = entry.settlements().len();
        Self {
            personal_total: entry.personal_total(),
            category_totals: entry.category_totals().clone(),
            total_shared: entry.total_shared(),
            per_person_share: per_person_share(entry.total_shared(), roommate_count),
            settlements: entry
                .settlements()
                .iter()
                .cloned()
                .map(|settlement| SettlementLine::new(settlement, roommate_count))
                .collect(),
        }
    }

    pub fn personal_total(&self) -> Amount {
        self.personal_total
    }

    pub fn category_totals(&self) -> &CategoryTotals {
        &self.category_totals
    }

    pub fn total_shared(&self) -> Amount {
        self.total_shared
    }

    pub fn per_person_share(&self) -> Amount {
        self.per_person_share
    }

    pub fn settlements(&self) -> &[SettlementLine] {
        &self.settlements
    }

    /// The plain settlements, as stored in a `HistoryEntry`.
    pub fn into_settlements(self) -> Vec<Settlement> {
        self.settlements.into_iter().map(|l| l.settlement).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn amt(s: &str) -> Amount {
        Amount::from_str(s).unwrap()
    }

    fn txn(id: u64, amount: &str, category: &str) -> Transaction {
        Transaction::new(id, amt(amount), format!("t{id}"), category, "1/1/2024")
    }

    fn exp(id: u64, amount: &str, paid_by: &str) -> SharedExpense {
        SharedExpense::new(id, amt(amount), format!("e{id}"), paid_by, "1/1/2024")
    }

    #[test]
    fn test_personal_total_and_category_totals() {
        let transactions = vec![
            txn(1, "100", "Outside"),
            txn(2, "20.5", "Useless"),
            txn(3, "30", "Outside"),
        ];
        assert_eq!(personal_total(&transactions), amt("150.5"));
        let totals = category_totals(&transactions);
        assert_eq!(totals.len(), 2);
        assert_eq!(totals["Outside"], amt("130"));
        assert_eq!(totals["Useless"], amt("20.5"));
        assert!(!totals.contains_key("Udhari"));

        let recount: Amount = totals.values().sum();
        assert_eq!(recount, personal_total(&transactions));
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(personal_total(&[]), Amount::ZERO);
        assert!(category_totals(&[]).is_empty());
        assert_eq!(total_shared(&[]), Amount::ZERO);
        let summary = Summary::new::<String>(&[], &[], &[]);
        assert_eq!(summary.per_person_share(), Amount::ZERO);
        assert!(summary.settlements().is_empty());
    }

    #[test]
    fn test_no_roommates_has_zero_share() {
        let expenses = vec![exp(1, "300", "You")];
        let total = total_shared(&expenses);
        assert_eq!(total, amt("300"));
        assert_eq!(per_person_share(total, 0), Amount::ZERO);
        assert!(settlements::<&str>(&[], &expenses, Amount::ZERO).is_empty());
    }

    #[test]
    fn test_settlements_balance() {
        let roommates = ["You", "Ravi", "Asha"];
        let expenses = vec![
            exp(1, "300", "You"),
            exp(2, "100", "Ravi"),
            exp(3, "200", "You"),
        ];
        let total = total_shared(&expenses);
        let share = per_person_share(total, roommates.len());
        assert_eq!(share, amt("200"));

        let s = settlements(&roommates, &expenses, share);
        assert_eq!(s.len(), 3);
        assert_eq!(s[0].name(), "You");
        assert_eq!(s[0].paid(), amt("500"));
        assert_eq!(s[0].balance(), amt("300"));
        assert_eq!(s[1].balance(), amt("-100"));
        assert_eq!(s[2].paid(), Amount::ZERO);
        assert_eq!(s[2].balance(), amt("-200"));

        let paid: Amount = s.iter().map(Settlement::paid).sum();
        assert_eq!(paid, total);
        let balance: Amount = s.iter().map(Settlement::balance).sum();
        assert!(balance.is_zero());
    }

    #[test]
    fn test_settlements_balance_with_uneven_split() {
        let roommates = ["You", "Ravi", "Asha"];
        let expenses = vec![exp(1, "100", "Ravi")];
        let share = per_person_share(total_shared(&expenses), roommates.len());
        let s = settlements(&roommates, &expenses, share);
        let balance: Amount = s.iter().map(Settlement::balance).sum();
        assert!(balance.value().abs() < Decimal::from_str("0.000001").unwrap());
    }

    #[test]
    fn test_expense_by_unknown_payer_is_not_credited() {
        let roommates = ["You", "Ravi"];
        let expenses = vec![exp(1, "100", "Former")];
        let s = settlements(&roommates, &expenses, amt("50"));
        assert!(s.iter().all(|s| s.paid().is_zero()));
    }

    #[test]
    fn test_amount_to_settle() {
        assert_eq!(amount_to_settle(amt("-50"), 2), amt("100"));
        assert_eq!(amount_to_settle(amt("-10"), 3), amt("30"));
        assert_eq!(amount_to_settle(amt("25"), 2), Amount::ZERO);
        assert_eq!(amount_to_settle(Amount::ZERO, 2), Amount::ZERO);
    }

    #[test]
    fn test_detail_filters() {
        let transactions = vec![txn(1, "1", "A"), txn(2, "2", "B"), txn(3, "3", "A")];
        let ids: Vec<u64> = transactions_in(&transactions, "A").map(|t| t.id()).collect();
        assert_eq!(ids, vec![1, 3]);

        let expenses = vec![exp(1, "1", "You"), exp(2, "2", "Ravi")];
        let ids: Vec<u64> = expenses_paid_by(&expenses, "Ravi").map(|e| e.id()).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn test_summary_lines() {
        let roommates = vec!["You".to_string(), "Ravi".to_string()];
        let transactions = vec![txn(1, "40", "Outside")];
        let expenses = vec![exp(2, "1000", "You")];
        let summary = Summary::new(&transactions, &expenses, &roommates);
        assert_eq!(summary.personal_total(), amt("40"));
        assert_eq!(summary.total_shared(), amt("1000"));
        assert_eq!(summary.per_person_share(), amt("500"));

        let ravi = &summary.settlements()[1];
        assert_eq!(ravi.settlement().balance(), amt("-500"));
        assert_eq!(ravi.amount_to_settle(), amt("1000"));
        assert_eq!(summary.settlements()[0].amount_to_settle(), Amount::ZERO);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["settlements"][1]["name"], "Ravi");
        assert_eq!(json["settlements"][1]["amountToSettle"], 1000);
    }

    #[test]
    fn test_summary_with_extreme_amounts_does_not_panic() {
        let huge = Amount::new(Decimal::MAX);
        let transactions = vec![
            Transaction::new(1, huge, "a", "Outside", "1/1/2024"),
            Transaction::new(2, huge, "b", "Outside", "1/1/2024"),
        ];
        let expenses = vec![SharedExpense::new(3, huge, "c", "You", "1/1/2024")];
        let summary = Summary::new(&transactions, &expenses, &["You", "Ravi"]);
        assert_eq!(summary.personal_total(), huge);
        assert_eq!(summary.category_totals()["Outside"], huge);
        assert!(summary.settlements()[1].settlement().balance().is_negative());
    }

    #[test]
    fn test_archived_summary_uses_stored_figures() {
        let json = r#"{
            "month": "2023-12",
            "personalTotal": 250,
            "categoryTotals": {"Outside": 250},
            "totalShared": 600,
            "settlements": [
                {"name": "You", "paid": 600, "balance": 300},
                {"name": "Ravi", "paid": 0, "balance": -300}
            ]
        }"#;
        let entry: HistoryEntry = serde_json::from_str(json).unwrap();
        let summary = Summary::archived(&entry);
        assert_eq!(summary.personal_total(), amt("250"));
        assert_eq!(summary.category_totals()["Outside"], amt("250"));
        assert_eq!(summary.total_shared(), amt("600"));
        assert_eq!(summary.per_person_share(), amt("300"));
        assert_eq!(summary.settlements()[0].settlement().paid(), amt("600"));
        assert_eq!(summary.settlements()[1].amount_to_settle(), amt("600"));
    }
}
