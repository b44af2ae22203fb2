use crate::model::{Amount, Month, SharedExpense, Transaction};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-category spending, keyed by category label.
pub type CategoryTotals = BTreeMap<String, Amount>;

/// Where a roommate stands against the shared pool.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementStatus {
    /// Paid more than their share and gets the difference back.
    GetsBack,
    /// Paid less than their share.
    Owes,
    Settled,
}

serde_plain::derive_display_from_serialize!(SettlementStatus);

/// One roommate's position for a month of shared expenses.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settlement {
    name: String,
    /// Sum of the shared expenses this roommate paid.
    paid: Amount,
    /// `paid` minus the per-person share.
    balance: Amount,
}

impl Settlement {
    pub fn new(name: impl Into<String>, paid: Amount, balance: Amount) -> Self {
        Self {
            name: name.into(),
            paid,
            balance,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn paid(&self) -> Amount {
        self.paid
    }

    pub fn balance(&self) -> Amount {
        self.balance
    }

    pub fn status(&self) -> SettlementStatus {
        if self.balance.is_positive() {
            SettlementStatus::GetsBack
        } else if self.balance.is_negative() {
            SettlementStatus::Owes
        } else {
            SettlementStatus::Settled
        }
    }
}

/// A frozen summary of a finished month, written once when the month rolls over.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    month: Month,
    personal_total: Amount,
    category_totals: CategoryTotals,
    total_shared: Amount,
    settlements: Vec<Settlement>,
    #[serde(default)]
    transactions: Vec<Transaction>,
    #[serde(default)]
    shared_expenses: Vec<SharedExpense>,
}

impl HistoryEntry {
    pub(crate) fn new(
        month: Month,
        personal_total: Amount,
        category_totals: CategoryTotals,
        total_shared: Amount,
        settlements: Vec<Settlement>,
        transactions: Vec<Transaction>,
        shared_expenses: Vec<SharedExpense>,
    ) -> Self {
        Self {
            month,
            personal_total,
            category_totals,
            total_shared,
            settlements,
            transactions,
            shared_expenses,
        }
    }

    pub fn month(&self) -> Month {
        self.month
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

    pub fn settlements(&self) -> &[Settlement] {
        &self.settlements
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn shared_expenses(&self) -> &[SharedExpense] {
        &self.shared_expenses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settlement_status() {
        let gets_back = Settlement::new("You", Amount::from(100), Amount::from(50));
        let owes = Settlement::new("Ravi", Amount::ZERO, Amount::from(-50));
        let settled = Settlement::new("Asha", Amount::from(50), Amount::ZERO);
        assert_eq!(gets_back.status(), SettlementStatus::GetsBack);
        assert_eq!(owes.status(), SettlementStatus::Owes);
        assert_eq!(settled.status(), SettlementStatus::Settled);
        assert_eq!(owes.status().to_string(), "owes");
    }

    #[test]
    fn test_history_entry_without_raw_records() {
        // Entries archived before raw records were kept carry only the summaries
        let json = r#"{
            "month": "2023-11",
            "personalTotal": 10,
            "categoryTotals": {"Outside": 10},
            "totalShared": 0,
            "settlements": [{"name": "You", "paid": 0, "balance": 0}]
        }"#;
        let entry: HistoryEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.month().to_string(), "2023-11");
        assert!(entry.transactions().is_empty());
        assert!(entry.shared_expenses().is_empty());
        assert_eq!(entry.personal_total(), Amount::from(10));
        assert_eq!(entry.settlements()[0].name(), "You");
    }
}
