use crate::model::amount::deserialize_entry;
use crate::model::Amount;
use serde::{Deserialize, Serialize};

/// A personal expense. Transactions are never edited; they are only added and deleted.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Creation timestamp in milliseconds, unique within the list it lives in.
    id: u64,
    #[serde(deserialize_with = "deserialize_entry")]
    amount: Amount,
    description: String,
    category: String,
    /// The local creation date as shown to the user, e.g. `3/14/2024`.
    date: String,
}

impl Transaction {
    pub fn new(
        id: u64,
        amount: Amount,
        description: impl Into<String>,
        category: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            id,
            amount,
            description: description.into(),
            category: category.into(),
            date: date.into(),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn date(&self) -> &str {
        &self.date
    }
}

/// An expense paid by one roommate on behalf of the household.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedExpense {
    id: u64,
    #[serde(deserialize_with = "deserialize_entry")]
    amount: Amount,
    description: String,
    paid_by: String,
    date: String,
}

impl SharedExpense {
    pub fn new(
        id: u64,
        amount: Amount,
        description: impl Into<String>,
        paid_by: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            id,
            amount,
            description: description.into(),
            paid_by: paid_by.into(),
            date: date.into(),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn paid_by(&self) -> &str {
        &self.paid_by
    }

    pub fn date(&self) -> &str {
        &self.date
    }
}

/// Something with an id. Lets id allocation and deletion work over either record list.
pub trait Record {
    fn id(&self) -> u64;
}

impl Record for Transaction {
    fn id(&self) -> u64 {
        self.id
    }
}

impl Record for SharedExpense {
    fn id(&self) -> u64 {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_wire_names() {
        let t = Transaction::new(1700000000000, Amount::from(120), "Chai", "Outside", "1/2/2024");
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["id"], 1700000000000u64);
        assert_eq!(json["amount"], 120);
        assert_eq!(json["description"], "Chai");
        assert_eq!(json["category"], "Outside");
        assert_eq!(json["date"], "1/2/2024");
    }

    #[test]
    fn test_shared_expense_wire_names() {
        let json = r#"{"id":5,"amount":300.5,"description":"Groceries","paidBy":"Ravi","date":"1/3/2024"}"#;
        let e: SharedExpense = serde_json::from_str(json).unwrap();
        assert_eq!(e.id(), 5);
        assert_eq!(e.paid_by(), "Ravi");
        assert_eq!(e.amount().to_string(), "₹300.50");
        let back = serde_json::to_value(&e).unwrap();
        assert_eq!(back["paidBy"], "Ravi");
    }

    #[test]
    fn test_oversized_amounts_do_not_load() {
        let json = r#"{"id":1,"amount":50000000000000000000000000000,"description":"Typo","category":"Outside","date":"1/3/2024"}"#;
        assert!(serde_json::from_str::<Transaction>(json).is_err());
        let json = r#"{"id":2,"amount":"2000000000000000","description":"Typo","paidBy":"You","date":"1/3/2024"}"#;
        assert!(serde_json::from_str::<SharedExpense>(json).is_err());
    }
}
