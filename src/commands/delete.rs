//! Delete command handlers.

use crate::args::DeleteIdArgs;
use crate::commands::Out;
use crate::model::{SharedExpense, Transaction};
use crate::store::Store;
use crate::Result;

/// Deletes a transaction by id. An id that matches nothing is reported, not treated as an error.
pub fn delete_transaction(store: &mut Store, args: &DeleteIdArgs) -> Result<Out<Transaction>> {
    Ok(match store.delete_transaction(args.id()) {
        Some(t) => Out::new(
            format!("Deleted {} for '{}' from {}", t.amount(), t.description(), t.category()),
            t,
        ),
        None => Out::new_message(format!("No transaction with id {}, nothing deleted", args.id())),
    })
}

/// Deletes a shared expense by id. An id that matches nothing is reported, not treated as an
/// error.
pub fn delete_shared_expense(
    store: &mut Store,
    args: &DeleteIdArgs,
) -> Result<Out<SharedExpense>> {
    Ok(match store.delete_shared_expense(args.id()) {
        Some(e) => Out::new(
            format!(
                "Deleted shared expense {} for '{}' paid by {}",
                e.amount(),
                e.description(),
                e.paid_by()
            ),
            e,
        ),
        None => Out::new_message(format!(
            "No shared expense with id {}, nothing deleted",
            args.id()
        )),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::open;
    use crate::test::{clock_at, TestEnv};

    #[test]
    fn test_delete_transaction() {
        let env = TestEnv::new();
        let (mut store, _) = open(&env.config(), Box::new(clock_at(2024, 1, 31)));
        let t = store.add_transaction("80", "Movie", "Outside", "").unwrap();

        let out = delete_transaction(&mut store, &DeleteIdArgs::new(t.id())).unwrap();
        assert_eq!(out.message(), "Deleted ₹80.00 for 'Movie' from Outside");
        assert!(env.read_document().transactions().is_empty());

        let out = delete_transaction(&mut store, &DeleteIdArgs::new(t.id())).unwrap();
        assert!(out.structure().is_none());
        assert!(out.message().contains("nothing deleted"));
    }

    #[test]
    fn test_delete_shared_expense() {
        let env = TestEnv::new();
        let (mut store, _) = open(&env.config(), Box::new(clock_at(2024, 1, 31)));
        let keep = store.add_shared_expense("300", "Rent", None).unwrap();
        let gone = store.add_shared_expense("90", "Water", Some("Ravi")).unwrap();

        let out = delete_shared_expense(&mut store, &DeleteIdArgs::new(gone.id())).unwrap();
        assert_eq!(out.structure(), Some(&gone));
        assert_eq!(env.read_document().shared_expenses(), [keep]);

        let out = delete_shared_expense(&mut store, &DeleteIdArgs::new(7)).unwrap();
        assert_eq!(out.message(), "No shared expense with id 7, nothing deleted");
    }
}
