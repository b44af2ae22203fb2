//! Insert command handlers.

use crate::args::{InsertRoommateArgs, InsertSharedExpenseArgs, InsertTransactionArgs};
use crate::commands::Out;
use crate::model::{SharedExpense, Transaction};
use crate::store::Store;
use crate::Result;

/// Records a personal expense for the current month.
///
/// The id is generated from the clock and is shown in the message so that the transaction can be
/// deleted later.
///
/// # Errors
///
/// Returns the `Rejection` as an error when the amount, description or category is not accepted.
/// Nothing is stored in that case.
pub fn insert_transaction(
    store: &mut Store,
    args: &InsertTransactionArgs,
) -> Result<Out<Transaction>> {
    let transaction = store.add_transaction(
        args.amount(),
        args.description(),
        args.category(),
        args.new_category(),
    )?;
    let message = format!(
        "Added {} for '{}' under {} (id {})",
        transaction.amount(),
        transaction.description(),
        transaction.category(),
        transaction.id()
    );
    Ok(Out::new(message, transaction))
}

/// Records an expense paid for the household by one roommate.
///
/// # Errors
///
/// Returns the `Rejection` as an error when the amount, description or payer is not accepted.
pub fn insert_shared_expense(
    store: &mut Store,
    args: &InsertSharedExpenseArgs,
) -> Result<Out<SharedExpense>> {
    let expense = store.add_shared_expense(args.amount(), args.description(), args.paid_by())?;
    let message = format!(
        "Added shared expense {} for '{}' paid by {} (id {})",
        expense.amount(),
        expense.description(),
        expense.paid_by(),
        expense.id()
    );
    Ok(Out::new(message, expense))
}

/// Adds a roommate to split shared expenses with.
///
/// # Errors
///
/// Returns an error when the name is blank or the roommate already exists.
pub fn insert_roommate(store: &mut Store, args: &InsertRoommateArgs) -> Result<Out<String>> {
    let name = store.add_roommate(args.name())?;
    let count = store.data().roommates().len();
    Ok(Out::new(
        format!("Added roommate {name}, shared expenses are now split {count} ways"),
        name,
    ))
}
