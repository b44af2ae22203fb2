//! The `rollover` command.

use crate::commands::Out;
use crate::rollover::Rollover;
use crate::store::Store;
use crate::Result;

/// Runs the month rollover check and reports what it did.
///
/// Every session already runs the check when it opens, so `opened` is the outcome of that check.
/// The check is run again here in case the month changed while the session was open; its outcome
/// is reported if it did something, otherwise `opened` is.
pub fn rollover(store: &mut Store, opened: Rollover) -> Result<Out<Rollover>> {
    let outcome = match store.run_rollover_check() {
        Rollover::Current => opened,
        changed => changed,
    };
    let message = match outcome {
        Rollover::Current => format!(
            "{} is the current month, there is nothing to archive",
            store.data().current_month().long_name()
        ),
        Rollover::Advanced { from, to } => format!(
            "Moved from {} to {}, there was nothing to archive",
            from.long_name(),
            to.long_name()
        ),
        Rollover::Archived { month, to } => format!(
            "Archived {} into history, now tracking {}",
            month.long_name(),
            to.long_name()
        ),
    };
    Ok(Out::new(message, outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::open;
    use crate::model::Month;
    use crate::test::{clock_at, TestEnv};

    #[test]
    fn test_rollover_current() {
        let env = TestEnv::new();
        let (mut store, opened) = open(&env.config(), Box::new(clock_at(2024, 5, 3)));
        let out = rollover(&mut store, opened).unwrap();
        assert_eq!(out.structure(), Some(&Rollover::Current));
        assert_eq!(
            out.message(),
            "May 2024 is the current month, there is nothing to archive"
        );
    }

    #[test]
    fn test_rollover_reports_archive_from_open() {
        let env = TestEnv::new();
        let (mut store, _) = open(&env.config(), Box::new(clock_at(2024, 4, 30)));
        store.add_transaction("25", "Snacks", "Useless", "").unwrap();

        let (mut store, opened) = open(&env.config(), Box::new(clock_at(2024, 5, 1)));
        let out = rollover(&mut store, opened).unwrap();
        assert_eq!(
            out.structure(),
            Some(&Rollover::Archived {
                month: Month::new(2024, 4).unwrap(),
                to: Month::new(2024, 5).unwrap(),
            })
        );
        assert_eq!(
            out.message(),
            "Archived April 2024 into history, now tracking May 2024"
        );
        assert_eq!(env.read_document().history().len(), 1);
    }
}
