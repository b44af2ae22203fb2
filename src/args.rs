//! These structs provide the CLI interface for the moneypath CLI.

use crate::model::Month;
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// moneypath: track personal spending and split shared expenses with roommates.
///
/// Personal expenses are grouped by category. Shared expenses are split evenly between
/// roommates, and the summary shows who gets money back and who owes. When a new month starts,
/// the previous month is archived into history the next time you run any command.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[command(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Add a transaction, a shared expense or a roommate.
    Insert(InsertArgs),
    /// Delete a transaction or a shared expense by id.
    Delete(DeleteArgs),
    /// Show this month's personal spending and shared-expense settlements.
    Summary(SummaryArgs),
    /// Show archived months, newest first.
    History(HistoryArgs),
    /// Archive the stored month if a new month has started.
    Rollover,
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where moneypath data and configuration is held. Defaults to ~/moneypath
    #[arg(long, env = "MONEYPATH_HOME", default_value_t = default_home())]
    home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, home: PathBuf) -> Self {
        Self {
            log_level,
            home: home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn home(&self) -> &DisplayPath {
        &self.home
    }
}

/// Args for the `moneypath insert` command.
#[derive(Debug, Parser, Clone)]
pub struct InsertArgs {
    #[command(subcommand)]
    entity: InsertSubcommand,
}

impl InsertArgs {
    pub fn entity(&self) -> &InsertSubcommand {
        &self.entity
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum InsertSubcommand {
    /// Add a personal expense.
    Transaction(InsertTransactionArgs),
    /// Add an expense paid for the household.
    SharedExpense(InsertSharedExpenseArgs),
    /// Add a roommate to split shared expenses with.
    Roommate(InsertRoommateArgs),
}

/// Args for `moneypath insert transaction`.
#[derive(Debug, Parser, Clone)]
pub struct InsertTransactionArgs {
    /// The amount spent, e.g. 120.50 or ₹1,200
    #[arg(allow_hyphen_values = true)]
    amount: String,

    /// What the money was spent on.
    description: String,

    /// An existing category.
    #[arg(long, default_value = "")]
    category: String,

    /// A new category. Used instead of --category when given.
    #[arg(long, default_value = "")]
    new_category: String,
}

impl InsertTransactionArgs {
    pub fn new(
        amount: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        new_category: impl Into<String>,
    ) -> Self {
        Self {
            amount: amount.into(),
            description: description.into(),
            category: category.into(),
            new_category: new_category.into(),
        }
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn new_category(&self) -> &str {
        &self.new_category
    }
}

/// Args for `moneypath insert shared-expense`.
#[derive(Debug, Parser, Clone)]
pub struct InsertSharedExpenseArgs {
    /// The amount paid.
    #[arg(allow_hyphen_values = true)]
    amount: String,

    /// What the money was spent on.
    description: String,

    /// The roommate who paid. Defaults to the first roommate.
    #[arg(long)]
    paid_by: Option<String>,
}

impl InsertSharedExpenseArgs {
    pub fn new(
        amount: impl Into<String>,
        description: impl Into<String>,
        paid_by: Option<String>,
    ) -> Self {
        Self {
            amount: amount.into(),
            description: description.into(),
            paid_by,
        }
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn paid_by(&self) -> Option<&str> {
        self.paid_by.as_deref()
    }
}

/// Args for `moneypath insert roommate`.
#[derive(Debug, Parser, Clone)]
pub struct InsertRoommateArgs {
    /// The roommate's name.
    name: String,
}

impl InsertRoommateArgs {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Args for the `moneypath delete` command.
#[derive(Debug, Parser, Clone)]
pub struct DeleteArgs {
    #[command(subcommand)]
    entity: DeleteSubcommand,
}

impl DeleteArgs {
    pub fn entity(&self) -> &DeleteSubcommand {
        &self.entity
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum DeleteSubcommand {
    /// Delete a personal expense.
    Transaction(DeleteIdArgs),
    /// Delete a shared expense.
    SharedExpense(DeleteIdArgs),
}

/// The id of the record to delete, as shown by `moneypath summary --details`.
#[derive(Debug, Parser, Clone)]
pub struct DeleteIdArgs {
    id: u64,
}

impl DeleteIdArgs {
    pub fn new(id: u64) -> Self {
        Self { id }
    }

    pub fn id(&self) -> u64 {
        self.id
    }
}

/// Args for the `moneypath summary` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct SummaryArgs {
    /// Also list the transactions in each category and the expenses each roommate paid.
    #[arg(long)]
    details: bool,
}

impl SummaryArgs {
    pub fn new(details: bool) -> Self {
        Self { details }
    }

    pub fn details(&self) -> bool {
        self.details
    }
}

/// Args for the `moneypath history` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct HistoryArgs {
    /// Only show this month, in YYYY-MM form.
    #[arg(long)]
    month: Option<Month>,

    /// Also list the archived transactions and expenses.
    #[arg(long)]
    details: bool,
}

impl HistoryArgs {
    pub fn new(month: Option<Month>, details: bool) -> Self {
        Self { month, details }
    }

    pub fn month(&self) -> Option<Month> {
        self.month
    }

    pub fn details(&self) -> bool {
        self.details
    }
}

fn default_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("moneypath"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --home or MONEYPATH_HOME instead of relying on the default \
                home directory. If you continue using the program right now, you may have \
                problems!",
            );
            PathBuf::from("moneypath")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}
