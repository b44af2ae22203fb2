use clap::Parser;
use moneypath::args::{Args, Command, DeleteSubcommand, InsertSubcommand};
use moneypath::{commands, Config, Result, SystemClock};
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e}");
            ExitCode::FAILURE
        }
    }
}

pub fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let config = Config::load(args.common().home().path())?;

    // Every invocation is one session: the rollover check runs before the command does.
    let (mut store, opened) = commands::open(&config, Box::new(SystemClock));

    let _: () = match args.command() {
        Command::Insert(insert_args) => match insert_args.entity() {
            InsertSubcommand::Transaction(args) => {
                commands::insert_transaction(&mut store, args)?.print()
            }
            InsertSubcommand::SharedExpense(args) => {
                commands::insert_shared_expense(&mut store, args)?.print()
            }
            InsertSubcommand::Roommate(args) => commands::insert_roommate(&mut store, args)?.print(),
        },

        Command::Delete(delete_args) => match delete_args.entity() {
            DeleteSubcommand::Transaction(args) => {
                commands::delete_transaction(&mut store, args)?.print()
            }
            DeleteSubcommand::SharedExpense(args) => {
                commands::delete_shared_expense(&mut store, args)?.print()
            }
        },

        Command::Summary(summary_args) => commands::summary(&store, summary_args)?.print(),

        Command::History(history_args) => commands::history(&store, history_args)?.print(),

        Command::Rollover => commands::rollover(&mut store, opened)?.print(),
    };
    Ok(())
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate only.
            EnvFilter::new(format!(
                "{}={},{}={}",
                env!("CARGO_CRATE_NAME"),
                level,
                env!("CARGO_BIN_NAME"),
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
