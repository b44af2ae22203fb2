use crate::model::Amount;
use std::fmt::{Display, Formatter};

pub type Error = anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Why a mutation was declined. A rejected mutation leaves the store untouched and persists
/// nothing.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Rejection {
    EmptyAmount,
    InvalidAmount(String),
    /// Amounts must be greater than zero.
    NonPositiveAmount(String),
    /// Above `Amount::MAX_ENTRY`.
    AmountTooLarge(String),
    EmptyDescription,
    /// Neither a selected category nor a new category was given.
    MissingCategory,
    /// A shared expense needs a payer and there are no roommates to default to.
    NoRoommates,
    UnknownRoommate(String),
    EmptyName,
    DuplicateRoommate(String),
}

impl Display for Rejection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::EmptyAmount => write!(f, "An amount is required"),
            Rejection::InvalidAmount(s) => write!(f, "'{s}' is not a valid amount"),
            Rejection::NonPositiveAmount(s) => {
                write!(f, "The amount must be greater than zero, got {s}")
            }
            Rejection::AmountTooLarge(s) => {
                write!(f, "The amount {s} is more than the largest allowed, {}", Amount::MAX_ENTRY)
            }
            Rejection::EmptyDescription => write!(f, "A description is required"),
            Rejection::MissingCategory => write!(f, "Choose a category or give a new one"),
            Rejection::NoRoommates => write!(f, "Add a roommate before adding shared expenses"),
            Rejection::UnknownRoommate(name) => write!(f, "'{name}' is not a roommate"),
            Rejection::EmptyName => write!(f, "A roommate name is required"),
            Rejection::DuplicateRoommate(name) => write!(f, "'{name}' is already a roommate"),
        }
    }
}

impl std::error::Error for Rejection {}
