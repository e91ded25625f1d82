use thiserror::Error;

/// The single error kind of the ledger. Any operation returning it has left
/// the ledger untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Please enter an ingredient name.")]
    EmptyName,

    #[error("Unknown price type '{0}'. Valid types: kg, unit")]
    UnknownPriceType(String),

    #[error("Invalid quantity: {0} (must be a non-negative number)")]
    InvalidQuantity(f64),

    #[error("Invalid unit price: {0} (must be a non-negative number)")]
    InvalidUnitPrice(f64),
}
