use thiserror::Error;

pub type Result<T> = std::result::Result<T, VaultError>;

/// Every rejected intent maps to exactly one of these kinds. All of them are
/// recoverable validation failures; the presentation layer only needs the
/// kind to render a message.
#[derive(Error, Debug)]
pub enum VaultError {
    #[error("amount must be positive")]
    InvalidAmount,
    #[error("insufficient funds")]
    InsufficientFunds,
    #[error("unknown offering: {0}")]
    UnknownOffering(u32),
    #[error("quantity {quantity} outside allowed range {min}..={max}")]
    QuantityOutOfRange { quantity: u32, min: u32, max: u32 },
    #[error("target link must not be empty")]
    InvalidLink,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("signup form incomplete")]
    IncompleteSignup,
    #[error("profile fields incomplete")]
    IncompleteProfile,
    #[error("no active session")]
    NoActiveSession,
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
