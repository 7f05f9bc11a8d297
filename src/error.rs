use std::fmt::Display;

use thiserror::Error;

use crate::{format_amount, AccountNumber, Amount};

/// Which balance-changing operation was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxKind {
    Deposit,
    Withdrawal,
}

impl Display for TxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TxKind::Deposit => write!(f, "Deposit"),
            TxKind::Withdrawal => write!(f, "Withdrawal"),
        }
    }
}

/// Input field a validation failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    HolderName,
    InitialDeposit,
    Email,
    PhoneNumber,
}

impl Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Field::HolderName => "holder name",
            Field::InitialDeposit => "initial deposit",
            Field::Email => "email",
            Field::PhoneNumber => "phone number",
        };
        write!(f, "{}", name)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BankError {
    #[error("{kind} amount must be positive")]
    InvalidAmount { kind: TxKind, amount: Amount },
    #[error(
        "Insufficient balance: requested {}, available {}",
        format_amount(.requested),
        format_amount(.available)
    )]
    InsufficientFunds { requested: Amount, available: Amount },
    #[error(
        "Deposit of {} would exceed the maximum balance (current {})",
        format_amount(.requested),
        format_amount(.available)
    )]
    BalanceOverflow { requested: Amount, available: Amount },
    #[error("Account {0} not found")]
    NotFound(AccountNumber),
    #[error("Cannot create more accounts: capacity of {0} reached")]
    CapacityExceeded(usize),
    #[error("Cannot create more accounts: no account numbers left after {0}")]
    NumbersExhausted(AccountNumber),
    #[error("Invalid {field}: {reason}")]
    Validation { field: Field, reason: String },
}

impl BankError {
    pub(crate) fn validation(field: Field, reason: impl Into<String>) -> Self {
        BankError::Validation {
            field,
            reason: reason.into(),
        }
    }
}
