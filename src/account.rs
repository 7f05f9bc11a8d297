use std::fmt::Display;

use serde::Serialize;

use crate::error::{BankError, Field, TxKind};
use crate::{format_amount, AccountNumber, Amount};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    account_number: AccountNumber,
    holder_name: String,
    balance: Amount,
    email: String,
    phone_number: String,
}

impl Account {
    /// Opens an account with `initial_deposit` as its balance.
    ///
    /// The holder name is normalized and the contact fields are trimmed; their
    /// format is checked by the registry before it calls this.
    pub fn create(
        account_number: AccountNumber,
        holder_name: &str,
        initial_deposit: Amount,
        email: &str,
        phone_number: &str,
    ) -> Result<Account, BankError> {
        if initial_deposit <= Amount::ZERO {
            return Err(BankError::validation(
                Field::InitialDeposit,
                "must be positive",
            ));
        }
        let holder_name = normalize_name(holder_name);
        if holder_name.is_empty() {
            return Err(BankError::validation(Field::HolderName, "must not be empty"));
        }
        Ok(Account {
            account_number,
            holder_name,
            balance: initial_deposit,
            email: email.trim().to_string(),
            phone_number: phone_number.trim().to_string(),
        })
    }

    pub fn account_number(&self) -> AccountNumber {
        self.account_number
    }

    pub fn holder_name(&self) -> &str {
        &self.holder_name
    }

    pub fn balance(&self) -> Amount {
        self.balance
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    pub fn deposit(&mut self, amount: Amount) -> Result<(), BankError> {
        if amount <= Amount::ZERO {
            return Err(BankError::InvalidAmount {
                kind: TxKind::Deposit,
                amount,
            });
        }
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(BankError::BalanceOverflow {
                requested: amount,
                available: self.balance,
            })?;
        Ok(())
    }

    pub fn withdraw(&mut self, amount: Amount) -> Result<(), BankError> {
        if amount <= Amount::ZERO {
            return Err(BankError::InvalidAmount {
                kind: TxKind::Withdrawal,
                amount,
            });
        }
        self.balance = self
            .remaining_after(amount)
            .ok_or(BankError::InsufficientFunds {
                requested: amount,
                available: self.balance,
            })?;
        Ok(())
    }

    pub fn update_contact(&mut self, email: &str, phone_number: &str) {
        self.email = email.trim().to_string();
        self.phone_number = phone_number.trim().to_string();
    }

    pub fn describe(&self) -> AccountSnapshot {
        AccountSnapshot {
            account_number: self.account_number,
            holder_name: self.holder_name.clone(),
            balance: format_amount(&self.balance),
            email: self.email.clone(),
            phone_number: self.phone_number.clone(),
        }
    }

    /// Balance left after taking `amount`, or `None` if it would go negative.
    fn remaining_after(&self, amount: Amount) -> Option<Amount> {
        self.balance
            .checked_sub(amount)
            .filter(|remaining| *remaining >= Amount::ZERO)
    }
}

/// Read-only view of an account, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountSnapshot {
    pub account_number: AccountNumber,
    pub holder_name: String,
    /// Always two fractional digits.
    pub balance: String,
    pub email: String,
    pub phone_number: String,
}

impl Display for AccountSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Account{{Account Number={}, Name='{}', Balance={}, Email='{}', Phone='{}'}}",
            self.account_number, self.holder_name, self.balance, self.email, self.phone_number
        )
    }
}

/// Title-cases every whitespace separated word and joins them with single
/// spaces. Only the first character of a word is upper-cased, so
/// `o'brien` becomes `O'brien`.
pub fn normalize_name(raw: &str) -> String {
    raw.split_whitespace()
        .map(|word| {
            let lower = word.to_lowercase();
            let mut chars = lower.chars();
            let Some(first) = chars.next() else {
                return String::new();
            };
            // Characters whose upper case is several characters (`ß`) stay as they are.
            let upper: String = first.to_uppercase().collect();
            let mut word = if upper.chars().count() == 1 {
                upper
            } else {
                first.to_string()
            };
            word.push_str(chars.as_str());
            word
        })
        .collect::<Vec<_>>()
        .join(" ")
}
