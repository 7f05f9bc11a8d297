use std::io;

use anyhow::Result;
use rust_decimal::{Decimal, RoundingStrategy};

pub mod account;
pub mod config;
pub mod console;
pub mod error;
pub mod registry;
pub mod validate;

pub use account::{normalize_name, Account, AccountSnapshot};
pub use config::RegistryConfig;
pub use console::Console;
pub use error::{BankError, Field, TxKind};
pub use registry::AccountRegistry;

pub type AccountNumber = u32;
pub type Amount = Decimal;

/// Renders an amount with exactly two fractional digits, rounding half away
/// from zero.
pub fn format_amount(amount: &Amount) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

pub fn init_bank(config: RegistryConfig) -> AccountRegistry {
    AccountRegistry::new(config)
}

/// Runs the menu on stdin/stdout until the user exits.
pub fn run_app(registry: AccountRegistry, json: bool) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(registry, stdin.lock(), stdout.lock()).json(json);
    console.run()
}
