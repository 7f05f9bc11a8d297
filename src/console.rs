//! Menu driven read-eval-print loop over an [`AccountRegistry`].

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use hashbrown::HashMap;
use log::{debug, info};
use thiserror::Error;

use crate::account::{normalize_name, AccountSnapshot};
use crate::error::BankError;
use crate::registry::AccountRegistry;
use crate::validate;
use crate::{format_amount, AccountNumber, Amount};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Create,
    Deposit,
    Withdraw,
    Details,
    UpdateContact,
    List,
    Exit,
}

const MENU: [(i64, Command, &str); 7] = [
    (1, Command::Create, "Create a new account"),
    (2, Command::Deposit, "Deposit money"),
    (3, Command::Withdraw, "Withdraw money"),
    (4, Command::Details, "View account details"),
    (5, Command::UpdateContact, "Update contact details"),
    (6, Command::List, "List all accounts"),
    (7, Command::Exit, "Exit"),
];

/// Raised by the prompt helpers when the input stream is exhausted.
#[derive(Error, Debug)]
#[error("input closed")]
struct EndOfInput;

pub struct Console<R, W> {
    registry: AccountRegistry,
    input: R,
    output: W,
    commands: HashMap<i64, Command>,
    json: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(registry: AccountRegistry, input: R, output: W) -> Self {
        Console {
            registry,
            input,
            output,
            commands: MENU.iter().map(|&(key, cmd, _)| (key, cmd)).collect(),
            json: false,
        }
    }

    /// Print account snapshots as JSON instead of the `Account{..}` form.
    pub fn json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub fn into_registry(self) -> AccountRegistry {
        self.registry
    }

    /// Runs until the user picks Exit or the input ends.
    pub fn run(&mut self) -> Result<()> {
        loop {
            match self.step() {
                Ok(true) => continue,
                Ok(false) => return Ok(()),
                Err(err) if err.is::<EndOfInput>() => {
                    info!("input closed, leaving menu");
                    return Ok(());
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn step(&mut self) -> Result<bool> {
        self.print_menu()?;
        let choice = self.read_int("Enter your choice: ")?;
        let Some(&command) = self.commands.get(&choice) else {
            debug!("unknown menu choice {}", choice);
            writeln!(self.output, "Invalid choice. Please try again.")?;
            return Ok(true);
        };
        debug!("menu command {:?}", command);

        match command {
            Command::Create => self.create_account()?,
            Command::Deposit => self.deposit()?,
            Command::Withdraw => self.withdraw()?,
            Command::Details => self.show_details()?,
            Command::UpdateContact => self.update_contact()?,
            Command::List => self.list_accounts()?,
            Command::Exit => {
                writeln!(
                    self.output,
                    "Thank you for using the Banking System. Goodbye!"
                )?;
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.output, "\n===============================")?;
        writeln!(self.output, "  Welcome to Banking System  ")?;
        writeln!(self.output, "===============================")?;
        for (key, _, label) in MENU {
            writeln!(self.output, "{}. {}", key, label)?;
        }
        Ok(())
    }

    fn create_account(&mut self) -> Result<()> {
        if self.registry.is_full() {
            info!(
                "refused creation, registry at capacity {}",
                self.registry.capacity()
            );
            writeln!(self.output, "Cannot create more accounts.")?;
            return Ok(());
        }
        let name = self.read_name("Enter account holder name: ")?;
        let initial_deposit = self.read_positive_amount("Enter initial deposit amount: ")?;
        let email = self.read_validated(
            "Enter email address: ",
            validate::email,
            "Invalid email format.",
        )?;
        let phone = self.read_validated(
            "Enter phone number (10 digits): ",
            validate::phone_number,
            "Invalid phone number format.",
        )?;

        match self
            .registry
            .create_account(&name, initial_deposit, &email, &phone)
        {
            Ok(number) => {
                info!("opened account {}", number);
                writeln!(
                    self.output,
                    "Account created successfully! Account Number: {}",
                    number
                )?;
            }
            Err(err) => self.report(err)?,
        }
        Ok(())
    }

    fn deposit(&mut self) -> Result<()> {
        let Some(number) = self.read_existing_account()? else {
            return Ok(());
        };
        let amount = self.read_positive_amount("Enter amount to deposit: ")?;
        match self.registry.deposit(number, amount) {
            Ok(balance) => writeln!(
                self.output,
                "Deposit successful! New balance: {}",
                format_amount(&balance)
            )?,
            Err(err) => self.report(err)?,
        }
        Ok(())
    }

    fn withdraw(&mut self) -> Result<()> {
        let Some(number) = self.read_existing_account()? else {
            return Ok(());
        };
        let amount = self.read_positive_amount("Enter amount to withdraw: ")?;
        match self.registry.withdraw(number, amount) {
            Ok(balance) => writeln!(
                self.output,
                "Withdrawal successful! New balance: {}",
                format_amount(&balance)
            )?,
            Err(err) => self.report(err)?,
        }
        Ok(())
    }

    fn show_details(&mut self) -> Result<()> {
        let Some(number) = self.read_existing_account()? else {
            return Ok(());
        };
        let snapshot = self.registry.find(number)?.describe();
        self.print_snapshot(&snapshot)
    }

    fn update_contact(&mut self) -> Result<()> {
        let Some(number) = self.read_existing_account()? else {
            return Ok(());
        };
        let email = self.read_validated(
            "Enter new email address: ",
            validate::email,
            "Invalid email format.",
        )?;
        let phone = self.read_validated(
            "Enter new phone number (10 digits): ",
            validate::phone_number,
            "Invalid phone number.",
        )?;
        match self.registry.update_contact(number, &email, &phone) {
            Ok(()) => writeln!(self.output, "Contact details updated successfully.")?,
            Err(err) => self.report(err)?,
        }
        Ok(())
    }

    fn list_accounts(&mut self) -> Result<()> {
        let snapshots = self.registry.list_all();
        if snapshots.is_empty() {
            writeln!(self.output, "No accounts available.")?;
            return Ok(());
        }
        for snapshot in &snapshots {
            self.print_snapshot(snapshot)?;
        }
        Ok(())
    }

    fn print_snapshot(&mut self, snapshot: &AccountSnapshot) -> Result<()> {
        if self.json {
            let line = serde_json::to_string(snapshot).context("serializing account")?;
            writeln!(self.output, "{}", line)?;
        } else {
            writeln!(self.output, "{}", snapshot)?;
        }
        Ok(())
    }

    fn report(&mut self, err: BankError) -> Result<()> {
        info!("operation refused: {}", err);
        writeln!(self.output, "Error: {}", err)?;
        Ok(())
    }

    /// Asks for an account number and checks that it exists, printing
    /// "Account not found." otherwise.
    fn read_existing_account(&mut self) -> Result<Option<AccountNumber>> {
        let input = self.read_int("Enter account number: ")?;
        let found = AccountNumber::try_from(input)
            .ok()
            .filter(|&number| self.registry.find(number).is_ok());
        if found.is_none() {
            info!("account {} not found", input);
            writeln!(self.output, "Account not found.")?;
        }
        Ok(found)
    }

    fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("reading console input")?;
        if read == 0 {
            return Err(EndOfInput.into());
        }
        Ok(line.trim().to_string())
    }

    fn prompt(&mut self, text: &str) -> Result<String> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        self.read_line()
    }

    fn read_int(&mut self, text: &str) -> Result<i64> {
        let mut line = self.prompt(text)?;
        loop {
            if let Some(value) = validate::parse_integer(&line) {
                return Ok(value);
            }
            line = self.prompt("Please enter a valid integer: ")?;
        }
    }

    fn read_positive_amount(&mut self, text: &str) -> Result<Amount> {
        loop {
            let line = self.prompt(text)?;
            match validate::parse_amount(&line) {
                Some(value) if value > Amount::ZERO => return Ok(value),
                Some(_) => writeln!(self.output, "Value must be positive.")?,
                None => writeln!(self.output, "Please enter a valid number.")?,
            }
        }
    }

    fn read_name(&mut self, text: &str) -> Result<String> {
        loop {
            let line = self.prompt(text)?;
            if !normalize_name(&line).is_empty() {
                return Ok(line);
            }
            writeln!(self.output, "Name must not be empty.")?;
        }
    }

    fn read_validated<F>(&mut self, text: &str, check: F, message: &str) -> Result<String>
    where
        F: Fn(&str) -> Result<String, BankError>,
    {
        loop {
            let line = self.prompt(text)?;
            match check(&line) {
                Ok(value) => return Ok(value),
                Err(err) => {
                    debug!("{}", err);
                    writeln!(self.output, "{}", message)?;
                }
            }
        }
    }
}
