use crate::account::{Account, AccountSnapshot};
use crate::config::RegistryConfig;
use crate::error::BankError;
use crate::validate;
use crate::{AccountNumber, Amount};

/// All open accounts in creation order, plus the counter that numbers them.
#[derive(Debug)]
pub struct AccountRegistry {
    accounts: Vec<Account>,
    capacity: usize,
    next_account_number: AccountNumber,
}

impl Default for AccountRegistry {
    fn default() -> Self {
        AccountRegistry::new(RegistryConfig::default())
    }
}

impl AccountRegistry {
    pub fn new(config: RegistryConfig) -> AccountRegistry {
        AccountRegistry {
            accounts: Vec::new(),
            capacity: config.capacity,
            next_account_number: config.first_account_number,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.accounts.len() >= self.capacity
    }

    /// Number the next successful creation will receive.
    pub fn next_account_number(&self) -> AccountNumber {
        self.next_account_number
    }

    /// Opens a new account and returns its number. A failed creation leaves
    /// the registry, counter included, untouched.
    pub fn create_account(
        &mut self,
        holder_name: &str,
        initial_deposit: Amount,
        email: &str,
        phone_number: &str,
    ) -> Result<AccountNumber, BankError> {
        if self.is_full() {
            return Err(BankError::CapacityExceeded(self.capacity));
        }
        let email = validate::email(email)?;
        let phone_number = validate::phone_number(phone_number)?;

        let number = self.next_account_number;
        let following = number
            .checked_add(1)
            .ok_or(BankError::NumbersExhausted(number))?;
        let account = Account::create(number, holder_name, initial_deposit, &email, &phone_number)?;
        self.accounts.push(account);
        self.next_account_number = following;
        Ok(number)
    }

    pub fn find(&self, account_number: AccountNumber) -> Result<&Account, BankError> {
        self.accounts
            .iter()
            .find(|acc| acc.account_number() == account_number)
            .ok_or(BankError::NotFound(account_number))
    }

    fn find_mut(&mut self, account_number: AccountNumber) -> Result<&mut Account, BankError> {
        self.accounts
            .iter_mut()
            .find(|acc| acc.account_number() == account_number)
            .ok_or(BankError::NotFound(account_number))
    }

    /// Snapshots of every account in creation order; empty when none exist.
    pub fn list_all(&self) -> Vec<AccountSnapshot> {
        self.accounts.iter().map(Account::describe).collect()
    }

    /// Returns the balance after the deposit.
    pub fn deposit(
        &mut self,
        account_number: AccountNumber,
        amount: Amount,
    ) -> Result<Amount, BankError> {
        let account = self.find_mut(account_number)?;
        account.deposit(amount)?;
        Ok(account.balance())
    }

    /// Returns the balance after the withdrawal.
    pub fn withdraw(
        &mut self,
        account_number: AccountNumber,
        amount: Amount,
    ) -> Result<Amount, BankError> {
        let account = self.find_mut(account_number)?;
        account.withdraw(amount)?;
        Ok(account.balance())
    }

    pub fn update_contact(
        &mut self,
        account_number: AccountNumber,
        email: &str,
        phone_number: &str,
    ) -> Result<(), BankError> {
        let account = self.find_mut(account_number)?;
        let email = validate::email(email)?;
        let phone_number = validate::phone_number(phone_number)?;
        account.update_contact(&email, &phone_number);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Field, TxKind};
    use rstest::{fixture, rstest};

    fn dec(s: &str) -> Amount {
        s.parse().unwrap()
    }

    #[fixture]
    fn registry() -> AccountRegistry {
        let mut registry = AccountRegistry::default();
        registry
            .create_account("john smith", dec("100"), "john@example.com", "1234567890")
            .unwrap();
        registry
            .create_account("mary jones", dec("250.50"), "mary@example.com", "0987654321")
            .unwrap();
        registry
    }

    #[test]
    fn numbers_are_sequential_from_seed() {
        let mut registry = AccountRegistry::default();
        for expected in 1001..1006 {
            assert_eq!(registry.next_account_number(), expected);
            let number = registry
                .create_account("a b", dec("1"), "a@b.co", "1234567890")
                .unwrap();
            assert_eq!(number, expected);
            assert_eq!(registry.next_account_number(), expected + 1);
        }
    }

    #[test]
    fn custom_seed_is_honoured() {
        let mut registry = AccountRegistry::new(RegistryConfig {
            capacity: 5,
            first_account_number: 7,
        });
        let number = registry
            .create_account("a", dec("1"), "a@b.co", "1234567890")
            .unwrap();
        assert_eq!(number, 7);
        assert_eq!(registry.capacity(), 5);
    }

    #[rstest]
    fn find_by_number(registry: AccountRegistry) {
        assert_eq!(registry.find(1001).unwrap().holder_name(), "John Smith");
        assert_eq!(registry.find(1002).unwrap().holder_name(), "Mary Jones");
        assert_eq!(registry.find(1003).unwrap_err(), BankError::NotFound(1003));
    }

    #[rstest]
    #[case::bad_email("a@b.c", "1234567890", Field::Email)]
    #[case::bad_phone("a@b.co", "12345", Field::PhoneNumber)]
    fn invalid_contact_fails_creation_without_consuming_a_number(
        mut registry: AccountRegistry,
        #[case] email: &str,
        #[case] phone: &str,
        #[case] bad_field: Field,
    ) {
        let err = registry
            .create_account("x", dec("10"), email, phone)
            .unwrap_err();
        assert!(matches!(err, BankError::Validation { field, .. } if field == bad_field));
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.next_account_number(), 1003);
    }

    #[rstest]
    fn zero_initial_deposit_fails_creation(mut registry: AccountRegistry) {
        let err = registry
            .create_account("x", Amount::ZERO, "a@b.co", "1234567890")
            .unwrap_err();
        assert!(matches!(
            err,
            BankError::Validation {
                field: Field::InitialDeposit,
                ..
            }
        ));
        assert_eq!(registry.next_account_number(), 1003);
    }

    #[test]
    fn capacity_bound_is_enforced() {
        let mut registry = AccountRegistry::new(RegistryConfig {
            capacity: 3,
            ..RegistryConfig::default()
        });
        for _ in 0..3 {
            registry
                .create_account("a", dec("1"), "a@b.co", "1234567890")
                .unwrap();
        }
        assert!(registry.is_full());
        let before = registry.list_all();

        let err = registry
            .create_account("b", dec("1"), "a@b.co", "1234567890")
            .unwrap_err();
        assert_eq!(err, BankError::CapacityExceeded(3));
        assert_eq!(registry.list_all(), before);
        assert_eq!(registry.next_account_number(), 1004);
    }

    #[test]
    fn exhausted_numbers_leave_registry_untouched() {
        let mut registry = AccountRegistry::new(RegistryConfig {
            capacity: 5,
            first_account_number: AccountNumber::MAX,
        });
        let err = registry
            .create_account("a", dec("1"), "a@b.co", "1234567890")
            .unwrap_err();
        assert_eq!(err, BankError::NumbersExhausted(AccountNumber::MAX));
        assert!(registry.is_empty());
        assert_eq!(registry.next_account_number(), AccountNumber::MAX);
    }

    #[test]
    fn last_number_before_limit_is_assigned() {
        let mut registry = AccountRegistry::new(RegistryConfig {
            capacity: 5,
            first_account_number: AccountNumber::MAX - 1,
        });
        let number = registry
            .create_account("a", dec("1"), "a@b.co", "1234567890")
            .unwrap();
        assert_eq!(number, AccountNumber::MAX - 1);
        assert_eq!(
            registry.create_account("b", dec("1"), "a@b.co", "1234567890"),
            Err(BankError::NumbersExhausted(AccountNumber::MAX))
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn default_capacity_is_one_hundred() {
        let mut registry = AccountRegistry::default();
        for _ in 0..100 {
            registry
                .create_account("a", dec("1"), "a@b.co", "1234567890")
                .unwrap();
        }
        assert_eq!(
            registry.create_account("a", dec("1"), "a@b.co", "1234567890"),
            Err(BankError::CapacityExceeded(100))
        );
        assert_eq!(registry.len(), 100);
    }

    #[rstest]
    fn list_all_keeps_creation_order(registry: AccountRegistry) {
        let numbers: Vec<_> = registry.list_all().iter().map(|s| s.account_number).collect();
        assert_eq!(numbers, vec![1001, 1002]);
        assert!(AccountRegistry::default().list_all().is_empty());
    }

    #[rstest]
    fn deposit_and_withdraw_return_new_balance(mut registry: AccountRegistry) {
        assert_eq!(registry.deposit(1001, dec("50")).unwrap(), dec("150"));
        assert_eq!(registry.withdraw(1001, dec("30.25")).unwrap(), dec("119.75"));
        assert_eq!(registry.find(1002).unwrap().balance(), dec("250.50"));
    }

    #[rstest]
    fn unknown_account_is_not_found(mut registry: AccountRegistry) {
        assert_eq!(
            registry.deposit(9999, dec("1")),
            Err(BankError::NotFound(9999))
        );
        assert_eq!(
            registry.withdraw(9999, dec("1")),
            Err(BankError::NotFound(9999))
        );
        assert_eq!(
            registry.update_contact(9999, "a@b.co", "1234567890"),
            Err(BankError::NotFound(9999))
        );
    }

    #[rstest]
    fn account_errors_propagate_unchanged(mut registry: AccountRegistry) {
        assert!(matches!(
            registry.deposit(1001, dec("-1")),
            Err(BankError::InvalidAmount {
                kind: TxKind::Deposit,
                ..
            })
        ));
        assert!(matches!(
            registry.withdraw(1001, dec("1000")),
            Err(BankError::InsufficientFunds { .. })
        ));
        assert_eq!(registry.find(1001).unwrap().balance(), dec("100"));
    }

    #[rstest]
    fn update_contact_validates_then_replaces(mut registry: AccountRegistry) {
        assert!(registry.update_contact(1002, "bad", "1234567890").is_err());
        assert_eq!(registry.find(1002).unwrap().email(), "mary@example.com");

        registry
            .update_contact(1002, " mary.j@example.org ", "1112223333")
            .unwrap();
        let acc = registry.find(1002).unwrap();
        assert_eq!(acc.email(), "mary.j@example.org");
        assert_eq!(acc.phone_number(), "1112223333");
    }
}
