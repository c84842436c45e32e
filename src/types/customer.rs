//! Customer and person types
//!
//! A `Customer` is a `Person` plus exactly three accounts in the fixed
//! order Checking, Savings, Credit. Accounts never move between customers.

use crate::types::account::{Account, AccountKind};
use rust_decimal::Decimal;

/// Customer identifier, minted sequentially at enrollment
pub type CustomerId = u32;

/// Identity fields of a bank customer
#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    /// Unique customer id
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    /// Street address
    pub address: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub phone_number: String,
}

impl Person {
    /// Full name as used for lookups and log entries: "First Last"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Enrollment request for a brand-new customer
///
/// Ids and account numbers are minted by the registry; balances start at
/// zero. The credit limit is supplied by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    pub address: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub phone_number: String,
    /// Credit limit for the customer's Credit account
    pub credit_limit: Decimal,
}

/// A customer: identity plus their three accounts
///
/// The accounts array is indexed by [`AccountKind`] order (Checking,
/// Savings, Credit) and is fixed for the customer's lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    person: Person,
    accounts: [Account; 3],
}

impl Customer {
    /// Build a customer from identity and their three accounts
    ///
    /// The accounts must be passed in kind order; constructors on
    /// [`Account`] guarantee the kinds line up.
    pub fn new(person: Person, checking: Account, savings: Account, credit: Account) -> Self {
        Customer {
            person,
            accounts: [checking, savings, credit],
        }
    }

    pub fn person(&self) -> &Person {
        &self.person
    }

    pub fn id(&self) -> CustomerId {
        self.person.id
    }

    /// Full name as used for lookups and log entries
    pub fn full_name(&self) -> String {
        self.person.full_name()
    }

    /// The customer's account of the given kind
    pub fn account(&self, kind: AccountKind) -> &Account {
        &self.accounts[Self::index(kind)]
    }

    /// Mutable access to the customer's account of the given kind
    pub fn account_mut(&mut self, kind: AccountKind) -> &mut Account {
        &mut self.accounts[Self::index(kind)]
    }

    /// All three accounts in kind order
    pub fn accounts(&self) -> &[Account; 3] {
        &self.accounts
    }

    fn index(kind: AccountKind) -> usize {
        match kind {
            AccountKind::Checking => 0,
            AccountKind::Savings => 1,
            AccountKind::Credit => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(value: i64) -> Decimal {
        Decimal::from(value)
    }

    fn person(id: CustomerId, first: &str, last: &str) -> Person {
        Person {
            id,
            first_name: first.to_string(),
            last_name: last.to_string(),
            date_of_birth: "1-Jan-90".to_string(),
            address: "1 Main St".to_string(),
            city: None,
            state: None,
            zip: None,
            phone_number: "(555) 555-0100".to_string(),
        }
    }

    fn customer(id: CustomerId, first: &str, last: &str) -> Customer {
        Customer::new(
            person(id, first, last),
            Account::checking(id * 10 + 1, dec(1000)),
            Account::savings(id * 10 + 2, dec(2000)),
            Account::credit(id * 10 + 3, dec(0), dec(5000)),
        )
    }

    #[test]
    fn test_full_name() {
        assert_eq!(customer(1, "Ann", "Smith").full_name(), "Ann Smith");
    }

    #[test]
    fn test_account_lookup_by_kind() {
        let customer = customer(1, "Ann", "Smith");
        assert_eq!(customer.account(AccountKind::Checking).number(), 11);
        assert_eq!(customer.account(AccountKind::Savings).number(), 12);
        assert_eq!(customer.account(AccountKind::Credit).number(), 13);
    }

    #[test]
    fn test_account_mut_reaches_the_same_account() {
        let mut customer = customer(2, "Bob", "Jones");
        customer
            .account_mut(AccountKind::Savings)
            .deposit(dec(500))
            .unwrap();
        assert_eq!(customer.account(AccountKind::Savings).balance(), dec(2500));
    }

    #[test]
    fn test_accounts_are_in_kind_order() {
        let customer = customer(3, "Cat", "Lee");
        let kinds: Vec<AccountKind> = customer.accounts().iter().map(|a| a.kind()).collect();
        assert_eq!(kinds, AccountKind::ALL.to_vec());
    }
}
