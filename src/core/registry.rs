//! Customer registry
//!
//! Owns every customer and the two lookup indexes (by id, by full name),
//! plus the allocator state that keeps account numbers globally unique and
//! customer ids monotonic. All writes go through a single registry, so
//! allocation checks and inserts are atomic with respect to each other.

use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;

use crate::types::account::{Account, AccountKind, AccountNumber};
use crate::types::customer::{Customer, CustomerId, NewCustomer, Person};
use crate::types::error::LedgerError;

/// First account number handed out when the roster is empty
const FIRST_ACCOUNT_NUMBER: AccountNumber = 1000;

/// Registry of all customers with id/name lookup and number allocation
#[derive(Debug, Default)]
pub struct CustomerRegistry {
    /// Customers in insertion order; the indexes point into this vec
    customers: Vec<Customer>,

    by_id: HashMap<CustomerId, usize>,

    /// Full-name index ("First Last"); names are assumed unique
    by_name: HashMap<String, usize>,

    /// Every account number ever handed out; numbers are never reused
    allocated_numbers: HashSet<AccountNumber>,

    /// Next candidate for the sequential allocator
    next_number: AccountNumber,

    /// Highest customer id seen so far
    max_id: CustomerId,
}

impl CustomerRegistry {
    pub fn new() -> Self {
        CustomerRegistry {
            next_number: FIRST_ACCOUNT_NUMBER,
            ..CustomerRegistry::default()
        }
    }

    /// Insert a fully-formed customer (roster loading path)
    ///
    /// Seeds the allocator state: the customer's account numbers join the
    /// allocated set, and the id counter and next-number cursor advance past
    /// them.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::DuplicateAccountNumber`] if any of the
    /// customer's account numbers is already taken. Nothing is inserted in
    /// that case.
    pub fn insert(&mut self, customer: Customer) -> Result<(), LedgerError> {
        for account in customer.accounts() {
            if self.allocated_numbers.contains(&account.number()) {
                return Err(LedgerError::duplicate_account_number(account.number()));
            }
        }

        for account in customer.accounts() {
            self.allocated_numbers.insert(account.number());
            if account.number() >= self.next_number {
                self.next_number = account.number() + 1;
            }
        }
        if customer.id() > self.max_id {
            self.max_id = customer.id();
        }

        let index = self.customers.len();
        self.by_id.insert(customer.id(), index);
        self.by_name.insert(customer.full_name(), index);
        self.customers.push(customer);
        Ok(())
    }

    /// Enroll a new customer with zero balances on all three accounts
    ///
    /// Mints the next customer id and three fresh account numbers. The
    /// Credit account gets the caller-supplied limit.
    ///
    /// # Returns
    ///
    /// The minted customer id.
    pub fn enroll(&mut self, request: NewCustomer) -> Result<CustomerId, LedgerError> {
        let id = self.max_id + 1;

        let checking_number = self.allocate_account_number();
        let savings_number = self.allocate_account_number();
        let credit_number = self.allocate_account_number();

        let person = Person {
            id,
            first_name: request.first_name,
            last_name: request.last_name,
            date_of_birth: request.date_of_birth,
            address: request.address,
            city: request.city,
            state: request.state,
            zip: request.zip,
            phone_number: request.phone_number,
        };

        let customer = Customer::new(
            person,
            Account::checking(checking_number, Decimal::ZERO),
            Account::savings(savings_number, Decimal::ZERO),
            Account::credit(credit_number, Decimal::ZERO, request.credit_limit),
        );

        self.insert(customer)?;
        Ok(id)
    }

    /// Look up a customer by full name ("First Last")
    pub fn resolve_by_name(&self, full_name: &str) -> Option<&Customer> {
        self.by_name.get(full_name).map(|&i| &self.customers[i])
    }

    /// Look up a customer by id
    pub fn resolve_by_id(&self, id: CustomerId) -> Option<&Customer> {
        self.by_id.get(&id).map(|&i| &self.customers[i])
    }

    pub fn customer_mut_by_id(&mut self, id: CustomerId) -> Option<&mut Customer> {
        let index = *self.by_id.get(&id)?;
        Some(&mut self.customers[index])
    }

    pub fn customer_mut_by_name(&mut self, full_name: &str) -> Option<&mut Customer> {
        let index = *self.by_name.get(full_name)?;
        Some(&mut self.customers[index])
    }

    /// All customers in insertion order
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    /// Find the account of the given kind and number, with its owner
    pub fn find_account(
        &self,
        kind: AccountKind,
        number: AccountNumber,
    ) -> Option<(&Customer, &Account)> {
        self.customers.iter().find_map(|customer| {
            let account = customer.account(kind);
            (account.number() == number).then_some((customer, account))
        })
    }

    /// Hand out the next unused account number
    ///
    /// The allocated set is the invariant; the cursor is just a fast path
    /// over it.
    fn allocate_account_number(&mut self) -> AccountNumber {
        let mut candidate = self.next_number;
        while self.allocated_numbers.contains(&candidate) {
            candidate += 1;
        }
        self.next_number = candidate + 1;
        candidate
    }
}
