//! Transaction engine
//!
//! The engine owns the customer registry and the audit log and exposes the
//! five ledger operations: balance inquiry, deposit, withdrawal, transfer
//! between a customer's own accounts, and payment to another customer.
//!
//! Each operation comes in two forms. The resolved form addresses the
//! customer by id and mirrors its log entry into that customer's history
//! (an interactive session acting on a known customer). The by-name form
//! resolves both parties from full-name strings and logs globally only;
//! this is the path the batch replay file goes through.
//!
//! Ordering rule: an operation validates everything first, then mutates,
//! then logs. A rejected operation mutates nothing and logs nothing.

use rust_decimal::Decimal;

use crate::core::audit::AuditLog;
use crate::core::registry::CustomerRegistry;
use crate::types::account::{Account, AccountKind};
use crate::types::customer::CustomerId;
use crate::types::error::LedgerError;

/// Single-shot amount validation applied ahead of the per-kind policy
///
/// Rejects non-positive amounts and amounts exceeding the source account's
/// current balance, for every account kind. Fails closed: an error here
/// means nothing was or will be mutated.
pub fn validate_amount(account: &Account, amount: Decimal) -> Result<(), LedgerError> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::non_positive_amount(amount));
    }
    if amount > account.balance() {
        return Err(LedgerError::amount_exceeds_balance(
            account.kind(),
            account.balance(),
            amount,
        ));
    }
    Ok(())
}

/// Pre-flight check that a deposit of `amount` would be accepted
///
/// Only Credit accounts can refuse a deposit (the `+limit` cap). Used to
/// validate the receiving side of a transfer or payment before the sending
/// side is debited.
fn validate_deposit(account: &Account, amount: Decimal) -> Result<(), LedgerError> {
    if let Some(limit) = account.credit_limit() {
        let new_balance = account
            .balance()
            .checked_add(amount)
            .ok_or_else(|| LedgerError::arithmetic_overflow("deposit", account.number()))?;
        if new_balance > limit {
            return Err(LedgerError::deposit_exceeds_credit_limit(
                account.balance(),
                limit,
                amount,
            ));
        }
    }
    Ok(())
}

/// The transaction engine: registry + audit log + the five operations
#[derive(Debug)]
pub struct TransactionEngine {
    registry: CustomerRegistry,
    audit: AuditLog,
}

impl TransactionEngine {
    pub fn new(registry: CustomerRegistry, audit: AuditLog) -> Self {
        TransactionEngine { registry, audit }
    }

    pub fn registry(&self) -> &CustomerRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut CustomerRegistry {
        &mut self.registry
    }

    pub fn audit(&self) -> &AuditLog {
        &self.audit
    }

    pub fn audit_mut(&mut self) -> &mut AuditLog {
        &mut self.audit
    }

    fn full_name_of(&self, id: CustomerId) -> Result<String, LedgerError> {
        self.registry
            .resolve_by_id(id)
            .map(|c| c.full_name())
            .ok_or_else(|| LedgerError::unknown_customer_id(id))
    }

    /// Render all three of the customer's accounts and log the inquiry
    ///
    /// Read-only: repeated inquiries return the same text and each appends
    /// exactly one entry to the global log and one to the customer's own
    /// history.
    pub fn inquire_balance(&mut self, id: CustomerId) -> Result<String, LedgerError> {
        let customer = self
            .registry
            .resolve_by_id(id)
            .ok_or_else(|| LedgerError::unknown_customer_id(id))?;

        let rendered = customer
            .accounts()
            .iter()
            .map(Account::to_string)
            .collect::<Vec<_>>()
            .join("\n\n");
        let name = customer.full_name();

        self.audit.record_for_customer(
            &name,
            &format!("{} made a balance inquiry on their accounts.", name),
        );
        Ok(rendered)
    }

    /// Deposit `amount` into the customer's account of the given kind
    ///
    /// # Returns
    ///
    /// The account's new balance.
    pub fn deposit(
        &mut self,
        id: CustomerId,
        kind: AccountKind,
        amount: Decimal,
    ) -> Result<Decimal, LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::non_positive_amount(amount));
        }

        let customer = self
            .registry
            .customer_mut_by_id(id)
            .ok_or_else(|| LedgerError::unknown_customer_id(id))?;
        let name = customer.full_name();
        let account = customer.account_mut(kind);
        let number = account.number();

        account.deposit(amount)?;
        let balance = account.balance();

        self.audit.record_for_customer(
            &name,
            &format!(
                "{} made a deposit on {}-{}. {}'s new balance for {}-{} is {}",
                name, kind, number, name, kind, number, balance
            ),
        );
        Ok(balance)
    }

    /// Withdraw `amount` from the customer's account of the given kind
    ///
    /// # Returns
    ///
    /// The account's new balance.
    pub fn withdraw(
        &mut self,
        id: CustomerId,
        kind: AccountKind,
        amount: Decimal,
    ) -> Result<Decimal, LedgerError> {
        let customer = self
            .registry
            .customer_mut_by_id(id)
            .ok_or_else(|| LedgerError::unknown_customer_id(id))?;
        let name = customer.full_name();
        let account = customer.account_mut(kind);

        validate_amount(account, amount)?;
        account.withdraw(amount)?;
        let balance = account.balance();

        self.audit.record_for_customer(
            &name,
            &format!(
                "Withdrawal of ${} from {} account. New balance: ${}",
                amount, kind, balance
            ),
        );
        Ok(balance)
    }

    /// Move `amount` between two of the same customer's accounts
    ///
    /// Both sides are validated before either is touched, so a rejected
    /// transfer leaves both balances exactly as they were.
    pub fn transfer(
        &mut self,
        id: CustomerId,
        from_kind: AccountKind,
        to_kind: AccountKind,
        amount: Decimal,
    ) -> Result<(), LedgerError> {
        let customer = self
            .registry
            .customer_mut_by_id(id)
            .ok_or_else(|| LedgerError::unknown_customer_id(id))?;
        let name = customer.full_name();

        validate_amount(customer.account(from_kind), amount)?;
        let source = customer.account(from_kind);
        if !source.allowed_to_withdraw(amount) {
            return Err(match from_kind {
                AccountKind::Credit => LedgerError::credit_limit_exceeded(
                    source.balance(),
                    source.credit_limit().unwrap_or_default(),
                    amount,
                ),
                _ => LedgerError::insufficient_funds(from_kind, source.balance(), amount),
            });
        }
        validate_deposit(customer.account(to_kind), amount)?;

        customer.account_mut(from_kind).withdraw(amount)?;
        customer.account_mut(to_kind).deposit(amount)?;

        self.audit.record_for_customer(
            &name,
            &format!(
                "{} transferred ${} from {} to {}",
                name, amount, from_kind, to_kind
            ),
        );
        Ok(())
    }

    /// Pay `amount` from this customer to another customer by full name
    ///
    /// Self-payments are rejected. Both sides are validated before either
    /// balance moves. The entry is logged globally and mirrored into the
    /// payer's history.
    pub fn pay(
        &mut self,
        id: CustomerId,
        from_kind: AccountKind,
        recipient_name: &str,
        to_kind: AccountKind,
        amount: Decimal,
    ) -> Result<(), LedgerError> {
        let payer_name = self.full_name_of(id)?;

        let recipient = self
            .registry
            .resolve_by_name(recipient_name)
            .ok_or_else(|| LedgerError::unknown_customer(recipient_name))?;
        if recipient.full_name() == payer_name {
            return Err(LedgerError::self_payment(&payer_name));
        }
        let recipient_name = recipient.full_name();

        let payer = self
            .registry
            .resolve_by_id(id)
            .ok_or_else(|| LedgerError::unknown_customer_id(id))?;
        validate_amount(payer.account(from_kind), amount)?;
        let source = payer.account(from_kind);
        if !source.allowed_to_withdraw(amount) {
            return Err(LedgerError::insufficient_funds(
                from_kind,
                source.balance(),
                amount,
            ));
        }

        let recipient = self
            .registry
            .resolve_by_name(&recipient_name)
            .ok_or_else(|| LedgerError::unknown_customer(&recipient_name))?;
        validate_deposit(recipient.account(to_kind), amount)?;

        if let Some(payer) = self.registry.customer_mut_by_id(id) {
            payer.account_mut(from_kind).withdraw(amount)?;
        }
        if let Some(recipient) = self.registry.customer_mut_by_name(&recipient_name) {
            recipient.account_mut(to_kind).deposit(amount)?;
        }

        self.audit.record_for_customer(
            &payer_name,
            &format!(
                "{} paid ${} to {} from {} account to {} account.",
                payer_name, amount, recipient_name, from_kind, to_kind
            ),
        );
        Ok(())
    }

    // Batch (by-name) forms. Same semantics, parties resolved from full-name
    // strings, entries logged globally only.

    /// Balance inquiry on one account, addressed by customer name
    pub fn inquire_by_name(
        &mut self,
        name: &str,
        kind: AccountKind,
    ) -> Result<String, LedgerError> {
        let customer = self
            .registry
            .resolve_by_name(name)
            .ok_or_else(|| LedgerError::unknown_customer(name))?;
        let rendered = customer.account(kind).to_string();
        let name = customer.full_name();

        self.audit.record(&format!(
            "Successful transaction! {} made an inquiry on their {} account.",
            name, kind
        ));
        Ok(rendered)
    }

    /// Deposit addressed by customer name
    pub fn deposit_by_name(
        &mut self,
        name: &str,
        kind: AccountKind,
        amount: Decimal,
    ) -> Result<Decimal, LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::non_positive_amount(amount));
        }

        let customer = self
            .registry
            .customer_mut_by_name(name)
            .ok_or_else(|| LedgerError::unknown_customer(name))?;
        let full_name = customer.full_name();
        let account = customer.account_mut(kind);

        account.deposit(amount)?;
        let balance = account.balance();

        self.audit.record(&format!(
            "Successful transaction! ${} has been deposited into {}'s {} account.",
            amount, full_name, kind
        ));
        Ok(balance)
    }

    /// Withdrawal addressed by customer name
    pub fn withdraw_by_name(
        &mut self,
        name: &str,
        kind: AccountKind,
        amount: Decimal,
    ) -> Result<Decimal, LedgerError> {
        let customer = self
            .registry
            .customer_mut_by_name(name)
            .ok_or_else(|| LedgerError::unknown_customer(name))?;
        let full_name = customer.full_name();
        let account = customer.account_mut(kind);

        validate_amount(account, amount)?;
        account.withdraw(amount)?;
        let balance = account.balance();

        self.audit.record(&format!(
            "Successful transaction! ${} has been withdrawn from {}'s {} account.",
            amount, full_name, kind
        ));
        Ok(balance)
    }

    /// Transfer addressed by names on both sides
    ///
    /// Transfers between two accounts of the same kind are rejected
    /// outright. The payee is credited the transferred amount, so the sum
    /// of both balances is conserved.
    pub fn transfer_by_name(
        &mut self,
        from_name: &str,
        from_kind: AccountKind,
        to_name: &str,
        to_kind: AccountKind,
        amount: Decimal,
    ) -> Result<(), LedgerError> {
        if from_kind == to_kind {
            return Err(LedgerError::same_kind_transfer(from_kind));
        }

        let source_owner = self
            .registry
            .resolve_by_name(from_name)
            .ok_or_else(|| LedgerError::unknown_customer(from_name))?;
        let from_name = source_owner.full_name();
        validate_amount(source_owner.account(from_kind), amount)?;
        let source = source_owner.account(from_kind);
        if !source.allowed_to_withdraw(amount) {
            return Err(match from_kind {
                AccountKind::Credit => LedgerError::credit_limit_exceeded(
                    source.balance(),
                    source.credit_limit().unwrap_or_default(),
                    amount,
                ),
                _ => LedgerError::insufficient_funds(from_kind, source.balance(), amount),
            });
        }

        let target_owner = self
            .registry
            .resolve_by_name(to_name)
            .ok_or_else(|| LedgerError::unknown_customer(to_name))?;
        let to_name = target_owner.full_name();
        validate_deposit(target_owner.account(to_kind), amount)?;

        if let Some(source_owner) = self.registry.customer_mut_by_name(&from_name) {
            source_owner.account_mut(from_kind).withdraw(amount)?;
        }
        if let Some(target_owner) = self.registry.customer_mut_by_name(&to_name) {
            target_owner.account_mut(to_kind).deposit(amount)?;
        }

        self.audit.record(&format!(
            "Successful transaction! ${} has been transferred from {}'s {} account to {}'s {} account.",
            amount, from_name, from_kind, to_name, to_kind
        ));
        Ok(())
    }

    /// Payment addressed by names on both sides
    pub fn pay_by_name(
        &mut self,
        payer_name: &str,
        from_kind: AccountKind,
        recipient_name: &str,
        to_kind: AccountKind,
        amount: Decimal,
    ) -> Result<(), LedgerError> {
        let payer = self
            .registry
            .resolve_by_name(payer_name)
            .ok_or_else(|| LedgerError::unknown_customer(payer_name))?;
        let payer_name = payer.full_name();

        let recipient = self
            .registry
            .resolve_by_name(recipient_name)
            .ok_or_else(|| LedgerError::unknown_customer(recipient_name))?;
        if recipient.full_name() == payer_name {
            return Err(LedgerError::self_payment(&payer_name));
        }
        let recipient_name = recipient.full_name();

        let payer = self
            .registry
            .resolve_by_name(&payer_name)
            .ok_or_else(|| LedgerError::unknown_customer(&payer_name))?;
        validate_amount(payer.account(from_kind), amount)?;
        let source = payer.account(from_kind);
        if !source.allowed_to_withdraw(amount) {
            return Err(LedgerError::insufficient_funds(
                from_kind,
                source.balance(),
                amount,
            ));
        }

        let recipient = self
            .registry
            .resolve_by_name(&recipient_name)
            .ok_or_else(|| LedgerError::unknown_customer(&recipient_name))?;
        validate_deposit(recipient.account(to_kind), amount)?;

        if let Some(payer) = self.registry.customer_mut_by_name(&payer_name) {
            payer.account_mut(from_kind).withdraw(amount)?;
        }
        if let Some(recipient) = self.registry.customer_mut_by_name(&recipient_name) {
            recipient.account_mut(to_kind).deposit(amount)?;
        }

        self.audit.record(&format!(
            "Successful transaction! {} paid {} ${}.",
            payer_name, recipient_name, amount
        ));
        Ok(())
    }
}
