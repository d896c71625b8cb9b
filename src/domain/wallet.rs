use crate::domain::money::{Amount, Balance};
use crate::error::{Result, VaultError};

/// The session wallet.
///
/// Invariant: the balance never goes below zero. Mutation happens only
/// through `credit`/`debit`, plus `reset` at session boundaries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Wallet {
    balance: Balance,
}

impl Wallet {
    pub fn new(starting_balance: Balance) -> Self {
        Self {
            balance: starting_balance,
        }
    }

    pub fn balance(&self) -> Balance {
        self.balance
    }

    /// Adds funds and returns the new balance.
    pub fn credit(&mut self, amount: Amount) -> Balance {
        self.balance += amount.into();
        self.balance
    }

    /// Removes funds if sufficient; the balance is untouched on failure.
    pub fn debit(&mut self, amount: Amount) -> Result<Balance> {
        let amount: Balance = amount.into();
        if self.balance >= amount {
            self.balance -= amount;
            Ok(self.balance)
        } else {
            Err(VaultError::InsufficientFunds)
        }
    }

    /// Session-start reset. The only mutation outside credit/debit.
    pub fn reset(&mut self, starting_balance: Balance) {
        self.balance = starting_balance;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn amount(value: rust_decimal::Decimal) -> Amount {
        Amount::new(value).unwrap()
    }

    #[test]
    fn test_credit_accumulates() {
        let mut wallet = Wallet::default();
        assert_eq!(wallet.credit(amount(dec!(10.0))), Balance::new(dec!(10.0)));
        assert_eq!(wallet.credit(amount(dec!(2.5))), Balance::new(dec!(12.5)));
    }

    #[test]
    fn test_debit_success() {
        let mut wallet = Wallet::new(Balance::new(dec!(10.0)));
        let new_balance = wallet.debit(amount(dec!(4.0))).unwrap();
        assert_eq!(new_balance, Balance::new(dec!(6.0)));
    }

    #[test]
    fn test_debit_insufficient_leaves_balance_unchanged() {
        let mut wallet = Wallet::new(Balance::new(dec!(10.0)));
        let result = wallet.debit(amount(dec!(10.01)));
        assert!(matches!(result, Err(VaultError::InsufficientFunds)));
        assert_eq!(wallet.balance(), Balance::new(dec!(10.0)));
    }

    #[test]
    fn test_debit_exact_balance_reaches_zero() {
        let mut wallet = Wallet::new(Balance::new(dec!(10.0)));
        assert_eq!(wallet.debit(amount(dec!(10.0))).unwrap(), Balance::ZERO);
    }

    #[test]
    fn test_balance_never_negative_across_sequences() {
        let mut wallet = Wallet::default();
        let ops: [(bool, rust_decimal::Decimal); 6] = [
            (true, dec!(5.0)),
            (false, dec!(3.0)),
            (false, dec!(3.0)), // rejected
            (true, dec!(1.0)),
            (false, dec!(2.9)),
            (false, dec!(0.2)), // rejected
        ];
        for (is_credit, value) in ops {
            if is_credit {
                wallet.credit(amount(value));
            } else {
                let _ = wallet.debit(amount(value));
            }
            assert!(wallet.balance() >= Balance::ZERO);
        }
        assert_eq!(wallet.balance(), Balance::new(dec!(0.1)));
    }

    #[test]
    fn test_reset() {
        let mut wallet = Wallet::new(Balance::new(dec!(42.0)));
        wallet.reset(Balance::ZERO);
        assert_eq!(wallet.balance(), Balance::ZERO);
    }
}
