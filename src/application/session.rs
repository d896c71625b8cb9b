use crate::domain::identity::Identity;
use crate::domain::money::Balance;
use crate::domain::payment::PaymentMethod;
use crate::domain::wallet::Wallet;
use crate::error::{Result, VaultError};

/// The explicit session context: identity, wallet, and payment-method
/// selection, all scoped between login/signup and logout. Replaces the
/// ambient globals of the original with one owned object.
#[derive(Debug, Default)]
pub struct Session {
    pub identity: Option<Identity>,
    pub wallet: Wallet,
    pub payment_method: Option<PaymentMethod>,
}

impl Session {
    /// Begins a fresh session for `identity`, discarding anything left over
    /// from a previous one.
    pub fn start(&mut self, identity: Identity, starting_balance: Balance) {
        self.identity = Some(identity);
        self.wallet.reset(starting_balance);
        self.payment_method = None;
    }

    /// Ends the session: no identity, zero balance, no payment selection.
    pub fn end(&mut self) {
        self.identity = None;
        self.wallet.reset(Balance::ZERO);
        self.payment_method = None;
    }

    pub fn is_active(&self) -> bool {
        self.identity.is_some()
    }

    pub fn identity(&self) -> Result<&Identity> {
        self.identity.as_ref().ok_or(VaultError::NoActiveSession)
    }

    pub fn identity_mut(&mut self) -> Result<&mut Identity> {
        self.identity.as_mut().ok_or(VaultError::NoActiveSession)
    }
}
