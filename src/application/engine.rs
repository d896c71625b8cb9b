use crate::application::session::Session;
use crate::config::VaultConfig;
use crate::domain::catalog::{Catalog, ServiceOffering};
use crate::domain::identity::Identity;
use crate::domain::money::{Amount, Balance};
use crate::domain::order::{Order, OrderStatus};
use crate::domain::payment::PaymentMethod;
use crate::domain::ports::SharedOrderStore;
use crate::error::{Result, VaultError};
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::{RwLock, broadcast};
use tracing::{info, warn};

/// Discrete change notification for the presentation layer. Each event names
/// the part of the read model that needs re-rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VaultEvent {
    IdentityChanged,
    BalanceChanged,
    OrderListChanged,
    OrderStatusChanged { id: u64, status: OrderStatus },
}

/// Read-only snapshot of the whole core state.
#[derive(Debug, Clone, Serialize)]
pub struct VaultSnapshot {
    pub identity: Option<Identity>,
    pub balance: Balance,
    pub orders: Vec<Order>,
    pub offerings: Vec<ServiceOffering>,
}

/// The main entry point for the vault simulation.
///
/// `VaultEngine` accepts raw intents from the presentation layer, owns all
/// validation of their payloads, mutates the session context and order
/// history, and schedules the delayed order status transitions. Callers only
/// ever read snapshots back.
pub struct VaultEngine {
    catalog: Catalog,
    config: VaultConfig,
    order_store: SharedOrderStore,
    session: RwLock<Session>,
    events: broadcast::Sender<VaultEvent>,
    next_order_id: AtomicU64,
    next_identity_id: AtomicU64,
}

impl VaultEngine {
    pub fn new(order_store: SharedOrderStore, catalog: Catalog, config: VaultConfig) -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            catalog,
            config,
            order_store,
            session: RwLock::new(Session::default()),
            events,
            next_order_id: AtomicU64::new(1),
            next_identity_id: AtomicU64::new(1),
        }
    }

    pub fn config(&self) -> &VaultConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Subscribes to change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<VaultEvent> {
        self.events.subscribe()
    }

    // --- session intents ---

    /// Fake login: any non-empty email/password pair succeeds. Starts a
    /// fresh session with the configured login balance and an empty history.
    pub async fn login(&self, email: &str, password: &str) -> Result<Identity> {
        let email = email.trim();
        if email.is_empty() || password.trim().is_empty() {
            return Err(VaultError::InvalidCredentials);
        }
        let display_name = email.split('@').next().unwrap_or(email).to_string();
        let identity = self.new_identity(display_name, email);
        self.start_session(identity.clone(), self.config.login_starting_balance)
            .await?;
        info!(identity_id = identity.id, email, "logged in");
        Ok(identity)
    }

    /// Fake signup: all fields required and terms must be agreed. Same reset
    /// behavior as login but with the (zero) signup starting balance.
    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
        agreed_to_terms: bool,
    ) -> Result<Identity> {
        let email = email.trim();
        if name.trim().is_empty() || email.is_empty() || password.trim().is_empty() || !agreed_to_terms
        {
            return Err(VaultError::IncompleteSignup);
        }
        let identity = self.new_identity(name.trim().to_string(), email);
        self.start_session(identity.clone(), self.config.signup_starting_balance)
            .await?;
        info!(identity_id = identity.id, email, "signed up");
        Ok(identity)
    }

    /// Acknowledges a password-reset request. Nothing is stored or sent.
    pub async fn reset_password_request(&self, email: &str) -> Result<()> {
        if email.trim().is_empty() {
            return Err(VaultError::InvalidCredentials);
        }
        info!(email, "password reset requested");
        Ok(())
    }

    /// Ends the session: identity gone, wallet zeroed, history and payment
    /// selection cleared. Transitions already scheduled for cleared orders
    /// stay alive but find nothing to advance.
    pub async fn logout(&self) -> Result<()> {
        {
            let mut session = self.session.write().await;
            session.end();
        }
        self.order_store.clear().await?;
        info!("logged out");
        self.emit(VaultEvent::IdentityChanged);
        self.emit(VaultEvent::BalanceChanged);
        self.emit(VaultEvent::OrderListChanged);
        Ok(())
    }

    /// Updates the current identity in place. No uniqueness checks.
    pub async fn update_profile(&self, name: &str, email: &str) -> Result<Identity> {
        let updated = {
            let mut session = self.session.write().await;
            let identity = session.identity_mut()?;
            identity.update_profile(name, email)?;
            identity.clone()
        };
        self.emit(VaultEvent::IdentityChanged);
        Ok(updated)
    }

    pub async fn select_payment_method(&self, method: PaymentMethod) -> Result<PaymentMethod> {
        let mut session = self.session.write().await;
        session.identity()?;
        session.payment_method = Some(method);
        Ok(method)
    }

    pub async fn selected_payment_method(&self) -> Option<PaymentMethod> {
        self.session.read().await.payment_method
    }

    // --- wallet intents ---

    /// Credits the wallet and returns the new balance.
    pub async fn add_funds(&self, amount: Decimal) -> Result<Balance> {
        let new_balance = {
            let mut session = self.session.write().await;
            session.identity()?;
            let amount = Amount::new(amount)?;
            session.wallet.credit(amount)
        };
        info!(%new_balance, "funds added");
        self.emit(VaultEvent::BalanceChanged);
        Ok(new_balance)
    }

    pub async fn balance(&self) -> Balance {
        self.session.read().await.wallet.balance()
    }

    // --- order intents ---

    /// Places an order against the catalog. Validation short-circuits in a
    /// fixed order: offering, quantity bounds, target link, funds. Only the
    /// final step touches the wallet, so a rejected order never mutates it.
    pub async fn place_order(
        &self,
        offering_id: u32,
        quantity: u32,
        target_link: &str,
    ) -> Result<Order> {
        let order = {
            let mut session = self.session.write().await;
            session.identity()?;

            let offering = self
                .catalog
                .find(offering_id)
                .ok_or(VaultError::UnknownOffering(offering_id))?;
            if quantity < offering.min_quantity || quantity > offering.max_quantity {
                return Err(VaultError::QuantityOutOfRange {
                    quantity,
                    min: offering.min_quantity,
                    max: offering.max_quantity,
                });
            }
            let target_link = target_link.trim();
            if target_link.is_empty() {
                return Err(VaultError::InvalidLink);
            }

            let id = self.next_order_id.fetch_add(1, Ordering::Relaxed);
            let order = Order::place(id, offering, quantity, target_link);
            let cost = Amount::new(order.total_cost)?;
            session.wallet.debit(cost)?;
            self.order_store.insert(order.clone()).await?;
            order
        };

        info!(
            order_id = order.id,
            offering_id,
            quantity,
            total_cost = %order.total_cost,
            "order placed"
        );
        self.emit(VaultEvent::BalanceChanged);
        self.emit(VaultEvent::OrderListChanged);

        // Fire-and-forget per the source behavior: no cancellation once
        // scheduled. Ordering holds because the completion delay is strictly
        // longer and advance() itself can never skip or regress.
        self.schedule_transition(order.id, self.config.processing_delay);
        self.schedule_transition(order.id, self.config.completion_delay);

        Ok(order)
    }

    pub async fn list_orders(&self, limit: Option<usize>) -> Result<Vec<Order>> {
        self.order_store.list(limit).await
    }

    pub async fn count_by_status(&self, status: OrderStatus) -> Result<usize> {
        self.order_store.count_by_status(status).await
    }

    pub async fn current_identity(&self) -> Option<Identity> {
        self.session.read().await.identity.clone()
    }

    /// One coherent read model for the presentation layer.
    pub async fn snapshot(&self) -> Result<VaultSnapshot> {
        let (identity, balance) = {
            let session = self.session.read().await;
            (session.identity.clone(), session.wallet.balance())
        };
        Ok(VaultSnapshot {
            identity,
            balance,
            orders: self.order_store.list(None).await?,
            offerings: self.catalog.offerings().to_vec(),
        })
    }

    // --- internals ---

    fn new_identity(&self, display_name: String, email: &str) -> Identity {
        let id = self.next_identity_id.fetch_add(1, Ordering::Relaxed);
        Identity::new(id, display_name, email)
    }

    async fn start_session(&self, identity: Identity, starting_balance: Decimal) -> Result<()> {
        {
            let mut session = self.session.write().await;
            session.start(identity, Balance::new(starting_balance));
        }
        self.order_store.clear().await?;
        self.emit(VaultEvent::IdentityChanged);
        self.emit(VaultEvent::BalanceChanged);
        self.emit(VaultEvent::OrderListChanged);
        Ok(())
    }

    fn schedule_transition(&self, order_id: u64, delay: Duration) {
        let store = Arc::clone(&self.order_store);
        let events = self.events.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            match store.advance(order_id).await {
                Ok(Some(status)) => {
                    info!(order_id, ?status, "order status advanced");
                    let _ = events.send(VaultEvent::OrderStatusChanged {
                        id: order_id,
                        status,
                    });
                }
                // Order already completed or cleared by logout.
                Ok(None) => {}
                Err(error) => warn!(order_id, %error, "order transition failed"),
            }
        });
    }

    fn emit(&self, event: VaultEvent) {
        // Dropped silently when nobody is subscribed.
        let _ = self.events.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::in_memory::InMemoryOrderStore;
    use rust_decimal_macros::dec;

    fn engine() -> VaultEngine {
        VaultEngine::new(
            Arc::new(InMemoryOrderStore::new()),
            Catalog::seeded(),
            VaultConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_login_grants_configured_balance() {
        let engine = engine();
        let identity = engine.login("a@b.com", "secret").await.unwrap();
        assert_eq!(identity.display_name, "a");
        assert_eq!(engine.balance().await, Balance::new(dec!(100.00)));
    }

    #[tokio::test]
    async fn test_signup_starts_at_zero() {
        let engine = engine();
        engine
            .signup("Alice", "alice@b.com", "secret", true)
            .await
            .unwrap();
        assert_eq!(engine.balance().await, Balance::ZERO);
    }

    #[tokio::test]
    async fn test_intents_require_session() {
        let engine = engine();
        assert!(matches!(
            engine.add_funds(dec!(10.0)).await,
            Err(VaultError::NoActiveSession)
        ));
        assert!(matches!(
            engine.place_order(1, 100, "link").await,
            Err(VaultError::NoActiveSession)
        ));
        assert!(matches!(
            engine.update_profile("a", "a@b.com").await,
            Err(VaultError::NoActiveSession)
        ));
        assert!(matches!(
            engine.select_payment_method(PaymentMethod::QrScan).await,
            Err(VaultError::NoActiveSession)
        ));
    }

    #[tokio::test]
    async fn test_place_order_validation_order() {
        let engine = engine();
        engine.login("a@b.com", "x").await.unwrap();

        // Unknown offering wins even with an absurd quantity.
        assert!(matches!(
            engine.place_order(999, 0, "").await,
            Err(VaultError::UnknownOffering(999))
        ));
        // Quantity bounds are checked before the link.
        assert!(matches!(
            engine.place_order(1, 99, "").await,
            Err(VaultError::QuantityOutOfRange {
                quantity: 99,
                min: 100,
                max: 10000
            })
        ));
        // Link before funds: this order would also be unaffordable.
        assert!(matches!(
            engine.place_order(1, 10000, "   ").await,
            Err(VaultError::InvalidLink)
        ));
        // Nothing above touched the wallet or the history.
        assert_eq!(engine.balance().await, Balance::new(dec!(100.00)));
        assert!(engine.list_orders(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reset_password_request() {
        let engine = engine();
        assert!(matches!(
            engine.reset_password_request("").await,
            Err(VaultError::InvalidCredentials)
        ));
        engine.reset_password_request("a@b.com").await.unwrap();
    }

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let engine = engine();
        engine.logout().await.unwrap();
        engine.login("a@b.com", "x").await.unwrap();
        engine.logout().await.unwrap();
        engine.logout().await.unwrap();
        assert!(engine.current_identity().await.is_none());
    }
}
