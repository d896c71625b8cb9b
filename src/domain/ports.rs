use super::order::{Order, OrderStatus};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Shared handle to an order store. `Arc` rather than `Box` because the
/// scheduled transition tasks each hold a clone.
pub type SharedOrderStore = Arc<dyn OrderStore>;

/// Append-only order history, newest first.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Inserts a freshly placed order at the head of the history.
    async fn insert(&self, order: Order) -> Result<()>;

    async fn get(&self, order_id: u64) -> Result<Option<Order>>;

    /// Advances the order one stage and returns its new status. A missing
    /// order (e.g. cleared by logout) or an already completed one yields
    /// `None`; regression is impossible by construction.
    async fn advance(&self, order_id: u64) -> Result<Option<OrderStatus>>;

    /// Newest-first listing; `limit` truncates for summary views.
    async fn list(&self, limit: Option<usize>) -> Result<Vec<Order>>;

    async fn count_by_status(&self, status: OrderStatus) -> Result<usize>;

    /// Wipes the history at a session boundary.
    async fn clear(&self) -> Result<()>;
}
