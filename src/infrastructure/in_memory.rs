use crate::domain::order::{Order, OrderStatus};
use crate::domain::ports::OrderStore;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory order history.
///
/// Uses `Arc<RwLock<Vec<Order>>>` with newest orders at the front, matching
/// the display order of the read model. The vec stays small for a single
/// simulated session, so linear id lookups are fine.
#[derive(Default, Clone)]
pub struct InMemoryOrderStore {
    orders: Arc<RwLock<Vec<Order>>>,
}

impl InMemoryOrderStore {
    /// Creates a new, empty in-memory order store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn insert(&self, order: Order) -> Result<()> {
        let mut orders = self.orders.write().await;
        orders.insert(0, order);
        Ok(())
    }

    async fn get(&self, order_id: u64) -> Result<Option<Order>> {
        let orders = self.orders.read().await;
        Ok(orders.iter().find(|o| o.id == order_id).cloned())
    }

    async fn advance(&self, order_id: u64) -> Result<Option<OrderStatus>> {
        let mut orders = self.orders.write().await;
        Ok(orders
            .iter_mut()
            .find(|o| o.id == order_id)
            .and_then(Order::advance))
    }

    async fn list(&self, limit: Option<usize>) -> Result<Vec<Order>> {
        let orders = self.orders.read().await;
        let n = limit.unwrap_or(orders.len());
        Ok(orders.iter().take(n).cloned().collect())
    }

    async fn count_by_status(&self, status: OrderStatus) -> Result<usize> {
        let orders = self.orders.read().await;
        Ok(orders.iter().filter(|o| o.status == status).count())
    }

    async fn clear(&self) -> Result<()> {
        let mut orders = self.orders.write().await;
        orders.clear();
        Ok(())
    }
}
