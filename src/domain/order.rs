use crate::domain::catalog::ServiceOffering;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lifecycle state of an order. Strictly monotonic: an order only ever moves
/// forward through Pending, Processing, Completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Completed,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 3] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Completed,
    ];

    /// The next stage, or `None` once completed.
    pub fn next(self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Processing),
            OrderStatus::Processing => Some(OrderStatus::Completed),
            OrderStatus::Completed => None,
        }
    }
}

/// A placed purchase request.
///
/// Carries a snapshot of the offering fields frozen at creation time, so
/// catalog changes never retroactively alter placed orders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    pub id: u64,
    pub offering_id: u32,
    pub platform: String,
    pub service_type: String,
    pub unit_rate: Decimal,
    pub quantity: u32,
    pub target_link: String,
    pub total_cost: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Creates a pending order against an offering. Quantity and link are
    /// assumed validated by the caller; cost is computed here.
    pub fn place(id: u64, offering: &ServiceOffering, quantity: u32, target_link: &str) -> Self {
        let total_cost = offering.unit_rate * Decimal::from(quantity);
        Self {
            id,
            offering_id: offering.id,
            platform: offering.platform.clone(),
            service_type: offering.service_type.clone(),
            unit_rate: offering.unit_rate,
            quantity,
            target_link: target_link.to_string(),
            total_cost,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        }
    }

    /// Moves the order to its next stage. Completed orders stay completed.
    /// Returns the new status when a transition happened.
    pub fn advance(&mut self) -> Option<OrderStatus> {
        let next = self.status.next()?;
        self.status = next;
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::Catalog;
    use rust_decimal_macros::dec;

    #[test]
    fn test_place_freezes_offering_snapshot() {
        let catalog = Catalog::seeded();
        let offering = catalog.find(1).unwrap();
        let order = Order::place(7, offering, 100, "https://example.com/p");

        assert_eq!(order.id, 7);
        assert_eq!(order.offering_id, 1);
        assert_eq!(order.unit_rate, dec!(0.50));
        assert_eq!(order.total_cost, dec!(50.00));
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[test]
    fn test_advance_is_monotonic() {
        let catalog = Catalog::seeded();
        let mut order = Order::place(1, catalog.find(1).unwrap(), 100, "link");

        assert_eq!(order.advance(), Some(OrderStatus::Processing));
        assert_eq!(order.advance(), Some(OrderStatus::Completed));
        // No further transitions, no regression.
        assert_eq!(order.advance(), None);
        assert_eq!(order.status, OrderStatus::Completed);
    }

    #[test]
    fn test_status_next_chain() {
        assert_eq!(OrderStatus::Pending.next(), Some(OrderStatus::Processing));
        assert_eq!(OrderStatus::Processing.next(), Some(OrderStatus::Completed));
        assert_eq!(OrderStatus::Completed.next(), None);
    }
}
