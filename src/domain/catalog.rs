use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// A purchasable service in the catalog.
///
/// Immutable reference data: orders take a snapshot of the fields they need
/// at creation time, so later catalog changes never touch placed orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceOffering {
    pub id: u32,
    pub platform: String,
    pub service_type: String,
    pub description: String,
    /// Price per unit, always positive.
    pub unit_rate: Decimal,
    pub min_quantity: u32,
    pub max_quantity: u32,
}

/// The read-only service catalog, loaded once at startup.
///
/// Offerings keep insertion order; there are no mutation operations.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    offerings: Vec<ServiceOffering>,
}

impl Catalog {
    pub fn new(offerings: Vec<ServiceOffering>) -> Self {
        debug_assert!(offerings.iter().all(|o| {
            o.unit_rate > Decimal::ZERO && o.min_quantity > 0 && o.min_quantity <= o.max_quantity
        }));
        Self { offerings }
    }

    /// The standard demo catalog.
    pub fn seeded() -> Self {
        Self::new(vec![
            offering(1, "Instagram", "Followers", "High-quality profile followers", dec!(0.50), 100, 10000),
            offering(2, "Instagram", "Likes", "Post likes, gradual delivery", dec!(0.20), 50, 5000),
            offering(3, "YouTube", "Views", "Worldwide video views", dec!(1.20), 500, 50000),
            offering(4, "TikTok", "Followers", "Profile followers, instant start", dec!(0.80), 100, 20000),
            offering(5, "X", "Reposts", "Reposts from active accounts", dec!(0.35), 50, 2000),
            offering(6, "Facebook", "Page Likes", "Page likes with slow drip", dec!(0.60), 100, 10000),
        ])
    }

    /// All offerings in stable insertion order.
    pub fn offerings(&self) -> &[ServiceOffering] {
        &self.offerings
    }

    pub fn find(&self, id: u32) -> Option<&ServiceOffering> {
        self.offerings.iter().find(|o| o.id == id)
    }
}

fn offering(
    id: u32,
    platform: &str,
    service_type: &str,
    description: &str,
    unit_rate: Decimal,
    min_quantity: u32,
    max_quantity: u32,
) -> ServiceOffering {
    ServiceOffering {
        id,
        platform: platform.to_string(),
        service_type: service_type.to_string(),
        description: description.to_string(),
        unit_rate,
        min_quantity,
        max_quantity,
    }
}
