use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::time::Duration;

/// Tunables for the vault simulation.
///
/// The login/signup starting balances are asymmetric on purpose: the source
/// product grants a demo balance on login but nothing on signup. Kept as
/// configuration rather than literals so the behavior can be revisited.
#[derive(Debug, Clone)]
pub struct VaultConfig {
    pub login_starting_balance: Decimal,
    pub signup_starting_balance: Decimal,
    /// Delay before a pending order moves to processing.
    pub processing_delay: Duration,
    /// Delay before an order completes. Must exceed `processing_delay`.
    pub completion_delay: Duration,
    /// Simulated duration of a QR payment scan.
    pub qr_scan_delay: Duration,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            login_starting_balance: dec!(100.00),
            signup_starting_balance: dec!(0.00),
            processing_delay: Duration::from_secs(2),
            completion_delay: Duration::from_secs(5),
            qr_scan_delay: Duration::from_millis(1500),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_delays_are_ordered() {
        let config = VaultConfig::default();
        assert!(config.completion_delay > config.processing_delay);
    }

    #[test]
    fn test_default_starting_balances() {
        let config = VaultConfig::default();
        assert_eq!(config.login_starting_balance, dec!(100.00));
        assert_eq!(config.signup_starting_balance, dec!(0.00));
    }
}
