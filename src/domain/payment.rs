use serde::{Deserialize, Serialize};

/// How the user intends to add funds. Selection is session-scoped and
/// cleared on logout; the QR scan itself is a presentation-layer concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    QrScan,
    BankTransfer,
    Crypto,
}
