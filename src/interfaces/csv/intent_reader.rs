use crate::domain::payment::PaymentMethod;
use crate::error::{Result, VaultError};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

/// The named user action carried by a script row.
#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum IntentKind {
    Login,
    Signup,
    ResetPassword,
    Logout,
    UpdateProfile,
    AddFunds,
    SelectPayment,
    PlaceOrder,
}

/// One raw intent as entered by the user. Every payload field is optional at
/// this layer; the engine owns all validation and never trusts the reader to
/// have pre-validated.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct IntentRecord {
    pub intent: IntentKind,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub agreed: Option<bool>,
    #[serde(default)]
    pub offering: Option<u32>,
    #[serde(default)]
    pub quantity: Option<u32>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub method: Option<PaymentMethod>,
}

/// Reads intents from a CSV source.
///
/// Wraps `csv::Reader` and provides an iterator over `Result<IntentRecord>`.
/// Whitespace trimming and short rows are handled automatically.
pub struct IntentReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> IntentReader<R> {
    /// Creates a new `IntentReader` from any `Read` source (e.g. File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes intents.
    pub fn intents(self) -> impl Iterator<Item = Result<IntentRecord>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(VaultError::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const HEADER: &str =
        "intent, name, email, password, agreed, offering, quantity, link, amount, method";

    #[test]
    fn test_reader_valid_stream() {
        let data = format!(
            "{HEADER}\n\
             login, , a@b.com, secret, , , , , ,\n\
             place_order, , , , , 1, 100, https://example.com/p, ,"
        );
        let reader = IntentReader::new(data.as_bytes());
        let results: Vec<Result<IntentRecord>> = reader.intents().collect();

        assert_eq!(results.len(), 2);
        let login = results[0].as_ref().unwrap();
        assert_eq!(login.intent, IntentKind::Login);
        assert_eq!(login.email.as_deref(), Some("a@b.com"));
        assert!(login.name.is_none());

        let order = results[1].as_ref().unwrap();
        assert_eq!(order.intent, IntentKind::PlaceOrder);
        assert_eq!(order.offering, Some(1));
        assert_eq!(order.quantity, Some(100));
    }

    #[test]
    fn test_reader_parses_amount_and_method() {
        let data = format!(
            "{HEADER}\n\
             add_funds, , , , , , , , 25.00,\n\
             select_payment, , , , , , , , , qr_scan"
        );
        let reader = IntentReader::new(data.as_bytes());
        let results: Vec<IntentRecord> = reader.intents().map(|r| r.unwrap()).collect();

        assert_eq!(results[0].amount, Some(dec!(25.00)));
        assert_eq!(results[1].method, Some(PaymentMethod::QrScan));
    }

    #[test]
    fn test_reader_malformed_line() {
        let data = format!("{HEADER}\nnot_an_intent, , , , , , , , ,");
        let reader = IntentReader::new(data.as_bytes());
        let results: Vec<Result<IntentRecord>> = reader.intents().collect();

        assert!(results[0].is_err());
    }
}
