use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// The fixed identity shown on the customer-facing screens.
///
/// Read-only by contract: no flow mutates it, and a confirmed withdrawal or
/// deposit does not touch the displayed balance.
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub name: String,
    pub account_number: String,
    pub balance: Decimal,
}

impl Customer {
    /// The demo's single walk-in customer.
    pub fn mock() -> Self {
        Self {
            name: "Jane Doe".to_string(),
            account_number: "1234567890".to_string(),
            balance: dec!(5432.10),
        }
    }
}
