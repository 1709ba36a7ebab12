use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::customer::Customer;
use crate::error::{FormError, PayloadError};

/// The services a customer can request at the counter.
///
/// The serde renames are the canonical wire strings; both sides of the
/// handoff must agree on them exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceType {
    #[serde(rename = "Cash Deposit")]
    CashDeposit,
    #[serde(rename = "Cash Withdrawal")]
    CashWithdrawal,
    #[serde(rename = "Update Contact Details")]
    UpdateContactDetails,
}

impl ServiceType {
    /// Selection list offered by the customer flow, in display order.
    pub const ALL: [ServiceType; 3] = [
        ServiceType::CashDeposit,
        ServiceType::CashWithdrawal,
        ServiceType::UpdateContactDetails,
    ];

    pub fn needs_amount(self) -> bool {
        matches!(self, ServiceType::CashDeposit | ServiceType::CashWithdrawal)
    }

    pub fn needs_details(self) -> bool {
        matches!(self, ServiceType::UpdateContactDetails)
    }

    pub fn label(self) -> &'static str {
        match self {
            ServiceType::CashDeposit => "Cash Deposit",
            ServiceType::CashWithdrawal => "Cash Withdrawal",
            ServiceType::UpdateContactDetails => "Update Contact Details",
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A strictly positive monetary amount.
///
/// The form layer's only path to a payload amount, so a non-positive value
/// can never reach the wire.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, FormError> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(FormError::AmountNotPositive)
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = FormError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A validated service request: the amount/details split is fixed by the
/// variant, so a payload with both (or neither) is unrepresentable.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceRequest {
    CashDeposit { amount: Amount },
    CashWithdrawal { amount: Amount },
    UpdateContactDetails { details: String },
}

impl ServiceRequest {
    pub fn service_type(&self) -> ServiceType {
        match self {
            ServiceRequest::CashDeposit { .. } => ServiceType::CashDeposit,
            ServiceRequest::CashWithdrawal { .. } => ServiceType::CashWithdrawal,
            ServiceRequest::UpdateContactDetails { .. } => ServiceType::UpdateContactDetails,
        }
    }
}

/// The one value that crosses the optical wire.
///
/// A plain value: no identity, no mutation after construction, no linkage
/// between requests. Field declaration order is the canonical text order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPayload {
    pub account_number: String,
    pub customer_name: String,
    pub service_type: ServiceType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Stamped once at creation. Lenient on decode: the teller only gates
    /// on name, account and service type.
    #[serde(default)]
    pub timestamp: String,
}

impl TransactionPayload {
    /// Builds the payload for a submitted request, copying the fixed
    /// customer identity and stamping the creation time.
    pub fn build(customer: &Customer, request: ServiceRequest) -> Self {
        let (service_type, amount, details) = match request {
            ServiceRequest::CashDeposit { amount } => {
                (ServiceType::CashDeposit, Some(amount.value()), None)
            }
            ServiceRequest::CashWithdrawal { amount } => {
                (ServiceType::CashWithdrawal, Some(amount.value()), None)
            }
            ServiceRequest::UpdateContactDetails { details } => {
                (ServiceType::UpdateContactDetails, None, Some(details))
            }
        };
        Self {
            account_number: customer.account_number.clone(),
            customer_name: customer.name.clone(),
            service_type,
            amount,
            details,
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    /// Serializes to the canonical text form handed to the QR encoder.
    /// No compression, no encryption: anyone who captures the image can
    /// read the payload.
    pub fn to_canonical_text(&self) -> Result<String, PayloadError> {
        serde_json::to_string(self).map_err(|e| PayloadError::Serialize(e.to_string()))
    }

    /// Parses and validates decoded text. Valid only if `accountNumber`,
    /// `customerName` and `serviceType` are all present and non-empty;
    /// anything else is rejected whole, with no partial recovery.
    pub fn parse_canonical(text: &str) -> Result<Self, PayloadError> {
        let payload: Self =
            serde_json::from_str(text).map_err(|e| PayloadError::Malformed(e.to_string()))?;
        if payload.account_number.trim().is_empty() {
            return Err(PayloadError::EmptyField("accountNumber"));
        }
        if payload.customer_name.trim().is_empty() {
            return Err(PayloadError::EmptyField("customerName"));
        }
        Ok(payload)
    }
}
