use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::domain::customer::Customer;
use crate::domain::payload::{Amount, ServiceRequest, ServiceType, TransactionPayload};
use crate::domain::ports::{EncodeOptions, QrCodecRef, QrImage};
use crate::error::FormError;

/// Raw form fields as entered, before any validation.
#[derive(Debug, Clone, Default)]
pub struct FormInput {
    pub amount: Option<String>,
    pub details: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CustomerScreen {
    SelectingService,
    EnteringForm {
        service: ServiceType,
    },
    DisplayingCode {
        payload: TransactionPayload,
        code: QrImage,
    },
}

/// Customer-side state machine: service selection, form entry, then the
/// encoded code on display. Owns its half of the codec port; the camera
/// never appears on this side of the handoff.
pub struct CustomerFlow {
    customer: Customer,
    codec: QrCodecRef,
    encode_options: EncodeOptions,
    screen: CustomerScreen,
}

impl CustomerFlow {
    pub fn new(customer: Customer, codec: QrCodecRef) -> Self {
        Self {
            customer,
            codec,
            encode_options: EncodeOptions::default(),
            screen: CustomerScreen::SelectingService,
        }
    }

    pub fn with_encode_options(mut self, opts: EncodeOptions) -> Self {
        self.encode_options = opts;
        self
    }

    pub fn customer(&self) -> &Customer {
        &self.customer
    }

    pub fn screen(&self) -> &CustomerScreen {
        &self.screen
    }

    /// Payload and code currently on display, if any.
    pub fn displayed(&self) -> Option<(&TransactionPayload, &QrImage)> {
        match &self.screen {
            CustomerScreen::DisplayingCode { payload, code } => Some((payload, code)),
            _ => None,
        }
    }

    /// Records the chosen service. The selection screen only offers
    /// [`ServiceType::ALL`], so there is no invalid input to reject.
    pub fn select_service(&mut self, service: ServiceType) {
        match self.screen {
            CustomerScreen::SelectingService => {
                info!(%service, "service selected");
                self.screen = CustomerScreen::EnteringForm { service };
            }
            _ => debug!("select_service ignored outside service selection"),
        }
    }

    pub fn back(&mut self) {
        if matches!(self.screen, CustomerScreen::EnteringForm { .. }) {
            self.screen = CustomerScreen::SelectingService;
        }
    }

    pub fn restart(&mut self) {
        if matches!(self.screen, CustomerScreen::DisplayingCode { .. }) {
            self.screen = CustomerScreen::SelectingService;
        }
    }

    /// Validates the form, builds the payload (stamping the timestamp and
    /// copying the customer identity), and encodes it for display.
    pub fn submit_form(&mut self, input: FormInput) -> Result<(), FormError> {
        let service = match &self.screen {
            CustomerScreen::EnteringForm { service } => *service,
            _ => {
                debug!("submit_form ignored outside form entry");
                return Ok(());
            }
        };

        let request = build_request(service, input)?;
        let payload = TransactionPayload::build(&self.customer, request);
        let text = payload
            .to_canonical_text()
            .map_err(|e| FormError::Encode(e.to_string()))?;
        let code = self
            .codec
            .encode(&text, &self.encode_options)
            .map_err(|e| FormError::Encode(e.to_string()))?;

        info!(service = %payload.service_type, "transaction request encoded for display");
        self.screen = CustomerScreen::DisplayingCode { payload, code };
        Ok(())
    }
}

fn build_request(service: ServiceType, input: FormInput) -> Result<ServiceRequest, FormError> {
    if service.needs_amount() {
        let raw = input.amount.unwrap_or_default();
        let value: Decimal = raw
            .trim()
            .parse()
            .map_err(|_| FormError::InvalidAmount(raw.clone()))?;
        let amount = Amount::new(value)?;
        return Ok(match service {
            ServiceType::CashWithdrawal => ServiceRequest::CashWithdrawal { amount },
            _ => ServiceRequest::CashDeposit { amount },
        });
    }

    let details = input.details.unwrap_or_default();
    if details.trim().is_empty() {
        return Err(FormError::MissingDetails);
    }
    Ok(ServiceRequest::UpdateContactDetails { details })
}
