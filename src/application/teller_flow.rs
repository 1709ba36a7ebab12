use tracing::{debug, info, warn};

use crate::domain::payload::TransactionPayload;

/// Message shown when scanned text fails payload validation.
pub const PARSE_ERROR_MESSAGE: &str =
    "Failed to parse QR code. Please ensure it's a valid QuickBank code.";

#[derive(Debug, Clone, PartialEq)]
pub enum TellerScreen {
    Idle { error: Option<String> },
    Scanning,
    Reviewing { payload: TransactionPayload },
    Complete,
}

/// Teller-side state machine. Confirming is a pure state transition: no
/// ledger exists, and `next` retains no record of the completed request.
#[derive(Debug, Clone, PartialEq)]
pub struct TellerFlow {
    screen: TellerScreen,
}

impl Default for TellerFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl TellerFlow {
    pub fn new() -> Self {
        Self {
            screen: TellerScreen::Idle { error: None },
        }
    }

    pub fn screen(&self) -> &TellerScreen {
        &self.screen
    }

    /// Idle -> Scanning, clearing any prior error.
    pub fn start_scan(&mut self) {
        match self.screen {
            TellerScreen::Idle { .. } => {
                info!("scan started");
                self.screen = TellerScreen::Scanning;
            }
            _ => debug!("start_scan ignored outside idle"),
        }
    }

    /// Scanning -> Reviewing when the decoded text validates, otherwise
    /// back to Idle with the user-facing message. No retry of the same
    /// frame, no partial recovery.
    pub fn decoded(&mut self, text: &str) {
        if !matches!(self.screen, TellerScreen::Scanning) {
            debug!("decoded ignored outside scanning");
            return;
        }
        match TransactionPayload::parse_canonical(text) {
            Ok(payload) => {
                info!(service = %payload.service_type, "payload accepted for review");
                self.screen = TellerScreen::Reviewing { payload };
            }
            Err(err) => {
                warn!(%err, "scanned payload rejected");
                self.screen = TellerScreen::Idle {
                    error: Some(PARSE_ERROR_MESSAGE.to_string()),
                };
            }
        }
    }

    /// Scanning -> Idle with a message; the camera could not deliver.
    pub fn scan_failed(&mut self, message: impl Into<String>) {
        if !matches!(self.screen, TellerScreen::Scanning) {
            debug!("scan_failed ignored outside scanning");
            return;
        }
        self.screen = TellerScreen::Idle {
            error: Some(message.into()),
        };
    }

    /// Scanning | Reviewing -> Idle, discarding any reviewed payload.
    pub fn cancel(&mut self) {
        if matches!(
            self.screen,
            TellerScreen::Scanning | TellerScreen::Reviewing { .. }
        ) {
            self.screen = TellerScreen::Idle { error: None };
        } else {
            debug!("cancel ignored");
        }
    }

    /// Reviewing -> Complete. No side effect beyond local state.
    pub fn confirm(&mut self) {
        if matches!(self.screen, TellerScreen::Reviewing { .. }) {
            info!("transaction confirmed");
            self.screen = TellerScreen::Complete;
        } else {
            debug!("confirm ignored outside review");
        }
    }

    /// Complete -> Idle, ready for the next customer.
    pub fn next(&mut self) {
        if matches!(self.screen, TellerScreen::Complete) {
            self.screen = TellerScreen::Idle { error: None };
        }
    }
}
