mod common;

use quickbank::application::teller_flow::{PARSE_ERROR_MESSAGE, TellerFlow, TellerScreen};

#[test]
fn test_missing_service_type_is_decode_failed() {
    let mut teller = TellerFlow::new();
    teller.start_scan();
    teller.decoded(r#"{"accountNumber":"1234567890","customerName":"Jane Doe"}"#);

    assert_eq!(
        teller.screen(),
        &TellerScreen::Idle {
            error: Some(PARSE_ERROR_MESSAGE.to_string())
        }
    );
}

#[test]
fn test_empty_account_number_is_decode_failed() {
    let mut teller = TellerFlow::new();
    teller.start_scan();
    teller.decoded(r#"{"accountNumber":"","customerName":"Jane Doe","serviceType":"Cash Deposit"}"#);

    assert!(matches!(
        teller.screen(),
        TellerScreen::Idle { error: Some(_) }
    ));
}

#[test]
fn test_valid_payload_reaches_review() {
    let text = common::deposit_payload().to_canonical_text().unwrap();
    let mut teller = TellerFlow::new();
    teller.start_scan();
    teller.decoded(&text);

    assert!(matches!(teller.screen(), TellerScreen::Reviewing { .. }));
}

#[test]
fn test_cancel_discards_reviewed_payload() {
    let text = common::deposit_payload().to_canonical_text().unwrap();
    let mut teller = TellerFlow::new();
    teller.start_scan();
    teller.decoded(&text);

    teller.cancel();
    assert_eq!(teller.screen(), &TellerScreen::Idle { error: None });
}

#[test]
fn test_scan_failure_surfaces_message_in_idle() {
    let mut teller = TellerFlow::new();
    teller.start_scan();
    teller.scan_failed("camera unavailable: permission denied");

    assert_eq!(
        teller.screen(),
        &TellerScreen::Idle {
            error: Some("camera unavailable: permission denied".to_string())
        }
    );

    // retry is just another start_scan
    teller.start_scan();
    assert_eq!(teller.screen(), &TellerScreen::Scanning);
}

#[test]
fn test_out_of_state_calls_are_ignored() {
    let mut teller = TellerFlow::new();

    teller.confirm();
    assert_eq!(teller.screen(), &TellerScreen::Idle { error: None });

    teller.next();
    assert_eq!(teller.screen(), &TellerScreen::Idle { error: None });

    teller.decoded("{}");
    assert_eq!(teller.screen(), &TellerScreen::Idle { error: None });

    teller.cancel();
    assert_eq!(teller.screen(), &TellerScreen::Idle { error: None });
}
