mod common;

use std::sync::Arc;
use std::time::Duration;

use quickbank::application::customer_flow::{CustomerFlow, FormInput};
use quickbank::application::scan::{CancelToken, ScanOutcome, ScanPipeline};
use quickbank::application::teller_flow::{TellerFlow, TellerScreen};
use quickbank::domain::customer::Customer;
use quickbank::domain::payload::{ServiceType, TransactionPayload};
use quickbank::domain::ports::{Facing, Frame, QrCodecRef};
use quickbank::infrastructure::camera::ScriptedCamera;
use quickbank::infrastructure::codec::passthrough::PassthroughCodec;
use quickbank::infrastructure::codec::qr::QrImageCodec;
use rust_decimal_macros::dec;

/// Drives the whole handoff: customer form -> displayed code -> scripted
/// capture -> scan -> teller decode. Returns what the customer displayed
/// and the teller flow as the scan left it.
async fn run_handoff(
    codec: QrCodecRef,
    service: ServiceType,
    input: FormInput,
) -> (TransactionPayload, TellerFlow) {
    let mut flow = CustomerFlow::new(Customer::mock(), Arc::clone(&codec));
    flow.select_service(service);
    flow.submit_form(input).unwrap();
    let (payload, code) = flow.displayed().unwrap();
    let displayed = payload.clone();
    let camera = ScriptedCamera::warmup_then(2, Frame::from(code.clone()));

    let mut teller = TellerFlow::new();
    teller.start_scan();
    let pipeline = ScanPipeline::new(Box::new(camera), codec)
        .with_frame_interval(Duration::from_millis(1));
    match pipeline
        .scan(Facing::Environment, &CancelToken::new())
        .await
        .unwrap()
    {
        ScanOutcome::Decoded(text) => teller.decoded(&text),
        ScanOutcome::Cancelled => teller.cancel(),
    }

    (displayed, teller)
}

#[tokio::test]
async fn test_deposit_handoff_end_to_end() {
    let codec: QrCodecRef = Arc::new(PassthroughCodec::new());
    let (displayed, mut teller) = run_handoff(
        codec,
        ServiceType::CashDeposit,
        FormInput {
            amount: Some("150.00".to_string()),
            details: None,
        },
    )
    .await;

    let reviewed = match teller.screen() {
        TellerScreen::Reviewing { payload } => payload.clone(),
        other => panic!("expected review screen, got {other:?}"),
    };
    assert_eq!(reviewed, displayed);
    assert_eq!(reviewed.service_type, ServiceType::CashDeposit);
    assert_eq!(reviewed.amount, Some(dec!(150.00)));
    assert_eq!(reviewed.details, None);
    assert_eq!(reviewed.customer_name, "Jane Doe");
    assert_eq!(reviewed.account_number, "1234567890");

    teller.confirm();
    assert_eq!(teller.screen(), &TellerScreen::Complete);

    // reset keeps no record of the completed transaction
    teller.next();
    assert_eq!(teller.screen(), &TellerScreen::Idle { error: None });
}

#[tokio::test]
async fn test_update_details_handoff_end_to_end() {
    let codec: QrCodecRef = Arc::new(PassthroughCodec::new());
    let (displayed, teller) = run_handoff(
        codec,
        ServiceType::UpdateContactDetails,
        FormInput {
            amount: None,
            details: Some("555-1234".to_string()),
        },
    )
    .await;

    let reviewed = match teller.screen() {
        TellerScreen::Reviewing { payload } => payload.clone(),
        other => panic!("expected review screen, got {other:?}"),
    };
    assert_eq!(reviewed, displayed);
    assert_eq!(reviewed.amount, None);
    assert_eq!(reviewed.details, Some("555-1234".to_string()));
}

#[tokio::test]
async fn test_handoff_over_real_qr_codec() {
    let codec: QrCodecRef = Arc::new(QrImageCodec::new());
    let (displayed, teller) = run_handoff(
        codec,
        ServiceType::CashWithdrawal,
        FormInput {
            amount: Some("20".to_string()),
            details: None,
        },
    )
    .await;

    match teller.screen() {
        TellerScreen::Reviewing { payload } => assert_eq!(payload, &displayed),
        other => panic!("expected review screen, got {other:?}"),
    }
}

#[tokio::test]
async fn test_foreign_code_lands_teller_back_in_idle() {
    // A scannable code that is not a QuickBank payload.
    let codec: QrCodecRef = Arc::new(PassthroughCodec::new());
    let frame = common::frame_for(codec.as_ref(), "https://example.com/not-a-payload");
    let camera = ScriptedCamera::new(vec![Some(frame)]);

    let mut teller = TellerFlow::new();
    teller.start_scan();
    let pipeline = ScanPipeline::new(Box::new(camera), codec)
        .with_frame_interval(Duration::from_millis(1));
    match pipeline
        .scan(Facing::Environment, &CancelToken::new())
        .await
        .unwrap()
    {
        ScanOutcome::Decoded(text) => teller.decoded(&text),
        ScanOutcome::Cancelled => teller.cancel(),
    }

    assert!(matches!(
        teller.screen(),
        TellerScreen::Idle { error: Some(_) }
    ));
}
