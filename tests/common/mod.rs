use quickbank::domain::customer::Customer;
use quickbank::domain::payload::{Amount, ServiceRequest, TransactionPayload};
use quickbank::domain::ports::{EncodeOptions, Frame, QrCodec};
use rust_decimal_macros::dec;

#[allow(dead_code)]
pub fn deposit_payload() -> TransactionPayload {
    TransactionPayload::build(
        &Customer::mock(),
        ServiceRequest::CashDeposit {
            amount: Amount::new(dec!(150.00)).unwrap(),
        },
    )
}

#[allow(dead_code)]
pub fn frame_for(codec: &dyn QrCodec, text: &str) -> Frame {
    let image = codec.encode(text, &EncodeOptions::default()).unwrap();
    Frame::from(image)
}
