use clap::{Parser, ValueEnum};
use miette::{IntoDiagnostic, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use quickbank::application::customer_flow::{CustomerFlow, FormInput};
use quickbank::application::scan::{CancelToken, ScanOutcome, ScanPipeline};
use quickbank::application::shell::{Role, RoleShell};
use quickbank::application::teller_flow::{TellerFlow, TellerScreen};
use quickbank::domain::customer::Customer;
use quickbank::domain::payload::ServiceType;
use quickbank::domain::ports::{EncodeOptions, Facing, Frame, QrCodecRef};
use quickbank::error::{FormError, HandoffError};
use quickbank::infrastructure::camera::ScriptedCamera;
use quickbank::infrastructure::codec::passthrough::PassthroughCodec;
use quickbank::infrastructure::codec::qr::QrImageCodec;
use quickbank::interfaces::console;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ServiceArg {
    Deposit,
    Withdrawal,
    UpdateDetails,
}

impl From<ServiceArg> for ServiceType {
    fn from(arg: ServiceArg) -> Self {
        match arg {
            ServiceArg::Deposit => ServiceType::CashDeposit,
            ServiceArg::Withdrawal => ServiceType::CashWithdrawal,
            ServiceArg::UpdateDetails => ServiceType::UpdateContactDetails,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CodecArg {
    Qr,
    Passthrough,
}

/// Runs the whole air-gapped handoff in one process: the customer flow
/// renders a code, a scripted camera captures it, the teller flow scans
/// and confirms.
#[derive(Parser)]
#[command(author, version, about = "QuickBank branch QR handoff demo", long_about = None)]
struct Cli {
    /// Service the customer requests
    #[arg(long, value_enum, default_value_t = ServiceArg::Deposit)]
    service: ServiceArg,

    /// Amount for deposits and withdrawals
    #[arg(long, default_value = "150.00")]
    amount: String,

    /// New contact details for detail updates
    #[arg(long, default_value = "555-1234")]
    details: String,

    /// Codec adapter used on both sides of the handoff
    #[arg(long, value_enum, default_value_t = CodecArg::Qr)]
    codec: CodecArg,

    /// Dark frames captured before the code comes into view
    #[arg(long, default_value_t = 3)]
    warmup_frames: usize,

    /// Print the encoded code as block art
    #[arg(long)]
    show_code: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    run(cli).await.into_diagnostic()?;
    Ok(())
}

async fn run(cli: Cli) -> std::result::Result<(), HandoffError> {
    let codec: QrCodecRef = match cli.codec {
        CodecArg::Qr => Arc::new(QrImageCodec::new()),
        CodecArg::Passthrough => Arc::new(PassthroughCodec::new()),
    };
    let service = ServiceType::from(cli.service);
    let encode_options = EncodeOptions::default();

    let mut shell = RoleShell::new();
    shell.select(Role::Customer);
    info!(?service, "customer flow started");

    let mut customer_flow = CustomerFlow::new(Customer::mock(), Arc::clone(&codec))
        .with_encode_options(encode_options);
    customer_flow.select_service(service);
    let input = if service.needs_amount() {
        FormInput {
            amount: Some(cli.amount.clone()),
            details: None,
        }
    } else {
        FormInput {
            amount: None,
            details: Some(cli.details.clone()),
        }
    };
    customer_flow.submit_form(input)?;

    let (payload, code) = customer_flow
        .displayed()
        .ok_or_else(|| FormError::Encode("no code on display".to_string()))?;
    println!("Show this to the Teller\n");
    if cli.show_code {
        println!("{}", console::render_code(code, encode_options.module_scale));
    }
    println!("{}\n", console::payload_summary(payload));
    let capture = Frame::from(code.clone());

    shell.switch_role();
    shell.select(Role::Teller);
    info!("teller flow started");

    let mut teller = TellerFlow::new();
    teller.start_scan();

    let camera = ScriptedCamera::warmup_then(cli.warmup_frames, capture);
    let pipeline = ScanPipeline::new(Box::new(camera), Arc::clone(&codec))
        .with_frame_interval(Duration::from_millis(4));
    let cancel = CancelToken::new();
    match pipeline.scan(Facing::Environment, &cancel).await {
        Ok(ScanOutcome::Decoded(text)) => teller.decoded(&text),
        Ok(ScanOutcome::Cancelled) => teller.cancel(),
        Err(err) => teller.scan_failed(err.to_string()),
    }

    match teller.screen() {
        TellerScreen::Reviewing { payload } => {
            println!("Confirm Transaction\n");
            println!("{}\n", console::payload_summary(payload));
        }
        TellerScreen::Idle { error: Some(message) } => {
            println!("Scan failed: {message}");
            return Ok(());
        }
        _ => {}
    }

    teller.confirm();
    if matches!(teller.screen(), TellerScreen::Complete) {
        println!("Transaction Complete!");
        println!("The customer's request has been processed successfully.");
    }

    // ready for the next customer; nothing is retained
    teller.next();
    customer_flow.restart();
    Ok(())
}
