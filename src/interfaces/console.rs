use crate::domain::payload::TransactionPayload;
use crate::domain::ports::QrImage;

/// Field lines shown on both the customer display and the teller review
/// screen.
pub fn payload_summary(payload: &TransactionPayload) -> String {
    let mut lines = vec![
        format!("Service:   {}", payload.service_type),
        format!("Name:      {}", payload.customer_name),
        format!("Account:   {}", payload.account_number),
    ];
    if let Some(amount) = payload.amount {
        lines.push(format!("Amount:    ${amount}"));
    }
    if let Some(details) = &payload.details {
        lines.push(format!("Details:   {details}"));
    }
    if !payload.timestamp.is_empty() {
        lines.push(format!("Timestamp: {}", payload.timestamp));
    }
    lines.join("\n")
}

/// Block-art rendering of an encoded image, two characters per module.
pub fn render_code(image: &QrImage, module_scale: u32) -> String {
    let scale = module_scale.max(1) as usize;
    let width = image.width as usize;
    let height = image.height as usize;

    let mut out = String::new();
    let mut y = scale / 2;
    while y < height {
        let mut x = scale / 2;
        while x < width {
            let dark = image.pixels.get(y * width + x).is_some_and(|&px| px < 128);
            out.push_str(if dark { "██" } else { "  " });
            x += scale;
        }
        out.push('\n');
        y += scale;
    }
    out
}
