//! QR code output for generated links
//!
//! Two renderings of the same link: a URL for the third-party QR image
//! endpoint, and a Unicode half-block drawing for terminals.

use crate::link::encode_uri_component;
use qrcode::render::unicode::Dense1x2;
use qrcode::QrCode;

const QR_IMAGE_ENDPOINT: &str = "https://api.qrserver.com/v1/create-qr-code/";

/// Default edge length, in pixels, of the QR image.
pub const DEFAULT_QR_SIZE: u32 = 192;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QrError {
    #[error("Failed to encode QR code: {0}")]
    Encode(String),
}

/// URL of a `size`x`size` QR image for `data`
///
/// The data is percent-encoded as a single query parameter value.
pub fn qr_image_url(data: &str, size: u32) -> String {
    format!(
        "{QR_IMAGE_ENDPOINT}?size={size}x{size}&data={}",
        encode_uri_component(data)
    )
}

/// Render `data` as a QR code using Unicode half blocks
///
/// Colors are inverted so the code scans on dark terminal backgrounds.
pub fn render_qr(data: &str) -> Result<String, QrError> {
    let code = QrCode::new(data.as_bytes()).map_err(|e| QrError::Encode(e.to_string()))?;

    Ok(code
        .render::<Dense1x2>()
        .dark_color(Dense1x2::Light)
        .light_color(Dense1x2::Dark)
        .quiet_zone(true)
        .build())
}
