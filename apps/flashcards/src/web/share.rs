//! Shareable deck links and their QR codes.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Luma};
use qrcode::{EcLevel, QrCode};

use crate::error::AppError;

/// Minimum edge length of generated QR images, in pixels.
pub const QR_SIZE: u32 = 320;

/// Public URL of a deck as seen from the requesting host.
///
/// Local hosts are served over plain HTTP, anything else over HTTPS.
pub fn deck_url(host: &str, deck_id: &str) -> String {
    let hostname = host.split(':').next().unwrap_or(host);
    let scheme = if matches!(hostname, "localhost" | "127.0.0.1") {
        "http"
    } else {
        "https"
    };
    format!("{scheme}://{host}/deck/{deck_id}")
}

/// Encode `url` as a PNG QR code with high error correction.
pub fn qr_png(url: &str) -> Result<Vec<u8>, AppError> {
    let code = QrCode::with_error_correction_level(url.as_bytes(), EcLevel::H)
        .map_err(|e| AppError::internal(format!("qr encoding failed: {e}")))?;
    let image = code
        .render::<Luma<u8>>()
        .min_dimensions(QR_SIZE, QR_SIZE)
        .build();

    let mut png = Vec::new();
    DynamicImage::ImageLuma8(image)
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| AppError::internal(format!("png encoding failed: {e}")))?;
    Ok(png)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_hosts_use_http() {
        assert_eq!(
            deck_url("localhost:8080", "1234"),
            "http://localhost:8080/deck/1234"
        );
        assert_eq!(
            deck_url("127.0.0.1:3000", "1234"),
            "http://127.0.0.1:3000/deck/1234"
        );
    }

    #[test]
    fn other_hosts_use_https() {
        assert_eq!(deck_url("someserver", "1234"), "https://someserver/deck/1234");
        assert_eq!(
            deck_url("localhost.example.com", "AB"),
            "https://localhost.example.com/deck/AB"
        );
    }

    #[test]
    fn qr_is_a_png_of_at_least_min_size() {
        let png = qr_png("https://someserver/deck/TEST-CODE").unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = image::load_from_memory_with_format(&png, ImageFormat::Png).unwrap();
        assert!(decoded.width() >= QR_SIZE);
        assert_eq!(decoded.width(), decoded.height());
    }
}
