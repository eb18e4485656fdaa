//! QR-code encoding and PNG rendering.
//!
//! The encoder starts at the configured symbol version and, when `fit` is
//! enabled, walks up to larger versions until the payload fits. Rendering is
//! done by hand so that module size and quiet-zone width are exactly what
//! the options say.

use image::{GrayImage, ImageFormat, Luma};
use qrcode::{types::QrError, Color, EcLevel, QrCode, Version};
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use std::str::FromStr;
use thiserror::Error;

/// Largest QR symbol version.
pub const MAX_VERSION: i16 = 40;

const DARK: Luma<u8> = Luma([0]);
const LIGHT: Luma<u8> = Luma([255]);

/// Errors produced while encoding or rendering a QR code.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The payload does not fit in any allowed version.
    #[error("payload of {len} bytes does not fit in a version {version} QR code")]
    DataTooLong {
        /// Payload size in bytes
        len: usize,
        /// Largest version that was tried
        version: i16,
    },
    /// The QR library rejected the input for another reason.
    #[error("QR encoding failed: {0}")]
    Qr(QrError),
    /// Rendered image dimensions overflow `u32`.
    #[error("rendered image would be too large ({modules} modules at {box_size}px)")]
    ImageTooLarge {
        /// Symbol width including the border, in modules
        modules: usize,
        /// Pixels per module
        box_size: u32,
    },
    /// PNG serialization failed.
    #[error("PNG serialization failed: {0}")]
    Png(#[from] image::ImageError),
}

/// Error-correction level, from least (`L`) to most (`H`) redundant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ErrorCorrection {
    /// Recovers about 7% of the symbol
    #[default]
    L,
    /// Recovers about 15% of the symbol
    M,
    /// Recovers about 25% of the symbol
    Q,
    /// Recovers about 30% of the symbol
    H,
}

impl From<ErrorCorrection> for EcLevel {
    fn from(level: ErrorCorrection) -> Self {
        match level {
            ErrorCorrection::L => Self::L,
            ErrorCorrection::M => Self::M,
            ErrorCorrection::Q => Self::Q,
            ErrorCorrection::H => Self::H,
        }
    }
}

impl FromStr for ErrorCorrection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L" | "LOW" => Ok(Self::L),
            "M" | "MEDIUM" => Ok(Self::M),
            "Q" | "QUARTILE" => Ok(Self::Q),
            "H" | "HIGH" => Ok(Self::H),
            other => Err(format!("unknown error-correction level `{other}`")),
        }
    }
}

/// Encoder settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrOptions {
    /// Starting symbol version (1..=40)
    pub version: i16,
    /// Error-correction level
    pub error_correction: ErrorCorrection,
    /// Pixels per module
    pub box_size: u32,
    /// Quiet zone width, in modules
    pub border: u32,
    /// Move up to a larger version when the payload does not fit
    pub fit: bool,
}

impl Default for QrOptions {
    fn default() -> Self {
        Self {
            version: 1,
            error_correction: ErrorCorrection::L,
            box_size: 10,
            border: 4,
            fit: true,
        }
    }
}

/// Encodes text into QR codes according to a fixed set of [`QrOptions`].
#[derive(Debug, Clone, Default)]
pub struct QrEncoder {
    options: QrOptions,
}

impl QrEncoder {
    /// Create an encoder.
    #[must_use]
    pub const fn new(options: QrOptions) -> Self {
        Self { options }
    }

    /// Options this encoder was built with.
    #[must_use]
    pub const fn options(&self) -> &QrOptions {
        &self.options
    }

    /// Encode `data` into a QR symbol.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::DataTooLong`] when the payload does not fit in
    /// the configured version (or in version 40 when `fit` is enabled).
    pub fn encode(&self, data: &str) -> Result<QrImage, EncodeError> {
        let ec_level = EcLevel::from(self.options.error_correction);
        let start = self.options.version.clamp(1, MAX_VERSION);
        let end = if self.options.fit { MAX_VERSION } else { start };

        for version in start..=end {
            match QrCode::with_version(data, Version::Normal(version), ec_level) {
                Ok(code) => {
                    tracing::debug!(version, len = data.len(), "QR payload encoded");
                    return Ok(QrImage {
                        width: code.width(),
                        colors: code.to_colors(),
                        version,
                        box_size: self.options.box_size,
                        border: self.options.border,
                    });
                }
                Err(QrError::DataTooLong) => {}
                Err(other) => return Err(EncodeError::Qr(other)),
            }
        }

        Err(EncodeError::DataTooLong {
            len: data.len(),
            version: end,
        })
    }
}

/// An encoded QR symbol ready to be rasterized.
#[derive(Debug, Clone)]
pub struct QrImage {
    width: usize,
    colors: Vec<Color>,
    version: i16,
    box_size: u32,
    border: u32,
}

impl QrImage {
    /// Symbol version that was used.
    #[must_use]
    pub const fn version(&self) -> i16 {
        self.version
    }

    /// Symbol width in modules, without the border.
    #[must_use]
    pub const fn width_modules(&self) -> usize {
        self.width
    }

    /// Whether the module at (`x`, `y`) is dark.
    #[must_use]
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.width && self.colors[y * self.width + x] == Color::Dark
    }

    /// Side length of the rendered image in pixels.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::ImageTooLarge`] if the size overflows `u32`.
    pub fn size_px(&self) -> Result<u32, EncodeError> {
        let modules = self.width + 2 * self.border as usize;
        u32::try_from(modules)
            .ok()
            .and_then(|m| m.checked_mul(self.box_size))
            .ok_or(EncodeError::ImageTooLarge {
                modules,
                box_size: self.box_size,
            })
    }

    /// Rasterize as black modules on a white background.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::ImageTooLarge`] if the size overflows `u32`.
    pub fn to_luma(&self) -> Result<GrayImage, EncodeError> {
        let size = self.size_px()?;
        let mut img = GrayImage::from_pixel(size, size, LIGHT);
        if self.box_size == 0 {
            return Ok(img);
        }

        let border = self.border as usize;
        for (x, y, pixel) in img.enumerate_pixels_mut() {
            let mx = (x / self.box_size) as usize;
            let my = (y / self.box_size) as usize;
            if mx >= border && my >= border && self.is_dark(mx - border, my - border) {
                *pixel = DARK;
            }
        }

        Ok(img)
    }

    /// Serialize as PNG into an in-memory buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the image is too large or PNG encoding fails.
    pub fn to_png(&self) -> Result<Vec<u8>, EncodeError> {
        let img = self.to_luma()?;
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png)?;
        Ok(buf.into_inner())
    }
}
