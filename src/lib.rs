//! # vtcore
//!
//! Core data structures extracted from a terminal emulator: a scrollback
//! [`Ring`] buffer and a streaming SIXEL decoder.
//!
//! ## Scrollback ring
//!
//! A fixed-capacity circular buffer whose rows stay addressable by absolute
//! index as the window scrolls:
//!
//! ```
//! use vtcore::Ring;
//!
//! let mut ring: Ring<String> = Ring::new(3);
//! for n in 0..5 {
//!     ring.append(format!("row {n}"));
//! }
//! // Rows 0 and 1 scrolled off the top; 2..5 are still live.
//! assert_eq!(ring.delta(), 2);
//! assert_eq!(ring.get(2).map(String::as_str), Some("row 2"));
//! assert_eq!(ring.get(0), None);
//! ```
//!
//! ## SIXEL decoding
//!
//! ```
//! use vtcore::sixel_decode;
//!
//! // Define color 1 as pure red and paint one full sixel column.
//! let image = sixel_decode(b"\x1bPq#1;2;100;0;0~\x1b\\");
//! assert_eq!((image.width, image.height), (1, 6));
//! // Pixels are BGRA with alpha always 0xff.
//! assert_eq!(&image.pixels[..4], &[0, 0, 255, 255]);
//! ```
//!
//! For incremental input (a PTY hands the emulator arbitrary chunks), drive a
//! [`SixelParser`] directly with [`SixelParser::advance`].

use thiserror::Error;

pub mod decoder;
pub mod ring;

pub use decoder::{rgb, sixel_decode, PixelAspectRatio, SixelImage, SixelParser};
pub use ring::Ring;

/// Errors reported by this crate.
///
/// Malformed SIXEL input is never an error; the decoder skips or clamps it.
#[derive(Debug, Error)]
pub enum VtError {
    /// Output buffer size doesn't match the final raster dimensions.
    #[error("buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },
}

/// Result type for vtcore operations.
pub type Result<T> = core::result::Result<T, VtError>;
