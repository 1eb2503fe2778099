//! Croatian HUB1/HUB3 payment slip extraction from PDF417 and QR barcodes
//!
//! A recognizer takes one isolated symbol sample (a grayscale QR image or the
//! row scans of a PDF417 symbol), recovers its byte payload with error
//! correction and turns it into a validated [`PaymentRecord`].
//!
//! ```no_run
//! use croatia_payment::{QrPaymentRecognizer, QrSettings, ResultState};
//!
//! let image = image::open("slip.png").unwrap().to_luma8();
//! let recognizer = QrPaymentRecognizer::new(QrSettings::default()).unwrap();
//! if recognizer.recognize(&image).unwrap() == ResultState::Valid {
//!     let record = recognizer.result();
//!     println!("{} {} cents", record.iban, record.amount_eur);
//! }
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Symbol decoding (QR and PDF417 error correction, segment decoding)
pub mod decoder;
/// Error types of every stage
pub mod error;
/// Core data structures (RawPayload, PaymentRecord, BitMatrix, symbols)
pub mod models;
/// Recognizers and their lifecycle
pub mod recognizer;
/// Per-recognizer settings
pub mod settings;
/// Payload parsing, validation and assembly
pub mod slip;
/// Symbology strategies
pub mod strategy;
/// Utility functions (binarization)
pub mod utils;

pub use error::{DecodeError, FieldError, ParseError, RecognizerError};
pub use models::{
    BitMatrix, Pdf417Row, Pdf417Symbol, PaymentRecord, RawPayload, ResultState, SlipFormat,
    Symbology,
};
pub use recognizer::{Pdf417PaymentRecognizer, QrPaymentRecognizer, RecognitionRun, Recognizer};
pub use settings::{CommonSettings, Pdf417Settings, QrSettings, Rounding};
pub use strategy::{Pdf417Strategy, QrStrategy, SymbolStrategy};
