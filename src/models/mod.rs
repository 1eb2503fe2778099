/// Module grid of a sampled QR symbol
pub mod matrix;
/// Decoded bytes with their verification state
pub mod payload;
/// Extracted payment record
pub mod payment;
/// PDF417 row scans
pub mod pdf417;
/// QR code metadata and decoded content
pub mod qr_code;

pub use matrix::BitMatrix;
pub use payload::{PayloadLine, RawPayload, Symbology};
pub use payment::{PaymentRecord, ResultState, SlipFormat};
pub use pdf417::{Pdf417Row, Pdf417Symbol};
pub use qr_code::{ECLevel, MaskPattern, QRCode};
